use crate::app::{resolve_record, AppContext};
use crate::cli::EditArgs;
use crate::errors::CliError;

use super::input::required_field;

pub async fn handle_edit(ctx: &AppContext<'_>, args: &EditArgs) -> anyhow::Result<()> {
    if args.website.is_none() && args.login.is_none() && args.secret.is_none() {
        return Err(CliError::invalid_input(
            "Nothing to change. Pass --website, --login or --secret.",
        )
        .into());
    }

    let mut session = ctx.open_session(false)?;
    let mut vault = session.load().await?;
    let mut record = resolve_record(&vault, &args.id)?.clone();
    if let Some(website) = &args.website {
        record.website = required_field("website", website)?;
    }
    if let Some(login) = &args.login {
        record.login = required_field("login", login)?;
    }
    if let Some(secret) = &args.secret {
        if secret.is_empty() {
            return Err(CliError::invalid_input("--secret cannot be empty").into());
        }
        record.secret = secret.clone();
    }

    let result = session
        .gateway
        .update(&session.ctx, &mut vault, record)
        .await;
    session.flush_notices();
    result?;
    Ok(())
}
