use passo_core::generator::{generate_password, PasswordPolicy};
use passo_core::NewCredential;

use crate::app::AppContext;
use crate::cli::AddArgs;
use crate::errors::CliError;
use crate::output::{kv, print_json, record_json};

use super::input::{read_secret, required_field};

pub async fn handle_add(ctx: &AppContext<'_>, args: &AddArgs) -> anyhow::Result<()> {
    let website = required_field("website", &args.website)?;
    let login = required_field("login", &args.login)?;
    let secret = match (&args.secret, args.generate) {
        (Some(secret), _) if secret.is_empty() => {
            return Err(CliError::invalid_input("--secret cannot be empty").into())
        }
        (Some(secret), _) => secret.clone(),
        (None, true) => generate_password(&PasswordPolicy::default())?,
        (None, false) => read_secret(args.no_input)?,
    };

    let mut session = ctx.open_session(args.json)?;
    let mut vault = session.load().await?;
    let result = session
        .gateway
        .add(
            &session.ctx,
            &mut vault,
            NewCredential::new(website, login, secret),
        )
        .await;
    session.flush_notices();
    let record = result?;

    if session.ui.mode.is_json() {
        return print_json(&record_json(&record, false));
    }
    if !ctx.quiet() {
        println!("{}", kv(&session.ui, "ID", &record.id));
        if args.generate {
            println!("{}", kv(&session.ui, "Secret", &record.secret));
        }
    }
    Ok(())
}
