use crate::app::{resolve_record, AppContext};
use crate::cli::DeleteArgs;

pub async fn handle_delete(ctx: &AppContext<'_>, args: &DeleteArgs) -> anyhow::Result<()> {
    let mut session = ctx.open_session(false)?;
    let mut vault = session.load().await?;
    let id = resolve_record(&vault, &args.id)?.id.clone();

    let result = session.gateway.delete(&session.ctx, &mut vault, &id).await;
    session.flush_notices();
    result?;
    Ok(())
}
