use crate::app::{resolve_record, AppContext};
use crate::cli::ShowArgs;
use crate::output::{print_json, record_detail, record_json};

pub async fn handle_show(ctx: &AppContext<'_>, args: &ShowArgs) -> anyhow::Result<()> {
    let mut session = ctx.open_session(args.json)?;
    let vault = session.load().await?;
    let record = resolve_record(&vault, &args.id)?;

    if session.ui.mode.is_json() {
        return print_json(&record_json(record, args.reveal));
    }
    println!("{}", record_detail(&session.ui, record, args.reveal));
    Ok(())
}
