use passo_core::CredentialRecord;

use crate::app::AppContext;
use crate::cli::{ListArgs, SearchArgs};
use crate::output::{print_json, records_json, records_table, UiContext};

pub async fn handle_list(ctx: &AppContext<'_>, args: &ListArgs) -> anyhow::Result<()> {
    let mut session = ctx.open_session(args.json)?;
    let vault = session.load().await?;
    let records: Vec<&CredentialRecord> = vault.iter().collect();
    print_records(&session.ui, &records, "No passwords stored yet.")
}

pub async fn handle_search(ctx: &AppContext<'_>, args: &SearchArgs) -> anyhow::Result<()> {
    let mut session = ctx.open_session(args.json)?;
    let vault = session.load().await?;
    let records = vault.search(&args.query);
    print_records(&session.ui, &records, "No passwords match.")
}

fn print_records(ui: &UiContext, records: &[&CredentialRecord], empty: &str) -> anyhow::Result<()> {
    if ui.mode.is_json() {
        return print_json(&records_json(records));
    }
    if records.is_empty() {
        if ui.mode.is_pretty() && !ui.quiet {
            println!("{}", empty);
        }
        return Ok(());
    }
    println!("{}", records_table(ui, records));
    Ok(())
}
