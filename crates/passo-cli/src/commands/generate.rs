use passo_core::generator::generate_password;

use crate::cli::GenerateArgs;

pub fn handle_generate(args: &GenerateArgs) -> anyhow::Result<()> {
    let password = generate_password(&args.policy())?;
    println!("{}", password);
    Ok(())
}
