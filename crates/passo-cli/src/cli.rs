use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use passo_core::generator::PasswordPolicy;
use passo_core::{StorageMode, Theme, VERSION};

/// Passo - a password manager with encrypted local storage and optional cloud sync
#[derive(Parser)]
#[command(name = "passo")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file
    #[arg(long, global = true, env = "PASSO_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Remote account to use in cloud mode
    #[arg(long, global = true, env = "PASSO_USER", value_name = "ID")]
    pub user: Option<String>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the config file and create the device key
    Init(InitArgs),

    /// Add a password
    Add(AddArgs),

    /// List stored passwords
    List(ListArgs),

    /// Find passwords by website or login
    Search(SearchArgs),

    /// Show a single password
    Show(ShowArgs),

    /// Change a stored password
    Edit(EditArgs),

    /// Delete a stored password
    Delete(DeleteArgs),

    /// Print a random password
    Generate(GenerateArgs),

    /// Show or select the storage mode
    Mode(ModeArgs),

    /// Show or set the color theme
    Theme(ThemeArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// SQLite database used as the cloud backend
    #[arg(long, value_name = "PATH")]
    pub cloud_database: Option<PathBuf>,

    /// Directory for the encrypted vault and preferences
    #[arg(long, value_name = "DIR")]
    pub storage_dir: Option<PathBuf>,

    /// Device key file location
    #[arg(long, value_name = "PATH")]
    pub keyfile_path: Option<PathBuf>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Website or service name
    #[arg(long)]
    pub website: String,

    /// Login (email or username)
    #[arg(long)]
    pub login: String,

    /// Password to store (prompted for when omitted)
    #[arg(long, conflicts_with = "generate")]
    pub secret: Option<String>,

    /// Store a freshly generated password
    #[arg(long)]
    pub generate: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `search` command
#[derive(Args)]
pub struct SearchArgs {
    /// Text to look for in website or login (case-insensitive)
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Password ID (full ID or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Print the secret instead of a mask
    #[arg(long)]
    pub reveal: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Password ID (full ID or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// New website
    #[arg(long)]
    pub website: Option<String>,

    /// New login
    #[arg(long)]
    pub login: Option<String>,

    /// New secret
    #[arg(long)]
    pub secret: Option<String>,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Password ID (full ID or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for the `generate` command
#[derive(Args)]
pub struct GenerateArgs {
    /// Password length
    #[arg(long, default_value_t = PasswordPolicy::default().length)]
    pub length: usize,

    /// Leave out uppercase letters
    #[arg(long)]
    pub no_uppercase: bool,

    /// Leave out lowercase letters
    #[arg(long)]
    pub no_lowercase: bool,

    /// Leave out digits
    #[arg(long)]
    pub no_numbers: bool,

    /// Leave out symbols
    #[arg(long)]
    pub no_symbols: bool,
}

impl GenerateArgs {
    pub fn policy(&self) -> PasswordPolicy {
        PasswordPolicy {
            length: self.length,
            uppercase: !self.no_uppercase,
            lowercase: !self.no_lowercase,
            numbers: !self.no_numbers,
            symbols: !self.no_symbols,
        }
    }
}

/// Arguments for the `mode` command
#[derive(Args)]
pub struct ModeArgs {
    /// Mode to switch to (prints the current mode when omitted)
    #[arg(value_enum, value_name = "MODE")]
    pub mode: Option<ModeChoice>,
}

/// Arguments for the `theme` command
#[derive(Args)]
pub struct ThemeArgs {
    /// Theme to use (prints the current theme when omitted)
    #[arg(value_enum, value_name = "THEME")]
    pub theme: Option<ThemeChoice>,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeChoice {
    Local,
    Cloud,
}

impl From<ModeChoice> for StorageMode {
    fn from(choice: ModeChoice) -> Self {
        match choice {
            ModeChoice::Local => StorageMode::Local,
            ModeChoice::Cloud => StorageMode::Cloud,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeChoice {
    Light,
    Dark,
}

impl From<ThemeChoice> for Theme {
    fn from(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Light => Theme::Light,
            ThemeChoice::Dark => Theme::Dark,
        }
    }
}
