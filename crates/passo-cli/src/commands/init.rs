use passo_core::remote::SqliteRemoteStore;
use passo_core::DeviceKey;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_keyfile_path, default_storage_dir, write_config, PassoConfig};
use crate::errors::CliError;
use crate::output::{badge, kv, Badge, UiContext};

pub fn handle_init(ctx: &AppContext<'_>, args: &InitArgs) -> anyhow::Result<()> {
    let config_path = resolve_config_path(ctx.cli())?;
    if config_path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {}. Use --force to overwrite it.",
            config_path.display()
        ))
        .into());
    }

    let storage_dir = match &args.storage_dir {
        Some(dir) => dir.clone(),
        None => default_storage_dir()?,
    };
    let keyfile_path = match &args.keyfile_path {
        Some(path) => path.clone(),
        None => default_keyfile_path()?,
    };

    std::fs::create_dir_all(&storage_dir).map_err(|e| {
        anyhow::anyhow!(
            "Failed to create storage directory {}: {}",
            storage_dir.display(),
            e
        )
    })?;

    if let Some(database) = &args.cloud_database {
        if let Some(parent) = database.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                anyhow::anyhow!("Failed to create directory {}: {}", parent.display(), e)
            })?;
        }
        // Creates the schema, and fails early on an unusable path.
        SqliteRemoteStore::open(database)?;
    }

    // An existing key is kept so that vaults written with it still decode.
    let key = DeviceKey::load_or_create(&keyfile_path)?;

    let config = PassoConfig::new(
        storage_dir.clone(),
        keyfile_path.clone(),
        args.cloud_database.clone(),
        ctx.user_id(),
    );
    write_config(&config_path, &config)?;

    if ctx.quiet() {
        return Ok(());
    }
    let ui = UiContext::fallback();
    println!(
        "{}",
        badge(
            ui.color,
            Badge::Ok,
            &format!("Initialized passo at {}", config_path.display())
        )
    );
    println!("  {}", kv(&ui, "Storage", &storage_dir.display().to_string()));
    println!("  {}", kv(&ui, "Key file", &keyfile_path.display().to_string()));
    println!("  {}", kv(&ui, "Public key", &key.public_key()));
    if let Some(database) = &args.cloud_database {
        println!("  {}", kv(&ui, "Cloud database", &database.display().to_string()));
    }
    if let Some(user) = config.user_id() {
        println!("  {}", kv(&ui, "User", user));
    }
    Ok(())
}
