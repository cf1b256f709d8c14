//! `mode` and `theme`: read or change the stored preferences.

use passo_core::preferences::{read_theme, write_theme};
use passo_core::{StorageMode, StorageTarget, Theme};

use crate::app::AppContext;
use crate::cli::{ModeArgs, ThemeArgs};
use crate::output::{badge, kv, Badge, UiContext};

pub async fn handle_mode(ctx: &AppContext<'_>, args: &ModeArgs) -> anyhow::Result<()> {
    let mut session = ctx.open_session(false)?;

    let mode = match args.mode {
        Some(requested) => {
            let mode = session.gateway.select_mode(requested.into());
            session.ctx.mode = mode;
            session.flush_notices();
            mode
        }
        None => session.ctx.mode,
    };

    if mode == StorageMode::Cloud && session.ctx.identity.is_none() {
        eprintln!(
            "{}",
            badge(
                session.ui.color_stderr,
                Badge::Info,
                "Set --user or PASSO_USER to reach the cloud backend"
            )
        );
    }

    if ctx.quiet() {
        println!("{}", mode);
        return Ok(());
    }
    let target = match session.gateway.target(&session.ctx) {
        StorageTarget::Local => "local device",
        StorageTarget::Remote => "cloud backend",
    };
    println!("{}", kv(&session.ui, "Mode", mode.as_str()));
    println!("{}", kv(&session.ui, "Target", target));
    if let Some(identity) = &session.ctx.identity {
        println!("{}", kv(&session.ui, "User", &identity.id));
    }
    Ok(())
}

pub fn handle_theme(ctx: &AppContext<'_>, args: &ThemeArgs) -> anyhow::Result<()> {
    let device = ctx.device_store()?;

    let theme = match args.theme {
        Some(choice) => {
            let theme = Theme::from(choice);
            write_theme(&device, theme)?;
            theme
        }
        None => read_theme(&device)?.unwrap_or_default(),
    };

    let ui = UiContext::from_env(false, ctx.quiet(), theme);
    if ctx.quiet() {
        println!("{}", theme);
    } else {
        println!("{}", kv(&ui, "Theme", theme.as_str()));
    }
    Ok(())
}
