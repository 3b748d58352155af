//! The `matharena logout` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let (config, mut ctx) = super::load_session(config_path.as_deref())?;
    let was_logged_in = ctx.is_logged_in();

    ctx.sign_out().with_context(|| {
        format!(
            "failed to delete session file: {}",
            config.session_path().display()
        )
    })?;

    if was_logged_in {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}
