pub mod init;
pub mod logout;
pub mod open;
pub mod whoami;

use std::path::Path;

use anyhow::{Context, Result};

use matharena_client::config::{load_config_from, session_store, ArenaConfig};
use matharena_core::SessionContext;

/// Config plus the session it points at.
pub(crate) fn load_session(
    config_path: Option<&Path>,
) -> Result<(ArenaConfig, SessionContext)> {
    let config = load_config_from(config_path)?;
    let store = session_store(&config);
    let ctx = SessionContext::load(store).with_context(|| {
        format!(
            "failed to read session file: {}",
            config.session_path().display()
        )
    })?;
    Ok((config, ctx))
}
