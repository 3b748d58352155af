//! The `matharena open` command and its page shortcuts.

use std::path::PathBuf;

use anyhow::Result;

use matharena_client::create_client;
use matharena_core::Route;

use crate::app::App;
use crate::input::Input;

pub async fn execute(path: &str, config_path: Option<PathBuf>) -> Result<()> {
    let (config, ctx) = super::load_session(config_path.as_deref())?;
    let api = create_client(&config)?;

    let route = Route::resolve(path);
    if Route::match_path(path).is_none() {
        tracing::debug!(path, %route, "unknown route, redirecting");
    }

    let mut app = App::new(api, ctx, Input::stdin());
    app.run(route).await
}
