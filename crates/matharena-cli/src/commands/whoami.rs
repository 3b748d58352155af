//! The `matharena whoami` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use matharena_client::create_client;

pub async fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let (config, ctx) = super::load_session(config_path.as_deref())?;

    let Some(session) = ctx.current().filter(|_| ctx.is_logged_in()) else {
        println!("Not logged in.");
        return Ok(());
    };

    let mut table = Table::new();
    table.set_header(vec!["User ID", "Username", "Email", "Signed in"]);

    let api = create_client(&config)?;
    let email = match api.user_info(session.user_id).await {
        Ok(info) => info.email,
        Err(e) => {
            eprintln!("Warning: could not fetch profile from {}: {e}", config.base_url);
            "-".to_string()
        }
    };

    table.add_row(vec![
        Cell::new(session.user_id),
        Cell::new(&session.username),
        Cell::new(email),
        Cell::new(session.signed_in_at.format("%Y-%m-%d %H:%M:%S UTC")),
    ]);
    println!("{table}");
    Ok(())
}
