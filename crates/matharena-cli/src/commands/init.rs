//! The `matharena init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("matharena.toml").exists() {
        println!("matharena.toml already exists, skipping.");
    } else {
        std::fs::write("matharena.toml", SAMPLE_CONFIG)?;
        println!("Created matharena.toml");
    }

    println!("\nNext steps:");
    println!("  1. Point base_url at your MathArena backend");
    println!("  2. Run: matharena register");
    println!("  3. Run: matharena play");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# matharena configuration

# Address of the MathArena backend (overridden by MATHARENA_BASE_URL)
base_url = "http://localhost:8080"

# Per-request timeout in seconds
timeout_secs = 10

# Where the signed-in session is kept
# session_file = "${HOME}/.config/matharena/session.json"
"#;
