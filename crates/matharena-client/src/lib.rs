//! matharena-client — Backend access for the MathArena client.
//!
//! Implements `ArenaApi` over HTTP with reqwest, keeps the signed-in session
//! in a JSON file, and loads the client configuration.

pub mod config;
pub mod http;
pub mod store;

pub use config::{create_client, load_config_from, session_store, ArenaConfig};
pub use http::HttpArenaClient;
pub use store::FileSessionStore;
