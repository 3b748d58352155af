//! matharena-core — Domain model, page state machines, and timer.
//!
//! This crate defines the data the MathArena client exchanges with its
//! backend, the traits the HTTP client and session storage implement, and
//! the register/login/home page logic that the front end renders.

pub mod error;
pub mod mock;
pub mod model;
pub mod pages;
pub mod router;
pub mod session;
pub mod timer;
pub mod token;
pub mod traits;
pub mod validation;

pub use error::{ApiError, FormError, GameError, StoreError};
pub use router::{Navigation, Route};
pub use session::SessionContext;
pub use traits::{ArenaApi, SessionStore};
