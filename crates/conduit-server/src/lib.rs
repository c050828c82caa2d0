//! # conduit-server
//!
//! The axum host for Conduit: every proxy route, the chat session API,
//! the PDF pass-through and on-demand schema validation, over one shared
//! [`AppState`].

pub mod failure;
pub mod routes;
pub mod state;

pub use failure::ApiFailure;
pub use routes::build_router;
pub use state::AppState;
