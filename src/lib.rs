//! Alt-text generator - turns a user-supplied image into a model-generated
//! description suitable for an HTML `alt` attribute.
//!
//! The crate covers the whole pipeline: acquisition and validation of image
//! sources, the client-side submission orchestrator, the HTTP relay endpoint,
//! and the vision-provider integration behind it.

pub mod acquire;
pub mod ai;
pub mod error;
pub mod models;
pub mod orchestrate;
pub mod prompts;
pub mod relay;
pub mod server;

pub use error::{Error, Result};
