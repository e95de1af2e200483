pub mod analysis;
pub mod api;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod demo;
pub mod editor;
pub mod error;
pub mod selection;

// Re-export common error type
pub use error::{CodebridgeError, Result};
pub use selection::{Concept, Language, Selection};
