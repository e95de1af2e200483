//! The CodeBridge studio: a headless document of panels driven by one
//! orchestrator.
//!
//! - [`document`]: named mount points holding markup and state classes
//! - [`panels`]: each panel renders into its mount points
//! - [`studio`]: the orchestrator wiring panels to the remote API
//! - [`scheduler`]: keyed debouncing and stale-response gates

pub mod document;
pub mod markup;
pub mod panels;
pub mod providers;
pub mod scheduler;
pub mod studio;
pub mod visual_output;

pub use document::{Document, SharedDocument};
pub use studio::{ApiAvailability, Studio, StudioOptions, WorkspaceTab};
