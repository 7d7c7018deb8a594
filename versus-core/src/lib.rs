//! # Versus Core
//!
//! Core library for the Versus product comparison tool.
//! Turns two product URLs into a structured, AI-generated comparison
//! through a request/parse/sanitize pipeline, governed by a four-state
//! session lifecycle with single-flight and cancellation guarantees.

pub mod client;
pub mod error;
pub mod parse;
pub mod pipeline;
pub mod prompt;
pub mod sanitize;
pub mod session;
pub mod types;

// Re-export commonly used types at the crate root.
pub use client::{AiClient, MockAiClient, PollinationsClient, REQUEST_TIMEOUT_SECS};
pub use error::{AiError, Result, SessionError, ValidationError, VersusError};
pub use pipeline::ComparisonPipeline;
pub use prompt::build_comparison_prompt;
pub use session::{
    NoOpObserver, RecordingObserver, RunOutcome, Session, SessionObserver, SessionState,
};
pub use types::{
    ComparisonRequest, ComparisonResult, ProductOverview, ProductPair, ProsCons, Recommendation,
    Winner,
};
