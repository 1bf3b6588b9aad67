//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate a project" or "validate a request".

pub mod generation_service;

pub use generation_service::{GenerationReport, GenerationService};
