//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `polyforge-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TemplateStore`: Template storage/retrieval
//!   - `TemplateRenderer`: Template rendering
//!
//! - **Driving (Input) Ports**: `GenerationService`, called by the CLI
//!
//! `GenerationPorts` bundles the driven ports for one generation run.

mod generation;
pub mod output;

pub use generation::GenerationPorts;
pub use output::{Filesystem, TemplateRenderer, TemplateStore};
