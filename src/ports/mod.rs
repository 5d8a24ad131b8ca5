//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `JitterSource` - Randomness for presentational jitter
//! - `EmotionSource` - External emotion feed
//! - `SessionStore` - Registry of live sessions
//! - `ReportExporter` - Report rendering

mod emotion_source;
mod jitter_source;
mod report_exporter;
mod session_store;

pub use emotion_source::EmotionSource;
pub use jitter_source::JitterSource;
pub use report_exporter::{ExportError, ExportFormat, ReportExporter};
pub use session_store::{SessionStore, SharedSession};
