//! Adapters - Implementations of port interfaces.
//!
//! - `jitter` - Seeded and constant randomness
//! - `emotion` - Scripted and simulated emotion feeds
//! - `session` - In-memory session store
//! - `export` - JSON and Markdown report exporters, file writer

pub mod emotion;
pub mod export;
pub mod jitter;
pub mod session;

pub use emotion::{ScriptedEmotionSource, SimulatedEmotionSource};
pub use export::{JsonReportExporter, MarkdownReportExporter, ReportFileWriter};
pub use jitter::{FixedJitter, RngJitter};
pub use session::InMemorySessionStore;
