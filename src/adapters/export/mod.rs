//! Report export adapters.

mod file_writer;
mod json_exporter;
mod markdown_exporter;

pub use file_writer::ReportFileWriter;
pub use json_exporter::JsonReportExporter;
pub use markdown_exporter::MarkdownReportExporter;
