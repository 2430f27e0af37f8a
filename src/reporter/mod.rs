//! Reporter module for output formatting

pub mod console;
pub mod html;

pub use console::ConsoleReporter;
pub use html::{HtmlReporter, Report, ReportMeta};
