/*!
 * folder-export - Export a directory tree and its file contents as one text file
 *
 * The export has two sections: an ASCII tree of the admitted entries and the
 * contents of every admitted file, each under a `===path===` marker. Ignore
 * and include pattern files select what is admitted, and Jupyter notebooks can
 * be stripped of outputs or converted to commented pseudo-source.
 */

pub mod config;
pub mod dumper;
pub mod error;
pub mod exporter;
pub mod filter;
pub mod matcher;
pub mod notebook;
pub mod report;
pub mod tree;
pub mod utils;


// Re-export main components for easier access
pub use config::{Args, Config};
pub use dumper::ContentDumper;
pub use error::{ExportError, Result};
pub use exporter::Exporter;
pub use filter::{should_include, ExclusionSet, Rules};
pub use matcher::{load_patterns, GitignoreMatcher, PatternMatcher};
pub use notebook::{strip_outputs, to_pseudo_source, Cell, CellKind, Notebook, NotebookPolicy};
pub use report::{ExportReport, ExportStatistics, FileReportInfo, ReportFormat, Reporter};
pub use tree::TreeRenderer;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
