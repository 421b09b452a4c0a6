/*!
 * Reporting functionality for folder-export
 *
 * Summarizes an export using the tabled library for consistent table
 * rendering.
 */

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::utils::format_number;

/// Information about a file written to the export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReportInfo {
    /// Number of lines written
    pub lines: usize,
    /// Number of characters written
    pub chars: usize,
}

/// Counters accumulated while dumping file contents
#[derive(Debug, Clone, Default)]
pub struct ExportStatistics {
    /// Directories walked by the content dump
    pub directories_visited: usize,
    /// Files whose block was written
    pub files_written: usize,
    /// Notebooks rewritten by the notebook policy
    pub notebooks_transformed: usize,
    /// Files replaced by an unreadable-content placeholder
    pub unreadable_files: usize,
    /// Total number of lines
    pub total_lines: usize,
    /// Total number of characters
    pub total_chars: usize,
    /// Details for each file, keyed by path relative to the root
    pub file_details: HashMap<String, FileReportInfo>,
}

impl ExportStatistics {
    /// Record a written file block
    pub fn record_file(&mut self, rel_path: String, content: &str) {
        let info = FileReportInfo {
            lines: content.lines().count(),
            chars: content.chars().count(),
        };
        self.files_written += 1;
        self.total_lines += info.lines;
        self.total_chars += info.chars;
        self.file_details.insert(rel_path, info);
    }
}

/// Outcome of a completed export
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Output file path
    pub output_file: PathBuf,
    /// Time taken by the export
    pub duration: Duration,
    /// Content dump counters
    pub statistics: ExportStatistics,
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for export results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate a report string for an export
    pub fn generate_report(&self, report: &ExportReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &ExportReport) {
        println!("\n{}", self.generate_report(report));
    }

    // Keep the tail of long paths, which carries the file name
    fn format_path(&self, path: &str, max_len: usize) -> String {
        if path.chars().count() <= max_len {
            return path.to_string();
        }

        let tail: String = {
            let chars: Vec<char> = path.chars().collect();
            chars[chars.len() - (max_len - 3)..].iter().collect()
        };
        format!("...{}", tail)
    }

    fn create_summary_table(&self, report: &ExportReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let stats = &report.statistics;
        let mut rows = vec![
            SummaryRow {
                key: "📂 Output File".to_string(),
                value: report.output_file.display().to_string(),
            },
            SummaryRow {
                key: "⏱️ Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "📁 Directories".to_string(),
                value: format_number(stats.directories_visited),
            },
            SummaryRow {
                key: "📄 Files Exported".to_string(),
                value: format_number(stats.files_written),
            },
            SummaryRow {
                key: "📝 Total Lines".to_string(),
                value: format_number(stats.total_lines),
            },
            SummaryRow {
                key: "🔤 Total Characters".to_string(),
                value: format_number(stats.total_chars),
            },
        ];

        if stats.notebooks_transformed > 0 {
            rows.push(SummaryRow {
                key: "📓 Notebooks Transformed".to_string(),
                value: format_number(stats.notebooks_transformed),
            });
        }

        if stats.unreadable_files > 0 {
            rows.push(SummaryRow {
                key: "⚠️ Unreadable Files".to_string(),
                value: format_number(stats.unreadable_files),
            });
        }

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn create_files_table(&self, report: &ExportReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Chars")]
            chars: String,
        }

        let details = &report.statistics.file_details;
        let mut files: Vec<_> = details.iter().collect();
        files.sort_by(|(pa, a), (pb, b)| b.chars.cmp(&a.chars).then_with(|| pa.cmp(pb)));

        let files_to_show = if details.len() > 15 {
            &files[0..10]
        } else {
            &files[..]
        };

        let rows: Vec<FileRow> = files_to_show
            .iter()
            .map(|(path, info)| FileRow {
                path: self.format_path(path, 60),
                lines: format_number(info.lines),
                chars: format_number(info.chars),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn generate_console_report(&self, report: &ExportReport) -> String {
        let summary_table = self.create_summary_table(report);
        let files_table = self.create_files_table(report);

        let summary_title = "✅  EXPORT COMPLETE";
        let files_title = if report.statistics.file_details.len() > 15 {
            "📋  TOP 10 LARGEST FILES BY CHARACTER COUNT  📋"
        } else {
            "📋  EXPORTED FILES"
        };

        format!(
            "{}\n{}\n\n{}\n{}",
            files_title, files_table, summary_title, summary_table
        )
    }
}
