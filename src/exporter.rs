/*!
 * Export orchestration: rules, destination file, and the two output sections
 */

use std::fs::{self, File};
use std::path::Path;
use std::io::{self, BufWriter, Write};
use std::sync::Arc;
use std::time::Instant;

use indicatif::ProgressBar;
use log::{debug, info};

use crate::config::Config;
use crate::dumper::ContentDumper;
use crate::error::{OutputResultExt, Result};
use crate::filter::{ExclusionSet, Rules};
use crate::matcher::{load_patterns, PatternMatcher};
use crate::report::{ExportReport, ExportStatistics};
use crate::tree::TreeRenderer;

const SECTION_RULE: &str = "================";

/// An optional compiled rule set
pub type Matcher = Option<Box<dyn PatternMatcher>>;

/// Runs a complete export for one configuration
pub struct Exporter {
    config: Config,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl Exporter {
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        Self { config, progress }
    }

    /// Export the configured root into the output file
    ///
    /// Unreadable source files are rendered inline; only a missing root, an
    /// unreadable include file, or a failure to write the output abort the export.
    pub fn export(&self) -> Result<ExportReport> {
        let start_time = Instant::now();
        let output_path = &self.config.output_file;

        // Matchers and the walk share one absolute base
        let root = fs::canonicalize(&self.config.root_dir)?;
        let (ignore, include) = self.load_matchers(&root)?;

        let file = File::create(output_path).output_context(output_path)?;
        debug!("Opened output file {}", output_path.display());

        // Built after the output exists so it can be excluded from its own listing
        let rules = Rules::new(ignore, include, self.exclusion_set());

        let mut out = BufWriter::new(file);
        let statistics = self
            .write_sections(&root, &rules, &mut out)
            .and_then(|stats| out.flush().map(|_| stats))
            .output_context(output_path)?;
        drop(out);
        debug!("Closed output file {}", output_path.display());

        info!(
            "Exported {} files from {} to {}",
            statistics.files_written,
            self.config.root_dir.display(),
            output_path.display()
        );

        Ok(ExportReport {
            output_file: output_path.clone(),
            duration: start_time.elapsed(),
            statistics,
        })
    }

    /// Compile the ignore and include matchers
    ///
    /// A configured ignore file that does not exist yields no ignore rules.
    pub fn load_matchers(&self, root: &Path) -> Result<(Matcher, Matcher)> {
        let ignore: Matcher = match &self.config.ignore_file {
            Some(path) if path.is_file() => Some(Box::new(load_patterns(path, root)?)),
            Some(path) => {
                debug!("Ignore file {} not found, ignoring nothing", path.display());
                None
            }
            None => None,
        };

        let include: Matcher = match &self.config.include_file {
            Some(path) => Some(Box::new(load_patterns(path, root)?)),
            None => None,
        };

        Ok((ignore, include))
    }

    /// Paths that must never describe themselves in the export
    pub fn exclusion_set(&self) -> ExclusionSet {
        let mut exclusions = ExclusionSet::default();
        for path in [&self.config.ignore_file, &self.config.include_file]
            .into_iter()
            .flatten()
        {
            exclusions.insert(path);
        }
        exclusions.insert(&self.config.output_file);
        exclusions
    }

    fn write_sections<W: Write>(
        &self,
        root: &Path,
        rules: &Rules,
        out: &mut W,
    ) -> io::Result<ExportStatistics> {
        write_header(out, "DIRECTORY STRUCTURE")?;
        TreeRenderer::new(rules).render(root, out)?;
        writeln!(out)?;

        write_header(out, "FILE CONTENTS")?;
        let mut dumper = ContentDumper::new(
            rules,
            self.config.notebook_policy,
            Arc::clone(&self.progress),
        );
        dumper.dump(root, out)?;

        Ok(dumper.into_statistics())
    }
}

fn write_header<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "{SECTION_RULE}\n{title}\n{SECTION_RULE}\n")
}
