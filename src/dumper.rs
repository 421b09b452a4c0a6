/*!
 * Streaming dump of file contents
 */

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use indicatif::ProgressBar;
use log::{debug, warn};

use crate::filter::Rules;
use crate::notebook::NotebookPolicy;
use crate::report::ExportStatistics;
use crate::utils::{
    is_dir_entry, is_notebook, is_walkable_dir, list_dir_sorted, read_text_lossy,
    relative_display,
};

/// Writes a `===path===` block for every admitted file under a root
pub struct ContentDumper<'a> {
    rules: &'a Rules,
    policy: NotebookPolicy,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
    statistics: ExportStatistics,
}

impl<'a> ContentDumper<'a> {
    pub fn new(rules: &'a Rules, policy: NotebookPolicy, progress: Arc<ProgressBar>) -> Self {
        Self {
            rules,
            policy,
            progress,
            statistics: ExportStatistics::default(),
        }
    }

    /// Statistics gathered so far
    pub fn statistics(&self) -> &ExportStatistics {
        &self.statistics
    }

    /// Consume the dumper, returning its statistics
    pub fn into_statistics(self) -> ExportStatistics {
        self.statistics
    }

    /// Walk `root` and write every admitted file; only write errors are returned
    pub fn dump<W: Write>(&mut self, root: &Path, out: &mut W) -> io::Result<()> {
        self.dump_dir(root, root, out)
    }

    /// Dump into an in-memory string
    pub fn dump_to_string(&mut self, root: &Path) -> io::Result<String> {
        let mut buffer = Vec::new();
        self.dump(root, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    fn dump_dir<W: Write>(&mut self, root: &Path, dir: &Path, out: &mut W) -> io::Result<()> {
        let entries = match list_dir_sorted(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Skipping directory {}: {}", dir.display(), e);
                return Ok(());
            }
        };
        self.statistics.directories_visited += 1;

        let rules = self.rules;
        let (dirs, files): (Vec<_>, Vec<_>) = entries.into_iter().partition(is_dir_entry);

        // Pruned directories are never descended into
        let subdirs: Vec<_> = dirs
            .into_iter()
            .filter(|entry| is_walkable_dir(entry) && rules.admits(entry.path()))
            .collect();

        for file in files.iter().filter(|entry| rules.admits(entry.path())) {
            self.write_file(root, file.path(), out)?;
        }

        for subdir in &subdirs {
            self.dump_dir(root, subdir.path(), out)?;
        }

        Ok(())
    }

    fn write_file<W: Write>(&mut self, root: &Path, path: &Path, out: &mut W) -> io::Result<()> {
        let rel_path = relative_display(path, root);
        self.progress.inc(1);
        self.progress.set_message(format!("Current file: {}", rel_path));

        let content = self.render_content(path);

        writeln!(out, "==={}===", rel_path)?;
        out.write_all(content.as_bytes())?;
        out.write_all(b"\n\n")?;

        self.statistics.record_file(rel_path, &content);
        Ok(())
    }

    fn render_content(&mut self, path: &Path) -> String {
        let text = match read_text_lossy(path) {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                self.statistics.unreadable_files += 1;
                return format!("[Non-text or unreadable content: {}]", e);
            }
        };

        if is_notebook(path) && self.policy != NotebookPolicy::Raw {
            debug!("Applying {:?} to {}", self.policy, path.display());
            self.statistics.notebooks_transformed += 1;
            return self.policy.apply(&text);
        }

        text
    }
}
