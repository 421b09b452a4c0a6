/*!
 * ASCII tree rendering of the exported directory structure
 */

use std::io::{self, Write};
use std::path::Path;

use log::warn;

use crate::filter::Rules;
use crate::utils::{file_name_lossy, is_walkable_dir, list_dir_sorted};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Renders the admitted entries under a root as a `tree`-style listing
pub struct TreeRenderer<'a> {
    rules: &'a Rules,
}

impl<'a> TreeRenderer<'a> {
    pub fn new(rules: &'a Rules) -> Self {
        Self { rules }
    }

    /// Write one line per admitted entry below `root`; the root itself is not listed
    pub fn render<W: Write>(&self, root: &Path, out: &mut W) -> io::Result<()> {
        self.render_dir(root, "", out)
    }

    /// Render into an in-memory string
    pub fn render_to_string(&self, root: &Path) -> io::Result<String> {
        let mut buffer = Vec::new();
        self.render(root, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    fn render_dir<W: Write>(&self, dir: &Path, prefix: &str, out: &mut W) -> io::Result<()> {
        let entries = match list_dir_sorted(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                writeln!(out, "{prefix}{LAST_BRANCH}[Permission Denied]")?;
                return Ok(());
            }
            Err(e) => {
                warn!("Failed to list {}: {}", dir.display(), e);
                return Ok(());
            }
        };

        let entries: Vec<_> = entries
            .into_iter()
            .filter(|entry| self.rules.admits(entry.path()))
            .collect();

        for (i, entry) in entries.iter().enumerate() {
            let is_last = i + 1 == entries.len();
            let connector = if is_last { LAST_BRANCH } else { BRANCH };
            writeln!(out, "{prefix}{connector}{}", file_name_lossy(entry.path()))?;

            // Symlinked directories are listed but not followed, which rules out cycles
            if is_walkable_dir(entry) {
                let extension = if is_last { SPACE } else { PIPE };
                self.render_dir(entry.path(), &format!("{prefix}{extension}"), out)?;
            }
        }

        Ok(())
    }
}
