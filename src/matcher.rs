/*!
 * Pattern matching for ignore and include rules
 *
 * The export pipeline only ever asks one question of a rule set: does this
 * path match? [`PatternMatcher`] captures that, and [`GitignoreMatcher`]
 * answers it with gitignore semantics from the `ignore` crate.
 */

use std::fs;
use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use log::{debug, info, warn};

use crate::error::{ExportError, Result};

/// A compiled set of path patterns
pub trait PatternMatcher {
    /// Whether `path` is matched by any pattern in the set
    fn matches(&self, path: &Path) -> bool;
}

/// Gitignore-style matcher anchored at the export root
#[derive(Debug)]
pub struct GitignoreMatcher {
    root: PathBuf,
    gitignore: Gitignore,
}

impl GitignoreMatcher {
    /// Compile a matcher from individual pattern lines
    pub fn from_lines<I, S>(root: &Path, source: Option<&Path>, lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        // Walked paths are compared component-wise against this absolute root
        let root = fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
        let mut builder = GitignoreBuilder::new(&root);
        for line in lines {
            let line = line.as_ref();
            if let Err(e) = builder.add_line(source.map(Path::to_path_buf), line) {
                warn!("Skipping invalid pattern {:?}: {}", line, e);
            }
        }

        let gitignore = builder
            .build()
            .map_err(|source_err| ExportError::PatternSource {
                path: source.map(Path::to_path_buf).unwrap_or_default(),
                source: source_err,
            })?;

        debug!(
            "Compiled {} ignore and {} whitelist patterns",
            gitignore.num_ignores(),
            gitignore.num_whitelists()
        );

        Ok(Self { root, gitignore })
    }

    /// Number of patterns in the set
    pub fn len(&self) -> usize {
        self.gitignore.len()
    }

    /// Whether the set has no patterns at all
    pub fn is_empty(&self) -> bool {
        self.gitignore.is_empty()
    }

    /// `path` relative to the matcher root, if it lies strictly below it
    fn relative_to_root(&self, path: &Path) -> Option<PathBuf> {
        let below = |p: &Path| {
            p.strip_prefix(&self.root)
                .ok()
                .filter(|rel| !rel.as_os_str().is_empty())
                .map(Path::to_path_buf)
        };
        below(path).or_else(|| fs::canonicalize(path).ok().and_then(|abs| below(&abs)))
    }
}

impl PatternMatcher for GitignoreMatcher {
    fn matches(&self, path: &Path) -> bool {
        let is_dir = path.is_dir();
        match self.relative_to_root(path) {
            // Relative paths let a pattern on a parent directory cover its children
            Some(rel) => self
                .gitignore
                .matched_path_or_any_parents(&rel, is_dir)
                .is_ignore(),
            None => self.gitignore.matched(path, is_dir).is_ignore(),
        }
    }
}

/// Load a newline-separated pattern file into a matcher anchored at `root`
pub fn load_patterns(path: &Path, root: &Path) -> Result<GitignoreMatcher> {
    let text = fs::read_to_string(path).map_err(|e| ExportError::PatternSource {
        path: path.to_path_buf(),
        source: e.into(),
    })?;

    let matcher = GitignoreMatcher::from_lines(root, Some(path), text.lines())?;
    info!(
        "Loaded {} patterns from {}",
        matcher.len(),
        path.display()
    );

    Ok(matcher)
}
