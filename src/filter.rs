/*!
 * Inclusion decisions shared by the tree renderer and the content dumper
 */

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::trace;

use crate::matcher::PatternMatcher;

/// Decide whether `path` belongs in the export
///
/// Include patterns rescue paths from the ignore set: a path is kept when it
/// is explicitly included or simply not ignored.
pub fn should_include(
    path: &Path,
    ignore: Option<&dyn PatternMatcher>,
    include: Option<&dyn PatternMatcher>,
) -> bool {
    match (ignore, include) {
        (None, None) => true,
        (None, Some(include)) => include.matches(path),
        (Some(ignore), None) => !ignore.matches(path),
        (Some(ignore), Some(include)) => include.matches(path) || !ignore.matches(path),
    }
}

/// Absolute paths that never appear in the export
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    paths: HashSet<PathBuf>,
}

impl ExclusionSet {
    /// Build the set from the given paths; paths that do not exist are skipped
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let paths = paths
            .into_iter()
            .filter_map(|p| absolute(p.as_ref()))
            .collect();
        Self { paths }
    }

    /// Add a single path to the set
    pub fn insert(&mut self, path: &Path) {
        if let Some(abs) = absolute(path) {
            self.paths.insert(abs);
        }
    }

    /// Whether `path` refers to an excluded file
    pub fn contains(&self, path: &Path) -> bool {
        if self.paths.is_empty() {
            return false;
        }
        absolute(path).is_some_and(|abs| self.paths.contains(&abs))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

fn absolute(path: &Path) -> Option<PathBuf> {
    fs::canonicalize(path).ok()
}

/// The complete rule set for one export
pub struct Rules {
    ignore: Option<Box<dyn PatternMatcher>>,
    include: Option<Box<dyn PatternMatcher>>,
    exclusions: ExclusionSet,
}

impl Rules {
    pub fn new(
        ignore: Option<Box<dyn PatternMatcher>>,
        include: Option<Box<dyn PatternMatcher>>,
        exclusions: ExclusionSet,
    ) -> Self {
        Self {
            ignore,
            include,
            exclusions,
        }
    }

    /// Rules that admit every path
    pub fn permissive() -> Self {
        Self::new(None, None, ExclusionSet::default())
    }

    /// Apply the pattern rules only
    pub fn should_include(&self, path: &Path) -> bool {
        should_include(path, self.ignore.as_deref(), self.include.as_deref())
    }

    /// Whether `path` is in the hard exclusion set
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.exclusions.contains(path)
    }

    /// Whether `path` survives both the pattern rules and the exclusion set
    pub fn admits(&self, path: &Path) -> bool {
        let admitted = !self.is_excluded(path) && self.should_include(path);
        trace!("{} -> {}", path.display(), if admitted { "include" } else { "skip" });
        admitted
    }
}
