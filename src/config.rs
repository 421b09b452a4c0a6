/*!
 * Configuration handling for folder-export
 */

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::ensure;
use crate::error::Result;
use crate::notebook::NotebookPolicy;

/// Command-line arguments for folder-export
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "folder-export",
    version = env!("CARGO_PKG_VERSION"),
    about = "Export folder contents into a single text file",
    long_about = "Writes the directory structure of a folder followed by the contents of every file into one text file, honoring ignore and include pattern files."
)]
pub struct Args {
    /// Root directory to start exporting from
    #[clap(long, default_value = ".")]
    pub root_dir: String,

    /// Output file name
    #[clap(long, default_value = "output.txt")]
    pub output_file: String,

    /// Ignore file pattern list
    #[clap(long, default_value = ".gitignore")]
    pub ignore_file: String,

    /// Include file pattern list; matching paths are kept even if ignored
    #[clap(long)]
    pub include_file: Option<String>,

    /// Include output cells in Jupyter notebooks (ignored if --export-nb-as-py is used)
    #[clap(long)]
    pub include_nb_outputs: bool,

    /// Convert Jupyter notebooks to .py format, excluding all output cells
    #[clap(long)]
    pub export_nb_as_py: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress logging and the summary report
    #[clap(short, long)]
    pub quiet: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Export configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory to export
    pub root_dir: PathBuf,

    /// Destination text file
    pub output_file: PathBuf,

    /// Ignore pattern file; a missing file means no ignore rules
    pub ignore_file: Option<PathBuf>,

    /// Include pattern file
    pub include_file: Option<PathBuf>,

    /// How notebook files are rendered
    pub notebook_policy: NotebookPolicy,
}

impl Config {
    /// Configuration with no pattern files and the default notebook policy
    pub fn new(root_dir: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            output_file: output_file.into(),
            ignore_file: None,
            include_file: None,
            notebook_policy: NotebookPolicy::default(),
        }
    }

    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            root_dir: PathBuf::from(args.root_dir),
            output_file: PathBuf::from(args.output_file),
            ignore_file: Some(PathBuf::from(args.ignore_file)),
            include_file: args.include_file.map(PathBuf::from),
            notebook_policy: NotebookPolicy::from_flags(
                args.export_nb_as_py,
                args.include_nb_outputs,
            ),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.root_dir.is_dir(),
            PathNotFound,
            "Root directory not found: {}",
            self.root_dir.display()
        );

        if let Some(parent) = self.output_file.parent() {
            ensure!(
                parent.as_os_str().is_empty() || parent.is_dir(),
                PathNotFound,
                "Output directory not found: {}",
                parent.display()
            );
        }

        ensure!(
            !self.output_file.is_dir(),
            InvalidArgument,
            "Output file is a directory: {}",
            self.output_file.display()
        );

        Ok(())
    }
}
