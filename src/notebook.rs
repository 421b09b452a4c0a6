/*!
 * Jupyter notebook transformations
 *
 * Notebooks are exported either as-is, with their cached outputs stripped, or
 * linearized into a commented pseudo-source listing. Text that does not parse
 * as a notebook is always passed through untouched.
 */

use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};

/// File extension that marks a notebook
pub const NOTEBOOK_EXTENSION: &str = "ipynb";

/// How notebook files are rendered in the export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotebookPolicy {
    /// Emit the file exactly as read
    Raw,
    /// Clear outputs and execution counts of code cells
    #[default]
    StripOutputs,
    /// Strip outputs, then linearize cells into pseudo-source
    PseudoSource,
}

impl NotebookPolicy {
    /// Resolve the policy from the command-line flags
    ///
    /// Pseudo-source export always strips outputs, whatever `include_outputs` says.
    pub fn from_flags(export_as_source: bool, include_outputs: bool) -> Self {
        match (export_as_source, include_outputs) {
            (true, _) => Self::PseudoSource,
            (false, false) => Self::StripOutputs,
            (false, true) => Self::Raw,
        }
    }

    /// Transform notebook text according to this policy
    pub fn apply(&self, raw: &str) -> String {
        match self {
            Self::Raw => raw.to_string(),
            Self::StripOutputs => strip_outputs(raw),
            Self::PseudoSource => to_pseudo_source(&strip_outputs(raw)),
        }
    }
}

/// Kind of a notebook cell as recorded in its `cell_type` field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellKind {
    Code,
    Markdown,
    Other(String),
}

impl CellKind {
    pub fn from_type(cell_type: &str) -> Self {
        match cell_type {
            "code" => Self::Code,
            "markdown" => Self::Markdown,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Cell source, normalized to individual lines without terminators
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawSource")]
pub struct Source(pub Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSource {
    Text(String),
    Lines(Vec<String>),
}

impl Default for RawSource {
    fn default() -> Self {
        Self::Lines(Vec::new())
    }
}

impl From<RawSource> for Source {
    fn from(raw: RawSource) -> Self {
        let joined = match raw {
            RawSource::Text(text) => text,
            RawSource::Lines(lines) => lines.concat(),
        };
        // Only `\n` terminates a line; a `\r` before it stays part of the line
        Self(joined.split_terminator('\n').map(str::to_string).collect())
    }
}

impl Source {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// A single notebook cell
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawCell")]
pub enum Cell {
    Code {
        source: Source,
        outputs: Vec<Value>,
        execution_count: Option<i64>,
    },
    Markdown {
        source: Source,
    },
    Other {
        kind: String,
        source: Source,
    },
}

#[derive(Deserialize)]
struct RawCell {
    cell_type: String,
    #[serde(default)]
    source: RawSource,
    #[serde(default)]
    outputs: Vec<Value>,
    #[serde(default)]
    execution_count: Option<i64>,
}

impl From<RawCell> for Cell {
    fn from(raw: RawCell) -> Self {
        let source = Source::from(raw.source);
        match CellKind::from_type(&raw.cell_type) {
            CellKind::Code => Cell::Code {
                source,
                outputs: raw.outputs,
                execution_count: raw.execution_count,
            },
            CellKind::Markdown => Cell::Markdown { source },
            CellKind::Other(kind) => Cell::Other { kind, source },
        }
    }
}

impl Cell {
    pub fn kind(&self) -> CellKind {
        match self {
            Cell::Code { .. } => CellKind::Code,
            Cell::Markdown { .. } => CellKind::Markdown,
            Cell::Other { kind, .. } => CellKind::Other(kind.clone()),
        }
    }

    pub fn source(&self) -> &Source {
        match self {
            Cell::Code { source, .. } | Cell::Markdown { source } | Cell::Other { source, .. } => {
                source
            }
        }
    }

    /// Append this cell's pseudo-source rendering to `out`
    fn write_pseudo_source(&self, out: &mut String) {
        match self {
            Cell::Code { source, .. } => {
                out.push_str("# Code Cell\n");
                for line in source.lines() {
                    out.push_str(line);
                    out.push('\n');
                }
            }
            Cell::Markdown { source } => {
                out.push_str("# Markdown Cell\n");
                push_commented(out, source);
            }
            Cell::Other { kind, source } => {
                out.push_str(&format!("# {} Cell (Unsupported)\n", capitalize(kind)));
                push_commented(out, source);
            }
        }
        out.push('\n');
    }
}

fn push_commented(out: &mut String, source: &Source) {
    for line in source.lines() {
        out.push_str("# ");
        out.push_str(line);
        out.push('\n');
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Parsed notebook document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Notebook {
    #[serde(default)]
    pub cells: Vec<Cell>,
    /// Top-level fields other than `cells`, kept verbatim
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl Notebook {
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Linearize all cells into pseudo-source
    pub fn to_pseudo_source(&self) -> String {
        let mut out = String::new();
        for cell in &self.cells {
            cell.write_pseudo_source(&mut out);
        }
        out
    }
}

/// Clear outputs and execution counts from every code cell
///
/// Returns `raw` unchanged if it is not a JSON object.
pub fn strip_outputs(raw: &str) -> String {
    let mut document: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            debug!("Notebook is not valid JSON, leaving as-is: {}", e);
            return raw.to_string();
        }
    };

    let Some(root) = document.as_object_mut() else {
        debug!("Notebook root is not an object, leaving as-is");
        return raw.to_string();
    };

    if let Some(cells) = root.get_mut("cells").and_then(Value::as_array_mut) {
        for cell in cells.iter_mut().filter_map(Value::as_object_mut) {
            let is_code = cell
                .get("cell_type")
                .and_then(Value::as_str)
                .map(CellKind::from_type)
                == Some(CellKind::Code);
            if is_code {
                cell.insert("outputs".to_string(), Value::Array(Vec::new()));
                cell.insert("execution_count".to_string(), Value::Null);
            }
        }
    }

    serde_json::to_string_pretty(&document).unwrap_or_else(|_| raw.to_string())
}

/// Render an (already stripped) notebook as commented pseudo-source
///
/// Returns `stripped` unchanged if it does not parse as a notebook.
pub fn to_pseudo_source(stripped: &str) -> String {
    match Notebook::parse(stripped) {
        Ok(notebook) => notebook.to_pseudo_source(),
        Err(e) => {
            debug!("Notebook could not be parsed, leaving as-is: {}", e);
            stripped.to_string()
        }
    }
}
