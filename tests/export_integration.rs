/*!
 * End-to-end tests for the export pipeline
 */

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use tempfile::{tempdir, TempDir};

use folder_export::{Config, ExportError, Exporter, NotebookPolicy};

fn write_file(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())
}

// Project with one file to keep, one to ignore, and both pattern files
fn setup_project() -> io::Result<TempDir> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    write_file(&root.join("include_me.txt"), "This file should be included.")?;
    write_file(&root.join("ignore_me.txt"), "This file should be ignored.")?;
    write_file(&root.join(".gitignore"), "ignore_me.txt\n")?;
    write_file(&root.join("include_patterns.txt"), "include_me.txt\n")?;
    Ok(temp_dir)
}

fn run_export(config: Config) -> folder_export::Result<String> {
    let output_file = config.output_file.clone();
    Exporter::new(config, Arc::new(ProgressBar::hidden())).export()?;
    Ok(fs::read_to_string(output_file)?)
}

fn output_path(dir: &TempDir) -> PathBuf {
    dir.path().join("output.txt")
}

#[test]
fn test_full_export_layout() -> io::Result<()> {
    let project = tempdir()?;
    let out_dir = tempdir()?;
    write_file(&project.path().join("a.txt"), "hello")?;

    let content = run_export(Config::new(project.path(), output_path(&out_dir))).unwrap();
    assert_eq!(
        content,
        "================\nDIRECTORY STRUCTURE\n================\n\n\
         └── a.txt\n\n\
         ================\nFILE CONTENTS\n================\n\n\
         ===a.txt===\nhello\n\n"
    );

    Ok(())
}

#[test]
fn test_ignored_file_absent_everywhere() -> io::Result<()> {
    let project = tempdir()?;
    let out_dir = tempdir()?;
    let root = project.path();
    write_file(&root.join("keep.txt"), "hi")?;
    write_file(&root.join("skip.txt"), "secret")?;
    write_file(&root.join(".gitignore"), "skip.txt\n")?;

    let mut config = Config::new(root, output_path(&out_dir));
    config.ignore_file = Some(root.join(".gitignore"));

    let content = run_export(config).unwrap();
    assert!(content.contains("===keep.txt===\nhi"));
    assert!(!content.contains("skip.txt"));
    assert!(!content.contains("secret"));
    // The ignore file never describes itself
    assert!(!content.contains(".gitignore"));

    Ok(())
}

#[test]
fn test_only_include_file() -> io::Result<()> {
    let project = setup_project()?;
    let out_dir = tempdir()?;

    let mut config = Config::new(project.path(), output_path(&out_dir));
    config.include_file = Some(project.path().join("include_patterns.txt"));

    let content = run_export(config).unwrap();
    assert!(content.contains("===include_me.txt===\nThis file should be included."));
    assert!(!content.contains("ignore_me.txt"));
    assert!(!content.contains("include_patterns.txt"));

    Ok(())
}

#[test]
fn test_only_ignore_file() -> io::Result<()> {
    let project = setup_project()?;
    let out_dir = tempdir()?;

    let mut config = Config::new(project.path(), output_path(&out_dir));
    config.ignore_file = Some(project.path().join(".gitignore"));

    let content = run_export(config).unwrap();
    assert!(content.contains("include_me.txt"));
    assert!(!content.contains("ignore_me.txt"));

    Ok(())
}

#[test]
fn test_both_include_and_ignore_files() -> io::Result<()> {
    let project = setup_project()?;
    let out_dir = tempdir()?;

    let mut config = Config::new(project.path(), output_path(&out_dir));
    config.ignore_file = Some(project.path().join(".gitignore"));
    config.include_file = Some(project.path().join("include_patterns.txt"));

    let content = run_export(config).unwrap();
    assert!(content.contains("include_me.txt"));
    assert!(!content.contains("ignore_me.txt"));

    Ok(())
}

#[test]
fn test_include_rescues_ignored_file() -> io::Result<()> {
    let project = tempdir()?;
    let out_dir = tempdir()?;
    let root = project.path();
    write_file(&root.join("app.log"), "rescued")?;
    write_file(&root.join("debug.log"), "dropped")?;
    write_file(&root.join("main.rs"), "fn main() {}")?;

    let rules_dir = tempdir()?;
    let ignore = rules_dir.path().join("ignore.txt");
    let include = rules_dir.path().join("include.txt");
    write_file(&ignore, "*.log\n")?;
    write_file(&include, "app.log\n")?;

    let mut config = Config::new(root, output_path(&out_dir));
    config.ignore_file = Some(ignore);
    config.include_file = Some(include);

    let content = run_export(config).unwrap();
    assert!(content.contains("===app.log===\nrescued"));
    assert!(content.contains("===main.rs===\nfn main() {}"));
    assert!(!content.contains("debug.log"));

    Ok(())
}

#[test]
fn test_missing_ignore_file_means_no_rules() -> io::Result<()> {
    let project = tempdir()?;
    let out_dir = tempdir()?;
    write_file(&project.path().join("a.txt"), "A")?;

    let mut config = Config::new(project.path(), output_path(&out_dir));
    config.ignore_file = Some(project.path().join("does-not-exist"));

    let content = run_export(config).unwrap();
    assert!(content.contains("===a.txt===\nA\n\n"));

    Ok(())
}

#[test]
fn test_missing_include_file_is_an_error() -> io::Result<()> {
    let project = tempdir()?;
    let out_dir = tempdir()?;

    let mut config = Config::new(project.path(), output_path(&out_dir));
    config.include_file = Some(project.path().join("does-not-exist"));

    let result = Exporter::new(config, Arc::new(ProgressBar::hidden())).export();
    assert!(matches!(result, Err(ExportError::PatternSource { .. })));
    assert!(!output_path(&out_dir).exists());

    Ok(())
}

#[test]
fn test_missing_root_is_an_io_error() -> io::Result<()> {
    let out_dir = tempdir()?;
    let config = Config::new(out_dir.path().join("no-such-root"), output_path(&out_dir));

    let result = Exporter::new(config, Arc::new(ProgressBar::hidden())).export();
    assert!(matches!(result, Err(ExportError::Io(_))));
    assert!(!output_path(&out_dir).exists());

    Ok(())
}

#[test]
fn test_unwritable_output_is_fatal() -> io::Result<()> {
    let project = tempdir()?;
    let config = Config::new(project.path(), project.path().join("missing").join("out.txt"));

    let result = Exporter::new(config, Arc::new(ProgressBar::hidden())).export();
    assert!(matches!(result, Err(ExportError::Output { .. })));

    Ok(())
}

#[test]
fn test_output_inside_root_is_not_exported() -> io::Result<()> {
    let project = tempdir()?;
    write_file(&project.path().join("a.txt"), "A")?;

    let content = run_export(Config::new(
        project.path(),
        project.path().join("output.txt"),
    ))
    .unwrap();
    assert_eq!(content.matches("a.txt").count(), 2);
    assert!(!content.contains("output.txt"));

    Ok(())
}

#[test]
fn test_ignored_directory_is_pruned() -> io::Result<()> {
    let project = tempdir()?;
    let out_dir = tempdir()?;
    let root = project.path();
    write_file(&root.join("src").join("lib.rs"), "pub fn f() {}")?;
    write_file(&root.join("node_modules").join("pkg").join("index.js"), "module")?;
    write_file(&root.join(".gitignore"), "node_modules/\n")?;

    let mut config = Config::new(root, output_path(&out_dir));
    config.ignore_file = Some(root.join(".gitignore"));

    let content = run_export(config).unwrap();
    assert!(!content.contains("node_modules"));
    assert!(!content.contains("index.js"));
    assert!(content.contains("└── src\n    └── lib.rs\n"));

    Ok(())
}

#[test]
fn test_notebook_exported_as_pseudo_source() -> io::Result<()> {
    let project = tempdir()?;
    let out_dir = tempdir()?;
    let notebook = r##"{
 "cells": [
  {"cell_type": "markdown", "metadata": {}, "source": ["# Title"]},
  {"cell_type": "code", "execution_count": 1, "metadata": {},
   "outputs": [{"output_type": "stream", "name": "stdout", "text": ["done\n"]}],
   "source": ["x = 1"]}
 ],
 "metadata": {},
 "nbformat": 4,
 "nbformat_minor": 5
}"##;
    write_file(&project.path().join("nb.ipynb"), notebook)?;

    let mut config = Config::new(project.path(), output_path(&out_dir));
    config.notebook_policy = NotebookPolicy::from_flags(true, true);

    let content = run_export(config).unwrap();
    assert!(content.contains("===nb.ipynb===\n# Markdown Cell\n# # Title\n"));
    assert!(content.contains("\nx = 1\n"));
    assert!(!content.contains("done"));

    Ok(())
}

#[test]
fn test_config_validation() -> io::Result<()> {
    let project = tempdir()?;

    assert!(Config::new(project.path(), project.path().join("out.txt"))
        .validate()
        .is_ok());
    assert!(matches!(
        Config::new(project.path().join("nope"), "out.txt").validate(),
        Err(ExportError::PathNotFound(_))
    ));
    assert!(matches!(
        Config::new(project.path(), project.path().join("nope").join("out.txt")).validate(),
        Err(ExportError::PathNotFound(_))
    ));
    assert!(matches!(
        Config::new(project.path(), project.path()).validate(),
        Err(ExportError::InvalidArgument(_))
    ));

    Ok(())
}
