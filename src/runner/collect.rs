use std::fs;
use std::io;
use std::path::Path;

use log::{debug, info, warn};
use serde_json::Value;

use crate::error::Result;
use crate::RunDirectory;

/// Relocate the files named by an output manifest into the run directory.
///
/// Manifest entries are heterogeneous: a scalar path, a flat list of paths,
/// or a nested list of paths (scatter results). A missing source file is
/// logged and skipped; it never aborts the collection of the remaining
/// outputs.
pub fn collect_outputs(
    outputs: &serde_json::Map<String, Value>,
    run_dir: &RunDirectory,
    move_outputs: bool,
) -> Result<()> {
    for (name, entry) in outputs {
        debug!("Collecting output {name}");
        for file in flatten_entry(entry) {
            let source = Path::new(&file);
            if !source.exists() {
                warn!("File not found: {file}");
                continue;
            }

            let file_name = match source.file_name() {
                Some(file_name) => file_name,
                None => continue,
            };
            let destination = run_dir.path.join(file_name);
            info!("Collecting file {file}");
            if move_outputs {
                move_file(source, &destination)?;
            } else {
                fs::copy(source, &destination)?;
            }
        }
    }
    Ok(())
}

/// Flatten one manifest entry into file paths.
///
/// A string is one file; a list containing any nested list is flattened one
/// level (scatter-gather fan-out produces per-shard lists); any other list
/// is taken as a flat list of files. Non-string leaves are not files and
/// are dropped.
pub fn flatten_entry(entry: &Value) -> Vec<String> {
    match entry {
        Value::String(path) => vec![path.clone()],
        Value::Array(items) if items.iter().any(Value::is_array) => items
            .iter()
            .flat_map(|item| match item {
                Value::Array(inner) => inner.iter().filter_map(as_path).collect::<Vec<_>>(),
                other => as_path(other).into_iter().collect(),
            })
            .collect(),
        Value::Array(items) => items.iter().filter_map(as_path).collect(),
        _ => Vec::new(),
    }
}

fn as_path(value: &Value) -> Option<String> {
    value.as_str().map(str::to_owned)
}

/// Rename where possible; fall back to copy-and-delete across filesystems.
fn move_file(source: &Path, destination: &Path) -> io::Result<()> {
    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(source, destination)?;
            fs::remove_file(source)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn scalar_entry_is_one_file() {
        assert_eq!(flatten_entry(&json!("a.txt")), ["a.txt"]);
    }

    #[test]
    fn flat_list_is_kept_as_is() {
        assert_eq!(flatten_entry(&json!(["a.txt"])), ["a.txt"]);
    }

    #[test]
    fn nested_lists_are_flattened_one_level() {
        assert_eq!(
            flatten_entry(&json!([["a.txt", "b.txt"], ["c.txt"]])),
            ["a.txt", "b.txt", "c.txt"]
        );
    }

    #[test]
    fn mixed_nesting_keeps_scalars() {
        assert_eq!(
            flatten_entry(&json!(["x.txt", ["a.txt"]])),
            ["x.txt", "a.txt"]
        );
    }

    #[test]
    fn non_path_entries_yield_nothing() {
        assert!(flatten_entry(&json!(42)).is_empty());
        assert!(flatten_entry(&json!(null)).is_empty());
    }

    #[test]
    fn outputs_are_copied_by_default() {
        let source_dir = tempdir().unwrap();
        let vcf = source_dir.path().join("cohort.vcf.gz");
        fs::write(&vcf, b"variants").unwrap();

        let dest = tempdir().unwrap();
        let run_dir = RunDirectory::create(dest.path()).unwrap();

        let mut outputs = serde_json::Map::new();
        outputs.insert(
            "JointGenotyping.output_vcf".to_string(),
            json!(vcf.to_str().unwrap()),
        );

        collect_outputs(&outputs, &run_dir, false).unwrap();
        assert!(run_dir.path.join("cohort.vcf.gz").exists());
        assert!(vcf.exists(), "copy must preserve the source");
    }

    #[test]
    fn move_removes_the_source() {
        let source_dir = tempdir().unwrap();
        let vcf = source_dir.path().join("cohort.vcf.gz");
        fs::write(&vcf, b"variants").unwrap();

        let dest = tempdir().unwrap();
        let run_dir = RunDirectory::create(dest.path()).unwrap();

        let mut outputs = serde_json::Map::new();
        outputs.insert("out".to_string(), json!([vcf.to_str().unwrap()]));

        collect_outputs(&outputs, &run_dir, true).unwrap();
        assert!(run_dir.path.join("cohort.vcf.gz").exists());
        assert!(!vcf.exists());
    }

    #[test]
    fn missing_files_never_abort_collection() {
        let source_dir = tempdir().unwrap();
        let present = source_dir.path().join("present.txt");
        fs::write(&present, b"ok").unwrap();

        let dest = tempdir().unwrap();
        let run_dir = RunDirectory::create(dest.path()).unwrap();

        let mut outputs = serde_json::Map::new();
        outputs.insert(
            "wf.files".to_string(),
            json!(["/no/such/file.txt", present.to_str().unwrap()]),
        );

        collect_outputs(&outputs, &run_dir, false).unwrap();
        assert!(run_dir.path.join("present.txt").exists());
    }
}
