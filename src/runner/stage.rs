use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use log::info;
use zip::write::FileOptions;
use zip::ZipWriter;

use crate::catalog::{GenomeVersion, Workflow};
use crate::cromwell::WorkflowSubmission;
use crate::error::Result;
use crate::inputs::InputDocument;
use crate::RunDirectory;

/// Files written into the run directory before submission. The staged
/// definition is the artifact that gets uploaded, so the retained copy and
/// the submitted content are identical.
pub struct StagedRun {
    pub workflow_file: PathBuf,
    pub inputs_file: PathBuf,
    pub imports_file: Option<PathBuf>,
}

impl StagedRun {
    pub fn into_submission(self) -> WorkflowSubmission {
        WorkflowSubmission {
            source: self.workflow_file.to_string_lossy().into_owned(),
            inputs: Some(self.inputs_file),
            dependencies: self.imports_file,
            ..Default::default()
        }
    }
}

/// Write the workflow definition, optional imports archive, and serialized
/// input document into the run directory.
pub fn stage_run(
    workflow: Workflow,
    version: GenomeVersion,
    inputs: &InputDocument,
    run_dir: &RunDirectory,
) -> Result<StagedRun> {
    let workflow_file = run_dir.path.join(workflow.file_name());
    fs::write(&workflow_file, workflow.source())?;
    info!("Workflow file: {}", workflow_file.display());

    let imports_file = zip_imports(workflow, run_dir)?;
    if let Some(imports) = &imports_file {
        info!("Workflow imports file: {}", imports.display());
    }

    let inputs_file = run_dir
        .path
        .join(format!("{}.{}.inputs.json", workflow.name(), version));
    inputs.write(&inputs_file)?;

    Ok(StagedRun {
        workflow_file,
        inputs_file,
        imports_file,
    })
}

/// Build `{workflow}.imports.zip` holding each required sub-workflow by its
/// base name (flat archive, no directory structure). Workflows without
/// imports stage no archive.
fn zip_imports(workflow: Workflow, run_dir: &RunDirectory) -> Result<Option<PathBuf>> {
    let imports = workflow.imports();
    if imports.is_empty() {
        return Ok(None);
    }

    let path = run_dir.path.join(format!("{}.imports.zip", workflow.name()));
    let mut archive = ZipWriter::new(File::create(&path)?);
    for sub_workflow in imports {
        archive.start_file(sub_workflow.file_name(), FileOptions::default())?;
        archive.write_all(sub_workflow.source().as_bytes())?;
    }
    archive.finish()?;

    Ok(Some(path))
}
