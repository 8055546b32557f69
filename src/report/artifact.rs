use crate::report::{Artifact, Generation, Notice};
use anyhow::Context;
use log::{error, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Write `artifact` into `dir`, creating the directory if needed.
pub fn write_artifact(dir: &Path, artifact: &Artifact) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(&artifact.file_name);
    fs::write(&path, artifact.contents.as_bytes())
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Persist a generation's artifact, if it produced one. A write failure is
/// recorded as an error notice on the generation.
pub fn save(dir: &Path, generation: &mut Generation) -> Option<PathBuf> {
    let artifact = generation.artifact.as_ref()?;
    match write_artifact(dir, artifact) {
        Ok(path) => {
            info!("wrote {}", path.display());
            Some(path)
        }
        Err(e) => {
            error!("could not save {}: {e:#}", artifact.file_name);
            generation.notices.push(Notice::error(format!("{e:#}")));
            None
        }
    }
}
