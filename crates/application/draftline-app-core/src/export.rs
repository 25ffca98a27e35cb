use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use draftline_core::ExportArtifact;
use tracing::info;

use crate::ports::ExportSink;

/// Writes exported artifacts into a local directory, creating it on demand.
pub struct DirectoryExportSink {
    dir: Utf8PathBuf,
}

impl DirectoryExportSink {
    pub fn new(dir: impl Into<Utf8PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }
}

impl DirectoryExportSink {
    fn ensure_dir(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create export directory {}", self.dir))
    }

    fn part_path(&self, artifact: &ExportArtifact) -> Utf8PathBuf {
        self.dir.join(format!(".{}.part", artifact.file_name))
    }
}

impl ExportSink for DirectoryExportSink {
    fn deliver(&self, artifact: &ExportArtifact) -> anyhow::Result<()> {
        self.deliver_all(std::slice::from_ref(artifact))
    }

    /// Stages every artifact as a `.part` file first and only renames them into
    /// place once all of them are written.
    fn deliver_all(&self, artifacts: &[ExportArtifact]) -> anyhow::Result<()> {
        self.ensure_dir()?;

        let mut staged: Vec<(Utf8PathBuf, Utf8PathBuf)> = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            let tmp = self.part_path(artifact);
            if let Err(e) = std::fs::write(&tmp, artifact.contents.as_bytes()) {
                for (tmp, _) in &staged {
                    let _ = std::fs::remove_file(tmp);
                }
                return Err(e).with_context(|| format!("failed to write {tmp}"));
            }
            staged.push((tmp, self.dir.join(artifact.file_name)));
        }

        for (index, (tmp, target)) in staged.iter().enumerate() {
            if let Err(e) = std::fs::rename(tmp, target) {
                for (tmp, _) in &staged[index..] {
                    let _ = std::fs::remove_file(tmp);
                }
                return Err(e).with_context(|| format!("failed to move export into {target}"));
            }
        }

        for (artifact, (_, target)) in artifacts.iter().zip(&staged) {
            info!(path = %target, content_type = artifact.content_type, "exported artifact");
        }
        Ok(())
    }
}
