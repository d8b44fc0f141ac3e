use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::blobs::BlobTable;
use super::{ArtifactRef, ArtifactStore};
use crate::errors::ArtifactError;

/// Store respaldado por disco. El contenido se lee al registrar.
pub struct FsArtifactStore {
    root: PathBuf,
    blobs: BlobTable,
}

impl FsArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(),
               blobs: BlobTable::default() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl ArtifactStore for FsArtifactStore {
    fn register(&self, path: &Path, delete_after_fetch: bool) -> Result<ArtifactRef, ArtifactError> {
        let full = self.resolve(path);
        let bytes = std::fs::read(&full).map_err(|e| match e.kind() {
                                            ErrorKind::NotFound => ArtifactError::NotFound { path: full.clone() },
                                            _ => ArtifactError::Io { path: full.clone(),
                                                                     detail: e.to_string() },
                                        })?;
        Ok(self.blobs.insert(path, bytes, delete_after_fetch))
    }

    fn fetch(&self, id: Uuid) -> Result<Vec<u8>, ArtifactError> {
        self.blobs.fetch(id)
    }

    fn describe(&self, id: Uuid) -> Option<ArtifactRef> {
        self.blobs.describe(id)
    }

    fn discard(&self, id: Uuid) -> bool {
        self.blobs.remove(id)
    }
}
