use std::path::{Path, PathBuf};

use dashmap::DashMap;
use uuid::Uuid;

use super::blobs::BlobTable;
use super::{ArtifactRef, ArtifactStore};
use crate::errors::ArtifactError;

/// Store en memoria: los "archivos" se precargan con `insert_file`.
#[derive(Default)]
pub struct InMemoryArtifactStore {
    files: DashMap<PathBuf, Vec<u8>>,
    blobs: BlobTable,
}

impl InMemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_file(&self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), bytes.into());
    }

    pub fn with_file(self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert_file(path, bytes);
        self
    }

    /// Cantidad de blobs registrados y aún no consumidos.
    pub fn registered(&self) -> usize {
        self.blobs.len()
    }
}

impl ArtifactStore for InMemoryArtifactStore {
    fn register(&self, path: &Path, delete_after_fetch: bool) -> Result<ArtifactRef, ArtifactError> {
        let bytes = self.files
                        .get(path)
                        .map(|f| f.value().clone())
                        .ok_or_else(|| ArtifactError::NotFound { path: path.to_path_buf() })?;
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_fetch() {
        let store = InMemoryArtifactStore::new().with_file("bin/whoami.x64.o", b"COFF".to_vec());
        let r = store.register(Path::new("bin/whoami.x64.o"), false).unwrap();
        assert_eq!(r.file_name, "whoami.x64.o");
        assert_eq!(r.size, 4);
        assert_eq!(r.digest, crate::hashing::hash_bytes(b"COFF"));
        assert_eq!(store.fetch(r.id).unwrap(), b"COFF");
        assert_eq!(store.fetch(r.id).unwrap(), b"COFF");
        assert_eq!(store.describe(r.id), Some(r));
    }

    #[test]
    fn delete_after_fetch_drops_blob() {
        let store = InMemoryArtifactStore::new().with_file("a.bin", vec![1, 2, 3]);
        let r = store.register(Path::new("a.bin"), true).unwrap();
        assert_eq!(store.registered(), 1);
        assert_eq!(store.fetch(r.id).unwrap(), vec![1, 2, 3]);
        assert_eq!(store.fetch(r.id), Err(ArtifactError::UnknownId(r.id)));
        assert_eq!(store.registered(), 0);
    }

    #[test]
    fn missing_file() {
        let store = InMemoryArtifactStore::new();
        let err = store.register(Path::new("bin/nope.x86.o"), false).unwrap_err();
        assert_eq!(err, ArtifactError::NotFound { path: "bin/nope.x86.o".into() });
    }
}
