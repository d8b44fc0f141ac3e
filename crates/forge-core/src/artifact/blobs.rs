use std::path::Path;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use log::debug;
use uuid::Uuid;

use super::{file_name_of, ArtifactRef};
use crate::errors::ArtifactError;
use crate::hashing::hash_bytes;

struct StoredBlob {
    reference: ArtifactRef,
    bytes: Vec<u8>,
    registered_at: DateTime<Utc>,
}

/// Tabla de blobs registrados, común a ambos stores.
#[derive(Default)]
pub(super) struct BlobTable {
    inner: DashMap<Uuid, StoredBlob>,
}

impl BlobTable {
    pub(super) fn insert(&self, path: &Path, bytes: Vec<u8>, delete_after_fetch: bool) -> ArtifactRef {
        let reference = ArtifactRef { id: Uuid::new_v4(),
                                      path: path.to_path_buf(),
                                      file_name: file_name_of(path),
                                      size: bytes.len() as u64,
                                      digest: hash_bytes(&bytes),
                                      delete_after_fetch };
        debug!("artifact registered id={} path={} size={}",
               reference.id,
               path.display(),
               reference.size);
        self.inner.insert(reference.id,
                          StoredBlob { reference: reference.clone(),
                                       bytes,
                                       registered_at: Utc::now() });
        reference
    }

    pub(super) fn fetch(&self, id: Uuid) -> Result<Vec<u8>, ArtifactError> {
        let delete = match self.inner.get(&id) {
            Some(blob) => blob.reference.delete_after_fetch,
            None => return Err(ArtifactError::UnknownId(id)),
        };
        if delete {
            let (_, blob) = self.inner.remove(&id).ok_or(ArtifactError::UnknownId(id))?;
            debug!("artifact fetched and dropped id={id} registered_at={}", blob.registered_at);
            return Ok(blob.bytes);
        }
        self.inner
            .get(&id)
            .map(|blob| blob.bytes.clone())
            .ok_or(ArtifactError::UnknownId(id))
    }

    pub(super) fn describe(&self, id: Uuid) -> Option<ArtifactRef> {
        self.inner.get(&id).map(|blob| blob.reference.clone())
    }

    pub(super) fn remove(&self, id: Uuid) -> bool {
        self.inner.remove(&id).is_some()
    }

    pub(super) fn len(&self) -> usize {
        self.inner.len()
    }
}
