use std::path::Path;
use std::sync::{Mutex, PoisonError};

use uuid::Uuid;

use crate::artifact::{object_file_path, ArtifactRef, ArtifactStore};
use crate::errors::{ArtifactError, TransformError};

/// Lo que un handler puede pedir al host mientras traduce una tarea.
///
/// Lleva la cuenta de cada blob que registra, para que el resolver pueda
/// descartarlos si la resolución falla.
pub struct AliasContext<'a> {
    store: &'a dyn ArtifactStore,
    binary_template: &'a str,
    architecture: &'a str,
    delete_after_fetch: bool,
    registered: Mutex<Vec<Uuid>>,
}

impl<'a> AliasContext<'a> {
    pub fn new(store: &'a dyn ArtifactStore, binary_template: &'a str, architecture: &'a str) -> Self {
        Self { store,
               binary_template,
               architecture,
               delete_after_fetch: true,
               registered: Mutex::new(Vec::new()) }
    }

    /// Marca los blobs registrados como persistentes (no se borran al leerlos).
    pub fn persistent(mut self) -> Self {
        self.delete_after_fetch = false;
        self
    }

    pub fn architecture(&self) -> &str {
        self.architecture
    }

    /// Ids registrados a través de este contexto, en orden.
    pub fn registered(&self) -> Vec<Uuid> {
        self.registered.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Elimina del store todo lo registrado. Devuelve cuántos blobs se
    /// descartaron.
    pub(crate) fn discard_registered(&self) -> usize {
        let mut ids = self.registered.lock().unwrap_or_else(PoisonError::into_inner);
        ids.drain(..).filter(|id| self.store.discard(*id)).count()
    }

    fn track(&self, reference: ArtifactRef) -> ArtifactRef {
        self.registered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(reference.id);
        reference
    }

    /// Registra un archivo arbitrario (relativo a la raíz del store).
    pub fn register_file(&self, path: impl AsRef<Path>) -> Result<ArtifactRef, TransformError> {
        let reference = self.store.register(path.as_ref(), self.delete_after_fetch)?;
        Ok(self.track(reference))
    }

    /// Registra el object file `name` para la arquitectura del callback.
    /// Si no existe, la arquitectura no está soportada por el alias.
    pub fn object_file(&self, name: &str) -> Result<ArtifactRef, TransformError> {
        let path = object_file_path(self.binary_template, name, self.architecture);
        match self.store.register(&path, self.delete_after_fetch) {
            Ok(reference) => Ok(self.track(reference)),
            Err(ArtifactError::NotFound { .. }) => {
                Err(TransformError::UnsupportedArchitecture { architecture: self.architecture.to_string(),
                                                              path })
            }
            Err(other) => Err(TransformError::Artifact(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::InMemoryArtifactStore;
    use crate::constants::DEFAULT_BINARY_TEMPLATE;

    #[test]
    fn object_file_follows_template_and_architecture() {
        let store = InMemoryArtifactStore::new().with_file("bin/whoami.x64.o", b"x64".to_vec());
        let ctx = AliasContext::new(&store, DEFAULT_BINARY_TEMPLATE, "x64");
        let r = ctx.object_file("whoami").unwrap();
        assert_eq!(r.path, Path::new("bin/whoami.x64.o"));
        assert!(r.delete_after_fetch);

        let ctx = AliasContext::new(&store, DEFAULT_BINARY_TEMPLATE, "x86");
        let err = ctx.object_file("whoami").unwrap_err();
        assert_eq!(err,
                   TransformError::UnsupportedArchitecture { architecture: "x86".into(),
                                                             path: "bin/whoami.x86.o".into() });
    }

    #[test]
    fn register_file_keeps_artifact_errors() {
        let store = InMemoryArtifactStore::new().with_file("data/users.txt", b"a".to_vec());
        let ctx = AliasContext::new(&store, DEFAULT_BINARY_TEMPLATE, "x64").persistent();
        assert!(!ctx.register_file("data/users.txt").unwrap().delete_after_fetch);
        let err = ctx.register_file("data/missing.txt").unwrap_err();
        assert!(matches!(err, TransformError::Artifact(ArtifactError::NotFound { .. })));
    }

    #[test]
    fn tracks_and_discards_registered_blobs() {
        let store = InMemoryArtifactStore::new().with_file("bin/whoami.x64.o", b"x64".to_vec())
                                                .with_file("data/users.txt", b"a".to_vec());
        let ctx = AliasContext::new(&store, DEFAULT_BINARY_TEMPLATE, "x64");
        let first = ctx.register_file("data/users.txt").unwrap();
        let second = ctx.object_file("whoami").unwrap();
        assert!(ctx.object_file("nope").is_err());
        assert_eq!(ctx.registered(), vec![first.id, second.id]);
        assert_eq!(store.registered(), 2);

        assert_eq!(ctx.discard_registered(), 2);
        assert_eq!(store.registered(), 0);
        assert!(ctx.registered().is_empty());
    }
}
