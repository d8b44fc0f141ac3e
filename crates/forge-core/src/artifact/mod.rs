//! Frontera con el almacenamiento de blobs del host.
//!
//! Un handler nunca lee bytes de disco directamente: pide a su `AliasContext`
//! que registre un archivo y recibe un `ArtifactRef` opaco. El host luego
//! trae el blob por `id`.
//!
//! Dos implementaciones:
//! - `InMemoryArtifactStore`: archivos precargados, para tests y embebidos.
//! - `FsArtifactStore`: lee archivos relativos a una raíz en disco.

mod blobs;
mod fs;
mod memory;
mod template;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ArtifactError;

pub use fs::FsArtifactStore;
pub use memory::InMemoryArtifactStore;
pub use template::object_file_path;

/// Referencia opaca a un blob registrado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRef {
    pub id: Uuid,
    /// Ruta tal como la pidió el handler (relativa a la raíz del store).
    pub path: PathBuf,
    pub file_name: String,
    pub size: u64,
    /// blake3 hex del contenido.
    pub digest: String,
    pub delete_after_fetch: bool,
}

/// Almacenamiento de blobs. Compartido entre threads por el resolver.
pub trait ArtifactStore: Send + Sync {
    /// Registra el archivo en `path` y devuelve su referencia. Rutas relativas
    /// se resuelven contra la raíz del store.
    fn register(&self, path: &Path, delete_after_fetch: bool) -> Result<ArtifactRef, ArtifactError>;

    /// Devuelve el contenido del blob. Si fue registrado con
    /// `delete_after_fetch`, la primera lectura lo elimina.
    fn fetch(&self, id: Uuid) -> Result<Vec<u8>, ArtifactError>;

    /// Referencia de un blob aún presente.
    fn describe(&self, id: Uuid) -> Option<ArtifactRef>;

    /// Elimina un blob sin leerlo. `false` si no existía.
    fn discard(&self, id: Uuid) -> bool;
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
