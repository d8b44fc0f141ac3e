//! forge-core: schema de parámetros de alias y empaquetado de argumentos
//! para object files.
//!
//! Capas, de abajo hacia arriba:
//! - `schema`: declaración y validación de parámetros (`TaskArgs`).
//! - `encoder`: `TypedArgument` → buffer binario (y lector para inspección).
//! - `artifact`: frontera con el almacenamiento de blobs del host.
//! - `alias`: definición, handler y registry.
//! - `resolver`: tarea → `AliasedCommand`.
#[macro_use]
mod macros;

pub mod alias;
pub mod artifact;
pub mod constants;
pub mod encoder;
pub mod errors;
pub mod hashing;
pub mod model;
pub mod resolver;
pub mod schema;

pub use alias::{Alias, AliasContext, AliasHandler, AliasRegistry, CommandSpec, RegistryBuilder};
pub use artifact::{ArtifactRef, ArtifactStore, FsArtifactStore, InMemoryArtifactStore};
pub use encoder::{pack, ArgType, ArgumentEncoder, ArgumentReader, TypedArgument};
pub use errors::{ArtifactError, EncodingError, RegistrationError, ResolutionError, TransformError, ValidationError};
pub use model::{AliasedCommand, Architecture, Callback, RawTask, Task};
pub use resolver::AliasResolver;
pub use schema::{validate_and_normalize, AliasParameter, ParamValue, ParameterKind, TaskArgs};

/// Texto de versión que el host muestra junto al payload.
pub fn description_metadata() -> String {
    format!("Version {}\nGit Commit {}",
            env!("CARGO_PKG_VERSION"),
            option_env!("FORGESCRIPT_GIT_REVISION").unwrap_or("unknown"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_lists_version_then_commit() {
        let meta = description_metadata();
        let mut lines = meta.lines();
        assert_eq!(lines.next(), Some(concat!("Version ", env!("CARGO_PKG_VERSION"))));
        assert!(lines.next().unwrap().starts_with("Git Commit "));
    }
}
