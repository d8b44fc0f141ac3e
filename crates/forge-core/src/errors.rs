//! Errores del core, uno por capa.
//!
//! - `ValidationError`: el schema de parámetros rechaza el input del operador.
//! - `EncodingError`: un valor no cabe en el formato binario declarado.
//! - `ArtifactError`: el store no encuentra o no puede leer un blob.
//! - `TransformError`: un handler de alias no pudo construir el comando.
//! - `ResolutionError`: lo que ve el host; envuelve a los anteriores con el
//!   nombre del alias.
//! - `RegistrationError`: fallos al registrar aliases en el arranque.
//!
//! Los mensajes se muestran tal cual al operador.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ValidationError {
    #[error("missing required parameter '{name}'")]
    MissingRequiredParameter { name: String },
    #[error("invalid choice '{value}' for parameter '{name}' (expected one of: {})", .choices.join(", "))]
    InvalidChoice { name: String, value: String, choices: Vec<String> },
    #[error("parameter '{name}' expects {expected}, got {found}")]
    TypeMismatch { name: String, expected: &'static str, found: String },
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum EncodingError {
    #[error("argument #{index} ({tag}): value {value} does not fit in {bits} bits")]
    Overflow { index: usize, tag: &'static str, value: String, bits: u32 },
    #[error("argument #{index} ({tag}): expected {expected}, got {found}")]
    TypeMismatch { index: usize, tag: &'static str, expected: &'static str, found: String },
    #[error("argument #{index} ({tag}): string contains an interior NUL byte")]
    InteriorNul { index: usize, tag: &'static str },
    #[error("argument #{index} ({tag}): {len} bytes exceed the 32-bit length prefix")]
    TooLarge { index: usize, tag: &'static str, len: usize },
    #[error("argument #{index} (binary): {detail}")]
    InvalidBinary { index: usize, detail: String },
    #[error("argument #{index} (size): unknown pointer width for architecture '{architecture}'")]
    UnknownPointerWidth { index: usize, architecture: String },
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ArtifactError {
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("could not read {}: {detail}", .path.display())]
    Io { path: PathBuf, detail: String },
    #[error("unknown artifact id {0}")]
    UnknownId(uuid::Uuid),
}

/// Fallos dentro de un handler de alias.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum TransformError {
    #[error("missing argument '{0}'")]
    MissingArgument(String),
    #[error("argument '{name}' must be {expected}")]
    WrongType { name: String, expected: &'static str },
    #[error("Invalid {name} {value}")]
    InvalidValue { name: String, value: String },
    #[error("no object file for architecture '{architecture}' ({})", .path.display())]
    UnsupportedArchitecture { architecture: String, path: PathBuf },
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ResolutionError {
    #[error("unknown alias '{0}'")]
    UnknownAlias(String),
    #[error("{alias}: {source}")]
    Validation { alias: String, source: ValidationError },
    #[error("{alias}: unsupported architecture '{architecture}' (no {})", .path.display())]
    UnsupportedArchitecture { alias: String, architecture: String, path: PathBuf },
    #[error("{alias}: artifact not found: {source}")]
    ArtifactNotFound { alias: String, source: ArtifactError },
    #[error("{alias}: {detail}")]
    InvalidArgument { alias: String, detail: String },
    #[error("{alias}: {source}")]
    Encoding { alias: String, source: EncodingError },
}

impl ResolutionError {
    /// Envuelve un fallo del handler con el nombre del alias.
    pub fn from_transform(alias: &str, err: TransformError) -> Self {
        let alias = alias.to_string();
        match err {
            TransformError::UnsupportedArchitecture { architecture, path } => {
                Self::UnsupportedArchitecture { alias, architecture, path }
            }
            TransformError::Artifact(source) => Self::ArtifactNotFound { alias, source },
            other => Self::InvalidArgument { alias, detail: other.to_string() },
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum RegistrationError {
    #[error("alias name is empty")]
    EmptyName,
    #[error("alias '{0}' is already registered")]
    DuplicateName(String),
    #[error("alias '{alias}' declares parameter '{name}' twice")]
    DuplicateParameter { alias: String, name: String },
    #[error("alias '{alias}', parameter '{name}': {detail}")]
    InvalidParameter { alias: String, name: String, detail: String },
}
