use forge_core::encoder::ReadError;
use forge_core::{RegistrationError, ResolutionError};
use thiserror::Error;

/// Errores de la aplicación (CLI).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON inválido: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Error de registro: {0}")]
    Registration(#[from] RegistrationError),
    #[error("{0}")]
    Resolution(#[from] ResolutionError),
    #[error("Buffer ilegible: {0}")]
    Read(#[from] ReadError),
}

impl AppError {
    /// Código de salida del proceso.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Json(_) => 2,
            Self::Resolution(ResolutionError::UnknownAlias(_)) => 3,
            Self::Resolution(_) => 4,
            Self::Io(_) | Self::Registration(_) | Self::Read(_) => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_variant_format() {
        let err = AppError::Config("mala configuración".into());
        assert_eq!(err.to_string(), "Error de configuración: mala configuración");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_io_variant_from() {
        let io_err = std::io::Error::other("falló IO");
        let err: AppError = io_err.into();
        assert_eq!(err.to_string(), "Error en IO: falló IO");
    }

    #[test]
    fn test_resolution_is_verbatim() {
        let err: AppError = ResolutionError::UnknownAlias("sa-nope".into()).into();
        assert_eq!(err.to_string(), "unknown alias 'sa-nope'");
        assert_eq!(err.exit_code(), 3);
    }
}
