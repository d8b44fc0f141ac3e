//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) una sola vez y resuelve los directorios
//! de runtime, cache y binarios.
//!
//! Variables:
//! - `FORGESCRIPT_RUNTIME_DIR` (default: runtime dir del usuario o temp)
//! - `FORGESCRIPT_CACHE_DIR` (default: cache dir del usuario o temp)
//! - `FORGESCRIPT_BIN_ROOT` (default: el runtime dir)
//! - `FORGESCRIPT_BINARY_TEMPLATE` (default: `bin/{name}.{arch}.o`)
//!
//! Runtime y cache siempre terminan en un segmento `forgescript`.
use std::env;
use std::path::{Path, PathBuf};

use dotenvy::dotenv;
use forge_core::constants::DEFAULT_BINARY_TEMPLATE;
use once_cell::sync::Lazy;

use crate::errors::AppError;

pub const PATH_SUFFIX: &str = "forgescript";

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgeConfig {
    pub runtime_dir: PathBuf,
    pub cache_dir: PathBuf,
    /// Raíz contra la que se resuelven los object files.
    pub bin_root: PathBuf,
    pub binary_template: String,
}

impl ForgeConfig {
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Self
        where F: Fn(&str) -> Option<String>
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let runtime_dir = with_forge_suffix(var("FORGESCRIPT_RUNTIME_DIR").map(PathBuf::from)
                                                                          .unwrap_or_else(default_runtime_dir));
        let cache_dir = with_forge_suffix(var("FORGESCRIPT_CACHE_DIR").map(PathBuf::from)
                                                                      .unwrap_or_else(default_cache_dir));
        let bin_root = var("FORGESCRIPT_BIN_ROOT").map(PathBuf::from)
                                                  .unwrap_or_else(|| runtime_dir.clone());
        let binary_template = var("FORGESCRIPT_BINARY_TEMPLATE").unwrap_or_else(|| DEFAULT_BINARY_TEMPLATE.to_string());
        Self { runtime_dir,
               cache_dir,
               bin_root,
               binary_template }
    }

    /// Sobrescribe el runtime dir (flag `--runtime-dir`). Si `bin_root`
    /// apuntaba al runtime anterior, lo sigue.
    pub fn with_runtime_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = with_forge_suffix(dir.into());
        if self.bin_root == self.runtime_dir {
            self.bin_root = dir.clone();
        }
        self.runtime_dir = dir;
        self
    }

    pub fn with_bin_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.bin_root = dir.into();
        self
    }

    /// Crea runtime y cache si no existen.
    pub fn ensure_dirs(&self) -> Result<(), AppError> {
        for dir in [&self.runtime_dir, &self.cache_dir] {
            std::fs::create_dir_all(dir).map_err(|e| AppError::Config(format!("no se pudo crear {}: {e}",
                                                                              dir.display())))?;
        }
        Ok(())
    }
}

/// Agrega el segmento `forgescript` salvo que ya sea el último.
pub fn with_forge_suffix(path: PathBuf) -> PathBuf {
    if path.file_name().is_some_and(|n| n == PATH_SUFFIX) {
        path
    } else {
        path.join(PATH_SUFFIX)
    }
}

fn default_runtime_dir() -> PathBuf {
    dirs::runtime_dir().unwrap_or_else(env::temp_dir)
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir().unwrap_or_else(env::temp_dir)
}

/// `true` si `path` es uno de los directorios gestionados (termina en
/// `forgescript`). `clean` se niega a borrar cualquier otra cosa.
pub fn is_managed_dir(path: &Path) -> bool {
    path.file_name().is_some_and(|n| n == PATH_SUFFIX)
}
