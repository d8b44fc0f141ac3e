//! forgescript: aliases parametrizados para object files.
//!
//! Este crate es la aplicación:
//! - `config`: variables de entorno y directorios.
//! - `errors`: `AppError` para el CLI.
//! - `app`: registry de aliases incluidos sobre un store en disco.
//!
//! El schema, el encoder y el resolver viven en `forge-core`.

pub mod app;
pub mod config;
pub mod errors;

pub use app::Forge;
pub use config::ForgeConfig;
pub use errors::AppError;
