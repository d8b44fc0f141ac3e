//! Aliases: definición, handler y registry.
//!
//! Un `Alias` une un nombre de comando, su schema de parámetros y un
//! `AliasHandler`. Los aliases se registran una vez en un `RegistryBuilder`
//! que luego se congela en un `AliasRegistry` de sólo lectura.

mod context;
mod definition;
mod handler;
mod registry;

pub use context::AliasContext;
pub use definition::{Alias, CommandSpec, GroupInfo, ParameterSpec};
pub use handler::AliasHandler;
pub use registry::{AliasRegistry, RegistryBuilder};
