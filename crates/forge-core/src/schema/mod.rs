//! Schema de parámetros de alias.
//!
//! Cada alias declara una lista ordenada de `AliasParameter`. Antes de llamar
//! al handler, el resolver pasa los args crudos por `validate_and_normalize`:
//! aplica defaults, verifica tipos y choices, y devuelve `TaskArgs`.
//! El chequeo de ancho numérico no vive aquí sino en el encoder.

mod parameter;
mod validate;
mod values;

pub use parameter::{AliasParameter, ParameterKind};
pub use validate::validate_and_normalize;
pub use values::{ParamValue, TaskArgs};
