//! Modelos compartidos: tarea, callback, arquitectura y comando resultante.

pub mod command;
pub mod task;

pub use command::AliasedCommand;
pub use task::{Architecture, Callback, RawTask, Task};

use serde_json::Value;

/// Descripción corta de un valor JSON para mensajes de error.
pub(crate) fn json_kind(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(_) => "an array".to_string(),
        Value::Object(_) => "an object".to_string(),
    }
}
