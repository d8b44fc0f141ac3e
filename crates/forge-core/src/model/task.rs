//! Tarea entregada por el host y vista parseada de la arquitectura.
//!
//! El host entrega un `RawTask` (args sin validar). El resolver lo pasa por el
//! schema del alias y construye un `Task`, que es lo que reciben los handlers.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::TaskArgs;

/// Datos del callback que originó la tarea. Sólo `architecture` participa en
/// la resolución; el resto queda disponible para los handlers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Callback {
    pub architecture: String,
    pub os: String,
    pub host: String,
    pub user: String,
    pub domain: String,
    pub pid: i64,
    pub integrity_level: i64,
    pub process_name: String,
    pub description: String,
    pub operator_username: String,
}

impl Callback {
    pub fn with_architecture(architecture: impl Into<String>) -> Self {
        Self { architecture: architecture.into(),
               ..Self::default() }
    }

    pub fn arch(&self) -> Architecture {
        Architecture::parse(&self.architecture)
    }
}

/// Tarea tal como llega del host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTask {
    pub callback: Callback,
    pub args: Map<String, Value>,
    pub command_line: String,
}

impl RawTask {
    pub fn new(architecture: impl Into<String>, args: Value) -> Self {
        let args = match args {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self { callback: Callback::with_architecture(architecture),
               args,
               command_line: String::new() }
    }
}

/// Tarea validada: `args` ya tiene defaults aplicados y tipos normalizados.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub callback: Callback,
    pub args: TaskArgs,
    pub command_line: String,
}

impl Task {
    pub fn new(callback: Callback, args: TaskArgs) -> Self {
        Self { callback,
               args,
               command_line: String::new() }
    }

    /// String de arquitectura tal cual lo reporta el callback.
    pub fn architecture(&self) -> &str {
        &self.callback.architecture
    }
}

/// Arquitectura del objetivo. `Other` conserva el string original para que
/// el lookup del binario falle en el store y no aquí.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Architecture {
    X64,
    X86,
    Arm64,
    Other(String),
}

impl Architecture {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "x64" | "amd64" | "x86_64" => Self::X64,
            "x86" | "i386" | "i686" => Self::X86,
            "arm64" | "aarch64" => Self::Arm64,
            _ => Self::Other(raw.to_string()),
        }
    }

    /// Ancho de puntero en bytes; `None` si no se conoce.
    pub fn pointer_width(&self) -> Option<usize> {
        match self {
            Self::X64 | Self::Arm64 => Some(8),
            Self::X86 => Some(4),
            Self::Other(_) => None,
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X64 => f.write_str("x64"),
            Self::X86 => f.write_str("x86"),
            Self::Arm64 => f.write_str("arm64"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn architecture_aliases_and_widths() {
        assert_eq!(Architecture::parse("AMD64"), Architecture::X64);
        assert_eq!(Architecture::parse("i686"), Architecture::X86);
        assert_eq!(Architecture::parse("x86").pointer_width(), Some(4));
        assert_eq!(Architecture::parse("aarch64").pointer_width(), Some(8));
        let other = Architecture::parse("mips");
        assert_eq!(other.pointer_width(), None);
        assert_eq!(other.to_string(), "mips");
    }

    #[test]
    fn raw_task_deserializes_with_partial_callback() {
        let raw: RawTask = serde_json::from_value(json!({
            "callback": {"architecture": "x86", "host": "WS01"},
            "args": {"domain": "example.com"}
        })).expect("raw task");
        assert_eq!(raw.callback.architecture, "x86");
        assert_eq!(raw.callback.host, "WS01");
        assert_eq!(raw.args.get("domain"), Some(&json!("example.com")));
        assert!(raw.command_line.is_empty());
    }
}
