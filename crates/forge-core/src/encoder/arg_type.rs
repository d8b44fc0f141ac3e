use std::fmt;

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tag de tipo de un argumento posicional del object file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgType {
    /// Texto angosto: prefijo u32 LE (incluye el NUL), bytes UTF-8, NUL.
    String,
    /// Texto ancho: prefijo u32 LE en bytes, UTF-16LE, NUL de 2 bytes.
    #[serde(alias = "wstring")]
    Wchar,
    #[serde(alias = "short")]
    Int16,
    #[serde(alias = "int")]
    Int32,
    Int64,
    /// Bytes crudos con prefijo u32 LE, sin terminador.
    #[serde(alias = "bytes")]
    Binary,
    /// `size_t` del objetivo: 4 u 8 bytes según la arquitectura.
    Size,
}

impl ArgType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Wchar => "wchar",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Binary => "binary",
            Self::Size => "size",
        }
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Par `(tag, valor)`; se serializa como `["int16", 1]`, igual que la lista
/// `coff_arguments` que espera el host.
///
/// El valor queda como JSON: la verificación de ancho la hace el encoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedArgument(pub ArgType, pub Value);

impl TypedArgument {
    pub fn new(tag: ArgType, value: impl Into<Value>) -> Self {
        Self(tag, value.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self(ArgType::String, Value::String(value.into()))
    }

    pub fn wchar(value: impl Into<String>) -> Self {
        Self(ArgType::Wchar, Value::String(value.into()))
    }

    pub fn int16(value: i64) -> Self {
        Self(ArgType::Int16, Value::from(value))
    }

    pub fn int32(value: i64) -> Self {
        Self(ArgType::Int32, Value::from(value))
    }

    pub fn int64(value: i64) -> Self {
        Self(ArgType::Int64, Value::from(value))
    }

    pub fn size(value: u64) -> Self {
        Self(ArgType::Size, Value::from(value))
    }

    /// Los bytes viajan en base64 dentro del JSON.
    pub fn binary(bytes: &[u8]) -> Self {
        Self(ArgType::Binary, Value::String(base64::engine::general_purpose::STANDARD.encode(bytes)))
    }

    pub fn tag(&self) -> ArgType {
        self.0
    }

    pub fn value(&self) -> &Value {
        &self.1
    }
}
