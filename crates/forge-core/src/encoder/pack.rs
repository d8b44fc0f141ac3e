//! Empaquetado de `TypedArgument` a un buffer plano.
//!
//! Reglas de formato (fijas, deben coincidir con lo que compila el object file):
//!
//! | Tag      | Bytes                                              |
//! |----------|----------------------------------------------------|
//! | `string` | u32 LE (len + 1), UTF-8, `00`                      |
//! | `wchar`  | u32 LE (bytes + 2), UTF-16LE, `00 00`              |
//! | `int16`  | 2 bytes LE, complemento a dos                      |
//! | `int32`  | 4 bytes LE, complemento a dos                      |
//! | `int64`  | 8 bytes LE, complemento a dos                      |
//! | `size`   | 4 u 8 bytes LE sin signo (ancho de puntero)        |
//! | `binary` | u32 LE (len), bytes tal cual                       |
//!
//! Sin padding entre elementos. Un elemento inválido aborta todo el encode.

use base64::Engine as _;
use serde_json::Value;

use super::{ArgType, TypedArgument};
use crate::errors::EncodingError;
use crate::model::{json_kind, Architecture};

/// Encoder con el ancho de puntero del objetivo ya fijado.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentEncoder {
    architecture: Architecture,
}

impl Default for ArgumentEncoder {
    fn default() -> Self {
        Self::for_architecture(&Architecture::X64)
    }
}

impl ArgumentEncoder {
    pub fn for_architecture(architecture: &Architecture) -> Self {
        Self { architecture: architecture.clone() }
    }

    pub fn architecture(&self) -> &Architecture {
        &self.architecture
    }

    /// Empaqueta la lista completa. Lista vacía => buffer vacío.
    pub fn pack(&self, args: &[TypedArgument]) -> Result<Vec<u8>, EncodingError> {
        let mut out = Vec::new();
        for (index, arg) in args.iter().enumerate() {
            self.encode_one(index, arg, &mut out)?;
        }
        Ok(out)
    }

    fn encode_one(&self, index: usize, arg: &TypedArgument, out: &mut Vec<u8>) -> Result<(), EncodingError> {
        let value = arg.value();
        match arg.tag() {
            ArgType::String => {
                let s = expect_str(index, ArgType::String, value)?;
                if s.as_bytes().contains(&0) {
                    return Err(EncodingError::InteriorNul { index, tag: "string" });
                }
                write_len(index, ArgType::String, s.len() + 1, out)?;
                out.extend_from_slice(s.as_bytes());
                out.push(0);
            }
            ArgType::Wchar => {
                let s = expect_str(index, ArgType::Wchar, value)?;
                if s.contains('\0') {
                    return Err(EncodingError::InteriorNul { index, tag: "wchar" });
                }
                let units: Vec<u16> = s.encode_utf16().collect();
                write_len(index, ArgType::Wchar, (units.len() + 1) * 2, out)?;
                for u in units {
                    out.extend_from_slice(&u.to_le_bytes());
                }
                out.extend_from_slice(&[0, 0]);
            }
            ArgType::Int16 => {
                let v = integer(index, ArgType::Int16, value)?;
                let v = i16::try_from(v).map_err(|_| overflow(index, ArgType::Int16, value, 16))?;
                out.extend_from_slice(&v.to_le_bytes());
            }
            ArgType::Int32 => {
                let v = integer(index, ArgType::Int32, value)?;
                let v = i32::try_from(v).map_err(|_| overflow(index, ArgType::Int32, value, 32))?;
                out.extend_from_slice(&v.to_le_bytes());
            }
            ArgType::Int64 => {
                let v = integer(index, ArgType::Int64, value)?;
                let v = i64::try_from(v).map_err(|_| overflow(index, ArgType::Int64, value, 64))?;
                out.extend_from_slice(&v.to_le_bytes());
            }
            ArgType::Size => {
                let width = self.architecture
                                .pointer_width()
                                .ok_or_else(|| EncodingError::UnknownPointerWidth { index,
                                                                                   architecture: self.architecture.to_string() })?;
                let v = integer(index, ArgType::Size, value)?;
                if width == 4 {
                    let v = u32::try_from(v).map_err(|_| overflow(index, ArgType::Size, value, 32))?;
                    out.extend_from_slice(&v.to_le_bytes());
                } else {
                    let v = u64::try_from(v).map_err(|_| overflow(index, ArgType::Size, value, 64))?;
                    out.extend_from_slice(&v.to_le_bytes());
                }
            }
            ArgType::Binary => {
                let bytes = binary(index, value)?;
                write_len(index, ArgType::Binary, bytes.len(), out)?;
                out.extend_from_slice(&bytes);
            }
        }
        Ok(())
    }
}

/// Atajo con ancho de puntero x64.
pub fn pack(args: &[TypedArgument]) -> Result<Vec<u8>, EncodingError> {
    ArgumentEncoder::default().pack(args)
}

fn write_len(index: usize, tag: ArgType, len: usize, out: &mut Vec<u8>) -> Result<(), EncodingError> {
    let len32 = u32::try_from(len).map_err(|_| EncodingError::TooLarge { index,
                                                                        tag: tag.as_str(),
                                                                        len })?;
    out.extend_from_slice(&len32.to_le_bytes());
    Ok(())
}

fn expect_str<'a>(index: usize, tag: ArgType, value: &'a Value) -> Result<&'a str, EncodingError> {
    value.as_str().ok_or_else(|| EncodingError::TypeMismatch { index,
                                                              tag: tag.as_str(),
                                                              expected: "a string",
                                                              found: json_kind(value) })
}

fn overflow(index: usize, tag: ArgType, value: &Value, bits: u32) -> EncodingError {
    EncodingError::Overflow { index,
                              tag: tag.as_str(),
                              value: value.to_string(),
                              bits }
}

/// Entero "ancho" antes del chequeo de rango. Acepta enteros JSON, floats sin
/// parte fraccionaria (el host entrega números como float64) y booleanos.
fn integer(index: usize, tag: ArgType, value: &Value) -> Result<i128, EncodingError> {
    let mismatch = || EncodingError::TypeMismatch { index,
                                                    tag: tag.as_str(),
                                                    expected: "an integer",
                                                    found: json_kind(value) };
    match value {
        Value::Bool(b) => Ok(i128::from(*b)),
        Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                Ok(i128::from(v))
            } else if let Some(v) = n.as_u64() {
                Ok(i128::from(v))
            } else {
                match n.as_f64() {
                    // `as` satura fuera de rango; el chequeo de ancho lo rechaza después.
                    Some(f) if f.is_finite() && f.fract() == 0.0 => Ok(f as i128),
                    _ => Err(mismatch()),
                }
            }
        }
        _ => Err(mismatch()),
    }
}

fn binary(index: usize, value: &Value) -> Result<Vec<u8>, EncodingError> {
    match value {
        Value::String(s) => base64::engine::general_purpose::STANDARD.decode(s)
                                                                     .map_err(|e| EncodingError::InvalidBinary { index,
                                                                                                                 detail: format!("invalid base64: {e}") }),
        Value::Array(items) => items.iter()
                                    .map(|item| {
                                        item.as_u64()
                                            .and_then(|b| u8::try_from(b).ok())
                                            .ok_or_else(|| EncodingError::InvalidBinary { index,
                                                                                          detail: format!("{item} is not a byte") })
                                    })
                                    .collect(),
        other => Err(EncodingError::TypeMismatch { index,
                                                   tag: "binary",
                                                   expected: "base64 text or a byte array",
                                                   found: json_kind(other) }),
    }
}
