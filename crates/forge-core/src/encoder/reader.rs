//! Lector del formato producido por `ArgumentEncoder`.
//!
//! Recorre el buffer en el mismo orden posicional en que lo haría el object
//! file. Se usa en tests y en el `inspect` del CLI para mostrar lo que se
//! empaquetó.

use serde::Serialize;
use thiserror::Error;

use super::ArgType;
use crate::model::Architecture;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReadError {
    #[error("read out of bounds: offset={offset} needed={needed} len={len}")]
    OutOfBounds { offset: usize, needed: usize, len: usize },
    #[error("missing NUL terminator at offset {offset}")]
    MissingTerminator { offset: usize },
    #[error("invalid text at offset {offset}")]
    InvalidText { offset: usize },
    #[error("unknown pointer width")]
    UnknownPointerWidth,
}

/// Valor leído de vuelta, para mostrar o comparar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum DecodedArgument {
    String(String),
    Wchar(String),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Size(u64),
    Binary(Vec<u8>),
}

/// Cursor sobre un buffer empaquetado.
#[derive(Debug, Clone)]
pub struct ArgumentReader<'a> {
    buf: &'a [u8],
    offset: usize,
    pointer_width: Option<usize>,
}

impl<'a> ArgumentReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self::for_architecture(buf, &Architecture::X64)
    }

    pub fn for_architecture(buf: &'a [u8], architecture: &Architecture) -> Self {
        Self { buf,
               offset: 0,
               pointer_width: architecture.pointer_width() }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8], ReadError> {
        let end = self.offset.saturating_add(needed);
        if end > self.buf.len() {
            return Err(ReadError::OutOfBounds { offset: self.offset,
                                                needed,
                                                len: self.buf.len() });
        }
        let out = &self.buf[self.offset..end];
        self.offset = end;
        Ok(out)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], ReadError> {
        let mut arr = [0u8; N];
        arr.copy_from_slice(self.take(N)?);
        Ok(arr)
    }

    pub fn read_int16(&mut self) -> Result<i16, ReadError> {
        Ok(i16::from_le_bytes(self.take_array()?))
    }

    pub fn read_int32(&mut self) -> Result<i32, ReadError> {
        Ok(i32::from_le_bytes(self.take_array()?))
    }

    pub fn read_int64(&mut self) -> Result<i64, ReadError> {
        Ok(i64::from_le_bytes(self.take_array()?))
    }

    pub fn read_size(&mut self) -> Result<u64, ReadError> {
        match self.pointer_width {
            Some(4) => Ok(u64::from(u32::from_le_bytes(self.take_array()?))),
            Some(_) => Ok(u64::from_le_bytes(self.take_array()?)),
            None => Err(ReadError::UnknownPointerWidth),
        }
    }

    fn read_len(&mut self) -> Result<usize, ReadError> {
        Ok(u32::from_le_bytes(self.take_array()?) as usize)
    }

    pub fn read_binary(&mut self) -> Result<Vec<u8>, ReadError> {
        let len = self.read_len()?;
        Ok(self.take(len)?.to_vec())
    }

    pub fn read_string(&mut self) -> Result<String, ReadError> {
        let len = self.read_len()?;
        let start = self.offset;
        let raw = self.take(len)?;
        match raw.split_last() {
            Some((&0, body)) => String::from_utf8(body.to_vec()).map_err(|_| ReadError::InvalidText { offset: start }),
            _ => Err(ReadError::MissingTerminator { offset: start }),
        }
    }

    pub fn read_wchar(&mut self) -> Result<String, ReadError> {
        let len = self.read_len()?;
        let start = self.offset;
        let raw = self.take(len)?;
        if raw.len() < 2 || raw.len() % 2 != 0 || !raw.ends_with(&[0, 0]) {
            return Err(ReadError::MissingTerminator { offset: start });
        }
        let units: Vec<u16> = raw[..raw.len() - 2].chunks_exact(2)
                                                  .map(|c| u16::from_le_bytes([c[0], c[1]]))
                                                  .collect();
        String::from_utf16(&units).map_err(|_| ReadError::InvalidText { offset: start })
    }

    pub fn read(&mut self, tag: ArgType) -> Result<DecodedArgument, ReadError> {
        Ok(match tag {
            ArgType::String => DecodedArgument::String(self.read_string()?),
            ArgType::Wchar => DecodedArgument::Wchar(self.read_wchar()?),
            ArgType::Int16 => DecodedArgument::Int16(self.read_int16()?),
            ArgType::Int32 => DecodedArgument::Int32(self.read_int32()?),
            ArgType::Int64 => DecodedArgument::Int64(self.read_int64()?),
            ArgType::Size => DecodedArgument::Size(self.read_size()?),
            ArgType::Binary => DecodedArgument::Binary(self.read_binary()?),
        })
    }
}
