//! Valores ya normalizados por el schema (`TaskArgs`).

use indexmap::IndexMap;
use serde_json::{Number, Value};

use crate::errors::TransformError;

/// Valor tipado de un parámetro tras la validación.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    String(String),
    Number(Number),
    Boolean(bool),
    Array(Vec<String>),
    Choice(String),
}

impl ParamValue {
    pub fn to_json(&self) -> Value {
        match self {
            Self::String(s) | Self::Choice(s) => Value::String(s.clone()),
            Self::Number(n) => Value::Number(n.clone()),
            Self::Boolean(b) => Value::Bool(*b),
            Self::Array(items) => Value::Array(items.iter().cloned().map(Value::String).collect()),
        }
    }
}

/// Argumentos validados, en el orden en que el alias declaró sus parámetros.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskArgs {
    values: IndexMap<String, ParamValue>,
}

impl TaskArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) {
        self.values.insert(name.into(), value);
    }

    pub fn with(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn require(&self, name: &str) -> Result<&ParamValue, TransformError> {
        self.values.get(name).ok_or_else(|| TransformError::MissingArgument(name.to_string()))
    }

    /// Texto libre o valor de un `ChooseOne`.
    pub fn string(&self, name: &str) -> Result<&str, TransformError> {
        match self.require(name)? {
            ParamValue::String(s) | ParamValue::Choice(s) => Ok(s),
            _ => Err(TransformError::WrongType { name: name.to_string(),
                                                 expected: "a string" }),
        }
    }

    pub fn choice(&self, name: &str) -> Result<&str, TransformError> {
        self.string(name)
    }

    pub fn number(&self, name: &str) -> Result<&Number, TransformError> {
        match self.require(name)? {
            ParamValue::Number(n) => Ok(n),
            _ => Err(TransformError::WrongType { name: name.to_string(),
                                                 expected: "a number" }),
        }
    }

    /// Número entero; acepta floats sin parte fraccionaria.
    pub fn integer(&self, name: &str) -> Result<i64, TransformError> {
        let n = self.number(name)?;
        if let Some(v) = n.as_i64() {
            return Ok(v);
        }
        match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f as i64),
            _ => Err(TransformError::WrongType { name: name.to_string(),
                                                 expected: "an integer" }),
        }
    }

    pub fn boolean(&self, name: &str) -> Result<bool, TransformError> {
        match self.require(name)? {
            ParamValue::Boolean(b) => Ok(*b),
            _ => Err(TransformError::WrongType { name: name.to_string(),
                                                 expected: "a boolean" }),
        }
    }

    pub fn array(&self, name: &str) -> Result<&[String], TransformError> {
        match self.require(name)? {
            ParamValue::Array(items) => Ok(items),
            _ => Err(TransformError::WrongType { name: name.to_string(),
                                                 expected: "an array" }),
        }
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.values.iter().map(|(k, v)| (k.clone(), v.to_json())).collect())
    }
}

impl FromIterator<(String, ParamValue)> for TaskArgs {
    fn from_iter<T: IntoIterator<Item = (String, ParamValue)>>(iter: T) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}
