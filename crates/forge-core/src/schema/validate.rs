//! `validate_and_normalize`: input crudo del operador → `TaskArgs`.
//!
//! Función pura. Claves desconocidas se ignoran; `null` cuenta como ausente.

use serde_json::{Map, Number, Value};

use super::{AliasParameter, ParamValue, ParameterKind, TaskArgs};
use crate::errors::ValidationError;
use crate::model::json_kind;

pub fn validate_and_normalize(params: &[AliasParameter], raw: &Map<String, Value>) -> Result<TaskArgs, ValidationError> {
    let mut out = TaskArgs::new();
    for param in params {
        let supplied = raw.get(&param.name).filter(|v| !v.is_null());
        let value = match (supplied, &param.default_value) {
            (Some(v), _) => normalize_value(param, v)?,
            (None, Some(default)) => normalize_value(param, default)?,
            (None, None) if param.kind == ParameterKind::Array => ParamValue::Array(Vec::new()),
            (None, None) => {
                return Err(ValidationError::MissingRequiredParameter { name: param.name.clone() });
            }
        };
        out.insert(param.name.clone(), value);
    }
    Ok(out)
}

/// Normaliza un único valor contra la declaración del parámetro.
pub(crate) fn normalize_value(param: &AliasParameter, value: &Value) -> Result<ParamValue, ValidationError> {
    let mismatch = |expected: &'static str| ValidationError::TypeMismatch { name: param.name.clone(),
                                                                            expected,
                                                                            found: json_kind(value) };
    match param.kind {
        ParameterKind::String => match value {
            Value::String(s) => Ok(ParamValue::String(s.clone())),
            _ => Err(mismatch("a string")),
        },
        ParameterKind::Number => match value {
            Value::Number(n) => Ok(ParamValue::Number(n.clone())),
            Value::String(s) => parse_number(s).map(ParamValue::Number).ok_or_else(|| mismatch("a number")),
            _ => Err(mismatch("a number")),
        },
        ParameterKind::Boolean => match value {
            Value::Bool(b) => Ok(ParamValue::Boolean(*b)),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(ParamValue::Boolean(true)),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(ParamValue::Boolean(false)),
            _ => Err(mismatch("a boolean")),
        },
        ParameterKind::ChooseOne => match value {
            Value::String(s) if param.choices.iter().any(|c| c == s) => Ok(ParamValue::Choice(s.clone())),
            Value::String(s) => Err(ValidationError::InvalidChoice { name: param.name.clone(),
                                                                     value: s.clone(),
                                                                     choices: param.choices.clone() }),
            _ => Err(mismatch("one of the declared choices")),
        },
        ParameterKind::Array => match value {
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(s) => out.push(s.clone()),
                        Value::Number(n) => out.push(n.to_string()),
                        Value::Bool(b) => out.push(b.to_string()),
                        _ => return Err(mismatch("an array of scalar values")),
                    }
                }
                // La UI del host envía `[""]` cuando el campo queda vacío.
                if out.len() == 1 && out[0].is_empty() {
                    out.clear();
                }
                Ok(ParamValue::Array(out))
            }
            _ => Err(mismatch("an array")),
        },
    }
}

fn parse_number(s: &str) -> Option<Number> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Some(Number::from(i));
    }
    s.parse::<f64>().ok().and_then(Number::from_f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => Map::new(),
        }
    }

    fn ldap_params() -> Vec<AliasParameter> {
        vec![AliasParameter::string("query"),
             AliasParameter::array("attributes").with_default(json!([])),
             AliasParameter::number("count").with_default(0),
             AliasParameter::choose_one("scope", ["BASE", "LEVEL", "SUBTREE"]).with_default("SUBTREE"),
             AliasParameter::boolean("ldaps").with_default(false)]
    }

    #[test]
    fn defaults_fill_missing_values() {
        let args = validate_and_normalize(&ldap_params(), &raw(json!({"query": "(cn=*)"}))).unwrap();
        assert_eq!(args.string("query").unwrap(), "(cn=*)");
        assert_eq!(args.integer("count").unwrap(), 0);
        assert_eq!(args.choice("scope").unwrap(), "SUBTREE");
        assert!(!args.boolean("ldaps").unwrap());
        assert!(args.array("attributes").unwrap().is_empty());
        let again = validate_and_normalize(&ldap_params(), &raw(json!({"query": "(cn=*)"}))).unwrap();
        assert_eq!(args, again);
    }

    #[test]
    fn missing_required_parameter() {
        let err = validate_and_normalize(&ldap_params(), &raw(json!({"count": 3}))).unwrap_err();
        assert_eq!(err, ValidationError::MissingRequiredParameter { name: "query".into() });
        let err = validate_and_normalize(&ldap_params(), &raw(json!({"query": null}))).unwrap_err();
        assert_eq!(err, ValidationError::MissingRequiredParameter { name: "query".into() });
    }

    #[test]
    fn choose_one_is_exact_and_case_sensitive() {
        let err = validate_and_normalize(&ldap_params(), &raw(json!({"query": "x", "scope": "base"}))).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidChoice { ref value, .. } if value == "base"));
        let ok = validate_and_normalize(&ldap_params(), &raw(json!({"query": "x", "scope": "LEVEL"}))).unwrap();
        assert_eq!(ok.choice("scope").unwrap(), "LEVEL");
        let err = validate_and_normalize(&ldap_params(), &raw(json!({"query": "x", "scope": 2}))).unwrap_err();
        assert!(matches!(err, ValidationError::TypeMismatch { .. }));
    }

    #[test]
    fn numbers_accept_numeric_strings() {
        let args = validate_and_normalize(&ldap_params(), &raw(json!({"query": "x", "count": " 25 "}))).unwrap();
        assert_eq!(args.integer("count").unwrap(), 25);
        let args = validate_and_normalize(&ldap_params(), &raw(json!({"query": "x", "count": "2.5"}))).unwrap();
        assert_eq!(args.number("count").unwrap().as_f64(), Some(2.5));
        let err = validate_and_normalize(&ldap_params(), &raw(json!({"query": "x", "count": "ten"}))).unwrap_err();
        assert!(matches!(err, ValidationError::TypeMismatch { expected: "a number", .. }));
        let err = validate_and_normalize(&ldap_params(), &raw(json!({"query": "x", "count": [1]}))).unwrap_err();
        assert!(matches!(err, ValidationError::TypeMismatch { .. }));
    }

    #[test]
    fn booleans_accept_canonical_forms_only() {
        let args = validate_and_normalize(&ldap_params(), &raw(json!({"query": "x", "ldaps": "TRUE"}))).unwrap();
        assert!(args.boolean("ldaps").unwrap());
        for bad in [json!("yes"), json!(1), json!("0")] {
            let err = validate_and_normalize(&ldap_params(), &raw(json!({"query": "x", "ldaps": bad}))).unwrap_err();
            assert!(matches!(err, ValidationError::TypeMismatch { expected: "a boolean", .. }));
        }
    }

    #[test]
    fn arrays_normalize() {
        let params = vec![AliasParameter::array("items")];
        let args = validate_and_normalize(&params, &Map::new()).unwrap();
        assert!(args.array("items").unwrap().is_empty());
        let args = validate_and_normalize(&params, &raw(json!({"items": [""]}))).unwrap();
        assert!(args.array("items").unwrap().is_empty());
        let args = validate_and_normalize(&params, &raw(json!({"items": ["cn", 5, true]}))).unwrap();
        assert_eq!(args.array("items").unwrap(), ["cn".to_string(), "5".to_string(), "true".to_string()]);
        let err = validate_and_normalize(&params, &raw(json!({"items": [{"a": 1}]}))).unwrap_err();
        assert!(matches!(err, ValidationError::TypeMismatch { .. }));
        let err = validate_and_normalize(&params, &raw(json!({"items": "cn"}))).unwrap_err();
        assert!(matches!(err, ValidationError::TypeMismatch { expected: "an array", .. }));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let args = validate_and_normalize(&ldap_params(), &raw(json!({"query": "x", "extra": 1}))).unwrap();
        assert!(!args.contains("extra"));
        assert_eq!(args.len(), 5);
    }
}
