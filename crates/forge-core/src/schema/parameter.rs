use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validate::normalize_value;

/// Tipo declarado de un parámetro de alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterKind {
    String,
    Boolean,
    Number,
    ChooseOne,
    Array,
}

impl ParameterKind {
    /// Nombre que usa el host en `parameter_type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Boolean => "Boolean",
            Self::Number => "Number",
            Self::ChooseOne => "ChooseOne",
            Self::Array => "Array",
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Un input declarado de un alias. Inmutable una vez registrado.
///
/// Sin `default_value` el parámetro es obligatorio, salvo los `Array`, que
/// caen en una lista vacía.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasParameter {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub cli_name: Option<String>,
    #[serde(default)]
    pub description: String,
    pub kind: ParameterKind,
    #[serde(default)]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub choices: Vec<String>,
}

impl AliasParameter {
    pub fn new(name: impl Into<String>, kind: ParameterKind) -> Self {
        Self { name: name.into(),
               display_name: None,
               cli_name: None,
               description: String::new(),
               kind,
               default_value: None,
               choices: Vec::new() }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, ParameterKind::String)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, ParameterKind::Number)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, ParameterKind::Boolean)
    }

    pub fn array(name: impl Into<String>) -> Self {
        Self::new(name, ParameterKind::Array)
    }

    pub fn choose_one<I, S>(name: impl Into<String>, choices: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self::new(name, ParameterKind::ChooseOne).with_choices(choices)
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_cli_name(mut self, cli_name: impl Into<String>) -> Self {
        self.cli_name = Some(cli_name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_choices<I, S>(mut self, choices: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().filter(|s| !s.is_empty()).unwrap_or(&self.name)
    }

    pub fn cli_name(&self) -> &str {
        self.cli_name.as_deref().filter(|s| !s.is_empty()).unwrap_or(&self.name)
    }

    pub fn is_required(&self) -> bool {
        self.default_value.is_none() && self.kind != ParameterKind::Array
    }

    /// Invariantes de declaración, verificadas al registrar el alias.
    pub fn check(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("parameter name is empty".to_string());
        }
        if self.kind == ParameterKind::ChooseOne && self.choices.is_empty() {
            return Err("ChooseOne parameter declares no choices".to_string());
        }
        if let Some(default) = &self.default_value {
            normalize_value(self, default).map_err(|e| format!("invalid default value: {e}"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn names_fall_back_to_name() {
        let p = AliasParameter::string("query");
        assert_eq!(p.display_name(), "query");
        assert_eq!(p.cli_name(), "query");
        let p = p.with_display_name("LDAP query to perform").with_cli_name("q");
        assert_eq!(p.display_name(), "LDAP query to perform");
        assert_eq!(p.cli_name(), "q");
    }

    #[test]
    fn required_means_no_default() {
        assert!(AliasParameter::string("domain").is_required());
        assert!(!AliasParameter::string("server").with_default("").is_required());
        assert!(!AliasParameter::array("attributes").is_required());
    }

    #[test]
    fn check_rejects_bad_declarations() {
        assert!(AliasParameter::choose_one("scope", Vec::<String>::new()).check().is_err());
        let err = AliasParameter::choose_one("scope", ["BASE", "LEVEL"]).with_default("SUBTREE")
                                                                         .check()
                                                                         .unwrap_err();
        assert!(err.contains("SUBTREE"), "{err}");
        assert!(AliasParameter::number("count").with_default(json!("many")).check().is_err());
        assert!(AliasParameter::boolean("ldaps").with_default(false).check().is_ok());
        assert!(AliasParameter::new("", ParameterKind::String).check().is_err());
    }
}
