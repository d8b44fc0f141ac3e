use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::AliasHandler;
use crate::constants::{DEFAULT_ALIAS_VERSION, DEFAULT_GROUP};
use crate::schema::AliasParameter;

/// Alias registrado: nombre, schema de parámetros y handler.
#[derive(Clone)]
pub struct Alias {
    pub command_name: String,
    pub description: String,
    pub author: String,
    pub help_string: Option<String>,
    pub version: u32,
    pub supported_os: Vec<String>,
    pub parameters: Vec<AliasParameter>,
    pub handler: Arc<dyn AliasHandler>,
}

impl Alias {
    pub fn new(command_name: impl Into<String>, handler: impl AliasHandler + 'static) -> Self {
        Self { command_name: command_name.into(),
               description: String::new(),
               author: String::new(),
               help_string: None,
               version: DEFAULT_ALIAS_VERSION,
               supported_os: Vec::new(),
               parameters: Vec::new(),
               handler: Arc::new(handler) }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_help_string(mut self, help: impl Into<String>) -> Self {
        self.help_string = Some(help.into());
        self
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn with_supported_os<I, S>(mut self, os: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.supported_os = os.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_parameter(mut self, parameter: AliasParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_parameters(mut self, parameters: impl IntoIterator<Item = AliasParameter>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&AliasParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn help_string(&self) -> &str {
        self.help_string.as_deref().unwrap_or(&self.command_name)
    }

    /// Descripción del comando en el formato que consume el host.
    pub fn command_spec(&self) -> CommandSpec {
        let parameters = self.parameters
                             .iter()
                             .enumerate()
                             .map(|(i, p)| ParameterSpec::from_parameter(p, i + 1))
                             .collect();
        CommandSpec { name: self.command_name.clone(),
                      help_string: self.help_string().to_string(),
                      description: self.description.clone(),
                      version: self.version,
                      author: self.author.clone(),
                      attributes: CommandAttributes { supported_os: self.supported_os.clone() },
                      parameters }
    }
}

impl fmt::Debug for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alias")
         .field("command_name", &self.command_name)
         .field("author", &self.author)
         .field("version", &self.version)
         .field("parameters", &self.parameters)
         .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub name: String,
    pub help_string: String,
    pub description: String,
    pub version: u32,
    pub author: String,
    pub attributes: CommandAttributes,
    pub parameters: Vec<ParameterSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandAttributes {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub supported_os: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    pub cli_name: String,
    pub display_name: String,
    pub description: String,
    pub parameter_type: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub choices: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub default_value: Option<Value>,
    pub parameter_group_info: Vec<GroupInfo>,
}

impl ParameterSpec {
    fn from_parameter(p: &AliasParameter, ui_position: usize) -> Self {
        Self { name: p.name.clone(),
               cli_name: p.cli_name().to_string(),
               display_name: p.display_name().to_string(),
               description: p.description.clone(),
               parameter_type: p.kind.to_string(),
               choices: p.choices.clone(),
               default_value: p.default_value.clone(),
               parameter_group_info: vec![GroupInfo { group_name: DEFAULT_GROUP.to_string(),
                                                      ui_position,
                                                      required: p.is_required() }] }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupInfo {
    pub group_name: String,
    pub ui_position: usize,
    pub required: bool,
}
