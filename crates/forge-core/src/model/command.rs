//! `AliasedCommand`: el comando que el host termina ejecutando.

use base64::Engine as _;
use serde_json::{json, Map, Value};

use crate::artifact::ArtifactRef;
use crate::constants::EXECUTE_COFF;
use crate::encoder::TypedArgument;

/// Descriptor producido por un handler y completado por el resolver.
///
/// - `object_file` + `coff_arguments`: ejecución de object file.
/// - sólo `command_name`: builtin del agente, sin binario ni buffer.
///
/// `packed_arguments` lo llena el resolver; un handler nunca lo escribe.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasedCommand {
    pub command_name: String,
    pub object_file: Option<ArtifactRef>,
    pub coff_arguments: Option<Vec<TypedArgument>>,
    pub packed_arguments: Option<Vec<u8>>,
    pub extra_args: Map<String, Value>,
    pub display_params: Option<String>,
}

impl AliasedCommand {
    /// Comando builtin del agente (p.ej. `whoami`).
    pub fn builtin(command_name: impl Into<String>) -> Self {
        Self { command_name: command_name.into(),
               object_file: None,
               coff_arguments: None,
               packed_arguments: None,
               extra_args: Map::new(),
               display_params: None }
    }

    /// Ejecución de object file con el artifact ya registrado.
    pub fn execute_coff(object_file: ArtifactRef) -> Self {
        Self { object_file: Some(object_file),
               ..Self::builtin(EXECUTE_COFF) }
    }

    pub fn with_arguments(mut self, args: Vec<TypedArgument>) -> Self {
        self.coff_arguments = Some(args);
        self
    }

    /// Argumento extra que se reenvía al host sin interpretar.
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra_args.insert(key.into(), value.into());
        self
    }

    pub fn with_display_params(mut self, display: impl Into<String>) -> Self {
        self.display_params = Some(display.into());
        self
    }

    pub fn is_object_file(&self) -> bool {
        self.object_file.is_some()
    }

    /// Lista tipada (vacía si el handler no declaró argumentos).
    pub fn arguments(&self) -> &[TypedArgument] {
        self.coff_arguments.as_deref().unwrap_or(&[])
    }

    /// Forma JSON que consume el host: `{name, args, display_params}`.
    pub fn to_json(&self) -> Value {
        let mut args = self.extra_args.clone();
        if let Some(file) = &self.object_file {
            args.insert("bof_file".into(), Value::String(file.id.to_string()));
        }
        if let Some(list) = &self.coff_arguments {
            args.insert("coff_arguments".into(), json!(list));
        }
        if let Some(packed) = &self.packed_arguments {
            args.insert("packed_arguments".into(),
                        Value::String(base64::engine::general_purpose::STANDARD.encode(packed)));
        }
        json!({
            "name": self.command_name,
            "args": args,
            "display_params": self.display_params.clone().unwrap_or_default(),
        })
    }
}
