//! `AliasResolver`: tarea → `AliasedCommand` listo para el host.
//!
//! Flujo:
//! 1. (`resolve_raw`) lookup en el registry y validación contra el schema.
//! 2. El handler traduce la tarea; los object files se buscan con el template
//!    de binarios y la arquitectura del callback.
//! 3. Para object files se empaqueta `coff_arguments` con el ancho de puntero
//!    del objetivo. Los builtins no llevan buffer.
//!
//! Sin estado propio entre invocaciones; compartible entre threads.

use std::sync::Arc;

use log::{debug, warn};

use crate::alias::{Alias, AliasContext, AliasRegistry};
use crate::artifact::ArtifactStore;
use crate::constants::DEFAULT_BINARY_TEMPLATE;
use crate::encoder::ArgumentEncoder;
use crate::errors::ResolutionError;
use crate::model::{AliasedCommand, RawTask, Task};
use crate::schema::validate_and_normalize;

pub struct AliasResolver {
    registry: Arc<AliasRegistry>,
    store: Arc<dyn ArtifactStore>,
    binary_template: String,
}

impl AliasResolver {
    pub fn new(registry: Arc<AliasRegistry>, store: Arc<dyn ArtifactStore>) -> Self {
        Self { registry,
               store,
               binary_template: DEFAULT_BINARY_TEMPLATE.to_string() }
    }

    pub fn with_binary_template(mut self, template: impl Into<String>) -> Self {
        self.binary_template = template.into();
        self
    }

    pub fn registry(&self) -> &AliasRegistry {
        &self.registry
    }

    pub fn store(&self) -> &dyn ArtifactStore {
        self.store.as_ref()
    }

    pub fn binary_template(&self) -> &str {
        &self.binary_template
    }

    /// Lookup + validación + `resolve`.
    pub fn resolve_raw(&self, command_name: &str, raw: RawTask) -> Result<AliasedCommand, ResolutionError> {
        let alias = self.registry
                        .get(command_name)
                        .ok_or_else(|| ResolutionError::UnknownAlias(command_name.to_string()))?;
        let args = validate_and_normalize(&alias.parameters, &raw.args).map_err(|source| {
                       warn!("alias={command_name} validation failed: {source}");
                       ResolutionError::Validation { alias: command_name.to_string(),
                                                     source }
                   })?;
        let task = Task { callback: raw.callback,
                          args,
                          command_line: raw.command_line };
        self.resolve(alias, &task)
    }

    /// Traduce una tarea ya validada.
    pub fn resolve(&self, alias: &Alias, task: &Task) -> Result<AliasedCommand, ResolutionError> {
        let name = alias.command_name.as_str();
        debug!("resolving alias={name} arch={}", task.architecture());

        let ctx = AliasContext::new(self.store.as_ref(), &self.binary_template, task.architecture());
        let mut command = match alias.handler.transform(task, &ctx) {
            Ok(command) => command,
            Err(e) => {
                let discarded = ctx.discard_registered();
                warn!("alias={name} transform failed: {e} (discarded {discarded} artifacts)");
                return Err(ResolutionError::from_transform(name, e));
            }
        };

        if command.is_object_file() {
            let encoder = ArgumentEncoder::for_architecture(&task.callback.arch());
            match encoder.pack(command.arguments()) {
                Ok(buf) => command.packed_arguments = Some(buf),
                Err(source) => {
                    // Sin buffer nada de lo registrado sirve.
                    let discarded = ctx.discard_registered();
                    warn!("alias={name} encoding failed: {source} (discarded {discarded} artifacts)");
                    return Err(ResolutionError::Encoding { alias: name.to_string(),
                                                           source });
                }
            }
        } else {
            command.packed_arguments = None;
        }

        debug!("resolved alias={name} command={} args={}",
               command.command_name,
               command.arguments().len());
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::RegistryBuilder;
    use crate::artifact::InMemoryArtifactStore;
    use crate::encoder::TypedArgument;
    use crate::errors::{EncodingError, TransformError};
    use crate::schema::AliasParameter;
    use serde_json::json;

    fn echo(task: &Task, ctx: &AliasContext<'_>) -> Result<AliasedCommand, TransformError> {
        let count = task.args.integer("count")?;
        let file = ctx.object_file("echo")?;
        Ok(AliasedCommand::execute_coff(file).with_arguments(vec![TypedArgument::int16(count),
                                                                  TypedArgument::size(7)]))
    }

    /// Registra el object file y recién después lee un argumento.
    fn late_failure(task: &Task, ctx: &AliasContext<'_>) -> Result<AliasedCommand, TransformError> {
        let file = ctx.object_file("echo")?;
        let n = task.args.integer("n")?;
        Ok(AliasedCommand::execute_coff(file).with_arguments(vec![TypedArgument::int32(n)]))
    }

    fn with_extra_file(task: &Task, ctx: &AliasContext<'_>) -> Result<AliasedCommand, TransformError> {
        let _extra = ctx.register_file("data/extra.bin")?;
        let file = ctx.object_file("echo")?;
        let n = task.args.integer("n")?;
        Ok(AliasedCommand::execute_coff(file).with_arguments(vec![TypedArgument::int16(n)]))
    }

    fn setup() -> (AliasResolver, Arc<InMemoryArtifactStore>) {
        let mut b = RegistryBuilder::new();
        b.register_alias("echo", echo, "", "", vec![AliasParameter::number("count").with_default(1)])
         .unwrap();
        b.register_alias("late", late_failure, "", "", vec![AliasParameter::number("n")])
         .unwrap();
        b.register_alias("extra", with_extra_file, "", "", vec![AliasParameter::number("n")])
         .unwrap();
        let store = Arc::new(InMemoryArtifactStore::new().with_file("bin/echo.x64.o", b"64".to_vec())
                                                         .with_file("bin/echo.x86.o", b"32".to_vec())
                                                         .with_file("data/extra.bin", b"xx".to_vec()));
        (AliasResolver::new(Arc::new(b.build()), store.clone()), store)
    }

    #[test]
    fn packs_with_target_pointer_width() {
        let (resolver, _) = setup();
        let cmd = resolver.resolve_raw("echo", RawTask::new("x64", json!({}))).unwrap();
        assert_eq!(cmd.packed_arguments.unwrap(), vec![1, 0, 7, 0, 0, 0, 0, 0, 0, 0]);
        let cmd = resolver.resolve_raw("echo", RawTask::new("x86", json!({}))).unwrap();
        assert_eq!(cmd.packed_arguments.unwrap(), vec![1, 0, 7, 0, 0, 0]);
    }

    #[test]
    fn encoding_failure_discards_object_file() {
        let (resolver, store) = setup();
        let err = resolver.resolve_raw("echo", RawTask::new("x64", json!({"count": 40000})))
                          .unwrap_err();
        assert!(matches!(err, ResolutionError::Encoding { source: EncodingError::Overflow { bits: 16, .. }, .. }));
        assert_eq!(store.registered(), 0);
    }

    #[test]
    fn handler_failure_discards_what_it_registered() {
        let (resolver, store) = setup();
        let err = resolver.resolve_raw("late", RawTask::new("x64", json!({"n": 1.5})))
                          .unwrap_err();
        assert!(!matches!(err, ResolutionError::Encoding { .. }));
        assert_eq!(store.registered(), 0);
    }

    #[test]
    fn encoding_failure_discards_every_registered_file() {
        let (resolver, store) = setup();
        let err = resolver.resolve_raw("extra", RawTask::new("x64", json!({"n": 70000})))
                          .unwrap_err();
        assert!(matches!(err, ResolutionError::Encoding { .. }));
        assert_eq!(store.registered(), 0);

        let cmd = resolver.resolve_raw("extra", RawTask::new("x64", json!({"n": 7}))).unwrap();
        assert_eq!(cmd.packed_arguments.unwrap(), vec![7, 0]);
        assert_eq!(store.registered(), 2);
    }

    #[test]
    fn unknown_alias_and_architecture() {
        let (resolver, _) = setup();
        assert_eq!(resolver.resolve_raw("nope", RawTask::default()).unwrap_err(),
                   ResolutionError::UnknownAlias("nope".into()));
        let err = resolver.resolve_raw("echo", RawTask::new("arm64", json!({}))).unwrap_err();
        assert!(matches!(err, ResolutionError::UnsupportedArchitecture { ref architecture, .. } if architecture == "arm64"));
    }
}
