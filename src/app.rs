//! Cableado de la aplicación: registry de aliases incluidos + store en disco.
use std::path::PathBuf;
use std::sync::Arc;

use forge_core::encoder::{ArgumentReader, DecodedArgument};
use forge_core::{AliasResolver, AliasedCommand, CommandSpec, FsArtifactStore, RawTask, RegistryBuilder};
use log::debug;

use crate::config::{is_managed_dir, ForgeConfig};
use crate::errors::AppError;

pub struct Forge {
    resolver: AliasResolver,
}

impl Forge {
    pub fn new(config: &ForgeConfig) -> Result<Self, AppError> {
        let mut builder = RegistryBuilder::new();
        forge_aliases::register_builtin_aliases(&mut builder)?;
        let store = Arc::new(FsArtifactStore::new(&config.bin_root));
        let resolver = AliasResolver::new(Arc::new(builder.build()), store).with_binary_template(&config.binary_template);
        debug!("forge ready bin_root={} aliases={}",
               config.bin_root.display(),
               resolver.registry().len());
        Ok(Self { resolver })
    }

    pub fn resolver(&self) -> &AliasResolver {
        &self.resolver
    }

    pub fn command_specs(&self) -> Vec<CommandSpec> {
        self.resolver.registry().command_specs()
    }

    pub fn resolve(&self, alias: &str, task: RawTask) -> Result<AliasedCommand, AppError> {
        Ok(self.resolver.resolve_raw(alias, task)?)
    }

    /// Resuelve y decodifica el buffer usando los tags de `coff_arguments`.
    pub fn inspect(&self, alias: &str, task: RawTask) -> Result<Vec<DecodedArgument>, AppError> {
        let architecture = task.callback.arch();
        let command = self.resolve(alias, task)?;
        let Some(buf) = command.packed_arguments.as_deref() else {
            return Ok(Vec::new());
        };
        let mut reader = ArgumentReader::for_architecture(buf, &architecture);
        let mut out = Vec::with_capacity(command.arguments().len());
        for arg in command.arguments() {
            out.push(reader.read(arg.tag())?);
        }
        Ok(out)
    }
}

/// Parsea `--args` (objeto JSON) para armar la tarea.
pub fn raw_task(architecture: &str, args: &str) -> Result<RawTask, AppError> {
    let value: serde_json::Value = serde_json::from_str(args)?;
    if !value.is_object() {
        return Err(AppError::Config(format!("--args debe ser un objeto JSON, no {value}")));
    }
    let mut task = RawTask::new(architecture, value);
    task.command_line = args.to_string();
    Ok(task)
}

/// Borra runtime y cache. Devuelve los directorios efectivamente eliminados.
pub fn clean(config: &ForgeConfig) -> Result<Vec<PathBuf>, AppError> {
    let mut removed = Vec::new();
    for dir in [&config.runtime_dir, &config.cache_dir] {
        if !is_managed_dir(dir) {
            return Err(AppError::Config(format!("{} no es un directorio de forgescript", dir.display())));
        }
        if dir.exists() {
            std::fs::remove_dir_all(dir)?;
            debug!("removed {}", dir.display());
            removed.push(dir.clone());
        }
    }
    Ok(removed)
}
