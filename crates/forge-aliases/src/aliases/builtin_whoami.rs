use forge_core::{Alias, AliasContext, AliasHandler, AliasedCommand, Task, TransformError};

pub const NAME: &str = "forgescript_whoami";

/// Delegación directa al `whoami` del agente.
#[derive(Debug, Default)]
pub struct BuiltinWhoami;

impl AliasHandler for BuiltinWhoami {
    fn transform(&self, _task: &Task, _ctx: &AliasContext<'_>) -> Result<AliasedCommand, TransformError> {
        Ok(AliasedCommand::builtin("whoami"))
    }
}

pub fn alias() -> Alias {
    Alias::new(NAME, BuiltinWhoami).with_description("Runs the builtin whoami command")
}
