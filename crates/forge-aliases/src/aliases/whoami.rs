use forge_core::{Alias, AliasContext, AliasHandler, AliasedCommand, Task, TransformError};

use super::{sa_description, TRUSTEDSEC};

pub const NAME: &str = "sa-whoami";

#[derive(Debug, Default)]
pub struct Whoami;

impl AliasHandler for Whoami {
    fn transform(&self, _task: &Task, ctx: &AliasContext<'_>) -> Result<AliasedCommand, TransformError> {
        Ok(AliasedCommand::execute_coff(ctx.object_file("whoami")?))
    }
}

pub fn alias() -> Alias {
    Alias::new(NAME, Whoami).with_description(sa_description("whoami"))
                            .with_author(TRUSTEDSEC)
}
