use crate::errors::TransformError;
use crate::model::{AliasedCommand, Task};

use super::AliasContext;

/// Traductor de una tarea validada a un `AliasedCommand`.
///
/// Debe ser puro respecto a `task` y `ctx`: el mismo input produce el mismo
/// comando (salvo los ids de artifacts).
pub trait AliasHandler: Send + Sync {
    fn transform(&self, task: &Task, ctx: &AliasContext<'_>) -> Result<AliasedCommand, TransformError>;
}

impl<F> AliasHandler for F
    where F: Fn(&Task, &AliasContext<'_>) -> Result<AliasedCommand, TransformError> + Send + Sync
{
    fn transform(&self, task: &Task, ctx: &AliasContext<'_>) -> Result<AliasedCommand, TransformError> {
        self(task, ctx)
    }
}
