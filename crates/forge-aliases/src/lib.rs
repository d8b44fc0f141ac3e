//! forge-aliases: aliases incluidos de fábrica.
//!
//! - `sa-whoami`, `sa-nslookup`, `sa-ldapsearch`, `sa-wmi_query`: object files
//!   de Situational Awareness de TrustedSec.
//! - `forgescript_whoami`: builtin del agente, sin object file.

pub mod aliases;

use forge_core::{Alias, RegistrationError, RegistryBuilder};
use log::debug;

/// Todos los aliases incluidos, en orden de registro.
pub fn builtin_aliases() -> Vec<Alias> {
    vec![aliases::whoami::alias(),
         aliases::nslookup::alias(),
         aliases::ldapsearch::alias(),
         aliases::wmi_query::alias(),
         aliases::builtin_whoami::alias()]
}

/// Registra los aliases incluidos. Falla en el primer nombre repetido.
pub fn register_builtin_aliases(builder: &mut RegistryBuilder) -> Result<(), RegistrationError> {
    for alias in builtin_aliases() {
        builder.register(alias)?;
    }
    debug!("builtin aliases registered");
    Ok(())
}
