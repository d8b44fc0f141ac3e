//! Constantes compartidas por el core.
//!
//! `EXECUTE_COFF` y `DEFAULT_GROUP` forman parte del contrato con el host;
//! cambiarlas rompe la compatibilidad con agentes ya desplegados.

/// Comando del agente que carga y ejecuta un object file.
pub const EXECUTE_COFF: &str = "execute_coff";

/// Ruta por defecto de un object file, relativa a la raíz del store.
/// `{name}` y `{arch}` se sustituyen al resolver.
pub const DEFAULT_BINARY_TEMPLATE: &str = "bin/{name}.{arch}.o";

/// Grupo de parámetros que el host muestra por defecto.
pub const DEFAULT_GROUP: &str = "Default";

/// Versión por defecto de un alias en el command spec.
pub const DEFAULT_ALIAS_VERSION: u32 = 1;
