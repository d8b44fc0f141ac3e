//! Protocolo de empaquetado de argumentos tipados.
//!
//! Convierte una lista ordenada `(tag, valor)` en el buffer binario que lee
//! el entry point del object file. Es el ABI del sistema: el layout no puede
//! cambiar sin recompilar los object files.

mod arg_type;
mod pack;
pub mod reader;

pub use arg_type::{ArgType, TypedArgument};
pub use pack::{pack, ArgumentEncoder};
pub use reader::{ArgumentReader, DecodedArgument, ReadError};
