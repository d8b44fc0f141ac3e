//! `coff_args!`: atajo para construir la lista tipada de un handler.
//!
//! ```ignore
//! let args = coff_args![string: domain, string: server, int16: record];
//! ```
//!
//! Cada entrada `tag: expr` llama al constructor homónimo de `TypedArgument`.

#[macro_export]
macro_rules! coff_args {
    () => {
        ::std::vec::Vec::<$crate::encoder::TypedArgument>::new()
    };
    ($($tag:ident : $value:expr),+ $(,)?) => {
        ::std::vec![$($crate::encoder::TypedArgument::$tag($value)),+]
    };
}

#[cfg(test)]
mod tests {
    use crate::encoder::{pack, ArgType};

    #[test]
    fn builds_in_order() {
        let args = coff_args![string: "A", int32: 5, size: 1u64];
        assert_eq!(args.iter().map(|a| a.tag()).collect::<Vec<_>>(),
                   vec![ArgType::String, ArgType::Int32, ArgType::Size]);
        assert_eq!(pack(&args).unwrap().len(), 4 + 2 + 4 + 8);
        assert!(coff_args![].is_empty());
    }
}
