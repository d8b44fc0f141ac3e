use std::path::PathBuf;

/// Ruta del object file de `name` para `arch`, según `template`
/// (`{name}` y `{arch}` se reemplazan literalmente).
pub fn object_file_path(template: &str, name: &str, arch: &str) -> PathBuf {
    PathBuf::from(template.replace("{name}", name).replace("{arch}", arch))
}
