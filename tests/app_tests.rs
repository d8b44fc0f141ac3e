use std::path::Path;

use forge_core::encoder::DecodedArgument;
use forgescript::app::{clean, raw_task};
use forgescript::{AppError, Forge, ForgeConfig};

fn config(root: &Path) -> ForgeConfig {
    ForgeConfig::from_lookup(|key| match key {
                                 "FORGESCRIPT_RUNTIME_DIR" => Some(root.join("run").display().to_string()),
                                 "FORGESCRIPT_CACHE_DIR" => Some(root.join("cache").display().to_string()),
                                 _ => None,
                             })
}

fn install_bof(cfg: &ForgeConfig, name: &str, arch: &str) {
    let dir = cfg.bin_root.join("bin");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(format!("{name}.{arch}.o")), b"obj").unwrap();
}

#[test]
fn resolve_from_runtime_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = config(tmp.path());
    install_bof(&cfg, "nslookup", "x64");

    let forge = Forge::new(&cfg).unwrap();
    let cmd = forge.resolve("sa-nslookup", raw_task("x64", r#"{"domain": "corp.local", "type": "MX"}"#).unwrap())
                   .unwrap();
    let json = cmd.to_json();
    assert_eq!(json["name"], "execute_coff");
    assert_eq!(json["args"]["coff_arguments"][2], serde_json::json!(["int16", 15]));

    let decoded = forge.inspect("sa-nslookup", raw_task("x64", r#"{"domain": "corp.local"}"#).unwrap())
                       .unwrap();
    assert_eq!(decoded,
               vec![DecodedArgument::String("corp.local".into()),
                    DecodedArgument::String(String::new()),
                    DecodedArgument::Int16(1)]);
}

#[test]
fn errors_carry_exit_codes() {
    let tmp = tempfile::tempdir().unwrap();
    let forge = Forge::new(&config(tmp.path())).unwrap();

    let err = forge.resolve("sa-nope", raw_task("x64", "{}").unwrap()).unwrap_err();
    assert_eq!(err.exit_code(), 3);

    let err = forge.resolve("sa-whoami", raw_task("x86", "{}").unwrap()).unwrap_err();
    assert_eq!(err.exit_code(), 4);
    assert!(err.to_string().contains("unsupported architecture 'x86'"), "{err}");

    assert!(matches!(raw_task("x64", "[1]"), Err(AppError::Config(_))));
    assert!(matches!(raw_task("x64", "{"), Err(AppError::Json(_))));
}

#[test]
fn clean_removes_managed_dirs() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = config(tmp.path());
    cfg.ensure_dirs().unwrap();
    assert!(cfg.runtime_dir.ends_with("run/forgescript"));

    let removed = clean(&cfg).unwrap();
    assert_eq!(removed, vec![cfg.runtime_dir.clone(), cfg.cache_dir.clone()]);
    assert!(!cfg.runtime_dir.exists());
    assert!(clean(&cfg).unwrap().is_empty());
}

#[test]
fn aliases_export_specs() {
    let tmp = tempfile::tempdir().unwrap();
    let forge = Forge::new(&config(tmp.path())).unwrap();
    let names: Vec<String> = forge.command_specs().into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["sa-whoami", "sa-nslookup", "sa-ldapsearch", "sa-wmi_query", "forgescript_whoami"]);
}

#[test]
fn binary_creates_dirs_before_resolving() {
    let tmp = tempfile::tempdir().unwrap();
    let out = std::process::Command::new(env!("CARGO_BIN_EXE_forgescript"))
        .arg("--runtime-dir")
        .arg(tmp.path().join("run"))
        .arg("aliases")
        .env("FORGESCRIPT_CACHE_DIR", tmp.path().join("cache"))
        .env_remove("FORGESCRIPT_BIN_ROOT")
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).contains("sa-nslookup"));
    assert!(tmp.path().join("run/forgescript").is_dir());
    assert!(tmp.path().join("cache/forgescript").is_dir());
}
