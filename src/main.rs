use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use forgescript::app::{clean, raw_task};
use forgescript::{AppError, Forge, ForgeConfig};

/// Aliases parametrizados para object files.
#[derive(Debug, Parser)]
#[command(name = "forgescript", version)]
struct Cli {
    /// Directorio de runtime (se le agrega `forgescript` si hace falta).
    #[arg(long, global = true)]
    runtime_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Borra los directorios de runtime y cache.
    Clean,
    /// Imprime el command spec de cada alias incluido.
    Aliases,
    /// Resuelve un alias e imprime el comando resultante.
    Resolve(TaskArgs),
    /// Resuelve un alias y decodifica el buffer empaquetado.
    Inspect(TaskArgs),
    /// Versión y commit del core.
    Info,
}

#[derive(Debug, clap::Args)]
struct TaskArgs {
    alias: String,
    #[arg(long, default_value = "x64")]
    arch: String,
    /// Argumentos como objeto JSON.
    #[arg(long, default_value = "{}")]
    args: String,
    /// Raíz de los object files (default: FORGESCRIPT_BIN_ROOT o el runtime dir).
    #[arg(long)]
    bin_root: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[forgescript] {e}");
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = ForgeConfig::from_env();
    if let Some(dir) = cli.runtime_dir {
        config = config.with_runtime_dir(dir);
    }

    match cli.command {
        Command::Clean => {
            for dir in clean(&config)? {
                println!("removed {}", dir.display());
            }
        }
        Command::Info => println!("{}", forge_core::description_metadata()),
        Command::Aliases => {
            config.ensure_dirs()?;
            let forge = Forge::new(&config)?;
            println!("{}", serde_json::to_string_pretty(&forge.command_specs())?);
        }
        Command::Resolve(task) => {
            let config = with_bin_root(config, task.bin_root);
            config.ensure_dirs()?;
            let forge = Forge::new(&config)?;
            let command = forge.resolve(&task.alias, raw_task(&task.arch, &task.args)?)?;
            println!("{}", serde_json::to_string_pretty(&command.to_json())?);
        }
        Command::Inspect(task) => {
            let config = with_bin_root(config, task.bin_root);
            config.ensure_dirs()?;
            let forge = Forge::new(&config)?;
            let decoded = forge.inspect(&task.alias, raw_task(&task.arch, &task.args)?)?;
            println!("{}", serde_json::to_string_pretty(&decoded)?);
        }
    }
    Ok(())
}

fn with_bin_root(config: ForgeConfig, bin_root: Option<PathBuf>) -> ForgeConfig {
    match bin_root {
        Some(root) => config.with_bin_root(root),
        None => config,
    }
}
