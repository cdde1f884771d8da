//! Command-line front end.
//!
//! Holds no state of its own beyond the parsed arguments: every command
//! builds the store/generator from configuration and calls straight into
//! the library.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::generators::{AvisoGenerator, NoticeError, PdfRenderEngine};
use crate::reasons::ReasonStore;

#[derive(Parser, Debug)]
#[command(name = "avisos", version, about = "Generador de avisos de crédito con código QR.")]
pub struct Cli {
    /// Archivo JSON de motivos (sobrescribe AVISOS_MOTIVOS_FILE).
    #[arg(long, global = true)]
    pub motivos: Option<PathBuf>,
    /// Carpeta de salida (sobrescribe AVISOS_OUTPUT_DIR).
    #[arg(long, global = true)]
    pub salida: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lista los motivos disponibles.
    Motivos,
    /// Agrega un motivo nuevo.
    Agregar {
        #[arg(long)]
        titulo: String,
        /// Texto que saldrá al escanear el código.
        #[arg(long)]
        detalle: String,
    },
    /// Borra el motivo con ese título exacto.
    Borrar { titulo: String },
    /// Genera el aviso en PDF.
    Generar {
        #[arg(long)]
        cliente: String,
        #[arg(long)]
        motivo: String,
        /// Abre la carpeta de salida al terminar.
        #[arg(long)]
        abrir: bool,
    },
}

impl Cli {
    /// Environment configuration with command-line overrides applied.
    pub fn config(&self) -> AppConfig {
        let mut config = AppConfig::from_env();
        if let Some(path) = &self.motivos {
            config.motivos_file = path.clone();
        }
        if let Some(dir) = &self.salida {
            config.output_dir = dir.clone();
        }
        config
    }
}

/// Execute a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let config = cli.config();
    let store = ReasonStore::new(&config.motivos_file);

    match cli.command {
        Commands::Motivos => {
            for (i, title) in store.titles().map_err(report)?.iter().enumerate() {
                println!("{}. {}", i + 1, title);
            }
        }
        Commands::Agregar { titulo, detalle } => {
            if store.add(&titulo, &detalle).map_err(report)? {
                println!("Motivo agregado: {}", titulo.trim());
            } else {
                println!("No se agregó el motivo (vacío o ya existente).");
            }
        }
        Commands::Borrar { titulo } => {
            let removed = store.remove(&titulo).map_err(report)?;
            if removed > 0 {
                println!("Motivo eliminado.");
            } else {
                println!("No existe un motivo con ese título.");
            }
        }
        Commands::Generar {
            cliente,
            motivo,
            abrir,
        } => {
            let generator = AvisoGenerator::new(
                store,
                &config.output_dir,
                PdfRenderEngine::new(config.ciudad.clone()),
            );
            let notice = generator.generate(&cliente, &motivo).map_err(report)?;

            if let Some(warning) = &notice.degraded {
                eprintln!("Advertencia [{}]: {}", warning.category(), warning);
            }
            println!("Se ha creado el archivo exitosamente:");
            println!("{}", notice.path.display());

            if abrir {
                open_folder(&config.output_dir)
                    .with_context(|| format!("no se pudo abrir {}", config.output_dir.display()))?;
            }
        }
    }

    Ok(())
}

/// Tag an error with its category so the clerk sees what kind of failure it was.
fn report(err: NoticeError) -> anyhow::Error {
    anyhow::anyhow!("[{}] {}", err.category(), err)
}

/// Open a folder in the platform file manager.
pub fn open_folder(dir: &Path) -> std::io::Result<()> {
    let opener = if cfg!(target_os = "windows") {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };
    log::debug!("Opening {} with {}", dir.display(), opener);
    Command::new(opener).arg(dir).spawn().map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generar() {
        let cli = Cli::try_parse_from([
            "avisos",
            "generar",
            "--cliente",
            "Ana Ruiz",
            "--motivo",
            "Firma no coincide",
            "--abrir",
        ])
        .unwrap();
        match cli.command {
            Commands::Generar {
                cliente,
                motivo,
                abrir,
            } => {
                assert_eq!(cliente, "Ana Ruiz");
                assert_eq!(motivo, "Firma no coincide");
                assert!(abrir);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_path_overrides_apply() {
        let cli = Cli::try_parse_from([
            "avisos",
            "--motivos",
            "/tmp/m.json",
            "motivos",
            "--salida",
            "/tmp/salida",
        ])
        .unwrap();
        let config = cli.config();
        assert_eq!(config.motivos_file, PathBuf::from("/tmp/m.json"));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/salida"));
    }

    #[test]
    fn test_report_tags_category() {
        let err = report(NoticeError::UnknownReason("X".into()));
        assert!(err.to_string().starts_with("[LookupError]"));
    }
}
