//! mofcheck: filtra los registros MOF de uno o más splits y escribe los que
//! fallan la verificación estructural.
//!
//! ```text
//! mofcheck [--config FILE] [--lmdb-dir D] [--split-dir D] [--data-dir D]
//!          [--num-cpus N] [--mode ground-truth|matched] [--matched-round N]
//!          [--chunk-size N] [--log-level L] [SPLIT...]
//! ```
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mof_domain::CoordinateSelection;
use mof_engine::GeometryChecker;
use mofcheck::config::PartialConfig;
use mofcheck::logging::init_logging;
use mofcheck::runtime::{configure_threading, ThreadingConfig};
use mofcheck::{CoreError, MofChecker};

#[derive(Parser, Debug)]
#[command(name = "mofcheck",
          about = "Filtro por lotes de estructuras MOF inválidas",
          long_about = "
Lee los índices de <split_dir>/<split>_split.txt, evalúa cada registro del store
del modo elegido y escribe los inválidos en <data_dir>/invalid_mofs[_matched]_<split>.json.

VARIABLES DE ENTORNO (también desde .env):
  MOFCHECK_LMDB_DIR  MOFCHECK_SPLIT_DIR  MOFCHECK_DATA_DIR  MOFCHECK_NUM_CPUS
  MOFCHECK_MODE  MOFCHECK_MATCHED_ROUND  MOFCHECK_CHUNK_SIZE  RUST_LOG
",
          version)]
struct Cli {
    /// Archivo de configuración JSON
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directorio de los stores
    #[arg(long)]
    lmdb_dir: Option<PathBuf>,
    /// Directorio de las listas de índices
    #[arg(long)]
    split_dir: Option<PathBuf>,
    /// Directorio de salida
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Número de workers (por defecto: paralelismo disponible)
    #[arg(long)]
    num_cpus: Option<usize>,
    /// ground-truth | matched
    #[arg(long)]
    mode: Option<CoordinateSelection>,
    #[arg(long)]
    matched_round: Option<u32>,
    #[arg(long)]
    chunk_size: Option<usize>,
    #[arg(long, default_value = "info")]
    log_level: String,
    /// Splits a procesar
    #[arg(default_values_t = [String::from("val")])]
    splits: Vec<String>,
}

impl Cli {
    fn overrides(&self) -> PartialConfig {
        PartialConfig { lmdb_dir: self.lmdb_dir.clone(),
                        split_dir: self.split_dir.clone(),
                        data_dir: self.data_dir.clone(),
                        num_cpus: self.num_cpus,
                        mode: self.mode,
                        matched_round: self.matched_round,
                        chunk_size: self.chunk_size }
    }
}

fn run(cli: &Cli) -> Result<(), CoreError> {
    let file = match &cli.config {
        Some(path) => PartialConfig::from_file(path)?,
        None => PartialConfig::default(),
    };
    let config = file.merge(PartialConfig::from_env()?).merge(cli.overrides()).resolve()?;
    configure_threading(ThreadingConfig::default())?;

    let checker = MofChecker::new(config, GeometryChecker::new());
    for split in &cli.splits {
        let summary = checker.process(split)?;
        log::info!("{} -> {} ({} inválidos)",
                   summary.split,
                   summary.artifact.path.display(),
                   summary.artifact.entries);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(&cli.log_level) {
        eprintln!("{e}");
        return ExitCode::from(e.exit_code());
    }
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
