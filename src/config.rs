//! Configuración de la corrida.
//!
//! Fuentes, de menor a mayor precedencia: valores por defecto, archivo JSON
//! opcional, variables de entorno (`MOFCHECK_*`, con `.env` cargado vía
//! dotenvy) y flags de la CLI. Cada fuente produce un `PartialConfig`; la
//! mezcla se resuelve una vez en `AppConfig`.
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use mof_core::constants::DEFAULT_CHUNK_SIZE;
use mof_domain::CoordinateSelection;
use mof_store::{init_dotenv, StoreConfig};

use crate::CoreError;

/// Ronda de emparejamiento del store `MetalOxo_matched_<split>_<ronda>`.
pub const DEFAULT_MATCHED_ROUND: u32 = 3;

pub const SPLIT_DIR_VAR: &str = "MOFCHECK_SPLIT_DIR";
pub const DATA_DIR_VAR: &str = "MOFCHECK_DATA_DIR";
pub const NUM_CPUS_VAR: &str = "MOFCHECK_NUM_CPUS";
pub const MODE_VAR: &str = "MOFCHECK_MODE";
pub const MATCHED_ROUND_VAR: &str = "MOFCHECK_MATCHED_ROUND";
pub const CHUNK_SIZE_VAR: &str = "MOFCHECK_CHUNK_SIZE";

/// Configuración resuelta e inmutable de una corrida.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directorio que contiene los stores de registros.
    pub lmdb_dir: PathBuf,
    /// Directorio con los archivos `<split>_split.txt`.
    pub split_dir: PathBuf,
    /// Directorio de salida.
    pub data_dir: PathBuf,
    /// Tamaño del pool de workers.
    pub num_cpus: usize,
    pub mode: CoordinateSelection,
    pub matched_round: u32,
    pub chunk_size: usize,
}

impl AppConfig {
    pub fn split_file(&self, split: &str) -> PathBuf { self.split_dir.join(format!("{split}_split.txt")) }

    /// Nombre del store según el modo: `MetalOxo_feats_<split>.lmdb` o
    /// `MetalOxo_matched_<split>_<ronda>.lmdb`.
    pub fn store_name(&self, split: &str) -> String {
        match self.mode {
            CoordinateSelection::GroundTruth => format!("MetalOxo_feats_{split}.lmdb"),
            CoordinateSelection::Matched => format!("MetalOxo_matched_{split}_{}.lmdb", self.matched_round),
        }
    }

    pub fn store_path(&self, split: &str) -> PathBuf {
        StoreConfig { lmdb_dir: self.lmdb_dir.clone() }.store_path(&self.store_name(split))
    }
}

/// Configuración parcial de una sola fuente.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    pub lmdb_dir: Option<PathBuf>,
    pub split_dir: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub num_cpus: Option<usize>,
    pub mode: Option<CoordinateSelection>,
    pub matched_round: Option<u32>,
    pub chunk_size: Option<usize>,
}

// Rutas: `var_os` acepta valores que no son UTF-8.
fn path_var(name: &str) -> Option<PathBuf> { env::var_os(name).filter(|v| !v.is_empty()).map(PathBuf::from) }

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>, CoreError> {
    match env::var(name) {
        Ok(raw) => raw.trim()
                      .parse::<T>()
                      .map(Some)
                      .map_err(|_| CoreError::Config(format!("{name}: valor inválido '{raw}'"))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(raw)) => Err(CoreError::Config(format!("{name}: valor no UTF-8 {raw:?}"))),
    }
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self, CoreError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CoreError::Config(format!("no se pudo leer {}: {e}", path.display())))?;
        serde_json::from_str(&text).map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))
    }

    pub fn from_env() -> Result<Self, CoreError> {
        init_dotenv();
        Ok(Self { lmdb_dir: StoreConfig::from_env().ok().map(|c| c.lmdb_dir),
                  split_dir: path_var(SPLIT_DIR_VAR),
                  data_dir: path_var(DATA_DIR_VAR),
                  num_cpus: parse_var(NUM_CPUS_VAR)?,
                  mode: parse_var(MODE_VAR)?,
                  matched_round: parse_var(MATCHED_ROUND_VAR)?,
                  chunk_size: parse_var(CHUNK_SIZE_VAR)? })
    }

    /// Mezcla: los valores presentes en `higher` ganan.
    pub fn merge(self, higher: PartialConfig) -> PartialConfig {
        PartialConfig { lmdb_dir: higher.lmdb_dir.or(self.lmdb_dir),
                        split_dir: higher.split_dir.or(self.split_dir),
                        data_dir: higher.data_dir.or(self.data_dir),
                        num_cpus: higher.num_cpus.or(self.num_cpus),
                        mode: higher.mode.or(self.mode),
                        matched_round: higher.matched_round.or(self.matched_round),
                        chunk_size: higher.chunk_size.or(self.chunk_size) }
    }

    pub fn resolve(self) -> Result<AppConfig, CoreError> {
        let required = |value: Option<PathBuf>, name: &str| {
            value.ok_or_else(|| CoreError::Config(format!("falta `{name}`")))
        };
        let num_cpus = match self.num_cpus {
            Some(0) => return Err(CoreError::Config("`num_cpus` debe ser >= 1".to_string())),
            Some(n) => n,
            None => std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
        };
        let chunk_size = match self.chunk_size {
            Some(0) => return Err(CoreError::Config("`chunk_size` debe ser >= 1".to_string())),
            Some(n) => n,
            None => DEFAULT_CHUNK_SIZE,
        };
        Ok(AppConfig { lmdb_dir: required(self.lmdb_dir, "lmdb_dir")?,
                       split_dir: required(self.split_dir, "split_dir")?,
                       data_dir: required(self.data_dir, "data_dir")?,
                       num_cpus,
                       mode: self.mode.unwrap_or_default(),
                       matched_round: self.matched_round.unwrap_or(DEFAULT_MATCHED_ROUND),
                       chunk_size })
    }
}
