//! Carga de la ubicación del store desde variables de entorno.
//! Usa convención `MOFCHECK_LMDB_DIR`.

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

use crate::StoreError;

pub const LMDB_DIR_VAR: &str = "MOFCHECK_LMDB_DIR";

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub lmdb_dir: PathBuf,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, StoreError> {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        let lmdb_dir = env::var_os(LMDB_DIR_VAR).ok_or_else(|| StoreError::Config(format!("{LMDB_DIR_VAR} no definido")))?;
        Ok(Self { lmdb_dir: PathBuf::from(lmdb_dir) })
    }

    /// Ruta del store `<lmdb_dir>/<name>`.
    pub fn store_path(&self, name: &str) -> PathBuf { self.lmdb_dir.join(name) }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() { Lazy::force(&DOTENV_LOADED); }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_path_joins_name() {
        let cfg = StoreConfig { lmdb_dir: PathBuf::from("/data/lmdb") };
        assert_eq!(cfg.store_path("MetalOxo_feats_val.lmdb"), PathBuf::from("/data/lmdb/MetalOxo_feats_val.lmdb"));
    }
}
