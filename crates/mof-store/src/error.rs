//! Errores del adaptador de store.
//! Sólo condiciones que invalidan la corrida completa; una clave ausente no es
//! un error.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no se pudo abrir el store {path}: {reason}")]
    Open { path: PathBuf, reason: String },
    #[error("error leyendo la clave {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("configuración de store inválida: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_variant_format() {
        let err = StoreError::Open { path: PathBuf::from("/tmp/x.lmdb"), reason: "no existe".into() };
        assert_eq!(err.to_string(), "no se pudo abrir el store /tmp/x.lmdb: no existe");
    }

    #[test]
    fn test_read_variant_keeps_source() {
        let err = StoreError::Read { key: "12".into(), source: std::io::Error::other("disco") };
        assert_eq!(err.to_string(), "error leyendo la clave 12: disco");
        assert!(std::error::Error::source(&err).is_some());
    }
}
