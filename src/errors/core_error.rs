use mof_core::CoreEngineError;
use mof_store::StoreError;
use thiserror::Error;

/// Errores que abortan una corrida completa. Los fallos por registro nunca
/// llegan aquí.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error de preparación: {0}")]
    Setup(String),
    #[error("Error de store: {0}")]
    Store(#[from] StoreError),
    #[error("Error del motor: {0}")]
    Engine(#[from] CoreEngineError),
    #[error("Error de escritura: {0}")]
    Write(String),
}

impl CoreError {
    /// Código de salida del binario: 1 configuración, 2 preparación/store,
    /// 3 escritura.
    pub fn exit_code(&self) -> u8 {
        match self {
            CoreError::Config(_)
            | CoreError::Engine(CoreEngineError::InvalidWorkerCount(_))
            | CoreError::Engine(CoreEngineError::InvalidChunkSize) => 1,
            CoreError::Setup(_) | CoreError::Store(_) | CoreError::Engine(_) => 2,
            CoreError::Write(_) => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn test_config_variant_format() {
        let err = CoreError::Config("mala configuración".into());
        assert_eq!(err.to_string(), "Error de configuración: mala configuración");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_write_variant_format() {
        let err = CoreError::Write("disco lleno".into());
        assert_eq!(err.to_string(), "Error de escritura: disco lleno");
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_engine_exit_codes() {
        assert_eq!(CoreError::from(CoreEngineError::InvalidWorkerCount(0)).exit_code(), 1);
        assert_eq!(CoreError::from(CoreEngineError::WorkerPool("x".into())).exit_code(), 2);
        assert_eq!(CoreError::from(StoreError::Config("x".into())).exit_code(), 2);
    }
}
