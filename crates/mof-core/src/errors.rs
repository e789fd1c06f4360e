//! Errores del motor. Sólo condiciones que invalidan el lote completo; los
//! fallos por registro viajan como `Outcome::EvaluationFailed`.

use mof_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreEngineError {
    #[error("worker pool size must be >= 1 (got {0})")] InvalidWorkerCount(usize),
    #[error("chunk size must be >= 1")] InvalidChunkSize,
    #[error("could not build worker pool: {0}")] WorkerPool(String),
    #[error("store: {0}")] Store(#[from] StoreError),
    #[error("expected {expected} outcomes, got {got}")] OutcomeCountMismatch { expected: usize, got: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(CoreEngineError::InvalidWorkerCount(0).to_string(), "worker pool size must be >= 1 (got 0)");
        assert_eq!(CoreEngineError::OutcomeCountMismatch { expected: 3, got: 2 }.to_string(),
                   "expected 3 outcomes, got 2");
    }

    #[test]
    fn test_from_store_error() {
        let err: CoreEngineError = StoreError::Config("x".into()).into();
        assert!(matches!(err, CoreEngineError::Store(_)));
    }
}
