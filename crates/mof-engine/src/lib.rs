use thiserror::Error;
pub mod geometry;
pub use geometry::{CheckerParams, GeometryChecker};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Estructura vacía: no hay átomos que verificar")]
    EmptyStructure,
    #[error("Parámetros de verificación inválidos: {0}")]
    InvalidParams(String),
}

impl From<EngineError> for mof_domain::DomainError {
    fn from(e: EngineError) -> Self {
        mof_domain::DomainError::ValidationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn test_engine_error_into_domain_error() {
        let d: mof_domain::DomainError = EngineError::EmptyStructure.into();
        assert_eq!(d.to_string(), "Error de validación: Estructura vacía: no hay átomos que verificar");
    }
}
