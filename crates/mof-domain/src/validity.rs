//! Contrato del verificador de validez estructural.
//!
//! El verificador es un colaborador externo: recibe una `Structure` y devuelve
//! un payload de diagnóstico (JSON neutro) junto al veredicto booleano.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{DomainError, Structure};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckReport {
    pub diagnostics: Value,
    pub valid: bool,
}

/// Implementaciones deben ser puras respecto a la estructura recibida; se
/// invocan en paralelo desde varios hilos.
pub trait ValidityChecker: Send + Sync {
    fn name(&self) -> &str;

    fn check(&self, structure: &Structure) -> Result<CheckReport, DomainError>;
}

impl<T: ValidityChecker + ?Sized> ValidityChecker for std::sync::Arc<T> {
    fn name(&self) -> &str { (**self).name() }
    fn check(&self, structure: &Structure) -> Result<CheckReport, DomainError> { (**self).check(structure) }
}
