//! Evaluación de un registro individual.
//!
//! `RecordEvaluator` es el contrato que el motor reparte entre workers: una
//! clave y sus bytes entran, un `Outcome` sale. No hay estado compartido entre
//! evaluaciones.
use mof_domain::{CheckReport, CoordinateSelection, MofRecord, Structure, ValidityChecker};

use crate::outcome::{FailureReason, Outcome};

pub trait RecordEvaluator: Send + Sync {
    fn evaluate(&self, key: u64, raw: &[u8]) -> Outcome;
}

impl<F> RecordEvaluator for F where F: Fn(u64, &[u8]) -> Outcome + Send + Sync
{
    fn evaluate(&self, key: u64, raw: &[u8]) -> Outcome { self(key, raw) }
}

/// Evaluador de registros MOF: decodifica, selecciona coordenadas según el
/// modo, reconstruye la estructura y consulta al verificador.
pub struct MofEvaluator<C> {
    checker: C,
    selection: CoordinateSelection,
}

impl<C: ValidityChecker> MofEvaluator<C> {
    pub fn new(checker: C, selection: CoordinateSelection) -> Self { Self { checker, selection } }

    pub fn selection(&self) -> CoordinateSelection { self.selection }
    pub fn checker(&self) -> &C { &self.checker }

    fn check(&self, raw: &[u8]) -> Result<CheckReport, FailureReason> {
        let record = MofRecord::from_bytes(raw).map_err(|e| FailureReason::Decode(e.to_string()))?;
        let coords = self.selection.select(&record)?;
        let structure = Structure::from_record(&record, coords).map_err(|e| FailureReason::Structure(e.to_string()))?;
        self.checker.check(&structure).map_err(|e| FailureReason::Checker(e.to_string()))
    }
}

impl<C: ValidityChecker> RecordEvaluator for MofEvaluator<C> {
    fn evaluate(&self, _key: u64, raw: &[u8]) -> Outcome {
        match self.check(raw) {
            Ok(report) if report.valid => Outcome::Valid,
            Ok(report) => Outcome::Invalid { diagnostics: report.diagnostics,
                                             record: raw.to_vec() },
            Err(reason) => Outcome::EvaluationFailed(reason),
        }
    }
}
