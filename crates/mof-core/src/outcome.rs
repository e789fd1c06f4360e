//! Resultado de evaluar un registro.
use mof_domain::SelectionError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Resultado etiquetado por clave. Sólo `Invalid` sobrevive a la agregación.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Valid,
    /// Diagnóstico del verificador y bytes originales del registro.
    Invalid { diagnostics: Value, record: Vec<u8> },
    /// No se pudo determinar la validez; el registro se descarta.
    EvaluationFailed(FailureReason),
}

impl Outcome {
    pub fn is_invalid(&self) -> bool { matches!(self, Outcome::Invalid { .. }) }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    Decode(String),
    /// Modo emparejado sin `rmsd` terminal: todavía no hubo intento.
    NotMatched,
    MissingCoordinates(String),
    Structure(String),
    Checker(String),
    Panicked(String),
}

impl FailureReason {
    pub fn label(&self) -> &'static str {
        match self {
            FailureReason::Decode(_) => "decode",
            FailureReason::NotMatched => "not_matched",
            FailureReason::MissingCoordinates(_) => "missing_coordinates",
            FailureReason::Structure(_) => "structure",
            FailureReason::Checker(_) => "checker",
            FailureReason::Panicked(_) => "panicked",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::NotMatched => f.write_str("not_matched"),
            FailureReason::Decode(m)
            | FailureReason::MissingCoordinates(m)
            | FailureReason::Structure(m)
            | FailureReason::Checker(m)
            | FailureReason::Panicked(m) => write!(f, "{}: {}", self.label(), m),
        }
    }
}

impl From<SelectionError> for FailureReason {
    fn from(e: SelectionError) -> Self {
        match e {
            SelectionError::NotMatched => FailureReason::NotMatched,
            SelectionError::MissingCoordinates(field) => FailureReason::MissingCoordinates(field.to_string()),
        }
    }
}

/// Entrada del conjunto filtrado.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidRecord {
    pub key: u64,
    pub diagnostics: Value,
    pub record: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_reason_display() {
        assert_eq!(FailureReason::NotMatched.to_string(), "not_matched");
        assert_eq!(FailureReason::Decode("eof".into()).to_string(), "decode: eof");
    }

    #[test]
    fn test_selection_error_conversion() {
        let r: FailureReason = SelectionError::MissingCoordinates("gt_coords").into();
        assert_eq!(r, FailureReason::MissingCoordinates("gt_coords".into()));
        assert_eq!(FailureReason::from(SelectionError::NotMatched), FailureReason::NotMatched);
    }
}
