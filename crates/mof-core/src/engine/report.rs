//! Resultado agregado de una corrida del motor.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::outcome::InvalidRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterStats {
    /// Índices en la lista (incluye repetidos).
    pub requested: usize,
    /// Registros encontrados en el store y enviados a evaluación.
    pub found: usize,
    pub missing: usize,
    pub duplicates: usize,
    pub valid: usize,
    pub invalid: usize,
    pub failed: usize,
    /// Fallos por etiqueta de `FailureReason`.
    pub failed_by_reason: BTreeMap<String, usize>,
}

impl fmt::Display for FilterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,
               "requested={} found={} missing={} duplicates={} valid={} invalid={} failed={}",
               self.requested, self.found, self.missing, self.duplicates, self.valid, self.invalid, self.failed)?;
        for (reason, n) in &self.failed_by_reason {
            write!(f, " {reason}={n}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterReport {
    /// Registros inválidos en orden de envío.
    pub invalid: Vec<InvalidRecord>,
    pub stats: FilterStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_display() {
        let mut stats = FilterStats { requested: 3, found: 2, missing: 1, failed: 1, valid: 1, ..Default::default() };
        stats.failed_by_reason.insert("decode".into(), 1);
        assert_eq!(stats.to_string(),
                   "requested=3 found=2 missing=1 duplicates=0 valid=1 invalid=0 failed=1 decode=1");
    }
}
