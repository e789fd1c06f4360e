//! GeometryChecker: heurísticas geométricas de sanidad para MOFs.
//!
//! - `has_carbon` / `has_metal`: un MOF necesita enlazante orgánico y nodo
//!   metálico.
//! - `has_atomic_overlaps`: par de átomos a distancia menor que
//!   `overlap_scale · (r_i + r_j)`.
//! - `has_overcoordinated_c`: carbono con más de `max_carbon_bonds` vecinos a
//!   distancia menor que `bond_scale · (r_i + r_j)`.
//!
//! `has_hydrogen` se reporta pero no decide el veredicto.
use mof_domain::{CheckReport, DomainError, Element, Structure, ValidityChecker};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::EngineError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckerParams {
    pub overlap_scale: f64,
    pub bond_scale: f64,
    pub max_carbon_bonds: usize,
}

impl Default for CheckerParams {
    fn default() -> Self {
        Self { overlap_scale: 0.5,
               bond_scale: 1.2,
               max_carbon_bonds: 4 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GeometryChecker {
    params: CheckerParams,
}

impl GeometryChecker {
    pub fn new() -> Self { Self::default() }

    pub fn with_params(params: CheckerParams) -> Result<Self, EngineError> {
        if !(params.overlap_scale > 0.0 && params.bond_scale > params.overlap_scale) {
            return Err(EngineError::InvalidParams(format!("se requiere 0 < overlap_scale ({}) < bond_scale ({})",
                                                          params.overlap_scale,
                                                          params.bond_scale)));
        }
        Ok(Self { params })
    }

    pub fn params(&self) -> &CheckerParams { &self.params }
}

impl ValidityChecker for GeometryChecker {
    fn name(&self) -> &str { "geometry" }

    fn check(&self, structure: &Structure) -> Result<CheckReport, DomainError> {
        if structure.is_empty() {
            return Err(EngineError::EmptyStructure.into());
        }
        let sites = structure.sites();
        let n = sites.len();
        let radii: Vec<f64> = sites.iter().map(|s| s.element.covalent_radius()).collect();

        let mut min_distance = f64::INFINITY;
        let mut overlapping_pairs = 0usize;
        let mut bonds = vec![0usize; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = structure.distance(i, j);
                min_distance = min_distance.min(d);
                let radius_sum = radii[i] + radii[j];
                if d < self.params.overlap_scale * radius_sum {
                    overlapping_pairs += 1;
                }
                if d < self.params.bond_scale * radius_sum {
                    bonds[i] += 1;
                    bonds[j] += 1;
                }
            }
        }

        let overcoordinated_c = sites.iter()
                                     .zip(bonds.iter())
                                     .filter(|(s, b)| s.element == Element::CARBON && **b > self.params.max_carbon_bonds)
                                     .count();
        let has_carbon = structure.contains(Element::CARBON);
        let has_hydrogen = structure.contains(Element::HYDROGEN);
        let has_metal = sites.iter().any(|s| s.element.is_metal());
        let has_atomic_overlaps = overlapping_pairs > 0;
        let has_overcoordinated_c = overcoordinated_c > 0;

        let valid = has_carbon && has_metal && !has_atomic_overlaps && !has_overcoordinated_c;
        let diagnostics = json!({
            "has_carbon": has_carbon,
            "has_hydrogen": has_hydrogen,
            "has_metal": has_metal,
            "has_atomic_overlaps": has_atomic_overlaps,
            "has_overcoordinated_c": has_overcoordinated_c,
            "overlapping_pairs": overlapping_pairs,
            "overcoordinated_c": overcoordinated_c,
            "min_distance": if min_distance.is_finite() { json!(min_distance) } else { json!(null) },
            "num_atoms": n,
            "formula": structure.formula(),
            "volume": structure.lattice().volume(),
        });
        Ok(CheckReport { diagnostics, valid })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mof_domain::Lattice;

    fn el(s: &str) -> Element { Element::from_symbol(s).unwrap() }

    fn build(symbols: &[&str], coords: &[[f64; 3]]) -> Structure {
        let lattice = Lattice::from_matrix([[12.0, 0.0, 0.0], [0.0, 12.0, 0.0], [0.0, 0.0, 12.0]]).unwrap();
        Structure::from_cartesian(lattice, symbols.iter().map(|s| el(s)).collect(), coords).unwrap()
    }

    #[test]
    fn test_plausible_fragment_is_valid() {
        // Zn-O-C-H con distancias de enlace razonables
        let s = build(&["Zn", "O", "C", "H"],
                      &[[0.0, 0.0, 0.0], [1.95, 0.0, 0.0], [3.2, 0.0, 0.0], [4.28, 0.0, 0.0]]);
        let report = GeometryChecker::new().check(&s).unwrap();
        assert!(report.valid, "diagnostics: {}", report.diagnostics);
        assert_eq!(report.diagnostics["has_atomic_overlaps"], json!(false));
        assert_eq!(report.diagnostics["formula"], json!("CHOZn"));
    }

    #[test]
    fn test_overlapping_atoms_invalid() {
        let s = build(&["Zn", "C", "O"], &[[0.0, 0.0, 0.0], [3.0, 0.0, 0.0], [3.2, 0.0, 0.0]]);
        let report = GeometryChecker::new().check(&s).unwrap();
        assert!(!report.valid);
        assert_eq!(report.diagnostics["has_atomic_overlaps"], json!(true));
        assert_eq!(report.diagnostics["overlapping_pairs"], json!(1));
    }

    #[test]
    fn test_missing_metal_invalid() {
        let s = build(&["C", "O"], &[[0.0, 0.0, 0.0], [1.3, 0.0, 0.0]]);
        let report = GeometryChecker::new().check(&s).unwrap();
        assert!(!report.valid);
        assert_eq!(report.diagnostics["has_metal"], json!(false));
    }

    #[test]
    fn test_overcoordinated_carbon_invalid() {
        // C central con 5 hidrógenos a 1.09 Å
        let s = build(&["Cu", "C", "H", "H", "H", "H", "H"],
                      &[[8.0, 8.0, 8.0],
                        [4.0, 4.0, 4.0],
                        [5.09, 4.0, 4.0],
                        [2.91, 4.0, 4.0],
                        [4.0, 5.09, 4.0],
                        [4.0, 2.91, 4.0],
                        [4.0, 4.0, 5.09]]);
        let report = GeometryChecker::new().check(&s).unwrap();
        assert!(!report.valid);
        assert_eq!(report.diagnostics["has_overcoordinated_c"], json!(true));
        assert_eq!(report.diagnostics["has_atomic_overlaps"], json!(false));
    }

    #[test]
    fn test_empty_structure_is_error() {
        let s = build(&[], &[]);
        assert!(GeometryChecker::new().check(&s).is_err());
    }

    #[test]
    fn test_invalid_params_rejected() {
        let p = CheckerParams { overlap_scale: 1.5, bond_scale: 1.2, max_carbon_bonds: 4 };
        assert!(GeometryChecker::with_params(p).is_err());
    }
}
