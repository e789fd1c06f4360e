//! Estructura periódica reconstruida a partir de especies, coordenadas
//! cartesianas y red.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{DomainError, Element, Lattice, MofRecord};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub element: Element,
    pub cartesian: [f64; 3],
    pub fractional: [f64; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    lattice: Lattice,
    sites: Vec<Site>,
}

impl Structure {
    /// # Errores
    /// `DomainError::ValidationError` si el número de especies no coincide con
    /// el de coordenadas o alguna coordenada no es finita.
    pub fn from_cartesian(lattice: Lattice, species: Vec<Element>, coords: &[[f64; 3]]) -> Result<Self, DomainError> {
        if species.len() != coords.len() {
            return Err(DomainError::ValidationError(format!("{} especies para {} coordenadas",
                                                            species.len(),
                                                            coords.len())));
        }
        let sites = species.into_iter()
                           .zip(coords.iter())
                           .map(|(element, cart)| {
                               if cart.iter().any(|v| !v.is_finite()) {
                                   return Err(DomainError::ValidationError("Coordenada no finita".to_string()));
                               }
                               Ok(Site { element,
                                         cartesian: *cart,
                                         fractional: lattice.to_fractional(*cart) })
                           })
                           .collect::<Result<Vec<_>, _>>()?;
        Ok(Structure { lattice, sites })
    }

    /// Reconstruye la estructura de un registro con las coordenadas dadas
    /// (ver `CoordinateSelection::select`).
    pub fn from_record(record: &MofRecord, coords: &[[f64; 3]]) -> Result<Self, DomainError> {
        Structure::from_cartesian(record.lattice()?, record.species()?, coords)
    }

    pub fn lattice(&self) -> &Lattice { &self.lattice }
    pub fn sites(&self) -> &[Site] { &self.sites }
    pub fn len(&self) -> usize { self.sites.len() }
    pub fn is_empty(&self) -> bool { self.sites.is_empty() }

    pub fn contains(&self, element: Element) -> bool { self.sites.iter().any(|s| s.element == element) }

    pub fn composition(&self) -> BTreeMap<Element, usize> {
        let mut counts = BTreeMap::new();
        for site in &self.sites {
            *counts.entry(site.element).or_insert(0) += 1;
        }
        counts
    }

    /// Fórmula en orden Hill: C, H y luego el resto alfabético.
    pub fn formula(&self) -> String {
        let comp = self.composition();
        let mut parts: Vec<(&'static str, usize)> = comp.iter().map(|(e, n)| (e.symbol(), *n)).collect();
        let has_carbon = comp.contains_key(&Element::CARBON);
        parts.sort_by(|(a, _), (b, _)| {
                 let rank = |s: &str| match (has_carbon, s) {
                     (true, "C") => 0,
                     (true, "H") => 1,
                     _ => 2,
                 };
                 rank(a).cmp(&rank(b)).then_with(|| a.cmp(b))
             });
        parts.into_iter()
             .map(|(sym, n)| if n == 1 { sym.to_string() } else { format!("{sym}{n}") })
             .collect()
    }

    /// Distancia mínima (Å) entre los sitios `i` y `j` considerando las 27
    /// imágenes periódicas vecinas.
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        let (fi, fj) = (self.sites[i].fractional, self.sites[j].fractional);
        // diferencia reducida a [-0.5, 0.5) antes de explorar imágenes
        let base = [0, 1, 2].map(|k| {
                                let d = fj[k] - fi[k];
                                d - d.round()
                            });
        let mut best = f64::INFINITY;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let frac = [base[0] + dx as f64, base[1] + dy as f64, base[2] + dz as f64];
                    let v = self.lattice.to_cartesian(frac);
                    let d = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
                    if d < best {
                        best = d;
                    }
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cubic(a: f64) -> Lattice { Lattice::from_matrix([[a, 0.0, 0.0], [0.0, a, 0.0], [0.0, 0.0, a]]).unwrap() }

    fn el(s: &str) -> Element { Element::from_symbol(s).unwrap() }

    #[test]
    fn test_species_coordinate_mismatch() {
        let err = Structure::from_cartesian(cubic(5.0), vec![el("C")], &[[0.0; 3], [1.0; 3]]).unwrap_err();
        assert_eq!(err.to_string(), "Error de validación: 1 especies para 2 coordenadas");
    }

    #[test]
    fn test_periodic_distance_uses_nearest_image() {
        let s = Structure::from_cartesian(cubic(10.0), vec![el("C"), el("O")], &[[0.5, 0.0, 0.0], [9.5, 0.0, 0.0]])
            .unwrap();
        assert!((s.distance(0, 1) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_formula_hill_order() {
        let s = Structure::from_cartesian(cubic(10.0),
                                          vec![el("Zn"), el("O"), el("H"), el("C"), el("C")],
                                          &[[0.0; 3], [1.0; 3], [2.0; 3], [3.0; 3], [4.0; 3]]).unwrap();
        assert_eq!(s.formula(), "C2HOZn");
        assert_eq!(s.composition()[&el("C")], 2);
        assert!(s.contains(Element::HYDROGEN));
    }
}
