//! Geometría de la celda unidad.
//!
//! Convención: las filas de `matrix` son los vectores de red `a`, `b`, `c` en
//! Å, y las coordenadas se tratan como vectores fila
//! (`cart = frac · M`, `frac = cart · M⁻¹`).
use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Volumen mínimo (Å³) para considerar una celda no degenerada.
pub const MIN_CELL_VOLUME: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[[f64; 3]; 3]", into = "[[f64; 3]; 3]")]
pub struct Lattice {
    matrix: [[f64; 3]; 3],
    // columnas de la inversa, precalculadas
    inverse_cols: [[f64; 3]; 3],
}

fn cross(u: [f64; 3], v: [f64; 3]) -> [f64; 3] {
    [u[1] * v[2] - u[2] * v[1], u[2] * v[0] - u[0] * v[2], u[0] * v[1] - u[1] * v[0]]
}

fn dot(u: [f64; 3], v: [f64; 3]) -> f64 { u[0] * v[0] + u[1] * v[1] + u[2] * v[2] }

impl Lattice {
    /// Construye la red a partir de tres vectores fila.
    ///
    /// # Errores
    /// `DomainError::ValidationError` si hay valores no finitos o el volumen
    /// es (casi) nulo.
    pub fn from_matrix(matrix: [[f64; 3]; 3]) -> Result<Self, DomainError> {
        if matrix.iter().flatten().any(|v| !v.is_finite()) {
            return Err(DomainError::ValidationError("La celda contiene valores no finitos".to_string()));
        }
        let [r0, r1, r2] = matrix;
        let det = dot(r0, cross(r1, r2));
        if det.abs() < MIN_CELL_VOLUME {
            return Err(DomainError::ValidationError(format!("Celda degenerada (volumen {det:.3e})")));
        }
        let scale = |v: [f64; 3]| [v[0] / det, v[1] / det, v[2] / det];
        let inverse_cols = [scale(cross(r1, r2)), scale(cross(r2, r0)), scale(cross(r0, r1))];
        Ok(Lattice { matrix, inverse_cols })
    }

    /// Construye la red desde parámetros `(a, b, c, alpha, beta, gamma)`
    /// (Å y grados). `a` queda sobre el eje x y `b` en el plano xy.
    pub fn from_parameters(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Result<Self, DomainError> {
        if a <= 0.0 || b <= 0.0 || c <= 0.0 {
            return Err(DomainError::ValidationError("Longitudes de celda deben ser positivas".to_string()));
        }
        let (ca, cb, cg) = (alpha.to_radians().cos(), beta.to_radians().cos(), gamma.to_radians().cos());
        let sg = gamma.to_radians().sin();
        if sg.abs() < 1e-12 {
            return Err(DomainError::ValidationError("Ángulo gamma degenerado".to_string()));
        }
        let cy = (ca - cb * cg) / sg;
        let cz2 = 1.0 - cb * cb - cy * cy;
        if cz2 <= 0.0 {
            return Err(DomainError::ValidationError("Ángulos de celda incompatibles".to_string()));
        }
        Lattice::from_matrix([[a, 0.0, 0.0], [b * cg, b * sg, 0.0], [c * cb, c * cy, c * cz2.sqrt()]])
    }

    pub fn matrix(&self) -> &[[f64; 3]; 3] { &self.matrix }

    pub fn volume(&self) -> f64 {
        let [r0, r1, r2] = self.matrix;
        dot(r0, cross(r1, r2)).abs()
    }

    /// Longitudes `(a, b, c)` de los vectores de red.
    pub fn lengths(&self) -> [f64; 3] { self.matrix.map(|r| dot(r, r).sqrt()) }

    pub fn to_fractional(&self, cart: [f64; 3]) -> [f64; 3] { self.inverse_cols.map(|col| dot(cart, col)) }

    pub fn to_cartesian(&self, frac: [f64; 3]) -> [f64; 3] {
        let m = &self.matrix;
        [0, 1, 2].map(|k| frac[0] * m[0][k] + frac[1] * m[1][k] + frac[2] * m[2][k])
    }
}

impl TryFrom<[[f64; 3]; 3]> for Lattice {
    type Error = DomainError;
    fn try_from(matrix: [[f64; 3]; 3]) -> Result<Self, Self::Error> { Lattice::from_matrix(matrix) }
}

impl From<Lattice> for [[f64; 3]; 3] {
    fn from(l: Lattice) -> Self { l.matrix }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: [f64; 3], b: [f64; 3]) -> bool { a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-9) }

    #[test]
    fn test_cubic_volume_and_fractional() {
        let l = Lattice::from_matrix([[10.0, 0.0, 0.0], [0.0, 10.0, 0.0], [0.0, 0.0, 10.0]]).unwrap();
        assert!((l.volume() - 1000.0).abs() < 1e-9);
        assert!(approx(l.to_fractional([5.0, 2.5, 10.0]), [0.5, 0.25, 1.0]));
    }

    #[test]
    fn test_triclinic_roundtrip() {
        let l = Lattice::from_parameters(7.0, 8.5, 9.2, 81.0, 97.5, 112.0).unwrap();
        let frac = [0.12, 0.75, 0.33];
        let back = l.to_fractional(l.to_cartesian(frac));
        assert!(approx(frac, back));
    }

    #[test]
    fn test_parameters_match_matrix_for_orthorhombic() {
        let l = Lattice::from_parameters(3.0, 4.0, 5.0, 90.0, 90.0, 90.0).unwrap();
        assert!((l.volume() - 60.0).abs() < 1e-9);
        assert!(approx(l.lengths(), [3.0, 4.0, 5.0]));
    }

    #[test]
    fn test_degenerate_cell_rejected() {
        let err = Lattice::from_matrix([[1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 0.0, 1.0]]).unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
        assert!(Lattice::from_matrix([[f64::NAN, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]).is_err());
        assert!(Lattice::from_parameters(1.0, 1.0, 1.0, 10.0, 170.0, 90.0).is_err());
    }
}
