//! Tabla periódica mínima: símbolo, número atómico, radio covalente y
//! clasificación metal / no metal.
//!
//! Los radios covalentes siguen Cordero et al. (2008) hasta Cm (Z = 96); para
//! elementos más pesados se usa `DEFAULT_COVALENT_RADIUS`.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DomainError;

/// Radio covalente (Å) usado cuando el elemento no tiene valor tabulado.
pub const DEFAULT_COVALENT_RADIUS: f64 = 1.5;

const SYMBOLS: [&str; 118] = [
    // periodo 1
    "H", "He",
    // periodo 2
    "Li", "Be", "B", "C", "N", "O", "F", "Ne",
    // periodo 3
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar",
    // periodo 4
    "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As", "Se", "Br", "Kr",
    // periodo 5
    "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn", "Sb", "Te", "I", "Xe",
    // periodo 6
    "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu",
    "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl", "Pb", "Bi", "Po", "At", "Rn",
    // periodo 7
    "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm", "Md", "No", "Lr",
    "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

const COVALENT_RADII: [f64; 96] = [
    0.31, 0.28,
    1.28, 0.96, 0.84, 0.76, 0.71, 0.66, 0.57, 0.58,
    1.66, 1.41, 1.21, 1.11, 1.07, 1.05, 1.02, 1.06,
    2.03, 1.76, 1.70, 1.60, 1.53, 1.39, 1.39, 1.32, 1.26, 1.24, 1.32, 1.22, 1.22, 1.20, 1.19, 1.20, 1.20, 1.16,
    2.20, 1.95, 1.90, 1.75, 1.64, 1.54, 1.47, 1.46, 1.42, 1.39, 1.45, 1.44, 1.42, 1.39, 1.39, 1.38, 1.39, 1.40,
    2.44, 2.15, 2.07, 2.04, 2.03, 2.01, 1.99, 1.98, 1.98, 1.96, 1.94, 1.92, 1.92, 1.89, 1.90, 1.87, 1.87,
    1.75, 1.70, 1.62, 1.51, 1.44, 1.41, 1.36, 1.36, 1.32, 1.45, 1.46, 1.48, 1.40, 1.50, 1.50,
    2.60, 2.21, 2.15, 2.06, 2.00, 1.96, 1.90, 1.87, 1.80, 1.69,
];

// No metales y metaloides (número atómico). Todo lo demás cuenta como metal.
const NON_METALS: [u8; 26] = [1, 2, 5, 6, 7, 8, 9, 10, 14, 15, 16, 17, 18, 32, 33, 34, 35, 36, 51, 52, 53, 54, 85, 86, 117,
                              118];

/// Elemento químico identificado por su número atómico (1..=118).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Element(u8);

impl Element {
    pub const HYDROGEN: Element = Element(1);
    pub const CARBON: Element = Element(6);

    pub fn from_number(z: u32) -> Result<Self, DomainError> {
        if (1..=118).contains(&z) {
            Ok(Element(z as u8))
        } else {
            Err(DomainError::ValidationError(format!("Número atómico fuera de rango: {z}")))
        }
    }

    /// Acepta el símbolo sin distinguir mayúsculas ("fe", "FE", "Fe").
    pub fn from_symbol(symbol: &str) -> Result<Self, DomainError> {
        let trimmed = symbol.trim();
        SYMBOLS.iter()
               .position(|s| s.eq_ignore_ascii_case(trimmed))
               .map(|idx| Element(idx as u8 + 1))
               .ok_or_else(|| DomainError::ValidationError(format!("Símbolo de elemento desconocido: {symbol}")))
    }

    pub fn atomic_number(&self) -> u8 { self.0 }
    pub fn symbol(&self) -> &'static str { SYMBOLS[self.0 as usize - 1] }

    pub fn covalent_radius(&self) -> f64 {
        COVALENT_RADII.get(self.0 as usize - 1).copied().unwrap_or(DEFAULT_COVALENT_RADIUS)
    }

    pub fn is_metal(&self) -> bool { !NON_METALS.contains(&self.0) }
}

impl TryFrom<u8> for Element {
    type Error = DomainError;
    fn try_from(z: u8) -> Result<Self, Self::Error> { Element::from_number(z as u32) }
}

impl From<Element> for u8 {
    fn from(e: Element) -> Self { e.0 }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.symbol()) }
}
