//! Registro MOF decodificado desde el payload crudo del store.
//!
//! El payload es un objeto JSON autodescriptivo. Campos reconocidos:
//! - `cell` (alias `cell_1`): descriptor de celda.
//! - `atom_types`: especies, como número atómico o símbolo.
//! - `gt_coords`: coordenadas cartesianas de referencia (opcional).
//! - `matched_coords` + `rmsd`: trayectoria de coordenadas emparejadas y su
//!   error por paso (opcionales; el último `rmsd` puede ser `null`).
//!
//! Cualquier otro campo se ignora al decodificar.
use serde::{Deserialize, Serialize};

use crate::{DomainError, Element, Lattice};

/// Descriptor de celda tal como aparece en el registro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellDescriptor {
    /// Tres vectores de red (filas).
    Matrix([[f64; 3]; 3]),
    /// Matriz con dimensión de lote 1, `[[[..], [..], [..]]]`.
    Batched([[[f64; 3]; 3]; 1]),
    /// `(a, b, c, alpha, beta, gamma)` en Å y grados.
    Parameters([f64; 6]),
}

impl CellDescriptor {
    pub fn to_lattice(&self) -> Result<Lattice, DomainError> {
        match self {
            CellDescriptor::Matrix(m) => Lattice::from_matrix(*m),
            CellDescriptor::Batched([m]) => Lattice::from_matrix(*m),
            CellDescriptor::Parameters([a, b, c, alpha, beta, gamma]) => {
                Lattice::from_parameters(*a, *b, *c, *alpha, *beta, *gamma)
            }
        }
    }
}

/// Identificador de especie: número atómico o símbolo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpeciesId {
    Number(u32),
    Symbol(String),
}

impl SpeciesId {
    pub fn to_element(&self) -> Result<Element, DomainError> {
        match self {
            SpeciesId::Number(z) => Element::from_number(*z),
            SpeciesId::Symbol(s) => Element::from_symbol(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MofRecord {
    #[serde(alias = "cell_1")]
    pub cell: CellDescriptor,
    pub atom_types: Vec<SpeciesId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gt_coords: Option<Vec<[f64; 3]>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_coords: Option<Vec<Vec<[f64; 3]>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rmsd: Option<Vec<Option<f64>>>,
}

impl MofRecord {
    /// Decodifica un payload crudo.
    ///
    /// # Errores
    /// `DomainError::DecodeError` si el payload no es JSON válido o le faltan
    /// campos obligatorios.
    pub fn from_bytes(raw: &[u8]) -> Result<Self, DomainError> {
        serde_json::from_slice(raw).map_err(|e| DomainError::DecodeError(e.to_string()))
    }

    pub fn num_atoms(&self) -> usize { self.atom_types.len() }

    pub fn lattice(&self) -> Result<Lattice, DomainError> { self.cell.to_lattice() }

    pub fn species(&self) -> Result<Vec<Element>, DomainError> {
        self.atom_types.iter().map(SpeciesId::to_element).collect()
    }

    /// Último valor de `rmsd`; `None` si falta el campo, la lista está vacía o
    /// el último paso es `null`.
    pub fn terminal_rmsd(&self) -> Option<f64> { self.rmsd.as_ref().and_then(|r| r.last().copied().flatten()) }
}
