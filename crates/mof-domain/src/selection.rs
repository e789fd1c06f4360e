//! Estrategia de selección de coordenadas.
//!
//! Un mismo registro puede evaluarse con sus coordenadas de referencia
//! (`GroundTruth`) o con el último paso de la trayectoria emparejada
//! (`Matched`). El modo `Matched` exige que el registro tenga un `rmsd`
//! terminal; si no lo tiene, el registro aún no fue emparejado y no se evalúa.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::MofRecord;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("registro sin emparejar (rmsd terminal ausente)")]
    NotMatched,
    #[error("campo de coordenadas ausente o vacío: {0}")]
    MissingCoordinates(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoordinateSelection {
    /// Coordenadas `gt_coords`.
    #[default]
    GroundTruth,
    /// Último conjunto de `matched_coords`, condicionado a `rmsd` terminal.
    Matched,
}

impl CoordinateSelection {
    pub fn label(&self) -> &'static str {
        match self {
            CoordinateSelection::GroundTruth => "ground-truth",
            CoordinateSelection::Matched => "matched",
        }
    }

    /// Devuelve las coordenadas cartesianas que corresponden a este modo.
    pub fn select<'a>(&self, record: &'a MofRecord) -> Result<&'a [[f64; 3]], SelectionError> {
        match self {
            CoordinateSelection::GroundTruth => record.gt_coords
                                                      .as_deref()
                                                      .ok_or(SelectionError::MissingCoordinates("gt_coords")),
            CoordinateSelection::Matched => {
                if record.terminal_rmsd().is_none() {
                    return Err(SelectionError::NotMatched);
                }
                record.matched_coords
                      .as_ref()
                      .and_then(|traj| traj.last())
                      .map(Vec::as_slice)
                      .ok_or(SelectionError::MissingCoordinates("matched_coords"))
            }
        }
    }
}

impl fmt::Display for CoordinateSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

impl FromStr for CoordinateSelection {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ground-truth" | "ground_truth" | "gt" => Ok(CoordinateSelection::GroundTruth),
            "matched" => Ok(CoordinateSelection::Matched),
            other => Err(format!("modo de coordenadas desconocido: {other}")),
        }
    }
}
