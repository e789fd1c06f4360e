// mof-domain library entry point
pub mod element;
pub mod error;
pub mod lattice;
pub mod record;
pub mod selection;
pub mod structure;
pub mod validity;
pub use element::Element;
pub use error::DomainError;
pub use lattice::Lattice;
pub use record::{CellDescriptor, MofRecord, SpeciesId};
pub use selection::{CoordinateSelection, SelectionError};
pub use structure::{Site, Structure};
pub use validity::{CheckReport, ValidityChecker};
