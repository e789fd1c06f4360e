//! mofcheck
//!
//! Filtro por lotes de registros MOF por validez estructural:
//! - `config`: configuración de la corrida (archivo, entorno, CLI).
//! - `runtime`: configuración de hilos del proceso, una sola vez al arranque.
//! - `split`: carga de la lista de índices de un split.
//! - `writer`: escritura atómica del conjunto de registros inválidos.
//! - `pipeline`: orquestación de un split completo (`MofChecker`).
//! - `logging`: inicialización del subscriber para el binario.

pub mod config;
pub mod errors;
pub mod logging;
pub mod pipeline;
pub mod runtime;
pub mod split;
pub mod writer;

pub use config::{AppConfig, PartialConfig};
pub use errors::CoreError;
pub use pipeline::{MofChecker, RunSummary};
pub use writer::{ResultWriter, WrittenArtifact};
