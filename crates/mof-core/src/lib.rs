//! mof-core: filtro por lotes determinista de registros MOF.
//!
//! Fases:
//! 1. lectura selectiva del store por lista de índices (`BatchFilterEngine::read_selected`);
//! 2. evaluación paralela en un pool acotado (`BatchFilterEngine::evaluate`);
//! 3. agregación en orden de envío, conservando sólo los `Invalid`.
pub mod constants;
pub mod engine;
pub mod errors;
pub mod evaluator;
pub mod outcome;

pub use engine::{BatchFilterEngine, FilterReport, FilterStats, ProgressStage, RecordBuffer};
pub use errors::CoreEngineError;
pub use evaluator::{MofEvaluator, RecordEvaluator};
pub use outcome::{FailureReason, InvalidRecord, Outcome};
