//! `BatchFilterEngine`: lectura selectiva, evaluación paralela y agregación.
//!
//! Invariantes:
//! - Cada clave enviada a la fase 2 produce exactamente un `Outcome`.
//! - El orden del resultado es el orden de envío (el de la lista de índices),
//!   independiente del tamaño del pool y del orden de finalización.
//! - Un error o pánico al evaluar un registro sólo afecta a ese registro.
//! - El handle del store nunca entra al pool.
pub mod buffer;
pub mod report;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use log::{debug, info};
use mof_store::{encode_key, RecordStore};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

pub use buffer::RecordBuffer;
pub use report::{FilterReport, FilterStats};

use crate::constants::{DEFAULT_CHUNK_SIZE, WORKER_THREAD_PREFIX};
use crate::errors::CoreEngineError;
use crate::evaluator::RecordEvaluator;
use crate::outcome::{FailureReason, InvalidRecord, Outcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStage {
    Reading,
    Evaluating,
}

type ProgressCallback = dyn Fn(ProgressStage, usize, usize) + Send + Sync;

pub struct BatchFilterEngine {
    workers: usize,
    chunk_size: usize,
    on_progress: Option<Box<ProgressCallback>>,
}

impl BatchFilterEngine {
    /// # Errores
    /// `CoreEngineError::InvalidWorkerCount` si `workers == 0`.
    pub fn new(workers: usize) -> Result<Self, CoreEngineError> {
        if workers == 0 {
            return Err(CoreEngineError::InvalidWorkerCount(workers));
        }
        Ok(Self { workers,
                  chunk_size: DEFAULT_CHUNK_SIZE,
                  on_progress: None })
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Result<Self, CoreEngineError> {
        if chunk_size == 0 {
            return Err(CoreEngineError::InvalidChunkSize);
        }
        self.chunk_size = chunk_size;
        Ok(self)
    }

    /// Callback `(etapa, hechos, total)` invocado desde el hilo orquestador.
    pub fn on_progress<F>(mut self, f: F) -> Self
        where F: Fn(ProgressStage, usize, usize) + Send + Sync + 'static
    {
        self.on_progress = Some(Box::new(f));
        self
    }

    pub fn workers(&self) -> usize { self.workers }
    pub fn chunk_size(&self) -> usize { self.chunk_size }

    fn report_progress(&self, stage: ProgressStage, done: usize, total: usize) {
        if let Some(cb) = &self.on_progress {
            cb(stage, done, total);
        }
    }

    /// Fase 1: consulta secuencial de cada índice. Las claves ausentes se
    /// omiten sin error.
    pub fn read_selected<S>(&self, store: &S, keys: &[u64]) -> Result<RecordBuffer, CoreEngineError>
        where S: RecordStore + ?Sized
    {
        let total = keys.len();
        info!("leyendo {} índices (store con {:?} entradas)", total, store.len_hint());
        let mut buffer = RecordBuffer::new();
        for (i, key) in keys.iter().enumerate() {
            let value = store.get(&encode_key(*key))?;
            if value.is_none() {
                debug!("clave {key} ausente en el store; se omite");
            }
            buffer.record_lookup(*key, value);
            if (i + 1) % self.chunk_size == 0 {
                self.report_progress(ProgressStage::Reading, i + 1, total);
            }
        }
        self.report_progress(ProgressStage::Reading, total, total);
        info!("lectura completa: {} encontrados, {} ausentes", buffer.len(), buffer.missing());
        Ok(buffer)
    }

    /// Fase 2: evalúa cada entrada del buffer en un pool de `workers` hilos.
    /// Devuelve un `Outcome` por clave, en orden de envío.
    pub fn evaluate<E>(&self, buffer: &RecordBuffer, evaluator: &E) -> Result<Vec<(u64, Outcome)>, CoreEngineError>
        where E: RecordEvaluator + ?Sized
    {
        let pool = ThreadPoolBuilder::new().num_threads(self.workers)
                                           .thread_name(|i| format!("{WORKER_THREAD_PREFIX}-{i}"))
                                           .build()
                                           .map_err(|e| CoreEngineError::WorkerPool(e.to_string()))?;
        let entries: Vec<(u64, &[u8])> = buffer.iter().collect();
        let total = entries.len();
        info!("evaluando {} registros con {} workers (tandas de {})", total, self.workers, self.chunk_size);

        let mut outcomes: Vec<(u64, Outcome)> = Vec::with_capacity(total);
        for chunk in entries.chunks(self.chunk_size) {
            let evaluated: Vec<(u64, Outcome)> = pool.install(|| {
                                                         chunk.par_iter()
                                                              .map(|&(key, raw)| (key, guarded_evaluate(evaluator, key, raw)))
                                                              .collect()
                                                     });
            outcomes.extend(evaluated);
            self.report_progress(ProgressStage::Evaluating, outcomes.len(), total);
        }

        if outcomes.len() != total {
            return Err(CoreEngineError::OutcomeCountMismatch { expected: total,
                                                               got: outcomes.len() });
        }
        Ok(outcomes)
    }

    /// Fases 2 y 3 sobre un buffer ya leído.
    pub fn filter<E>(&self, buffer: &RecordBuffer, evaluator: &E) -> Result<FilterReport, CoreEngineError>
        where E: RecordEvaluator + ?Sized
    {
        let outcomes = self.evaluate(buffer, evaluator)?;
        let mut report = aggregate(outcomes);
        report.stats.requested = buffer.requested();
        report.stats.missing = buffer.missing();
        report.stats.duplicates = buffer.duplicates();
        info!("filtrado completo: {}", report.stats);
        Ok(report)
    }

    /// Corrida completa: fases 1, 2 y 3.
    pub fn run<S, E>(&self, store: &S, keys: &[u64], evaluator: &E) -> Result<FilterReport, CoreEngineError>
        where S: RecordStore + ?Sized,
              E: RecordEvaluator + ?Sized
    {
        let buffer = self.read_selected(store, keys)?;
        self.filter(&buffer, evaluator)
    }
}

/// Fase 3: conserva sólo los `Invalid`, en el orden recibido.
pub fn aggregate(outcomes: Vec<(u64, Outcome)>) -> FilterReport {
    let mut report = FilterReport::default();
    report.stats.found = outcomes.len();
    for (key, outcome) in outcomes {
        match outcome {
            Outcome::Valid => report.stats.valid += 1,
            Outcome::Invalid { diagnostics, record } => {
                report.stats.invalid += 1;
                report.invalid.push(InvalidRecord { key, diagnostics, record });
            }
            Outcome::EvaluationFailed(reason) => {
                debug!("clave {key} descartada: {reason}");
                report.stats.failed += 1;
                *report.stats.failed_by_reason.entry(reason.label().to_string()).or_insert(0) += 1;
            }
        }
    }
    report
}

fn guarded_evaluate<E>(evaluator: &E, key: u64, raw: &[u8]) -> Outcome
    where E: RecordEvaluator + ?Sized
{
    match panic::catch_unwind(AssertUnwindSafe(|| evaluator.evaluate(key, raw))) {
        Ok(outcome) => outcome,
        Err(payload) => Outcome::EvaluationFailed(FailureReason::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic sin mensaje".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mof_store::{InMemoryRecordStore, StoreError};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    fn by_first_byte(_key: u64, raw: &[u8]) -> Outcome {
        match raw.first() {
            Some(b'v') => Outcome::Valid,
            Some(b'i') => Outcome::Invalid { diagnostics: json!({ "tag": "i" }), record: raw.to_vec() },
            _ => Outcome::EvaluationFailed(FailureReason::Decode("vacío".into())),
        }
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert!(matches!(BatchFilterEngine::new(0), Err(CoreEngineError::InvalidWorkerCount(0))));
        assert!(matches!(BatchFilterEngine::new(1).unwrap().with_chunk_size(0), Err(CoreEngineError::InvalidChunkSize)));
    }

    #[test]
    fn test_missing_keys_are_skipped() {
        let store: InMemoryRecordStore = vec![(1u64, "v"), (2u64, "i")].into_iter().collect();
        let engine = BatchFilterEngine::new(2).unwrap();
        let buffer = engine.read_selected(&store, &[1, 2, 3]).unwrap();
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.missing(), 1);
        let report = engine.filter(&buffer, &by_first_byte).unwrap();
        assert_eq!(report.invalid.len(), 1);
        assert_eq!(report.invalid[0].key, 2);
        assert_eq!((report.stats.requested, report.stats.found, report.stats.missing), (3, 2, 1));
    }

    struct BrokenAfter(u64);
    impl RecordStore for BrokenAfter {
        fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
            if key == encode_key(self.0).as_slice() {
                return Err(StoreError::Read { key: String::from_utf8_lossy(key).into_owned(),
                                              source: std::io::Error::other("disco ilegible") });
            }
            Ok(Some(b"v".to_vec()))
        }
    }

    #[test]
    fn test_store_read_error_aborts_phase_one() {
        let engine = BatchFilterEngine::new(2).unwrap();
        let err = engine.read_selected(&BrokenAfter(3), &[1, 2, 3, 4]).unwrap_err();
        assert!(matches!(err, CoreEngineError::Store(StoreError::Read { ref key, .. }) if key == "3"), "{err}");
        assert!(engine.run(&BrokenAfter(3), &[1, 2], &by_first_byte).is_ok());
    }

    #[test]
    fn test_panic_is_isolated() {
        let store: InMemoryRecordStore = (0u64..20).map(|k| (k, if k == 13 { "p" } else { "i" })).collect();
        let evaluator = |key: u64, raw: &[u8]| {
            if raw == b"p" {
                panic!("registro {key} corrupto");
            }
            by_first_byte(key, raw)
        };
        let engine = BatchFilterEngine::new(4).unwrap().with_chunk_size(3).unwrap();
        let keys: Vec<u64> = (0..20).collect();
        let report = engine.run(&store, &keys, &evaluator).unwrap();
        assert_eq!(report.invalid.len(), 19);
        assert!(report.invalid.iter().all(|r| r.key != 13));
        assert_eq!(report.stats.failed_by_reason.get("panicked"), Some(&1));
    }

    #[test]
    fn test_progress_reported_per_chunk() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let engine = BatchFilterEngine::new(2).unwrap()
                                              .with_chunk_size(2)
                                              .unwrap()
                                              .on_progress(move |stage, done, total| {
                                                  sink.lock().unwrap().push((stage, done, total));
                                              });
        let buffer: RecordBuffer = (0u64..5).map(|k| (k, b"v".to_vec())).collect();
        engine.evaluate(&buffer, &by_first_byte).unwrap();
        let evaluating: Vec<usize> = seen.lock()
                                         .unwrap()
                                         .iter()
                                         .filter(|(s, _, _)| *s == ProgressStage::Evaluating)
                                         .map(|(_, d, _)| *d)
                                         .collect();
        assert_eq!(evaluating, vec![2, 4, 5]);
    }
}
