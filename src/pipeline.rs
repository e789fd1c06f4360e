//! Orquestación de un split completo.
//!
//! `MofChecker::process` carga la lista de índices, abre el store del modo
//! configurado, ejecuta las tres fases del motor y escribe el artefacto.
//! Cualquier error de preparación ocurre antes de leer el primer registro.
use std::path::PathBuf;
use std::time::Instant;

use log::info;
use mof_core::{BatchFilterEngine, FilterStats, MofEvaluator, ProgressStage};
use mof_domain::ValidityChecker;
use mof_store::{DirRecordStore, RecordStore};

use crate::config::AppConfig;
use crate::split::SplitIndex;
use crate::writer::{ResultWriter, WrittenArtifact};
use crate::CoreError;

/// Resumen de la corrida de un split.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub split: String,
    pub store_path: PathBuf,
    pub artifact: WrittenArtifact,
    pub stats: FilterStats,
    pub elapsed_secs: f64,
}

pub struct MofChecker<C> {
    config: AppConfig,
    evaluator: MofEvaluator<C>,
}

impl<C: ValidityChecker> MofChecker<C> {
    pub fn new(config: AppConfig, checker: C) -> Self {
        let evaluator = MofEvaluator::new(checker, config.mode);
        Self { config, evaluator }
    }

    pub fn config(&self) -> &AppConfig { &self.config }

    fn engine(&self) -> Result<BatchFilterEngine, CoreError> {
        let engine = BatchFilterEngine::new(self.config.num_cpus)?.with_chunk_size(self.config.chunk_size)?
                                                                  .on_progress(log_progress);
        Ok(engine)
    }

    pub fn process(&self, split: &str) -> Result<RunSummary, CoreError> {
        info!("Checking {split} split...");
        let started = Instant::now();

        let index = SplitIndex::load(&self.config.split_file(split))?;
        let store_path = self.config.store_path(split);
        let store = DirRecordStore::open(&store_path)?;
        let engine = self.engine()?;
        info!("{} índices, store {} ({} modo, {} workers)",
              index.len(),
              store_path.display(),
              self.config.mode,
              engine.workers());

        let buffer = engine.read_selected(&store, index.keys())?;
        store.close();
        let report = engine.filter(&buffer, &self.evaluator)?;

        let artifact = ResultWriter::new(&self.config.data_dir).write(self.config.mode, split, &report.invalid)?;
        let elapsed_secs = started.elapsed().as_secs_f64();
        info!("Time taken: {elapsed_secs:.4} s");
        info!("{split}: {}", report.stats);

        Ok(RunSummary { split: split.to_string(),
                        store_path,
                        artifact,
                        stats: report.stats,
                        elapsed_secs })
    }
}

fn log_progress(stage: ProgressStage, done: usize, total: usize) {
    let pct = if total == 0 { 100.0 } else { done as f64 * 100.0 / total as f64 };
    let label = match stage {
        ProgressStage::Reading => "lectura",
        ProgressStage::Evaluating => "evaluación",
    };
    info!("{label}: {done}/{total} ({pct:.1}%)");
}
