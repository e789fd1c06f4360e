//! Configuración de hilos del proceso.
//!
//! Las librerías numéricas nativas que pueda cargar un checker leen
//! `MKL_NUM_THREADS`, `OMP_NUM_THREADS` y `NUMEXPR_*` al inicializarse. Se
//! fijan una sola vez, antes de crear el pool de workers, para que P workers
//! no se multipliquen por los hilos internos de cada librería.
use once_cell::sync::OnceCell;
use std::env;

use crate::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadingConfig {
    /// Hilos internos por worker (MKL/OpenMP/numexpr).
    pub inner_threads: usize,
    pub numexpr_max_threads: usize,
}

impl Default for ThreadingConfig {
    fn default() -> Self {
        Self { inner_threads: 1,
               numexpr_max_threads: 64 }
    }
}

static THREADING: OnceCell<ThreadingConfig> = OnceCell::new();

/// Aplica `config` al entorno del proceso. Idempotente con la misma
/// configuración; una segunda llamada con otra configuración es un error.
pub fn configure_threading(config: ThreadingConfig) -> Result<ThreadingConfig, CoreError> {
    let applied = *THREADING.get_or_init(|| {
                                let inner = config.inner_threads.to_string();
                                env::set_var("MKL_NUM_THREADS", &inner);
                                env::set_var("OMP_NUM_THREADS", &inner);
                                env::set_var("NUMEXPR_NUM_THREADS", &inner);
                                env::set_var("NUMEXPR_MAX_THREADS", config.numexpr_max_threads.to_string());
                                log::debug!("hilos internos fijados: {config:?}");
                                config
                            });
    if applied != config {
        return Err(CoreError::Setup(format!("la configuración de hilos ya fue fijada como {applied:?}")));
    }
    Ok(applied)
}
