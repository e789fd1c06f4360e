//! Constantes del motor de filtrado.

/// Registros evaluados por tanda. Entre tandas el hilo orquestador reporta
/// progreso; dentro de una tanda los workers no comparten estado.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Prefijo del nombre de los hilos del pool.
pub const WORKER_THREAD_PREFIX: &str = "mofcheck-worker";
