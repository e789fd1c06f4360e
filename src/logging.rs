//! Subscriber de tracing para el binario. Las librerías registran con `log`;
//! el puente `tracing-log` de `init()` recoge esos registros.
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::CoreError;

/// `RUST_LOG` tiene prioridad; si no está definido se usa `level`.
pub fn init_logging(level: &str) -> Result<(), CoreError> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))
                                                  .map_err(|e| CoreError::Config(format!("nivel de log inválido '{level}': {e}")))?;
    tracing_subscriber::registry().with(filter)
                                  .with(fmt::layer().with_target(false).with_thread_names(true))
                                  .try_init()
                                  .map_err(|e| CoreError::Setup(format!("no se pudo instalar el logger: {e}")))
}
