//! mof-store
//!
//! Adaptador de sólo lectura sobre el store clave/valor de registros MOF.
//! El motor del store es externo; aquí sólo se fija el contrato que necesita
//! el filtro por lotes:
//! - `get` es una consulta pura; una clave ausente devuelve `Ok(None)`.
//! - Las claves son la forma ASCII decimal del índice entero (`encode_key`).
//!
//! Módulos:
//! - `store`: trait `RecordStore` y backend en memoria.
//! - `dir`: backend de directorio (un archivo por clave).
//! - `config`: carga de configuración desde .env.
//! - `error`: errores del adaptador.

pub mod config;
pub mod dir;
pub mod error;
pub mod store;

pub use config::{init_dotenv, StoreConfig};
pub use dir::DirRecordStore;
pub use error::StoreError;
pub use store::{encode_key, InMemoryRecordStore, RecordStore};
