//! Backend de directorio: cada entrada es un archivo cuyo nombre es la clave
//! ASCII y cuyo contenido es el payload crudo.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;

use crate::{RecordStore, StoreError};

/// Archivos que delatan un entorno LMDB, que este backend no sabe leer.
const LMDB_MARKERS: [&str; 2] = ["data.mdb", "lock.mdb"];

#[derive(Debug)]
pub struct DirRecordStore {
    root: PathBuf,
}

impl DirRecordStore {
    /// Abre el store en modo lectura.
    ///
    /// # Errores
    /// `StoreError::Open` si la ruta no existe, no es un directorio o es un
    /// entorno LMDB.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = path.as_ref().to_path_buf();
        let open_err = |reason: String| StoreError::Open { path: root.clone(), reason };
        let meta = fs::metadata(&root).map_err(|e| open_err(e.to_string()))?;
        if !meta.is_dir() {
            return Err(open_err("no es un directorio".to_string()));
        }
        if let Some(marker) = LMDB_MARKERS.iter().find(|m| root.join(m).exists()) {
            return Err(open_err(format!("entorno LMDB ({marker}); se espera un directorio con un archivo por clave")));
        }
        debug!("store abierto: {}", root.display());
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path { &self.root }
}

// Sólo dígitos: evita que una clave escape del directorio raíz.
fn key_as_file_name(key: &[u8]) -> Option<&str> {
    if key.is_empty() || !key.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(key).ok()
}

impl RecordStore for DirRecordStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        let Some(name) = key_as_file_name(key) else {
            debug!("clave no numérica ignorada: {:?}", String::from_utf8_lossy(key));
            return Ok(None);
        };
        match fs::read(self.root.join(name)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read { key: name.to_string(), source }),
        }
    }
}
