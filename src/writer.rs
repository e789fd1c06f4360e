//! Escritura del conjunto de registros inválidos.
//!
//! Un artefacto por split y modo, escrito de forma atómica: se serializa
//! completo en memoria, se escribe a un `NamedTempFile` en el directorio
//! destino y se renombra sobre el archivo final.
use std::io::Write;
use std::path::{Path, PathBuf};

use mof_core::InvalidRecord;
use mof_domain::CoordinateSelection;
use serde::Serialize;
use serde_json::value::RawValue;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use crate::CoreError;

/// Permisos del artefacto: legible por otros usuarios, como un archivo creado
/// con la umask habitual.
#[cfg(unix)]
const ARTIFACT_MODE: u32 = 0o644;

/// `invalid_mofs_<split>.json` o `invalid_mofs_matched_<split>.json`.
pub fn artifact_name(mode: CoordinateSelection, split: &str) -> String {
    match mode {
        CoordinateSelection::GroundTruth => format!("invalid_mofs_{split}.json"),
        CoordinateSelection::Matched => format!("invalid_mofs_matched_{split}.json"),
    }
}

#[derive(Serialize)]
struct Entry<'a> {
    key: u64,
    diagnostics: &'a Value,
    record: RecordBody<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum RecordBody<'a> {
    Json(&'a RawValue),
    Bytes(&'a [u8]),
}

impl<'a> From<&'a InvalidRecord> for Entry<'a> {
    fn from(rec: &'a InvalidRecord) -> Self {
        let record = match serde_json::from_slice::<&RawValue>(&rec.record) {
            Ok(raw) => RecordBody::Json(raw),
            Err(_) => RecordBody::Bytes(&rec.record),
        };
        Entry { key: rec.key,
                diagnostics: &rec.diagnostics,
                record }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifact {
    pub path: PathBuf,
    pub entries: usize,
    /// SHA-256 hex de los bytes escritos.
    pub sha256: String,
}

#[derive(Debug, Clone)]
pub struct ResultWriter {
    data_dir: PathBuf,
}

impl ResultWriter {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self { Self { data_dir: data_dir.into() } }

    pub fn data_dir(&self) -> &Path { &self.data_dir }

    /// JSON con indentación y salto de línea final. Un conjunto vacío es `[]`.
    pub fn render(records: &[InvalidRecord]) -> Result<Vec<u8>, CoreError> {
        let entries: Vec<Entry<'_>> = records.iter().map(Entry::from).collect();
        let mut bytes = serde_json::to_vec_pretty(&entries).map_err(|e| CoreError::Write(e.to_string()))?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    pub fn write(&self, mode: CoordinateSelection, split: &str, records: &[InvalidRecord])
                 -> Result<WrittenArtifact, CoreError> {
        let bytes = Self::render(records)?;
        let write_err = |e: std::io::Error| CoreError::Write(format!("{}: {e}", self.data_dir.display()));

        std::fs::create_dir_all(&self.data_dir).map_err(write_err)?;
        let path = self.data_dir.join(artifact_name(mode, split));
        let mut tmp = NamedTempFile::new_in(&self.data_dir).map_err(write_err)?;
        tmp.write_all(&bytes).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
               .set_permissions(std::fs::Permissions::from_mode(ARTIFACT_MODE))
               .map_err(write_err)?;
        }
        tmp.persist(&path)
           .map_err(|e| CoreError::Write(format!("{}: {}", path.display(), e.error)))?;

        let sha256 = format!("{:x}", Sha256::digest(&bytes));
        log::info!("{} registros inválidos escritos en {} (sha256 {})", records.len(), path.display(), sha256);
        Ok(WrittenArtifact { path,
                             entries: records.len(),
                             sha256 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn invalid(key: u64, record: &[u8]) -> InvalidRecord {
        InvalidRecord { key,
                        diagnostics: json!({ "has_metal": false, "has_carbon": true }),
                        record: record.to_vec() }
    }

    #[test]
    fn test_artifact_names() {
        assert_eq!(artifact_name(CoordinateSelection::GroundTruth, "val"), "invalid_mofs_val.json");
        assert_eq!(artifact_name(CoordinateSelection::Matched, "test"), "invalid_mofs_matched_test.json");
    }

    #[test]
    fn test_empty_set_renders_brackets() {
        assert_eq!(ResultWriter::render(&[]).unwrap(), b"[]\n");
    }

    #[test]
    fn test_json_record_embedded_verbatim() {
        let raw = br#"{"cell":[[1,0,0],[0,1,0],[0,0,1]],"atom_types":[6]}"#;
        let text = String::from_utf8(ResultWriter::render(&[invalid(4, raw)]).unwrap()).unwrap();
        assert!(text.contains(std::str::from_utf8(raw).unwrap()));
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[0]["key"], json!(4));
        assert_eq!(parsed[0]["record"]["atom_types"], json!([6]));
        // claves de diagnóstico ordenadas
        assert!(text.find("has_carbon").unwrap() < text.find("has_metal").unwrap());
    }

    #[test]
    fn test_non_json_record_as_bytes() {
        let parsed: Value = serde_json::from_slice(&ResultWriter::render(&[invalid(1, &[0x80, 0x04])]).unwrap()).unwrap();
        assert_eq!(parsed[0]["record"], json!([128, 4]));
    }

    #[cfg(unix)]
    #[test]
    fn test_artifact_readable_by_others() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let artifact = ResultWriter::new(dir.path()).write(CoordinateSelection::GroundTruth, "val", &[]).unwrap();
        let mode = std::fs::metadata(&artifact.path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, ARTIFACT_MODE);
    }

    #[test]
    fn test_data_dir_that_is_a_file_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("data");
        std::fs::write(&blocker, b"no soy un directorio").unwrap();
        let err = ResultWriter::new(&blocker).write(CoordinateSelection::Matched, "val", &[]).unwrap_err();
        assert!(matches!(err, CoreError::Write(_)), "{err}");
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_write_creates_dir_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ResultWriter::new(dir.path().join("out"));
        let first = writer.write(CoordinateSelection::GroundTruth, "val", &[invalid(1, b"{}")]).unwrap();
        assert_eq!(first.entries, 1);
        assert_eq!(first.path, dir.path().join("out").join("invalid_mofs_val.json"));

        let second = writer.write(CoordinateSelection::GroundTruth, "val", &[]).unwrap();
        assert_eq!(std::fs::read(&second.path).unwrap(), b"[]\n");
        assert_ne!(first.sha256, second.sha256);
        assert_eq!(second.sha256.len(), 64);
        let leftovers = std::fs::read_dir(dir.path().join("out")).unwrap().count();
        assert_eq!(leftovers, 1);
    }
}
