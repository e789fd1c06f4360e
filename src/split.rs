//! Lista de índices de un split (`<split>_split.txt`).
//!
//! Enteros no negativos separados por espacios en blanco; `#` inicia un
//! comentario hasta fin de línea. El orden del archivo es el orden de envío.
use std::path::Path;

use crate::CoreError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitIndex {
    keys: Vec<u64>,
}

impl SplitIndex {
    pub fn parse(text: &str) -> Result<Self, CoreError> {
        let mut keys = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            let content = line.split('#').next().unwrap_or("");
            for token in content.split_whitespace() {
                let key = token.parse::<u64>().map_err(|_| {
                                                   CoreError::Setup(format!("índice inválido '{token}' en línea {}",
                                                                            lineno + 1))
                                               })?;
                keys.push(key);
            }
        }
        Ok(Self { keys })
    }

    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
                                                    CoreError::Setup(format!("no se pudo leer la lista de índices {}: {e}",
                                                                             path.display()))
                                                })?;
        Self::parse(&text).map_err(|e| match e {
                              CoreError::Setup(msg) => CoreError::Setup(format!("{}: {msg}", path.display())),
                              other => other,
                          })
    }

    pub fn keys(&self) -> &[u64] { &self.keys }
    pub fn len(&self) -> usize { self.keys.len() }
    pub fn is_empty(&self) -> bool { self.keys.is_empty() }
}
