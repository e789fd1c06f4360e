use std::collections::HashMap;

use crate::StoreError;

/// Store clave/valor de sólo lectura.
///
/// Contrato:
/// - `get` no tiene efectos secundarios; una clave ausente es `Ok(None)`.
/// - `Err` sólo cuando el backend no puede leerse (fatal para la corrida).
pub trait RecordStore: Send + Sync {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Número de entradas si el backend lo conoce (sólo informativo).
    fn len_hint(&self) -> Option<usize> { None }

    /// Cierra el handle. Equivale a soltarlo.
    fn close(self)
        where Self: Sized
    {
        drop(self)
    }
}

/// Clave del store para un índice: su forma ASCII decimal.
pub fn encode_key(idx: u64) -> Vec<u8> { idx.to_string().into_bytes() }

#[derive(Debug, Default, Clone)]
pub struct InMemoryRecordStore {
    pub inner: HashMap<Vec<u8>, Vec<u8>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, idx: u64, value: impl Into<Vec<u8>>) { self.inner.insert(encode_key(idx), value.into()); }

    pub fn len(&self) -> usize { self.inner.len() }
    pub fn is_empty(&self) -> bool { self.inner.is_empty() }
}

impl<V: Into<Vec<u8>>> FromIterator<(u64, V)> for InMemoryRecordStore {
    fn from_iter<I: IntoIterator<Item = (u64, V)>>(iter: I) -> Self {
        let mut store = InMemoryRecordStore::new();
        for (idx, value) in iter {
            store.insert(idx, value);
        }
        store
    }
}

impl RecordStore for InMemoryRecordStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> { Ok(self.inner.get(key).cloned()) }
    fn len_hint(&self) -> Option<usize> { Some(self.inner.len()) }
}
