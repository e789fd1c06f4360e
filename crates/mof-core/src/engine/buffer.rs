//! Buffer en memoria clave → bytes crudos, poblado en la fase 1.
//!
//! Es un mapa (no una secuencia) pero conserva el orden de inserción, que
//! coincide con el orden de la lista de índices; de ahí sale el orden de envío
//! de la fase 2.
use indexmap::IndexMap;

#[derive(Debug, Default, Clone)]
pub struct RecordBuffer {
    entries: IndexMap<u64, Vec<u8>>,
    requested: usize,
    missing: usize,
    duplicates: usize,
}

impl RecordBuffer {
    pub fn new() -> Self { Self::default() }

    /// Registra un índice pedido y su payload, si existe. Un índice repetido
    /// conserva la primera aparición.
    pub fn record_lookup(&mut self, key: u64, value: Option<Vec<u8>>) {
        self.requested += 1;
        match value {
            None => self.missing += 1,
            Some(bytes) => {
                if self.entries.contains_key(&key) {
                    self.duplicates += 1;
                } else {
                    self.entries.insert(key, bytes);
                }
            }
        }
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn keys(&self) -> impl Iterator<Item = u64> + '_ { self.entries.keys().copied() }

    /// Entradas en orden de envío.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &[u8])> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    pub fn requested(&self) -> usize { self.requested }
    pub fn missing(&self) -> usize { self.missing }
    pub fn duplicates(&self) -> usize { self.duplicates }
}

impl FromIterator<(u64, Vec<u8>)> for RecordBuffer {
    fn from_iter<I: IntoIterator<Item = (u64, Vec<u8>)>>(iter: I) -> Self {
        let mut buffer = RecordBuffer::new();
        for (key, value) in iter {
            buffer.record_lookup(key, Some(value));
        }
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_counters_and_order() {
        let mut b = RecordBuffer::new();
        b.record_lookup(9, Some(b"nine".to_vec()));
        b.record_lookup(3, None);
        b.record_lookup(1, Some(b"one".to_vec()));
        b.record_lookup(9, Some(b"again".to_vec()));
        assert_eq!(b.keys().collect::<Vec<_>>(), vec![9, 1]);
        let entries: Vec<(u64, &[u8])> = b.iter().collect();
        assert_eq!(entries, vec![(9, &b"nine"[..]), (1, &b"one"[..])]);
        assert_eq!((b.requested(), b.missing(), b.duplicates()), (4, 1, 1));
    }
}
