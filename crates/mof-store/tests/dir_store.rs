use mof_store::{encode_key, DirRecordStore, InMemoryRecordStore, RecordStore};

fn lookup_all<S: RecordStore + ?Sized>(store: &S, keys: &[u64]) -> Vec<Option<Vec<u8>>> {
    keys.iter().map(|k| store.get(&encode_key(*k)).unwrap()).collect()
}

#[test]
fn dir_and_memory_backends_agree() {
    let dir = tempfile::tempdir().unwrap();
    let mut mem = InMemoryRecordStore::new();
    for (k, v) in [(1u64, "a"), (2, "bb"), (10, "ccc")] {
        std::fs::write(dir.path().join(k.to_string()), v).unwrap();
        mem.insert(k, v);
    }
    let disk = DirRecordStore::open(dir.path()).unwrap();
    let keys = [1, 2, 3, 10, 11];
    assert_eq!(lookup_all(&disk, &keys), lookup_all(&mem, &keys));

    let boxed: Box<dyn RecordStore> = Box::new(mem);
    assert_eq!(lookup_all(boxed.as_ref(), &[3]), vec![None]);
    disk.close();
}
