use super::schema::UploadRecord;
use parking_lot::Mutex;
use std::collections::HashMap;

/// In-memory index of successful uploads, keyed by document id.
///
/// Lives as long as the process; nothing is written back to disk.
#[derive(Default)]
pub struct FileIndex {
    records: Mutex<HashMap<String, UploadRecord>>,
}

impl FileIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new file record. Ids are generated, so a key is never reused.
    pub fn insert(&self, record: UploadRecord) {
        self.records.lock().insert(record.id.clone(), record);
    }

    /// Get a file record by ID.
    pub fn get(&self, id: &str) -> Option<UploadRecord> {
        self.records.lock().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ftms::DocumentKind;
    use std::sync::Arc;

    fn record(id: &str) -> UploadRecord {
        UploadRecord {
            id: id.into(),
            filename: format!("{id}.txt"),
            file_path: format!("/tmp/{id}.txt"),
            kind: DocumentKind::Txt,
            text: format!("text of {id}"),
        }
    }

    #[test]
    fn get_returns_inserted_record() {
        let index = FileIndex::new();
        index.insert(record("a"));
        assert_eq!(index.get("a"), Some(record("a")));
        assert_eq!(index.get("b"), None);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn concurrent_inserts_are_all_kept() {
        let index = Arc::new(FileIndex::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let index = Arc::clone(&index);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        index.insert(record(&format!("{t}-{i}")));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(index.len(), 400);
        assert!(index.get("7-49").is_some());
    }
}
