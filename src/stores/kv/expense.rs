//! Implements an expense store backed by a key-value blob.

use uuid::Uuid;

use crate::{
    Error,
    models::{Expense, ExpenseDraft},
    stores::{ExpenseStore, kv::KeyValueStore},
};

/// The fixed key the expense collection blob is stored under.
pub const STORAGE_KEY: &str = "expenses";

/// Stores expenses as one JSON array under [STORAGE_KEY] in a key-value
/// backend.
///
/// Every mutation loads the full collection, applies the change and writes
/// the full collection back. This is O(collection size) per mutation and
/// assumes a single active writer, which is acceptable at the target scale
/// of tens to low hundreds of records.
#[derive(Debug, Clone)]
pub struct KvExpenseStore<B> {
    backend: B,
}

impl<B: KeyValueStore> KvExpenseStore<B> {
    /// Create a new store on top of `backend`.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Deserialize the stored collection.
    ///
    /// A missing blob yields an empty collection. A blob that fails to
    /// parse also yields an empty collection: the store treats corrupt
    /// data as absent rather than failing every subsequent call, at the
    /// cost of discarding it on the next write. The discard is logged.
    fn load(&self) -> Result<Vec<Expense>, Error> {
        let Some(blob) = self.backend.get(STORAGE_KEY)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&blob) {
            Ok(expenses) => Ok(expenses),
            Err(error) => {
                tracing::warn!("discarding unparseable expense data: {error}");
                Ok(Vec::new())
            }
        }
    }

    /// Serialize `expenses` and overwrite the stored collection.
    fn save(&mut self, expenses: &[Expense]) -> Result<(), Error> {
        let blob = serde_json::to_string(expenses)
            .map_err(|error| Error::Serialization(error.to_string()))?;

        self.backend.set(STORAGE_KEY, &blob)
    }
}

impl<B: KeyValueStore> ExpenseStore for KvExpenseStore<B> {
    fn list(&self) -> Result<Vec<Expense>, Error> {
        self.load()
    }

    fn add(&mut self, draft: ExpenseDraft) -> Result<Expense, Error> {
        let mut expenses = self.load()?;
        let expense = Expense::new(Uuid::new_v4().to_string(), draft);

        expenses.push(expense.clone());
        self.save(&expenses)?;

        Ok(expense)
    }

    fn update(&mut self, id: &str, draft: ExpenseDraft) -> Result<(), Error> {
        let mut expenses = self.load()?;

        // Absent IDs are a no-op: nothing is rewritten.
        let Some(index) = expenses.iter().position(|expense| expense.id() == id) else {
            return Ok(());
        };

        let id = expenses[index].id().to_string();
        expenses[index] = Expense::new(id, draft);

        self.save(&expenses)
    }

    fn delete(&mut self, id: &str) -> Result<(), Error> {
        let mut expenses = self.load()?;
        expenses.retain(|expense| expense.id() != id);

        self.save(&expenses)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::{
        Error,
        models::{Category, ExpenseDraft},
        stores::{
            ExpenseStore,
            kv::{FileBackend, KeyValueStore, KvExpenseStore, MemoryBackend, STORAGE_KEY},
        },
    };

    /// Counts writes so tests can assert that an operation left the
    /// backend untouched.
    #[derive(Default)]
    struct CountingBackend {
        inner: MemoryBackend,
        writes: usize,
    }

    impl KeyValueStore for CountingBackend {
        fn get(&self, key: &str) -> Result<Option<String>, Error> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
            self.writes += 1;
            self.inner.set(key, value)
        }
    }

    fn draft(title: &str, amount: f64, category: Category) -> ExpenseDraft {
        ExpenseDraft {
            title: title.to_string(),
            amount,
            date: datetime!(2024-03-01 07:30 UTC),
            category,
        }
    }

    #[test]
    fn list_is_empty_for_a_fresh_backend() {
        let store = KvExpenseStore::new(MemoryBackend::new());

        assert_eq!(store.list().unwrap(), vec![]);
    }

    #[test]
    fn list_recovers_from_an_unparseable_blob() {
        let mut backend = MemoryBackend::new();
        backend.set(STORAGE_KEY, "not json at all").unwrap();

        let store = KvExpenseStore::new(backend);

        assert_eq!(store.list().unwrap(), vec![]);
    }

    #[test]
    fn add_appends_one_record_with_the_draft_fields() {
        let mut store = KvExpenseStore::new(MemoryBackend::new());
        store.add(draft("Ăn sáng", 35000.0, Category::Food)).unwrap();

        let added = store.add(draft("Xe bus", 7000.0, Category::Transport)).unwrap();
        let expenses = store.list().unwrap();

        assert_eq!(expenses.len(), 2);

        let last = expenses.last().unwrap();
        assert_eq!(last, &added);
        assert_eq!(last.title(), "Xe bus");
        assert_eq!(last.amount(), 7000.0);
        assert_eq!(last.date(), datetime!(2024-03-01 07:30 UTC));
        assert_eq!(last.category(), Category::Transport);
    }

    #[test]
    fn add_assigns_distinct_ids() {
        let mut store = KvExpenseStore::new(MemoryBackend::new());

        let first = store.add(draft("Ăn sáng", 35000.0, Category::Food)).unwrap();
        let second = store.add(draft("Ăn sáng", 35000.0, Category::Food)).unwrap();

        assert!(!first.id().is_empty());
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn update_replaces_every_field_except_the_id() {
        let mut store = KvExpenseStore::new(MemoryBackend::new());
        let original = store.add(draft("Ăn sáng", 35000.0, Category::Food)).unwrap();

        store
            .update(original.id(), draft("Ăn trưa", 52000.0, Category::Food))
            .unwrap();

        let expenses = store.list().unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].id(), original.id());
        assert_eq!(expenses[0].title(), "Ăn trưa");
        assert_eq!(expenses[0].amount(), 52000.0);
    }

    #[test]
    fn update_with_unknown_id_writes_nothing() {
        let mut backend = CountingBackend::default();
        backend
            .inner
            .set(STORAGE_KEY, r#"[]"#)
            .unwrap();
        let mut store = KvExpenseStore::new(backend);

        store
            .update("missing", draft("Ăn sáng", 35000.0, Category::Food))
            .unwrap();

        // The store never called set: the no-op skips the write entirely.
        assert_eq!(store.backend.writes, 0);
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn delete_removes_the_record_and_is_idempotent() {
        let mut store = KvExpenseStore::new(MemoryBackend::new());
        let keep = store.add(draft("Ăn sáng", 35000.0, Category::Food)).unwrap();
        let remove = store.add(draft("Xe bus", 7000.0, Category::Transport)).unwrap();

        store.delete(remove.id()).unwrap();

        let expenses = store.list().unwrap();
        assert_eq!(expenses.len(), 1);
        assert!(expenses.iter().all(|expense| expense.id() != remove.id()));
        assert_eq!(expenses[0].id(), keep.id());

        // A second delete of the same ID succeeds and changes nothing.
        store.delete(remove.id()).unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn collection_round_trips_through_a_file_backend() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = KvExpenseStore::new(FileBackend::new(dir.path()).unwrap());
        store.add(draft("Ăn sáng", 35000.0, Category::Food)).unwrap();
        store.add(draft("Mua sách", 150000.0, Category::Other)).unwrap();
        let written = store.list().unwrap();

        let reopened = KvExpenseStore::new(FileBackend::new(dir.path()).unwrap());

        assert_eq!(reopened.list().unwrap(), written);
    }
}
