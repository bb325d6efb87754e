//! In-memory table used by the mock repositories.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub struct MemTable<M> {
    rows: Mutex<BTreeMap<i32, M>>,
    last_id: Mutex<i32>,
}

impl<M> Default for MemTable<M> {
    fn default() -> Self {
        Self { rows: Mutex::new(BTreeMap::new()), last_id: Mutex::new(0) }
    }
}

impl<M: Clone> MemTable<M> {
    fn rows(&self) -> MutexGuard<'_, BTreeMap<i32, M>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Rows in id order.
    pub fn all(&self) -> Vec<M> {
        self.rows().values().cloned().collect()
    }

    pub fn get(&self, id: i32) -> Option<M> {
        self.rows().get(&id).cloned()
    }

    pub fn filter(&self, pred: impl Fn(&M) -> bool) -> Vec<M> {
        self.rows().values().filter(|m| pred(m)).cloned().collect()
    }

    pub fn count(&self, pred: impl Fn(&M) -> bool) -> u64 {
        self.rows().values().filter(|m| pred(m)).count() as u64
    }

    pub fn find(&self, pred: impl Fn(&M) -> bool) -> Option<M> {
        self.rows().values().find(|m| pred(m)).cloned()
    }

    /// Assign the next id and store the row built from it.
    pub fn insert_with(&self, build: impl FnOnce(i32) -> M) -> M {
        let id = {
            let mut last = self.last_id.lock().unwrap_or_else(PoisonError::into_inner);
            *last += 1;
            *last
        };
        let row = build(id);
        self.rows().insert(id, row.clone());
        row
    }

    /// Overwrite an existing row; `None` when the id is unknown.
    pub fn replace(&self, id: i32, row: M) -> Option<M> {
        let mut rows = self.rows();
        if !rows.contains_key(&id) {
            return None;
        }
        rows.insert(id, row.clone());
        Some(row)
    }

    pub fn remove(&self, id: i32) -> bool {
        self.rows().remove(&id).is_some()
    }

    /// Drop every row matching `pred`.
    pub fn retain(&self, pred: impl Fn(&M) -> bool) {
        self.rows().retain(|_, m| pred(m));
    }

    pub fn len(&self) -> u64 {
        self.rows().len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_and_not_reused() {
        let table = MemTable::<(i32, &str)>::default();
        let a = table.insert_with(|id| (id, "a"));
        let b = table.insert_with(|id| (id, "b"));
        assert_eq!((a.0, b.0), (1, 2));
        assert!(table.remove(2));
        let c = table.insert_with(|id| (id, "c"));
        assert_eq!(c.0, 3);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn replace_requires_existing_row() {
        let table = MemTable::<(i32, &str)>::default();
        assert!(table.replace(1, (1, "x")).is_none());
        table.insert_with(|id| (id, "x"));
        assert_eq!(table.replace(1, (1, "y")), Some((1, "y")));
        assert_eq!(table.get(1), Some((1, "y")));
    }
}
