// ── Storage context ──
//
// A private working copy of the committed tables. Write closures run
// against a context; the manager commits it afterwards only if it
// differs from the snapshot it was created from.

use std::sync::Arc;

use crate::tables::{Entity, Tables};

/// Mutable working copy handed to write closures.
pub struct StorageContext {
    base: Arc<Tables>,
    tables: Tables,
    touched: bool,
}

impl StorageContext {
    // Copies every table, and `has_changes` compares them all again:
    // each write costs O(cache size).
    pub(crate) fn new(base: Arc<Tables>) -> Self {
        let tables = (*base).clone();
        Self {
            base,
            tables,
            touched: false,
        }
    }

    /// Look up a row by natural key.
    pub fn load<R: Entity>(&self, key: &R::Key) -> Option<&R> {
        R::table(&self.tables).get(key)
    }

    /// All rows of a type, in key order.
    pub fn load_all<R: Entity>(&self) -> impl Iterator<Item = &R> {
        R::table(&self.tables).iter()
    }

    /// Return the row for `key`, inserting `create()` first if there is none.
    ///
    /// `create` must produce a row whose own key equals `key`.
    pub fn load_or_insert<R: Entity>(&mut self, key: R::Key, create: impl FnOnce() -> R) -> &mut R {
        self.touched = true;
        let row = R::table_mut(&mut self.tables).entry_or_insert_with(key.clone(), create);
        debug_assert_eq!(row.key(), key, "{} created under a foreign key", R::NAME);
        row
    }

    /// Insert or replace a row by its own key. Returns the replaced row.
    pub fn insert<R: Entity>(&mut self, record: R) -> Option<R> {
        self.touched = true;
        R::table_mut(&mut self.tables).insert(record)
    }

    pub fn delete<R: Entity>(&mut self, key: &R::Key) -> Option<R> {
        let removed = R::table_mut(&mut self.tables).remove(key);
        if removed.is_some() {
            self.touched = true;
        }
        removed
    }

    /// Delete every row of a type. Returns how many were removed.
    pub fn delete_all<R: Entity>(&mut self) -> usize {
        let removed = R::table_mut(&mut self.tables).clear();
        self.touched |= removed > 0;
        removed
    }

    /// Delete the rows matching `predicate`. Returns how many were removed.
    pub fn delete_where<R: Entity>(&mut self, mut predicate: impl FnMut(&R) -> bool) -> usize {
        let removed = R::table_mut(&mut self.tables).retain(|row| !predicate(row));
        self.touched |= removed > 0;
        removed
    }

    /// Whether committing this context would change the stored state.
    pub fn has_changes(&self) -> bool {
        self.touched && self.tables != *self.base
    }

    pub(crate) fn into_tables(self) -> Tables {
        self.tables
    }
}
