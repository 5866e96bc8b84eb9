// ── Record tables ──
//
// One keyed table per record type. A table is a `BTreeMap` from natural
// key to record, so "look up by key before insert" holds structurally.
// On disk a table is a plain JSON array of records; keys are rebuilt
// on load.

use std::collections::BTreeMap;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::records::{
    OrderStatsRecord, ProductRecord, Record, SiteRecord, SiteVisitStatsRecord, SystemPluginRecord,
    TopEarnerStatsRecord,
};

/// All rows of one record type, keyed by natural key.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<R: Record> {
    rows: BTreeMap<R::Key, R>,
}

impl<R: Record> Default for Table<R> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }
}

impl<R: Record> Table<R> {
    pub fn get(&self, key: &R::Key) -> Option<&R> {
        self.rows.get(key)
    }

    pub fn contains(&self, key: &R::Key) -> bool {
        self.rows.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in key order.
    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.rows.values()
    }

    pub(crate) fn entry_or_insert_with(&mut self, key: R::Key, create: impl FnOnce() -> R) -> &mut R {
        self.rows.entry(key).or_insert_with(create)
    }

    /// Insert by the record's own key, returning the row it replaced.
    pub(crate) fn insert(&mut self, record: R) -> Option<R> {
        self.rows.insert(record.key(), record)
    }

    pub(crate) fn remove(&mut self, key: &R::Key) -> Option<R> {
        self.rows.remove(key)
    }

    pub(crate) fn clear(&mut self) -> usize {
        let count = self.rows.len();
        self.rows.clear();
        count
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&R) -> bool) -> usize {
        let before = self.rows.len();
        self.rows.retain(|_, row| keep(row));
        before - self.rows.len()
    }
}

impl<R: Record> Serialize for Table<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows.values())
    }
}

impl<'de, R: Record> Deserialize<'de> for Table<R> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<R>::deserialize(deserializer)?;
        Ok(Self {
            rows: rows.into_iter().map(|r| (r.key(), r)).collect(),
        })
    }
}

// ── Tables ───────────────────────────────────────────────────────────

/// The complete committed state of the storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tables {
    pub order_stats: Table<OrderStatsRecord>,
    pub site_visit_stats: Table<SiteVisitStatsRecord>,
    pub top_earner_stats: Table<TopEarnerStatsRecord>,
    pub system_plugins: Table<SystemPluginRecord>,
    pub products: Table<ProductRecord>,
    pub sites: Table<SiteRecord>,
}

/// A record type that has a table in [`Tables`].
pub trait Entity: Record {
    fn table(tables: &Tables) -> &Table<Self>;
    fn table_mut(tables: &mut Tables) -> &mut Table<Self>;
}

macro_rules! impl_entity {
    ($($record:ty => $field:ident),* $(,)?) => {
        $(
            impl Entity for $record {
                fn table(tables: &Tables) -> &Table<Self> {
                    &tables.$field
                }

                fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
                    &mut tables.$field
                }
            }
        )*
    };
}

impl_entity! {
    OrderStatsRecord => order_stats,
    SiteVisitStatsRecord => site_visit_stats,
    TopEarnerStatsRecord => top_earner_stats,
    SystemPluginRecord => system_plugins,
    ProductRecord => products,
    SiteRecord => sites,
}
