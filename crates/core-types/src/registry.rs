use crate::error::CoreError;
use crate::structs::{CostItem, TransactionRow};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// The seller's unit-cost registry, unique by barcode and kept in insertion order.
///
/// Stored as a plain array of items; loading one goes through [`CostRegistry::new`]
/// so a file with a repeated barcode keeps only its last entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CostItem>", into = "Vec<CostItem>")]
pub struct CostRegistry {
    items: Vec<CostItem>,
}

impl From<Vec<CostItem>> for CostRegistry {
    fn from(items: Vec<CostItem>) -> Self {
        Self::new(items)
    }
}

impl From<CostRegistry> for Vec<CostItem> {
    fn from(registry: CostRegistry) -> Self {
        registry.items
    }
}

/// A read-only snapshot of unit costs keyed by vendor code.
///
/// Codes are compared with surrounding whitespace stripped, on both the registry
/// and the report side.
///
/// Built once at the start of a computation so a registry edited afterwards
/// cannot change the result of a run already in progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostIndex {
    by_vendor: HashMap<String, Decimal>,
}

impl CostIndex {
    /// Unit cost for a vendor code; SKUs missing from the registry cost nothing.
    pub fn unit_cost(&self, vendor_code: &str) -> Decimal {
        self.by_vendor
            .get(vendor_code.trim())
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn contains(&self, vendor_code: &str) -> bool {
        self.by_vendor.contains_key(vendor_code.trim())
    }

    pub fn len(&self) -> usize {
        self.by_vendor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_vendor.is_empty()
    }
}

impl CostRegistry {
    /// Builds a registry, keeping the last entry for any repeated barcode.
    pub fn new(items: Vec<CostItem>) -> Self {
        let mut registry = Self::default();
        for item in items {
            registry.upsert(item);
        }
        registry
    }

    pub fn items(&self) -> &[CostItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, barcode: &str) -> Option<&CostItem> {
        self.items.iter().find(|item| item.barcode == barcode)
    }

    /// Inserts an item, replacing any existing entry with the same barcode in place.
    pub fn upsert(&mut self, item: CostItem) {
        match self.items.iter_mut().find(|i| i.barcode == item.barcode) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }

    /// Snapshots the registry into a vendor-code lookup.
    ///
    /// Several barcodes (sizes) may share one vendor code; the entry that comes
    /// later in registry order wins.
    pub fn cost_index(&self) -> CostIndex {
        let by_vendor = self
            .items
            .iter()
            .map(|item| (item.vendor_code.trim().to_string(), item.cost))
            .collect();
        CostIndex { by_vendor }
    }

    /// Registers every barcode seen in `rows` that the registry does not know yet,
    /// with a zero cost awaiting entry. Existing entries are never touched.
    ///
    /// Returns the number of entries added.
    pub fn sync_from_rows(&mut self, rows: &[TransactionRow], now: DateTime<Utc>) -> usize {
        let mut known: HashSet<String> = self.items.iter().map(|i| i.barcode.clone()).collect();
        let before = self.items.len();

        for row in rows {
            let barcode = row.barcode.trim();
            if barcode.is_empty() || known.contains(barcode) {
                continue;
            }
            known.insert(barcode.to_string());
            self.items.push(CostItem {
                barcode: barcode.to_string(),
                vendor_code: row.vendor_code.clone(),
                title: row.title.clone(),
                cost: Decimal::ZERO,
                updated_at: now,
            });
        }

        let added = self.items.len() - before;
        if added > 0 {
            tracing::debug!(added, total = self.items.len(), "Cost registry extended from report rows.");
        }
        added
    }

    /// Sets the unit cost of an existing entry.
    pub fn set_cost(
        &mut self,
        barcode: &str,
        cost: Decimal,
        now: DateTime<Utc>,
    ) -> Result<(), CoreError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.barcode == barcode)
            .ok_or_else(|| CoreError::UnknownBarcode(barcode.to_string()))?;
        item.cost = cost;
        item.updated_at = now;
        Ok(())
    }

    /// Entries in review order: those still missing a cost first, then the rest,
    /// each group ordered by vendor code.
    pub fn pending(&self) -> Vec<&CostItem> {
        let mut items: Vec<&CostItem> = self.items.iter().collect();
        items.sort_by(|a, b| {
            b.cost
                .is_zero()
                .cmp(&a.cost.is_zero())
                .then_with(|| a.vendor_code.cmp(&b.vendor_code))
        });
        items
    }
}
