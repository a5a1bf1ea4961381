use crate::classifier::classify;
use crate::ledger::Ledger;
use crate::report::{AggregateSummary, SkuStatement};
use core_types::{CostRegistry, TaxRegime, TransactionRow};
use std::collections::HashMap;

/// Group key for rows without a vendor code.
pub const UNIDENTIFIED_SKU: &str = "unidentified";

/// Title used when the first row of a SKU carries none.
pub const UNTITLED_PRODUCT: &str = "untitled";

/// A stateless calculator for deriving P&L statements from settlement rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct PnlEngine {
    regime: TaxRegime,
}

impl PnlEngine {
    pub fn new(regime: TaxRegime) -> Self {
        Self { regime }
    }

    pub fn regime(&self) -> TaxRegime {
        self.regime
    }

    /// The statement of the whole row set.
    ///
    /// # Arguments
    ///
    /// * `rows` - Parsed settlement rows, in report order.
    /// * `registry` - Unit costs, snapshotted once on entry.
    #[tracing::instrument(name = "pnl_aggregate", skip_all, fields(rows = rows.len(), regime = %self.regime))]
    pub fn aggregate(&self, rows: &[TransactionRow], registry: &CostRegistry) -> AggregateSummary {
        let costs = registry.cost_index();
        let mut ledger = Ledger::new();

        for row in rows {
            let class = classify(row);
            ledger.post(row, &class, costs.unit_cost(&row.vendor_code));
        }

        let summary = ledger.close(self.regime);
        tracing::debug!(
            revenue = %summary.revenue,
            net_cash = %summary.net_cash,
            net_profit = %summary.net_profit,
            unclassified_logistics = %summary.logistics.unclassified.cost,
            "Aggregate statement computed."
        );
        summary
    }

    /// One statement per vendor code, in order of first appearance.
    ///
    /// Each SKU is accumulated from its own rows; nothing is apportioned from the
    /// aggregate, so the per-SKU figures carry no rounding of their own.
    #[tracing::instrument(name = "pnl_per_sku", skip_all, fields(rows = rows.len(), regime = %self.regime))]
    pub fn per_sku(&self, rows: &[TransactionRow], registry: &CostRegistry) -> Vec<SkuStatement> {
        let costs = registry.cost_index();
        let mut order: Vec<SkuGroup> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for row in rows {
            let key = sku_key(row);
            let position = *positions.entry(key).or_insert_with(|| {
                order.push(SkuGroup::open(key, row));
                order.len() - 1
            });
            let group = &mut order[position];
            let class = classify(row);
            group.ledger.post(row, &class, costs.unit_cost(&row.vendor_code));
        }

        let unmapped = order
            .iter()
            .filter(|g| !costs.contains(&g.vendor_code))
            .count();
        if unmapped > 0 && !costs.is_empty() {
            tracing::warn!(unmapped, "Some SKUs have no registry cost; their COGS is zero.");
        }

        order
            .into_iter()
            .map(|group| SkuStatement {
                summary: group.ledger.close(self.regime),
                vendor_code: group.vendor_code,
                barcode: group.barcode,
                title: group.title,
            })
            .collect()
    }
}

struct SkuGroup {
    vendor_code: String,
    barcode: String,
    title: String,
    ledger: Ledger,
}

impl SkuGroup {
    fn open(key: &str, first: &TransactionRow) -> Self {
        let title = first.title.trim();
        Self {
            vendor_code: key.to_string(),
            barcode: first.barcode.clone(),
            title: if title.is_empty() {
                UNTITLED_PRODUCT.to_string()
            } else {
                title.to_string()
            },
            ledger: Ledger::new(),
        }
    }
}

fn sku_key(row: &TransactionRow) -> &str {
    let code = row.vendor_code.trim();
    if code.is_empty() { UNIDENTIFIED_SKU } else { code }
}
