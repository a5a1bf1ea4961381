use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// VAT applied to realized revenue in the settlement statement, whatever the tax regime.
pub const VAT_RATE: Decimal = dec!(0.05);

/// Money and units routed to one logistics direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogisticsBucket {
    pub cost: Decimal,
    pub units: Decimal,
}

impl LogisticsBucket {
    /// Average cost per unit, zero when no units were counted.
    pub fn avg_cost(&self) -> Decimal {
        if self.units > Decimal::ZERO {
            self.cost / self.units
        } else {
            Decimal::ZERO
        }
    }
}

/// Logistics cost split by direction.
///
/// `total` is the sum recorded in the report itself; the three buckets always add
/// up to it exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogisticsSplit {
    pub forward: LogisticsBucket,
    pub returns: LogisticsBucket,
    pub unclassified: LogisticsBucket,
    pub total: Decimal,
    pub avg_cost_forward: Decimal,
    pub avg_cost_return: Decimal,
}

impl LogisticsSplit {
    pub fn classified_total(&self) -> Decimal {
        self.forward.cost + self.returns.cost + self.unclassified.cost
    }
}

/// The P&L waterfall of a row set, from realized revenue down to net profit.
///
/// The same record describes the whole report and a single SKU.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateSummary {
    // I. Volume
    pub qty_sold: Decimal,
    pub qty_returned: Decimal,
    pub buyout_pct: Decimal,
    pub avg_price: Decimal,

    // II. Revenue
    pub revenue: Decimal,
    pub payout_base: Decimal,

    // III. Marketplace expenses
    pub logistics: LogisticsSplit,
    pub storage: Decimal,
    pub fines: Decimal,
    pub deductions: Decimal,
    pub acceptance: Decimal,
    pub adjustments: Decimal,
    pub total_expenses: Decimal,
    pub net_cash: Decimal,

    // IV. Taxes, goods and profit
    pub tax: Decimal,
    pub vat: Decimal,
    pub cogs: Decimal,
    pub net_profit: Decimal,
    pub margin_pct: Decimal,
    pub roi_pct: Decimal,
    pub profit_per_unit: Decimal,
    pub logistics_per_unit: Decimal,
}

/// The statement of one SKU, identified by vendor code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuStatement {
    pub vendor_code: String,
    pub barcode: String,
    pub title: String,
    #[serde(flatten)]
    pub summary: AggregateSummary,
}

impl SkuStatement {
    pub fn net_profit(&self) -> Decimal {
        self.summary.net_profit
    }
}
