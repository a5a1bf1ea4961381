use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of a marketplace settlement report, as produced by the report parser.
///
/// Every numeric field defaults to zero and every text field to an empty string,
/// so a parser that drops a column still yields a well-formed row. Amounts are in
/// the report currency; counts are carried as decimals because the source sheet
/// does not distinguish integer columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionRow {
    /// Seller SKU identifier; groups rows for SKU-level statistics.
    pub vendor_code: String,
    pub barcode: String,
    pub title: String,
    /// Units affected by the row. Only meaningful on sale and return rows.
    pub quantity: Decimal,
    /// Free-text operation reason ("Продажа", "Логистика", "Возврат", ...).
    pub payment_reason: String,
    /// Free-text logistics direction ("К клиенту при продаже", ...).
    pub logistics_type: String,
    pub delivery_count: Decimal,
    pub return_count: Decimal,
    /// Gross amount the marketplace realized for the goods.
    pub wb_realized: Decimal,
    /// Amount due to the seller before the marketplace's own service deductions.
    pub ppvz_for_pay: Decimal,
    pub logistics_rub: Decimal,
    pub storage_rub: Decimal,
    pub fine: Decimal,
    /// Sum of the report's "deductions" and "other deductions" columns.
    pub other_deductions_rub: Decimal,
    pub acceptance_rub: Decimal,
    pub additional_payment: Decimal,
    pub retail_price_with_disc: Decimal,
    /// Marketplace reward excluding VAT.
    pub commission_rub: Decimal,
    pub sale_date: String,
}

/// Unit cost of one SKU as kept in the seller's cost registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostItem {
    pub barcode: String,
    pub vendor_code: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub cost: Decimal,
    pub updated_at: DateTime<Utc>,
}
