use crate::SkuProfitability;
use crate::error::AnalyzerError;
use core_types::AbcTier;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Metric a SKU table can be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    QtySold,
    BuyoutPct,
    Revenue,
    Cogs,
    TotalLogistics,
    #[default]
    NetProfit,
    Margin,
}

impl SortField {
    pub const NAMES: [&'static str; 7] = [
        "qty-sold",
        "buyout",
        "revenue",
        "cogs",
        "logistics",
        "net-profit",
        "margin",
    ];

    fn key(&self, sku: &SkuProfitability) -> Decimal {
        let s = &sku.statement.summary;
        match self {
            SortField::QtySold => s.qty_sold,
            SortField::BuyoutPct => s.buyout_pct,
            SortField::Revenue => s.revenue,
            SortField::Cogs => s.cogs,
            SortField::TotalLogistics => s.logistics.total,
            SortField::NetProfit => s.net_profit,
            SortField::Margin => s.margin_pct,
        }
    }
}

impl FromStr for SortField {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "qty-sold" => Ok(SortField::QtySold),
            "buyout" => Ok(SortField::BuyoutPct),
            "revenue" => Ok(SortField::Revenue),
            "cogs" => Ok(SortField::Cogs),
            "logistics" => Ok(SortField::TotalLogistics),
            "net-profit" => Ok(SortField::NetProfit),
            "margin" => Ok(SortField::Margin),
            other => Err(AnalyzerError::UnknownSortField(
                other.to_string(),
                Self::NAMES.join(", "),
            )),
        }
    }
}

/// Search, tier filter and ordering over a ranked SKU list.
#[derive(Debug, Clone)]
pub struct SkuQuery {
    pub search: Option<String>,
    pub tier: Option<AbcTier>,
    pub sort: SortField,
    pub descending: bool,
}

impl Default for SkuQuery {
    fn default() -> Self {
        Self {
            search: None,
            tier: None,
            sort: SortField::NetProfit,
            descending: true,
        }
    }
}

impl SkuQuery {
    /// Returns the matching SKUs in the requested order. Equal keys keep their
    /// ranking order.
    pub fn apply<'a>(&self, skus: &'a [SkuProfitability]) -> Vec<&'a SkuProfitability> {
        let needle = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut selected: Vec<&SkuProfitability> = skus
            .iter()
            .filter(|sku| self.tier.is_none_or(|tier| sku.tier == tier))
            .filter(|sku| match &needle {
                Some(needle) => {
                    sku.statement.vendor_code.to_lowercase().contains(needle)
                        || sku.statement.title.to_lowercase().contains(needle)
                }
                None => true,
            })
            .collect();

        selected.sort_by(|a, b| {
            let ordering = self.sort.key(a).cmp(&self.sort.key(b));
            if self.descending { ordering.reverse() } else { ordering }
        });
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AbcClassifier;
    use analytics::{AggregateSummary, SkuStatement};
    use rust_decimal_macros::dec;

    fn ranked() -> Vec<SkuProfitability> {
        let statement = |vendor: &str, title: &str, profit: Decimal, revenue: Decimal| SkuStatement {
            vendor_code: vendor.to_string(),
            barcode: String::new(),
            title: title.to_string(),
            summary: AggregateSummary {
                net_profit: profit,
                revenue,
                ..Default::default()
            },
        };
        AbcClassifier::default().rank(vec![
            statement("TEE-BLACK", "Футболка чёрная", dec!(900), dec!(3000)),
            statement("TEE-WHITE", "Футболка белая", dec!(100), dec!(5000)),
            statement("HOOD-1", "Худи", dec!(-50), dec!(1000)),
        ])
    }

    fn codes(view: &[&SkuProfitability]) -> Vec<String> {
        view.iter().map(|s| s.statement.vendor_code.clone()).collect()
    }

    #[test]
    fn default_query_orders_by_profit_descending() {
        let skus = ranked();
        let view = SkuQuery::default().apply(&skus);
        assert_eq!(codes(&view), vec!["TEE-BLACK", "TEE-WHITE", "HOOD-1"]);
    }

    #[test]
    fn search_matches_vendor_code_or_title() {
        let skus = ranked();
        let by_code = SkuQuery {
            search: Some("tee".to_string()),
            ..Default::default()
        };
        assert_eq!(by_code.apply(&skus).len(), 2);

        let by_title = SkuQuery {
            search: Some("ХУДИ".to_string()),
            ..Default::default()
        };
        assert_eq!(codes(&by_title.apply(&skus)), vec!["HOOD-1"]);
    }

    #[test]
    fn tier_filter_and_ascending_sort() {
        let skus = ranked();
        let losses = SkuQuery {
            tier: Some(AbcTier::D),
            ..Default::default()
        };
        assert_eq!(codes(&losses.apply(&skus)), vec!["HOOD-1"]);

        let by_revenue = SkuQuery {
            sort: SortField::Revenue,
            descending: false,
            ..Default::default()
        };
        assert_eq!(
            codes(&by_revenue.apply(&skus)),
            vec!["HOOD-1", "TEE-BLACK", "TEE-WHITE"]
        );
    }

    #[test]
    fn sort_field_parses_cli_names() {
        assert_eq!("net_profit".parse::<SortField>(), Ok(SortField::NetProfit));
        assert_eq!("Qty-Sold".parse::<SortField>(), Ok(SortField::QtySold));
        assert!("profit".parse::<SortField>().is_err());
    }
}
