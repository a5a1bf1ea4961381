use crate::report::AggregateSummary;
use core_types::TransactionRow;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Headline figures stored alongside a saved report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub revenue: Decimal,
    pub realized: Decimal,
    /// Net cash the seller receives.
    pub to_pay: Decimal,
    pub net_profit: Decimal,
    /// Sale date of the first row, as written in the report.
    pub period: String,
}

impl ReportSummary {
    pub fn from_aggregate(summary: &AggregateSummary, rows: &[TransactionRow]) -> Self {
        Self {
            revenue: summary.revenue,
            realized: summary.revenue,
            to_pay: summary.net_cash,
            net_profit: summary.net_profit,
            period: rows
                .first()
                .map(|row| row.sale_date.clone())
                .unwrap_or_default(),
        }
    }
}

/// Concatenates the rows of several reports, in the order given, into one row set
/// (e.g. weekly reports into a monthly one).
pub fn merge_reports<'a, I>(reports: I) -> Vec<TransactionRow>
where
    I: IntoIterator<Item = &'a [TransactionRow]>,
{
    reports
        .into_iter()
        .flat_map(|rows| rows.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PnlEngine;
    use core_types::CostRegistry;
    use rust_decimal_macros::dec;

    fn sale(date: &str, realized: Decimal) -> TransactionRow {
        TransactionRow {
            vendor_code: "SKU1".to_string(),
            payment_reason: "Продажа".to_string(),
            quantity: dec!(1),
            wb_realized: realized,
            ppvz_for_pay: realized,
            sale_date: date.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn summary_takes_period_from_first_row() {
        let rows = vec![sale("2024-05-01", dec!(100)), sale("2024-05-07", dec!(50))];
        let aggregate = PnlEngine::default().aggregate(&rows, &CostRegistry::default());
        let summary = ReportSummary::from_aggregate(&aggregate, &rows);

        assert_eq!(summary.period, "2024-05-01");
        assert_eq!(summary.revenue, dec!(150));
        assert_eq!(summary.realized, summary.revenue);
        assert_eq!(summary.to_pay, dec!(150));
    }

    #[test]
    fn summary_of_empty_report_has_blank_period() {
        let summary = ReportSummary::from_aggregate(&AggregateSummary::default(), &[]);
        assert!(summary.period.is_empty());
    }

    #[test]
    fn merged_reports_aggregate_like_one() {
        let week1 = vec![sale("2024-05-01", dec!(100))];
        let week2 = vec![sale("2024-05-08", dec!(200)), sale("2024-05-09", dec!(300))];

        let merged = merge_reports([week1.as_slice(), week2.as_slice()]);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].sale_date, "2024-05-01");
        let aggregate = PnlEngine::default().aggregate(&merged, &CostRegistry::default());
        assert_eq!(aggregate.revenue, dec!(600));
    }
}
