use analytics::SkuStatement;
use core_types::AbcTier;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

pub mod error;
pub mod view;

pub use error::AnalyzerError;
pub use view::{SkuQuery, SortField};

/// A SKU statement together with its place in the profitability ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuProfitability {
    #[serde(flatten)]
    pub statement: SkuStatement,
    pub tier: AbcTier,
    /// Running share of total positive profit up to and including this SKU.
    /// `None` for tier D.
    pub cumulative_share_pct: Option<Decimal>,
}

impl SkuProfitability {
    pub fn net_profit(&self) -> Decimal {
        self.statement.net_profit()
    }
}

/// Pareto classification of SKUs by their share of the report's positive profit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbcClassifier {
    a_threshold_pct: Decimal,
    b_threshold_pct: Decimal,
}

impl Default for AbcClassifier {
    fn default() -> Self {
        Self {
            a_threshold_pct: dec!(80),
            b_threshold_pct: dec!(95),
        }
    }
}

impl AbcClassifier {
    /// Creates a classifier with custom cumulative-share cut-offs.
    pub fn new(a_threshold_pct: Decimal, b_threshold_pct: Decimal) -> Result<Self, AnalyzerError> {
        if a_threshold_pct <= Decimal::ZERO
            || a_threshold_pct >= b_threshold_pct
            || b_threshold_pct > dec!(100)
        {
            return Err(AnalyzerError::InvalidThresholds(
                a_threshold_pct.to_string(),
                b_threshold_pct.to_string(),
            ));
        }
        Ok(Self {
            a_threshold_pct,
            b_threshold_pct,
        })
    }

    /// Ranks the statements by net profit, descending, and assigns every SKU a tier.
    ///
    /// The sort is stable, so SKUs with equal profit keep their input order.
    /// Loss-making and break-even SKUs are tier D and never enter the cumulative share.
    pub fn rank(&self, statements: Vec<SkuStatement>) -> Vec<SkuProfitability> {
        // 1. Sort
        let mut sorted = statements;
        sorted.sort_by(|a, b| b.net_profit().cmp(&a.net_profit()));

        // 2. Total of the profitable SKUs only
        let total_positive: Decimal = sorted
            .iter()
            .map(SkuStatement::net_profit)
            .filter(|profit| *profit > Decimal::ZERO)
            .sum();

        // 3. Walk and classify
        let mut running = Decimal::ZERO;
        let ranked: Vec<SkuProfitability> = sorted
            .into_iter()
            .map(|statement| {
                let profit = statement.net_profit();
                if profit <= Decimal::ZERO || total_positive <= Decimal::ZERO {
                    return SkuProfitability {
                        statement,
                        tier: AbcTier::D,
                        cumulative_share_pct: None,
                    };
                }

                running += profit;
                let share = running / total_positive * dec!(100);
                SkuProfitability {
                    statement,
                    tier: self.tier_for(share),
                    cumulative_share_pct: Some(share),
                }
            })
            .collect();

        tracing::debug!(
            skus = ranked.len(),
            total_positive_profit = %total_positive,
            "SKU ranking complete."
        );
        ranked
    }

    fn tier_for(&self, cumulative_share_pct: Decimal) -> AbcTier {
        if cumulative_share_pct <= self.a_threshold_pct {
            AbcTier::A
        } else if cumulative_share_pct <= self.b_threshold_pct {
            AbcTier::B
        } else {
            AbcTier::C
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::AggregateSummary;

    fn statement(vendor: &str, net_profit: Decimal) -> SkuStatement {
        SkuStatement {
            vendor_code: vendor.to_string(),
            barcode: String::new(),
            title: vendor.to_string(),
            summary: AggregateSummary {
                net_profit,
                ..Default::default()
            },
        }
    }

    fn tiers(ranked: &[SkuProfitability]) -> Vec<(&str, AbcTier)> {
        ranked
            .iter()
            .map(|s| (s.statement.vendor_code.as_str(), s.tier))
            .collect()
    }

    #[test]
    fn pareto_tiers_follow_cumulative_share() {
        let ranked = AbcClassifier::default().rank(vec![
            statement("small", dec!(50)),
            statement("loss", dec!(-200)),
            statement("big", dec!(700)),
            statement("mid", dec!(150)),
            statement("tail", dec!(100)),
        ]);

        // Shares: big 70, mid 85, tail 95, small 100.
        assert_eq!(
            tiers(&ranked),
            vec![
                ("big", AbcTier::A),
                ("mid", AbcTier::B),
                ("tail", AbcTier::B),
                ("small", AbcTier::C),
                ("loss", AbcTier::D),
            ]
        );
        assert_eq!(ranked[2].cumulative_share_pct, Some(dec!(95)));
        assert_eq!(ranked[4].cumulative_share_pct, None);
    }

    #[test]
    fn exactly_eighty_percent_is_still_tier_a() {
        let ranked = AbcClassifier::default().rank(vec![
            statement("a", dec!(80)),
            statement("b", dec!(20)),
        ]);
        assert_eq!(ranked[0].tier, AbcTier::A);
        assert_eq!(ranked[1].tier, AbcTier::C);
    }

    #[test]
    fn break_even_and_all_loss_reports_are_tier_d() {
        let ranked = AbcClassifier::default().rank(vec![
            statement("zero", Decimal::ZERO),
            statement("loss", dec!(-1)),
        ]);
        assert!(ranked.iter().all(|s| s.tier == AbcTier::D));
        assert!(AbcClassifier::default().rank(Vec::new()).is_empty());
    }

    #[test]
    fn tier_boundary_is_respected_by_construction() {
        let profits = [dec!(400), dec!(250), dec!(120), dec!(90), dec!(60), dec!(50), dec!(30)];
        let ranked = AbcClassifier::default().rank(
            profits
                .iter()
                .enumerate()
                .map(|(i, p)| statement(&format!("sku{i}"), *p))
                .collect(),
        );

        let last_a = ranked.iter().rposition(|s| s.tier == AbcTier::A).unwrap();
        assert!(ranked[last_a].cumulative_share_pct.unwrap() <= dec!(80));
        assert!(ranked[last_a + 1].cumulative_share_pct.unwrap() > dec!(80));
    }

    #[test]
    fn ties_keep_input_order() {
        let ranked = AbcClassifier::default().rank(vec![
            statement("first", dec!(10)),
            statement("second", dec!(10)),
        ]);
        assert_eq!(ranked[0].statement.vendor_code, "first");
        assert_eq!(ranked[1].statement.vendor_code, "second");
    }

    #[test]
    fn custom_thresholds_are_validated() {
        assert!(AbcClassifier::new(dec!(70), dec!(90)).is_ok());
        assert!(AbcClassifier::new(dec!(90), dec!(90)).is_err());
        assert!(AbcClassifier::new(dec!(0), dec!(90)).is_err());
        assert!(AbcClassifier::new(dec!(80), dec!(101)).is_err());
    }
}
