use crate::ledger::percent_of;
use crate::report::AggregateSummary;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    NetProfit,
    Cogs,
    TaxesAndVat,
    /// Commission and services retained by the marketplace (`revenue - netCash`).
    MarketplaceShare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitSegment {
    pub kind: SegmentKind,
    pub amount: Decimal,
    /// Share of the sum of all segments, 0-100.
    pub share_pct: Decimal,
}

/// Where the realized revenue of a statement went.
///
/// Only positive segments are kept; a loss-making statement therefore has no
/// net-profit segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitStructure {
    pub segments: Vec<ProfitSegment>,
    pub total: Decimal,
}

impl ProfitStructure {
    pub fn from_summary(summary: &AggregateSummary) -> Self {
        let candidates = [
            (SegmentKind::NetProfit, summary.net_profit),
            (SegmentKind::Cogs, summary.cogs),
            (SegmentKind::TaxesAndVat, summary.tax + summary.vat),
            (
                SegmentKind::MarketplaceShare,
                summary.revenue - summary.net_cash,
            ),
        ];

        let kept: Vec<(SegmentKind, Decimal)> = candidates
            .into_iter()
            .filter(|(_, amount)| *amount > Decimal::ZERO)
            .collect();
        let total: Decimal = kept.iter().map(|(_, amount)| *amount).sum();

        let segments = kept
            .into_iter()
            .map(|(kind, amount)| ProfitSegment {
                kind,
                amount,
                share_pct: percent_of(amount, total),
            })
            .collect();

        Self { segments, total }
    }

    pub fn segment(&self, kind: SegmentKind) -> Option<&ProfitSegment> {
        self.segments.iter().find(|s| s.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn segments_cover_revenue_split() {
        let summary = AggregateSummary {
            revenue: dec!(2000),
            net_cash: dec!(1800),
            cogs: dec!(600),
            tax: dec!(120),
            vat: dec!(100),
            net_profit: dec!(980),
            ..Default::default()
        };
        let structure = ProfitStructure::from_summary(&summary);

        assert_eq!(structure.total, dec!(2000));
        assert_eq!(structure.segments.len(), 4);
        assert_eq!(
            structure.segment(SegmentKind::NetProfit).map(|s| s.share_pct),
            Some(dec!(49))
        );
        assert_eq!(
            structure.segment(SegmentKind::MarketplaceShare).map(|s| s.amount),
            Some(dec!(200))
        );
    }

    #[test]
    fn loss_drops_the_profit_segment() {
        let summary = AggregateSummary {
            revenue: dec!(1000),
            net_cash: dec!(1000),
            cogs: dec!(1200),
            vat: dec!(50),
            net_profit: dec!(-250),
            ..Default::default()
        };
        let structure = ProfitStructure::from_summary(&summary);

        assert!(structure.segment(SegmentKind::NetProfit).is_none());
        assert!(structure.segment(SegmentKind::MarketplaceShare).is_none());
        assert_eq!(structure.total, dec!(1250));
    }

    #[test]
    fn empty_summary_has_no_segments() {
        let structure = ProfitStructure::from_summary(&AggregateSummary::default());
        assert!(structure.segments.is_empty());
        assert_eq!(structure.total, Decimal::ZERO);
    }
}
