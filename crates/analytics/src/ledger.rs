use crate::classifier::{LogisticsDirection, RowClass};
use crate::report::{AggregateSummary, LogisticsBucket, LogisticsSplit, VAT_RATE};
use core_types::{TaxBase, TaxRegime, TransactionRow};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Running totals of one row set. Posting never rounds; all ratios are derived in
/// [`Ledger::close`].
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    qty_sold: Decimal,
    qty_returned: Decimal,
    total_retail_with_disc: Decimal,
    revenue: Decimal,
    payout_base: Decimal,
    cogs: Decimal,
    forward: LogisticsBucket,
    returns: LogisticsBucket,
    unclassified: LogisticsBucket,
    total_logistics: Decimal,
    storage: Decimal,
    fines: Decimal,
    deductions: Decimal,
    acceptance: Decimal,
    adjustments: Decimal,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Posts one classified row. `unit_cost` is the registry cost of the row's SKU.
    ///
    /// Price and cost products saturate at the `Decimal` range instead of panicking;
    /// every other amount is a single report field and is added as is.
    pub fn post(&mut self, row: &TransactionRow, class: &RowClass, unit_cost: Decimal) {
        let goods_cost = unit_cost.saturating_mul(row.quantity);

        // --- Revenue, payout and goods ---
        if class.is_sale {
            self.qty_sold += row.quantity;
            self.total_retail_with_disc = self
                .total_retail_with_disc
                .saturating_add(row.retail_price_with_disc.saturating_mul(row.quantity));
            self.revenue += row.wb_realized;
            self.payout_base += row.ppvz_for_pay;
            self.cogs = self.cogs.saturating_add(goods_cost);
        } else if class.is_return_op {
            self.revenue -= row.wb_realized;
            self.payout_base -= row.ppvz_for_pay;
            self.cogs = self.cogs.saturating_sub(goods_cost);
        }

        // --- Logistics ---
        if let Some(direction) = class.logistics {
            self.qty_returned += row.return_count;
            self.total_logistics += row.logistics_rub;

            let (bucket, units) = match direction {
                LogisticsDirection::Forward => (&mut self.forward, row.delivery_count),
                LogisticsDirection::Return => (&mut self.returns, row.return_count),
                LogisticsDirection::Unclassified => (
                    &mut self.unclassified,
                    row.delivery_count + row.return_count,
                ),
            };
            bucket.cost += row.logistics_rub;
            bucket.units += units;
        }

        // --- Overheads, whatever the row is ---
        self.storage += row.storage_rub;
        self.fines += row.fine;
        self.deductions += row.other_deductions_rub;
        self.acceptance += row.acceptance_rub;
        self.adjustments += row.additional_payment;
    }

    /// Derives the full statement from the accumulated totals.
    pub fn close(&self, regime: TaxRegime) -> AggregateSummary {
        let total_expenses =
            self.total_logistics + self.storage + self.fines + self.deductions + self.acceptance;
        let net_cash = self.payout_base - total_expenses + self.adjustments;

        let tax = regime.assess(&TaxBase {
            turnover: self.revenue,
            income: net_cash,
            deductible: self.cogs,
        });
        let vat = self.revenue * VAT_RATE;
        let net_profit = net_cash - tax - vat - self.cogs;

        let buyout_pct = percent_of(self.qty_sold, self.qty_sold + self.qty_returned)
            .clamp(Decimal::ZERO, dec!(100));

        AggregateSummary {
            qty_sold: self.qty_sold,
            qty_returned: self.qty_returned,
            buyout_pct,
            avg_price: ratio(self.total_retail_with_disc, self.qty_sold),
            revenue: self.revenue,
            payout_base: self.payout_base,
            logistics: LogisticsSplit {
                forward: self.forward,
                returns: self.returns,
                unclassified: self.unclassified,
                total: self.total_logistics,
                avg_cost_forward: self.forward.avg_cost(),
                avg_cost_return: self.returns.avg_cost(),
            },
            storage: self.storage,
            fines: self.fines,
            deductions: self.deductions,
            acceptance: self.acceptance,
            adjustments: self.adjustments,
            total_expenses,
            net_cash,
            tax,
            vat,
            cogs: self.cogs,
            net_profit,
            margin_pct: percent_of(net_profit, self.revenue),
            roi_pct: percent_of(net_profit, self.cogs),
            profit_per_unit: ratio(net_profit, self.qty_sold),
            logistics_per_unit: ratio(self.total_logistics, self.qty_sold),
        }
    }
}

/// `numerator / denominator`, or zero unless the denominator is positive.
pub(crate) fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator > Decimal::ZERO {
        numerator / denominator
    } else {
        Decimal::ZERO
    }
}

pub(crate) fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    ratio(part, whole) * dec!(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;

    fn post_all(ledger: &mut Ledger, rows: &[TransactionRow], unit_cost: Decimal) {
        for row in rows {
            ledger.post(row, &classify(row), unit_cost);
        }
    }

    #[test]
    fn empty_ledger_closes_to_zero_without_division() {
        let summary = Ledger::new().close(TaxRegime::Usn6);
        assert_eq!(summary, AggregateSummary::default());
    }

    #[test]
    fn overheads_accumulate_on_unclassified_rows() {
        let row = TransactionRow {
            payment_reason: "Хранение".to_string(),
            storage_rub: dec!(12.5),
            fine: dec!(100),
            other_deductions_rub: dec!(40),
            acceptance_rub: dec!(7),
            additional_payment: dec!(15),
            ..Default::default()
        };
        let mut ledger = Ledger::new();
        post_all(&mut ledger, &[row], Decimal::ZERO);
        let summary = ledger.close(TaxRegime::Usn6);

        assert_eq!(summary.total_expenses, dec!(159.5));
        assert_eq!(summary.net_cash, dec!(-144.5));
        assert_eq!(summary.adjustments, dec!(15));
    }

    #[test]
    fn average_price_weights_by_quantity() {
        let rows = [
            TransactionRow {
                payment_reason: "Продажа".to_string(),
                quantity: dec!(1),
                retail_price_with_disc: dec!(1000),
                ..Default::default()
            },
            TransactionRow {
                payment_reason: "Продажа".to_string(),
                quantity: dec!(3),
                retail_price_with_disc: dec!(800),
                ..Default::default()
            },
        ];
        let mut ledger = Ledger::new();
        post_all(&mut ledger, &rows, Decimal::ZERO);
        assert_eq!(ledger.close(TaxRegime::Usn6).avg_price, dec!(850));
    }

    #[test]
    fn buyout_is_clamped_for_pathological_counts() {
        let rows = [
            TransactionRow {
                payment_reason: "Продажа".to_string(),
                quantity: dec!(5),
                ..Default::default()
            },
            TransactionRow {
                payment_reason: "Логистика".to_string(),
                return_count: dec!(-2),
                ..Default::default()
            },
        ];
        let mut ledger = Ledger::new();
        post_all(&mut ledger, &rows, Decimal::ZERO);
        assert_eq!(ledger.close(TaxRegime::Usn6).buyout_pct, dec!(100));
    }

    #[test]
    fn sale_with_return_wording_posts_as_a_sale() {
        let row = TransactionRow {
            payment_reason: "Продажа (возврат брака)".to_string(),
            quantity: dec!(1),
            retail_price_with_disc: dec!(1000),
            wb_realized: dec!(1000),
            ppvz_for_pay: dec!(900),
            ..Default::default()
        };
        let mut ledger = Ledger::new();
        post_all(&mut ledger, &[row], dec!(300));
        let summary = ledger.close(TaxRegime::Usn6);

        assert_eq!(summary.qty_sold, dec!(1));
        assert_eq!(summary.revenue, dec!(1000));
        assert_eq!(summary.payout_base, dec!(900));
        assert_eq!(summary.cogs, dec!(300));
    }

    #[test]
    fn huge_quantities_saturate_instead_of_panicking() {
        let huge = dec!(1000000000000000);
        let rows = [
            TransactionRow {
                payment_reason: "Продажа".to_string(),
                quantity: huge,
                retail_price_with_disc: huge,
                ..Default::default()
            },
            TransactionRow {
                payment_reason: "Продажа".to_string(),
                quantity: huge,
                retail_price_with_disc: huge,
                ..Default::default()
            },
        ];
        let mut ledger = Ledger::new();
        post_all(&mut ledger, &rows, huge);
        let summary = ledger.close(TaxRegime::Usn6);

        assert_eq!(summary.cogs, Decimal::MAX);
        assert_eq!(summary.qty_sold, huge * dec!(2));
        assert_eq!(summary.avg_price, Decimal::MAX / (huge * dec!(2)));
        assert_eq!(summary.net_profit, -Decimal::MAX);
    }
}
