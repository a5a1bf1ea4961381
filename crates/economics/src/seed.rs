use analytics::classify;
use core_types::{EconomicsModel, TransactionRow};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Starting figures for a projector model, distilled from a settlement report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSeed {
    /// Quantity-weighted discounted retail price, whole roubles.
    pub avg_price: Decimal,
    /// Whole percent.
    pub buyout_pct: Decimal,
    /// Effective commission over realized revenue, one decimal.
    pub commission_pct: Decimal,
}

fn round(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

impl ReportSeed {
    pub fn from_rows(rows: &[TransactionRow]) -> Self {
        let mut qty_sold = Decimal::ZERO;
        let mut retail_total = Decimal::ZERO;
        let mut realized = Decimal::ZERO;
        let mut commission = Decimal::ZERO;
        let mut returns = Decimal::ZERO;

        for row in rows {
            let class = classify(row);
            if class.is_sale {
                qty_sold += row.quantity;
                retail_total = retail_total
                    .saturating_add(row.retail_price_with_disc.saturating_mul(row.quantity));
                realized += row.wb_realized;
                commission += row.commission_rub;
            }
            if class.is_logistics() {
                returns += row.return_count;
            }
        }

        let avg_price = if qty_sold > Decimal::ZERO {
            retail_total / qty_sold
        } else {
            Decimal::ZERO
        };
        let flow = qty_sold + returns;
        let buyout_pct = if flow > Decimal::ZERO {
            qty_sold / flow * dec!(100)
        } else {
            Decimal::ZERO
        };
        let commission_pct = if realized > Decimal::ZERO {
            commission / realized * dec!(100)
        } else {
            Decimal::ZERO
        };

        let seed = Self {
            avg_price: round(avg_price, 0),
            buyout_pct: round(buyout_pct, 0),
            commission_pct: round(commission_pct, 1),
        };
        tracing::debug!(
            avg_price = %seed.avg_price,
            buyout_pct = %seed.buyout_pct,
            commission_pct = %seed.commission_pct,
            "Seed derived from report."
        );
        seed
    }

    /// Writes the seed into the model's fact inputs. A non-positive commission
    /// leaves the model's own rate in place.
    pub fn apply_to(&self, model: &mut EconomicsModel) {
        model.retail_price = self.avg_price;
        model.buyout_pct = self.buyout_pct;
        if self.commission_pct > Decimal::ZERO {
            model.commission_pct = self.commission_pct;
        }
    }
}
