use crate::error::ProjectorError;
use core_types::{EconomicsModel, TaxBase};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Per-unit economics at the configured retail price.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactProjection {
    pub price: Decimal,
    pub cogs: Decimal,
    pub print_subtotal: Decimal,
    pub forward_logistics: Decimal,
    pub return_logistics: Decimal,
    pub total_logistics: Decimal,
    pub commission: Decimal,
    pub acquiring: Decimal,
    pub vat: Decimal,
    /// Sum of the lines flagged deductible, whatever the regime.
    pub deductible: Decimal,
    pub tax_base: Decimal,
    /// Income tax plus VAT.
    pub total_taxes: Decimal,
    pub net_profit: Decimal,
    pub margin_pct: Decimal,
    pub roi_pct: Decimal,
    pub batch_profit: Decimal,
}

/// Per-unit and per-day economics at the hypothesis price and volume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HypothesisProjection {
    pub price: Decimal,
    pub commission: Decimal,
    pub acquiring: Decimal,
    pub vat: Decimal,
    /// Deductible lines at the hypothesis price; only commission and acquiring move.
    pub deductible: Decimal,
    pub tax_base: Decimal,
    pub total_taxes: Decimal,
    pub net_profit: Decimal,
    pub daily_sold_units: Decimal,
    pub daily_profit: Decimal,
    pub daily_revenue: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectorResult {
    pub fact: FactProjection,
    pub hypothesis: HypothesisProjection,
}

/// Absolute per-unit costs. They do not depend on the selling price.
#[derive(Debug, Clone, Copy)]
struct FixedCosts {
    cogs: Decimal,
    forward_logistics: Decimal,
    return_logistics: Decimal,
    total_logistics: Decimal,
    production_deductible: Decimal,
}

impl FixedCosts {
    fn of(model: &EconomicsModel) -> Self {
        let forward_logistics = forward_logistics(model);
        let return_logistics = return_logistics(model);
        Self {
            cogs: model.costs.total(),
            forward_logistics,
            return_logistics,
            total_logistics: forward_logistics + return_logistics,
            production_deductible: model.deductible.deductible_costs(&model.costs),
        }
    }
}

/// The lines that move with the selling price.
#[derive(Debug, Clone, Copy)]
struct PriceLines {
    commission: Decimal,
    acquiring: Decimal,
    vat: Decimal,
    deductible: Decimal,
    tax_base: Decimal,
    total_taxes: Decimal,
    net_profit: Decimal,
}

fn pct(value: Decimal, percent: Decimal) -> Decimal {
    value * percent / dec!(100)
}

fn forward_logistics(model: &EconomicsModel) -> Decimal {
    let tariff = &model.tariff;
    let volume = model.dimensions.volume_liters();
    let base = if volume <= Decimal::ONE {
        tariff.base
    } else {
        tariff.base + (volume - Decimal::ONE) * tariff.per_extra_liter
    };
    pct(base, tariff.warehouse_coefficient_pct)
}

/// Return shipping amortized over the units that are kept.
fn return_logistics(model: &EconomicsModel) -> Decimal {
    let kept = model.buyout_pct / dec!(100);
    if kept <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let returned = Decimal::ONE - kept;
    returned / kept * model.tariff.return_tariff
}

fn price_lines(model: &EconomicsModel, fixed: &FixedCosts, price: Decimal) -> PriceLines {
    let commission = pct(price, model.commission_pct);
    let acquiring = pct(price, model.acquiring_pct);
    let vat = pct(price, model.vat_pct);

    let flags = &model.deductible;
    let deductible = [
        (true, fixed.production_deductible),
        (flags.advertising, model.advertising),
        (flags.marketplace_logistics, fixed.total_logistics),
        (flags.commission, commission),
        (flags.acquiring, acquiring),
    ]
    .into_iter()
    .filter(|(on, _)| *on)
    .map(|(_, amount)| amount)
    .sum();

    let base = TaxBase {
        turnover: price,
        income: price,
        deductible,
    };
    let regime = model.tax_regime;
    let tax_base = regime.taxable_base(&base);
    let total_taxes = regime.assess(&base) + vat;

    let net_profit = price
        - (fixed.cogs
            + fixed.total_logistics
            + commission
            + model.advertising
            + acquiring
            + total_taxes);

    PriceLines {
        commission,
        acquiring,
        vat,
        deductible,
        tax_base,
        total_taxes,
        net_profit,
    }
}

/// Projects one unit's economics at the fact and hypothesis prices.
///
/// Total over any model; use [`UnitEconomicsProjector`] to reject nonsensical
/// parameters up front.
#[tracing::instrument(skip_all, fields(regime = %model.tax_regime))]
pub fn project(model: &EconomicsModel) -> ProjectorResult {
    let fixed = FixedCosts::of(model);

    // --- Fact ---
    let price = model.retail_price;
    let lines = price_lines(model, &fixed, price);
    let fact = FactProjection {
        price,
        cogs: fixed.cogs,
        print_subtotal: model.costs.print_subtotal(),
        forward_logistics: fixed.forward_logistics,
        return_logistics: fixed.return_logistics,
        total_logistics: fixed.total_logistics,
        commission: lines.commission,
        acquiring: lines.acquiring,
        vat: lines.vat,
        deductible: lines.deductible,
        tax_base: lines.tax_base,
        total_taxes: lines.total_taxes,
        net_profit: lines.net_profit,
        margin_pct: if price > Decimal::ZERO {
            lines.net_profit / price * dec!(100)
        } else {
            Decimal::ZERO
        },
        roi_pct: if fixed.cogs > Decimal::ZERO {
            lines.net_profit / fixed.cogs * dec!(100)
        } else {
            Decimal::ZERO
        },
        batch_profit: lines.net_profit * model.batch_size,
    };

    // --- Hypothesis: same absolute costs, its own price ---
    let scenario = &model.hypothesis;
    let hypo_price = scenario.price.unwrap_or(price);
    let hypo = price_lines(model, &fixed, hypo_price);
    let daily_sold_units = pct(scenario.orders_per_day, scenario.buyout_pct);
    let hypothesis = HypothesisProjection {
        price: hypo_price,
        commission: hypo.commission,
        acquiring: hypo.acquiring,
        vat: hypo.vat,
        deductible: hypo.deductible,
        tax_base: hypo.tax_base,
        total_taxes: hypo.total_taxes,
        net_profit: hypo.net_profit,
        daily_sold_units,
        daily_profit: daily_sold_units * hypo.net_profit,
        daily_revenue: daily_sold_units * hypo_price,
    };

    tracing::debug!(
        fact_net_profit = %fact.net_profit,
        hypothesis_net_profit = %hypothesis.net_profit,
        daily_profit = %hypothesis.daily_profit,
        "Unit economics projected."
    );

    ProjectorResult { fact, hypothesis }
}

/// A projector bound to a validated model.
#[derive(Debug, Clone)]
pub struct UnitEconomicsProjector {
    model: EconomicsModel,
}

impl UnitEconomicsProjector {
    /// Validates the model and wraps it.
    pub fn new(model: EconomicsModel) -> Result<Self, ProjectorError> {
        let percents = [
            ("buyout_pct", model.buyout_pct),
            ("commission_pct", model.commission_pct),
            ("acquiring_pct", model.acquiring_pct),
            ("vat_pct", model.vat_pct),
            ("hypothesis.buyout_pct", model.hypothesis.buyout_pct),
        ];
        for (name, value) in percents {
            if value < Decimal::ZERO || value > dec!(100) {
                return Err(ProjectorError::PercentOutOfRange(name, value));
            }
        }

        let non_negative = [
            ("retail_price", model.retail_price),
            ("advertising", model.advertising),
            ("batch_size", model.batch_size),
            ("dimensions.length_cm", model.dimensions.length_cm),
            ("dimensions.width_cm", model.dimensions.width_cm),
            ("dimensions.height_cm", model.dimensions.height_cm),
            ("tariff.base", model.tariff.base),
            ("tariff.per_extra_liter", model.tariff.per_extra_liter),
            ("tariff.warehouse_coefficient_pct", model.tariff.warehouse_coefficient_pct),
            ("tariff.return_tariff", model.tariff.return_tariff),
            ("hypothesis.orders_per_day", model.hypothesis.orders_per_day),
        ];
        for (name, value) in non_negative {
            if value < Decimal::ZERO {
                return Err(ProjectorError::Negative(name, value));
            }
        }

        if let Some(price) = model.hypothesis.price {
            if price < Decimal::ZERO {
                return Err(ProjectorError::InvalidParameters(format!(
                    "hypothesis price must not be negative, got {price}"
                )));
            }
        }

        Ok(Self { model })
    }

    pub fn model(&self) -> &EconomicsModel {
        &self.model
    }

    pub fn project(&self) -> ProjectorResult {
        project(&self.model)
    }
}
