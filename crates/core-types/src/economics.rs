use crate::enums::TaxRegime;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Input of the unit-economics projector: one product's cost structure, the
/// marketplace tariff it ships under and a price hypothesis to test.
///
/// All money figures are per unit. Percentages are expressed on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomicsModel {
    pub costs: UnitCosts,
    pub dimensions: PackageDimensions,
    pub tariff: LogisticsTariff,
    /// The current ("fact") retail price.
    pub retail_price: Decimal,
    pub buyout_pct: Decimal,
    pub commission_pct: Decimal,
    pub acquiring_pct: Decimal,
    pub vat_pct: Decimal,
    /// Advertising spend attributed to one unit.
    pub advertising: Decimal,
    pub tax_regime: TaxRegime,
    pub batch_size: Decimal,
    pub deductible: DeductibleFlags,
    pub hypothesis: Hypothesis,
}

impl Default for EconomicsModel {
    fn default() -> Self {
        Self {
            costs: UnitCosts::default(),
            dimensions: PackageDimensions::default(),
            tariff: LogisticsTariff::default(),
            retail_price: Decimal::ZERO,
            buyout_pct: dec!(90),
            commission_pct: dec!(25),
            acquiring_pct: dec!(3),
            vat_pct: Decimal::ZERO,
            advertising: Decimal::ZERO,
            tax_regime: TaxRegime::Usn6,
            batch_size: dec!(100),
            deductible: DeductibleFlags::default(),
            hypothesis: Hypothesis::default(),
        }
    }
}

/// Itemized production cost of one unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitCosts {
    /// When non-zero, replaces the itemized print subtotal entirely.
    pub print_manual: Decimal,
    pub print_glue: Decimal,
    pub print_foil: Decimal,
    pub print_white_ink: Decimal,
    pub print_color_ink: Decimal,
    pub print_amortization: Decimal,
    /// The blank garment the print is applied to.
    pub garment: Decimal,
    pub press_work: Decimal,
    pub packaging_package: Decimal,
    pub packaging_tape: Decimal,
    pub packaging_barcode: Decimal,
    pub packaging_label: Decimal,
    pub packaging_work: Decimal,
    /// Inbound shipping of the unit to the marketplace warehouse.
    pub logistics_to_marketplace: Decimal,
}

impl UnitCosts {
    pub fn uses_manual_print(&self) -> bool {
        !self.print_manual.is_zero()
    }

    pub fn itemized_print(&self) -> Decimal {
        self.print_glue
            + self.print_foil
            + self.print_white_ink
            + self.print_color_ink
            + self.print_amortization
    }

    pub fn print_subtotal(&self) -> Decimal {
        if self.uses_manual_print() {
            self.print_manual
        } else {
            self.itemized_print()
        }
    }

    pub fn packaging_subtotal(&self) -> Decimal {
        self.packaging_package
            + self.packaging_tape
            + self.packaging_barcode
            + self.packaging_label
            + self.packaging_work
    }

    /// Cost of goods for one unit.
    pub fn total(&self) -> Decimal {
        self.print_subtotal()
            + self.packaging_subtotal()
            + self.garment
            + self.press_work
            + self.logistics_to_marketplace
    }
}

/// Package size in centimetres. The billable volume is always derived from the
/// three sides and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageDimensions {
    pub length_cm: Decimal,
    pub width_cm: Decimal,
    pub height_cm: Decimal,
}

impl Default for PackageDimensions {
    fn default() -> Self {
        Self {
            length_cm: dec!(30),
            width_cm: dec!(20),
            height_cm: dec!(2),
        }
    }
}

impl PackageDimensions {
    pub fn volume_liters(&self) -> Decimal {
        self.length_cm * self.width_cm * self.height_cm / dec!(1000)
    }
}

/// Marketplace logistics tariff for one shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogisticsTariff {
    /// Price of the first liter.
    pub base: Decimal,
    /// Price of every liter beyond the first.
    pub per_extra_liter: Decimal,
    /// Warehouse coefficient on a 0-100+ scale (125 means x1.25).
    pub warehouse_coefficient_pct: Decimal,
    /// Flat price of shipping a rejected unit back.
    pub return_tariff: Decimal,
}

impl Default for LogisticsTariff {
    fn default() -> Self {
        Self {
            base: dec!(33),
            per_extra_liter: dec!(8),
            warehouse_coefficient_pct: dec!(125),
            return_tariff: dec!(33),
        }
    }
}

/// Which cost lines reduce the `usn15` tax base. Every flag defaults to on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeductibleFlags {
    pub print_manual: bool,
    pub print_glue: bool,
    pub print_foil: bool,
    pub print_white_ink: bool,
    pub print_color_ink: bool,
    pub print_amortization: bool,
    pub garment: bool,
    pub press_work: bool,
    pub packaging_package: bool,
    pub packaging_tape: bool,
    pub packaging_barcode: bool,
    pub packaging_label: bool,
    pub packaging_work: bool,
    pub logistics_to_marketplace: bool,
    pub advertising: bool,
    pub marketplace_logistics: bool,
    pub commission: bool,
    pub acquiring: bool,
}

impl Default for DeductibleFlags {
    fn default() -> Self {
        Self::all(true)
    }
}

impl DeductibleFlags {
    pub fn all(on: bool) -> Self {
        Self {
            print_manual: on,
            print_glue: on,
            print_foil: on,
            print_white_ink: on,
            print_color_ink: on,
            print_amortization: on,
            garment: on,
            press_work: on,
            packaging_package: on,
            packaging_tape: on,
            packaging_barcode: on,
            packaging_label: on,
            packaging_work: on,
            logistics_to_marketplace: on,
            advertising: on,
            marketplace_logistics: on,
            commission: on,
            acquiring: on,
        }
    }

    /// Sum of the flagged production cost lines. With a manual print cost in
    /// effect, only the manual figure stands in for the print items.
    pub fn deductible_costs(&self, costs: &UnitCosts) -> Decimal {
        let print = if costs.uses_manual_print() {
            vec![(self.print_manual, costs.print_manual)]
        } else {
            vec![
                (self.print_glue, costs.print_glue),
                (self.print_foil, costs.print_foil),
                (self.print_white_ink, costs.print_white_ink),
                (self.print_color_ink, costs.print_color_ink),
                (self.print_amortization, costs.print_amortization),
            ]
        };
        let rest = [
            (self.garment, costs.garment),
            (self.press_work, costs.press_work),
            (self.packaging_package, costs.packaging_package),
            (self.packaging_tape, costs.packaging_tape),
            (self.packaging_barcode, costs.packaging_barcode),
            (self.packaging_label, costs.packaging_label),
            (self.packaging_work, costs.packaging_work),
            (self.logistics_to_marketplace, costs.logistics_to_marketplace),
        ];

        print
            .into_iter()
            .chain(rest)
            .filter(|(on, _)| *on)
            .map(|(_, amount)| amount)
            .sum()
    }
}

/// A price/volume scenario evaluated against the model's cost structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hypothesis {
    /// Falls back to the fact retail price when absent.
    pub price: Option<Decimal>,
    pub orders_per_day: Decimal,
    pub buyout_pct: Decimal,
}

impl Default for Hypothesis {
    fn default() -> Self {
        Self {
            price: None,
            orders_per_day: dec!(10),
            buyout_pct: dec!(90),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_follows_dimensions() {
        let mut dims = PackageDimensions::default();
        assert_eq!(dims.volume_liters(), dec!(1.2));

        dims.height_cm = dec!(5);
        assert_eq!(dims.volume_liters(), dec!(3));
    }

    #[test]
    fn manual_print_cost_replaces_itemized_subtotal() {
        let mut costs = UnitCosts {
            print_glue: dec!(10),
            print_foil: dec!(5),
            garment: dec!(200),
            packaging_package: dec!(7),
            ..Default::default()
        };
        assert_eq!(costs.print_subtotal(), dec!(15));
        assert_eq!(costs.total(), dec!(222));

        costs.print_manual = dec!(40);
        assert_eq!(costs.print_subtotal(), dec!(40));
        assert_eq!(costs.total(), dec!(247));
    }

    #[test]
    fn deductible_costs_respect_flags() {
        let costs = UnitCosts {
            print_glue: dec!(10),
            garment: dec!(200),
            press_work: dec!(30),
            ..Default::default()
        };
        let mut flags = DeductibleFlags::default();
        assert_eq!(flags.deductible_costs(&costs), dec!(240));

        flags.garment = false;
        assert_eq!(flags.deductible_costs(&costs), dec!(40));
    }

    #[test]
    fn deductible_costs_use_manual_print_flag_when_overridden() {
        let costs = UnitCosts {
            print_manual: dec!(50),
            print_glue: dec!(10),
            ..Default::default()
        };
        let mut flags = DeductibleFlags::default();
        assert_eq!(flags.deductible_costs(&costs), dec!(50));

        flags.print_manual = false;
        assert_eq!(flags.deductible_costs(&costs), Decimal::ZERO);
    }
}
