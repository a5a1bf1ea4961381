use crate::enums::TaxRegime;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Rate applied to gross income under [`TaxRegime::Usn6`].
pub const USN6_RATE: Decimal = dec!(0.06);

/// Rate applied to income less expenses under [`TaxRegime::Usn15`].
pub const USN15_RATE: Decimal = dec!(0.15);

/// The figures a simplified-tax assessment may draw its base from.
///
/// `Usn6` taxes `turnover`; `Usn15` taxes `income - deductible`, floored at zero.
/// The P&L statement passes gross revenue as turnover and net cash as income,
/// so the two regimes deliberately start from different lines of the waterfall.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaxBase {
    pub turnover: Decimal,
    pub income: Decimal,
    pub deductible: Decimal,
}

impl TaxRegime {
    pub fn rate(&self) -> Decimal {
        match self {
            TaxRegime::Usn6 => USN6_RATE,
            TaxRegime::Usn15 => USN15_RATE,
        }
    }

    /// The amount the regime's rate is applied to.
    pub fn taxable_base(&self, base: &TaxBase) -> Decimal {
        match self {
            TaxRegime::Usn6 => base.turnover,
            TaxRegime::Usn15 => (base.income - base.deductible).max(Decimal::ZERO),
        }
    }

    /// Computes the tax owed for the given base.
    pub fn assess(&self, base: &TaxBase) -> Decimal {
        self.taxable_base(base) * self.rate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usn6_taxes_turnover_only() {
        let base = TaxBase {
            turnover: dec!(2000),
            income: dec!(1800),
            deductible: dec!(600),
        };
        assert_eq!(TaxRegime::Usn6.assess(&base), dec!(120));
    }

    #[test]
    fn usn15_taxes_income_less_deductible() {
        let base = TaxBase {
            turnover: dec!(2000),
            income: dec!(1800),
            deductible: dec!(600),
        };
        assert_eq!(TaxRegime::Usn15.taxable_base(&base), dec!(1200));
        assert_eq!(TaxRegime::Usn15.assess(&base), dec!(180));
    }

    #[test]
    fn usn15_base_is_floored_at_zero() {
        let base = TaxBase {
            turnover: dec!(5000),
            income: dec!(1000),
            deductible: dec!(1200),
        };
        assert_eq!(TaxRegime::Usn15.taxable_base(&base), Decimal::ZERO);
        assert_eq!(TaxRegime::Usn15.assess(&base), Decimal::ZERO);
    }
}
