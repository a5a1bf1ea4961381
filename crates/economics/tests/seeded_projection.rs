use core_types::{EconomicsModel, TaxRegime, TransactionRow, UnitCosts};
use economics::{ReportSeed, UnitEconomicsProjector, project};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn report() -> Vec<TransactionRow> {
    vec![
        TransactionRow {
            vendor_code: "TEE-1".to_string(),
            payment_reason: "Продажа".to_string(),
            quantity: dec!(9),
            retail_price_with_disc: dec!(1200),
            wb_realized: dec!(10800),
            commission_rub: dec!(2700),
            ..Default::default()
        },
        TransactionRow {
            vendor_code: "TEE-1".to_string(),
            payment_reason: "Логистика".to_string(),
            logistics_type: "От клиента при отмене".to_string(),
            return_count: dec!(1),
            logistics_rub: dec!(33),
            ..Default::default()
        },
    ]
}

#[test]
fn seeded_model_projects_from_report_figures() {
    let mut model = EconomicsModel {
        costs: UnitCosts {
            garment: dec!(250),
            print_manual: dec!(60),
            ..Default::default()
        },
        ..Default::default()
    };
    ReportSeed::from_rows(&report()).apply_to(&mut model);

    assert_eq!(model.retail_price, dec!(1200));
    assert_eq!(model.buyout_pct, dec!(90));
    assert_eq!(model.commission_pct, dec!(25));

    let result = UnitEconomicsProjector::new(model).unwrap().project();
    let fact = result.fact;
    assert_eq!(fact.cogs, dec!(310));
    assert_eq!(fact.commission, dec!(300));
    assert_eq!(fact.forward_logistics, dec!(43.25));
    assert_eq!(fact.total_taxes, dec!(72));
    assert_eq!(
        fact.net_profit,
        fact.price
            - (fact.cogs + fact.total_logistics + fact.commission + fact.acquiring + fact.total_taxes)
    );
}

#[test]
fn projection_is_deterministic_across_regimes() {
    for regime in [TaxRegime::Usn6, TaxRegime::Usn15] {
        let model = EconomicsModel {
            retail_price: dec!(1500),
            tax_regime: regime,
            ..Default::default()
        };
        let first = project(&model);
        let second = project(&model);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert!(first.fact.total_taxes >= Decimal::ZERO);
    }
}
