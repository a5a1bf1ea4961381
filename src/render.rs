use analytics::{AggregateSummary, LogisticsSplit, ProfitStructure, SegmentKind};
use analyzer::SkuProfitability;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use core_types::CostItem;
use economics::ProjectorResult;
use rust_decimal::Decimal;

fn money(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

fn percent(value: Decimal) -> String {
    format!("{:.1}%", value.round_dp(1))
}

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn right_align_from(table: &mut Table, first: usize) {
    let columns = table.column_count();
    for index in first..columns {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
}

/// Revenue-to-profit waterfall.
pub fn pnl(summary: &AggregateSummary) -> Table {
    let mut t = table(vec!["Line", "Amount"]);
    let lines = [
        ("Revenue", money(summary.revenue)),
        ("Payout base", money(summary.payout_base)),
        ("Logistics", money(-summary.logistics.total)),
        ("Storage", money(-summary.storage)),
        ("Fines", money(-summary.fines)),
        ("Other deductions", money(-summary.deductions)),
        ("Acceptance", money(-summary.acceptance)),
        ("Adjustments", money(summary.adjustments)),
        ("Net cash", money(summary.net_cash)),
        ("Tax", money(-summary.tax)),
        ("VAT", money(-summary.vat)),
        ("COGS", money(-summary.cogs)),
        ("Net profit", money(summary.net_profit)),
        ("Margin", percent(summary.margin_pct)),
        ("ROI", percent(summary.roi_pct)),
        ("Units sold", summary.qty_sold.normalize().to_string()),
        ("Units returned", summary.qty_returned.normalize().to_string()),
        ("Buyout", percent(summary.buyout_pct)),
        ("Average price", money(summary.avg_price)),
        ("Profit per unit", money(summary.profit_per_unit)),
        ("Logistics per unit", money(summary.logistics_per_unit)),
    ];
    for (label, value) in lines {
        t.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    right_align_from(&mut t, 1);
    t
}

pub fn logistics(split: &LogisticsSplit) -> Table {
    let mut t = table(vec!["Direction", "Cost", "Units", "Avg per unit"]);
    t.add_row(vec![
        "Forward".to_string(),
        money(split.forward.cost),
        split.forward.units.normalize().to_string(),
        money(split.avg_cost_forward),
    ]);
    t.add_row(vec![
        "Return".to_string(),
        money(split.returns.cost),
        split.returns.units.normalize().to_string(),
        money(split.avg_cost_return),
    ]);
    t.add_row(vec![
        "Unclassified".to_string(),
        money(split.unclassified.cost),
        split.unclassified.units.normalize().to_string(),
        String::new(),
    ]);
    t.add_row(vec![
        "Total".to_string(),
        money(split.total),
        String::new(),
        String::new(),
    ]);
    right_align_from(&mut t, 1);
    t
}

pub fn structure(structure: &ProfitStructure) -> Table {
    let mut t = table(vec!["Segment", "Amount", "Share"]);
    for segment in &structure.segments {
        let label = match segment.kind {
            SegmentKind::NetProfit => "Net profit",
            SegmentKind::Cogs => "COGS",
            SegmentKind::TaxesAndVat => "Taxes and VAT",
            SegmentKind::MarketplaceShare => "Marketplace share",
        };
        t.add_row(vec![
            label.to_string(),
            money(segment.amount),
            percent(segment.share_pct),
        ]);
    }
    right_align_from(&mut t, 1);
    t
}

pub fn skus(skus: &[&SkuProfitability]) -> Table {
    let mut t = table(vec![
        "Tier", "SKU", "Title", "Sold", "Buyout", "Revenue", "COGS", "Logistics", "Net profit",
        "Margin",
    ]);
    for sku in skus {
        let s = &sku.statement.summary;
        t.add_row(vec![
            sku.tier.to_string(),
            sku.statement.vendor_code.clone(),
            sku.statement.title.clone(),
            s.qty_sold.normalize().to_string(),
            percent(s.buyout_pct),
            money(s.revenue),
            money(s.cogs),
            money(s.logistics.total),
            money(s.net_profit),
            percent(s.margin_pct),
        ]);
    }
    right_align_from(&mut t, 3);
    t
}

pub fn projection(result: &ProjectorResult) -> Table {
    let fact = &result.fact;
    let hypo = &result.hypothesis;
    let mut t = table(vec!["Line", "Fact", "Hypothesis"]);
    let lines = [
        ("Price", money(fact.price), money(hypo.price)),
        ("COGS", money(fact.cogs), money(fact.cogs)),
        ("Forward logistics", money(fact.forward_logistics), String::new()),
        ("Return logistics", money(fact.return_logistics), String::new()),
        ("Marketplace logistics", money(fact.total_logistics), money(fact.total_logistics)),
        ("Commission", money(fact.commission), money(hypo.commission)),
        ("Acquiring", money(fact.acquiring), money(hypo.acquiring)),
        ("VAT", money(fact.vat), money(hypo.vat)),
        ("Deductible", money(fact.deductible), money(hypo.deductible)),
        ("Tax base", money(fact.tax_base), money(hypo.tax_base)),
        ("Taxes incl. VAT", money(fact.total_taxes), money(hypo.total_taxes)),
        ("Net profit per unit", money(fact.net_profit), money(hypo.net_profit)),
        ("Margin", percent(fact.margin_pct), String::new()),
        ("ROI", percent(fact.roi_pct), String::new()),
        ("Batch profit", money(fact.batch_profit), String::new()),
        ("Units sold per day", String::new(), hypo.daily_sold_units.normalize().to_string()),
        ("Revenue per day", String::new(), money(hypo.daily_revenue)),
        ("Profit per day", String::new(), money(hypo.daily_profit)),
    ];
    for (label, fact, hypothesis) in lines {
        t.add_row(vec![label.to_string(), fact, hypothesis]);
    }
    right_align_from(&mut t, 1);
    t
}

pub fn registry(items: &[&CostItem]) -> Table {
    let mut t = table(vec!["Barcode", "SKU", "Title", "Unit cost", "Updated"]);
    for item in items {
        t.add_row(vec![
            item.barcode.clone(),
            item.vendor_code.clone(),
            item.title.clone(),
            money(item.cost),
            item.updated_at.format("%Y-%m-%d").to_string(),
        ]);
    }
    right_align_from(&mut t, 3);
    t
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn money_and_percent_formatting() {
        assert_eq!(money(dec!(1234.5)), "1234.50");
        assert_eq!(percent(dec!(49)), "49.0%");
        assert_eq!(percent(dec!(33.333)), "33.3%");
    }

    #[test]
    fn waterfall_lists_every_line() {
        let t = pnl(&AggregateSummary::default());
        assert_eq!(t.row_iter().count(), 21);
    }
}
