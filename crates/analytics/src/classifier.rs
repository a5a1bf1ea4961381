//! Row classification over the report's free-text vocabulary.
//!
//! The marketplace describes each row only in prose, so classification is a pair
//! of ordered rule tables matched case-insensitively against `paymentReason` and
//! `logisticsType`. Rules are evaluated top to bottom; the first logistics rule
//! that matches decides the direction and anything left over is unclassified.

use core_types::TransactionRow;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Economic operation a row records. A row may carry several or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    Sale,
    /// Reversal of revenue and payout. Not the same as return logistics.
    ReturnOp,
    Logistics,
}

/// Direction of a logistics charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogisticsDirection {
    Forward,
    Return,
    Unclassified,
}

/// Classification tag of one row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowClass {
    pub is_sale: bool,
    pub is_return_op: bool,
    /// Set for logistics rows only.
    pub logistics: Option<LogisticsDirection>,
}

impl RowClass {
    pub fn is_logistics(&self) -> bool {
        self.logistics.is_some()
    }

    pub fn has(&self, kind: OperationKind) -> bool {
        match kind {
            OperationKind::Sale => self.is_sale,
            OperationKind::ReturnOp => self.is_return_op,
            OperationKind::Logistics => self.is_logistics(),
        }
    }
}

/// `paymentReason` markers, one per operation kind.
pub const OPERATION_RULES: [(OperationKind, &str); 3] = [
    (OperationKind::Sale, "продажа"),
    (OperationKind::ReturnOp, "возврат"),
    (OperationKind::Logistics, "логистика"),
];

/// One logistics rule: the counter that must be positive and the `logisticsType`
/// phrases of which at least one must occur.
pub struct LogisticsRule {
    pub direction: LogisticsDirection,
    pub counter: fn(&TransactionRow) -> Decimal,
    pub phrases: &'static [&'static str],
}

pub const LOGISTICS_RULES: [LogisticsRule; 2] = [
    LogisticsRule {
        direction: LogisticsDirection::Forward,
        counter: |row| row.delivery_count,
        phrases: &["к клиенту при продаже"],
    },
    LogisticsRule {
        direction: LogisticsDirection::Return,
        counter: |row| row.return_count,
        phrases: &[
            "к клиенту при отмене",
            "от клиента при возврате",
            "от клиента при отмене",
        ],
    },
];

impl LogisticsRule {
    fn matches(&self, row: &TransactionRow, logistics_type: &str) -> bool {
        (self.counter)(row) > Decimal::ZERO
            && self.phrases.iter().any(|p| logistics_type.contains(p))
    }
}

/// Classifies one row. Never fails: unknown vocabulary simply matches nothing.
pub fn classify(row: &TransactionRow) -> RowClass {
    let reason = row.payment_reason.to_lowercase();
    let mut class = RowClass::default();

    for (kind, marker) in OPERATION_RULES {
        if !reason.contains(marker) {
            continue;
        }
        match kind {
            OperationKind::Sale => class.is_sale = true,
            OperationKind::ReturnOp => class.is_return_op = true,
            OperationKind::Logistics => {
                class.logistics = Some(logistics_direction(row));
            }
        }
    }

    class
}

/// Direction of a row already known to be logistics.
pub fn logistics_direction(row: &TransactionRow) -> LogisticsDirection {
    let logistics_type = row.logistics_type.to_lowercase();
    LOGISTICS_RULES
        .iter()
        .find(|rule| rule.matches(row, &logistics_type))
        .map(|rule| rule.direction)
        .unwrap_or(LogisticsDirection::Unclassified)
}
