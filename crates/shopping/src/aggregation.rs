//! Cart-line aggregation.
//!
//! Folds the raw (name, amount, unit) rows joined from a user's cart into
//! one line per distinct ingredient name, preserving first-seen order.

use std::collections::HashMap;

/// One ingredient-amount row from a cart-flagged recipe.
///
/// Request-scoped: recomputed on every export, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

impl CartLine {
    pub fn new(name: impl Into<String>, amount: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount,
            unit: unit.into(),
        }
    }
}

/// One ingredient's summed quantity across all cart-flagged recipes.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedLine {
    pub name: String,
    pub total: f64,
    pub unit: String,
}

/// Sum cart lines by ingredient name.
///
/// The output keeps the first-seen order of distinct names. Amounts for
/// duplicate names are summed; the unit is the one from the first
/// occurrence. A later line with a differing unit contributes its amount
/// but its unit is discarded without conversion — unit compatibility is
/// deliberately not checked here.
pub fn aggregate(lines: impl IntoIterator<Item = CartLine>) -> Vec<AggregatedLine> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<AggregatedLine> = Vec::new();

    for line in lines {
        match index.get(&line.name) {
            Some(&at) => {
                if let Some(entry) = out.get_mut(at) {
                    entry.total += line.amount;
                }
            }
            None => {
                index.insert(line.name.clone(), out.len());
                out.push(AggregatedLine {
                    name: line.name,
                    total: line.amount,
                    unit: line.unit,
                });
            }
        }
    }

    out
}

/// Format an amount the way it appears in the report: integral values
/// without a decimal point, everything else with Rust's shortest float
/// representation.
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        format!("{}", amount as i64)
    } else {
        format!("{amount}")
    }
}
