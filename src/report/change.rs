//! Percentages for comparing periods and splitting totals by category.

use serde::{Deserialize, Serialize};

use crate::record::{CategoryTotal, RecordKind};

/// Whether a total went up or down compared to the previous period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The total stayed the same or went up.
    Increase,
    /// The total went down.
    Decrease,
}

/// The size and direction of the change between two totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentageChange {
    /// The absolute change as a percentage of the previous total.
    pub change: f64,
    /// Whether the total went up or down.
    pub direction: Direction,
}

/// Compare the `current` total to the `previous` total.
///
/// Going from nothing to something counts as a 100% increase, and two
/// empty periods count as a 0% increase.
pub fn percentage_change(current: f64, previous: f64) -> PercentageChange {
    if previous > 0.0 {
        PercentageChange {
            change: (current - previous).abs() / previous * 100.0,
            direction: if current >= previous {
                Direction::Increase
            } else {
                Direction::Decrease
            },
        }
    } else if current > 0.0 {
        PercentageChange {
            change: 100.0,
            direction: Direction::Increase,
        }
    } else {
        PercentageChange {
            change: 0.0,
            direction: Direction::Increase,
        }
    }
}

/// Whether a change in `direction` is good news for records of kind `K`.
pub fn is_favourable<K: RecordKind>(direction: Direction) -> bool {
    (direction == Direction::Increase) == K::INCREASE_IS_FAVOURABLE
}

/// A category total with its share of the overall total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare<C> {
    /// The category.
    pub category: C,
    /// The sum of the amounts of the records in the category.
    pub total: f64,
    /// The number of records in the category.
    pub count: u32,
    /// The category total as a percentage of the overall total.
    pub share: f64,
}

/// Attach each category's percentage of `overall_total`, or zero if the total is zero.
pub fn category_shares<C: Copy>(
    categories: &[CategoryTotal<C>],
    overall_total: f64,
) -> Vec<CategoryShare<C>> {
    categories
        .iter()
        .map(|category| CategoryShare {
            category: category.category,
            total: category.total,
            count: category.count,
            share: if overall_total > 0.0 {
                category.total / overall_total * 100.0
            } else {
                0.0
            },
        })
        .collect()
}
