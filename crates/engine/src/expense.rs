//! The module contains the representation of an expense.
use serde::{Deserialize, Serialize};

use crate::Timestamp;

/// A stored expense.
///
/// `id` is assigned by the [`ExpenseStore`](crate::ExpenseStore) when the
/// expense is created and never changes afterwards. The other fields are
/// kept exactly as the client sent them: `amount` has no unit and may be
/// negative, `title` and `category` may be any text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub title: String,
    pub amount: f64,
    pub date: Timestamp,
    pub category: String,
}

/// Payload for a new expense.
///
/// Clients may echo an `id` back; it is accepted for compatibility and then
/// discarded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpenseNew {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub amount: f64,
    pub date: Timestamp,
    pub category: String,
}

impl Expense {
    pub(crate) fn with_id(id: String, payload: ExpenseNew) -> Self {
        Self {
            id,
            title: payload.title,
            amount: payload.amount,
            date: payload.date,
            category: payload.category,
        }
    }
}

/// Aggregate figures over every stored expense.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub total: f64,
    /// `total / count`, or `0` when nothing is stored.
    pub average: f64,
}

impl Summary {
    pub(crate) fn of(expenses: &[Expense]) -> Self {
        let count = expenses.len();
        let total: f64 = expenses.iter().map(|e| e.amount).sum();
        let average = if count > 0 { total / count as f64 } else { 0.0 };

        Self {
            count,
            total,
            average,
        }
    }
}
