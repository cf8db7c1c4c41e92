//! In-memory expense store.
//!
//! [`ExpenseStore`] keeps every [`Expense`] in insertion order for the
//! lifetime of the process. It is meant to be wrapped in an `Arc` and shared
//! by whoever serves the expenses.
use tokio::sync::RwLock;
use uuid::Uuid;

pub use error::EngineError;
pub use expense::{Expense, ExpenseNew, Summary};
pub use timestamp::Timestamp;

mod error;
mod expense;
mod export;
mod timestamp;

type ResultEngine<T> = Result<T, EngineError>;

/// Ordered, process-lifetime collection of expenses.
///
/// Reads share the lock, writes take it exclusively.
#[derive(Debug, Default)]
pub struct ExpenseStore {
    expenses: RwLock<Vec<Expense>>,
}

impl ExpenseStore {
    /// Return a builder for `ExpenseStore`. Help to build the struct.
    pub fn builder() -> ExpenseStoreBuilder {
        ExpenseStoreBuilder::default()
    }

    /// Every stored expense, oldest first.
    pub async fn list(&self) -> Vec<Expense> {
        self.expenses.read().await.clone()
    }

    /// Store a new expense under a freshly generated id.
    ///
    /// Any id carried by `payload` is dropped.
    pub async fn create(&self, payload: ExpenseNew) -> Expense {
        let expense = Expense::with_id(Uuid::new_v4().to_string(), payload);
        self.expenses.write().await.push(expense.clone());
        expense
    }

    /// Remove the first expense whose id is `id` and return it.
    pub async fn delete(&self, id: &str) -> ResultEngine<Expense> {
        let mut expenses = self.expenses.write().await;
        let position = expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or_else(|| EngineError::NotFound(id.to_string()))?;

        Ok(expenses.remove(position))
    }

    /// CSV rendering of every stored expense, header first.
    pub async fn export(&self) -> ResultEngine<String> {
        export::render(&self.expenses.read().await)
    }

    /// Count, sum and mean of the stored amounts.
    pub async fn summary(&self) -> Summary {
        Summary::of(&self.expenses.read().await)
    }
}

/// Builder for [`ExpenseStore`].
///
/// ```rust
/// use engine::{Expense, ExpenseStore};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let rent = Expense {
///     id: "rent-2024-01".to_string(),
///     title: "Rent".to_string(),
///     amount: 750.0,
///     date: serde_json::from_str("\"2024-01-01\"").unwrap(),
///     category: "Home".to_string(),
/// };
/// let store = ExpenseStore::builder().expenses(vec![rent.clone()]).build();
///
/// assert_eq!(store.list().await, vec![rent.clone()]);
/// assert_eq!(store.delete("rent-2024-01").await, Ok(rent));
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ExpenseStoreBuilder {
    expenses: Vec<Expense>,
}

impl ExpenseStoreBuilder {
    /// Start from already existing expenses, kept in the given order.
    ///
    /// Ids are taken as given: the caller keeps them unique, otherwise
    /// [`ExpenseStore::delete`] only ever reaches the first of the duplicates.
    pub fn expenses(mut self, expenses: Vec<Expense>) -> ExpenseStoreBuilder {
        self.expenses = expenses;
        self
    }

    /// Construct `ExpenseStore`
    pub fn build(self) -> ExpenseStore {
        ExpenseStore {
            expenses: RwLock::new(self.expenses),
        }
    }
}
