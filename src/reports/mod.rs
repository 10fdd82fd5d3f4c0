//! Read-only views derived from the ledger.
//!
//! Every function takes its inputs explicitly and holds no state, so views
//! can be recomputed after each dispatch.

pub mod balance;
pub mod breakdown;
pub mod budget;
pub mod filter;
pub mod trend;
pub mod warnings;

pub use balance::{account_balance, income_expense_totals, total_balance, Totals};
pub use breakdown::{category_breakdown, CategoryTotal};
pub use budget::{budget_progress, budgets_for_month, spent_in_month, BudgetProgress, ALERT_THRESHOLD};
pub use filter::{filter_transactions, TransactionQuery};
pub use trend::{monthly_trend, MonthlyTotal, MAX_TREND_MONTHS};
pub use warnings::state_warnings;
