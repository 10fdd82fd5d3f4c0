pub mod account;
pub mod budget;
pub mod category;
pub mod common;
pub mod filter;
pub mod normalize;
pub mod preferences;
pub mod state;
pub mod transaction;

pub use account::{Account, AccountDraft, AccountKind, DEFAULT_ACCOUNT_ID};
pub use budget::Budget;
pub use category::{Category, CategoryPatch, UNCATEGORIZED_ID};
pub use common::{Displayable, Identifiable, NamedEntity};
pub use filter::{DateFilter, DatePreset};
pub use preferences::{CurrencyOption, NotificationPreferences, ThemePreference};
pub use state::AppState;
pub use transaction::{Transaction, TransactionType};
