//! Bank account management for the finance tracker.

pub mod core;
mod accounts_page;
mod create_account_endpoint;
mod new_account_page;

pub use core::{
    Account, create_account, create_account_table, get_accounts, get_total_account_balance,
};
pub use accounts_page::get_accounts_page;
pub use create_account_endpoint::create_account_endpoint;
pub use new_account_page::get_new_account_page;
