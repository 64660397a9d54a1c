//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - Database functions for storing and querying transactions
//! - View handlers for transaction-related web pages

pub mod core;
mod create_transaction_endpoint;
mod new_transaction_page;
mod transactions_page;

pub use core::{
    Transaction, TransactionBuilder, TransactionType, create_transaction,
    create_transaction_table, get_recent_transactions, map_transaction_row,
};
pub use create_transaction_endpoint::create_transaction_endpoint;
pub use new_transaction_page::get_new_transaction_page;
pub use transactions_page::get_transactions_page;

#[cfg(test)]
pub use core::count_transactions;
