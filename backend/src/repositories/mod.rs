//! Database repositories
//!
//! Provides data access layer for database operations. Every operation is
//! a single-row read or write; cross-row consistency is not needed here.

pub mod account;
pub mod listing;

pub use account::{AccountRecord, AccountRepository, NewAccount};
pub use listing::{ListingRecord, ListingRepository, NewListing, UpdateListing};
