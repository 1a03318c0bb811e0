//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and external systems.

pub mod account;
pub mod listing;
pub mod reset;

pub use account::AccountService;
pub use listing::ListingService;
pub use reset::ResetService;
