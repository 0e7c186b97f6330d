//! Reference data stores.

pub mod funds;

pub use funds::{FundFilter, FundStore};
