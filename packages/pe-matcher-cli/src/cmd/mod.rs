pub mod analyze;
pub mod funds;
