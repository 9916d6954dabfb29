//! Display formatting for the dashboard: currency amounts and relative times.

pub mod currency;
pub mod relative;

pub use currency::Currency;
pub use relative::from_now;
