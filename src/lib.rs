pub mod aggregate;
pub mod clean;
pub mod columns;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod load;
pub mod table;

#[cfg(test)]
pub(crate) mod test_support;

pub use clean::clean;
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DashboardView};
pub use error::{DashboardError, Result};
pub use filter::{filter_by_year, year_bounds, YearRange};
pub use load::load_raw_table;
