// Shared core for the COVID-19 dashboard front-ends.
// Everything here is I/O free so both the browser and terminal builds can use it.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod view;

pub use api::{ApiConfig, CaseStatus};
pub use dashboard::{Dashboard, DashboardOptions, DetailRequest, DetailSeries, Lifecycle, RequestToken};
pub use error::DashboardError;
pub use model::{CaseEntry, CountrySeries, CountryStat, Summary};
