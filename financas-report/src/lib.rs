//! financas-report: filters and aggregate views over the expense ledger

pub mod dashboard;
pub mod filter;
pub mod month;

pub use dashboard::{Dashboard, GroupTotal, MonthTotal, ReportRow, build_dashboard};
pub use filter::ReportFilter;
pub use month::{month_name_pt, parse_month};
