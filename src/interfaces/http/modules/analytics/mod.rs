pub mod dto;
pub mod handlers;

pub use dto::{DashboardSummaryDto, RoleBreakdownDto};
pub use handlers::AnalyticsHandlerState;
