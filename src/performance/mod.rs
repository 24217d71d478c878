pub mod performance_model;
pub mod performance_service;


pub use performance_model::WeeklyMetrics;
pub use performance_service::{max_drawdown, sharpe_sortino, weekly_metrics};
