pub mod orders_model;
pub mod suggestion_service;

#[cfg(test)]
mod suggestion_service_tests;

pub use orders_model::{OrderAction, OrderSize, OrderSuggestion, OrderType};
pub use suggestion_service::suggest_orders;
