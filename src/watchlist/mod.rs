pub mod csv_source;
pub mod movers_service;
pub mod watchlist_model;
pub mod watchlist_repository;
pub mod watchlist_traits;


pub use csv_source::CsvWatchlistSource;
pub use movers_service::{daily_movers, risk_flags, top_losers, top_winners, weekly_movers, Mover};
pub use watchlist_model::WatchlistEntry;
pub use watchlist_repository::{WatchlistRepository, WatchlistRepositoryTrait};
pub use watchlist_traits::WatchlistSourceTrait;
