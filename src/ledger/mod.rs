pub mod ledger_model;
pub mod ledger_repository;
pub mod ledger_service;

pub use ledger_model::{LedgerRow, NewLedgerEntry};
pub use ledger_repository::{LedgerRepository, LedgerRepositoryTrait};
pub use ledger_service::LedgerService;
