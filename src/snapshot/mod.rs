pub mod diff_service;
pub mod snapshot_model;
pub mod snapshot_repository;


pub use diff_service::{diff_snapshots, SnapshotDiff};
pub use snapshot_model::{HoldingsSnapshot, SnapshotPosition};
pub use snapshot_repository::{SnapshotRepository, SnapshotRepositoryTrait};
