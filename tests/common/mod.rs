use std::path::Path;
use std::sync::Arc;

use eodfolio_core::db;

/// Creates a pooled, fully migrated SQLite database inside `dir`, with the
/// WAL/busy_timeout pragmas applied and test logging wired to the `log` facade.
pub fn setup_pool(dir: &Path) -> Arc<db::DbPool> {
    let _ = env_logger::builder().is_test(true).try_init();

    let db_path = db::init(&dir.to_string_lossy()).expect("db init");
    let pool = db::create_pool(&db_path).expect("pool");
    db::run_migrations(&pool).expect("migrations");
    pool
}
