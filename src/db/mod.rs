use std::{fs, path::Path, time::Duration};

use log::debug;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite_migration::{M, Migrations};

mod error;
pub use error::{DbError, DbResult};

mod persisted_state;
pub use persisted_state::{SqlitePersistence, delete_state, get_state, put_state};

pub type SqlitePool = Pool<SqliteConnectionManager>;

fn migrations() -> Migrations<'static> {
    Migrations::new(vec![M::up(include_str!(
        "../../migrations/01-persisted-state/up.sql"
    ))])
}

/// Opens (creating if needed) the SQLite database at `db_path` and brings its
/// schema up to date.
pub fn init_db(db_path: impl AsRef<Path>) -> DbResult<SqlitePool> {
    let path = db_path.as_ref();
    if let Some(parent) = path.parent() &&
        !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let manager = SqliteConnectionManager::file(path).with_init(|conn| conn.busy_timeout(Duration::from_secs(5)));
    let pool = Pool::builder().max_size(4).build(manager)?;

    let mut conn = pool.get()?;
    migrations().to_latest(&mut conn)?;
    debug!(path:% = path.display(); "Database ready");

    Ok(pool)
}
