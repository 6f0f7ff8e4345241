pub mod attendance;
pub mod config;
pub mod db;
pub mod export;
pub mod holiday;
pub mod ingest;
pub mod init;
pub mod leave;
pub mod log;
pub mod people;
pub mod summary;
pub mod unmatched;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Open the configured database with the schema brought up to date.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}
