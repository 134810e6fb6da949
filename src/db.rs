use diesel::r2d2::{self, ConnectionManager, PooledConnection};
use diesel::MysqlConnection;
use tracing::{error, info};

use crate::store::StoreError;

pub type DbPool = r2d2::Pool<ConnectionManager<MysqlConnection>>;
pub type DbConn = PooledConnection<ConnectionManager<MysqlConnection>>;

/// Build the connection pool and check that the database answers.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<DbPool, StoreError> {
    let manager = ConnectionManager::<MysqlConnection>::new(database_url);
    let pool = r2d2::Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(|e| {
            error!("failed to create DB pool: {}", e);
            StoreError::Pool(e.to_string())
        })?;
    info!(max_size, "database pool ready");
    Ok(pool)
}

/// Helper function to get a pooled DB connection
pub fn get_conn(pool: &DbPool) -> Result<DbConn, StoreError> {
    pool.get().map_err(|e| {
        error!("failed to check out DB connection: {}", e);
        StoreError::Pool(e.to_string())
    })
}
