//! View-state schema steps, tracked in `PRAGMA user_version`.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;
use std::cmp::Ordering;

/// `(version, sql)`; versions strictly increase.
const SCHEMA_STEPS: &[(u32, &str)] = &[(1, include_str!("0001_view_state.sql"))];

pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |(version, _)| *version)
}

/// Brings the schema up to [`latest_version`] inside one transaction.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    let supported = latest_version();

    match found.cmp(&supported) {
        Ordering::Greater => Err(DbError::SchemaTooNew { found, supported }),
        Ordering::Equal => Ok(()),
        Ordering::Less => {
            let tx = conn.transaction()?;
            for (version, sql) in SCHEMA_STEPS.iter().filter(|(version, _)| *version > found) {
                tx.execute_batch(sql)?;
                tx.pragma_update(None, "user_version", version)?;
            }
            tx.commit()?;
            Ok(())
        }
    }
}
