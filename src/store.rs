use std::path::PathBuf;

use chrono::NaiveDate;

use crate::db::get_connection;
use crate::error::{FarthingError, Result};
use crate::models::{Transaction, TxnKind};

/// The one data-access seam of the dashboard. Production reads SQLite;
/// tests substitute an in-memory fake.
pub trait TransactionStore: Send + Sync {
    fn transactions_for_user(&self, user_id: i64) -> Result<Vec<Transaction>>;
}

const FETCH_SQL: &str =
    "SELECT date, type, amount, category FROM transactions WHERE user_id = ?1 ORDER BY date DESC";

/// SQLite-backed store. Holds only the path: a connection is opened for
/// each call and dropped when it returns, success or failure, so nothing
/// stays acquired between renders.
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    pub fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }
}

impl TransactionStore for SqliteStore {
    fn transactions_for_user(&self, user_id: i64) -> Result<Vec<Transaction>> {
        let conn = get_connection(&self.db_path)?;
        let mut stmt = conn.prepare(FETCH_SQL)?;
        let raw = stmt
            .query_map([user_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        raw.into_iter()
            .map(|(date, kind, amount, category)| {
                let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                    .map_err(|_| FarthingError::BadRow(format!("unparseable date {date:?}")))?;
                let kind = TxnKind::parse(&kind)
                    .ok_or_else(|| FarthingError::BadRow(format!("unknown type {kind:?}")))?;
                Ok(Transaction {
                    date,
                    kind,
                    amount,
                    category,
                })
            })
            .collect()
    }
}
