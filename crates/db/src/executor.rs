//! One-connection-per-statement query execution.
//!
//! [`QueryExecutor`] opens a fresh connection, runs a single bound statement
//! inside a transaction, commits, and closes the connection again. Nothing
//! is pooled or reused across calls.

use sqlx::postgres::{PgArguments, PgConnectOptions, PgRow};
use sqlx::query::Query;
use sqlx::{Connection, FromRow, PgConnection, Postgres};

use crate::error::DbError;

/// A bound statement ready for [`QueryExecutor::execute`].
pub type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// Executes bound statements against a target database.
pub struct QueryExecutor;

impl QueryExecutor {
    /// Run `query` against `target` and return every row it produced.
    ///
    /// Statements without a result set (plain `INSERT`, `UPDATE`, ...)
    /// return an empty vector. The transaction is committed before the
    /// connection is closed, including for read-only statements.
    pub async fn execute<'q>(
        target: &PgConnectOptions,
        query: PgQuery<'q>,
    ) -> Result<Vec<PgRow>, DbError> {
        let mut conn = Self::connect(target).await?;

        let mut tx = conn.begin().await?;
        let rows = query.fetch_all(&mut *tx).await?;
        tx.commit().await?;

        conn.close().await?;
        Ok(rows)
    }

    /// Run `query` and decode every row into `T`.
    pub async fn fetch_as<'q, T>(
        target: &PgConnectOptions,
        query: PgQuery<'q>,
    ) -> Result<Vec<T>, DbError>
    where
        T: for<'r> FromRow<'r, PgRow>,
    {
        let rows = Self::execute(target, query).await?;
        rows.iter()
            .map(|row| T::from_row(row))
            .collect::<Result<Vec<_>, _>>()
            .map_err(DbError::from)
    }

    async fn connect(target: &PgConnectOptions) -> Result<PgConnection, DbError> {
        PgConnection::connect_with(target).await.map_err(|source| {
            let host = target.get_host().to_string();
            let database = target.get_database().unwrap_or_default().to_string();
            tracing::error!(
                host = %host,
                database = %database,
                error = %source,
                "Database connection failed"
            );
            DbError::ConnectionFailed {
                host,
                database,
                source,
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
