use std::time::Duration;

use sqlx::{
	FromRow, PgPool,
	postgres::{PgPoolOptions, PgRow},
};

use crate::{
	Result,
	sql::{Param, Statement},
};

/// Process-scoped connection pool. Built once at startup and drained with [`Db::close`].
#[derive(Clone)]
pub struct Db {
	pub pool: PgPool,
}
impl Db {
	pub async fn connect(cfg: &loanlens_config::Postgres) -> Result<Self> {
		let pool = PgPoolOptions::new()
			.max_connections(cfg.pool_max_conns)
			.acquire_timeout(Duration::from_millis(cfg.acquire_timeout_ms))
			.connect(&cfg.dsn)
			.await?;

		Ok(Self { pool })
	}

	pub async fn fetch_all<T>(&self, statement: &Statement) -> Result<Vec<T>>
	where
		T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
	{
		let mut query = sqlx::query_as::<_, T>(statement.sql.as_str());

		for param in &statement.params {
			query = match param {
				Param::Int(value) => query.bind(*value),
				Param::BigInt(value) => query.bind(*value),
				Param::Date(value) => query.bind(*value),
				Param::Text(value) => query.bind(value.as_str()),
			};
		}

		let rows = query.fetch_all(&self.pool).await?;

		tracing::debug!(table = %statement.table, rows = rows.len(), "Fetched source rows.");

		Ok(rows)
	}

	pub async fn close(&self) {
		self.pool.close().await;
	}
}
