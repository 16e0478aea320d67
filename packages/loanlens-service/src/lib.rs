pub mod loans;
pub mod normalize;
pub mod npl;
pub mod params;
pub mod records;
pub mod rfc3339;
pub mod status;
pub mod summary;

mod error;

pub use error::{Error, Result};
pub use loans::{LoanDataResponse, LoanFilters};
pub use npl::NplResponse;
pub use params::{LoanDataParams, SummaryParams};
pub use records::{LoanRecord, NplRecord, StatusRecord, SummaryRecord};
pub use status::StatusResponse;
pub use summary::{SummaryFilters, SummaryResponse};

use std::{future::Future, pin::Pin, sync::Arc};

use loanlens_config::Reporting;
use loanlens_storage::{
	db::Db,
	models::{RawLoanRow, RawNplRow, RawStatusRow, RawSummaryRow},
	sql::Statement,
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Executes built statements. [`Db`] is the production implementation; tests substitute fakes.
pub trait ReportSource
where
	Self: Send + Sync,
{
	fn loan_rows<'a>(&'a self, statement: &'a Statement) -> BoxFuture<'a, Result<Vec<RawLoanRow>>>;

	fn summary_rows<'a>(
		&'a self,
		statement: &'a Statement,
	) -> BoxFuture<'a, Result<Vec<RawSummaryRow>>>;

	fn npl_rows<'a>(&'a self, statement: &'a Statement) -> BoxFuture<'a, Result<Vec<RawNplRow>>>;

	fn status_rows<'a>(
		&'a self,
		statement: &'a Statement,
	) -> BoxFuture<'a, Result<Vec<RawStatusRow>>>;
}

pub struct LoanLensService {
	pub reporting: Reporting,
	pub source: Arc<dyn ReportSource>,
}
impl LoanLensService {
	pub fn new(reporting: Reporting, db: Db) -> Self {
		Self { reporting, source: Arc::new(db) }
	}

	pub fn with_source(reporting: Reporting, source: Arc<dyn ReportSource>) -> Self {
		Self { reporting, source }
	}
}

impl ReportSource for Db {
	fn loan_rows<'a>(&'a self, statement: &'a Statement) -> BoxFuture<'a, Result<Vec<RawLoanRow>>> {
		Box::pin(async move { Ok(self.fetch_all(statement).await?) })
	}

	fn summary_rows<'a>(
		&'a self,
		statement: &'a Statement,
	) -> BoxFuture<'a, Result<Vec<RawSummaryRow>>> {
		Box::pin(async move { Ok(self.fetch_all(statement).await?) })
	}

	fn npl_rows<'a>(&'a self, statement: &'a Statement) -> BoxFuture<'a, Result<Vec<RawNplRow>>> {
		Box::pin(async move { Ok(self.fetch_all(statement).await?) })
	}

	fn status_rows<'a>(
		&'a self,
		statement: &'a Statement,
	) -> BoxFuture<'a, Result<Vec<RawStatusRow>>> {
		Box::pin(async move { Ok(self.fetch_all(statement).await?) })
	}
}
