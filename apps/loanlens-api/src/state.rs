use std::sync::Arc;

use loanlens_config::Reporting;
use loanlens_service::LoanLensService;
use loanlens_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<LoanLensService>,
}
impl AppState {
	pub fn new(reporting: Reporting, db: Db) -> Self {
		Self::from_service(LoanLensService::new(reporting, db))
	}

	pub fn from_service(service: LoanLensService) -> Self {
		Self { service: Arc::new(service) }
	}
}
