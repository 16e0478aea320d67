pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The request was rejected before any statement was issued. `field` names the offending
	/// query-string or path parameter.
	#[error("Invalid request: {message}")]
	InvalidRequest { field: &'static str, message: String },
	/// A statement failed; `message` carries the driver diagnostic.
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<loanlens_storage::Error> for Error {
	fn from(err: loanlens_storage::Error) -> Self {
		match err {
			loanlens_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
		}
	}
}
