use tokio_postgres::error::SqlState;
use tokio_postgres::Error as PgError;
use tracing::error;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
	/// An update was requested without any field to set.
	#[error("No data to update")]
	EmptyPayload,

	#[error("Not found: {0}")]
	NotFound(String),

	/// A payload value which cannot be bound as a scalar parameter.
	#[error("Invalid value {0}")]
	InvalidValue(String),

	#[error("Invalid filter {0}")]
	InvalidFilter(String),

	#[error("Unique violation {0}")]
	UniqueViolation(PgError),

	#[error("Expected one row")]
	ExpectedOneRow,

	#[error("Other Postgres error {0}")]
	Other(PgError),

	#[error("Deserialization error {0}")]
	Deserialize(Box<dyn std::error::Error + Send + Sync>),

	#[error("Unknown error {0}")]
	Unknown(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
	pub fn not_found(msg: impl Into<String>) -> Self {
		Self::NotFound(msg.into())
	}

	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound(_))
	}
}

impl From<PgError> for Error {
	fn from(e: PgError) -> Self {
		let Some(state) = e.code() else {
			return Self::Other(e);
		};

		match state {
			&SqlState::UNIQUE_VIOLATION => Self::UniqueViolation(e),
			state => {
				error!("db error with state {:?}", state);
				Self::Other(e)
			}
		}
	}
}
