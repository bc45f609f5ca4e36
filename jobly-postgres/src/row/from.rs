use super::Row;

use std::error::Error as StdError;

use postgres_types::FromSql;

pub trait FromRowOwned: Sized {
	fn from_row_owned(
		row: Row,
	) -> Result<Self, Box<dyn StdError + Sync + Send>>;
}

impl<T> FromRowOwned for T
where
	T: for<'r> FromRow<'r>,
{
	fn from_row_owned(
		row: Row,
	) -> Result<Self, Box<dyn StdError + Sync + Send>> {
		T::from_row(&row)
	}
}

pub trait FromRow<'r>: Sized {
	fn from_row(row: &'r Row) -> Result<Self, Box<dyn StdError + Sync + Send>>;
}

/// A single column, for example the result of `SELECT COUNT(*)`.
impl<'r, T> FromRow<'r> for [T; 1]
where
	T: FromSql<'r>,
{
	fn from_row(row: &'r Row) -> Result<Self, Box<dyn StdError + Sync + Send>> {
		Ok([row.try_get(0)?])
	}
}
