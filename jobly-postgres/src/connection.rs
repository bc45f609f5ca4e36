use std::borrow::Borrow;

use deadpool_postgres::{ClientWrapper, Object};

use futures_util::pin_mut;
use futures_util::StreamExt;
use futures_util::TryStreamExt;
use postgres_types::BorrowToSql;

use tokio_postgres::Statement;
use tokio_postgres::ToStatement;
use tracing::debug;

use crate::filter::{Filter, Ident, WhereFilter};
use crate::row::{FromRowOwned, NamedColumns, RowStream, ToRow};
use crate::update::SetFragment;
use crate::Error;

#[derive(Debug)]
pub struct ConnectionOwned(pub(crate) Object);

impl ConnectionOwned {
	pub fn connection(&self) -> Connection {
		Connection {
			inner: ConnectionInner::Client(&self.0),
		}
	}

	pub async fn transaction(&mut self) -> Result<Transaction, Error> {
		Ok(Transaction {
			inner: self.0.transaction().await.map_err(Error::from)?,
		})
	}
}

#[derive(Debug)]
pub struct Transaction<'a> {
	inner: deadpool_postgres::Transaction<'a>,
}

impl<'a> Transaction<'a> {
	/// Returns a connection to the database
	pub fn connection(&self) -> Connection {
		Connection {
			inner: ConnectionInner::Transaction(&self.inner),
		}
	}

	/// See [`tokio_postgres::Transaction::commit()`]
	pub async fn commit(self) -> Result<(), Error> {
		self.inner.commit().await.map_err(Error::from)
	}

	/// See [`tokio_postgres::Transaction::rollback()`]
	pub async fn rollback(self) -> Result<(), Error> {
		self.inner.rollback().await.map_err(Error::from)
	}
}

#[derive(Debug, Clone, Copy)]
pub struct Connection<'a> {
	inner: ConnectionInner<'a>,
}

#[derive(Debug, Clone, Copy)]
enum ConnectionInner<'a> {
	Client(&'a ClientWrapper),
	Transaction(&'a deadpool_postgres::Transaction<'a>),
}

impl Connection<'_> {
	/// `SELECT {columns} FROM "{table}"{filter}`
	pub async fn select<R>(
		&self,
		table: &str,
		filter: impl Borrow<Filter>,
	) -> Result<Vec<R>, Error>
	where
		R: FromRowOwned + NamedColumns,
	{
		let filter = filter.borrow();
		let sql = format!(
			"SELECT {} FROM {}{}",
			R::select_columns(),
			Ident(table),
			filter
		);
		debug!("select {} with {} params", sql, filter.params.len());
		let stmt = self.prepare_cached(&sql).await?;

		self.query_raw(&stmt, filter.params.iter_to_sql())
			.await?
			.map(|row| {
				row.and_then(|row| {
					R::from_row_owned(row).map_err(Error::Deserialize)
				})
			})
			.try_collect()
			.await
	}

	/// Like [`Connection::select`] but returns an error if more than one
	/// row matches.
	pub async fn select_opt<R>(
		&self,
		table: &str,
		filter: impl Borrow<Filter>,
	) -> Result<Option<R>, Error>
	where
		R: FromRowOwned + NamedColumns,
	{
		let filter = filter.borrow();
		let sql = format!(
			"SELECT {} FROM {}{}",
			R::select_columns(),
			Ident(table),
			filter
		);
		debug!("select_opt {} with {} params", sql, filter.params.len());
		let stmt = self.prepare_cached(&sql).await?;

		self.query_raw_opt(&stmt, filter.params.iter_to_sql())
			.await
	}

	/// `INSERT INTO "{table}" (..) VALUES (..) RETURNING {columns}`
	pub async fn insert_returning<R, U>(
		&self,
		table: &str,
		row: &U,
	) -> Result<R, Error>
	where
		R: FromRowOwned + NamedColumns,
		U: ToRow,
	{
		let mut columns = String::new();
		row.insert_columns(&mut columns);
		let mut values = String::new();
		row.insert_values(&mut values);

		let sql = format!(
			"INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
			Ident(table),
			columns,
			values,
			R::select_columns()
		);
		debug!("insert {} with {} params", sql, row.params_len());

		self.query_raw_opt(sql.as_str(), row.params())
			.await
			.and_then(|opt| opt.ok_or(Error::ExpectedOneRow))
	}

	/// `UPDATE "{table}" SET {set}{whr} RETURNING {columns}`
	///
	/// The where params are numbered after the set params. Returns `None`
	/// if no row matched.
	pub async fn update_returning<R>(
		&self,
		table: &str,
		set: &SetFragment,
		whr: &WhereFilter,
	) -> Result<Option<R>, Error>
	where
		R: FromRowOwned + NamedColumns,
	{
		if set.is_empty() {
			return Err(Error::EmptyPayload);
		}

		let sql = format!(
			"UPDATE {} SET {}{} RETURNING {}",
			Ident(table),
			set,
			whr.whr.to_formatter(set.len()),
			R::select_columns()
		);
		let params: Vec<_> = set
			.params()
			.iter_to_sql()
			.chain(whr.params.iter_to_sql())
			.collect();
		debug!("update {} with {} params", sql, params.len());

		self.query_raw_opt(sql.as_str(), params).await
	}

	/// `DELETE FROM "{table}"{whr}` returns the number of deleted rows.
	pub async fn delete(
		&self,
		table: &str,
		whr: &WhereFilter,
	) -> Result<u64, Error> {
		let sql = format!("DELETE FROM {}{}", Ident(table), whr);
		debug!("delete {} with {} params", sql, whr.params.len());

		self.execute_raw(sql.as_str(), whr.params.iter_to_sql())
			.await
	}

	/// Like [`tokio_postgres::Client::prepare()`] but uses a cached
	/// statement if one exists.
	pub async fn prepare_cached(
		&self,
		query: &str,
	) -> Result<Statement, Error> {
		match &self.inner {
			ConnectionInner::Client(client) => {
				client.prepare_cached(query).await.map_err(Error::from)
			}
			ConnectionInner::Transaction(tr) => {
				tr.prepare_cached(query).await.map_err(Error::from)
			}
		}
	}

	/// Returns the only row of the query or `None`.
	///
	/// ## Errors
	/// [`Error::ExpectedOneRow`] if the query returns more than one row.
	pub async fn query_raw_opt<R, T, P, I>(
		&self,
		statement: &T,
		params: I,
	) -> Result<Option<R>, Error>
	where
		R: FromRowOwned,
		T: ?Sized + ToStatement,
		P: BorrowToSql,
		I: IntoIterator<Item = P>,
		I::IntoIter: ExactSizeIterator,
	{
		let stream = self.query_raw(statement, params).await?;
		pin_mut!(stream);

		let row = stream.try_next().await?;

		// a finished stream must not be polled again
		if row.is_some() && stream.try_next().await?.is_some() {
			return Err(Error::ExpectedOneRow);
		}

		row.map(|row| R::from_row_owned(row).map_err(Error::Deserialize))
			.transpose()
	}

	/// See [`tokio_postgres::Client::query_raw()`]
	pub async fn query_raw<T, P, I>(
		&self,
		statement: &T,
		params: I,
	) -> Result<RowStream, Error>
	where
		T: ?Sized + ToStatement,
		P: BorrowToSql,
		I: IntoIterator<Item = P>,
		I::IntoIter: ExactSizeIterator,
	{
		let row_stream = match &self.inner {
			ConnectionInner::Client(client) => {
				client.query_raw(statement, params).await?
			}
			ConnectionInner::Transaction(tr) => {
				tr.query_raw(statement, params).await?
			}
		};

		Ok(row_stream.into())
	}

	/// See [`tokio_postgres::Client::execute_raw()`]
	pub async fn execute_raw<T, P, I>(
		&self,
		statement: &T,
		params: I,
	) -> Result<u64, Error>
	where
		T: ?Sized + ToStatement,
		P: BorrowToSql,
		I: IntoIterator<Item = P>,
		I::IntoIter: ExactSizeIterator,
	{
		match &self.inner {
			ConnectionInner::Client(client) => client
				.execute_raw(statement, params)
				.await
				.map_err(Error::from),
			ConnectionInner::Transaction(tr) => {
				tr.execute_raw(statement, params).await.map_err(Error::from)
			}
		}
	}

	/// See [`tokio_postgres::Client::batch_execute()`]
	pub async fn batch_execute(&self, query: &str) -> Result<(), Error> {
		match &self.inner {
			ConnectionInner::Client(client) => {
				client.batch_execute(query).await.map_err(Error::from)
			}
			ConnectionInner::Transaction(tr) => {
				tr.batch_execute(query).await.map_err(Error::from)
			}
		}
	}
}

