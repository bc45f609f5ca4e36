use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::filter::{Criteria, Filter, Operator, WhereFilter};
use crate::row::RowBuilder;
use crate::update::{NameMap, SetFragment, UpdatePayload};
use crate::{Connection, Error, FromRow, Result};

pub const TABLE: &str = "jobs";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Job {
	pub id: i32,
	pub title: String,
	pub salary: Option<i32>,
	pub equity: Option<Decimal>,
	pub company_handle: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewJob {
	pub title: String,
	pub salary: Option<i32>,
	pub equity: Option<Decimal>,
	pub company_handle: String,
}

/// Search criteria for jobs, `None` means the criterion was not supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFilter {
	/// salary >= min_salary
	pub min_salary: Option<i32>,
	/// case insensitive part of the title
	pub title: Option<String>,
	/// `Some(true)` only returns jobs with an equity above zero,
	/// `Some(false)` does not filter
	pub has_equity: Option<bool>,
}

impl Criteria for JobFilter {
	fn to_where(&self) -> WhereFilter {
		let mut whr = WhereFilter::new();

		if let Some(min_salary) = self.min_salary {
			whr.and("salary", Operator::Gte, min_salary);
		}

		if let Some(title) = &self.title {
			whr.and_contains("title", title);
		}

		if self.has_equity == Some(true) {
			whr.and("equity", Operator::Gt, Decimal::ZERO);
		}

		whr
	}
}

impl Job {
	/// Inserts a new job, multiple jobs can share the same title.
	pub async fn create(conn: Connection<'_>, job: &NewJob) -> Result<Job> {
		let mut row = RowBuilder::new();
		row.push("title", &job.title)
			.push("salary", &job.salary)
			.push("equity", &job.equity)
			.push("company_handle", &job.company_handle);

		conn.insert_returning(TABLE, &row).await
	}

	/// Returns all jobs matching the filter ordered by their company.
	pub async fn find_all(
		conn: Connection<'_>,
		filter: &JobFilter,
	) -> Result<Vec<Job>> {
		let mut filter: Filter = filter.to_where().into();
		filter.order_by.push_asc("company_handle");
		filter.order_by.push_asc("id");

		conn.select(TABLE, filter).await
	}

	pub async fn get(conn: Connection<'_>, id: i32) -> Result<Job> {
		conn.select_opt(TABLE, crate::filter!(id))
			.await?
			.ok_or_else(|| Error::not_found(format!("No job with id: {id}")))
	}

	/// Partially updates a job, only the fields in the payload are changed.
	///
	/// ## Errors
	/// - [`Error::EmptyPayload`] before anything is sent to the database
	/// - [`Error::NotFound`] if no job has this id
	pub async fn update(
		conn: Connection<'_>,
		id: i32,
		payload: &UpdatePayload,
	) -> Result<Job> {
		let set = SetFragment::build(payload, &NameMap::new())?;

		conn.update_returning(TABLE, &set, &crate::whr!(id))
			.await?
			.ok_or_else(|| Error::not_found(format!("No job with id: {id}")))
	}

	pub async fn remove(conn: Connection<'_>, id: i32) -> Result<()> {
		let deleted = conn.delete(TABLE, &crate::whr!(id)).await?;

		if deleted == 0 {
			return Err(Error::not_found(format!("No job with id: {id}")));
		}

		Ok(())
	}
}
