use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::filter::{Criteria, Filter, Operator, WhereFilter};
use crate::row::RowBuilder;
use crate::update::{NameMap, SetFragment, UpdatePayload};
use crate::{Connection, Error, FromRow, Result};

pub const TABLE: &str = "companies";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
	pub handle: String,
	pub name: String,
	pub description: String,
	pub num_employees: Option<i32>,
	pub logo_url: Option<String>,
}

/// A company with all its jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetail {
	#[serde(flatten)]
	pub company: Company,
	pub jobs: Vec<CompanyJob>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CompanyJob {
	pub id: i32,
	pub title: String,
	pub salary: Option<i32>,
	pub equity: Option<Decimal>,
}

/// Search criteria for companies, `None` means the criterion was not
/// supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyFilter {
	/// case insensitive part of the name
	pub name_like: Option<String>,
	pub min_employees: Option<i32>,
	pub max_employees: Option<i32>,
}

impl CompanyFilter {
	/// ## Errors
	/// If `min_employees` is larger than `max_employees`.
	pub fn validate(&self) -> Result<()> {
		match (self.min_employees, self.max_employees) {
			(Some(min), Some(max)) if min > max => Err(Error::InvalidFilter(
				format!("minEmployees {min} cannot be larger than maxEmployees {max}"),
			)),
			_ => Ok(()),
		}
	}
}

impl Criteria for CompanyFilter {
	fn to_where(&self) -> WhereFilter {
		let mut whr = WhereFilter::new();

		if let Some(name) = &self.name_like {
			whr.and_contains("name", name);
		}

		if let Some(min) = self.min_employees {
			whr.and("num_employees", Operator::Gte, min);
		}

		if let Some(max) = self.max_employees {
			whr.and("num_employees", Operator::Lte, max);
		}

		whr
	}
}

/// Field names used by clients which differ from the column.
pub fn name_map() -> NameMap {
	NameMap::from_pairs(&[
		("numEmployees", "num_employees"),
		("logoUrl", "logo_url"),
	])
}

fn not_found(handle: &str) -> Error {
	Error::not_found(format!("No company: {handle}"))
}

impl Company {
	/// ## Errors
	/// [`Error::UniqueViolation`] if the handle or the name already exists.
	pub async fn create(
		conn: Connection<'_>,
		company: &Company,
	) -> Result<Company> {
		let mut row = RowBuilder::new();
		row.push("handle", &company.handle)
			.push("name", &company.name)
			.push("description", &company.description)
			.push("num_employees", &company.num_employees)
			.push("logo_url", &company.logo_url);

		conn.insert_returning(TABLE, &row).await
	}

	/// Returns all companies matching the filter ordered by name.
	pub async fn find_all(
		conn: Connection<'_>,
		filter: &CompanyFilter,
	) -> Result<Vec<Company>> {
		filter.validate()?;

		let mut filter: Filter = filter.to_where().into();
		filter.order_by.push_asc("name");

		conn.select(TABLE, filter).await
	}

	pub async fn get(
		conn: Connection<'_>,
		handle: &str,
	) -> Result<CompanyDetail> {
		let company: Company = conn
			.select_opt(TABLE, crate::filter!(handle))
			.await?
			.ok_or_else(|| not_found(handle))?;

		let jobs = conn
			.select(
				super::job::TABLE,
				crate::filter!("company_handle" = handle ORDER "id" ASC),
			)
			.await?;

		Ok(CompanyDetail { company, jobs })
	}

	/// Partially updates a company, fields can be named like the columns
	/// or like in [`name_map`].
	pub async fn update(
		conn: Connection<'_>,
		handle: &str,
		payload: &UpdatePayload,
	) -> Result<Company> {
		let set = SetFragment::build(payload, &name_map())?;

		conn.update_returning(TABLE, &set, &crate::whr!(handle))
			.await?
			.ok_or_else(|| not_found(handle))
	}

	pub async fn remove(conn: Connection<'_>, handle: &str) -> Result<()> {
		let deleted = conn.delete(TABLE, &crate::whr!(handle)).await?;

		if deleted == 0 {
			return Err(not_found(handle));
		}

		Ok(())
	}
}
