use std::borrow::Cow;
use std::fmt;

use tokio_postgres::types::ToSql;

use crate::Value;

mod whr;

pub type SqlStr = Cow<'static, str>;

/// Writes `"name"`, a `"` inside the name is doubled.
pub(crate) struct Ident<'a>(pub &'a str);

impl fmt::Display for Ident<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("\"")?;
		for (i, part) in self.0.split('"').enumerate() {
			if i != 0 {
				f.write_str("\"\"")?;
			}
			f.write_str(part)?;
		}
		f.write_str("\"")
	}
}

/// A set of optional criteria which can be lowered to a where clause.
///
/// Only criteria which were supplied should add a predicate, and they should
/// always be added in the same order so the generated sql stays the same for
/// the same input.
pub trait Criteria {
	fn to_where(&self) -> WhereFilter;
}

#[derive(Debug)]
#[non_exhaustive]
pub struct Filter {
	pub whr: Where,
	pub order_by: OrderBy,
	pub limit: Limit,
	pub offset: Offset,
	pub params: Params,
}

impl Filter {
	pub fn new() -> Self {
		Self {
			whr: Where::new(),
			order_by: OrderBy::new(),
			limit: Limit::new(),
			offset: Offset::new(),
			params: Params::new(),
		}
	}

	/// Adds `"column" op $n` joined with AND to the previous predicate.
	///
	/// The param is placed before any limit or offset param.
	pub fn and(
		&mut self,
		column: impl Into<SqlStr>,
		op: Operator,
		value: impl Into<Value>,
	) -> &mut Self {
		if !self.whr.is_empty() {
			self.whr.push(WherePart::And);
		}

		let tail = self.params.inner.split_off(self.predicate_params());
		push_op(&mut self.whr, &mut self.params, column, op, value);
		self.params.inner.extend(tail);

		self
	}

	/// `LIMIT $n` with the value bound as a param.
	pub fn limit_param(
		&mut self,
		name: impl Into<SqlStr>,
		value: impl Into<Value>,
	) -> &mut Self {
		// the limit param always comes before the offset param
		let at = self.predicate_params();
		let param = Param::new(name, value);
		match self.params.inner.get_mut(at) {
			Some(prev) if matches!(self.limit, Limit::Param) => *prev = param,
			_ => self.params.inner.insert(at, param),
		}
		self.limit = Limit::Param;

		self
	}

	/// `OFFSET $n` with the value bound as a param.
	pub fn offset_param(
		&mut self,
		name: impl Into<SqlStr>,
		value: impl Into<Value>,
	) -> &mut Self {
		if matches!(self.offset, Offset::Param) {
			self.params.inner.pop();
		}
		self.params.push(Param::new(name, value));
		self.offset = Offset::Param;

		self
	}

	/// Number of params which belong to the where predicates.
	fn predicate_params(&self) -> usize {
		let tail = matches!(self.limit, Limit::Param) as usize
			+ matches!(self.offset, Offset::Param) as usize;

		self.params.len().saturating_sub(tail)
	}
}

impl From<WhereFilter> for Filter {
	fn from(f: WhereFilter) -> Self {
		Self {
			whr: f.whr,
			params: f.params,
			..Self::new()
		}
	}
}

impl fmt::Display for Filter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&self.whr, f)?;
		fmt::Display::fmt(&self.order_by, f)?;

		// predicates take $1..=$n, the limit and offset params follow
		let mut param_num = self.predicate_params();

		match &self.limit {
			Limit::Fixed(value) => write!(f, " LIMIT {}", value)?,
			Limit::Param => {
				param_num += 1;
				write!(f, " LIMIT ${}", param_num)?;
			}
			Limit::All => {}
		}

		match &self.offset {
			Offset::Zero => {}
			Offset::Fixed(value) => write!(f, " OFFSET {}", value)?,
			Offset::Param => write!(f, " OFFSET ${}", param_num + 1)?,
		}

		Ok(())
	}
}

/// Only the where part of a query with its params.
#[derive(Debug)]
#[non_exhaustive]
pub struct WhereFilter {
	pub whr: Where,
	pub params: Params,
}

impl WhereFilter {
	pub fn new() -> Self {
		Self {
			whr: Where::new(),
			params: Params::new(),
		}
	}

	/// Adds `"column" op $n` joined with AND to the previous predicate.
	pub fn and(
		&mut self,
		column: impl Into<SqlStr>,
		op: Operator,
		value: impl Into<Value>,
	) -> &mut Self {
		if !self.whr.is_empty() {
			self.whr.push(WherePart::And);
		}
		push_op(&mut self.whr, &mut self.params, column, op, value);
		self
	}

	/// `"column" ILIKE $n` with the value wrapped in `%` so it matches
	/// anywhere in the column, ignoring case.
	pub fn and_contains(
		&mut self,
		column: impl Into<SqlStr>,
		text: &str,
	) -> &mut Self {
		self.and(column, Operator::ILike, format!("%{text}%"))
	}

	pub fn is_empty(&self) -> bool {
		self.whr.is_empty()
	}

	/// The predicates without the `WHERE` keyword, empty if there are none.
	pub fn conditions(&self) -> String {
		self.whr.conditions().to_string()
	}
}

impl fmt::Display for WhereFilter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&self.whr, f)
	}
}

/// Pushes an operation and its param.
///
/// Comparing with null is turned into `IS NULL` or `IS NOT NULL` which don't
/// take a param.
pub fn push_op(
	whr: &mut Where,
	params: &mut Params,
	column: impl Into<SqlStr>,
	op: Operator,
	value: impl Into<Value>,
) {
	let column = column.into();
	let value = value.into();

	let kind = match op {
		Operator::Eq if value.is_null() => Operator::IsNull,
		Operator::Ne if value.is_null() => Operator::IsNotNull,
		op => op,
	};

	if kind.takes_param() {
		params.push(Param::new(column.clone(), value));
	}

	whr.push(WhereOperation { kind, column });
}

#[derive(Debug)]
pub struct Where {
	inner: Vec<WherePart>,
}

#[derive(Debug)]
pub enum WherePart {
	Operation(WhereOperation),
	And,
	Or,
}

#[derive(Debug)]
pub struct WhereOperation {
	pub kind: Operator,
	pub column: SqlStr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
	Eq,
	Ne,
	Lt,
	Lte,
	Gt,
	Gte,
	Like,
	ILike,

	// rhs will be ignored
	IsNull,
	// rhs will be ignored
	IsNotNull,
}

impl Where {
	pub fn new() -> Self {
		Self { inner: vec![] }
	}

	pub fn push(&mut self, part: impl Into<WherePart>) {
		self.inner.push(part.into());
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	/// Returns a formatter which numbers the params starting after
	/// `param_start` params.
	pub(crate) fn to_formatter(&self, param_start: usize) -> WhereFormatter<'_> {
		WhereFormatter {
			whr: self,
			param_start,
			keyword: true,
		}
	}

	pub(crate) fn conditions(&self) -> WhereFormatter<'_> {
		WhereFormatter {
			whr: self,
			param_start: 0,
			keyword: false,
		}
	}
}

impl fmt::Display for Where {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&self.to_formatter(0), f)
	}
}

pub(crate) struct WhereFormatter<'a> {
	pub whr: &'a Where,
	/// indexed by zero
	pub param_start: usize,
	/// prefix with ` WHERE `
	pub keyword: bool,
}

impl fmt::Display for WhereFormatter<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.whr.is_empty() {
			return Ok(());
		}

		if self.keyword {
			f.write_str(" WHERE ")?;
		}

		let mut param_num = self.param_start;

		for part in &self.whr.inner {
			match part {
				WherePart::And => f.write_str(" AND ")?,
				WherePart::Or => f.write_str(" OR ")?,
				WherePart::Operation(op) if !op.kind.takes_param() => {
					write!(f, "{} {}", Ident(&op.column), op.kind.as_str())?;
				}
				WherePart::Operation(op) => {
					param_num += 1;

					write!(
						f,
						"{} {} ${}",
						Ident(&op.column),
						op.kind.as_str(),
						param_num
					)?;
				}
			}
		}

		Ok(())
	}
}

impl From<WhereOperation> for WherePart {
	fn from(op: WhereOperation) -> Self {
		Self::Operation(op)
	}
}

impl Operator {
	fn as_str(&self) -> &str {
		match self {
			Operator::Eq => "=",
			Operator::Ne => "!=",
			Operator::Lt => "<",
			Operator::Lte => "<=",
			Operator::Gt => ">",
			Operator::Gte => ">=",
			Operator::Like => "LIKE",
			Operator::ILike => "ILIKE",
			Operator::IsNull => "IS NULL",
			Operator::IsNotNull => "IS NOT NULL",
		}
	}

	fn takes_param(&self) -> bool {
		!matches!(self, Operator::IsNull | Operator::IsNotNull)
	}
}

#[derive(Debug)]
pub struct OrderBy {
	inner: Vec<OrderByPart>,
}

#[derive(Debug)]
pub enum OrderByPart {
	Asc(SqlStr),
	Desc(SqlStr),
}

impl OrderBy {
	pub fn new() -> Self {
		Self { inner: vec![] }
	}

	pub fn push_asc(&mut self, column: impl Into<SqlStr>) {
		self.inner.push(OrderByPart::Asc(column.into()));
	}

	pub fn push_desc(&mut self, column: impl Into<SqlStr>) {
		self.inner.push(OrderByPart::Desc(column.into()));
	}

	fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}
}

impl fmt::Display for OrderBy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_empty() {
			return Ok(());
		}

		f.write_str(" ORDER BY ")?;

		for (i, part) in self.inner.iter().enumerate() {
			if i != 0 {
				f.write_str(", ")?;
			}

			match part {
				OrderByPart::Asc(column) => write!(f, "{} ASC", Ident(column))?,
				OrderByPart::Desc(column) => {
					write!(f, "{} DESC", Ident(column))?
				}
			}
		}

		Ok(())
	}
}

#[derive(Debug)]
pub enum Limit {
	Fixed(usize),
	Param,
	All,
}

impl Limit {
	pub fn new() -> Self {
		Self::All
	}

	pub fn set_fixed(&mut self, value: usize) {
		*self = Self::Fixed(value);
	}
}

#[derive(Debug)]
pub enum Offset {
	Zero,
	Fixed(usize),
	Param,
}

impl Offset {
	pub fn new() -> Self {
		Self::Zero
	}

	pub fn set_fixed(&mut self, value: usize) {
		*self = Self::Fixed(value);
	}
}

/// Params in the order of their placeholder, the first one is `$1`.
#[derive(Debug, Clone, Default)]
pub struct Params {
	inner: Vec<Param>,
}

impl Params {
	pub fn new() -> Self {
		Self { inner: vec![] }
	}

	pub fn push(&mut self, param: Param) {
		self.inner.push(param);
	}

	pub fn len(&self) -> usize {
		self.inner.len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	pub fn values(&self) -> impl ExactSizeIterator<Item = &Value> {
		self.inner.iter().map(|p| &p.value)
	}

	pub fn iter_to_sql(
		&self,
	) -> impl ExactSizeIterator<Item = &(dyn ToSql + Sync)> {
		self.inner.iter().map(|p| &p.value as &(dyn ToSql + Sync))
	}
}

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Param {
	/// the column this param is compared with or assigned to
	pub name: SqlStr,
	pub value: Value,
}

impl Param {
	pub fn new(name: impl Into<SqlStr>, value: impl Into<Value>) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
		}
	}
}
