//! Partial updates
//!
//! Turns an ordered set of `field => value` pairs into the assignment list of
//! an `UPDATE` statement.
//!
//! ## Example
//! ```
//! use jobly_postgres::update::{NameMap, SetFragment, UpdatePayload};
//!
//! let mut payload = UpdatePayload::new();
//! payload.set("firstName", "Aliya").set("age", 32);
//!
//! let names = NameMap::from_pairs(&[("firstName", "first_name")]);
//! let set = SetFragment::build(&payload, &names).unwrap();
//!
//! assert_eq!(set.to_string(), r#""first_name"=$1, "age"=$2"#);
//! assert_eq!(set.params().len(), 2);
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use crate::filter::{Ident, Param, Params};
use crate::{Error, Result, Value};

/// The fields to change, in the order they were set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdatePayload {
	inner: Vec<(String, Value)>,
}

impl UpdatePayload {
	pub fn new() -> Self {
		Self { inner: vec![] }
	}

	/// Sets a field, if the field was already set its value gets replaced
	/// but it keeps its position.
	pub fn set(
		&mut self,
		field: impl Into<String>,
		value: impl Into<Value>,
	) -> &mut Self {
		let field = field.into();
		let value = value.into();

		match self.inner.iter_mut().find(|(k, _)| *k == field) {
			Some((_, v)) => *v = value,
			None => self.inner.push((field, value)),
		}

		self
	}

	/// Builds a payload from a json object keeping the order of the keys.
	///
	/// ## Errors
	/// If a value is an array or an object.
	pub fn from_json(map: serde_json::Map<String, serde_json::Value>) -> Result<Self> {
		let mut this = Self::new();
		for (k, v) in map {
			this.set(k, Value::try_from(v)?);
		}

		Ok(this)
	}

	pub fn len(&self) -> usize {
		self.inner.len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> {
		self.inner.iter().map(|(k, v)| (k.as_str(), v))
	}
}

impl<K, V> FromIterator<(K, V)> for UpdatePayload
where
	K: Into<String>,
	V: Into<Value>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut this = Self::new();
		for (k, v) in iter {
			this.set(k, v);
		}

		this
	}
}

/// Translates field names to column names.
///
/// Fields without an entry are used as the column name.
#[derive(Debug, Clone, Default)]
pub struct NameMap {
	inner: HashMap<Cow<'static, str>, Cow<'static, str>>,
}

impl NameMap {
	pub fn new() -> Self {
		Self {
			inner: HashMap::new(),
		}
	}

	pub fn from_pairs(pairs: &[(&'static str, &'static str)]) -> Self {
		let mut this = Self::new();
		for (field, column) in pairs {
			this.insert(*field, *column);
		}

		this
	}

	pub fn insert(
		&mut self,
		field: impl Into<Cow<'static, str>>,
		column: impl Into<Cow<'static, str>>,
	) {
		self.inner.insert(field.into(), column.into());
	}

	pub fn column<'a>(&'a self, field: &'a str) -> &'a str {
		self.inner.get(field).map(|c| c.as_ref()).unwrap_or(field)
	}
}

/// The `SET` part of an update, `"a"=$1, "b"=$2`.
///
/// The n-th column is always assigned the n-th param.
#[derive(Debug)]
pub struct SetFragment {
	columns: Vec<String>,
	params: Params,
}

impl SetFragment {
	/// ## Errors
	/// Returns [`Error::EmptyPayload`] if there is nothing to set.
	pub fn build(payload: &UpdatePayload, names: &NameMap) -> Result<Self> {
		if payload.is_empty() {
			return Err(Error::EmptyPayload);
		}

		let mut columns = Vec::with_capacity(payload.len());
		let mut params = Params::new();

		for (field, value) in payload.iter() {
			let column = names.column(field).to_string();
			params.push(Param::new(column.clone(), value.clone()));
			columns.push(column);
		}

		Ok(Self { columns, params })
	}

	pub fn columns(&self) -> &[String] {
		&self.columns
	}

	pub fn params(&self) -> &Params {
		&self.params
	}

	pub fn into_params(self) -> Params {
		self.params
	}

	/// Number of assignments, a param following this fragment gets the
	/// number `len() + 1`.
	pub fn len(&self) -> usize {
		self.columns.len()
	}

	pub fn is_empty(&self) -> bool {
		self.columns.is_empty()
	}
}

impl fmt::Display for SetFragment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, column) in self.columns.iter().enumerate() {
			if i != 0 {
				f.write_str(", ")?;
			}

			write!(f, "{}=${}", Ident(column), i + 1)?;
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use serde_json::json;

	fn values(set: &SetFragment) -> Vec<Value> {
		set.params().values().cloned().collect()
	}

	#[test]
	fn one_field_mapped() {
		let payload = UpdatePayload::from_iter([("firstName", "john")]);
		let names = NameMap::from_pairs(&[("firstName", "first_name")]);

		let set = SetFragment::build(&payload, &names).unwrap();
		assert_eq!(set.to_string(), r#""first_name"=$1"#);
		assert_eq!(values(&set), [Value::from("john")]);
	}

	#[test]
	fn unmapped_field_passes_through() {
		let payload = UpdatePayload::from_iter([("x", 1)]);

		let set = SetFragment::build(&payload, &NameMap::new()).unwrap();
		assert_eq!(set.to_string(), r#""x"=$1"#);
		assert_eq!(values(&set), [Value::Int(1)]);
	}

	#[test]
	fn empty_payload() {
		let err =
			SetFragment::build(&UpdatePayload::new(), &NameMap::new())
				.unwrap_err();
		assert!(matches!(err, Error::EmptyPayload));

		let names = NameMap::from_pairs(&[("a", "b")]);
		let err = SetFragment::build(&UpdatePayload::new(), &names).unwrap_err();
		assert!(matches!(err, Error::EmptyPayload));
	}

	#[test]
	fn placeholders_follow_values() {
		let mut payload = UpdatePayload::new();
		payload
			.set("title", "New")
			.set("salary", None::<i32>)
			.set("numEmployees", 10)
			.set("equity", "0.1");
		let names = NameMap::from_pairs(&[("numEmployees", "num_employees")]);

		let set = SetFragment::build(&payload, &names).unwrap();
		assert_eq!(
			set.to_string(),
			r#""title"=$1, "salary"=$2, "num_employees"=$3, "equity"=$4"#
		);
		assert_eq!(set.len(), payload.len());
		assert_eq!(
			values(&set),
			[
				Value::from("New"),
				Value::Null,
				Value::Int(10),
				Value::from("0.1")
			]
		);
	}

	#[test]
	fn set_twice_keeps_position() {
		let mut payload = UpdatePayload::new();
		payload.set("a", 1).set("b", 2).set("a", 3);

		let set = SetFragment::build(&payload, &NameMap::new()).unwrap();
		assert_eq!(set.to_string(), r#""a"=$1, "b"=$2"#);
		assert_eq!(values(&set), [Value::Int(3), Value::Int(2)]);
	}

	#[test]
	fn quote_in_field_is_escaped() {
		let payload = UpdatePayload::from_iter([(r#"title"=1; --"#, "x")]);

		let set = SetFragment::build(&payload, &NameMap::new()).unwrap();
		assert_eq!(set.to_string(), r#""title""=1; --"=$1"#);
	}

	#[test]
	fn deterministic() {
		let payload =
			UpdatePayload::from_iter([("name", "C1"), ("logoUrl", "x")]);
		let names = NameMap::from_pairs(&[("logoUrl", "logo_url")]);

		let a = SetFragment::build(&payload, &names).unwrap();
		let b = SetFragment::build(&payload, &names).unwrap();
		assert_eq!(a.to_string(), b.to_string());
		assert_eq!(values(&a), values(&b));
	}

	#[test]
	fn json_keeps_key_order() {
		let json = json!({
			"title": "New",
			"salary": null,
			"equity": "0.5"
		});
		let serde_json::Value::Object(map) = json else {
			unreachable!()
		};

		let payload = UpdatePayload::from_json(map).unwrap();
		let set = SetFragment::build(&payload, &NameMap::new()).unwrap();
		assert_eq!(set.to_string(), r#""title"=$1, "salary"=$2, "equity"=$3"#);
	}

	#[test]
	fn json_rejects_nested() {
		let json = json!({ "title": { "en": "New" } });
		let serde_json::Value::Object(map) = json else {
			unreachable!()
		};

		let err = UpdatePayload::from_json(map).unwrap_err();
		assert!(matches!(err, Error::InvalidValue(_)));
	}
}
