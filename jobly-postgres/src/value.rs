//! Scalar parameter values
//!
//! A [`Value`] is what gets bound to a `$n` placeholder by the update and
//! filter builders. Since the builders only know field names and not the
//! column types, the conversion to the wire format happens when the
//! statement is executed and postgres has told us the parameter type.

use std::error::Error as StdError;
use std::str::FromStr;

use bytes::BytesMut;
use postgres_types::{to_sql_checked, IsNull, ToSql, Type, WrongType};
use rust_decimal::Decimal;

use crate::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	Decimal(Decimal),
	Text(String),
}

impl Value {
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}
}

type BoxError = Box<dyn StdError + Sync + Send>;

fn wrong_type<T>(ty: &Type) -> Result<IsNull, BoxError> {
	Err(Box::new(WrongType::new::<T>(ty.clone())))
}

impl ToSql for Value {
	fn to_sql(
		&self,
		ty: &Type,
		out: &mut BytesMut,
	) -> Result<IsNull, BoxError> {
		match self {
			Self::Null => Ok(IsNull::Yes),
			Self::Bool(b) if <bool as ToSql>::accepts(ty) => b.to_sql(ty, out),
			Self::Bool(_) => wrong_type::<bool>(ty),
			Self::Int(v) => match *ty {
				Type::INT2 => i16::try_from(*v)?.to_sql(ty, out),
				Type::INT4 => i32::try_from(*v)?.to_sql(ty, out),
				Type::INT8 => v.to_sql(ty, out),
				Type::FLOAT4 => (*v as f32).to_sql(ty, out),
				Type::FLOAT8 => (*v as f64).to_sql(ty, out),
				Type::NUMERIC => Decimal::from(*v).to_sql(ty, out),
				_ => wrong_type::<i64>(ty),
			},
			Self::Float(v) => match *ty {
				Type::FLOAT4 => (*v as f32).to_sql(ty, out),
				Type::FLOAT8 => v.to_sql(ty, out),
				Type::NUMERIC => Decimal::try_from(*v)?.to_sql(ty, out),
				_ => wrong_type::<f64>(ty),
			},
			Self::Decimal(d) => match *ty {
				Type::NUMERIC => d.to_sql(ty, out),
				_ => wrong_type::<Decimal>(ty),
			},
			// text is accepted for numeric columns the same way postgres
			// accepts a quoted literal
			Self::Text(s) if *ty == Type::NUMERIC => {
				Decimal::from_str(s)?.to_sql(ty, out)
			}
			Self::Text(s) if <&str as ToSql>::accepts(ty) => {
				s.as_str().to_sql(ty, out)
			}
			Self::Text(_) => wrong_type::<String>(ty),
		}
	}

	fn accepts(ty: &Type) -> bool {
		<bool as ToSql>::accepts(ty)
			|| <i64 as ToSql>::accepts(ty)
			|| <i32 as ToSql>::accepts(ty)
			|| <i16 as ToSql>::accepts(ty)
			|| <f64 as ToSql>::accepts(ty)
			|| <f32 as ToSql>::accepts(ty)
			|| <Decimal as ToSql>::accepts(ty)
			|| <&str as ToSql>::accepts(ty)
	}

	to_sql_checked!();
}

macro_rules! impl_from {
	($($ty:ty => $var:ident),*) => {
		$(
			impl From<$ty> for Value {
				fn from(v: $ty) -> Self {
					Self::$var(v.into())
				}
			}
		)*
	};
}

impl_from!(
	bool => Bool,
	i16 => Int,
	i32 => Int,
	i64 => Int,
	u32 => Int,
	f32 => Float,
	f64 => Float,
	Decimal => Decimal,
	String => Text
);

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Self::Text(v.to_string())
	}
}

impl<T> From<Option<T>> for Value
where
	T: Into<Value>,
{
	fn from(v: Option<T>) -> Self {
		v.map(Into::into).unwrap_or(Self::Null)
	}
}

impl<T> From<&T> for Value
where
	T: Clone + Into<Value>,
{
	fn from(v: &T) -> Self {
		v.clone().into()
	}
}

impl TryFrom<serde_json::Value> for Value {
	type Error = Error;

	fn try_from(v: serde_json::Value) -> Result<Self, Self::Error> {
		use serde_json::Value as Json;

		match v {
			Json::Null => Ok(Self::Null),
			Json::Bool(b) => Ok(Self::Bool(b)),
			Json::Number(n) => match n.as_i64() {
				Some(i) => Ok(Self::Int(i)),
				None => n
					.as_f64()
					.map(Self::Float)
					.ok_or_else(|| Error::InvalidValue(n.to_string())),
			},
			Json::String(s) => Ok(Self::Text(s)),
			v @ (Json::Array(_) | Json::Object(_)) => {
				Err(Error::InvalidValue(v.to_string()))
			}
		}
	}
}
