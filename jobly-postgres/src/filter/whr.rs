/// Builds a [`Filter`](crate::filter::Filter) from a short description.
///
/// Comparisons are `column op value` where `op` is one of
/// `= != < <= > >= LIKE ILIKE` or `~` (`ILIKE '%value%'`), a lone ident
/// compares the column of the same name for equality. Comparisons are
/// joined with `AND` / `OR` and can be followed by `ORDER`, `LIMIT` and
/// `OFFSET`.
///
/// ## Example
/// ```
/// use jobly_postgres::filter;
///
/// let handle = "c1";
/// let page = 2i64;
/// let query = filter!(handle AND "salary" >= 100 ORDER "id" ASC LIMIT 10 OFFSET &page);
///
/// assert_eq!(
/// 	query.to_string(),
/// 	r#" WHERE "handle" = $1 AND "salary" >= $2 ORDER BY "id" ASC LIMIT 10 OFFSET $3"#
/// );
/// ```
#[macro_export]
macro_rules! filter {
	(cont; $f:ident, ORDER $($tt:tt)+) => (
		$crate::filter_order!($f, $($tt)+);
	);
	(cont; $f:ident, LIMIT $($tt:tt)+) => (
		$crate::filter_limit!($f, $($tt)+);
	);
	(cont; $f:ident, OFFSET $($tt:tt)+) => (
		$crate::filter_offset!($f, $($tt)+);
	);
	(cont; $f:ident, $($tt:tt)*) => (
		$crate::filter_inner!($f, $($tt)*);
	);

	($($tt:tt)*) => ({
		#[allow(unused_mut)]
		let mut f = $crate::filter::Filter::new();
		$crate::filter!(cont; f, $($tt)*);

		f
	});
}

/// Like [`filter!`] but only builds the where part, used for updates and
/// deletes.
///
/// ## Example
/// ```
/// use jobly_postgres::whr;
///
/// let id = 1;
/// let title = "engineer";
/// let whr = whr!(id AND "title" ~ title);
///
/// assert_eq!(whr.to_string(), r#" WHERE "id" = $1 AND "title" ILIKE $2"#);
/// ```
#[macro_export]
macro_rules! whr {
	($($tt:tt)*) => ({
		#[allow(unused_mut)]
		let mut f = $crate::filter::WhereFilter::new();
		$crate::filter_inner!(f, $($tt)*);

		f
	});
}

#[doc(hidden)]
#[macro_export]
macro_rules! filter_inner {
	($f:ident,) => ();

	($f:ident, &$id:ident $($tt:tt)*) => (
		$crate::whr_comp!($f, stringify!($id), =, &$id $($tt)*);
	);
	($f:ident, $id:ident $($tt:tt)*) => (
		$crate::whr_comp!($f, stringify!($id), =, $id $($tt)*);
	);
	($f:ident, $name:literal $op:tt $($tt:tt)+) => (
		$crate::whr_comp!($f, $name, $op, $($tt)+);
	);
}

/// Splits the value from the rest and pushes the comparison.
#[doc(hidden)]
#[macro_export]
macro_rules! whr_comp {
	($f:ident, $name:expr, $op:tt, &$value:tt $($tt:tt)*) => (
		$crate::whr_comp!(push; $f, $name, $op, &$value, $($tt)*);
	);
	($f:ident, $name:expr, $op:tt, $value:tt $($tt:tt)*) => (
		$crate::whr_comp!(push; $f, $name, $op, $value, $($tt)*);
	);

	(push; $f:ident, $name:expr, ~, $value:expr, $($tt:tt)*) => (
		$crate::filter::push_op(
			&mut $f.whr,
			&mut $f.params,
			$name,
			$crate::filter::Operator::ILike,
			format!("%{}%", $value),
		);
		$crate::whr_log!($f, $($tt)*);
	);
	(push; $f:ident, $name:expr, $op:tt, $value:expr, $($tt:tt)*) => (
		$crate::filter::push_op(
			&mut $f.whr,
			&mut $f.params,
			$name,
			$crate::whr_op!($op),
			$value,
		);
		$crate::whr_log!($f, $($tt)*);
	);
}

#[doc(hidden)]
#[macro_export]
macro_rules! whr_op {
	(=) => ($crate::filter::Operator::Eq);
	(!=) => ($crate::filter::Operator::Ne);
	(<) => ($crate::filter::Operator::Lt);
	(<=) => ($crate::filter::Operator::Lte);
	(>) => ($crate::filter::Operator::Gt);
	(>=) => ($crate::filter::Operator::Gte);
	(LIKE) => ($crate::filter::Operator::Like);
	(ILIKE) => ($crate::filter::Operator::ILike);
}

/// What may follow a comparison.
#[doc(hidden)]
#[macro_export]
macro_rules! whr_log {
	($f:ident, AND $($tt:tt)+) => (
		$f.whr.push($crate::filter::WherePart::And);
		$crate::filter_inner!($f, $($tt)+);
	);
	($f:ident, OR $($tt:tt)+) => (
		$f.whr.push($crate::filter::WherePart::Or);
		$crate::filter_inner!($f, $($tt)+);
	);
	($f:ident, ORDER $($tt:tt)+) => (
		$crate::filter_order!($f, $($tt)+);
	);
	($f:ident, LIMIT $($tt:tt)+) => (
		$crate::filter_limit!($f, $($tt)+);
	);
	($f:ident, OFFSET $($tt:tt)+) => (
		$crate::filter_offset!($f, $($tt)+);
	);
	($f:ident,) => ();
}

#[doc(hidden)]
#[macro_export]
macro_rules! filter_order {
	($f:ident, $name:literal ASC $($tt:tt)*) => (
		$f.order_by.push_asc($name);
		$crate::filter_order!($f, $($tt)*);
	);
	($f:ident, $name:literal DESC $($tt:tt)*) => (
		$f.order_by.push_desc($name);
		$crate::filter_order!($f, $($tt)*);
	);
	($f:ident, LIMIT $($tt:tt)+) => (
		$crate::filter_limit!($f, $($tt)+);
	);
	($f:ident, OFFSET $($tt:tt)+) => (
		$crate::filter_offset!($f, $($tt)+);
	);
	($f:ident,) => ();
	($f:ident) => ();
}

#[doc(hidden)]
#[macro_export]
macro_rules! filter_limit {
	($f:ident, $value:literal $($tt:tt)*) => (
		$f.limit.set_fixed($value);
		$crate::filter_offset!(after_limit; $f, $($tt)*);
	);
	($f:ident, &$value:ident $($tt:tt)*) => (
		$f.limit_param(stringify!($value), &$value);
		$crate::filter_offset!(after_limit; $f, $($tt)*);
	);
	($f:ident, $value:ident $($tt:tt)*) => (
		$f.limit_param(stringify!($value), $value);
		$crate::filter_offset!(after_limit; $f, $($tt)*);
	);
}

#[doc(hidden)]
#[macro_export]
macro_rules! filter_offset {
	(after_limit; $f:ident, OFFSET $($tt:tt)+) => (
		$crate::filter_offset!($f, $($tt)+);
	);
	(after_limit; $f:ident,) => ();

	($f:ident, $value:literal) => (
		$f.offset.set_fixed($value);
	);
	($f:ident, &$value:ident) => (
		$f.offset_param(stringify!($value), &$value);
	);
	($f:ident, $value:ident) => (
		$f.offset_param(stringify!($value), $value);
	);
}

#[cfg(test)]
mod tests {
	use crate::Value;

	fn values(params: &crate::filter::Params) -> Vec<Value> {
		params.values().cloned().collect()
	}

	#[test]
	fn ident_and_or() {
		let id = 1;
		let id2 = 2;
		let query = filter!(id OR "id" != &id2);
		assert_eq!(query.to_string(), r#" WHERE "id" = $1 OR "id" != $2"#);
	}

	#[test]
	fn null_is_compared_without_param() {
		let logo_url: Option<String> = None;
		let name = "C1";
		let query = whr!(&logo_url AND "name" = name);

		assert_eq!(
			query.to_string(),
			r#" WHERE "logo_url" IS NULL AND "name" = $1"#
		);
		assert_eq!(values(&query.params), [Value::from("C1")]);
	}

	#[test]
	fn contains() {
		let name = "net";
		let query = whr!("name" ~ name);
		assert_eq!(query.to_string(), r#" WHERE "name" ILIKE $1"#);
		assert_eq!(values(&query.params), [Value::from("%net%")]);
	}

	#[test]
	fn limit_param() {
		let id = 3;
		let limit = 10i64;
		let query = filter!(id LIMIT &limit);
		assert_eq!(query.to_string(), r#" WHERE "id" = $1 LIMIT $2"#);
	}

	#[test]
	fn limit_and_offset_params() {
		let id = 3;
		let l = 10i64;
		let o = 20i64;
		let query = filter!(id LIMIT &l OFFSET &o);

		assert_eq!(
			query.to_string(),
			r#" WHERE "id" = $1 LIMIT $2 OFFSET $3"#
		);
		assert_eq!(
			values(&query.params),
			[Value::Int(3), Value::Int(10), Value::Int(20)]
		);
	}

	#[test]
	fn fixed_offset() {
		let query = filter!(ORDER "id" ASC LIMIT 10 OFFSET 20);
		assert_eq!(query.to_string(), r#" ORDER BY "id" ASC LIMIT 10 OFFSET 20"#);

		let query = filter!(OFFSET 5);
		assert_eq!(query.to_string(), " OFFSET 5");
	}

	#[test]
	fn only_offset_param() {
		let o = 40i64;
		let query = filter!(ORDER "name" DESC OFFSET o);
		assert_eq!(query.to_string(), r#" ORDER BY "name" DESC OFFSET $1"#);
	}

	#[test]
	fn order() {
		let handle = "c1";
		let query = filter!("company_handle" = handle ORDER "id" ASC LIMIT 1);
		assert_eq!(
			query.to_string(),
			r#" WHERE "company_handle" = $1 ORDER BY "id" ASC LIMIT 1"#
		);
	}
}
