use jobly_postgres::row::{FromRowOwned, NamedColumns};
use jobly_postgres::FromRow;

#[derive(Debug, FromRow)]
#[allow(dead_code)]
pub struct Posting {
	pub id: i32,
	#[row(rename = "company_handle")]
	pub company: String,
	pub salary: Option<i32>,
}

#[derive(Debug, FromRow)]
#[allow(dead_code)]
pub struct Count(i64);

#[derive(Debug, FromRow)]
#[allow(dead_code)]
pub struct Borrowed<'a> {
	pub title: &'a str,
}

fn owned<T: FromRowOwned>() {}

#[test]
fn select_columns() {
	assert_eq!(
		Posting::select_columns(),
		r#""id", "company_handle", "salary""#
	);
	assert_eq!(Borrowed::select_columns(), r#""title""#);
}

#[test]
fn owned_rows() {
	owned::<Posting>();
	owned::<Count>();
	owned::<[String; 1]>();
}
