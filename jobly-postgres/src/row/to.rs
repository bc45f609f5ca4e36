use postgres_types::ToSql;

pub trait ToRow {
	/// should write something like "id", "name", "email"
	fn insert_columns(&self, s: &mut String);
	/// should write something like $1, $2, $3
	fn insert_values(&self, s: &mut String);

	fn params_len(&self) -> usize;
	fn params(&self) -> impl ExactSizeIterator<Item = &(dyn ToSql + Sync)>;
}
