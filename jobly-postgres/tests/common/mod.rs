#![allow(dead_code)]

use jobly_postgres::{Connection, Database};

/// Temporary tables shadow any existing ones and disappear with the
/// transaction.
const FIXTURE: &str = r#"
CREATE TEMPORARY TABLE companies (
	handle VARCHAR(25) PRIMARY KEY CHECK (handle = lower(handle)),
	name TEXT UNIQUE NOT NULL,
	num_employees INTEGER CHECK (num_employees >= 0),
	description TEXT NOT NULL,
	logo_url TEXT
) ON COMMIT DROP;

CREATE TEMPORARY TABLE jobs (
	id SERIAL PRIMARY KEY,
	title TEXT NOT NULL,
	salary INTEGER CHECK (salary >= 0),
	equity NUMERIC CHECK (equity <= 1.0),
	company_handle VARCHAR(25) NOT NULL
		REFERENCES companies ON DELETE CASCADE
) ON COMMIT DROP;

INSERT INTO companies (handle, name, num_employees, description, logo_url)
VALUES ('c1', 'C1', 1, 'Desc1', 'http://c1.img'),
	('c2', 'C2', 2, 'Desc2', 'http://c2.img'),
	('c3', 'C3', 3, 'Desc3', NULL);

INSERT INTO jobs (title, salary, equity, company_handle)
VALUES ('Job 1', 100, 0.1, 'c1'),
	('Job 2', 200, 0.2, 'c1'),
	('Job 3', 300, 0, 'c2');
"#;

/// Returns `None` if no `DATABASE_URL` is configured.
pub async fn database() -> Option<Database> {
	let _ = dotenvy::dotenv();

	let Ok(url) = std::env::var("DATABASE_URL") else {
		eprintln!("DATABASE_URL not set, skipping");
		return None;
	};

	Some(Database::with_url(url).await.unwrap())
}

pub async fn fixture(conn: Connection<'_>) {
	conn.batch_execute(FIXTURE).await.unwrap();
}
