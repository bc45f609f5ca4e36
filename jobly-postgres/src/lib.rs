#![allow(clippy::tabs_in_doc_comments)]
#![allow(clippy::new_without_default)]

//! Companies and jobs stored in postgres.
//!
//! The interesting parts are the two builders which turn loosely structured
//! input into parameterized sql:
//! - [`update::SetFragment`] builds the `SET` list of a partial update
//! - [`filter::Criteria`] lowers optional search criteria to a `WHERE` clause

pub mod database;
pub use database::Database;

pub mod connection;
pub use connection::Connection;

mod error;
pub use error::Error;

pub mod value;
pub use value::Value;

pub mod row;
pub use row::Row;

pub mod filter;

pub mod update;

pub mod models;

pub use jobly_postgres_derive::FromRow;

pub type Result<T> = std::result::Result<T, Error>;

