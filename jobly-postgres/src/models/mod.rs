//! Record accessors
//!
//! Every accessor takes a [`Connection`](crate::Connection) so the caller
//! decides if it runs on a pooled client or inside a transaction.

pub mod company;
pub use company::{Company, CompanyDetail, CompanyFilter, CompanyJob};

pub mod job;
pub use job::{Job, JobFilter, NewJob};
