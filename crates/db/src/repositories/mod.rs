//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Methods take any Postgres executor, so handlers can pass `&PgPool` for a
//! single statement or `&mut *tx` to run inside a transaction.

pub mod company_repo;
pub mod configuration_repo;
pub mod contact_repo;
pub mod user_repo;

pub use company_repo::CompanyRepo;
pub use configuration_repo::ConfigurationRepo;
pub use contact_repo::ContactRepo;
pub use user_repo::UserRepo;
