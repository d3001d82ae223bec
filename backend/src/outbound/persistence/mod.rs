//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types; row structs (`models.rs`) and table definitions (`schema.rs`) never
//! leave this module. Connections come from a shared `bb8` pool over
//! `diesel-async`, and every database failure is mapped onto the port's
//! error enum.
//!
//! # Example
//!
//! ```no_run
//! use contacts_backend::outbound::persistence::{
//!     DbPool, DieselContactRepository, DieselUserRepository, PoolConfig, run_pending_migrations,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "postgres://localhost/contacts";
//! run_pending_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let users = DieselUserRepository::new(pool.clone());
//! let contacts = DieselContactRepository::new(pool);
//! # let _ = (users, contacts);
//! # Ok(())
//! # }
//! ```

mod diesel_contact_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_contact_repository::DieselContactRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
