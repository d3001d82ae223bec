//! In-process repositories.
//!
//! Used by debug builds started without `DATABASE_URL` and by HTTP tests that
//! exercise whole request flows. State lives behind a `std::sync::Mutex`;
//! every uniqueness check and the write it guards happen under one lock, so
//! these adapters give the same duplicate guarantees as the database
//! constraints.

mod contact_repository;
mod user_repository;

pub use contact_repository::InMemoryContactRepository;
pub use user_repository::InMemoryUserRepository;
