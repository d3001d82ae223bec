//! Shared helpers for the PostgreSQL-backed integration suites.
//!
//! Each suite gets its own freshly created database on an embedded cluster,
//! migrated with the same embedded migrations the server applies at startup.

use contacts_backend::domain::ports::UserRepository;
use contacts_backend::domain::{EmailAddress, PasswordHash, User, UserId, UserName};
use contacts_backend::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_pending_migrations,
};
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use tokio::runtime::Runtime;
use uuid::Uuid;

mod pg_embed;

/// Skip when `SKIP_TEST_CLUSTER` is truthy; otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    let skip = std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false);
    if skip {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Render a `postgres` error with its SQLSTATE and detail.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };
    let mut summary = format!("postgres error {:?}: {}", db_error.code(), db_error.message());
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

fn create_database(cluster: &TestCluster, name: &str) -> Result<String, String> {
    let admin_url = cluster.connection().database_url("postgres");
    let mut client =
        Client::connect(&admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!("CREATE DATABASE \"{name}\";"))
        .map_err(|err| format_postgres_error(&err))?;
    Ok(cluster.connection().database_url(name))
}

/// A migrated database on a private embedded cluster.
pub struct PgContext {
    pub runtime: Runtime,
    pub pool: DbPool,
    _cluster: TestCluster,
}

impl PgContext {
    /// Start a cluster, create a uniquely named database and migrate it.
    pub fn start() -> Result<Self, String> {
        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        let cluster = pg_embed::test_cluster()?;
        let name = format!("contacts_test_{}", Uuid::new_v4().simple());
        let url = create_database(&cluster, &name)?;

        runtime
            .block_on(run_pending_migrations(&url))
            .map_err(|err| err.to_string())?;
        let config = PoolConfig::new(&url)
            .with_max_size(2)
            .with_min_idle(Some(1));
        let pool = runtime
            .block_on(DbPool::new(config))
            .map_err(|err| err.to_string())?;

        Ok(Self {
            runtime,
            pool,
            _cluster: cluster,
        })
    }

    /// Persist a user so contacts can reference it.
    pub fn seed_user(&self, email: &str) -> User {
        let user = user_with_email(email);
        let users = DieselUserRepository::new(self.pool.clone());
        self.runtime
            .block_on(users.insert(&user))
            .expect("seed user");
        user
    }
}

/// Build a user with a fixed whole-second timestamp so it survives a
/// microsecond-precision round trip unchanged.
pub fn user_with_email(email: &str) -> User {
    User::new(
        UserId::random(),
        UserName::new("Ann").expect("name"),
        EmailAddress::new(email).expect("email"),
        PasswordHash::new("$2b$04$stored-hash").expect("hash"),
        chrono::DateTime::from_timestamp(1_714_564_800, 0).expect("timestamp"),
    )
}
