//! CLI argument definitions for the PostgreSQL store.

use clap::Args;

/// PostgreSQL connection options.
///
/// All of these can be supplied through the environment; host, user,
/// password and database are required, so missing configuration fails at
/// argument parsing before any connection is attempted.
#[derive(Args, Clone, Debug)]
pub struct PostgresOpts {
    /// PostgreSQL host
    #[arg(long = "pg-host", env = "POSTGRES_HOST")]
    pub host: String,

    /// PostgreSQL user
    #[arg(long = "pg-user", env = "POSTGRES_USER")]
    pub user: String,

    /// PostgreSQL password
    #[arg(long = "pg-password", env = "POSTGRES_PASSWORD")]
    pub password: String,

    /// PostgreSQL database name
    #[arg(long = "pg-database", env = "POSTGRES_DB")]
    pub database: String,

    /// PostgreSQL port
    #[arg(long = "pg-port", env = "POSTGRES_PORT", default_value = "5432")]
    pub port: u16,
}

impl PostgresOpts {
    /// Render the tokio-postgres connection string.
    pub fn connection_string(&self) -> String {
        format!(
            "host={} user={} password={} dbname={} port={} sslmode=disable",
            self.host, self.user, self.password, self.database, self.port
        )
    }
}
