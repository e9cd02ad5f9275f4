use clap::Args;

use crate::db::{Database, DbError};

/// Where the database lives.
#[derive(Debug, Clone, Default, Args)]
pub struct DatabaseArgs {
    /// Database URL (`sqlite://path/to/votes.db`, `sqlite::memory:`).
    /// Defaults to a file in the platform data directory.
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub database_url: Option<String>,
}

impl DatabaseArgs {
    /// Open the configured database and make sure the schema exists.
    pub fn open(&self) -> Result<Database, DbError> {
        let db = match &self.database_url {
            Some(url) => Database::open(url)?,
            None => Database::open_default()?,
        };
        db.migrate()?;
        Ok(db)
    }
}

/// Settings for the HTTP server.
#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0", global = true)]
    pub host: String,

    /// Port for HTTP API
    #[arg(short, long, env = "PORT", default_value_t = 8000, global = true)]
    pub port: u16,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
