// Database Connection Management
//
// PostgreSQL connection pooling using tokio-postgres and deadpool.
use anyhow::{Context, Result};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use std::time::Duration;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
    pub max_size: usize,
    pub timeouts: deadpool_postgres::Timeouts,
}

fn default_timeouts() -> deadpool_postgres::Timeouts {
    deadpool_postgres::Timeouts {
        wait: Some(Duration::from_secs(30)),
        create: Some(Duration::from_secs(30)),
        recycle: Some(Duration::from_secs(30)),
    }
}

impl DatabaseConfig {
    /// Create configuration from a database URL
    pub fn from_url(url: &str) -> Result<Self> {
        let parsed = url::Url::parse(url).context("Failed to parse database URL")?;

        if parsed.scheme() != "postgresql" && parsed.scheme() != "postgres" {
            anyhow::bail!("Invalid database URL scheme, expected postgresql or postgres");
        }

        Ok(Self {
            host: parsed.host_str().unwrap_or("localhost").to_string(),
            port: parsed.port().unwrap_or(5432),
            user: parsed.username().to_string(),
            password: parsed.password().unwrap_or("").to_string(),
            dbname: parsed.path().trim_start_matches('/').to_string(),
            max_size: 16,
            timeouts: default_timeouts(),
        })
    }

    /// Create configuration from the DATABASE_URL environment variable
    pub fn from_env() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("DATABASE_URL must be set in the environment")?;
        Self::from_url(&database_url)
    }
}

/// Database connection wrapper
#[derive(Debug, Clone)]
pub struct DatabaseConnection {
    pool: Pool,
}

impl DatabaseConnection {
    /// Create a new database connection pool with the provided configuration
    pub async fn new(config: DatabaseConfig) -> Result<Self> {
        let masked_host = format!("{}:{}/{}", config.host, config.port, config.dbname);
        tracing::info!("Connecting to database: {}", masked_host);

        let mut pg_config = tokio_postgres::Config::new();
        pg_config.host(&config.host);
        pg_config.port(config.port);
        pg_config.user(&config.user);
        pg_config.password(&config.password);
        pg_config.dbname(&config.dbname);

        let tls_connector = TlsConnector::builder()
            .build()
            .context("Failed to build TLS connector")?;
        let tls = MakeTlsConnector::new(tls_connector);

        let mgr_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };
        let mgr = Manager::from_config(pg_config, tls, mgr_config);

        let pool = Pool::builder(mgr)
            .max_size(config.max_size)
            .wait_timeout(config.timeouts.wait)
            .create_timeout(config.timeouts.create)
            .recycle_timeout(config.timeouts.recycle)
            .runtime(deadpool_postgres::Runtime::Tokio1)
            .build()
            .context("Failed to create database pool")?;

        // Test the connection
        let client = pool
            .get()
            .await
            .context("Failed to get connection from pool")?;
        client
            .query("SELECT 1", &[])
            .await
            .context("Failed to test database connection")?;

        tracing::info!("Database connection established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// Run embedded database migrations
    pub async fn migrate(&self) -> Result<()> {
        crate::database::migrations::run_migrations(&self.pool).await
    }
}
