use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use crate::config::Config;

/// Opens the MySQL connection pool shared by every repository
pub async fn connect(config: &Config) -> Result<MySqlPool, sqlx::Error> {
    tracing::info!("Connecting to database...");
    let pool = MySqlPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;
    tracing::info!("Database connected successfully");
    Ok(pool)
}
