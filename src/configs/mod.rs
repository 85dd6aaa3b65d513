use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{api::error, constants::Env};

pub async fn connect_database(env: &Env) -> Result<PgPool, error::SystemError> {
    let database_url = env
        .database_url
        .as_deref()
        .ok_or_else(|| error::SystemError::config("DATABASE_URL must be set"))?;

    let pool = PgPoolOptions::new()
        .max_connections(env.database_max_connections)
        .min_connections(env.database_min_connections)
        .acquire_slow_threshold(std::time::Duration::from_secs(3))
        .connect(database_url)
        .await?;
    log::info!("Connected to database");
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), error::SystemError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
