use color_eyre::eyre::Result;
use dotenv::dotenv;
use salonbook_api::config::ApiConfig;
use salonbook_db::{create_pool_with, schema::initialize_database};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let config = ApiConfig::from_env()?;

    let db_pool = create_pool_with(&config.database_url, config.database_max_connections).await?;

    // Tables are created idempotently on every start
    initialize_database(&db_pool).await?;

    salonbook_api::start_server(config, db_pool).await?;

    Ok(())
}
