use actix_web::web;
use dotenvy::dotenv;
use farm_market::{build_server, create_pool, run_migrations, AppState, Config};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env()?;

    let pool = create_pool(&config.database_url, config.db_pool_size)?;
    run_migrations(&pool)?;

    let state = web::Data::new(AppState::from_pool(pool));

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(state, &config.host, config.port)?.await?;
    Ok(())
}
