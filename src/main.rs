use dotenvy::dotenv;
use kitchen_service::{build_server, connect_order_service, AppConfig, StartupError};

fn start() -> Result<actix_web::dev::Server, StartupError> {
    let config = AppConfig::from_env()?;
    let service = connect_order_service(&config.database_url)?;

    log::info!("Starting server at http://{}:{}", config.host, config.port);
    log::info!(
        "API documentation at http://{}:{}/doc/",
        config.host,
        config.port
    );

    Ok(build_server(service, &config.host, config.port)?)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // No requests are served unless the store is reachable.
    let server = match start() {
        Ok(server) => server,
        Err(e) => {
            log::error!("Failed to start the kitchen service: {}", e);
            std::process::exit(1);
        }
    };

    server.await
}
