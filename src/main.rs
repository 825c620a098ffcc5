use csvforge::interfaces::http::start_server;
use csvforge::AppConfig;
use tracing::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenvy::dotenv();
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    info!(host = %config.host, port = config.port, "starting csvforge");
    start_server(config)?.await
}
