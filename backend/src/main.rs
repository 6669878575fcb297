use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;
use widgets::config::AppConfig;
use widgets::services;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;
    let context = config.widget_context().map_err(std::io::Error::other)?;

    info!("Widget server running at {}", config.url());
    info!("Upload directory name: '{}'", config.upload_dir_name);

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(1024 * 1024)) // 1 MB
            .app_data(web::Data::new(context.clone()))
            .service(services::widgets::configure_routes())
    })
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
