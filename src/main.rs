// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, database, session stores and start HTTP server

mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod services;

use actix_web::{middleware::Logger, web, App, HttpServer};
use config::Config;
use dotenv::dotenv;
use handlers::accounts::AuthStore;
use handlers::checkout::CheckoutStore;
use services::session_store::start_cleanup_task;
use services::{EmailClient, SessionStore};
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();
    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    }

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info,actix_web=info,sqlx=warn"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    log::info!("Starting tembo-travel service...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Initialize database connection pool
    let pool = match config::init_db_pool(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    // 5. Session stores for checkout carts and auth tokens
    let checkout_store: CheckoutStore = Arc::new(SessionStore::new(config.session_ttl_seconds));
    let auth_store: AuthStore = Arc::new(SessionStore::new(config.session_ttl_seconds));
    log::info!(
        "Initialized session stores (TTL: {}s)",
        config.session_ttl_seconds
    );

    // Background sweeps every 5 minutes
    start_cleanup_task(checkout_store.clone(), 300);
    start_cleanup_task(auth_store.clone(), 300);
    log::info!("Started session cleanup tasks (interval: 5 minutes)");

    // 6. Outbound email client
    let email_client = Arc::new(EmailClient::new(
        config.email_api_url.clone(),
        config.email_api_token.clone(),
        config.email_from.clone(),
        config.admin_email.clone(),
        config.site_url.clone(),
        config.whatsapp_number.clone(),
    ));
    if config.email_api_token.is_empty() {
        log::warn!("EMAIL_API_TOKEN not set; outbound email disabled");
    }

    // 7. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let config_clone = config.clone();

    HttpServer::new(move || {
        App::new()
            // Application state
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config_clone.clone()))
            .app_data(web::Data::new(checkout_store.clone()))
            .app_data(web::Data::new(auth_store.clone()))
            .app_data(web::Data::new(email_client.clone()))
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::destinations_config)
            .configure(handlers::accommodations_config)
            .configure(handlers::travel_modes_config)
            .configure(handlers::packages_config)
            .configure(handlers::quotes_config)
            .configure(handlers::checkout_config)
            .configure(handlers::accounts_config)
            .configure(handlers::blog_config)
            .configure(handlers::newsletter_config)
            .configure(handlers::admin_config)
    })
    .bind(&server_addr)?
    .run()
    .await
}
