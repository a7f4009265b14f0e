mod config;
mod db;
mod dtos;
mod error;
mod handler;
mod middleware;
mod models;
mod routes;
mod service;
mod utils;

use std::sync::Arc;

use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Method,
};
use config::Config;
use dotenv::dotenv;
use routes::create_router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::filter::LevelFilter;

use crate::db::{db::DBClient, userdb::UserExt};
use crate::models::usermodel::UserRole;
use crate::utils::password;

use service::{
    job_service::JobService, notification_service::NotificationService,
    rating_service::RatingService,
};

#[derive(Debug, Clone)]
pub struct AppState {
    pub env: Config,
    pub db_client: Arc<DBClient>,
    pub job_service: Arc<JobService>,
    pub notification_service: Arc<NotificationService>,
    pub rating_service: Arc<RatingService>,
}

impl AppState {
    pub fn new(db_client: DBClient, config: Config) -> Self {
        let db_client_arc = Arc::new(db_client);

        let notification_service = Arc::new(NotificationService::new(db_client_arc.clone()));

        let job_service = Arc::new(JobService::new(
            db_client_arc.clone(),
            notification_service.clone(),
        ));

        let rating_service = Arc::new(RatingService::new(
            db_client_arc.clone(),
            notification_service.clone(),
        ));

        Self {
            env: config,
            db_client: db_client_arc,
            job_service,
            notification_service,
            rating_service,
        }
    }
}

/// Seed the bootstrap admin account if none exists yet. Admins are never
/// self-registered and are implicitly approved.
async fn seed_admin(db_client: &DBClient, config: &Config) {
    match db_client.get_admin_user().await {
        Ok(Some(_)) => {}
        Ok(None) => {
            let hashed = match password::hash(config.admin_password.clone()) {
                Ok(hashed) => hashed,
                Err(e) => {
                    tracing::error!("failed to hash admin password: {}", e);
                    return;
                }
            };

            match db_client
                .save_user(
                    UserRole::Admin,
                    "Admin".to_string(),
                    config.admin_email.clone(),
                    hashed,
                    None,
                    None,
                    None,
                )
                .await
            {
                Ok(admin) => {
                    let _ = db_client.set_user_approval(admin.id, true).await;
                    tracing::info!("seeded admin account {}", admin.email);
                }
                Err(e) => tracing::error!("failed to seed admin account: {}", e),
            }
        }
        Err(e) => tracing::error!("failed to look up admin account: {}", e),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .init();

    dotenv().ok();

    let config = Config::init();

    let pool = match PgPoolOptions::new()
        .max_connections(20)
        .min_connections(5)
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => {
            println!("✅ Connection to the database is successful!");
            pool
        }
        Err(err) => {
            println!("🔥 Failed to connect to the database: {:?}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = sqlx::migrate!().run(&pool).await {
        println!("🔥 Failed to run database migrations: {:?}", err);
        std::process::exit(1);
    }

    let db_client = DBClient::new(pool);

    seed_admin(&db_client, &config).await;

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE])
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ]);

    let app_state = Arc::new(AppState::new(db_client, config.clone()));

    let app = create_router(app_state.clone()).layer(cors);

    println!(
        "🚀 Server is running on http://localhost:{}",
        config.port
    );

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", &config.port))
        .await
        .unwrap();

    axum::serve(listener, app).await.unwrap();
}
