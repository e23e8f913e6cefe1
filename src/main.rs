//! Libris Server - Library Management REST Backend

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use libris_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("libris_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Libris Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.email.clone());

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(server_host.parse().expect("Invalid host address"), server_port);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Books
        .route("/books/addBook", post(api::books::add_book))
        .route("/books/updateBook", put(api::books::update_book))
        .route("/books/deleteBook/:id", delete(api::books::delete_book))
        .route("/books/searchByTitle", get(api::books::search_by_title))
        .route("/books/searchByIsbn", get(api::books::search_by_isbn))
        .route("/books/searchByCategory", get(api::books::search_by_category))
        .route("/books/categories", get(api::books::list_categories))
        // Customers
        .route("/customers/addCustomer", post(api::customers::add_customer))
        .route("/customers/updateCustomer", put(api::customers::update_customer))
        .route(
            "/customers/deleteCustomer/:id",
            delete(api::customers::delete_customer),
        )
        .route(
            "/customers/paginatedSearch",
            get(api::customers::paginated_search),
        )
        .route("/customers/searchByEmail", get(api::customers::search_by_email))
        .route(
            "/customers/searchByLastName",
            get(api::customers::search_by_last_name),
        )
        .route(
            "/customers/sendEmailToCustomer",
            put(api::customers::send_email_to_customer),
        )
        // Loans
        .route("/loans/maxEndDate", get(api::loans::search_loans_before_date))
        .route(
            "/loans/customerLoans",
            get(api::loans::search_open_loans_of_customer),
        )
        .route("/loans/addLoan", post(api::loans::add_loan))
        .route("/loans/closeLoan", post(api::loans::close_loan))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
