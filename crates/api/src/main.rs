//! API server entry point.

use domain::TableOrderRepository;
use kv_store::{InMemoryTable, PostgresTable, TableName};
use order_api::config::Config;
use order_api::cors::CorsPolicy;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Resolve CORS policy and table from configuration
    let cors = CorsPolicy::new(&config.allowed_origin).expect("invalid ORDER_API_ORIGIN");
    let table_name = TableName::new(config.table_name.as_str()).expect("invalid ORDER_TABLE_NAME");

    // 4. Build the application over the configured backend
    let app = match config.database_url.as_deref() {
        Some(url) => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(10)
                .connect(url)
                .await
                .expect("failed to connect to database");
            let table = PostgresTable::new(pool, table_name).expect("invalid ORDER_TABLE_NAME");
            table
                .ensure_exists()
                .await
                .expect("failed to create order table");

            tracing::info!(table = %config.table_name, backend = "postgres", "order table configured");
            let state = order_api::create_state(TableOrderRepository::new(table));
            order_api::create_app(state, &cors, metrics_handle)
        }
        None => {
            tracing::warn!(
                table = %config.table_name,
                backend = "memory",
                "DATABASE_URL not set, orders will not survive a restart"
            );
            let state = order_api::create_state(TableOrderRepository::new(InMemoryTable::new(
                table_name,
            )));
            order_api::create_app(state, &cors, metrics_handle)
        }
    };

    // 5. Start server
    let addr = config.addr();
    tracing::info!(%addr, "starting API server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
