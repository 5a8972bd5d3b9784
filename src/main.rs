use actix_web::{App, HttpServer, middleware::Logger, web};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use seikyu::{
  adapters::http::configure_invoice_routes,
  application::invoice::{CreateInvoiceUseCase, ListInvoicesUseCase},
  domain::invoice::InvoiceService,
  infrastructure::{
    config::Config,
    persistence::postgres::{
      PostgresClientRepository, PostgresInvoiceRepository, PostgresOrganizationRepository,
      PostgresTaxRateRepository,
    },
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "seikyu=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting seikyu invoice service");

  // Load configuration; an unparsable or out-of-range fee rate fails here
  // rather than surfacing per request.
  let config = Config::load().map_err(|e| {
    tracing::error!("Failed to load configuration: {}", e);
    std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
  })?;
  tracing::info!(
    "Configuration loaded, fee rate {}",
    config.billing.fee_rate
  );

  // Set up database connection pool with timeout
  tracing::info!("Connecting to database: {}", config.database.url);

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    std::io::Error::other(format!("Database error: {}", e))
  })?;

  tracing::info!("Database connection pool created");

  // Run database migrations
  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to run database migrations: {}", e);
      std::io::Error::other(format!("Migration error: {}", e))
    })?;
  tracing::info!("Database migrations completed");

  // Wire repositories, domain service and use cases
  let invoice_repo = Arc::new(PostgresInvoiceRepository::new(db_pool.clone()));
  let client_repo = Arc::new(PostgresClientRepository::new(db_pool.clone()));
  let organization_repo = Arc::new(PostgresOrganizationRepository::new(db_pool.clone()));
  let tax_rate_repo = Arc::new(PostgresTaxRateRepository::new(db_pool));

  let invoice_service = Arc::new(InvoiceService::new(
    invoice_repo,
    client_repo,
    organization_repo,
    tax_rate_repo,
    config.billing.fee_rate,
  ));

  let create_invoice_use_case = Arc::new(CreateInvoiceUseCase::new(invoice_service.clone()));
  let list_invoices_use_case = Arc::new(ListInvoicesUseCase::new(invoice_service));

  let bind_address = (config.server.host.clone(), config.server.port);
  tracing::info!(
    "Starting HTTP server on {}:{}",
    config.server.host,
    config.server.port
  );

  HttpServer::new(move || {
    App::new().wrap(Logger::default()).service(
      web::scope("/api/v1/invoices").configure(|cfg| {
        configure_invoice_routes(
          cfg,
          create_invoice_use_case.clone(),
          list_invoices_use_case.clone(),
        )
      }),
    )
  })
  .bind(bind_address)?
  .run()
  .await
}
