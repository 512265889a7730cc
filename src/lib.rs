pub mod api; // Dashboard JSON API + static asset serving
pub mod backend; // Prediction backend client + token claims
pub mod config;
pub mod models;
pub mod prescription; // Prescription PDF generation
pub mod registry; // Drug risk registry (flag/suppress bookkeeping)

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

/// Start Riskdesk: load reference data, wire up the registry and the
/// backend client, serve the dashboards.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("Riskdesk starting v{}", config::APP_VERSION);

    let data_path = config::drug_data_path();
    let reference = registry::DrugReference::load(&data_path)?;
    tracing::info!(
        records = reference.len(),
        path = %data_path.display(),
        "Drug reference data loaded"
    );

    let registry = Arc::new(registry::RiskRegistry::new(reference));
    let backend = Arc::new(backend::BackendClient::from_config());
    tracing::info!(backend = %backend.base_url(), "Using prediction backend");

    let ctx = api::ApiContext::new(registry, backend);
    api::server::serve_forever(ctx, config::bind_addr()).await?;

    Ok(())
}
