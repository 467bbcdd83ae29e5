//! PLANIT HTTP server.

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use planit::adapters::ai::provider_from_config;
use planit::adapters::document::{LessonPlanExportService, LocalExportStorage, PdfFontPaths};
use planit::adapters::http::{api_router, LessonPlanHandlers};
use planit::adapters::interpreter::DeclaredFormatInterpreters;
use planit::application::{ExportLessonPlanHandler, GenerateLessonPlanHandler};
use planit::config::{AppConfig, ServerConfig};
use planit::ports::DocumentExportService;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.server);

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server stopped with an error");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let provider = provider_from_config(&config.ai)?;
    let info = provider.provider_info();

    let mut export_service = LessonPlanExportService::new();
    if let Some(regular) = &config.export.pdf_font_path {
        export_service = export_service.with_pdf_fonts(PdfFontPaths {
            regular: regular.clone(),
            bold: config.export.pdf_bold_font_path.clone(),
        });
    }
    let exporter: Arc<dyn DocumentExportService> = Arc::new(export_service);

    let mut export_handler =
        ExportLessonPlanHandler::new(exporter.clone()).with_naming(config.export.naming);
    if config.export.save_to_disk {
        export_handler = export_handler.with_storage(Arc::new(LocalExportStorage::new(
            config.export.output_dir.clone(),
        )));
    }

    let handlers = LessonPlanHandlers::new(
        Arc::new(GenerateLessonPlanHandler::new(
            provider,
            Arc::new(DeclaredFormatInterpreters),
        )),
        Arc::new(export_handler),
        exporter,
    );

    let app = api_router(
        &config.app_name,
        handlers,
        &config.server.cors_origins_list(),
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        app = %config.app_name,
        %addr,
        provider = %info.name,
        model = %info.model,
        "Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
