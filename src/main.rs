use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use scansheet::document::PdfiumRasterizer;
use scansheet::ocr::TesseractRecognizer;
use scansheet::server;
use scansheet::server::AppState;
use scansheet::utils::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "scansheet")]
#[command(about = "An OCR upload service that turns scanned documents into spreadsheets")]
struct Args {
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    #[arg(long, short = 'l')]
    language: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scansheet=info,tower_http=debug".into()),
        )
        .init();

    let config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::load_default().unwrap_or_default(),
    };

    run_server(config, args.language).await?;

    Ok(())
}

async fn run_server(
    config: AppConfig,
    language: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = std::env::var("SCANSHEET_ADDR").unwrap_or_else(|_| config.host_url.to_string());
    let socket_addr: std::net::SocketAddr = addr.parse()?;

    let language = language.unwrap_or_else(|| config.ocr_language.to_string());

    if !TesseractRecognizer::is_available() {
        tracing::warn!("tesseract binary not found on PATH; recognition will fail at request time");
    }

    let recognizer = Arc::new(TesseractRecognizer::new(&language));
    let rasterizer = Arc::new(PdfiumRasterizer::new());
    let state = AppState::new(&config, recognizer, rasterizer);

    server::start_server(socket_addr, state).await?;

    Ok(())
}
