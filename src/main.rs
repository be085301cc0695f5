use std::sync::Arc;

use certforge::config::Config;
use certforge::export::{A4Writer, Exporter, ResvgRasterizer};
use certforge::mail::{SmtpMailer, TransmissionService};
use certforge::render::Assets;
use certforge::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "certforge=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    let config = Arc::new(config);

    let assets = Assets::load(config.logo_path.as_deref())?;
    let exporter = Exporter::new(
        Arc::new(ResvgRasterizer::new(config.font_dir.as_deref())),
        Arc::new(A4Writer),
        Arc::new(assets),
    );
    let transmission = TransmissionService::new(Arc::new(SmtpMailer::new(&config)?));

    let state = Arc::new(AppState {
        config: config.clone(),
        exporter,
        transmission,
    });

    let app = certforge::app(state);

    let addr = config.bind_addr();
    tracing::info!("Certforge listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
