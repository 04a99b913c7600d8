use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use yatube_core::YatubeCore;
use yatube_web::{router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yatube_core=info,yatube_web=info,tower_http=debug".into()),
        )
        .init();

    let core = YatubeCore::start().await?;
    let bind_addr = core.config.bind_addr.clone();
    info!(media = %core.config.media_dir.display(), "media directory ready");

    let app = router(AppState::new(core));

    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Yatube running on http://{bind_addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
