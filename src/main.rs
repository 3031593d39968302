use std::sync::Arc;

use portfolio_api::config::AppConfig;
use portfolio_api::gateway::AccessGateway;
use portfolio_api::store::SupabaseClient;
use portfolio_api::upload::{CloudinaryHost, ImageHost, LocalDiskHost};
use portfolio_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up SUPABASE_URL, keys, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;

    // One client per credential level; the service-role client bypasses
    // store-side row policies so controllers can enforce ownership.
    let privileged = Arc::new(SupabaseClient::new(
        config.supabase.url.clone(),
        config.supabase.privileged_key(),
    ));
    let public = Arc::new(SupabaseClient::new(
        config.supabase.url.clone(),
        config.supabase.public_key(),
    ));
    let gateway = AccessGateway::new(public.clone(), privileged, public);

    let (images, uploads_dir): (Arc<dyn ImageHost>, _) = match &config.cloudinary {
        Some(cloudinary) => {
            tracing::info!("image uploads: cloudinary ({})", cloudinary.cloud_name);
            (Arc::new(CloudinaryHost::new(cloudinary.clone())), None)
        }
        None => {
            let dir = config.uploads.dir.clone();
            std::fs::create_dir_all(dir.join("images"))?;
            std::fs::create_dir_all(dir.join("products"))?;
            tracing::info!("image uploads: local disk at {}", dir.display());
            (
                Arc::new(LocalDiskHost::new(
                    dir.clone(),
                    config.uploads.public_base_url.clone(),
                )),
                Some(dir),
            )
        }
    };

    let state = AppState {
        gateway,
        images,
        uploads_dir,
    };

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    println!("🚀 Portfolio API listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
