use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use log::info;

use baby_tracker_backend::storage::traits::StaticIdentity;
use baby_tracker_backend::storage::yaml::YamlConnection;
use baby_tracker_backend::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    // The standalone server runs single-user; the identity would come
    // from the authentication session in an embedded deployment.
    let user_id =
        std::env::var("BABY_TRACKER_USER").unwrap_or_else(|_| "local-parent".to_string());
    let identity = Arc::new(StaticIdentity::signed_in(user_id));

    info!("Setting up document store");
    let connection = match std::env::var("BABY_TRACKER_DATA") {
        Ok(dir) => YamlConnection::new(PathBuf::from(dir))?,
        Err(_) => YamlConnection::new_default()?,
    };

    let app_state = initialize_backend(Arc::new(connection), identity).await?;
    let app = create_router(app_state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
