//! Development server

use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::commands::generate;
use crate::Crewpost;

/// Serve the public directory, regenerating on source changes when `watch` is set
pub async fn start(crewpost: &Crewpost, ip: &str, port: u16, watch: bool) -> Result<()> {
    let app = router(crewpost);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);

    if watch {
        println!("Watching for changes...");
        let crewpost = crewpost.clone();
        // The debounced watcher blocks on a std channel
        tokio::task::spawn_blocking(move || {
            let result = generate::watch(&crewpost, || {
                tracing::info!("Regenerated successfully");
            });
            if let Err(e) = result {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Static file router over the public directory
pub fn router(crewpost: &Crewpost) -> Router {
    let serve_dir = ServeDir::new(&crewpost.public_dir).append_index_html_on_directories(true);

    Router::new()
        .fallback_service(serve_dir)
        .layer(TraceLayer::new_for_http())
}
