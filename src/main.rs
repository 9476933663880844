//! HTTP server for the limit order book.
//!
//! One book per process, tagged from `BOOK_TAG`; listens on `PORT`. Stops on Ctrl-C.

use limit_order_book::{api, ServerConfig};
use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    let _ = env_logger::try_init();
    let config = ServerConfig::from_env();
    let app = api::create_router(&config.book_tag);

    let addr = config.addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("bind failed addr={} error={}", addr, e);
            std::process::exit(1);
        }
    };
    info!("listening on http://{} book={}", addr, config.book_tag);

    let served = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await;
    if let Err(e) = served {
        error!("server failed error={}", e);
        std::process::exit(1);
    }
    info!("server stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal error={}", e);
        // Without a signal handler, run until killed.
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
