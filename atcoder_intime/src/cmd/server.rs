use crate::{
    cmd::create_annotator,
    modules::{
        annotator::Annotator,
        handlers::{classify_with_qs, liveness},
    },
};
use anyhow::{Context, Result};
use atcoder_intime_libs::ProblemsApi;
use axum::{extract::Extension, http::Method, routing, Router, Server};
use clap::Args;
use std::{future::Future, net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};

#[derive(Debug, Args)]
pub struct ServerArgs {
    #[arg(long)]
    port: Option<u16>,
}

pub async fn run(args: ServerArgs) -> Result<()> {
    let annotator = create_annotator()?;
    let app = create_router(annotator);
    let port = match args.port {
        Some(port) => port,
        None => {
            tracing::warn!("API server will be launched at default port number 8000");
            8000u16
        }
    };
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Server start at port {}", port);
    Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .with_context(|| {
            let message = format!("failed to serve at port {}", port);
            tracing::error!(message);
            message
        })?;

    Ok(())
}

/// GET is allowed from any origin. The annotated pages live on kenkoooo.com.
pub fn create_router<A>(annotator: Annotator<A>) -> Router
where
    A: ProblemsApi + Send + Sync + 'static,
{
    Router::new()
        .route("/api/classify", routing::get(classify_with_qs::<A>))
        .route("/api/liveness", routing::get(liveness))
        .layer(Extension(Arc::new(annotator)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET]),
        )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler.");
    };

    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    let signal = first_signal(ctrl_c, terminate).await;
    tracing::info!("{} signal received, starting graceful shutdown.", signal);
}

/// Returns the name of whichever signal fires first.
async fn first_signal<I, T>(interrupt: I, terminate: T) -> &'static str
where
    I: Future<Output = ()>,
    T: Future<Output = ()>,
{
    tokio::select! {
        _ = interrupt => "SIGINT",
        _ = terminate => "SIGTERM",
    }
}
