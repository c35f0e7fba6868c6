use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
};

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderValue, Response, header},
    response::IntoResponse,
    routing::get,
};
use tokio::{net::TcpListener, signal};

use crate::generator::LogSpec;

pub async fn serve(spec: LogSpec, port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)), port);
    let listener = TcpListener::bind(addr).await?;
    println!("Serving access log at http://{addr}/access.csv");
    axum::serve(listener, router(Arc::new(spec)))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

fn router(spec: Arc<LogSpec>) -> Router {
    Router::new()
        .route("/up", get(up))
        .route("/access.csv", get(access_log))
        .with_state(spec)
}

async fn access_log(State(spec): State<Arc<LogSpec>>) -> Response<Body> {
    (
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/csv; charset=utf-8"),
        )],
        spec.render(),
    )
        .into_response()
}

async fn up() -> Response<Body> {
    ().into_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
