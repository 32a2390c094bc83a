// Connection handling module
// Serves one accepted TCP connection over HTTP/1.1

use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Spawn a task serving `stream` until the client closes it.
///
/// Keep-alive is on, so one connection may carry several requests.
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: &Arc<AppState>,
) {
    let state = Arc::clone(state);
    // Connection errors are per-request noise unless access logging is on
    let log_errors = state.access_log;

    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let service = service_fn(move |req| {
            handler::handle_request(req, Arc::clone(&state), peer_addr)
        });

        let served = http1::Builder::new()
            .keep_alive(true)
            .serve_connection(io, service)
            .await;

        match served {
            Err(err) if log_errors => logger::log_connection_error(&err),
            _ => {}
        }
    });
}
