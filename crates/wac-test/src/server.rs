//! A local HTTP server that serves fixture documents.
//!
//! Used to exercise `HttpGraphProvider` over a real socket. Documents are
//! served as `text/turtle`; paths can also be configured to answer with a
//! bare status code. Unknown paths answer `404`.

use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::{Request, Response, StatusCode};
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use parking_lot::{Mutex, RwLock};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use crate::error::TestResult;

#[derive(Debug, Clone)]
enum Route {
    Turtle(String),
    Status(StatusCode),
}

#[derive(Debug, Default)]
struct ServerState {
    routes: RwLock<HashMap<String, Route>>,
    requests: Mutex<HashMap<String, usize>>,
}

/// A document server bound to an ephemeral port on `127.0.0.1`.
///
/// The server stops when dropped.
#[derive(Debug)]
pub struct DocumentServer {
    addr: SocketAddr,
    state: Arc<ServerState>,
    task: JoinHandle<()>,
}

impl DocumentServer {
    /// Binds and starts serving. Must be called inside a tokio runtime.
    pub async fn start() -> TestResult<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(ServerState::default());

        let task = tokio::spawn(accept_loop(listener, Arc::clone(&state)));
        tracing::debug!(%addr, "document server listening");

        Ok(Self { addr, state, task })
    }

    /// The bound address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Absolute URL of `path`, which should start with `/`.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Serves `body` as `text/turtle` at `path`.
    pub fn put_turtle(&self, path: &str, body: impl Into<String>) {
        self.state
            .routes
            .write()
            .insert(path.to_string(), Route::Turtle(body.into()));
    }

    /// Answers requests for `path` with `status` and an empty body.
    pub fn put_status(&self, path: &str, status: u16) {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.state
            .routes
            .write()
            .insert(path.to_string(), Route::Status(status));
    }

    /// Stops serving `path`.
    pub fn remove(&self, path: &str) {
        self.state.routes.write().remove(path);
    }

    /// Number of requests received for `path`.
    pub fn request_count(&self, path: &str) -> usize {
        self.state.requests.lock().get(path).copied().unwrap_or(0)
    }
}

impl Drop for DocumentServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn accept_loop(listener: TcpListener, state: Arc<ServerState>) {
    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                tokio::spawn(serve_connection(stream, Arc::clone(&state)));
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to accept connection");
            }
        }
    }
}

async fn serve_connection(stream: TcpStream, state: Arc<ServerState>) {
    let io = TokioIo::new(stream);
    let service = service_fn(move |req: Request<Incoming>| {
        let state = Arc::clone(&state);
        async move { Ok::<_, Infallible>(respond(&state, &req)) }
    });

    if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
        tracing::debug!(error = %e, "connection closed with error");
    }
}

fn respond(state: &ServerState, req: &Request<Incoming>) -> Response<Full<Bytes>> {
    let path = req.uri().path().to_string();
    *state.requests.lock().entry(path.clone()).or_insert(0) += 1;

    let route = state.routes.read().get(&path).cloned();
    match route {
        Some(Route::Turtle(body)) => {
            let mut response = Response::new(Full::new(Bytes::from(body)));
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("text/turtle"));
            response
        }
        Some(Route::Status(status)) => with_status(status),
        None => with_status(StatusCode::NOT_FOUND),
    }
}

fn with_status(status: StatusCode) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = status;
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_documents_and_counts_requests() {
        let server = DocumentServer::start().await.unwrap();
        server.put_turtle("/doc", "<#a> <#b> <#c> .");
        server.put_status("/secret", 403);

        let client = reqwest::Client::new();
        let doc = client.get(server.url("/doc")).send().await.unwrap();
        assert_eq!(doc.status(), 200);
        assert_eq!(
            doc.headers().get("content-type").unwrap(),
            "text/turtle"
        );
        assert_eq!(doc.text().await.unwrap(), "<#a> <#b> <#c> .");

        let secret = client.get(server.url("/secret")).send().await.unwrap();
        assert_eq!(secret.status(), 403);

        let missing = client.get(server.url("/missing")).send().await.unwrap();
        assert_eq!(missing.status(), 404);

        assert_eq!(server.request_count("/doc"), 1);
        assert_eq!(server.request_count("/missing"), 1);
    }
}
