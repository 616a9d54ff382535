//! Local reverse proxy that fronts an access-protected instance.
//!
//! When service-token credentials are configured the webview does not talk
//! to the instance directly. It loads `http://127.0.0.1:<port>/` instead,
//! and every request is forwarded upstream with the token headers attached
//! and permissive CORS stamped onto the response. Failures are reported
//! over a channel so the shell can schedule a reload.

pub mod headers;

use std::net::SocketAddr;

use anyhow::Context;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Router;
use boxdock_core::AccessCredentials;
use tokio::sync::mpsc::UnboundedSender;
use url::Url;

/// Upstream outcomes the shell reacts to.
#[derive(Debug, Clone)]
pub enum ProxyEvent {
    /// The edge answered 403: credentials are stale or not yet propagated.
    AccessDenied { url: String },
    /// The upstream could not be reached at all.
    UpstreamUnreachable { error: String },
}

#[derive(Clone)]
struct ProxyState {
    client: reqwest::Client,
    upstream: Url,
    credentials: AccessCredentials,
    events: UnboundedSender<ProxyEvent>,
}

/// Binds the proxy on an ephemeral loopback port and serves it in the
/// background. Returns the bound address.
pub async fn spawn(
    upstream: Url,
    credentials: AccessCredentials,
    events: UnboundedSender<ProxyEvent>,
) -> anyhow::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0))
        .await
        .context("failed to bind proxy listener")?;
    let addr = listener.local_addr()?;

    let state = ProxyState {
        client: reqwest::Client::builder()
            .build()
            .context("failed to build proxy http client")?,
        upstream,
        credentials,
        events,
    };
    let router = Router::new().fallback(forward).with_state(state);

    tokio::spawn(async move {
        if let Err(error) = axum::serve(listener, router).await {
            tracing::error!(%error, "access proxy stopped");
        }
    });

    tracing::info!(%addr, "access proxy listening");
    Ok(addr)
}

async fn forward(State(state): State<ProxyState>, request: Request) -> Response {
    match forward_inner(&state, request).await {
        Ok(response) => response,
        Err(error) => {
            tracing::warn!(%error, "upstream request failed");
            let _ = state.events.send(ProxyEvent::UpstreamUnreachable {
                error: error.to_string(),
            });
            (StatusCode::BAD_GATEWAY, "upstream unreachable").into_response()
        }
    }
}

async fn forward_inner(state: &ProxyState, request: Request) -> anyhow::Result<Response> {
    let (parts, body) = request.into_parts();

    let mut target = state.upstream.clone();
    target.set_path(parts.uri.path());
    target.set_query(parts.uri.query());

    let mut request_headers = parts.headers;
    headers::strip_hop_by_hop(&mut request_headers);
    headers::apply_request_headers(&mut request_headers, &state.credentials, &target, &parts.method);

    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .context("failed to read request body")?;

    let upstream_response = state
        .client
        .request(parts.method, target.as_str())
        .headers(request_headers)
        .body(body)
        .send()
        .await?;

    let status = upstream_response.status();
    if status == StatusCode::FORBIDDEN {
        tracing::warn!(url = %target, "access edge rejected the request");
        let _ = state.events.send(ProxyEvent::AccessDenied {
            url: target.to_string(),
        });
    }

    let mut response_headers = upstream_response.headers().clone();
    headers::strip_hop_by_hop(&mut response_headers);
    headers::apply_cors_headers(&mut response_headers);

    let bytes = upstream_response.bytes().await?;
    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = response_headers;
    Ok(response)
}
