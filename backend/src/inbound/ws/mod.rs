//! WebSocket inbound adapter bridging recipe events to client payloads.
//!
//! Responsibilities:
//! - validate upgrade requests (session plus origin check)
//! - pump broadcast events to the socket as JSON frames
//! - keep WebSocket-specific concerns at the edge of the system
//!
//! Each mutation arrives as `{"kind":"added"|"modified"|"removed",...}`.
//! Clients are expected to refetch on reconnect; a subscriber that lags
//! behind the broadcast buffer is disconnected rather than caught up.

use std::time::{Duration, Instant};

use actix_web::http::header::ORIGIN;
use actix_web::{HttpRequest, HttpResponse, get, web};
use actix_ws::{CloseCode, CloseReason, Message};
use tokio::sync::broadcast;
use tracing::{debug, warn};
use url::Url;

mod feed;

pub use feed::RecipeFeed;

use crate::domain::RecipeEvent;
use crate::inbound::http::session::SessionContext;

/// Time between heartbeat pings to the client.
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
/// Maximum silence from the client before the connection is dropped.
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Handle WebSocket upgrade for the `/ws` endpoint.
#[get("/ws")]
pub async fn ws_entry(
    req: HttpRequest,
    stream: web::Payload,
    feed: web::Data<RecipeFeed>,
    session: SessionContext,
) -> actix_web::Result<HttpResponse> {
    session.require_user_id()?;
    validate_origin(&req)?;

    let (response, ws_session, msg_stream) = actix_ws::handle(&req, stream)?;
    let receiver = feed.subscribe();
    actix_web::rt::spawn(connection_loop(ws_session, msg_stream, receiver));
    Ok(response)
}

/// Reject upgrades whose Origin does not match the serving host.
///
/// Browsers always send Origin on WebSocket upgrades; requests without one
/// (CLI clients, tests) are allowed through since the session check has
/// already run.
fn validate_origin(req: &HttpRequest) -> actix_web::Result<()> {
    let Some(origin_header) = req.headers().get(ORIGIN) else {
        return Ok(());
    };

    let origin_value = origin_header.to_str().map_err(|_| {
        actix_web::error::ErrorBadRequest("Invalid Origin header")
    })?;
    let origin = Url::parse(origin_value)
        .map_err(|_| actix_web::error::ErrorBadRequest("Invalid Origin header"))?;

    let request_host = req.connection_info().host().to_owned();
    if is_allowed_origin(&origin, &request_host) {
        Ok(())
    } else {
        warn!(origin = origin_value, "rejected WS upgrade: disallowed origin");
        Err(actix_web::error::ErrorForbidden("Origin not allowed"))
    }
}

/// An origin is allowed when it targets the serving host, or is localhost
/// during development.
fn is_allowed_origin(origin: &Url, request_host: &str) -> bool {
    let Some(host) = origin.host_str() else {
        return false;
    };

    let origin_authority = origin.port().map_or_else(
        || host.to_owned(),
        |port| format!("{host}:{port}"),
    );

    origin_authority == request_host || host == "localhost" || host == "127.0.0.1"
}

async fn connection_loop(
    mut ws_session: actix_ws::Session,
    mut msg_stream: actix_ws::MessageStream,
    mut receiver: broadcast::Receiver<RecipeEvent>,
) {
    let mut heartbeat = tokio::time::interval(HEARTBEAT_INTERVAL);
    let mut last_seen = Instant::now();

    let close_reason = loop {
        tokio::select! {
            event = receiver.recv() => match event {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(frame) => {
                        if ws_session.text(frame).await.is_err() {
                            break None;
                        }
                    }
                    Err(error) => warn!(error = %error, "failed to serialise recipe event"),
                },
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    debug!(missed, "closing lagged feed subscriber");
                    break Some(CloseReason {
                        code: CloseCode::Again,
                        description: Some("event feed lagged; refetch and reconnect".into()),
                    });
                }
                Err(broadcast::error::RecvError::Closed) => break Some(CloseReason {
                    code: CloseCode::Away,
                    description: None,
                }),
            },
            message = msg_stream.recv() => match message {
                Some(Ok(Message::Ping(payload))) => {
                    last_seen = Instant::now();
                    if ws_session.pong(&payload).await.is_err() {
                        break None;
                    }
                }
                Some(Ok(Message::Pong(_) | Message::Text(_) | Message::Binary(_))) => {
                    last_seen = Instant::now();
                }
                Some(Ok(Message::Close(reason))) => {
                    debug!(?reason, "client closed feed connection");
                    break None;
                }
                Some(Ok(Message::Continuation(_) | Message::Nop)) => {}
                Some(Err(error)) => {
                    warn!(error = %error, "WebSocket protocol error");
                    break None;
                }
                None => break None,
            },
            _ = heartbeat.tick() => {
                if last_seen.elapsed() > CLIENT_TIMEOUT {
                    debug!("feed heartbeat timeout");
                    break Some(CloseReason {
                        code: CloseCode::Normal,
                        description: Some("heartbeat timeout".into()),
                    });
                }
                if ws_session.ping(b"").await.is_err() {
                    break None;
                }
            }
        }
    };

    let _closed = ws_session.close(close_reason).await;
}
