//! HTTP endpoint for notification listeners.
//!
//! Browser pages open an `EventSource` on `GET /events` and receive one
//! `data: <json>` frame per timer event. Cross-origin access is unrestricted.

use axum::{
    Json, Router,
    extract::State,
    response::{
        IntoResponse,
        sse::{Event, KeepAlive, Sse},
    },
    routing::get,
};
use futures::{Stream, stream};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use super::{Broadcaster, NotificationError, NotificationResult};
use crate::core::config::EventsConfig;

/// Path of the event stream.
pub const EVENTS_PATH: &str = "/events";

/// Server exposing the broadcaster as a Server-Sent Events stream.
pub struct EventServer {
    config: EventsConfig,
    broadcaster: Arc<Broadcaster>,
}

impl EventServer {
    /// Create an event server for the given broadcaster.
    pub fn new(config: EventsConfig, broadcaster: Arc<Broadcaster>) -> Self {
        Self {
            config,
            broadcaster,
        }
    }

    /// Build the HTTP router.
    pub fn router(broadcaster: Arc<Broadcaster>) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route(EVENTS_PATH, get(events_handler))
            .route("/health", get(health_check))
            .with_state(broadcaster)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    async fn bind(&self) -> NotificationResult<TcpListener> {
        let addr = self.config.address();
        TcpListener::bind(&addr)
            .await
            .map_err(|e| NotificationError::bind(addr, e))
    }

    /// Bind the endpoint and serve it in the background.
    ///
    /// If the address is unavailable the broadcaster is disabled and `None`
    /// is returned; timers keep working without notifications.
    pub async fn start(self) -> Option<SocketAddr> {
        let listener = match self.bind().await {
            Ok(listener) => listener,
            Err(e) => {
                warn!("{} - desktop notifications disabled", e);
                self.broadcaster.disable();
                return None;
            }
        };

        let local_addr = match listener.local_addr() {
            Ok(addr) => addr,
            Err(e) => {
                warn!("Event endpoint has no local address ({}) - notifications disabled", e);
                self.broadcaster.disable();
                return None;
            }
        };

        info!("Notifications ready - GET http://{}{}", local_addr, EVENTS_PATH);

        let app = Self::router(self.broadcaster);
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                warn!("Event endpoint stopped: {}", e);
            }
        });

        Some(local_addr)
    }
}

/// Open a long-lived event stream for one listener.
async fn events_handler(
    State(broadcaster): State<Arc<Broadcaster>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let subscription = broadcaster.subscribe();

    // The subscription unregisters itself when the connection drops the stream.
    let events = stream::unfold(subscription, |mut subscription| async move {
        let payload = subscription.recv().await?;
        Some((Ok::<_, Infallible>(Event::default().data(payload)), subscription))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Health check endpoint.
async fn health_check(State(broadcaster): State<Arc<Broadcaster>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "subscribers": broadcaster.subscriber_count(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::notifications::TimerEvent;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tower::ServiceExt;

    fn events_request() -> Request<Body> {
        Request::builder()
            .uri(EVENTS_PATH)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_events_stream_frames() {
        let broadcaster = Arc::new(Broadcaster::new());
        let app = EventServer::router(broadcaster.clone());

        let response = app.oneshot(events_request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/event-stream"
        );
        assert_eq!(broadcaster.subscriber_count(), 1);

        broadcaster.broadcast(&TimerEvent::start("Design review"));

        let mut body = response.into_body();
        let frame = body.frame().await.unwrap().unwrap();
        let data = frame.into_data().unwrap();
        assert_eq!(
            &data[..],
            b"data: {\"type\":\"start\",\"taskName\":\"Design review\"}\n\n"
        );

        drop(body);
        assert_eq!(broadcaster.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_events_allow_any_origin() {
        let broadcaster = Arc::new(Broadcaster::new());
        let app = EventServer::router(broadcaster);

        let request = Request::builder()
            .uri(EVENTS_PATH)
            .header(header::ORIGIN, "http://localhost:5500")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn test_health_reports_subscribers() {
        let broadcaster = Arc::new(Broadcaster::new());
        let _listener = broadcaster.subscribe();
        let app = EventServer::router(broadcaster);

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["subscribers"], 1);
    }

    #[tokio::test]
    async fn test_port_in_use_disables_broadcaster() {
        let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = occupied.local_addr().unwrap().port();

        let broadcaster = Arc::new(Broadcaster::new());
        let config = EventsConfig {
            enabled: true,
            host: "127.0.0.1".to_string(),
            port,
        };

        let started = EventServer::new(config, broadcaster.clone()).start().await;
        assert!(started.is_none());
        assert!(!broadcaster.is_enabled());
    }

    #[tokio::test]
    async fn test_start_serves_health() {
        let broadcaster = Arc::new(Broadcaster::new());
        let config = EventsConfig {
            enabled: true,
            host: "127.0.0.1".to_string(),
            port: 0,
        };

        let addr = EventServer::new(config, broadcaster.clone())
            .start()
            .await
            .expect("event server should bind an ephemeral port");
        assert_ne!(addr.port(), 0);
        assert!(broadcaster.is_enabled());

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains("healthy"));
    }
}
