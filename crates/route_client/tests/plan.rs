use std::sync::{Arc, Mutex};

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use model::{GeoPoint, RouteError, RouteRequest, TransportMode};
use route_client::{RouteClient, RouteClientConfig, RoutePlanner};
use serde_json::{json, Value};
use tokio::net::TcpListener;

async fn spawn_backend(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{address}")
}

fn respond_with(body: Value) -> Router {
    Router::new().route(
        "/api/route/plan",
        post(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    )
}

fn client(base_url: String) -> RouteClient {
    RouteClient::new(RouteClientConfig::new(base_url)).unwrap()
}

fn request() -> RouteRequest {
    RouteRequest::build(
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(0.0, 1.0),
        [],
        TransportMode::Electric,
    )
    .unwrap()
}

#[tokio::test]
async fn plans_a_walking_only_route() {
    let base_url = spawn_backend(respond_with(json!({
        "route": [{"latitude": 0, "longitude": 0}, {"latitude": 0, "longitude": 1}],
        "roads": [],
        "totalDistance": 100,
        "estimatedTime": 5
    })))
    .await;

    let model = client(base_url).plan(&request()).await.unwrap();
    assert_eq!(
        model.path(),
        &[GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0)]
    );
    assert!(model.vehicle_leg().is_none());
    assert!(model.roads().is_empty());
    assert_eq!(model.metrics().total_distance, 100.0);
    assert_eq!(model.metrics().estimated_time, 5.0);
}

#[tokio::test]
async fn sends_the_request_body() {
    let received: Arc<Mutex<Option<RouteRequest>>> = Arc::default();
    let router = Router::new()
        .route(
            "/api/route/plan",
            post(
                |State(received): State<Arc<Mutex<Option<RouteRequest>>>>,
                 Json(request): Json<RouteRequest>| async move {
                    *received.lock().unwrap() = Some(request);
                    Json(json!({
                        "route": [{"latitude": 0, "longitude": 0}, {"latitude": 0, "longitude": 1}]
                    }))
                },
            ),
        )
        .with_state(received.clone());
    let base_url = spawn_backend(router).await;

    let request = RouteRequest::build(
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(0.0, 1.0),
        [GeoPoint::new(0.0, 0.5)],
        TransportMode::Electric,
    )
    .unwrap();
    client(base_url).plan(&request).await.unwrap();

    let received = received.lock().unwrap().clone();
    assert_eq!(received, Some(request));
}

#[tokio::test]
async fn server_errors_are_transport_errors() {
    let router = Router::new().route(
        "/api/route/plan",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "planner crashed") }),
    );
    let base_url = spawn_backend(router).await;

    let err = client(base_url).plan(&request()).await.unwrap_err();
    match err {
        RouteError::Transport {
            status_code,
            response,
            ..
        } => {
            assert_eq!(status_code, Some(500));
            assert_eq!(response.as_deref(), Some("planner crashed"));
        }
        other => panic!("expected a transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn bad_request_without_body() {
    let router = Router::new().route(
        "/api/route/plan",
        post(|| async { StatusCode::BAD_REQUEST }),
    );
    let base_url = spawn_backend(router).await;

    let err = client(base_url).plan(&request()).await.unwrap_err();
    assert_eq!(err.status_code(), Some(400));
    assert!(matches!(err, RouteError::Transport { response: None, .. }));
}

#[tokio::test]
async fn single_point_routes_are_malformed() {
    let base_url = spawn_backend(respond_with(json!({
        "route": [{"latitude": 0, "longitude": 0}],
        "totalDistance": 0
    })))
    .await;

    let err = client(base_url).plan(&request()).await.unwrap_err();
    assert!(matches!(err, RouteError::MalformedRoute { points: 1 }));
}

#[tokio::test]
async fn partial_vehicle_boundary_degrades_to_walking() {
    let base_url = spawn_backend(respond_with(json!({
        "route": [{"latitude": 0, "longitude": 0}, {"latitude": 0, "longitude": 1}],
        "electricStartPoint": {"latitude": 0, "longitude": 0}
    })))
    .await;

    let model = client(base_url).plan(&request()).await.unwrap();
    assert_eq!(model.vehicle_start(), None);
    assert_eq!(model.vehicle_end(), None);
}

#[tokio::test]
async fn non_json_success_is_a_decode_error() {
    let router = Router::new().route("/api/route/plan", post(|| async { "<html>ok</html>" }));
    let base_url = spawn_backend(router).await;

    let err = client(base_url).plan(&request()).await.unwrap_err();
    assert!(matches!(err, RouteError::Decode(_)));
}

#[tokio::test]
async fn unreachable_backend_has_no_status() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let err = client(format!("http://{address}"))
        .plan(&request())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RouteError::Transport {
            status_code: None,
            ..
        }
    ));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn usable_through_the_planner_trait() {
    let base_url = spawn_backend(respond_with(json!({
        "route": [
            {"latitude": 3, "longitude": 3},
            {"latitude": 1, "longitude": 1},
            {"latitude": 2, "longitude": 2}
        ]
    })))
    .await;

    let planner: Box<dyn RoutePlanner> = Box::new(client(base_url));
    let model = planner.plan(&request()).await.unwrap();
    assert_eq!(
        model.path(),
        &[
            GeoPoint::new(3.0, 3.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(2.0, 2.0)
        ]
    );
}
