//! End-to-end tests driving the router in-process.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use airport_server::airport::Airport;
use airport_server::config::AirportConfig;
use airport_server::web::{AppState, create_router};

fn test_app() -> Router {
    let config = AirportConfig::default();
    create_router(AppState::new(Airport::new(&config), config))
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn add_terminal(app: &Router, id: &str, waiting_time: u32) {
    let (status, _) = send(
        app,
        "POST",
        "/terminals",
        Some(json!({ "id": id, "waiting_time": waiting_time })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn add_shuttle(app: &Router, origin: &str, destination: &str, travel_time: u32) -> u64 {
    let (status, body) = send(
        app,
        "POST",
        "/shuttles",
        Some(json!({ "origin": origin, "destination": destination, "travel_time": travel_time })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_u64().unwrap()
}

/// A{1}, B{3}, C{4}, D{2}; C is removed again after its shuttles are added.
async fn fixture_app() -> Router {
    let app = test_app();
    add_terminal(&app, "A", 1).await;
    add_terminal(&app, "B", 3).await;
    add_terminal(&app, "C", 4).await;
    add_terminal(&app, "D", 2).await;
    add_shuttle(&app, "A", "B", 2).await;
    add_shuttle(&app, "A", "C", 5).await;
    add_shuttle(&app, "A", "D", 18).await;
    add_shuttle(&app, "B", "D", 8).await;
    add_shuttle(&app, "C", "D", 15).await;

    let (status, _) = send(&app, "DELETE", "/terminals/C", None).await;
    assert_eq!(status, StatusCode::OK);
    app
}

#[tokio::test]
async fn health_returns_ok() {
    let app = test_app();
    let resp = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn fastest_and_shortest_routes() {
    let app = fixture_app().await;

    let (status, body) = send(&app, "GET", "/routes/fastest?from=A&to=D", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["terminals"], json!(["A", "B", "D"]));
    assert_eq!(body["cost"], json!(14));

    let (status, body) = send(&app, "GET", "/routes/shortest?from=A&to=D", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["terminals"], json!(["A", "D"]));
    assert_eq!(body["cost"], json!(19));
    assert_eq!(body["reachable"], json!(true));
}

#[tokio::test]
async fn removed_terminal_leaves_no_shuttles_behind() {
    let app = fixture_app().await;

    let (status, body) = send(&app, "GET", "/terminals", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["terminals"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["A", "B", "D"]);

    let (_, body) = send(&app, "GET", "/terminals/A/shuttles", None).await;
    let shuttles = body["shuttles"].as_array().unwrap();
    assert_eq!(shuttles.len(), 2);
    assert!(shuttles.iter().all(|s| s["destination"] != json!("C")));
    // most recent first
    assert_eq!(shuttles[0]["destination"], json!("D"));

    let (status, _) = send(&app, "GET", "/terminals/C/shuttles", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_terminal_conflicts() {
    let app = test_app();
    add_terminal(&app, "A", 1).await;

    let (status, body) = send(
        &app,
        "POST",
        "/terminals",
        Some(json!({ "id": "A", "waiting_time": 7 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], json!("duplicate terminal: A"));
}

#[tokio::test]
async fn invalid_terminal_id_is_bad_request() {
    let app = test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/terminals",
        Some(json!({ "id": "", "waiting_time": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn route_to_unknown_terminal_is_not_found() {
    let app = fixture_app().await;
    let (status, body) = send(&app, "GET", "/routes/shortest?from=A&to=Z", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("unknown terminal: Z"));
}

#[tokio::test]
async fn unreachable_routes() {
    let app = test_app();
    add_terminal(&app, "A", 1).await;
    add_terminal(&app, "B", 1).await;

    let (status, _) = send(&app, "GET", "/routes/fastest?from=A&to=B", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "GET", "/routes/shortest?from=A&to=B", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reachable"], json!(false));
    assert!(body["cost"].is_null());
}

#[tokio::test]
async fn removing_a_shuttle_changes_the_route() {
    let app = test_app();
    add_terminal(&app, "A", 1).await;
    add_terminal(&app, "B", 1).await;
    let id = add_shuttle(&app, "A", "B", 4).await;

    let (status, _) = send(&app, "DELETE", &format!("/shuttles/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "DELETE", &format!("/shuttles/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/routes/fastest?from=A&to=B", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn landing_queue() {
    let app = test_app();
    for (flight, time) in [("LH400", "10:30"), ("BA12", "10:02"), ("KL1", "10:10")] {
        let (status, _) = send(
            &app,
            "POST",
            "/landings",
            Some(json!({ "flight": flight, "time": time })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    // BA12 lands within five minutes of 09:58
    let (status, body) = send(
        &app,
        "POST",
        "/landings/allocate",
        Some(json!({ "current_time": "09:58" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["flight"], json!("BA12"));
    assert_eq!(body["queued"], json!(2));

    // KL1 is still too far off
    let (_, body) = send(
        &app,
        "POST",
        "/landings/allocate",
        Some(json!({ "current_time": "09:58" })),
    )
    .await;
    assert!(body["flight"].is_null());

    let (status, body) = send(&app, "POST", "/landings/LH400/emergency", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["flight"], json!("LH400"));
    assert_eq!(body["queued"], json!(1));

    let (status, _) = send(&app, "POST", "/landings/LH400/emergency", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", "/board", None).await;
    assert_eq!(body["planes"], json!([{ "flight": "KL1", "time": "10:10" }]));
}

#[tokio::test]
async fn invalid_landing_time_is_bad_request() {
    let app = test_app();
    let (status, _) = send(
        &app,
        "POST",
        "/landings",
        Some(json!({ "flight": "BA12", "time": "25:00" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn board_renders_html_when_asked() {
    let app = test_app();
    send(
        &app,
        "POST",
        "/landings",
        Some(json!({ "flight": "BA12", "time": "10:02" })),
    )
    .await;

    let req = Request::get("/board")
        .header(header::ACCEPT, "text/html")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("BA12"));
    assert!(html.contains("10:02"));
}

#[tokio::test]
async fn security_flags_reused_documents() {
    let app = test_app();
    let passenger = json!({ "name": "Ada Lovelace", "passport_id": "Asb23f" });

    let (status, body) = send(&app, "POST", "/security/passengers", Some(passenger.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["visits"], json!(1));

    let (status, body) = send(&app, "POST", "/security/passengers", Some(passenger)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["visits"], json!(2));

    let (status, _) = send(
        &app,
        "POST",
        "/security/passengers",
        Some(json!({ "name": "Someone Else", "passport_id": "Asb23f" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let resp = app
        .clone()
        .oneshot(
            Request::get("/security/passengers/Asb23f")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["name"], json!("Ada Lovelace"));

    let (status, _) = send(&app, "DELETE", "/security/passengers/Asb23f", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", "/security/passengers/Asb23f", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn posted_records_are_sorted() {
    let app = test_app();
    let req = Request::post("/board")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("LH400,10:30\nBA12, 09:15\n\nKL1,10:00\n"))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    let flights: Vec<&str> = body["planes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["flight"].as_str().unwrap())
        .collect();
    assert_eq!(flights, ["BA12", "KL1", "LH400"]);

    let req = Request::post("/board")
        .body(Body::from("BA12,9am\n"))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn large_sorted_board_does_not_exhaust_the_stack() {
    let app = test_app();
    let count = 100_000;
    let body: String = (0..count)
        .map(|n| {
            let minute = n * 1440 / count;
            format!("KL{n:05},{:02}:{:02}\n", minute / 60, minute % 60)
        })
        .collect();
    assert!(body.len() < 2 * 1024 * 1024);

    let req = Request::post("/board")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(body))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    let planes = body["planes"].as_array().unwrap();
    assert_eq!(planes.len(), count);
    assert_eq!(planes[0]["flight"], json!("KL00000"));
    assert_eq!(planes[count - 1]["flight"], json!("KL99999"));

    // the server is still up
    let (status, _) = send(&app, "GET", "/terminals", None).await;
    assert_eq!(status, StatusCode::OK);
}
