// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Integration tests for the ride API.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use ridelog::config::Config;
use ridelog::services::ChronologyPolicy;
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

async fn request_json(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

#[tokio::test]
async fn test_health() {
    let (app, _state) = common::create_test_app();
    let (status, body) = request_json(app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_upload_ride() {
    let (app, _state) = common::create_test_app();
    let ride = common::test_ride_body();

    let (status, result) = request_json(app, "POST", "/api/rides/upload", Some(ride.clone())).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(result["id"], 1);
    assert_eq!(result["ride"]["name"], ride["name"]);
    assert_eq!(result["ride"]["start_time"], ride["start_time"]);
    assert_eq!(result["ride"]["end_time"], ride["end_time"]);
    assert_eq!(result["ride"]["waypoints"].as_array().unwrap().len(), 2);

    let summary = &result["ride"]["summary"];
    assert!(summary["total_distance"].as_f64().unwrap() > 0.0);
    assert_eq!(summary["total_elevation_gain"], 10.0); // 110 - 100
    assert_eq!(summary["elapsed_time"], "00:05:00");
    assert!(summary["average_speed"].as_f64().unwrap() > 0.0);
    assert!(summary["max_speed"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_upload_assigns_sequential_ids() {
    let (app, _state) = common::create_test_app();
    let ride = common::test_ride_body();

    let (_, first) = request_json(app.clone(), "POST", "/api/rides/upload", Some(ride.clone())).await;
    let (_, second) = request_json(app, "POST", "/api/rides/upload", Some(ride)).await;

    assert_eq!(first["id"], 1);
    assert_eq!(second["id"], 2);
}

#[tokio::test]
async fn test_get_ride() {
    let (app, _state) = common::create_test_app();
    let ride = common::test_ride_body();
    request_json(app.clone(), "POST", "/api/rides/upload", Some(ride)).await;

    let (status, body) = request_json(app, "GET", "/api/rides/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Test Ride");
    assert_eq!(body["summary"]["total_elevation_gain"], 10.0);
    assert_eq!(body["waypoints"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_nonexistent_ride() {
    let (app, _state) = common::create_test_app();
    let (status, body) = request_json(app, "GET", "/api/rides/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    assert!(body["details"].as_str().unwrap().contains("Ride 999"));
}

#[tokio::test]
async fn test_list_rides() {
    let (app, _state) = common::create_test_app();
    let ride = common::test_ride_body();
    request_json(app.clone(), "POST", "/api/rides/upload", Some(ride.clone())).await;
    request_json(app.clone(), "POST", "/api/rides/upload", Some(ride)).await;

    let (status, body) = request_json(app, "GET", "/api/rides", None).await;
    assert_eq!(status, StatusCode::OK);

    let rides = body.as_array().unwrap();
    assert_eq!(rides.len(), 2);
    assert_eq!(rides[0]["id"], 1);
    assert_eq!(rides[1]["id"], 2);
    for entry in rides {
        assert!(entry["ride"]["summary"].is_object());
        assert!(entry["ride"]["waypoints"].is_array());
    }
}

#[tokio::test]
async fn test_update_ride() {
    let (app, _state) = common::create_test_app();
    request_json(
        app.clone(),
        "POST",
        "/api/rides/upload",
        Some(common::test_ride_body()),
    )
    .await;

    let update = json!({
        "name": "Renamed Ride",
        "start_time": "2024-03-15T10:00:00Z",
        "end_time": "2024-03-15T10:05:00Z"
    });
    let (status, body) = request_json(app.clone(), "PUT", "/api/rides/1", Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Renamed Ride");
    // Waypoints and summary survive the update
    assert_eq!(body["waypoints"].as_array().unwrap().len(), 2);
    assert_eq!(body["summary"]["elapsed_time"], "00:05:00");
}

#[tokio::test]
async fn test_update_rejects_inverted_time_range() {
    let (app, _state) = common::create_test_app();
    request_json(
        app.clone(),
        "POST",
        "/api/rides/upload",
        Some(common::test_ride_body()),
    )
    .await;

    let update = json!({
        "name": "Test Ride",
        "start_time": "2024-03-15T11:00:00Z",
        "end_time": "2024-03-15T10:00:00Z"
    });
    let (status, body) = request_json(app, "PUT", "/api/rides/1", Some(update)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_failed");
    assert!(body["details"].as_str().unwrap().contains("end_time"));
}

#[tokio::test]
async fn test_update_nonexistent_ride() {
    let (app, _state) = common::create_test_app();
    let update = json!({
        "name": "Ghost",
        "start_time": "2024-03-15T10:00:00Z",
        "end_time": "2024-03-15T10:05:00Z"
    });
    let (status, _) = request_json(app, "PUT", "/api/rides/42", Some(update)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_ride_and_id_not_reused() {
    let (app, _state) = common::create_test_app();
    let ride = common::test_ride_body();
    request_json(app.clone(), "POST", "/api/rides/upload", Some(ride.clone())).await;

    let (status, _) = request_json(app.clone(), "DELETE", "/api/rides/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = request_json(app.clone(), "GET", "/api/rides/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request_json(app.clone(), "DELETE", "/api/rides/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Deleted ids are never reassigned
    let (_, body) = request_json(app, "POST", "/api/rides/upload", Some(ride)).await;
    assert_eq!(body["id"], 2);
}

#[tokio::test]
async fn test_upload_count_mismatch() {
    let (app, _state) = common::create_test_app();
    let mut ride = common::test_ride_body();
    ride["number_waypoints"] = json!(3);

    let (status, body) = request_json(app, "POST", "/api/rides/upload", Some(ride)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_failed");
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("number_waypoints (3)"));
}

#[tokio::test]
async fn test_upload_invalid_latitude() {
    let (app, _state) = common::create_test_app();
    let mut ride = common::test_ride_body();
    ride["waypoints"][1]["latitude"] = json!(91.0);

    let (status, body) = request_json(app, "POST", "/api/rides/upload", Some(ride)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["details"].as_str().unwrap().contains("Invalid latitude"));
}

#[tokio::test]
async fn test_upload_invalid_timestamp() {
    let (app, _state) = common::create_test_app();
    let mut ride = common::test_ride_body();
    ride["waypoints"][0]["timestamp"] = json!("2024-13-45T25:00:00Z");

    let (status, body) = request_json(app, "POST", "/api/rides/upload", Some(ride)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("2024-13-45T25:00:00Z"));
}

#[tokio::test]
async fn test_upload_non_chronological_rejected_by_default() {
    let (app, _state) = common::create_test_app();
    let mut ride = common::test_ride_body();
    ride["waypoints"][1]["timestamp"] = json!("2024-03-15T09:00:00Z");

    let (status, body) = request_json(app, "POST", "/api/rides/upload", Some(ride)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["details"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("chronological order"));
}

#[tokio::test]
async fn test_upload_non_chronological_resorted_when_configured() {
    let config = Config {
        chronology: ChronologyPolicy::Resort,
        ..Config::default()
    };
    let (app, _state) = common::create_test_app_with_config(config);

    // Same waypoints as the fixture, listed in reverse order
    let ride = json!({
        "name": "Reversed Upload",
        "start_time": "2024-03-15T10:00:00Z",
        "end_time": "2024-03-15T10:05:00Z",
        "number_waypoints": 2,
        "waypoints": [
            {
                "latitude": 37.775929,
                "longitude": -122.429416,
                "elevation": 110.0,
                "timestamp": "2024-03-15T10:05:00Z"
            },
            {
                "latitude": 37.774929,
                "longitude": -122.419416,
                "elevation": 100.0,
                "timestamp": "2024-03-15T10:00:00Z"
            }
        ]
    });

    let (status, body) = request_json(app, "POST", "/api/rides/upload", Some(ride)).await;
    assert_eq!(status, StatusCode::OK);
    // Processed in chronological order: climb counted, positive elapsed time
    assert_eq!(body["ride"]["summary"]["total_elevation_gain"], 10.0);
    assert_eq!(body["ride"]["summary"]["elapsed_time"], "00:05:00");
}

#[tokio::test]
async fn test_upload_missing_required_fields() {
    let (app, _state) = common::create_test_app();
    let incomplete = json!({
        "name": "Test Ride",
        "waypoints": []
    });

    let (status, _) = request_json(app, "POST", "/api/rides/upload", Some(incomplete)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_upload_single_waypoint_ride() {
    let (app, _state) = common::create_test_app();
    let ride = json!({
        "name": "Lone Point",
        "start_time": "2024-03-15T10:00:00Z",
        "end_time": "2024-03-15T10:00:00Z",
        "number_waypoints": 1,
        "waypoints": [
            {
                "latitude": 37.7749,
                "longitude": -122.4194,
                "elevation": 100.0,
                "timestamp": "2024-03-15T10:00:00Z"
            }
        ]
    });

    let (status, body) = request_json(app, "POST", "/api/rides/upload", Some(ride)).await;
    assert_eq!(status, StatusCode::OK);
    let summary = &body["ride"]["summary"];
    assert_eq!(summary["total_distance"], 0.0);
    assert_eq!(summary["total_elevation_gain"], 0.0);
    assert_eq!(summary["average_speed"], 0.0);
    assert_eq!(summary["max_speed"], 0.0);
    assert_eq!(summary["elapsed_time"], "00:00:00");
}
