//! End-to-end tests against a real server instance.

use serde_json::Value;

use gateway_echo::config::ServiceConfig;

mod common;

async fn get_json(url: &str) -> (reqwest::StatusCode, Value) {
    let res = reqwest::get(url).await.expect("service unreachable");
    let status = res.status();
    let json = res.json().await.expect("response body is not JSON");
    (status, json)
}

#[tokio::test]
async fn root_echoes_method_path_and_caller() {
    let (addr, shutdown) = common::start_service(ServiceConfig::default()).await;

    let (status, json) = get_json(&format!("http://{addr}/")).await;
    assert_eq!(status, 200);
    assert_eq!(json["method"], "GET");
    assert_eq!(json["path"], "/");
    assert!(json["message"].as_str().unwrap().contains("Welcome"));
    // The client sets a Host header, so the catch-all matcher labels it.
    assert!(json["caller"]["user_arn"]
        .as_str()
        .unwrap()
        .starts_with("API Gateway: "));

    shutdown.trigger();
}

#[tokio::test]
async fn health_reports_healthy_with_rfc3339_timestamp() {
    let (addr, shutdown) = common::start_service(ServiceConfig::default()).await;

    let (status, json) = get_json(&format!("http://{addr}/health")).await;
    assert_eq!(status, 200);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["message"], "API is running successfully");

    let timestamp = json["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());

    shutdown.trigger();
}

#[tokio::test]
async fn get_data_returns_the_fixed_sample_set() {
    let (addr, shutdown) = common::start_service(ServiceConfig::default()).await;

    let (status, json) = get_json(&format!("http://{addr}/data")).await;
    assert_eq!(status, 200);
    assert_eq!(json["data"]["count"], 3);
    assert_eq!(
        json["data"]["items"],
        serde_json::json!(["item1", "item2", "item3"])
    );

    shutdown.trigger();
}

#[tokio::test]
async fn post_data_echoes_the_payload() {
    let (addr, shutdown) = common::start_service(ServiceConfig::default()).await;

    let payload = serde_json::json!({
        "message": "test",
        "count": 7,
        "nested": {"pi": 3.25, "ok": true},
    });

    let client = reqwest::Client::new();
    let res = client
        .post(format!("http://{addr}/data"))
        .json(&payload)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 201);
    let json: Value = res.json().await.unwrap();
    assert_eq!(json["data"], payload);
    assert_eq!(json["message"], "Data received successfully");

    shutdown.trigger();
}

#[tokio::test]
async fn post_data_rejects_invalid_json() {
    let (addr, shutdown) = common::start_service(ServiceConfig::default()).await;

    let client = reqwest::Client::new();
    for body in ["not json at all", "", "[1,2,3]"] {
        let res = client
            .post(format!("http://{addr}/data"))
            .body(body)
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), 400, "body: {body:?}");
        let json: Value = res.json().await.unwrap();
        assert_eq!(json["message"], "Invalid JSON in request body");
    }

    shutdown.trigger();
}

#[tokio::test]
async fn unsupported_data_method_names_the_method() {
    let (addr, shutdown) = common::start_service(ServiceConfig::default()).await;

    let client = reqwest::Client::new();
    let res = client
        .delete(format!("http://{addr}/data"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 405);
    let json: Value = res.json().await.unwrap();
    assert!(json["message"].as_str().unwrap().contains("DELETE"));

    shutdown.trigger();
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let (addr, shutdown) = common::start_service(ServiceConfig::default()).await;

    let (status, json) = get_json(&format!("http://{addr}/definitely/missing")).await;
    assert_eq!(status, 404);
    assert_eq!(json["message"], "Endpoint not found");

    shutdown.trigger();
}

#[tokio::test]
async fn options_preflight_short_circuits_with_cors_headers() {
    let (addr, shutdown) = common::start_service(ServiceConfig::default()).await;

    let client = reqwest::Client::new();
    let res = client
        .request(reqwest::Method::OPTIONS, format!("http://{addr}/data"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    assert_eq!(
        res.headers()["access-control-allow-methods"],
        "GET,POST,PUT,DELETE,OPTIONS"
    );
    let body = res.text().await.unwrap();
    assert!(body.is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn every_response_carries_json_content_type_and_cors() {
    let (addr, shutdown) = common::start_service(ServiceConfig::default()).await;

    for path in ["/", "/health", "/data", "/missing"] {
        let res = reqwest::get(format!("http://{addr}{path}")).await.unwrap();
        assert_eq!(
            res.headers()["content-type"],
            "application/json",
            "path: {path}"
        );
        assert_eq!(
            res.headers()["access-control-allow-origin"],
            "*",
            "path: {path}"
        );
    }

    shutdown.trigger();
}

#[tokio::test]
async fn security_token_is_reflected_as_sts_role() {
    let (addr, shutdown) = common::start_service(ServiceConfig::default()).await;

    let token = format!("IQoJ{}", "b".repeat(120));
    let client = reqwest::Client::new();
    let res = client
        .get(format!("http://{addr}/"))
        .header("X-Amz-Security-Token", &token)
        .send()
        .await
        .unwrap();

    let json: Value = res.json().await.unwrap();
    assert_eq!(json["caller"]["role_name"], "STS-AssumedRole");
    assert_eq!(json["caller"]["user_id"], "Role: STS-AssumedRole");
    assert!(json["caller"]["session_name"]
        .as_str()
        .unwrap()
        .starts_with("session-"));

    shutdown.trigger();
}

#[tokio::test]
async fn authorization_header_is_echoed_as_bounded_prefix() {
    let (addr, shutdown) = common::start_service(ServiceConfig::default()).await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("http://{addr}/"))
        .header("Authorization", "Bearer sometoken1234567890")
        .send()
        .await
        .unwrap();

    let json: Value = res.json().await.unwrap();
    let user_id = json["caller"]["user_id"].as_str().unwrap();
    assert_eq!(user_id, "Bearer sometoken1234...");

    shutdown.trigger();
}

#[tokio::test]
async fn api_key_attributes_the_usage_plan_gateway() {
    let (addr, shutdown) = common::start_service(ServiceConfig::default()).await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("http://{addr}/data"))
        .header("X-API-Key", "demo-key")
        .send()
        .await
        .unwrap();

    let json: Value = res.json().await.unwrap();
    assert_eq!(json["caller"]["user_arn"], "API C (IAM + API Key)");

    shutdown.trigger();
}

#[tokio::test]
async fn graceful_shutdown_stops_the_server() {
    let (addr, shutdown) = common::start_service(ServiceConfig::default()).await;

    let (status, _) = get_json(&format!("http://{addr}/health")).await;
    assert_eq!(status, 200);

    shutdown.trigger();
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    assert_eq!(shutdown.receiver_count(), 0, "server task still running");

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_millis(500))
        .build()
        .unwrap();
    assert!(client
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .is_err());
}
