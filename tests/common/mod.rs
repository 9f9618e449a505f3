//! Shared helpers for HTTP integration tests

#![allow(dead_code)]

use axum::http::{HeaderValue, header};
use axum_test::{TestRequest, TestServer};
use devhabit::prelude::*;
use serde_json::{Value, json};

pub struct TestApp {
    pub server: TestServer,
    pub stores: Stores,
}

/// Configuration with relative hrefs so link assertions do not depend on the host
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.links.absolute = false;
    config
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(test_config())
}

pub fn spawn_app_with(config: AppConfig) -> TestApp {
    let module = DevHabitModule::new();
    let stores = module.stores().clone();

    let app = ServerBuilder::new()
        .with_config(config)
        .register_module(module)
        .build()
        .expect("Failed to build app");

    let server = TestServer::try_new(app).expect("Failed to create test server");
    TestApp { server, stores }
}

/// Ask for the hypermedia representation
pub fn hateoas(request: TestRequest) -> TestRequest {
    request.add_header(header::ACCEPT, HeaderValue::from_static(HATEOAS_MEDIA_TYPE))
}

pub fn habit_payload(name: &str) -> Value {
    json!({
        "name": name,
        "description": format!("{name} regularly"),
        "type": "measurable",
        "frequency": { "type": "daily", "timesPerPeriod": 1 },
        "target": { "value": 10, "unit": "minutes" }
    })
}

impl TestApp {
    /// Create a habit through the API and return its id
    pub async fn create_habit(&self, name: &str) -> String {
        let response = self.server.post("/habits").json(&habit_payload(name)).await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()["id"]
            .as_str()
            .expect("habit id")
            .to_string()
    }

    /// Create a tag through the API and return its id
    pub async fn create_tag(&self, name: &str) -> String {
        let response = self
            .server
            .post("/tags")
            .json(&json!({ "name": name }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()["id"]
            .as_str()
            .expect("tag id")
            .to_string()
    }
}

pub fn names(page: &Value) -> Vec<String> {
    page["items"]
        .as_array()
        .expect("items array")
        .iter()
        .map(|item| item["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

pub fn rels(links: &Value) -> Vec<String> {
    links
        .as_array()
        .expect("links array")
        .iter()
        .map(|link| link["rel"].as_str().unwrap_or_default().to_string())
        .collect()
}

pub fn href<'a>(links: &'a Value, rel: &str) -> Option<&'a str> {
    links
        .as_array()?
        .iter()
        .find(|link| link["rel"] == rel)
        .and_then(|link| link["href"].as_str())
}
