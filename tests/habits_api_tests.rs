//! HTTP tests for the habits and habit tag endpoints

mod common;

use axum::http::{StatusCode, header};
use common::{hateoas, href, names, rels, spawn_app};
use serde_json::{Value, json};

// =============================================================================
// CRUD
// =============================================================================

mod crud_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_returns_location_and_body() {
        let app = spawn_app();

        let response = app
            .server
            .post("/habits")
            .json(&common::habit_payload("Run"))
            .await;
        response.assert_status(StatusCode::CREATED);

        let body = response.json::<Value>();
        let id = body["id"].as_str().unwrap();
        assert!(id.starts_with("h_"));
        assert_eq!(body["status"], "ongoing");
        assert_eq!(body["isArchived"], false);
        assert!(body.get("links").is_none());

        let location = response.header(header::LOCATION);
        assert_eq!(location.to_str().unwrap(), format!("/habits/{id}"));

        let fetched = app.server.get(&format!("/habits/{id}")).await;
        fetched.assert_status_ok();
        assert_eq!(fetched.json::<Value>()["name"], "Run");
    }

    #[tokio::test]
    async fn test_create_with_links() {
        let app = spawn_app();

        let response = hateoas(app.server.post("/habits"))
            .json(&common::habit_payload("Run"))
            .await;
        response.assert_status(StatusCode::CREATED);

        let body = response.json::<Value>();
        assert_eq!(
            rels(&body["links"]),
            vec!["self", "update", "partial-update", "delete", "upsert-tags"]
        );
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_payload() {
        let app = spawn_app();
        let mut payload = common::habit_payload("");
        payload["target"]["value"] = json!(0);

        let response = app.server.post("/habits").json(&payload).await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let problem = response.json::<Value>();
        assert_eq!(problem["code"], "VALIDATION_ERROR");
        let fields: Vec<&str> = problem["errors"]["fields"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|f| f["field"].as_str())
            .collect();
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"target.value"));
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let app = spawn_app();
        let id = app.create_habit("Run").await;

        let mut payload = common::habit_payload("Run far");
        payload["milestone"] = json!({ "target": 50 });
        app.server
            .put(&format!("/habits/{id}"))
            .json(&payload)
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let habit = app.server.get(&format!("/habits/{id}")).await.json::<Value>();
        assert_eq!(habit["name"], "Run far");
        assert_eq!(habit["milestone"], json!({ "target": 50, "current": 0 }));
        assert!(habit["updatedAtUtc"].is_string());
    }

    #[tokio::test]
    async fn test_update_missing_habit_is_404() {
        let app = spawn_app();
        app.server
            .put("/habits/h_missing")
            .json(&common::habit_payload("Run"))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_patch_name_and_description() {
        let app = spawn_app();
        let id = app.create_habit("Run").await;

        app.server
            .patch(&format!("/habits/{id}"))
            .json(&json!([
                { "op": "replace", "path": "/name", "value": "Jog" },
                { "op": "remove", "path": "/description" }
            ]))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let habit = app.server.get(&format!("/habits/{id}")).await.json::<Value>();
        assert_eq!(habit["name"], "Jog");
        assert!(habit["description"].is_null());
    }

    #[tokio::test]
    async fn test_patch_rejects_unsupported_path() {
        let app = spawn_app();
        let id = app.create_habit("Run").await;

        let response = app
            .server
            .patch(&format!("/habits/{id}"))
            .json(&json!([{ "op": "replace", "path": "/status", "value": "completed" }]))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], "INVALID_PATCH");
    }

    #[tokio::test]
    async fn test_delete_then_get_is_404() {
        let app = spawn_app();
        let id = app.create_habit("Run").await;

        app.server
            .delete(&format!("/habits/{id}"))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        app.server
            .get(&format!("/habits/{id}"))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        app.server
            .delete(&format!("/habits/{id}"))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

// =============================================================================
// Listing
// =============================================================================

mod list_tests {
    use super::*;

    async fn seeded() -> common::TestApp {
        let app = spawn_app();
        for name in ["Run", "Read", "Swim"] {
            app.create_habit(name).await;
        }
        app
    }

    #[tokio::test]
    async fn test_sort_by_name_desc() {
        let app = seeded().await;

        let page = app
            .server
            .get("/habits")
            .add_query_param("sort", "name desc")
            .await
            .json::<Value>();
        assert_eq!(names(&page), vec!["Swim", "Run", "Read"]);
        assert_eq!(page["totalCount"], 3);
    }

    #[tokio::test]
    async fn test_search_and_filters() {
        let app = seeded().await;

        let page = app
            .server
            .get("/habits")
            .add_query_param("q", "rea")
            .await
            .json::<Value>();
        assert_eq!(names(&page), vec!["Read"]);

        let page = app
            .server
            .get("/habits")
            .add_query_param("type", "binary")
            .await
            .json::<Value>();
        assert_eq!(page["totalCount"], 0);

        let page = app
            .server
            .get("/habits")
            .add_query_param("status", "ongoing")
            .await
            .json::<Value>();
        assert_eq!(page["totalCount"], 3);
    }

    #[tokio::test]
    async fn test_unknown_filter_value_is_400() {
        let app = seeded().await;
        let response = app
            .server
            .get("/habits")
            .add_query_param("status", "paused")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], "INVALID_QUERY");
    }

    #[tokio::test]
    async fn test_paging_links_replay_query() {
        let app = seeded().await;

        let page = hateoas(app.server.get("/habits"))
            .add_query_param("sort", "name")
            .add_query_param("pageSize", "2")
            .await
            .json::<Value>();
        assert_eq!(names(&page), vec!["Read", "Run"]);
        assert_eq!(rels(&page["links"]), vec!["self", "create", "next-page"]);
        assert_eq!(
            href(&page["links"], "next-page"),
            Some("/habits?sort=name&pageSize=2&page=2")
        );

        let page = hateoas(app.server.get("/habits"))
            .add_query_param("sort", "name")
            .add_query_param("pageSize", "2")
            .add_query_param("page", "2")
            .await
            .json::<Value>();
        assert_eq!(names(&page), vec!["Swim"]);
        assert_eq!(rels(&page["links"]), vec!["self", "create", "previous-page"]);
        assert_eq!(
            href(&page["links"], "previous-page"),
            Some("/habits?sort=name&pageSize=2&page=1")
        );
    }

    #[tokio::test]
    async fn test_item_self_link_keeps_fields() {
        let app = seeded().await;

        let page = hateoas(app.server.get("/habits"))
            .add_query_param("fields", "name")
            .await
            .json::<Value>();
        let item = &page["items"][0];
        assert!(item.get("id").is_none());

        let self_href = href(&item["links"], "self").unwrap();
        assert!(self_href.starts_with("/habits/h_"));
        assert!(self_href.ends_with("?fields=name"));
        assert_eq!(
            href(&item["links"], "upsert-tags").map(|h| h.ends_with("/tags")),
            Some(true)
        );
    }
}

// =============================================================================
// Habit tags
// =============================================================================

mod habit_tag_tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_tags_lifecycle() {
        let app = spawn_app();
        let habit = app.create_habit("Run").await;
        let health = app.create_tag("Health").await;
        let fitness = app.create_tag("Fitness").await;
        let path = format!("/habits/{habit}/tags");

        app.server
            .put(&path)
            .json(&json!({ "tagIds": [health, fitness] }))
            .await
            .assert_status_ok();

        let fetched = app.server.get(&format!("/habits/{habit}")).await.json::<Value>();
        assert_eq!(fetched["tags"], json!(["Health", "Fitness"]));

        // same set in another order is a no-op
        app.server
            .put(&path)
            .json(&json!({ "tagIds": [fitness, health] }))
            .await
            .assert_status(StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_upsert_unknown_tag_is_400() {
        let app = spawn_app();
        let habit = app.create_habit("Run").await;
        let health = app.create_tag("Health").await;

        let response = app
            .server
            .put(&format!("/habits/{habit}/tags"))
            .json(&json!({ "tagIds": [health, "t_missing"] }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let problem = response.json::<Value>();
        assert_eq!(problem["code"], "UNKNOWN_REFERENCES");
        assert_eq!(problem["errors"]["ids"], json!(["t_missing"]));
    }

    #[tokio::test]
    async fn test_upsert_on_missing_habit_is_404() {
        let app = spawn_app();
        app.server
            .put("/habits/h_missing/tags")
            .json(&json!({ "tagIds": [] }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_habit_tag() {
        let app = spawn_app();
        let habit = app.create_habit("Run").await;
        let health = app.create_tag("Health").await;

        app.server
            .put(&format!("/habits/{habit}/tags"))
            .json(&json!({ "tagIds": [health] }))
            .await
            .assert_status_ok();

        let path = format!("/habits/{habit}/tags/{health}");
        app.server
            .delete(&path)
            .await
            .assert_status(StatusCode::NO_CONTENT);
        app.server
            .delete(&path)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
