//! Vault endpoint tests: save, list, share, delete, and the public
//! share fetch.
//!
//! Auth and validation rejections run offline; everything touching
//! stored generations needs the shared Postgres container and is marked
//! `#[ignore]`. Run those with `cargo test -- --ignored`.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{mint_token, offline_deps, TestHarness, TestRequest, TEST_APP_BASE_URL};
use enrichment::testing::MockFetcher;
use serde_json::{json, Value};
use server_core::domains::vault::Generation;
use server_core::kernel::MockGenerativeAI;
use server_core::server::build_app;
use test_context::test_context;
use uuid::Uuid;

fn offline_app() -> axum::Router {
    build_app(offline_deps(
        Arc::new(MockGenerativeAI::new()),
        MockFetcher::new(),
    ))
}

fn save_body(tool_kind: &str, output_text: &str) -> Value {
    json!({
        "tool_kind": tool_kind,
        "input_data": { "subject": "a lone fox" },
        "output_text": output_text
    })
}

/// Save a generation and return the stored entry
async fn save_generation(app: axum::Router, token: &str, body: Value) -> Value {
    let (status, body) = TestRequest::post("/vault/save")
        .bearer(token)
        .json(body)
        .send(app)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    body["entry"].clone()
}

// ============================================================================
// Auth and validation (offline)
// ============================================================================

#[tokio::test]
async fn vault_routes_require_a_session() {
    let anonymous = [
        ("/vault/save", TestRequest::post("/vault/save").json(json!({}))),
        ("/vault/list", TestRequest::get("/vault/list")),
        ("/vault/share", TestRequest::post("/vault/share").json(json!({}))),
        ("/vault/delete", TestRequest::post("/vault/delete").json(json!({}))),
    ];

    for (uri, request) in anonymous {
        let (status, body) = request.send(offline_app()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri} let an anon in");
        assert_eq!(body["error"], "Unauthorized");
    }
}

#[tokio::test]
async fn save_rejects_missing_fields() {
    let token = mint_token(Uuid::new_v4());

    // No output text
    let (status, body) = TestRequest::post("/vault/save")
        .bearer(&token)
        .json(json!({ "tool_kind": "architect" }))
        .send(offline_app())
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");

    // No tool kind
    let (status, body) = TestRequest::post("/vault/save")
        .bearer(&token)
        .json(json!({ "output_text": "a prompt" }))
        .send(offline_app())
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");
}

#[tokio::test]
async fn share_requires_an_id() {
    let token = mint_token(Uuid::new_v4());

    let (status, body) = TestRequest::post("/vault/share")
        .bearer(&token)
        .json(json!({}))
        .send(offline_app())
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing ID");
}

// ============================================================================
// Save and list
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "requires docker"]
async fn save_then_list_roundtrip(harness: &mut TestHarness) {
    let user = Uuid::new_v4();
    let token = harness.token_for(user);

    let entry = save_generation(
        harness.app(),
        &token,
        save_body("architect", "THE PROMPT: a lone fox, rim light"),
    )
    .await;

    assert_eq!(entry["user_id"], json!(user));
    assert_eq!(entry["tool_kind"], "architect");
    assert_eq!(entry["input_data"]["subject"], "a lone fox");
    assert_eq!(entry["is_public"], false);

    let (status, body) = TestRequest::get("/vault/list")
        .bearer(&token)
        .send(harness.app())
        .await;

    assert_eq!(status, StatusCode::OK);
    let generations = body["generations"].as_array().expect("array");
    assert_eq!(generations.len(), 1);
    assert_eq!(generations[0]["id"], entry["id"]);

    // The save was also recorded in the user's activity history
    let (status, body) = TestRequest::get("/user/history")
        .bearer(&token)
        .send(harness.app())
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["activities"][0]["activity_type"], "vault_save");
    assert_eq!(body["activities"][0]["metadata"]["tool_kind"], "architect");
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "requires docker"]
async fn save_defaults_absent_input_to_an_empty_object(harness: &mut TestHarness) {
    let token = harness.token_for(Uuid::new_v4());

    let entry = save_generation(
        harness.app(),
        &token,
        json!({ "tool_kind": "deconstructor", "output_text": "a film still prompt" }),
    )
    .await;

    assert_eq!(entry["input_data"], json!({}));
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "requires docker"]
async fn list_is_scoped_to_the_owner(harness: &mut TestHarness) {
    let owner_token = harness.token_for(Uuid::new_v4());
    let other_token = harness.token_for(Uuid::new_v4());

    save_generation(harness.app(), &owner_token, save_body("architect", "hers")).await;

    let (status, body) = TestRequest::get("/vault/list")
        .bearer(&other_token)
        .send(harness.app())
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["generations"], json!([]));
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "requires docker"]
async fn list_returns_at_most_fifty(harness: &mut TestHarness) {
    let user = Uuid::new_v4();
    for i in 0..51 {
        Generation::insert(user, "architect", &json!({ "n": i }), "out", &harness.db_pool)
            .await
            .expect("fixture insert");
    }

    let (status, body) = TestRequest::get("/vault/list")
        .bearer(&harness.token_for(user))
        .send(harness.app())
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["generations"].as_array().expect("array").len(), 50);
}

// ============================================================================
// Sharing
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "requires docker"]
async fn share_flips_public_and_mints_a_link(harness: &mut TestHarness) {
    let user = Uuid::new_v4();
    let token = harness.token_for(user);

    let entry = save_generation(
        harness.app(),
        &token,
        save_body("deconstructor", "reverse engineered prompt"),
    )
    .await;
    let id = entry["id"].as_str().expect("id").to_string();

    // Private by default: the public fetch sees nothing
    let (status, _) = TestRequest::get(&format!("/share/{id}"))
        .send(harness.app())
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = TestRequest::post("/vault/share")
        .bearer(&token)
        .json(json!({ "id": id }))
        .send(harness.app())
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["is_public"], true);
    assert_eq!(body["url"], format!("{TEST_APP_BASE_URL}/share/{id}"));

    // Anyone can fetch it now, no session required
    let (status, body) = TestRequest::get(&format!("/share/{id}"))
        .send(harness.app())
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["output_text"], "reverse engineered prompt");
    assert_eq!(body["is_public"], true);

    // The share was recorded in the owner's history
    let (_, history) = TestRequest::get("/user/history?type=vault_share")
        .bearer(&token)
        .send(harness.app())
        .await;
    assert_eq!(history["total"], 1);
    assert_eq!(history["activities"][0]["metadata"]["generation_id"], id.as_str());
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "requires docker"]
async fn share_of_a_foreign_generation_is_not_found(harness: &mut TestHarness) {
    let owner_token = harness.token_for(Uuid::new_v4());
    let entry = save_generation(harness.app(), &owner_token, save_body("architect", "mine")).await;
    let id = entry["id"].as_str().expect("id").to_string();

    let (status, body) = TestRequest::post("/vault/share")
        .bearer(&harness.token_for(Uuid::new_v4()))
        .json(json!({ "id": id }))
        .send(harness.app())
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Generation not found");

    // And it stayed private
    let (status, _) = TestRequest::get(&format!("/share/{id}"))
        .send(harness.app())
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Deletion
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "requires docker"]
async fn delete_removes_own_generation(harness: &mut TestHarness) {
    let token = harness.token_for(Uuid::new_v4());
    let entry = save_generation(harness.app(), &token, save_body("architect", "gone soon")).await;

    let (status, body) = TestRequest::post("/vault/delete")
        .bearer(&token)
        .json(json!({ "id": entry["id"] }))
        .send(harness.app())
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, body) = TestRequest::get("/vault/list")
        .bearer(&token)
        .send(harness.app())
        .await;
    assert_eq!(body["generations"], json!([]));

    // Deleting again is still a success
    let (status, body) = TestRequest::post("/vault/delete")
        .bearer(&token)
        .json(json!({ "id": entry["id"] }))
        .send(harness.app())
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "requires docker"]
async fn delete_of_a_foreign_generation_leaves_it_in_place(harness: &mut TestHarness) {
    let owner_token = harness.token_for(Uuid::new_v4());
    let entry = save_generation(harness.app(), &owner_token, save_body("architect", "keep")).await;

    let (status, body) = TestRequest::post("/vault/delete")
        .bearer(&harness.token_for(Uuid::new_v4()))
        .json(json!({ "id": entry["id"] }))
        .send(harness.app())
        .await;

    // Not owning the row reads the same as it already being gone
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, body) = TestRequest::get("/vault/list")
        .bearer(&owner_token)
        .send(harness.app())
        .await;
    assert_eq!(body["generations"].as_array().expect("array").len(), 1);
}
