mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::{json, Value};

fn keys(fields: &Value) -> Vec<String> {
    fields.as_array().unwrap().iter().map(|f| f["key"].as_str().unwrap().to_string()).collect()
}

fn ids(questions: &Value) -> Vec<String> {
    questions.as_array().unwrap().iter().map(|q| q["id"].as_str().unwrap().to_string()).collect()
}

#[tokio::test]
async fn test_toggle_standard_fields() {
    let app = TestApp::new().await;
    let event_id = app.create_event("setup").await;
    let toggle = |key: &str| format!("/api/v1/events/{}/form-config/standard-fields/{}/toggle", event_id, key);

    let (code, body) = app.request("POST", &toggle("name"), None).await;
    assert_eq!(code, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("cannot be disabled"));

    let (code, _) = app.request("POST", &toggle("shoe_size"), None).await;
    assert_eq!(code, StatusCode::UNPROCESSABLE_ENTITY);

    let (code, body) = app.request("POST", &toggle("phone"), None).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["disabled"], true);
    assert_eq!(body["disabled_standard_fields"], json!(["phone"]));

    let (_, config) = app.request("GET", &format!("/api/v1/events/{}/form-config", event_id), None).await;
    assert_eq!(config["disabled_standard_fields"], json!(["phone"]));
    let phone = config["standard_fields"].as_array().unwrap().iter().find(|f| f["key"] == "phone").unwrap();
    assert_eq!(phone["active"], false);

    let (_, form) = app.request("GET", &format!("/api/v1/events/{}/form/public", event_id), None).await;
    assert_eq!(keys(&form["fields"]), vec!["name", "email", "date_of_birth", "gender", "interested_in", "bio"]);

    // Second toggle restores the original state.
    let (code, body) = app.request("POST", &toggle("phone"), None).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["disabled"], false);
    assert_eq!(body["disabled_standard_fields"], json!([]));

    let (_, event) = app.request("GET", &format!("/api/v1/events/{}", event_id), None).await;
    assert_eq!(event["settings"]["disabled_standard_fields"], json!([]));
}

#[tokio::test]
async fn test_add_question_validation() {
    let app = TestApp::new().await;
    let event_id = app.create_event("setup").await;

    let (code, body) = app.add_question(&event_id, json!({
        "label": "Favorite Hobby?",
        "kind": "single_select",
        "options": ["Reading"],
    })).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "insufficient options");

    // Blank options do not count towards the minimum.
    let (code, body) = app.add_question(&event_id, json!({
        "label": "Favorite Hobby?",
        "kind": "checkbox",
        "options": ["Reading", "   "],
    })).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "insufficient options");

    let (code, body) = app.add_question(&event_id, json!({ "label": "  ", "kind": "short_text" })).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing question text");

    let (code, body) = app.add_question(&event_id, json!({ "kind": "long_text" })).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing question text");

    let (_, list) = app.request("GET", &format!("/api/v1/events/{}/form-questions", event_id), None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_add_question_derives_key_and_order() {
    let app = TestApp::new().await;
    let event_id = app.create_event("setup").await;

    let (code, first) = app.add_question(&event_id, json!({
        "label": "Favorite Hobby?",
        "kind": "short_text",
    })).await;
    assert_eq!(code, StatusCode::CREATED);
    assert_eq!(first["question_key"], "favorite_hobby");
    assert_eq!(first["display_order"], 1);
    assert_eq!(first["is_required"], true);
    assert_eq!(first["is_active"], true);
    assert_eq!(first["options"], json!([]));

    // Same wording again: the derived key gets a suffix instead of colliding.
    let (code, second) = app.add_question(&event_id, json!({
        "label": "Favorite hobby",
        "kind": "radio",
        "options": ["Reading", "Hiking"],
    })).await;
    assert_eq!(code, StatusCode::CREATED);
    assert_eq!(second["question_key"], "favorite_hobby_2");
    assert_eq!(second["kind"], "single_select_visible");
    assert_eq!(second["display_order"], 2);

    // Explicit keys are taken as-is but must not collide.
    let (code, _) = app.add_question(&event_id, json!({
        "question_key": "favorite_hobby",
        "label": "Another one",
        "kind": "short_text",
    })).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);

    let (code, _) = app.add_question(&event_id, json!({
        "question_key": "email",
        "label": "Work email",
        "kind": "email",
    })).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);

    let (code, third) = app.add_question(&event_id, json!({
        "question_key": "height_cm",
        "label": "How tall are you?",
        "kind": "number",
        "options": ["ignored", "too"],
        "is_required": false,
    })).await;
    assert_eq!(code, StatusCode::CREATED);
    assert_eq!(third["question_key"], "height_cm");
    assert_eq!(third["options"], json!([]));
    assert_eq!(third["is_required"], false);
}

#[tokio::test]
async fn test_update_and_delete_question() {
    let app = TestApp::new().await;
    let event_id = app.create_event("setup").await;

    let (_, q) = app.add_question(&event_id, json!({ "label": "Star sign", "kind": "short_text" })).await;
    let q_url = format!("/api/v1/events/{}/form-questions/{}", event_id, q["id"].as_str().unwrap());

    // Switching to a selection kind without options fails and changes nothing.
    let (code, body) = app.request("PUT", &q_url, Some(json!({ "kind": "multi_select" }))).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "insufficient options");

    let (code, updated) = app.request("PUT", &q_url, Some(json!({
        "label": "Your star sign",
        "kind": "multi_select",
        "options": ["Aries", "Leo", "Virgo"],
        "is_active": false,
    }))).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(updated["label"], "Your star sign");
    assert_eq!(updated["question_key"], "star_sign");
    assert_eq!(updated["options"], json!(["Aries", "Leo", "Virgo"]));
    assert_eq!(updated["is_active"], false);

    let (code, _) = app.request("PUT", &q_url, Some(json!({ "label": "" }))).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);

    let (_, public) = app.request("GET", &format!("/api/v1/events/{}/form-questions/public", event_id), None).await;
    assert!(public.as_array().unwrap().is_empty());

    let (code, _) = app.request("DELETE", &q_url, None).await;
    assert_eq!(code, StatusCode::OK);
    let (code, _) = app.request("GET", &q_url, None).await;
    assert_eq!(code, StatusCode::NOT_FOUND);
    let (code, _) = app.request("DELETE", &q_url, None).await;
    assert_eq!(code, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_leaves_order_gaps() {
    let app = TestApp::new().await;
    let event_id = app.create_event("setup").await;

    let mut created = Vec::new();
    for label in ["One", "Two", "Three"] {
        let (_, q) = app.add_question(&event_id, json!({ "label": label, "kind": "short_text" })).await;
        created.push(q["id"].as_str().unwrap().to_string());
    }

    app.request("DELETE", &format!("/api/v1/events/{}/form-questions/{}", event_id, created[1]), None).await;

    let (_, list) = app.request("GET", &format!("/api/v1/events/{}/form-questions", event_id), None).await;
    let orders: Vec<i64> = list.as_array().unwrap().iter().map(|q| q["display_order"].as_i64().unwrap()).collect();
    assert_eq!(orders, vec![1, 3]);
}

#[tokio::test]
async fn test_reorder_round_trip() {
    let app = TestApp::new().await;
    let event_id = app.create_event("setup").await;
    let reorder_url = format!("/api/v1/events/{}/form-questions/reorder", event_id);

    let (_, q1) = app.add_question(&event_id, json!({ "label": "First", "kind": "short_text" })).await;
    let (_, q2) = app.add_question(&event_id, json!({ "label": "Second", "kind": "short_text" })).await;
    let id1 = q1["id"].as_str().unwrap().to_string();
    let id2 = q2["id"].as_str().unwrap().to_string();

    let (code, reordered) = app.request("PUT", &reorder_url, Some(json!({ "question_ids": [id2, id1] }))).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(ids(&reordered), vec![id2.clone(), id1.clone()]);

    let (_, list) = app.request("GET", &format!("/api/v1/events/{}/form-questions", event_id), None).await;
    assert_eq!(ids(&list), vec![id2.clone(), id1.clone()]);
    assert_eq!(list[0]["display_order"], 1);
    assert_eq!(list[1]["display_order"], 2);

    // Partial, padded and duplicated sets are all rejected without touching the order.
    for bad in [json!([id1]), json!([id1, id2, "ghost"]), json!([id1, id1])] {
        let (code, _) = app.request("PUT", &reorder_url, Some(json!({ "question_ids": bad }))).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
    }

    let (_, list) = app.request("GET", &format!("/api/v1/events/{}/form-questions", event_id), None).await;
    assert_eq!(ids(&list), vec![id2, id1]);
}

#[tokio::test]
async fn test_move_adjacent() {
    let app = TestApp::new().await;
    let event_id = app.create_event("setup").await;

    let mut created = Vec::new();
    for label in ["A", "B", "C"] {
        let (_, q) = app.add_question(&event_id, json!({ "label": label, "kind": "short_text" })).await;
        created.push(q["id"].as_str().unwrap().to_string());
    }
    let move_url = |id: &str| format!("/api/v1/events/{}/form-questions/{}/move", event_id, id);

    let (code, list) = app.request("POST", &move_url(&created[2]), Some(json!({ "direction": "up" }))).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(ids(&list), vec![created[0].clone(), created[2].clone(), created[1].clone()]);
    let orders: Vec<i64> = list.as_array().unwrap().iter().map(|q| q["display_order"].as_i64().unwrap()).collect();
    assert_eq!(orders, vec![1, 2, 3]);

    // Boundaries are no-ops.
    let (code, list) = app.request("POST", &move_url(&created[0]), Some(json!({ "direction": "up" }))).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(ids(&list)[0], created[0]);

    let (_, list) = app.request("POST", &move_url(&created[1]), Some(json!({ "direction": "down" }))).await;
    assert_eq!(ids(&list)[2], created[1]);

    let (code, _) = app.request("POST", &move_url("missing"), Some(json!({ "direction": "down" }))).await;
    assert_eq!(code, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_builder_and_preview_forms() {
    let app = TestApp::new().await;
    let event_id = app.create_event("setup").await;

    app.request("POST", &format!("/api/v1/events/{}/form-config/standard-fields/bio/toggle", event_id), None).await;
    app.add_question(&event_id, json!({
        "label": "Drink of choice",
        "kind": "checkbox",
        "options": ["Wine", "Beer", "Tea"],
    })).await;
    app.add_question(&event_id, json!({ "label": "Old question", "kind": "short_text", "is_active": false })).await;

    let (code, builder) = app.request("GET", &format!("/api/v1/events/{}/form/builder", event_id), None).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(builder["mode"], "builder");
    let fields = builder["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 9);
    let bio = fields.iter().find(|f| f["key"] == "bio").unwrap();
    assert_eq!(bio["active"], false);
    assert_eq!(bio["widget"], "text_area");

    let (_, preview) = app.request("GET", &format!("/api/v1/events/{}/form/preview", event_id), None).await;
    assert_eq!(
        keys(&preview["fields"]),
        vec!["name", "email", "phone", "date_of_birth", "gender", "interested_in", "drink_of_choice"]
    );
    let drink = &preview["fields"][6];
    assert_eq!(drink["widget"], "checkbox_group");
    assert_eq!(drink["options"], json!(["Wine", "Beer", "Tea"]));
    assert_eq!(drink["origin"], "custom");

    let gender = &preview["fields"][4];
    assert_eq!(gender["widget"], "dropdown");
    assert_eq!(gender["multiple"], false);
    assert_eq!(gender["label"], "I am");

    let (_, public) = app.request("GET", &format!("/api/v1/events/{}/form/public", event_id), None).await;
    assert_eq!(keys(&public["fields"]), keys(&preview["fields"]));
    assert_eq!(public["event"]["id"], event_id.as_str());
}
