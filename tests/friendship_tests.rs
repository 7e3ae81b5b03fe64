mod common;

use axum::http::StatusCode;
use common::{register, send, spawn_app};
use serde_json::json;

#[tokio::test]
async fn test_alice_and_bob_become_friends_then_part() {
    let app = spawn_app().await;
    let alice = register(&app, "alice", "p1").await;
    let bob = register(&app, "bob", "p2").await;

    let (status, body) = send(
        &app,
        "POST",
        "/friendships",
        Some(json!({ "fromUserId": alice, "toUserId": bob })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "PENDING");
    assert_eq!(body["requesterId"], alice.as_str());
    assert_eq!(body["recipientId"], bob.as_str());

    let (status, body) = send(&app, "GET", &format!("/friendships/incoming/{bob}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let incoming = body.as_array().unwrap();
    assert_eq!(incoming.len(), 1);
    assert_eq!(incoming[0]["requester"]["id"], alice.as_str());
    assert_eq!(incoming[0]["requester"]["username"], "alice");
    let request_id = incoming[0]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/friendships/{request_id}"),
        Some(json!({ "accept": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Friend request accepted");
    assert_eq!(body["friendship"]["status"], "ACCEPTED");

    let (status, body) = send(&app, "GET", &format!("/friendships/{alice}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "id": bob, "username": "bob" }]));

    let (status, body) = send(
        &app,
        "DELETE",
        "/friendships",
        Some(json!({ "userId": alice, "friendId": bob })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Friend removed");

    let (_, body) = send(&app, "GET", &format!("/friendships/{alice}"), None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_self_request_is_rejected() {
    let app = spawn_app().await;
    let alice = register(&app, "alice", "p1").await;

    let (status, body) = send(
        &app,
        "POST",
        "/friendships",
        Some(json!({ "fromUserId": alice, "toUserId": alice })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "You can't add yourself");
}

#[tokio::test]
async fn test_duplicate_request_in_reverse_is_rejected() {
    let app = spawn_app().await;
    let alice = register(&app, "alice", "p1").await;
    let bob = register(&app, "bob", "p2").await;

    let (status, _) = send(
        &app,
        "POST",
        "/friendships",
        Some(json!({ "fromUserId": alice, "toUserId": bob })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    for (from, to) in [(&alice, &bob), (&bob, &alice)] {
        let (status, body) = send(
            &app,
            "POST",
            "/friendships",
            Some(json!({ "fromUserId": from, "toUserId": to })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Friendship already exists or pending");
    }
}

#[tokio::test]
async fn test_respond_edge_cases() {
    let app = spawn_app().await;
    let alice = register(&app, "alice", "p1").await;
    let bob = register(&app, "bob", "p2").await;

    let (status, _) = send(
        &app,
        "PATCH",
        "/friendships/does-not-exist",
        Some(json!({ "accept": true })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, created) = send(
        &app,
        "POST",
        "/friendships",
        Some(json!({ "fromUserId": alice, "toUserId": bob })),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/friendships/{id}"),
        Some(json!({ "accept": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Friend request rejected");

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/friendships/{id}"),
        Some(json!({ "accept": true })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "invalid_state");

    let (_, body) = send(&app, "GET", &format!("/friendships/{bob}"), None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_remove_unknown_pair_is_ok() {
    let app = spawn_app().await;
    let alice = register(&app, "alice", "p1").await;

    let (status, body) = send(
        &app,
        "DELETE",
        "/friendships",
        Some(json!({ "userId": alice, "friendId": "nobody" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Friend removed");
}

#[tokio::test]
async fn test_outgoing_requests_listed_for_requester() {
    let app = spawn_app().await;
    let alice = register(&app, "alice", "p1").await;
    let bob = register(&app, "bob", "p2").await;

    send(
        &app,
        "POST",
        "/friendships",
        Some(json!({ "fromUserId": alice, "toUserId": bob })),
    )
    .await;

    let (status, body) = send(&app, "GET", &format!("/friendships/outgoing/{alice}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let outgoing = body.as_array().unwrap();
    assert_eq!(outgoing.len(), 1);
    assert_eq!(outgoing[0]["recipient"]["username"], "bob");
}

#[tokio::test]
async fn test_padded_ids_resolve_on_every_endpoint() {
    let app = spawn_app().await;
    let alice = register(&app, "alice", "p1").await;
    let bob = register(&app, "bob", "p2").await;

    let (status, created) = send(
        &app,
        "POST",
        "/friendships",
        Some(json!({ "fromUserId": format!(" {alice} "), "toUserId": format!("{bob}\t") })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["requesterId"], alice.as_str());

    let (_, incoming) = send(&app, "GET", &format!("/friendships/incoming/%20{bob}"), None).await;
    assert_eq!(incoming.as_array().unwrap().len(), 1);

    let id = created["id"].as_str().unwrap();
    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/friendships/{id}%20"),
        Some(json!({ "accept": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, friends) = send(&app, "GET", &format!("/friendships/%20{alice}%20"), None).await;
    assert_eq!(friends, json!([{ "id": bob, "username": "bob" }]));

    let (status, _) = send(
        &app,
        "DELETE",
        "/friendships",
        Some(json!({ "userId": format!(" {alice}"), "friendId": format!("{bob} ") })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, friends) = send(&app, "GET", &format!("/friendships/{alice}"), None).await;
    assert_eq!(friends, json!([]));
}

#[tokio::test]
async fn test_blank_ids_are_rejected() {
    let app = spawn_app().await;

    let (status, body) = send(
        &app,
        "DELETE",
        "/friendships",
        Some(json!({ "userId": "   ", "friendId": "someone" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "userId cannot be empty");

    let (status, _) = send(&app, "GET", "/friendships/%20%20", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
