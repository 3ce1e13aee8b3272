//! End-to-end API tests over the in-memory store and mock AI.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use mindful_core::domains::chat::prompts::SYSTEM_PROMPT;
use mindful_core::domains::chat::ChatMessage;
use mindful_core::domains::forum::{ForumPost, DEFAULT_CHANNELS};
use mindful_core::domains::safety::{CrisisAlert, CRISIS_KEYWORDS};
use mindful_core::kernel::{ChatStore, FailingAI, ForumStore, MockAI};
use openai_client::Message;
use serde_json::{json, Value};

use crate::common::{is_pseudonym, TestApp};

fn timestamp(value: &Value) -> DateTime<Utc> {
    serde_json::from_value(value["timestamp"].clone()).expect("RFC 3339 timestamp")
}

// =============================================================================
// Liveness
// =============================================================================

#[tokio::test]
async fn root_reports_running() {
    let app = TestApp::new();

    for uri in ["/api", "/api/"] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Mindful Mind API is running");
    }
}

#[tokio::test]
async fn health_reports_database_ok() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "ok");
}

// =============================================================================
// Chat
// =============================================================================

#[tokio::test]
async fn ordinary_message_is_not_flagged() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json(
            "/api/chat",
            json!({"session_id": "s-calm", "message": "I've been feeling anxious about exams"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_crisis"], false);
    assert!(body["response"].as_str().unwrap().len() > 10);
    assert!(body["id"].as_str().is_some());
    timestamp(&body);

    let (_, alerts) = app.get("/api/admin/crisis-alerts").await;
    assert_eq!(alerts, json!([]));
    assert_eq!(app.store.alert_count().await, 0);
}

#[tokio::test]
async fn crisis_message_is_flagged_and_alerted() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json(
            "/api/chat",
            json!({"session_id": "s-risk", "message": "I want to kill myself"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_crisis"], true);
    let response = body["response"].as_str().unwrap();
    assert!(response.starts_with(MockAI::DEFAULT_RESPONSE));
    assert!(response.contains("988"));
    assert!(response.contains("crisis"));

    let (status, alerts) = app.get("/api/admin/crisis-alerts").await;
    assert_eq!(status, StatusCode::OK);
    let alerts = alerts.as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["session_id"], "s-risk");
    assert_eq!(alerts[0]["message"], "I want to kill myself");
    assert_eq!(alerts[0]["status"], "open");
}

#[tokio::test]
async fn every_crisis_phrase_is_flagged_regardless_of_case() {
    let app = TestApp::new();

    for (i, keyword) in CRISIS_KEYWORDS.iter().enumerate() {
        let message = format!("lately I keep thinking {}", keyword.to_uppercase());
        let (status, body) = app
            .post_json(
                "/api/chat",
                json!({"session_id": format!("s-{i}"), "message": message}),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_crisis"], true, "{keyword} was not flagged");
        assert!(body["response"].as_str().unwrap().contains("988"));
    }

    let (_, alerts) = app.get("/api/admin/crisis-alerts").await;
    assert_eq!(alerts.as_array().unwrap().len(), CRISIS_KEYWORDS.len());
}

#[tokio::test]
async fn alerts_are_listed_newest_first() {
    let app = TestApp::new();

    for session in ["first", "second", "third"] {
        app.post_json(
            "/api/chat",
            json!({"session_id": session, "message": "I feel like ending it all"}),
        )
        .await;
    }

    let (_, alerts) = app.get("/api/admin/crisis-alerts").await;
    let sessions: Vec<&str> = alerts
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["session_id"].as_str().unwrap())
        .collect();
    assert_eq!(sessions, ["third", "second", "first"]);
}

#[tokio::test]
async fn submitted_turns_round_trip_through_history() {
    let mock = MockAI::new()
        .with_response("That sounds stressful. What part worries you most?")
        .with_response("Breaking revision into small blocks can help.");
    let app = TestApp::with_ai(Arc::new(mock));

    let (_, first) = app
        .post_json(
            "/api/chat",
            json!({"session_id": "s-round", "message": "Exams are next week"}),
        )
        .await;
    let (_, second) = app
        .post_json(
            "/api/chat",
            json!({"session_id": "s-round", "message": "Mostly chemistry"}),
        )
        .await;
    app.post_json(
        "/api/chat",
        json!({"session_id": "s-other", "message": "Unrelated session"}),
    )
    .await;

    let (status, history) = app.get("/api/chat/history/s-round").await;
    assert_eq!(status, StatusCode::OK);

    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["message"], "Exams are next week");
    assert_eq!(history[0]["response"], first["response"]);
    assert_eq!(history[0]["id"], first["id"]);
    assert_eq!(history[1]["message"], "Mostly chemistry");
    assert_eq!(history[1]["response"], second["response"]);
    assert_eq!(history[1]["timestamp"], second["timestamp"]);
    assert!(timestamp(&history[0]) <= timestamp(&history[1]));
    assert_eq!(history[1]["session_id"], "s-round");
    assert_eq!(history[1]["is_crisis"], false);
}

#[tokio::test]
async fn prior_turns_are_sent_to_the_provider() {
    let mock = Arc::new(MockAI::new().with_response("First reply from the assistant"));
    let app = TestApp::with_ai(mock.clone());

    app.post_json(
        "/api/chat",
        json!({"session_id": "s-ctx", "message": "Hello there"}),
    )
    .await;
    app.post_json(
        "/api/chat",
        json!({"session_id": "s-ctx", "message": "Still here"}),
    )
    .await;

    let calls = mock.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].session_id, "s-ctx");
    assert_eq!(
        calls[1].messages,
        vec![
            Message::system(SYSTEM_PROMPT),
            Message::user("Hello there"),
            Message::assistant("First reply from the assistant"),
            Message::user("Still here"),
        ]
    );
}

#[tokio::test]
async fn unknown_session_has_empty_history() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/chat/history/never-used").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn provider_failure_is_a_generic_server_error() {
    let app = TestApp::with_ai(Arc::new(FailingAI::new(
        "upstream returned 503: model overloaded",
    )));

    let (status, body) = app
        .post_json(
            "/api/chat",
            json!({"session_id": "s-fail", "message": "I want to die"}),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"detail": "Chat service error"}));
    assert_eq!(app.store.message_count().await, 0);
    assert_eq!(app.store.alert_count().await, 0);
}

#[tokio::test]
async fn malformed_chat_bodies_are_rejected() {
    let app = TestApp::new();

    let (status, body) = app.post_raw("/api/chat", "{not json").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());

    let (status, body) = app
        .post_json("/api/chat", json!({"session_id": "s-missing"}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());

    let (status, _) = app
        .post_json("/api/chat", json!({"session_id": "s-blank", "message": "   "}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(app.store.message_count().await, 0);
}

#[tokio::test]
async fn blank_session_id_is_rejected() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json("/api/chat", json!({"session_id": "", "message": "hi"}))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({"detail": "session_id must not be empty"}));
    assert_eq!(app.store.message_count().await, 0);
}

#[tokio::test]
async fn chat_write_failure_is_a_generic_server_error() {
    let app = TestApp::read_only();

    let (status, body) = app
        .post_json(
            "/api/chat",
            json!({"session_id": "s-ro", "message": "I want to die"}),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"detail": "Chat service error"}));
    assert_eq!(app.store.message_count().await, 0);
    assert_eq!(app.store.alert_count().await, 0);
}

#[tokio::test]
async fn history_keeps_the_oldest_thousand_turns() {
    let app = TestApp::new();
    let start = Utc::now();
    for i in 0..1005 {
        let mut turn = ChatMessage::new("s-long", format!("m{i}"), "reply", false);
        turn.timestamp = start + Duration::milliseconds(i);
        app.store.record_turn(&turn, None).await.unwrap();
    }

    let (status, history) = app.get("/api/chat/history/s-long").await;

    assert_eq!(status, StatusCode::OK);
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 1000);
    assert_eq!(history[0]["message"], "m0");
    assert_eq!(history[999]["message"], "m999");
}

#[tokio::test]
async fn alerts_keep_the_newest_hundred() {
    let app = TestApp::new();
    let start = Utc::now();
    for i in 0..105 {
        let session = format!("s{i}");
        let turn = ChatMessage::new(&session, "I want to die", "reply", true);
        let mut alert = CrisisAlert::open(&session, "I want to die");
        alert.timestamp = start + Duration::seconds(i);
        app.store.record_turn(&turn, Some(&alert)).await.unwrap();
    }

    let (status, alerts) = app.get("/api/admin/crisis-alerts").await;

    assert_eq!(status, StatusCode::OK);
    let alerts = alerts.as_array().unwrap();
    assert_eq!(alerts.len(), 100);
    assert_eq!(alerts[0]["session_id"], "s104");
    assert_eq!(alerts[99]["session_id"], "s5");
}

// =============================================================================
// Forum
// =============================================================================

#[tokio::test]
async fn default_channels_are_always_listed() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/forum/channels").await;

    assert_eq!(status, StatusCode::OK);
    let channels: Vec<&str> = body["channels"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.as_str().unwrap())
        .collect();
    for default in DEFAULT_CHANNELS {
        assert!(channels.contains(default), "missing {default}");
    }
    assert_eq!(channels.len(), DEFAULT_CHANNELS.len());
}

#[tokio::test]
async fn posting_to_a_new_channel_creates_it() {
    let app = TestApp::new();

    app.post_json(
        "/api/forum/sleep",
        json!({"title": "Can't sleep", "content": "Up at 3am again"}),
    )
    .await;
    app.post_json(
        "/api/forum/general",
        json!({"title": "Hi", "content": "New here"}),
    )
    .await;

    let (_, body) = app.get("/api/forum/channels").await;
    let channels = body["channels"].as_array().unwrap();
    assert!(channels.contains(&json!("sleep")));
    assert_eq!(channels.len(), DEFAULT_CHANNELS.len() + 1);
}

#[tokio::test]
async fn post_without_author_gets_pseudonym() {
    let app = TestApp::new();

    let (status, post) = app
        .post_json(
            "/api/forum/anxiety",
            json!({"title": "Presentations", "content": "My hands shake every time"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(post["channel"], "anxiety");
    assert_eq!(post["title"], "Presentations");
    assert_eq!(post["replies"], json!([]));
    let author = post["author"].as_str().unwrap();
    assert!(is_pseudonym(author), "unexpected author {author}");
}

#[tokio::test]
async fn blank_author_gets_pseudonym_and_explicit_author_is_kept() {
    let app = TestApp::new();

    let (_, blank) = app
        .post_json(
            "/api/forum/general",
            json!({"title": "t", "content": "c", "author": ""}),
        )
        .await;
    assert!(is_pseudonym(blank["author"].as_str().unwrap()));

    let (_, named) = app
        .post_json(
            "/api/forum/general",
            json!({"title": "t", "content": "c", "author": "Jordan"}),
        )
        .await;
    assert_eq!(named["author"], "Jordan");
}

#[tokio::test]
async fn posts_are_listed_newest_first_per_channel() {
    let app = TestApp::new();

    for title in ["one", "two", "three"] {
        app.post_json(
            "/api/forum/study-stress",
            json!({"title": title, "content": "content"}),
        )
        .await;
    }
    app.post_json(
        "/api/forum/depression",
        json!({"title": "elsewhere", "content": "content"}),
    )
    .await;

    let (status, posts) = app.get("/api/forum/study-stress").await;
    assert_eq!(status, StatusCode::OK);

    let posts = posts.as_array().unwrap();
    let titles: Vec<&str> = posts.iter().map(|p| p["title"].as_str().unwrap()).collect();
    assert_eq!(titles, ["three", "two", "one"]);
    for pair in posts.windows(2) {
        assert!(timestamp(&pair[0]) >= timestamp(&pair[1]));
    }
}

#[tokio::test]
async fn blank_post_fields_are_rejected() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json("/api/forum/general", json!({"title": " ", "content": "c"}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("title"));

    let (status, _) = app
        .post_json("/api/forum/general", json!({"title": "t"}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(app.store.post_count().await, 0);
}

#[tokio::test]
async fn replies_are_appended_in_order() {
    let app = TestApp::new();

    let (_, post) = app
        .post_json(
            "/api/forum/relationships",
            json!({"title": "Roommate", "content": "We keep arguing"}),
        )
        .await;
    let post_id = post["id"].as_str().unwrap();
    let uri = format!("/api/forum/relationships/{post_id}/reply");

    let (status, first) = app
        .post_json(&uri, json!({"content": "Have you tried a house meeting?"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(is_pseudonym(first["author"].as_str().unwrap()));

    let (_, second) = app
        .post_json(&uri, json!({"content": "Same thing here", "author": "Riley"}))
        .await;
    assert_eq!(second["author"], "Riley");

    let (_, posts) = app.get("/api/forum/relationships").await;
    let replies = posts[0]["replies"].as_array().unwrap();
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0]["id"], first["id"]);
    assert_eq!(replies[1]["id"], second["id"]);
    assert!(timestamp(&replies[0]) <= timestamp(&replies[1]));
}

#[tokio::test]
async fn reply_to_missing_post_is_not_found() {
    let app = TestApp::new();

    let (_, post) = app
        .post_json("/api/forum/general", json!({"title": "t", "content": "c"}))
        .await;
    let post_id = post["id"].as_str().unwrap();
    let unknown = uuid::Uuid::now_v7();

    let targets = [
        format!("/api/forum/general/{unknown}/reply"),
        format!("/api/forum/anxiety/{post_id}/reply"),
        "/api/forum/general/not-a-uuid/reply".to_string(),
    ];
    for uri in targets {
        let (status, body) = app.post_json(&uri, json!({"content": "hello?"})).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, json!({"detail": "Post not found"}));
    }

    assert_eq!(app.store.reply_count().await, 0);
}

#[tokio::test]
async fn blank_reply_content_is_rejected() {
    let app = TestApp::new();

    let (_, post) = app
        .post_json("/api/forum/general", json!({"title": "t", "content": "c"}))
        .await;
    let uri = format!("/api/forum/general/{}/reply", post["id"].as_str().unwrap());

    let (status, body) = app.post_json(&uri, json!({"content": "  "})).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({"detail": "content must not be empty"}));
    assert_eq!(app.store.reply_count().await, 0);
}

#[tokio::test]
async fn channel_named_channels_accepts_posts_and_replies() {
    let app = TestApp::new();

    let (status, post) = app
        .post_json(
            "/api/forum/channels",
            json!({"title": "Meta", "content": "Which channel is this?"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(post["channel"], "channels");
    assert!(is_pseudonym(post["author"].as_str().unwrap()));

    let uri = format!("/api/forum/channels/{}/reply", post["id"].as_str().unwrap());
    let (status, _) = app.post_json(&uri, json!({"content": "This one"})).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get("/api/forum/channels").await;
    assert!(body["channels"]
        .as_array()
        .unwrap()
        .contains(&json!("channels")));
    assert_eq!(app.store.reply_count().await, 1);
}

#[tokio::test]
async fn posts_keep_the_newest_hundred() {
    let app = TestApp::new();
    let start = Utc::now();
    for i in 0..105 {
        let mut post = ForumPost::new("general", format!("t{i}"), "c", "Seeker_101");
        post.timestamp = start + Duration::seconds(i);
        app.store.insert_post(&post).await.unwrap();
    }

    let (status, posts) = app.get("/api/forum/general").await;

    assert_eq!(status, StatusCode::OK);
    let posts = posts.as_array().unwrap();
    assert_eq!(posts.len(), 100);
    assert_eq!(posts[0]["title"], "t104");
    assert_eq!(posts[99]["title"], "t5");
}

#[tokio::test]
async fn forum_write_failures_are_generic_server_errors() {
    let app = TestApp::read_only();
    let post = ForumPost::new("general", "Existing", "c", "Seeker_101");
    app.store.insert_post(&post).await.unwrap();

    let (status, body) = app
        .post_json("/api/forum/general", json!({"title": "t", "content": "c"}))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"detail": "Failed to create forum post"}));

    let (status, body) = app
        .post_json(
            &format!("/api/forum/general/{}/reply", post.id),
            json!({"content": "hello"}),
        )
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"detail": "Failed to add reply"}));

    assert_eq!(app.store.post_count().await, 1);
    assert_eq!(app.store.reply_count().await, 0);
}
