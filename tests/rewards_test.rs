mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use clickearn_service::policy;
use common::TestApp;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serial_test::serial;

async fn account_row(app: &TestApp, email: &str) -> entity::account::Model {
    entity::account::Entity::find()
        .filter(entity::account::Column::Email.eq(email))
        .one(&app.state.db)
        .await
        .unwrap()
        .unwrap()
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

#[serial]
#[tokio::test]
async fn catalog_endpoints_are_public() {
    let app = TestApp::new().await;

    let resp = app.get("/api/content", None).await;
    resp.assert_status(StatusCode::OK);
    let json: serde_json::Value = resp.json();
    assert_eq!(json["content"].as_array().unwrap().len(), 4);
    assert_eq!(json["content"][0]["reward_cents"], 50);

    let resp = app.get("/api/videos", None).await;
    resp.assert_status(StatusCode::OK);
    let json: serde_json::Value = resp.json();
    assert!(!json["videos"].as_array().unwrap().is_empty());
    assert_eq!(json["videos"][0]["minimum_watch_seconds"], 30);
}

// ─── Clicks ──────────────────────────────────────────────────────────────────

#[serial]
#[tokio::test]
async fn click_credits_balance() {
    let app = TestApp::new().await;
    let token = app.register_member("alice@test.com").await;

    let resp = app.click(&token, "content_1").await;
    resp.assert_status(StatusCode::OK);

    let json: serde_json::Value = resp.json();
    assert_eq!(json["credited_cents"], 50);
    assert_eq!(json["new_balance_cents"], 50);
    assert_eq!(json["clicks_remaining"], 19);

    let dash: serde_json::Value = app.get("/api/dashboard", Some(&token)).await.json();
    assert_eq!(dash["balance_cents"], 50);
    assert_eq!(dash["total_earned_cents"], 50);
    assert_eq!(dash["clicks_today"], 1);
    assert_eq!(dash["today_earnings_cents"], 50);
}

#[serial]
#[tokio::test]
async fn click_unknown_content() {
    let app = TestApp::new().await;
    let token = app.register_member("alice@test.com").await;

    let resp = app.click(&token, "content_999").await;
    resp.assert_status(StatusCode::NOT_FOUND);
}

#[serial]
#[tokio::test]
async fn click_requires_session() {
    let app = TestApp::new().await;

    app.post_json(
        "/api/click",
        None,
        &serde_json::json!({"content_id": "content_1"}),
    )
    .await
    .assert_status(StatusCode::UNAUTHORIZED);
}

#[serial]
#[tokio::test]
async fn click_quota_exhausts_at_daily_limit() {
    let app = TestApp::new().await;
    let token = app.register_member("alice@test.com").await;

    for _ in 0..policy::DAILY_CLICK_LIMIT {
        app.click(&token, "content_1")
            .await
            .assert_status(StatusCode::OK);
    }

    let resp = app.click(&token, "content_1").await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let json: serde_json::Value = resp.json();
    assert_eq!(json["error"], "quota_exceeded");

    let dash: serde_json::Value = app.get("/api/dashboard", Some(&token)).await.json();
    assert_eq!(dash["clicks_today"], 20);
    assert_eq!(dash["clicks_remaining"], 0);
    assert_eq!(dash["balance_cents"], 1_000);
}

#[serial]
#[tokio::test]
async fn concurrent_clicks_never_exceed_quota() {
    let app = Arc::new(TestApp::new().await);
    let token = app.register_member("alice@test.com").await;

    let mut handles = Vec::new();
    for _ in 0..25 {
        let app = Arc::clone(&app);
        let token = token.clone();
        handles.push(tokio::spawn(async move {
            app.click(&token, "content_1").await.status
        }));
    }

    let mut ok = 0;
    let mut quota = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::OK => ok += 1,
            StatusCode::BAD_REQUEST => quota += 1,
            other => panic!("unexpected status {other}"),
        }
    }

    assert_eq!(ok, 20);
    assert_eq!(quota, 5);

    let dash: serde_json::Value = app.get("/api/dashboard", Some(&token)).await.json();
    assert_eq!(dash["clicks_today"], 20);
    assert_eq!(dash["balance_cents"], 1_000);
    assert_eq!(dash["total_earned_cents"], 1_000);
}

#[serial]
#[tokio::test]
async fn day_boundary_resets_counters() {
    let app = TestApp::new().await;
    let token = app.register_member("alice@test.com").await;

    // Exhausted yesterday.
    let account = account_row(&app, "alice@test.com").await;
    let mut active: entity::account::ActiveModel = account.into();
    active.clicks_today = Set(policy::DAILY_CLICK_LIMIT);
    active.videos_today = Set(policy::DAILY_VIDEO_LIMIT);
    active.last_reset_date = Set(policy::local_today() - chrono::Duration::days(1));
    active.update(&app.state.db).await.unwrap();

    let resp = app.click(&token, "content_1").await;
    resp.assert_status(StatusCode::OK);

    let dash: serde_json::Value = app.get("/api/dashboard", Some(&token)).await.json();
    assert_eq!(dash["clicks_today"], 1);
    assert_eq!(dash["videos_today"], 0);
    assert_eq!(dash["clicks_remaining"], 19);
}

// ─── Videos ──────────────────────────────────────────────────────────────────

#[serial]
#[tokio::test]
async fn video_below_minimum_watch_fails() {
    let app = TestApp::new().await;
    let token = app.register_member("alice@test.com").await;

    let resp = app.complete_video(&token, "video_1", 29).await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let json: serde_json::Value = resp.json();
    assert_eq!(json["error"], "watch_too_short");

    let dash: serde_json::Value = app.get("/api/dashboard", Some(&token)).await.json();
    assert_eq!(dash["balance_cents"], 0);
    assert_eq!(dash["videos_today"], 0);
}

#[serial]
#[tokio::test]
async fn video_at_minimum_watch_succeeds() {
    let app = TestApp::new().await;
    let token = app.register_member("alice@test.com").await;

    let resp = app.complete_video(&token, "video_1", 30).await;
    resp.assert_status(StatusCode::OK);

    let json: serde_json::Value = resp.json();
    assert_eq!(json["credited_cents"], 75);
    assert_eq!(json["new_balance_cents"], 75);
    assert_eq!(json["videos_remaining"], 9);
}

#[serial]
#[tokio::test]
async fn video_quota_exhausts_at_daily_limit() {
    let app = TestApp::new().await;
    let token = app.register_member("alice@test.com").await;

    for _ in 0..policy::DAILY_VIDEO_LIMIT {
        app.complete_video(&token, "video_1", 45)
            .await
            .assert_status(StatusCode::OK);
    }

    let resp = app.complete_video(&token, "video_1", 45).await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let json: serde_json::Value = resp.json();
    assert_eq!(json["error"], "quota_exceeded");
}

#[serial]
#[tokio::test]
async fn exhausted_video_quota_outranks_short_watch() {
    let app = TestApp::new().await;
    let token = app.register_member("alice@test.com").await;

    let account = account_row(&app, "alice@test.com").await;
    let mut active: entity::account::ActiveModel = account.into();
    active.videos_today = Set(policy::DAILY_VIDEO_LIMIT);
    active.update(&app.state.db).await.unwrap();

    // Both rejections apply; the non-retryable one wins.
    let resp = app.complete_video(&token, "video_1", 5).await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let json: serde_json::Value = resp.json();
    assert_eq!(json["error"], "quota_exceeded");
}

#[serial]
#[tokio::test]
async fn video_unknown_id() {
    let app = TestApp::new().await;
    let token = app.register_member("alice@test.com").await;

    let resp = app.complete_video(&token, "video_999", 60).await;
    resp.assert_status(StatusCode::NOT_FOUND);
}

// ─── Dashboard ───────────────────────────────────────────────────────────────

#[serial]
#[tokio::test]
async fn dashboard_aggregates_activity() {
    let app = TestApp::new().await;
    let token = app.register_member("alice@test.com").await;

    app.click(&token, "content_1").await.assert_status(StatusCode::OK);
    app.click(&token, "content_2").await.assert_status(StatusCode::OK);
    app.complete_video(&token, "video_1", 40)
        .await
        .assert_status(StatusCode::OK);

    let dash: serde_json::Value = app.get("/api/dashboard", Some(&token)).await.json();
    assert_eq!(dash["balance_cents"], 175);
    assert_eq!(dash["total_earned_cents"], 175);
    assert_eq!(dash["clicks_today"], 2);
    assert_eq!(dash["videos_today"], 1);
    assert_eq!(dash["clicks_remaining"], 18);
    assert_eq!(dash["videos_remaining"], 9);
    assert_eq!(dash["today_earnings_cents"], 175);
    assert_eq!(dash["recent_activity"].as_array().unwrap().len(), 3);
}

#[serial]
#[tokio::test]
async fn every_credit_has_a_matching_event() {
    let app = TestApp::new().await;
    let token = app.register_member("alice@test.com").await;

    app.click(&token, "content_1").await.assert_status(StatusCode::OK);
    app.click(&token, "content_2").await.assert_status(StatusCode::OK);
    app.complete_video(&token, "video_3", 60)
        .await
        .assert_status(StatusCode::OK);

    // Credits and events commit together, so the event log always
    // reconciles with the ledger.
    let account = account_row(&app, "alice@test.com").await;
    let events = entity::reward_event::Entity::find()
        .filter(entity::reward_event::Column::AccountId.eq(account.id.as_str()))
        .all(&app.state.db)
        .await
        .unwrap();

    assert_eq!(events.len(), 3);
    let logged: i64 = events.iter().map(|e| e.amount_cents).sum();
    assert_eq!(logged, account.total_earned_cents);
    assert_eq!(logged, 200);
}
