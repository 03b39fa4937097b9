use super::*;
use crate::test_helpers::MockBackend;

#[test]
fn daily_log_defaults_are_neutral() {
    let log = DailyLog::new(true);
    assert_eq!(
        serde_json::to_value(&log).unwrap(),
        json!({
            "stayed_clean": true,
            "actions_completed": [],
            "habits_completed": [],
            "mood": 5,
            "cravings_level": 5
        })
    );
}

#[tokio::test]
async fn log_day_posts_notes_when_present() {
    let backend = MockBackend::start().await;
    backend.respond("POST", "/api/challenge/log", 200, json!({"success": true}));
    let (api, _) = backend.client(Some("T"));
    let log = DailyLog { notes: Some("día difícil"), mood: 3, ..DailyLog::new(false) };

    log_day(&api, &log).await.unwrap();

    let body = backend.last().json();
    assert_eq!(body["stayed_clean"], false);
    assert_eq!(body["mood"], 3);
    assert_eq!(body["notes"], "día difícil");
}

#[tokio::test]
async fn start_without_goal_sends_null() {
    let backend = MockBackend::start().await;
    backend.respond("POST", "/api/challenge/start", 200, json!({"challenge_id": "ch_1"}));
    let (api, _) = backend.client(Some("T"));

    let body = start(&api, None).await.unwrap();

    assert_eq!(body["challenge_id"], "ch_1");
    assert_eq!(backend.last().json(), json!({"goal": null}));
}
