use event_model::{Category, ModelEvent, model_event};

#[model_event(model_id = "userOffline", category = User, required = ["userId", "sessionId"])]
#[derive(Debug)]
pub struct UserOfflineEvent;

fn main() {
    assert_eq!(UserOfflineEvent::MODEL_ID, "userOffline");
    assert_eq!(UserOfflineEvent::CATEGORY, Category::User);
    assert_eq!(UserOfflineEvent::REQUIRED_FIELDS, &["userId", "sessionId"]);

    let content = serde_json::json!({
        "id": "u1",
        "modelId": "userOffline",
        "payload": { "userId": "alice", "sessionId": "s-1" }
    });
    let event = UserOfflineEvent::parse(content.as_object().unwrap()).unwrap();
    assert_eq!(event.id(), "u1");
    assert_eq!(event.clone(), event);
}
