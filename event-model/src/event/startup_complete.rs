use crate::envelope::Envelope;
use crate::model_event::ModelEvent;
use bon::bon;
use event_model_macros::model_event;

/// 所有服务初始化完成
#[model_event(model_id = "startupComplete", category = Service)]
pub struct StartupCompleteEvent;

#[bon]
impl StartupCompleteEvent {
    #[builder(on(String, into))]
    pub fn new(#[builder(default = Envelope::generate_id())] id: String) -> Self {
        Self {
            envelope: Envelope::new(id, Self::MODEL_ID, Self::CATEGORY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // 无必填键，载荷缺失也合法
    #[test]
    fn always_valid() {
        let c = json!({ "id": "s1", "modelId": "startupComplete" });
        let event = StartupCompleteEvent::parse(c.as_object().unwrap()).unwrap();
        assert_eq!(event.id(), "s1");
        assert!(event.payload().is_none());

        let c = json!({ "id": "s1", "modelId": "startupComplete", "payload": "whatever" });
        assert!(StartupCompleteEvent::parse(c.as_object().unwrap()).is_ok());
    }

    #[test]
    fn builder_generates_id() {
        let a = StartupCompleteEvent::builder().build();
        let b = StartupCompleteEvent::builder().build();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.payload().map(|p| p.len()), Some(0));
    }
}
