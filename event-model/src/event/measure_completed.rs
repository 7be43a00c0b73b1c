use super::{CONTEXT, MEASURE_ID, TARGET_GROUP};
use crate::envelope::{Envelope, Payload};
use crate::model_event::ModelEvent;
use bon::bon;
use event_model_macros::model_event;
use serde_json::Value;

/// 某项措施执行完成
#[model_event(model_id = "measureCompleted", category = Service, required = ["measureId"])]
pub struct MeasureCompletedEvent;

#[bon]
impl MeasureCompletedEvent {
    #[builder(on(String, into))]
    pub fn new(
        #[builder(default = Envelope::generate_id())] id: String,
        measure_id: String,
        target_group: Option<String>,
        context: Option<Payload>,
    ) -> Self {
        let envelope = Envelope::new(id, Self::MODEL_ID, Self::CATEGORY)
            .with_entry(MEASURE_ID, Some(Value::String(measure_id)))
            .with_entry(TARGET_GROUP, target_group.map(Value::String))
            .with_entry(CONTEXT, context.map(Value::Object));
        Self { envelope }
    }

    pub fn measure_id(&self) -> Option<&str> {
        self.envelope.payload_str(MEASURE_ID)
    }

    /// 目标群组，未设置时为 `None`
    pub fn target_group(&self) -> Option<&str> {
        self.envelope.payload_str(TARGET_GROUP)
    }

    pub fn context(&self) -> Option<&Payload> {
        self.envelope.payload_map(CONTEXT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::Content;
    use crate::error::EventError;
    use serde_json::json;

    fn content(value: Value) -> Content {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn missing_measure_id_fails() {
        let c = content(json!({ "id": "e2", "modelId": "measureCompleted", "payload": {} }));
        assert_eq!(
            MeasureCompletedEvent::parse(&c).unwrap_err(),
            EventError::MissingField {
                field: "measureId".into()
            }
        );
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let c = content(json!({
            "id": "e2",
            "modelId": "measureCompleted",
            "payload": { "measureId": "m1", "extra": true }
        }));
        let event = MeasureCompletedEvent::parse(&c).unwrap();
        assert_eq!(event.measure_id(), Some("m1"));
        assert_eq!(event.target_group(), None);
        assert_eq!(event.context(), None);
    }

    // None 的可选参数不写入载荷
    #[test]
    fn builder_skips_absent_optionals() {
        let event = MeasureCompletedEvent::builder()
            .measure_id("m1")
            .maybe_target_group(None::<String>)
            .build();
        let payload = event.payload().unwrap();
        assert_eq!(payload.len(), 1);
        assert!(!payload.contains_key("targetGroup"));
        assert!(!event.id().is_empty());
    }
}
