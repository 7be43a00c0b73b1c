use super::{CONTEXT, MEASURE_ID, TARGET_GROUP};
use crate::envelope::{Envelope, Payload};
use crate::model_event::ModelEvent;
use bon::bon;
use event_model_macros::model_event;
use serde_json::Value;

/// 请求部署某项措施
#[model_event(
    model_id = "measureRequested",
    category = Service,
    required = ["measureId", "targetGroup"]
)]
pub struct MeasureRequestedEvent;

#[bon]
impl MeasureRequestedEvent {
    #[builder(on(String, into))]
    pub fn new(
        #[builder(default = Envelope::generate_id())] id: String,
        measure_id: String,
        target_group: String,
        context: Option<Payload>,
    ) -> Self {
        let envelope = Envelope::new(id, Self::MODEL_ID, Self::CATEGORY)
            .with_entry(MEASURE_ID, Some(Value::String(measure_id)))
            .with_entry(TARGET_GROUP, Some(Value::String(target_group)))
            .with_entry(CONTEXT, context.map(Value::Object));
        Self { envelope }
    }

    pub fn measure_id(&self) -> Option<&str> {
        self.envelope.payload_str(MEASURE_ID)
    }

    pub fn target_group(&self) -> Option<&str> {
        self.envelope.payload_str(TARGET_GROUP)
    }

    /// 执行上下文，未设置时为 `None`
    pub fn context(&self) -> Option<&Payload> {
        self.envelope.payload_map(CONTEXT)
    }
}
