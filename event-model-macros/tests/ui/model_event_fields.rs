use event_model::{Envelope, EventResult, ModelEvent, model_event};

#[model_event(
    model_id = "machineStateChanged",
    category = Machine,
    required = ["machineId", "state"],
    parse_with = Self::hydrate
)]
pub struct MachineStateChangedEvent {
    pub state: String,
}

impl MachineStateChangedEvent {
    fn hydrate(envelope: Envelope) -> EventResult<Self> {
        let state = envelope.payload_str("state").unwrap_or_default().to_string();
        Ok(Self { envelope, state })
    }
}

fn main() {
    let content = serde_json::json!({
        "id": "m1",
        "modelId": "machineStateChanged",
        "payload": { "machineId": "press-7", "state": "RUNNING" }
    });
    let event = MachineStateChangedEvent::parse(content.as_object().unwrap()).unwrap();
    assert_eq!(event.state, "RUNNING");
    assert_eq!(event.into_envelope().model_id(), "machineStateChanged");
}
