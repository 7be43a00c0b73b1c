use super::field::Field;
use crate::envelope::{Envelope, Payload};
use crate::error::{EventError, EventResult};
use crate::model_event::ModelEvent;
use bon::bon;
use event_model_macros::model_event;
use serde_json::Value;

const VENDOR_ID: &str = "vendorId";
const MACHINE_ID: &str = "machineId";
const SERIAL_NUMBER: &str = "serialNumber";
const STATION_ID: &str = "stationId";
const SITE_ID: &str = "siteId";
const FIELDS: &str = "fields";

/// 模拟机器数据
///
/// 载荷中可选的 `fields` 为 `Field` 记录列表，解析时逐项校验。
#[model_event(
    model_id = "setMachineData",
    category = Machine,
    required = ["vendorId", "machineId", "serialNumber", "stationId", "siteId"],
    parse_with = Self::hydrate
)]
pub struct SetMachineDataEvent {
    fields: Vec<Field>,
}

#[bon]
impl SetMachineDataEvent {
    #[builder(on(String, into))]
    pub fn new(
        #[builder(default = Envelope::generate_id())] id: String,
        vendor_id: String,
        machine_id: String,
        serial_number: String,
        station_id: String,
        site_id: String,
        fields: Option<Vec<Field>>,
    ) -> Self {
        let list = fields
            .as_ref()
            .map(|fields| Value::Array(fields.iter().cloned().map(Value::from).collect()));

        let envelope = Envelope::new(id, Self::MODEL_ID, Self::CATEGORY)
            .with_entry(VENDOR_ID, Some(Value::String(vendor_id)))
            .with_entry(MACHINE_ID, Some(Value::String(machine_id)))
            .with_entry(SERIAL_NUMBER, Some(Value::String(serial_number)))
            .with_entry(STATION_ID, Some(Value::String(station_id)))
            .with_entry(SITE_ID, Some(Value::String(site_id)))
            .with_entry(FIELDS, list);

        Self {
            envelope,
            fields: fields.unwrap_or_default(),
        }
    }
}

impl SetMachineDataEvent {
    fn hydrate(envelope: Envelope) -> EventResult<Self> {
        let fields = parse_fields(envelope.require_payload()?)?;
        Ok(Self { envelope, fields })
    }

    pub fn vendor_id(&self) -> Option<&str> {
        self.envelope.payload_str(VENDOR_ID)
    }

    pub fn machine_id(&self) -> Option<&str> {
        self.envelope.payload_str(MACHINE_ID)
    }

    pub fn serial_number(&self) -> Option<&str> {
        self.envelope.payload_str(SERIAL_NUMBER)
    }

    pub fn station_id(&self) -> Option<&str> {
        self.envelope.payload_str(STATION_ID)
    }

    pub fn site_id(&self) -> Option<&str> {
        self.envelope.payload_str(SITE_ID)
    }

    /// 字段列表；载荷未包含 `fields` 时为空
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

fn parse_fields(payload: &Payload) -> EventResult<Vec<Field>> {
    let items = match payload.get(FIELDS) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(EventError::InvalidFieldsList {
                reason: "expected a list".to_string(),
            });
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let entry = match item {
                Value::Object(map) => Field::from_map(map),
                _ => Err(EventError::invalid(FIELDS, "list of mappings")),
            };
            entry.map_err(|source| EventError::InvalidFieldEntry {
                index,
                source: Box::new(source),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::{Category, Content};
    use serde_json::json;

    fn content(fields: Option<Value>) -> Content {
        let mut payload = json!({
            "vendorId": "v1",
            "machineId": "m1",
            "serialNumber": "sn-1",
            "stationId": "st-1",
            "siteId": "site-1"
        });
        if let Some(fields) = fields {
            payload["fields"] = fields;
        }
        json!({ "id": "d1", "modelId": "setMachineData", "payload": payload })
            .as_object()
            .cloned()
            .unwrap()
    }

    fn field_json(name: &str) -> Value {
        json!({
            "name": name,
            "machineValueType": "INT",
            "unit": "rpm",
            "visualizationType": "LINE",
            "visualizationLevel": "2",
            "value": "1200"
        })
    }

    #[test]
    fn fields_are_optional() {
        let event = SetMachineDataEvent::parse(&content(None)).unwrap();
        assert!(event.fields().is_empty());
        assert_eq!(event.vendor_id(), Some("v1"));
        assert_eq!(event.site_id(), Some("site-1"));
        assert_eq!(event.category(), Category::Machine);
    }

    #[test]
    fn parses_field_entries_in_order() {
        let c = content(Some(json!([field_json("speed"), field_json("torque")])));
        let event = SetMachineDataEvent::parse(&c).unwrap();
        let names: Vec<_> = event.fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec![Some("speed"), Some("torque")]);
    }

    // 列表本身非法与列表项非法可区分
    #[test]
    fn fields_not_a_list() {
        let c = content(Some(json!("speed=1200")));
        assert!(matches!(
            SetMachineDataEvent::parse(&c).unwrap_err(),
            EventError::InvalidFieldsList { .. }
        ));
    }

    #[test]
    fn field_entry_missing_value() {
        let mut broken = field_json("speed");
        broken.as_object_mut().unwrap().remove("value");
        let c = content(Some(json!([field_json("ok"), broken])));

        let err = SetMachineDataEvent::parse(&c).unwrap_err();
        assert_eq!(
            err,
            EventError::InvalidFieldEntry {
                index: 1,
                source: Box::new(EventError::MissingField {
                    field: "value".into()
                }),
            }
        );
    }

    #[test]
    fn field_entry_not_a_map() {
        let c = content(Some(json!([42])));
        assert!(matches!(
            SetMachineDataEvent::parse(&c).unwrap_err(),
            EventError::InvalidFieldEntry { index: 0, .. }
        ));
    }

    #[test]
    fn required_keys_checked_before_fields() {
        let mut c = content(Some(json!("broken")));
        c["payload"].as_object_mut().unwrap().remove("stationId");
        assert_eq!(
            SetMachineDataEvent::parse(&c).unwrap_err(),
            EventError::MissingField {
                field: "stationId".into()
            }
        );
    }

    #[test]
    fn builder_mirrors_fields_into_payload() {
        let field = Field::builder()
            .name("speed")
            .machine_value_type("INT")
            .unit("rpm")
            .visualization_type("LINE")
            .visualization_level("2")
            .value("1200")
            .build();
        let event = SetMachineDataEvent::builder()
            .id("d1")
            .vendor_id("v1")
            .machine_id("m1")
            .serial_number("sn-1")
            .station_id("st-1")
            .site_id("site-1")
            .fields(vec![field.clone()])
            .build();

        assert_eq!(event.fields(), &[field]);
        assert_eq!(
            event.payload().unwrap()["fields"],
            json!([field_json("speed")])
        );

        let reparsed = SetMachineDataEvent::parse(&event.to_content()).unwrap();
        assert_eq!(reparsed, event);
    }
}
