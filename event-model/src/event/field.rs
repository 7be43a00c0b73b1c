use crate::envelope::Payload;
use crate::error::EventResult;
use crate::validation;
use bon::bon;
use serde::Serialize;
use serde_json::Value;

const NAME: &str = "name";
const MACHINE_VALUE_TYPE: &str = "machineValueType";
const UNIT: &str = "unit";
const VISUALIZATION_TYPE: &str = "visualizationType";
const VISUALIZATION_LEVEL: &str = "visualizationLevel";
const VALUE: &str = "value";

/// 机器数据字段（嵌套记录），归属于 `SetMachineDataEvent` 的 `fields` 列表
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Field {
    map: Payload,
}

#[bon]
impl Field {
    #[builder(on(String, into))]
    pub fn new(
        name: String,
        machine_value_type: String,
        unit: String,
        visualization_type: String,
        visualization_level: String,
        value: String,
    ) -> Self {
        let mut map = Payload::new();
        map.insert(NAME.to_string(), Value::String(name));
        map.insert(
            MACHINE_VALUE_TYPE.to_string(),
            Value::String(machine_value_type),
        );
        map.insert(UNIT.to_string(), Value::String(unit));
        map.insert(
            VISUALIZATION_TYPE.to_string(),
            Value::String(visualization_type),
        );
        map.insert(
            VISUALIZATION_LEVEL.to_string(),
            Value::String(visualization_level),
        );
        map.insert(VALUE.to_string(), Value::String(value));
        Self { map }
    }
}

impl Field {
    /// 必填键（按校验顺序）
    pub const REQUIRED_FIELDS: &'static [&'static str] = &[
        NAME,
        MACHINE_VALUE_TYPE,
        UNIT,
        VISUALIZATION_TYPE,
        VISUALIZATION_LEVEL,
        VALUE,
    ];

    /// 从映射构造并校验必填键
    pub fn from_map(map: &Payload) -> EventResult<Self> {
        validation::require_fields(map, Self::REQUIRED_FIELDS)?;
        Ok(Self { map: map.clone() })
    }

    pub fn name(&self) -> Option<&str> {
        self.get(NAME)
    }

    pub fn machine_value_type(&self) -> Option<&str> {
        self.get(MACHINE_VALUE_TYPE)
    }

    pub fn unit(&self) -> Option<&str> {
        self.get(UNIT)
    }

    pub fn visualization_type(&self) -> Option<&str> {
        self.get(VISUALIZATION_TYPE)
    }

    pub fn visualization_level(&self) -> Option<&str> {
        self.get(VISUALIZATION_LEVEL)
    }

    pub fn value(&self) -> Option<&str> {
        self.get(VALUE)
    }

    pub fn as_map(&self) -> &Payload {
        &self.map
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).and_then(Value::as_str)
    }
}

impl From<Field> for Value {
    fn from(field: Field) -> Self {
        Value::Object(field.map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EventError;
    use serde_json::json;

    fn temperature() -> Field {
        Field::builder()
            .name("temperature")
            .machine_value_type("FLOAT")
            .unit("°C")
            .visualization_type("GAUGE")
            .visualization_level("1")
            .value("21.5")
            .build()
    }

    #[test]
    fn builder_keeps_key_order() {
        let field = temperature();
        let keys: Vec<&str> = field.as_map().keys().map(String::as_str).collect();
        assert_eq!(keys, Field::REQUIRED_FIELDS.to_vec());
        assert_eq!(field.unit(), Some("°C"));
    }

    #[test]
    fn from_map_round_trip() {
        let field = temperature();
        let parsed = Field::from_map(field.as_map()).unwrap();
        assert_eq!(parsed, field);
        assert_eq!(parsed.value(), Some("21.5"));
    }

    #[test]
    fn from_map_requires_every_key() {
        for missing in Field::REQUIRED_FIELDS {
            let mut map = temperature().as_map().clone();
            map.remove(*missing);
            assert_eq!(
                Field::from_map(&map).unwrap_err(),
                EventError::MissingField {
                    field: missing.to_string()
                }
            );
        }
    }

    #[test]
    fn serializes_as_plain_map() {
        let v = serde_json::to_value(temperature()).unwrap();
        assert_eq!(v["name"], json!("temperature"));
        assert_eq!(Value::from(temperature()), v);
    }
}
