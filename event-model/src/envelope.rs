//! 事件信封（Envelope）
//!
//! 所有事件共享的外层结构：`id`、判别符 `modelId`、路由类别 `Category` 与载荷。
//! 信封本身不关心载荷形态，载荷是否必须存在由具体事件变体决定。
//!
use crate::error::{EventError, EventResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// 传输层交付的原始内容（JSON 对象）
pub type Content = Map<String, Value>;

/// 事件载荷（保持插入顺序）
pub type Payload = Map<String, Value>;

pub(crate) const ID: &str = "id";
pub(crate) const MODEL_ID: &str = "modelId";
pub(crate) const PAYLOAD: &str = "payload";

/// 事件的粗粒度路由类别，与 `modelId` 相互独立，不参与序列化
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Service,
    Machine,
    Process,
    User,
    #[default]
    Unknown,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Service => "SERVICE",
            Category::Machine => "MACHINE",
            Category::Process => "PROCESS",
            Category::User => "USER",
            Category::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// 事件信封，构造后不可变
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    id: String,
    model_id: String,
    #[serde(skip)]
    category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<Value>,
}

impl Envelope {
    /// 以给定参数创建信封，载荷为空映射
    pub fn new(id: impl Into<String>, model_id: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            model_id: model_id.into(),
            category,
            payload: Some(Value::Object(Payload::new())),
        }
    }

    /// 从原始内容解析信封
    ///
    /// 仅要求 `id` 与 `modelId` 存在且为字符串；`payload` 原样保留，不做任何校验。
    ///
    /// ```
    /// use event_model::{Category, Envelope};
    ///
    /// let content = serde_json::json!({ "id": "e1", "modelId": "anything" });
    /// let envelope = Envelope::from_content(content.as_object().unwrap(), Category::Unknown).unwrap();
    /// assert_eq!(envelope.model_id(), "anything");
    /// assert!(envelope.payload().is_none());
    /// ```
    pub fn from_content(content: &Content, category: Category) -> EventResult<Self> {
        let id = read_str(content, ID)?.ok_or_else(|| EventError::missing(ID))?;
        let model_id = read_model_id(content)?;

        let payload = match content.get(PAYLOAD) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value.clone()),
        };

        Ok(Self {
            id: id.to_string(),
            model_id: model_id.to_string(),
            category,
            payload,
        })
    }

    /// 生成新的事件标识（UUID v4）
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// 载荷映射的只读视图；载荷缺失或不是映射时返回 `None`
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref().and_then(Value::as_object)
    }

    /// 按原样返回载荷值
    pub fn raw_payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// 要求载荷存在且为映射
    pub fn require_payload(&self) -> EventResult<&Payload> {
        match &self.payload {
            None => Err(EventError::missing(PAYLOAD)),
            Some(Value::Object(map)) => Ok(map),
            Some(_) => Err(EventError::invalid(PAYLOAD, "mapping")),
        }
    }

    /// 读取载荷中的字符串值；键缺失或值不是字符串时返回 `None`
    pub fn payload_str(&self, key: &str) -> Option<&str> {
        self.payload().and_then(|p| p.get(key)).and_then(Value::as_str)
    }

    /// 读取载荷中的映射值
    pub fn payload_map(&self, key: &str) -> Option<&Payload> {
        self.payload()
            .and_then(|p| p.get(key))
            .and_then(Value::as_object)
    }

    /// 转换为传输层的内容形态：`{id, modelId, payload?}`，不包含类别
    pub fn to_content(&self) -> Content {
        let mut content = Content::new();
        content.insert(ID.to_string(), Value::String(self.id.clone()));
        content.insert(MODEL_ID.to_string(), Value::String(self.model_id.clone()));
        if let Some(payload) = &self.payload {
            content.insert(PAYLOAD.to_string(), payload.clone());
        }
        content
    }

    /// 参数构造路径使用：写入一个载荷值，`None` 时跳过
    ///
    /// 仅作用于 `Envelope::new` 创建的映射载荷；信封被事件包裹后不再可变。
    pub fn with_entry(mut self, key: &str, value: Option<Value>) -> Self {
        if let (Some(value), Some(Value::Object(map))) = (value, self.payload.as_mut()) {
            map.insert(key.to_string(), value);
        }
        self
    }
}

/// 读取内容中的 `modelId`
pub(crate) fn read_model_id(content: &Content) -> EventResult<&str> {
    read_str(content, MODEL_ID)?.ok_or(EventError::MissingModelId)
}

fn read_str<'a>(content: &'a Content, key: &str) -> EventResult<Option<&'a str>> {
    match content.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(EventError::invalid(key, "string")),
    }
}
