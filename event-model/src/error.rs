//! 事件模型统一错误定义
//!
//! 所有错误都属于“非法参数”一类：在构造时同步抛出，构造失败即不产生任何可用对象。
//! 变体仅用于区分失败原因（缺失字段、缺失判别符、嵌套记录非法、判别符不匹配等）。
//!
use thiserror::Error;

/// 统一错误类型（非法参数）
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    // --- 信封/载荷 ---
    #[error("missing field: {field}")]
    MissingField { field: String },
    #[error("invalid field: {field}, expected {expected}")]
    InvalidField {
        field: String,
        expected: &'static str,
    },

    // --- 判别符 ---
    #[error("model id missing")]
    MissingModelId,
    #[error("invalid model id: expected={expected}, found={found}")]
    ModelIdMismatch { expected: String, found: String },
    #[error("unknown model id: {model_id}")]
    UnknownModelId { model_id: String },

    // --- 嵌套记录 ---
    #[error("invalid fields list: {reason}")]
    InvalidFieldsList { reason: String },
    #[error("invalid fields entry at index {index}: {source}")]
    InvalidFieldEntry {
        index: usize,
        #[source]
        source: Box<EventError>,
    },

    // --- 分发 ---
    #[error("model id already registered: {model_id}")]
    AlreadyRegistered { model_id: String },
    #[error("failed to instantiate {model_id}: {source}")]
    Instantiation {
        model_id: &'static str,
        #[source]
        source: Box<EventError>,
    },
}

impl EventError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        EventError::MissingField {
            field: field.into(),
        }
    }

    pub(crate) fn invalid(field: impl Into<String>, expected: &'static str) -> Self {
        EventError::InvalidField {
            field: field.into(),
            expected,
        }
    }
}

/// 统一 Result 类型别名
pub type EventResult<T> = Result<T, EventError>;

#[cfg(test)]
mod tests {
    use super::*;

    // 嵌套错误的消息包含原始原因
    #[test]
    fn nested_messages_keep_cause() {
        let err = EventError::InvalidFieldEntry {
            index: 2,
            source: Box::new(EventError::missing("value")),
        };
        assert_eq!(
            err.to_string(),
            "invalid fields entry at index 2: missing field: value"
        );

        let err = EventError::Instantiation {
            model_id: "measureCompleted",
            source: Box::new(EventError::missing("measureId")),
        };
        assert_eq!(
            err.to_string(),
            "failed to instantiate measureCompleted: missing field: measureId"
        );
    }

    #[test]
    fn mismatch_names_both_ids() {
        let err = EventError::ModelIdMismatch {
            expected: "measureRequested".into(),
            found: "measureCompleted".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("measureRequested"));
        assert!(msg.contains("measureCompleted"));
    }
}
