//! 必填字段校验
//!
//! 信封载荷与嵌套记录共用同一套“键是否存在”的检查；不检查值的类型，
//! 例如非字符串的 `measureId` 在此层同样视为合法。
//!
use crate::envelope::Payload;
use crate::error::{EventError, EventResult};

/// 返回第一个缺失的必填键（按 `required` 给定的顺序）
pub fn first_missing<'a>(map: &Payload, required: &[&'a str]) -> Option<&'a str> {
    required.iter().copied().find(|key| !map.contains_key(*key))
}

/// 校验所有必填键均存在，遇到第一个缺失键即失败
pub fn require_fields(map: &Payload, required: &[&str]) -> EventResult<()> {
    match first_missing(map, required) {
        Some(key) => Err(EventError::missing(key)),
        None => Ok(()),
    }
}
