//! 事件模型基础库（event-model）
//!
//! 为事件驱动平台（机器监控、流程编排总线等）提供类型化的领域事件包装：
//! - 信封（`envelope`）：`id`、判别符 `modelId`、类别与载荷；
//! - 必填字段校验（`validation`）：信封载荷与嵌套记录共用；
//! - 事件变体（`model_event` / `event`）：声明判别符与必填键，解析时校验、构建时总是成功；
//! - 分发（`dispatch`）：按判别符构造变体，未知判别符回退为通用信封。
//!
//! 传输、JSON 解析与业务处理均不在本 crate 范围内；输入为已解析的 JSON 对象。
//!
//! 典型用法：
//! 1. 通过 `parse_event` 对总线收到的内容做无类型分发，或用 `parse_typed` 指定目标变体；
//! 2. 通过各变体的 `builder()` 构建新事件，`to_content()` 得到传输形态；
//! 3. 使用 `#[model_event]` 定义新的变体，并在 `EventRegistry` 中注册。
//!
pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod event;
pub mod model_event;
pub mod validation;

pub use dispatch::{
    DispatchConfig, Event, EventRegistry, UnknownModelPolicy, parse_event, parse_typed,
};
pub use envelope::{Category, Content, Envelope, Payload};
pub use error::{EventError, EventResult};
pub use event::{
    Field, MeasureCompletedEvent, MeasureRequestedEvent, SetMachineDataEvent,
    StartupCompleteEvent,
};
pub use model_event::{DynModelEvent, ModelEvent, model_id_of};

#[cfg(feature = "macros")]
pub use event_model_macros::model_event;

// 允许在本 crate 内部通过 ::event_model 进行自引用，
// 以便 `#[model_event]` 生成的路径在定义内置变体时也能解析。
extern crate self as event_model;
