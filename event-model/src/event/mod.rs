//! 内置事件变体
//!
//! 每个变体都是对 `Envelope` 的类型化包装，由 `#[model_event]` 生成判别符、类别与
//! 必填键声明；参数构造统一使用 `bon` 生成的 builder，`id` 缺省时自动生成。

mod field;
mod measure_completed;
mod measure_requested;
mod set_machine_data;
mod startup_complete;

pub use field::Field;
pub use measure_completed::MeasureCompletedEvent;
pub use measure_requested::MeasureRequestedEvent;
pub use set_machine_data::SetMachineDataEvent;
pub use startup_complete::StartupCompleteEvent;

// 载荷键
pub(crate) const MEASURE_ID: &str = "measureId";
pub(crate) const TARGET_GROUP: &str = "targetGroup";
pub(crate) const CONTEXT: &str = "context";
