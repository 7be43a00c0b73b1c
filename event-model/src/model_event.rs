//! 事件变体能力（ModelEvent）
//!
//! 每个具体事件声明固定的判别符、类别与必填载荷键，并提供两条构造路径：
//! 从原始内容解析（`parse`，带校验）与从类型化参数构建（各变体的 builder，总是成功）。
//!
use crate::envelope::{self, Category, Content, Envelope, Payload};
use crate::error::{EventError, EventResult};
use crate::validation;
use std::any::Any;
use std::fmt;

/// 事件变体需要满足的能力边界
///
/// 通常由 `#[model_event]` 宏生成实现。
pub trait ModelEvent: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// 判别符常量
    const MODEL_ID: &'static str;

    /// 路由类别
    const CATEGORY: Category;

    /// 载荷必填键（按校验顺序）
    const REQUIRED_FIELDS: &'static [&'static str] = &[];

    fn envelope(&self) -> &Envelope;

    fn into_envelope(self) -> Envelope;

    /// 从已通过信封与必填键校验的信封构造变体，嵌套记录在此继续校验
    fn from_envelope(envelope: Envelope) -> EventResult<Self>;

    /// 从原始内容解析并校验
    ///
    /// 1. 以变体类别解析信封；
    /// 2. 声明了必填键时，要求载荷为映射并逐一检查，遇到第一个缺失键即失败；
    /// 3. 交由 `from_envelope` 构造（含嵌套记录校验）；
    /// 4. 内容中的判别符必须等于 `MODEL_ID`。
    fn parse(content: &Content) -> EventResult<Self> {
        let envelope = Envelope::from_content(content, Self::CATEGORY)?;

        if !Self::REQUIRED_FIELDS.is_empty() {
            let payload = envelope.require_payload()?;
            validation::require_fields(payload, Self::REQUIRED_FIELDS)?;
        }

        let event = Self::from_envelope(envelope)?;

        let found = event.envelope().model_id();
        if found != Self::MODEL_ID {
            return Err(EventError::ModelIdMismatch {
                expected: Self::MODEL_ID.to_string(),
                found: found.to_string(),
            });
        }

        Ok(event)
    }

    fn id(&self) -> &str {
        self.envelope().id()
    }

    fn model_id(&self) -> &str {
        self.envelope().model_id()
    }

    fn category(&self) -> Category {
        self.envelope().category()
    }

    fn payload(&self) -> Option<&Payload> {
        self.envelope().payload()
    }

    fn to_content(&self) -> Content {
        self.envelope().to_content()
    }
}

/// `ModelEvent` 的对象安全形态，用于运行时注册的自定义事件与向下转型
pub trait DynModelEvent: fmt::Debug + Send + Sync + 'static {
    fn as_envelope(&self) -> &Envelope;

    fn as_any(&self) -> &dyn Any;
}

impl<T> DynModelEvent for T
where
    T: ModelEvent,
{
    fn as_envelope(&self) -> &Envelope {
        ModelEvent::envelope(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// 读取原始内容中的判别符，缺失时返回 `MissingModelId`
pub fn model_id_of(content: &Content) -> EventResult<&str> {
    envelope::read_model_id(content)
}
