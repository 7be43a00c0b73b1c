//! 事件分发（按判别符构造类型化事件）
//!
//! - `EventRegistry`：判别符到解析函数的注册表，新增变体只需一次 `register`；
//! - `parse_event`：无类型分发，未知判别符回退为 `Event::Unknown`；
//! - `parse_typed`：类型化分发，构造目标变体并校验判别符一致。
//!
use crate::envelope::{Category, Content, Envelope, Payload};
use crate::error::{EventError, EventResult};
use crate::event::{
    MeasureCompletedEvent, MeasureRequestedEvent, SetMachineDataEvent, StartupCompleteEvent,
};
use crate::model_event::{DynModelEvent, ModelEvent, model_id_of};
use bon::Builder;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

/// 分发得到的事件
#[derive(Debug, Clone)]
pub enum Event {
    MeasureRequested(MeasureRequestedEvent),
    MeasureCompleted(MeasureCompletedEvent),
    StartupComplete(StartupCompleteEvent),
    SetMachineData(SetMachineDataEvent),
    /// 运行时注册的自定义变体
    Custom(Arc<dyn DynModelEvent>),
    /// 未注册的判别符，仅包含原始信封
    Unknown(Envelope),
}

impl Event {
    /// 包装自定义变体，供 `register` 与下游 `impl From<T> for Event` 使用
    pub fn custom<T>(event: T) -> Self
    where
        T: ModelEvent,
    {
        Event::Custom(Arc::new(event))
    }

    pub fn envelope(&self) -> &Envelope {
        match self {
            Event::MeasureRequested(e) => e.envelope(),
            Event::MeasureCompleted(e) => e.envelope(),
            Event::StartupComplete(e) => e.envelope(),
            Event::SetMachineData(e) => e.envelope(),
            Event::Custom(e) => e.as_envelope(),
            Event::Unknown(envelope) => envelope,
        }
    }

    pub fn id(&self) -> &str {
        self.envelope().id()
    }

    pub fn model_id(&self) -> &str {
        self.envelope().model_id()
    }

    pub fn category(&self) -> Category {
        self.envelope().category()
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.envelope().payload()
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Event::Unknown(_))
    }

    /// 向下转型为具体变体（含自定义变体）
    pub fn downcast_ref<T>(&self) -> Option<&T>
    where
        T: ModelEvent,
    {
        let inner: &dyn DynModelEvent = match self {
            Event::MeasureRequested(e) => e,
            Event::MeasureCompleted(e) => e,
            Event::StartupComplete(e) => e,
            Event::SetMachineData(e) => e,
            Event::Custom(e) => &**e,
            Event::Unknown(_) => return None,
        };
        inner.as_any().downcast_ref::<T>()
    }

    pub fn to_content(&self) -> Content {
        self.envelope().to_content()
    }
}

macro_rules! impl_from_builtin {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Event {
                fn from(event: $ty) -> Self {
                    Event::$variant(event)
                }
            }
        )*
    };
}

impl_from_builtin! {
    MeasureRequested => MeasureRequestedEvent,
    MeasureCompleted => MeasureCompletedEvent,
    StartupComplete => StartupCompleteEvent,
    SetMachineData => SetMachineDataEvent,
}

/// 未知判别符的处理策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownModelPolicy {
    /// 回退为 `Event::Unknown`，不做任何载荷校验
    #[default]
    Fallback,
    /// 视为错误（`EventError::UnknownModelId`）
    Reject,
}

/// 分发配置
#[derive(Builder, Debug, Clone, Copy, Default)]
pub struct DispatchConfig {
    #[builder(default)]
    unknown_model: UnknownModelPolicy,
}

impl DispatchConfig {
    pub fn unknown_model(&self) -> UnknownModelPolicy {
        self.unknown_model
    }
}

type ParseFn = fn(&Content) -> EventResult<Event>;

fn parse_into<T>(content: &Content) -> EventResult<Event>
where
    T: ModelEvent + Into<Event>,
{
    T::parse(content).map(Into::into)
}

fn parse_custom<T>(content: &Content) -> EventResult<Event>
where
    T: ModelEvent,
{
    T::parse(content).map(Event::custom)
}

/// 判别符注册表
///
/// 构建完成后只读，可在线程间共享。
///
/// ```
/// use event_model::{Event, EventRegistry};
///
/// let registry = EventRegistry::new();
/// let content = serde_json::json!({
///     "id": "e1",
///     "modelId": "measureRequested",
///     "payload": { "measureId": "m1", "targetGroup": "g1" }
/// });
/// let event = registry.dispatch(content.as_object().unwrap()).unwrap();
/// assert!(matches!(event, Event::MeasureRequested(_)));
/// ```
#[derive(Debug, Clone)]
pub struct EventRegistry {
    parsers: HashMap<&'static str, ParseFn>,
    config: DispatchConfig,
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EventRegistry {
    /// 包含全部内置变体、默认配置的注册表
    pub fn new() -> Self {
        Self::with_builtin(DispatchConfig::default())
    }

    /// 不含任何变体的注册表
    pub fn empty(config: DispatchConfig) -> Self {
        Self {
            parsers: HashMap::new(),
            config,
        }
    }

    /// 包含全部内置变体的注册表
    pub fn with_builtin(config: DispatchConfig) -> Self {
        let mut registry = Self::empty(config);
        registry.insert::<MeasureRequestedEvent>();
        registry.insert::<MeasureCompletedEvent>();
        registry.insert::<StartupCompleteEvent>();
        registry.insert::<SetMachineDataEvent>();
        registry
    }

    /// 注册变体，分发结果为 `Event::Custom`；判别符已存在时返回 `AlreadyRegistered`
    pub fn register<T>(&mut self) -> EventResult<&mut Self>
    where
        T: ModelEvent,
    {
        if self.parsers.contains_key(T::MODEL_ID) {
            return Err(EventError::AlreadyRegistered {
                model_id: T::MODEL_ID.to_string(),
            });
        }
        self.insert_parser(T::MODEL_ID, parse_custom::<T>);
        Ok(self)
    }

    fn insert<T>(&mut self)
    where
        T: ModelEvent + Into<Event>,
    {
        self.insert_parser(T::MODEL_ID, parse_into::<T>);
    }

    fn insert_parser(&mut self, model_id: &'static str, parse: ParseFn) {
        tracing::debug!(model_id, "registering event variant");
        self.parsers.insert(model_id, parse);
    }

    pub fn contains(&self, model_id: &str) -> bool {
        self.parsers.contains_key(model_id)
    }

    pub fn model_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.parsers.keys().copied()
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// 无类型分发
    ///
    /// 读取 `modelId` 并调用对应变体的解析；变体的校验错误原样返回。
    /// 判别符未注册时按 `UnknownModelPolicy` 回退或报错。
    pub fn dispatch(&self, content: &Content) -> EventResult<Event> {
        let model_id = model_id_of(content)?;
        tracing::trace!(model_id, "dispatching event");

        if let Some(parse) = self.parsers.get(model_id) {
            return parse(content);
        }

        match self.config.unknown_model {
            UnknownModelPolicy::Fallback => {
                tracing::debug!(model_id, "unknown model id, falling back to generic envelope");
                Envelope::from_content(content, Category::Unknown).map(Event::Unknown)
            }
            UnknownModelPolicy::Reject => Err(EventError::UnknownModelId {
                model_id: model_id.to_string(),
            }),
        }
    }
}

static DEFAULT_REGISTRY: LazyLock<EventRegistry> = LazyLock::new(EventRegistry::new);

/// 使用默认注册表（内置变体、回退策略）进行无类型分发
pub fn parse_event(content: &Content) -> EventResult<Event> {
    DEFAULT_REGISTRY.dispatch(content)
}

/// 类型化分发
///
/// - 缺失判别符：`MissingModelId`
/// - 判别符与 `T::MODEL_ID` 不一致：`ModelIdMismatch`
/// - 其他构造失败：包装为 `Instantiation`
///
/// ```
/// use event_model::{EventError, MeasureCompletedEvent, parse_typed};
///
/// let content = serde_json::json!({
///     "id": "e1",
///     "modelId": "measureRequested",
///     "payload": { "measureId": "m1", "targetGroup": "g1" }
/// });
/// let err = parse_typed::<MeasureCompletedEvent>(content.as_object().unwrap()).unwrap_err();
/// assert!(matches!(err, EventError::ModelIdMismatch { .. }));
/// ```
pub fn parse_typed<T>(content: &Content) -> EventResult<T>
where
    T: ModelEvent,
{
    model_id_of(content)?;

    T::parse(content).map_err(|err| match err {
        EventError::ModelIdMismatch { .. } => err,
        source => EventError::Instantiation {
            model_id: T::MODEL_ID,
            source: Box::new(source),
        },
    })
}
