use proc_macro::TokenStream;

mod model_event;
mod utils;

/// 事件变体宏
/// - 作用于单元结构体或具名字段结构体，追加私有字段 `envelope: ::event_model::Envelope`（若缺失）并置于最前
/// - 合并默认派生：`Debug`, `Clone`, `PartialEq`
/// - 自动实现 `::event_model::ModelEvent`
/// - 支持参数：
///   - `model_id = "..."`：判别符常量（必填）
///   - `category = Service`：`::event_model::Category` 的变体名（必填）
///   - `required = ["a", "b"]`：载荷必填键，按顺序校验（默认无）
///   - `parse_with = path`：`fn(Envelope) -> EventResult<Self>`，存在信封以外字段时必填
///
/// ```ignore
/// #[model_event(model_id = "userOnline", category = User, required = ["userId"])]
/// pub struct UserOnlineEvent;
/// ```
#[proc_macro_attribute]
pub fn model_event(attr: TokenStream, item: TokenStream) -> TokenStream {
    model_event::expand(attr, item)
}
