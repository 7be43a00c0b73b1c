use crate::utils::{apply_derives, ensure_leading_fields, is_named};
use proc_macro::TokenStream;
use quote::{ToTokens, quote};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Expr, Item, Result, Token, parse::Parse, parse::ParseStream, parse_macro_input};

/// #[model_event] 宏实现
/// - 支持单元结构体与具名字段结构体
/// - 确保首个字段为私有的 `envelope: ::event_model::Envelope`
/// - 合并默认派生：Debug, Clone, PartialEq
/// - 生成 `::event_model::ModelEvent` 实现（判别符/类别/必填键/信封访问/构造）
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as ModelEventAttrConfig);
    let input = parse_macro_input!(item as Item);

    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[model_event] can only be used on struct types")
                .to_compile_error()
                .into();
        }
    };

    let Some(model_id) = cfg.model_id else {
        return syn::Error::new(st.ident.span(), "missing required key 'model_id'")
            .to_compile_error()
            .into();
    };
    if model_id.value().is_empty() {
        return syn::Error::new(model_id.span(), "'model_id' must not be empty")
            .to_compile_error()
            .into();
    }

    let Some(category) = cfg.category else {
        return syn::Error::new(st.ident.span(), "missing required key 'category'")
            .to_compile_error()
            .into();
    };

    // 单元结构体转为具名字段结构体
    if matches!(st.fields, syn::Fields::Unit) {
        st.fields = syn::Fields::Named(syn::parse_quote!({}));
        st.semi_token = None;
    }

    let envelope_ty: syn::Type = syn::parse_quote! { ::event_model::Envelope };
    let has_extra_fields = match &mut st.fields {
        syn::Fields::Named(fields_named) => {
            ensure_leading_fields(fields_named, &[("envelope", &envelope_ty)]);
            fields_named
                .named
                .iter()
                .any(|f| !is_named(f, "envelope"))
        }
        _ => {
            return syn::Error::new(
                st.ident.span(),
                "#[model_event] supports only unit or named-field structs",
            )
            .to_compile_error()
            .into();
        }
    };

    let required: Vec<syn::Path> = vec![
        syn::parse_quote!(Debug),
        syn::parse_quote!(Clone),
        syn::parse_quote!(PartialEq),
    ];
    apply_derives(&mut st.attrs, required);

    let from_envelope_body = match (&cfg.parse_with, has_extra_fields) {
        (Some(path), _) => quote! { #path(envelope) },
        (None, false) => quote! { ::std::result::Result::Ok(Self { envelope }) },
        (None, true) => {
            return syn::Error::new(
                st.ident.span(),
                "structs with fields other than `envelope` require `parse_with = path`",
            )
            .to_compile_error()
            .into();
        }
    };

    let ident = &st.ident;
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();
    let required_fields = &cfg.required;

    let out = quote! {
        #st

        impl #impl_generics ::event_model::ModelEvent for #ident #ty_generics #where_clause {
            const MODEL_ID: &'static str = #model_id;
            const CATEGORY: ::event_model::Category = ::event_model::Category::#category;
            const REQUIRED_FIELDS: &'static [&'static str] = &[ #( #required_fields ),* ];

            fn envelope(&self) -> &::event_model::Envelope {
                &self.envelope
            }

            fn into_envelope(self) -> ::event_model::Envelope {
                self.envelope
            }

            fn from_envelope(
                envelope: ::event_model::Envelope,
            ) -> ::event_model::EventResult<Self> {
                #from_envelope_body
            }
        }
    };

    TokenStream::from(out)
}

// 属性配置：model_id = "..."、category = Ident、required = ["..", ..]、parse_with = path
struct ModelEventAttrConfig {
    model_id: Option<syn::LitStr>,
    category: Option<syn::Ident>,
    required: Vec<syn::LitStr>,
    parse_with: Option<syn::ExprPath>,
}

impl Parse for ModelEventAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut model_id: Option<syn::LitStr> = None;
        let mut category: Option<syn::Ident> = None;
        let mut required: Option<Vec<syn::LitStr>> = None;
        let mut parse_with: Option<syn::ExprPath> = None;

        let pairs: Punctuated<syn::ExprAssign, Token![,]> =
            Punctuated::<syn::ExprAssign, Token![,]>::parse_terminated(input)?;

        for assign in pairs.into_iter() {
            let key_ident = match *assign.left {
                Expr::Path(p) if p.path.segments.len() == 1 => p.path.segments[0].ident.clone(),
                other => return Err(syn::Error::new(other.span(), "invalid attribute key")),
            };
            let duplicate = || {
                syn::Error::new(
                    key_ident.span(),
                    format!("duplicate key '{key_ident}' in attribute"),
                )
            };
            match key_ident.to_string().as_str() {
                "model_id" => {
                    if model_id.is_some() {
                        return Err(duplicate());
                    }
                    let lit: syn::LitStr = syn::parse2(assign.right.to_token_stream())?;
                    model_id = Some(lit);
                }
                "category" => {
                    if category.is_some() {
                        return Err(duplicate());
                    }
                    let ident: syn::Ident = syn::parse2(assign.right.to_token_stream())?;
                    category = Some(ident);
                }
                "required" => {
                    if required.is_some() {
                        return Err(duplicate());
                    }
                    let array = match *assign.right {
                        Expr::Array(array) => array,
                        other => {
                            return Err(syn::Error::new(
                                other.span(),
                                "expected array of string literals for 'required'",
                            ));
                        }
                    };
                    let keys = array
                        .elems
                        .into_iter()
                        .map(|e| syn::parse2::<syn::LitStr>(e.to_token_stream()))
                        .collect::<Result<Vec<_>>>()?;
                    required = Some(keys);
                }
                "parse_with" => {
                    if parse_with.is_some() {
                        return Err(duplicate());
                    }
                    let path = match *assign.right {
                        Expr::Path(path) => path,
                        other => {
                            return Err(syn::Error::new(
                                other.span(),
                                "expected function path for 'parse_with'",
                            ));
                        }
                    };
                    parse_with = Some(path);
                }
                _ => {
                    return Err(syn::Error::new(
                        key_ident.span(),
                        "unknown key; expected 'model_id' | 'category' | 'required' | 'parse_with'",
                    ));
                }
            }
        }

        Ok(Self {
            model_id,
            category,
            required: required.unwrap_or_default(),
            parse_with,
        })
    }
}
