use crate::utils::{apply_derives, duplicate_key, expect_lit_str, find_field, parse_kvs};
use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Item, Result, parse::Parse, parse::ParseStream, parse_macro_input};

/// #[command] 宏实现
/// - 派生 `Debug`、`Clone`、`serde::Serialize`
/// - 实现 `::cqrs_application::command::Command`，`NAME` 默认取结构体名
/// - 接入实例级覆写字段 `save_command` / `publish_events`（须为 `Option<bool>`）
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as CommandAttrConfig);
    let mut input = parse_macro_input!(item as Item);

    let st = match &mut input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[command] only on struct")
                .to_compile_error()
                .into();
        }
    };

    let (has_save, has_publish) = match &st.fields {
        syn::Fields::Named(fields_named) => (
            find_field(fields_named, "save_command").is_some(),
            find_field(fields_named, "publish_events").is_some(),
        ),
        _ => (false, false),
    };

    let required: Vec<syn::Path> = vec![
        syn::parse_quote!(Debug),
        syn::parse_quote!(Clone),
        syn::parse_quote!(serde::Serialize),
    ];
    apply_derives(&mut st.attrs, required);

    let ident = &st.ident;
    let name_lit = cfg
        .name
        .unwrap_or_else(|| syn::LitStr::new(&ident.to_string(), ident.span()));
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();

    let save_override = has_save.then(|| {
        quote! {
            fn save_command(&self) -> ::std::option::Option<bool> { self.save_command }
        }
    });
    let publish_override = has_publish.then(|| {
        quote! {
            fn publish_events(&self) -> ::std::option::Option<bool> { self.publish_events }
        }
    });

    let save_setter = has_save.then(|| {
        quote! {
            /// 覆写本命令是否持久化（`false` 总是生效）
            pub fn with_save_command(mut self, save: bool) -> Self {
                self.save_command = ::std::option::Option::Some(save);
                self
            }
        }
    });
    let publish_setter = has_publish.then(|| {
        quote! {
            /// 覆写本命令产生的事件是否发布（`false` 总是生效）
            pub fn with_publish_events(mut self, publish: bool) -> Self {
                self.publish_events = ::std::option::Option::Some(publish);
                self
            }
        }
    });

    let out = quote! {
        #st

        impl #impl_generics ::cqrs_application::command::Command for #ident #ty_generics #where_clause {
            const NAME: &'static str = #name_lit;
            #save_override
            #publish_override
        }

        impl #impl_generics #ident #ty_generics #where_clause {
            #save_setter
            #publish_setter
        }
    };

    TokenStream::from(out)
}

struct CommandAttrConfig {
    name: Option<syn::LitStr>,
}

impl Parse for CommandAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut name: Option<syn::LitStr> = None;

        for kv in parse_kvs(input)? {
            match kv.key.to_string().as_str() {
                "name" => {
                    if name.is_some() {
                        return Err(duplicate_key(&kv.key));
                    }
                    name = Some(expect_lit_str(kv.value, "name")?);
                }
                _ => {
                    return Err(syn::Error::new(
                        kv.key.span(),
                        "unknown key; expected 'name'",
                    ));
                }
            }
        }

        Ok(Self { name })
    }
}
