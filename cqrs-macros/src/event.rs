use crate::utils::{
    apply_derives, duplicate_key, ensure_required_fields, expect_lit_int, expect_lit_str,
    parse_kvs,
};
use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Item, Result, Type, parse::Parse, parse::ParseStream, parse_macro_input};

/// #[event] 宏实现
/// - 仅支持具名字段结构体
/// - 确保字段 `id: String`
/// - 事件类型默认取结构体名，版本默认 1
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as EventAttrConfig);
    let mut input = parse_macro_input!(item as Item);

    let st = match &mut input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[event] only on struct")
                .to_compile_error()
                .into();
        }
    };

    let syn::Fields::Named(fields_named) = &mut st.fields else {
        return syn::Error::new(st.span(), "only supports named-field struct")
            .to_compile_error()
            .into();
    };

    let string_ty: Type = syn::parse_quote! { String };
    ensure_required_fields(fields_named, &[("id", &string_ty)], false);

    let required: Vec<syn::Path> = vec![
        syn::parse_quote!(Debug),
        syn::parse_quote!(Clone),
        syn::parse_quote!(PartialEq),
        syn::parse_quote!(serde::Serialize),
    ];
    apply_derives(&mut st.attrs, required);

    let ident = &st.ident;
    let type_lit = cfg
        .event_type
        .unwrap_or_else(|| syn::LitStr::new(&ident.to_string(), ident.span()));
    let version_lit = cfg.version.unwrap_or_else(|| syn::parse_quote! { 1 });
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();

    let out = quote! {
        #st

        impl #impl_generics ::cqrs_domain::domain_event::Event for #ident #ty_generics #where_clause {
            fn event_id(&self) -> &str { self.id.as_str() }
            fn event_type(&self) -> &str { #type_lit }
            fn event_version(&self) -> usize { #version_lit }
        }

        impl #impl_generics ::cqrs_domain::domain_event::EventTypes for #ident #ty_generics #where_clause {
            const EVENT_TYPES: &'static [&'static str] = &[#type_lit];
        }
    };

    TokenStream::from(out)
}

struct EventAttrConfig {
    event_type: Option<syn::LitStr>,
    version: Option<syn::LitInt>,
}

impl Parse for EventAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut event_type: Option<syn::LitStr> = None;
        let mut version: Option<syn::LitInt> = None;

        for kv in parse_kvs(input)? {
            match kv.key.to_string().as_str() {
                "event_type" => {
                    if event_type.is_some() {
                        return Err(duplicate_key(&kv.key));
                    }
                    event_type = Some(expect_lit_str(kv.value, "event_type")?);
                }
                "version" => {
                    if version.is_some() {
                        return Err(duplicate_key(&kv.key));
                    }
                    version = Some(expect_lit_int(kv.value, "version")?);
                }
                _ => {
                    return Err(syn::Error::new(
                        kv.key.span(),
                        "unknown key; expected 'event_type' | 'version'",
                    ));
                }
            }
        }

        Ok(Self {
            event_type,
            version,
        })
    }
}
