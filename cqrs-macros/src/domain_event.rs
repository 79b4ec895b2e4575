use crate::utils::{
    apply_derives, duplicate_key, ensure_required_fields, expect_lit_int, expect_lit_str,
    parse_kvs,
};
use proc_macro::TokenStream;
use quote::quote;
use std::collections::HashMap;
use syn::spanned::Spanned;
use syn::{Item, Result, Type, parse::Parse, parse::ParseStream, parse_macro_input};

/// #[domain_event] 宏实现
/// - 仅支持具名字段变体：`Variant { .. }`
/// - 确保每个变体具备字段：`id: String`, `aggregate_id: String`, `aggregate_version: usize`
/// - 生成 `Event`、`EventTypes`、`DomainEvent` 实现
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as DomainEventAttrConfig);
    let mut input = parse_macro_input!(item as Item);

    let enum_item = match &mut input {
        Item::Enum(e) => e,
        other => {
            return syn::Error::new(
                other.span(),
                "#[domain_event] can only be used on enum types",
            )
            .to_compile_error()
            .into();
        }
    };

    let version_lit = cfg.version.unwrap_or_else(|| syn::parse_quote! { 1 });

    let required: Vec<syn::Path> = vec![
        syn::parse_quote!(Debug),
        syn::parse_quote!(Clone),
        syn::parse_quote!(PartialEq),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
    ];
    apply_derives(&mut enum_item.attrs, required);

    let string_ty: Type = syn::parse_quote! { String };
    let usize_ty: Type = syn::parse_quote! { usize };

    let mut variant_types: HashMap<String, syn::LitStr> = HashMap::new();
    let mut variant_versions: HashMap<String, syn::LitInt> = HashMap::new();

    for v in &mut enum_item.variants {
        let syn::Fields::Named(fields_named) = &mut v.fields else {
            return syn::Error::new(
                v.span(),
                "#[domain_event] supports only named-field enum variants, e.g., Variant { x: T }",
            )
            .to_compile_error()
            .into();
        };

        ensure_required_fields(
            fields_named,
            &[
                ("id", &string_ty),
                ("aggregate_id", &string_ty),
                ("aggregate_version", &usize_ty),
            ],
            false,
        );

        let mut retained_attrs = Vec::new();
        let mut variant_cfg = VariantEventAttrConfig::default();

        for attr in v.attrs.iter() {
            if attr.path().is_ident("event") {
                match attr.parse_args_with(VariantEventAttrConfig::parse) {
                    Ok(parsed) => {
                        if let Err(err) = variant_cfg.merge(parsed, attr) {
                            return err.to_compile_error().into();
                        }
                    }
                    Err(err) => return err.to_compile_error().into(),
                }
            } else {
                retained_attrs.push(attr.clone());
            }
        }

        v.attrs = retained_attrs;
        if let Some(lit) = variant_cfg.ty {
            variant_types.insert(v.ident.to_string(), lit);
        }
        if let Some(lit) = variant_cfg.version {
            variant_versions.insert(v.ident.to_string(), lit);
        }
    }

    let enum_ident = &enum_item.ident;
    let enum_name = enum_ident.to_string();

    // 变体级覆盖或默认：EnumName.Variant
    let type_lits: Vec<syn::LitStr> = enum_item
        .variants
        .iter()
        .map(|v| {
            variant_types.get(&v.ident.to_string()).cloned().unwrap_or_else(|| {
                syn::LitStr::new(&format!("{}.{}", enum_name, v.ident), v.ident.span())
            })
        })
        .collect();

    let type_match_arms = enum_item.variants.iter().zip(type_lits.iter()).map(|(v, lit)| {
        let v_ident = &v.ident;
        quote! { Self::#v_ident { .. } => #lit }
    });

    let id_match_arms = enum_item.variants.iter().map(|v| {
        let v_ident = &v.ident;
        quote! { Self::#v_ident { id, .. } => id.as_str() }
    });

    let ver_match_arms = enum_item.variants.iter().map(|v| {
        let v_ident = &v.ident;
        match variant_versions.get(&v.ident.to_string()) {
            Some(lit) => quote! { Self::#v_ident { .. } => #lit },
            None => quote! { Self::#v_ident { .. } => #version_lit },
        }
    });

    let agg_id_match_arms = enum_item.variants.iter().map(|v| {
        let v_ident = &v.ident;
        quote! { Self::#v_ident { aggregate_id, .. } => ::std::option::Option::Some(aggregate_id.as_str()) }
    });

    let agg_ver_match_arms = enum_item.variants.iter().map(|v| {
        let v_ident = &v.ident;
        quote! { Self::#v_ident { aggregate_version, .. } => ::std::option::Option::Some(*aggregate_version) }
    });

    let out = quote! {
        #enum_item

        impl ::cqrs_domain::domain_event::Event for #enum_ident {
            fn event_id(&self) -> &str { match self { #( #id_match_arms, )* } }
            fn event_type(&self) -> &str { match self { #( #type_match_arms, )* } }
            fn event_version(&self) -> usize { match self { #( #ver_match_arms, )* } }
            fn aggregate_id(&self) -> ::std::option::Option<&str> { match self { #( #agg_id_match_arms, )* } }
            fn aggregate_version(&self) -> ::std::option::Option<usize> { match self { #( #agg_ver_match_arms, )* } }
        }

        impl ::cqrs_domain::domain_event::EventTypes for #enum_ident {
            const EVENT_TYPES: &'static [&'static str] = &[ #( #type_lits ),* ];
        }

        impl ::cqrs_domain::domain_event::DomainEvent for #enum_ident {}
    };

    TokenStream::from(out)
}

// 变体级配置：event_type / event_version
#[derive(Default)]
struct VariantEventAttrConfig {
    ty: Option<syn::LitStr>,
    version: Option<syn::LitInt>,
}

impl VariantEventAttrConfig {
    fn merge(&mut self, other: Self, attr: &syn::Attribute) -> Result<()> {
        if let Some(lit) = other.ty {
            if self.ty.is_some() {
                return Err(syn::Error::new(
                    attr.span(),
                    "duplicate 'event_type' specified for this variant",
                ));
            }
            self.ty = Some(lit);
        }
        if let Some(lit) = other.version {
            if self.version.is_some() {
                return Err(syn::Error::new(
                    attr.span(),
                    "duplicate 'event_version' specified for this variant",
                ));
            }
            self.version = Some(lit);
        }
        Ok(())
    }
}

impl Parse for VariantEventAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut cfg = Self::default();
        for kv in parse_kvs(input)? {
            match kv.key.to_string().as_str() {
                "event_type" => {
                    if cfg.ty.is_some() {
                        return Err(duplicate_key(&kv.key));
                    }
                    cfg.ty = Some(expect_lit_str(kv.value, "event_type")?);
                }
                "event_version" => {
                    if cfg.version.is_some() {
                        return Err(duplicate_key(&kv.key));
                    }
                    cfg.version = Some(expect_lit_int(kv.value, "event_version")?);
                }
                _ => {
                    return Err(syn::Error::new(
                        kv.key.span(),
                        "unknown key; expected 'event_type' | 'event_version'",
                    ));
                }
            }
        }
        Ok(cfg)
    }
}

// 枚举级配置：默认版本号
struct DomainEventAttrConfig {
    version: Option<syn::LitInt>,
}

impl Parse for DomainEventAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut version: Option<syn::LitInt> = None;

        if input.is_empty() {
            return Ok(Self { version });
        }

        for kv in parse_kvs(input)? {
            match kv.key.to_string().as_str() {
                "version" => {
                    if version.is_some() {
                        return Err(duplicate_key(&kv.key));
                    }
                    version = Some(expect_lit_int(kv.value, "version")?);
                }
                _ => {
                    return Err(syn::Error::new(
                        kv.key.span(),
                        "unknown key; expected 'version'",
                    ));
                }
            }
        }

        Ok(Self { version })
    }
}
