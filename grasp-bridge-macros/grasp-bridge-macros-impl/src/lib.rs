//! Procedural macro implementation for grasp-bridge parameter tables

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse_macro_input, Attribute, Data, DeriveInput, Expr, ExprLit, Field, Fields, Lit, LitStr,
    Meta,
};

/// Derive macro for declarative parameter tables
///
/// Generates `Default` from the declared defaults and a `ParameterTable`
/// implementation whose `load` reads every keyed field through
/// `grasp_bridge_macros::get_or`.
#[proc_macro_derive(ParameterTable, attributes(param))]
pub fn derive_parameter_table(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

#[derive(Debug)]
enum FieldSource {
    /// Read from the source under `key`, falling back to `default`
    Keyed { key: LitStr, default: Expr },
    /// Compiled-in value
    Fixed(Expr),
    /// `Default::default()`, not part of the table
    Unlisted,
}

struct FieldMapping<'a> {
    field: &'a Field,
    source: FieldSource,
    description: String,
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    struct_name,
                    "ParameterTable requires a struct with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                struct_name,
                "ParameterTable can only be derived for structs",
            ));
        }
    };

    let mappings = fields
        .iter()
        .map(parse_field)
        .collect::<syn::Result<Vec<_>>>()?;

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let default_fields = mappings.iter().map(generate_default_field);
    let load_fields = mappings.iter().map(generate_load_field);
    let specs = mappings.iter().filter_map(generate_spec);
    let values = mappings.iter().filter_map(generate_value);

    Ok(quote! {
        impl #impl_generics ::core::default::Default for #struct_name #ty_generics #where_clause {
            fn default() -> Self {
                Self {
                    #(#default_fields)*
                }
            }
        }

        impl #impl_generics ::grasp_bridge_macros::ParameterTable for #struct_name #ty_generics #where_clause {
            fn load<S: ::grasp_bridge_macros::ParameterSource + ?Sized>(source: &S) -> Self {
                Self {
                    #(#load_fields)*
                }
            }

            fn parameter_specs() -> ::std::vec::Vec<::grasp_bridge_macros::ParameterSpec> {
                ::std::vec![
                    #(#specs),*
                ]
            }

            fn parameters(
                &self,
            ) -> ::std::vec::Vec<(&'static str, ::grasp_bridge_macros::ParameterValue)> {
                ::std::vec![
                    #(#values),*
                ]
            }
        }
    })
}

fn parse_field(field: &Field) -> syn::Result<FieldMapping<'_>> {
    let ident = field
        .ident
        .as_ref()
        .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;

    let mut key: Option<LitStr> = None;
    let mut default: Option<Expr> = None;
    let mut fixed: Option<Expr> = None;

    for attr in field.attrs.iter().filter(|a| a.path().is_ident("param")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("key") {
                key = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("default") {
                default = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("fixed") {
                fixed = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `key`, `default` or `fixed`"))
            }
        })?;
    }

    let source = match (key, default, fixed) {
        (None, None, None) => FieldSource::Unlisted,
        (None, None, Some(value)) => FieldSource::Fixed(value),
        (key, Some(default), None) => FieldSource::Keyed {
            key: key.unwrap_or_else(|| LitStr::new(&ident.to_string(), ident.span())),
            default,
        },
        (Some(key), None, None) => {
            return Err(syn::Error::new_spanned(key, "keyed parameters need a `default`"));
        }
        (_, _, Some(value)) => {
            return Err(syn::Error::new_spanned(
                value,
                "`fixed` cannot be combined with `key` or `default`",
            ));
        }
    };

    Ok(FieldMapping {
        field,
        source,
        description: doc_description(&field.attrs),
    })
}

/// Joins the field's `///` lines into a single sentence.
fn doc_description(attrs: &[Attribute]) -> String {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|a| a.path().is_ident("doc"))
        .filter_map(|a| match &a.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => Some(s.value().trim().to_string()),
                _ => None,
            },
            _ => None,
        })
        .filter(|line| !line.is_empty())
        .collect();
    lines.join(" ")
}

/// String literals become owned `String`s; everything else is used as written
/// and typed by the field.
fn value_tokens(expr: &Expr) -> TokenStream2 {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => quote! { ::std::string::String::from(#s) },
        _ => quote! { #expr },
    }
}

fn generate_default_field(mapping: &FieldMapping<'_>) -> TokenStream2 {
    let ident = &mapping.field.ident;
    let value = match &mapping.source {
        FieldSource::Keyed { default, .. } => value_tokens(default),
        FieldSource::Fixed(value) => value_tokens(value),
        FieldSource::Unlisted => quote! { ::core::default::Default::default() },
    };
    quote! { #ident: #value, }
}

fn generate_load_field(mapping: &FieldMapping<'_>) -> TokenStream2 {
    let ident = &mapping.field.ident;
    let ty = &mapping.field.ty;
    match &mapping.source {
        FieldSource::Keyed { key, default } => {
            let default = value_tokens(default);
            quote! {
                #ident: ::grasp_bridge_macros::get_or::<#ty, S>(source, #key, #default),
            }
        }
        FieldSource::Fixed(value) => {
            let value = value_tokens(value);
            quote! { #ident: #value, }
        }
        FieldSource::Unlisted => quote! { #ident: ::core::default::Default::default(), },
    }
}

fn generate_spec(mapping: &FieldMapping<'_>) -> Option<TokenStream2> {
    let ty = &mapping.field.ty;
    let description = &mapping.description;
    let (key, value, fixed) = match &mapping.source {
        FieldSource::Keyed { key, default } => (key.value(), value_tokens(default), false),
        FieldSource::Fixed(value) => (field_name(mapping.field), value_tokens(value), true),
        FieldSource::Unlisted => return None,
    };
    Some(quote! {
        ::grasp_bridge_macros::ParameterSpec {
            key: #key,
            kind: <#ty as ::grasp_bridge_macros::Parameter>::KIND,
            default: {
                let value: #ty = #value;
                ::grasp_bridge_macros::Parameter::to_parameter(&value)
            },
            description: #description,
            fixed: #fixed,
        }
    })
}

fn generate_value(mapping: &FieldMapping<'_>) -> Option<TokenStream2> {
    let ident = &mapping.field.ident;
    let key = match &mapping.source {
        FieldSource::Keyed { key, .. } => key.value(),
        FieldSource::Fixed(_) => field_name(mapping.field),
        FieldSource::Unlisted => return None,
    };
    Some(quote! {
        (#key, ::grasp_bridge_macros::Parameter::to_parameter(&self.#ident))
    })
}

fn field_name(field: &Field) -> String {
    field
        .ident
        .as_ref()
        .map(|ident| ident.to_string())
        .unwrap_or_default()
}
