//! Implementation of the `#[derive(Record)]` macro.
//!
//! This macro generates an implementation of the `Record` trait and
//! field name constants for typo-free criteria building.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::{parse_record_attrs, FieldKind};

/// Main implementation of the Record derive macro.
pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Ensure we have a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Record can only be derived for structs",
            ))
        }
    };

    let mut field_matches: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut text_fields: Vec<String> = Vec::new();
    let mut seen: Vec<String> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_record_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        // Unannotated fields are invisible to queries
        let kind = match attrs.kind {
            Some(k) => k,
            None => continue,
        };

        let query_name = attrs.rename.unwrap_or_else(|| field_name.to_string());
        if seen.contains(&query_name) {
            return Err(Error::new(
                attrs.span,
                format!("duplicate record field name '{}'", query_name),
            ));
        }
        seen.push(query_name.clone());

        let const_name = format_ident!("{}", to_screaming_snake_case(&query_name));
        field_constants.push(quote! {
            /// Field name constant for criteria and sort keys.
            pub const #const_name: &'static str = #query_name;
        });

        field_matches.push(quote! {
            #query_name => ::campus_query::Value::Text(
                ::core::convert::AsRef::<str>::as_ref(&self.#field_name)
            ),
        });

        if kind == FieldKind::Text {
            text_fields.push(query_name);
        }
    }

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
        }

        impl #impl_generics ::campus_query::Record for #struct_name #ty_generics #where_clause {
            fn field_value(&self, field: &str) -> ::campus_query::Value<'_> {
                match field {
                    #(#field_matches)*
                    _ => ::campus_query::Value::None,
                }
            }

            fn text_fields(&self) -> &'static [&'static str] {
                &[#(#text_fields),*]
            }
        }
    };

    Ok(expanded)
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' || c == ' ' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = true;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screaming_snake_case() {
        assert_eq!(to_screaming_snake_case("title"), "TITLE");
        assert_eq!(to_screaming_snake_case("start_time"), "START_TIME");
        assert_eq!(to_screaming_snake_case("startTime"), "START_TIME");
        assert_eq!(to_screaming_snake_case("course-id"), "COURSE_ID");
    }

    #[test]
    fn test_rejects_enums() {
        let input: DeriveInput = syn::parse_str("enum Kind { A, B }").unwrap();
        let err = record_derive_impl(input).unwrap_err();
        assert!(err.to_string().contains("only be derived for structs"));
    }

    #[test]
    fn test_rejects_tuple_structs() {
        let input: DeriveInput = syn::parse_str("struct Pair(String, String);").unwrap();
        let err = record_derive_impl(input).unwrap_err();
        assert!(err.to_string().contains("named fields"));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let input: DeriveInput = syn::parse_str(
            r#"struct Offer {
                #[record(category)]
                kind: String,
                #[record(category, rename = "kind")]
                other: String,
            }"#,
        )
        .unwrap();
        let err = record_derive_impl(input).unwrap_err();
        assert!(err.to_string().contains("duplicate record field name"));
    }

    #[test]
    fn test_rejects_rename_without_kind() {
        let input: DeriveInput = syn::parse_str(
            r#"struct Entry {
                #[record(rename = "courseTitle")]
                course_title: String,
            }"#,
        )
        .unwrap();
        let err = record_derive_impl(input).unwrap_err();
        assert!(err.to_string().contains("rename requires text, category or key"));
    }

    #[test]
    fn test_generates_text_field_list() {
        let input: DeriveInput = syn::parse_str(
            r#"struct Post {
                #[record(text)]
                title: String,
                #[record(category)]
                category: String,
                #[record(text)]
                author: String,
                id: String,
            }"#,
        )
        .unwrap();
        let tokens = record_derive_impl(input).unwrap().to_string();
        assert!(tokens.contains("\"title\" , \"author\""));
        assert!(tokens.contains("CATEGORY"));
        assert!(!tokens.contains("\"id\""));
    }
}
