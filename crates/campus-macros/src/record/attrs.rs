//! Attribute parsing for the Record derive macro.
//!
//! Parses the `#[record(...)]` field attributes.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Attribute, Error, Ident, LitStr, Result, Token,
};

/// How the query engine uses a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, searched by substring: `#[record(text)]`
    Text,
    /// Categorical code, matched exactly: `#[record(category)]`
    Category,
    /// Orderable value such as a date or time: `#[record(key)]`
    Key,
}

impl FieldKind {
    /// Parse a field kind from an identifier.
    pub fn from_ident(ident: &Ident) -> Result<Self> {
        match ident.to_string().as_str() {
            "text" | "Text" => Ok(FieldKind::Text),
            "category" | "Category" => Ok(FieldKind::Category),
            "key" | "Key" => Ok(FieldKind::Key),
            other => Err(Error::new(
                ident.span(),
                format!(
                    "unknown record field kind: '{}'. Expected one of: text, category, key",
                    other
                ),
            )),
        }
    }
}

/// One entry of a `#[record(...)]` list.
#[derive(Debug, Clone)]
enum RecordOption {
    Kind(FieldKind, Span),
    Skip(Span),
    Rename(LitStr),
}

impl Parse for RecordOption {
    fn parse(input: ParseStream) -> Result<Self> {
        let ident: Ident = input.parse()?;
        if ident == "skip" {
            return Ok(RecordOption::Skip(ident.span()));
        }
        if ident == "rename" {
            input.parse::<Token![=]>()?;
            let name = input
                .parse::<LitStr>()
                .map_err(|e| Error::new(e.span(), "rename must be a string literal"))?;
            return Ok(RecordOption::Rename(name));
        }
        FieldKind::from_ident(&ident).map(|kind| RecordOption::Kind(kind, ident.span()))
    }
}

/// Field-level attributes from `#[record(...)]`.
#[derive(Debug, Clone)]
pub struct RecordAttr {
    /// How this field is used.
    pub kind: Option<FieldKind>,
    /// Skip this field.
    pub skip: bool,
    /// Custom field name for queries (default: field name).
    pub rename: Option<String>,
    /// The span for error reporting.
    pub span: Span,
}

impl Default for RecordAttr {
    fn default() -> Self {
        RecordAttr {
            kind: None,
            skip: false,
            rename: None,
            span: Span::call_site(),
        }
    }
}

impl RecordAttr {
    /// Combines options, possibly spread over several `#[record]` attributes.
    ///
    /// A field has at most one kind and one name. `skip` stands alone, and a
    /// rename needs a kind since unannotated fields are not queryable.
    fn from_options(options: impl IntoIterator<Item = RecordOption>) -> Result<Self> {
        let mut attr = RecordAttr::default();
        let mut skip_span = None;
        let mut rename_span = None;

        for option in options {
            match option {
                RecordOption::Kind(kind, span) => {
                    if attr.kind.is_some_and(|k| k != kind) {
                        return Err(Error::new(
                            span,
                            "a field can only have one kind: text, category or key",
                        ));
                    }
                    attr.kind = Some(kind);
                    attr.span = span;
                }
                RecordOption::Skip(span) => {
                    attr.skip = true;
                    skip_span = Some(span);
                }
                RecordOption::Rename(name) => {
                    if attr.rename.is_some() {
                        return Err(Error::new(name.span(), "rename given more than once"));
                    }
                    attr.rename = Some(name.value());
                    rename_span = Some(name.span());
                }
            }
        }

        if let Some(span) = skip_span {
            if attr.kind.is_some() || attr.rename.is_some() {
                return Err(Error::new(
                    span,
                    "skip cannot be combined with a kind or rename",
                ));
            }
        }
        if let (Some(span), None) = (rename_span, attr.kind) {
            return Err(Error::new(span, "rename requires text, category or key"));
        }
        if let Some(span) = rename_span {
            attr.span = span;
        }

        Ok(attr)
    }
}

impl Parse for RecordAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let options: Punctuated<RecordOption, Token![,]> = Punctuated::parse_terminated(input)?;
        RecordAttr::from_options(options)
    }
}

/// Extract `#[record(...)]` attributes from a field's attributes.
///
/// Several `#[record]` attributes on one field are merged.
pub fn parse_record_attrs(attrs: &[Attribute]) -> Result<RecordAttr> {
    let mut options = Vec::new();
    for attr in attrs.iter().filter(|a| a.path().is_ident("record")) {
        options.extend(attr.parse_args_with(Punctuated::<RecordOption, Token![,]>::parse_terminated)?);
    }
    RecordAttr::from_options(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_record(tokens: &str) -> Result<RecordAttr> {
        syn::parse_str::<RecordAttr>(tokens)
    }

    #[test]
    fn test_record_text() {
        let attr = parse_record("text").unwrap();
        assert_eq!(attr.kind, Some(FieldKind::Text));
        assert!(!attr.skip);
    }

    #[test]
    fn test_record_category() {
        let attr = parse_record("category").unwrap();
        assert_eq!(attr.kind, Some(FieldKind::Category));
    }

    #[test]
    fn test_record_key_capitalized() {
        let attr = parse_record("Key").unwrap();
        assert_eq!(attr.kind, Some(FieldKind::Key));
    }

    #[test]
    fn test_record_skip() {
        let attr = parse_record("skip").unwrap();
        assert!(attr.skip);
        assert_eq!(attr.kind, None);
    }

    #[test]
    fn test_record_rename() {
        let attr = parse_record(r#"category, rename = "type""#).unwrap();
        assert_eq!(attr.kind, Some(FieldKind::Category));
        assert_eq!(attr.rename, Some("type".to_string()));
    }

    #[test]
    fn test_record_repeated_kind_is_fine() {
        let attr = parse_record("text, text").unwrap();
        assert_eq!(attr.kind, Some(FieldKind::Text));
    }

    #[test]
    fn test_record_conflicting_kinds() {
        let result = parse_record("text, key");
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("only have one kind"));
    }

    #[test]
    fn test_record_invalid_kind() {
        let result = parse_record("number");
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("unknown record field kind"));
    }

    #[test]
    fn test_record_rename_must_be_string() {
        let result = parse_record("text, rename = 3");
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("string literal"));
    }

    #[test]
    fn test_record_rename_requires_kind() {
        let result = parse_record(r#"rename = "type""#);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("rename requires text, category or key"));
    }

    #[test]
    fn test_record_rename_twice() {
        let result = parse_record(r#"text, rename = "a", rename = "b""#);
        assert!(result.unwrap_err().to_string().contains("more than once"));
    }

    #[test]
    fn test_record_skip_stands_alone() {
        assert!(parse_record("skip, text").is_err());
        assert!(parse_record(r#"skip, rename = "x""#).is_err());
    }

    #[test]
    fn test_attributes_are_merged() {
        let attrs: Vec<Attribute> = syn::parse_quote! {
            #[serde(rename = "type")]
            #[record(category)]
            #[record(rename = "type")]
        };
        let attr = parse_record_attrs(&attrs).unwrap();
        assert_eq!(attr.kind, Some(FieldKind::Category));
        assert_eq!(attr.rename.as_deref(), Some("type"));
    }

    #[test]
    fn test_no_record_attribute() {
        let attrs: Vec<Attribute> = syn::parse_quote! {
            #[doc = "Free-form notes"]
        };
        let attr = parse_record_attrs(&attrs).unwrap();
        assert_eq!(attr.kind, None);
        assert!(!attr.skip);
    }
}
