//! Derive macros for the grammar tables of `oxide-obsql-core`.
//!
//! This crate provides two derives for fieldless enums:
//!
//! - `#[derive(GrammarRules)]` turns an enum of grammar productions into an
//!   indexed table keyed by the production's snake_case name.
//! - `#[derive(Keywords)]` turns an enum of SQL keywords into a
//!   case-insensitive lookup table with a reserved-word flag.

use proc_macro::TokenStream;
use proc_macro2::{Literal, TokenStream as TokenStream2};
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Expr, Fields, Lit, Variant, parse_macro_input};

/// Derives the rule table for an enum of grammar productions.
///
/// The enum must be fieldless, use implicit discriminants and be
/// `#[repr(u16)]`.
///
/// # Attributes
///
/// - `#[rule(name = "production_name")]` - Overrides the production name
///   (optional, defaults to the snake_case of the variant name)
///
/// # Generated Items
///
/// - `ALL` and `COUNT` constants
/// - `name()`, `index()`, `from_index()` and `from_name()`
/// - A `Display` impl that writes the production name
#[proc_macro_derive(GrammarRules, attributes(rule))]
pub fn derive_grammar_rules(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_grammar_rules_impl(&input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Derives the keyword table for an enum of SQL keywords.
///
/// # Attributes
///
/// - `#[keyword(name = "SPELLING")]` - Overrides the keyword spelling
///   (optional, defaults to the UPPER_SNAKE_CASE of the variant name)
/// - `#[keyword(reserved)]` - Marks the keyword as reserved, so it cannot
///   be used as a bare identifier
///
/// # Generated Items
///
/// - An `ALL` constant
/// - `as_str()`, case-insensitive `from_str()` and `is_reserved()`
#[proc_macro_derive(Keywords, attributes(keyword))]
pub fn derive_keywords(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_keywords_impl(&input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn derive_grammar_rules_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let enum_name = &input.ident;
    let variants = unit_variants(input, "GrammarRules")?;

    let mut idents = Vec::with_capacity(variants.len());
    let mut names = Vec::with_capacity(variants.len());
    let mut indices = Vec::with_capacity(variants.len());
    for (i, variant) in variants.iter().enumerate() {
        let attrs = parse_variant_attrs(&variant.attrs, "rule")?;
        let index = u16::try_from(i).map_err(|_| {
            syn::Error::new_spanned(variant, "GrammarRules supports at most 65536 variants")
        })?;
        idents.push(variant.ident.clone());
        names.push(
            attrs
                .name
                .unwrap_or_else(|| to_snake_case(&variant.ident.to_string())),
        );
        indices.push(Literal::u16_unsuffixed(index));
    }
    check_unique_names(&variants, &names)?;
    let count = idents.len();

    Ok(quote! {
        impl #enum_name {
            /// Every production, in declaration order.
            pub const ALL: &'static [Self] = &[#(Self::#idents),*];

            /// Number of productions.
            pub const COUNT: usize = #count;

            /// Returns the grammar production name.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    #(Self::#idents => #names,)*
                }
            }

            /// Returns the stable index of the production.
            #[must_use]
            #[allow(clippy::cast_possible_truncation)]
            pub const fn index(self) -> u16 {
                self as u16
            }

            /// Looks a production up by index.
            #[must_use]
            pub const fn from_index(index: u16) -> Option<Self> {
                match index {
                    #(#indices => Some(Self::#idents),)*
                    _ => None,
                }
            }

            /// Looks a production up by its grammar name.
            #[must_use]
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    #(#names => Some(Self::#idents),)*
                    _ => None,
                }
            }
        }

        impl ::core::fmt::Display for #enum_name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.name())
            }
        }
    })
}

fn derive_keywords_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let enum_name = &input.ident;
    let variants = unit_variants(input, "Keywords")?;

    let mut idents = Vec::with_capacity(variants.len());
    let mut spellings = Vec::with_capacity(variants.len());
    let mut reserved = Vec::new();
    for variant in &variants {
        let attrs = parse_variant_attrs(&variant.attrs, "keyword")?;
        idents.push(variant.ident.clone());
        spellings.push(
            attrs
                .name
                .unwrap_or_else(|| to_upper_snake_case(&variant.ident.to_string())),
        );
        if attrs.reserved {
            reserved.push(variant.ident.clone());
        }
    }
    check_unique_names(&variants, &spellings)?;

    let reserved_body = if reserved.is_empty() {
        quote! { false }
    } else {
        quote! { matches!(self, #(Self::#reserved)|*) }
    };

    Ok(quote! {
        impl #enum_name {
            /// Every keyword, in declaration order.
            pub const ALL: &'static [Self] = &[#(Self::#idents),*];

            /// Returns the canonical (upper case) spelling.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    #(Self::#idents => #spellings,)*
                }
            }

            /// Looks a keyword up, ignoring ASCII case.
            #[must_use]
            #[allow(clippy::should_implement_trait)]
            pub fn from_str(s: &str) -> Option<Self> {
                let upper = s.to_ascii_uppercase();
                match upper.as_str() {
                    #(#spellings => Some(Self::#idents),)*
                    _ => None,
                }
            }

            /// Returns true if the keyword cannot be used as a bare identifier.
            #[must_use]
            pub const fn is_reserved(self) -> bool {
                #reserved_body
            }
        }
    })
}

fn unit_variants<'a>(input: &'a DeriveInput, derive: &str) -> syn::Result<Vec<&'a Variant>> {
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            format!("{derive} derive only supports enums"),
        ));
    };
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                format!("{derive} derive only supports fieldless variants"),
            ));
        }
        if variant.discriminant.is_some() {
            return Err(syn::Error::new_spanned(
                variant,
                format!("{derive} derive does not support explicit discriminants"),
            ));
        }
    }
    Ok(data.variants.iter().collect())
}

fn check_unique_names(variants: &[&Variant], names: &[String]) -> syn::Result<()> {
    for (i, name) in names.iter().enumerate() {
        if names[..i].contains(name) {
            return Err(syn::Error::new_spanned(
                variants[i],
                format!("duplicate name `{name}`"),
            ));
        }
    }
    Ok(())
}

struct VariantAttrs {
    name: Option<String>,
    reserved: bool,
}

fn parse_variant_attrs(attrs: &[Attribute], attr_name: &str) -> syn::Result<VariantAttrs> {
    let mut result = VariantAttrs {
        name: None,
        reserved: false,
    };

    for attr in attrs {
        if !attr.path().is_ident(attr_name) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: Expr = meta.value()?.parse()?;
                if let Expr::Lit(lit) = value {
                    if let Lit::Str(s) = lit.lit {
                        result.name = Some(s.value());
                        return Ok(());
                    }
                }
                Err(meta.error("expected a string literal"))
            } else if meta.path.is_ident("reserved") {
                result.reserved = true;
                Ok(())
            } else {
                Err(meta.error("unsupported attribute"))
            }
        })?;
    }

    Ok(result)
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

fn to_upper_snake_case(s: &str) -> String {
    to_snake_case(s).to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("SqlStmt"), "sql_stmt");
        assert_eq!(to_snake_case("IntTypeI"), "int_type_i");
        assert_eq!(to_snake_case("LockSpecMysql57"), "lock_spec_mysql57");
        assert_eq!(to_snake_case("Expr"), "expr");
    }

    #[test]
    fn test_to_upper_snake_case() {
        assert_eq!(to_upper_snake_case("AutoIncrement"), "AUTO_INCREMENT");
        assert_eq!(to_upper_snake_case("Select"), "SELECT");
        assert_eq!(to_upper_snake_case("X509"), "X509");
    }
}
