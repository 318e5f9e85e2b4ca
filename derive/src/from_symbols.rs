use std::collections::BTreeMap;

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{
    Data, DeriveInput, Error, ExprClosure, Field, Fields, Ident, Pat, Result, Token, Type,
    parse::{Parse, ParseStream},
};

pub(crate) fn expand_from_symbols(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new_spanned(
            input,
            "`FromSymbols` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new_spanned(
            input,
            "`FromSymbols` may only be derived on structs with named fields.",
        ))?
    };

    let fields = fields
        .named
        .iter()
        .map(FieldMetadata::parse)
        .map(Result::transpose)
        .flatten() // Skip fields without an attribute.
        .collect::<Result<Vec<_>>>()?;

    let mut kinds: BTreeMap<SymbolKind, Vec<FieldMetadata>> = BTreeMap::new();
    for field in fields {
        kinds.entry(field.kind).or_default().push(field);
    }

    let methods = kinds.into_iter().map(|(kind, fields)| {
        let assignments = fields.into_iter().map(|field| {
            let FieldMetadata { name, receiver, .. } = field;

            match receiver {
                Receiver::Vec => quote! { self.#name.push(symbol); },
                Receiver::Option => quote! { self.#name = Some(symbol); },
                Receiver::Handler {
                    field_type,
                    acc,
                    val,
                    body,
                } => quote! {
                    (|#acc: &mut #field_type, #val| { #body })(&mut self.#name, symbol);
                },
            }
        });

        let method = format_ident!("add_{}", kind.name());

        quote! {
            fn #method(&mut self, symbol: ::disparate::sans::symbol::Symbol) {
                #(#assignments)*
            }
        }
    });

    let name = &input.ident;

    let expanded = quote! {
        impl FromSymbols for #name {
            #(#methods)*
        }
    };

    Ok(expanded.into())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum SymbolKind {
    Data,
    Control,
    Error,
}

impl SymbolKind {
    fn name(self) -> &'static str {
        match self {
            SymbolKind::Data => "data",
            SymbolKind::Control => "control",
            SymbolKind::Error => "error",
        }
    }
}

#[derive(Debug)]
enum Receiver {
    Vec,
    Option,
    Handler {
        field_type: Type,
        acc: Pat,
        val: Pat,
        body: Box<syn::Expr>,
    },
}

#[derive(Debug)]
struct FieldMetadata {
    name: Ident,
    kind: SymbolKind,
    receiver: Receiver,
}

impl FieldMetadata {
    fn parse(field: &Field) -> Result<Option<Self>> {
        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("symbols")) else {
            return Ok(None);
        };

        let Some(name) = field.ident.clone() else {
            Err(Error::new_spanned(field, "Field must be named."))?
        };

        let SymbolsAttribute { kind, handler } = attr.meta.require_list()?.parse_args()?;

        let receiver = if let Some(handler) = handler {
            let mut inputs = handler.inputs.iter().cloned();

            let (Some(acc), Some(val), None) = (inputs.next(), inputs.next(), inputs.next())
            else {
                Err(Error::new_spanned(
                    &handler,
                    "Handler closure must have two parameters.",
                ))?
            };

            if !matches!(val, Pat::Type(_)) {
                Err(Error::new_spanned(
                    &val,
                    "Handler closure's second parameter must be annotated with `Symbol`.",
                ))?
            }

            Receiver::Handler {
                field_type: field.ty.clone(),
                acc,
                val,
                body: handler.body,
            }
        } else {
            let Type::Path(path) = &field.ty else {
                Err(Error::new_spanned(
                    &field.ty,
                    "Field must have a type annotation.",
                ))?
            };

            let Some(segment) = path.path.segments.last() else {
                Err(Error::new_spanned(
                    &path.path.segments,
                    "Field without a handler must have an `Option<Symbol>` or `Vec<Symbol>` type.",
                ))?
            };

            if segment.ident == "Option" {
                Receiver::Option
            } else if segment.ident == "Vec" {
                Receiver::Vec
            } else {
                Err(Error::new_spanned(
                    &segment.ident,
                    "Field without a handler must have an `Option<Symbol>` or `Vec<Symbol>` type.",
                ))?
            }
        };

        Ok(Some(Self {
            name,
            kind,
            receiver,
        }))
    }
}

#[derive(Debug)]
struct SymbolsAttribute {
    kind: SymbolKind,
    handler: Option<ExprClosure>,
}

impl Parse for SymbolsAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let ident = input.parse::<Ident>()?;

        let kind = if ident == "data" {
            SymbolKind::Data
        } else if ident == "control" {
            SymbolKind::Control
        } else if ident == "error" {
            SymbolKind::Error
        } else {
            Err(Error::new_spanned(
                ident,
                "Symbol kind must be `data`, `control`, or `error`.",
            ))?
        };

        let handler = if !input.is_empty() {
            input.parse::<Token![,]>()?;
            Some(input.parse::<ExprClosure>()?)
        } else {
            None
        };

        Ok(Self { kind, handler })
    }
}
