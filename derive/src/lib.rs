use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod from_symbols;

#[proc_macro_derive(FromSymbols, attributes(symbols))]
pub fn derive_from_symbols(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match from_symbols::expand_from_symbols(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error().into(),
    }
}
