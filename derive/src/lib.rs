use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attribute;
mod record;

#[proc_macro_derive(Record, attributes(record, field, composite, group, field_list))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match record::expand_record(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error().into(),
    }
}
