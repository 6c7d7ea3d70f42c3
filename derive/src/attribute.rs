use syn::{
    Error, Ident, Lit, LitChar, LitInt, LitStr, Result, Token, parenthesized,
    parse::{Parse, ParseStream},
    token,
};

/// Comma-separated `key`, `key = value` and `key(..)` entries.
#[derive(Debug, Default)]
pub(crate) struct Entries(Vec<Entry>);

#[derive(Debug)]
struct Entry {
    key: Ident,
    value: Value,
}

#[derive(Debug)]
enum Value {
    Flag,
    Lit(Lit),
    Ident(Ident),
    Nested(Entries),
}

impl Parse for Entries {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut entries = Vec::new();

        while !input.is_empty() {
            let key = input.parse::<Ident>()?;

            let value = if input.peek(Token![=]) {
                input.parse::<Token![=]>()?;

                if input.peek(Ident) {
                    Value::Ident(input.parse()?)
                } else {
                    Value::Lit(input.parse()?)
                }
            } else if input.peek(token::Paren) {
                let content;
                parenthesized!(content in input);
                Value::Nested(content.parse()?)
            } else {
                Value::Flag
            };

            entries.push(Entry { key, value });

            if !input.is_empty() {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(Self(entries))
    }
}

/// Options of a descriptor attribute, checked against the keys it accepts.
#[derive(Debug, Default)]
pub(crate) struct Options {
    pub(crate) name: Option<LitStr>,
    pub(crate) position: Option<LitInt>,
    pub(crate) length: Option<LitInt>,
    pub(crate) required: bool,
    pub(crate) ignore: bool,
    pub(crate) align: Option<Ident>,
    pub(crate) padding: Option<LitChar>,
    pub(crate) identification: Option<LitStr>,
    pub(crate) counter: Option<Entries>,
    /// Contents of `element(..)` or `field(..)`.
    pub(crate) element: Option<Entries>,
}

impl Options {
    pub(crate) fn parse(entries: Entries, allowed: &[&str]) -> Result<Self> {
        let mut options = Self::default();

        for Entry { key, value } in entries.0 {
            let name = key.to_string();

            if !allowed.contains(&name.as_str()) {
                Err(Error::new_spanned(
                    &key,
                    format!("Unknown key `{name}`, expected one of: {}.", allowed.join(", ")),
                ))?
            }

            match (name.as_str(), value) {
                ("name", Value::Lit(Lit::Str(lit))) => options.name = Some(lit),
                ("position", Value::Lit(Lit::Int(lit))) => options.position = Some(lit),
                ("length", Value::Lit(Lit::Int(lit))) => options.length = Some(lit),
                ("required", Value::Flag) => options.required = true,
                ("required", Value::Lit(Lit::Bool(lit))) => options.required = lit.value,
                ("ignore", Value::Flag) => options.ignore = true,
                ("ignore", Value::Lit(Lit::Bool(lit))) => options.ignore = lit.value,
                ("align", Value::Ident(ident)) if ident == "left" || ident == "right" => {
                    options.align = Some(ident)
                }
                ("padding", Value::Lit(Lit::Char(lit))) => options.padding = Some(lit),
                ("identification", Value::Lit(Lit::Str(lit))) => {
                    options.identification = Some(lit)
                }
                ("counter", Value::Nested(nested)) => options.counter = Some(nested),
                ("element" | "field", Value::Nested(nested)) => options.element = Some(nested),
                _ => Err(Error::new_spanned(
                    &key,
                    format!("Invalid value for `{name}`."),
                ))?,
            }
        }

        Ok(options)
    }
}
