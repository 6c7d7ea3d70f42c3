use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Error, Field, Fields, GenericArgument, Ident, LitStr,
    PathArguments, Result, Type, ext::IdentExt, spanned::Spanned,
};

use crate::attribute::{Entries, Options};

const KINDS: [&str; 4] = ["field", "composite", "group", "field_list"];

const SCALAR_KEYS: &[&str] = &["position", "length", "required", "ignore", "align", "padding"];
const COMPOSITE_KEYS: &[&str] = &["position", "required", "ignore", "identification"];
const GROUP_KEYS: &[&str] = &["position", "required", "ignore", "counter", "element"];
const LIST_KEYS: &[&str] = &["position", "required", "ignore", "counter", "field"];
const COUNTER_KEYS: &[&str] = &["length", "align", "padding"];
const ELEMENT_KEYS: &[&str] = &["identification"];

pub(crate) fn expand_record(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new_spanned(
            input,
            "`Record` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new_spanned(
            input,
            "`Record` may only be derived on structs with named fields.",
        ))?
    };

    let record_name = match input.attrs.iter().find(|a| a.path().is_ident("record")) {
        Some(attr) => {
            let entries = attr.meta.require_list()?.parse_args::<Entries>()?;
            Options::parse(entries, &["name"])?.name
        }
        None => None,
    }
    .unwrap_or_else(|| LitStr::new(&input.ident.unraw().to_string(), input.ident.span()));

    let fields = fields
        .named
        .iter()
        .map(expand_field)
        .collect::<Result<Vec<_>>>()?;

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::platen::Record for #name #ty_generics #where_clause {
            fn declaration() -> ::platen::Declaration {
                ::platen::Declaration::new(#record_name, ::platen::Constructor::of::<Self>())
                    #(#fields)*
            }
        }
    };

    Ok(expanded.into())
}

fn expand_field(field: &Field) -> Result<TokenStream2> {
    let name = field.ident.clone().unwrap();
    let label = LitStr::new(&name.unraw().to_string(), name.span());

    let mut attrs = field
        .attrs
        .iter()
        .filter(|a| KINDS.iter().any(|k| a.path().is_ident(k)));

    let Some(attr) = attrs.next() else {
        return Ok(quote! { .unmapped(#label) });
    };

    if let Some(extra) = attrs.next() {
        Err(Error::new_spanned(
            extra,
            "A field may carry only one of `field`, `composite`, `group` or `field_list`.",
        ))?
    }

    let entries = attr.meta.require_list()?.parse_args::<Entries>()?;
    let ty = &field.ty;

    let (handle, descriptor) = if attr.path().is_ident("field") {
        let options = Options::parse(entries, SCALAR_KEYS)?;
        require_position(&options, attr)?;

        let handle = handle(&name, &label, quote! { ::platen::TypeRef::scalar::<#ty>() }, None);

        (handle, scalar_descriptor(&options, attr)?)
    } else if attr.path().is_ident("composite") {
        let options = Options::parse(entries, COMPOSITE_KEYS)?;
        require_position(&options, attr)?;

        let handle = handle(&name, &label, quote! { ::platen::TypeRef::record::<#ty>() }, None);

        (handle, composite_descriptor(&options))
    } else if attr.path().is_ident("group") {
        let options = Options::parse(entries, GROUP_KEYS)?;
        let position = require_position(&options, attr)?;
        let element = sequence_element(ty)?;

        let handle = handle(
            &name,
            &label,
            quote! { ::platen::TypeRef::opaque::<#ty>() },
            Some(quote! { ::platen::Sequence::records::<#element>() }),
        );

        let mut descriptor = quote! { ::platen::GroupDescriptor::new(#position) };
        descriptor.extend(flags(&options));

        let counter = options
            .counter
            .map(|entries| Options::parse(entries, COUNTER_KEYS))
            .transpose()?;

        let element = options
            .element
            .map(|entries| Options::parse(entries, ELEMENT_KEYS))
            .transpose()?
            .unwrap_or_default();

        if counter.is_none() && element.identification.is_none() {
            Err(Error::new_spanned(
                attr,
                "`group` requires a `counter(length = ..)` or an `element(identification = ..)`.",
            ))?
        }

        if let Some(counter) = counter {
            let counter = scalar_descriptor(&counter, attr)?;
            descriptor.extend(quote! { .counter(#counter) });
        }

        let element = composite_descriptor(&element);
        descriptor.extend(quote! { .element(#element) });

        (handle, descriptor)
    } else {
        let options = Options::parse(entries, LIST_KEYS)?;
        let position = require_position(&options, attr)?;
        let flags = flags(&options);
        let element = sequence_element(ty)?;

        let handle = handle(
            &name,
            &label,
            quote! { ::platen::TypeRef::opaque::<#ty>() },
            Some(quote! { ::platen::Sequence::scalars::<#element>() }),
        );

        let Some(counter) = options.counter else {
            Err(Error::new_spanned(
                attr,
                "`field_list` requires a `counter(length = ..)`.",
            ))?
        };

        let Some(field) = options.element else {
            Err(Error::new_spanned(
                attr,
                "`field_list` requires a `field(length = ..)`.",
            ))?
        };

        let counter = scalar_descriptor(&Options::parse(counter, COUNTER_KEYS)?, attr)?;
        let field = scalar_descriptor(&Options::parse(field, COUNTER_KEYS)?, attr)?;

        let descriptor = quote! {
            ::platen::ListDescriptor::new(#position, #counter, #field) #flags
        };

        (handle, descriptor)
    };

    Ok(quote! { .field(#handle, #descriptor) })
}

/// Projections of `Self` onto the member, erased to `dyn Any`.
fn handle(
    name: &Ident,
    label: &LitStr,
    ty: TokenStream2,
    sequence: Option<TokenStream2>,
) -> TokenStream2 {
    let get = quote! {
        |r| r.downcast_ref::<Self>().map(|r| &r.#name as &dyn ::core::any::Any)
    };
    let get_mut = quote! {
        |r| r.downcast_mut::<Self>().map(|r| &mut r.#name as &mut dyn ::core::any::Any)
    };

    match sequence {
        Some(sequence) => quote! {
            ::platen::FieldHandle::sequence(#label, #ty, #get, #get_mut, #sequence)
        },
        None => quote! {
            ::platen::FieldHandle::value(#label, #ty, #get, #get_mut)
        },
    }
}

fn require_position(options: &Options, attr: &Attribute) -> Result<TokenStream2> {
    let Some(position) = &options.position else {
        Err(Error::new_spanned(attr, "Mapped fields require a `position`."))?
    };

    Ok(quote! { #position })
}

fn flags(options: &Options) -> TokenStream2 {
    let mut tokens = TokenStream2::new();

    if options.required {
        tokens.extend(quote! { .required(true) });
    }
    if options.ignore {
        tokens.extend(quote! { .ignore(true) });
    }

    tokens
}

fn scalar_descriptor(options: &Options, attr: &Attribute) -> Result<TokenStream2> {
    let Some(length) = &options.length else {
        Err(Error::new_spanned(attr, "Scalar slices require a `length`."))?
    };

    let position = match &options.position {
        Some(position) => quote! { #position },
        None => quote! { 0 },
    };

    let mut tokens = quote! { ::platen::FieldDescriptor::new(#position, #length) };
    tokens.extend(flags(options));

    if let Some(align) = &options.align {
        let variant = if align == "left" {
            quote! { Left }
        } else {
            quote! { Right }
        };
        tokens.extend(quote! { .align(::platen::Align::#variant) });
    }

    if let Some(padding) = &options.padding {
        tokens.extend(quote! { .padding(#padding) });
    }

    Ok(tokens)
}

fn composite_descriptor(options: &Options) -> TokenStream2 {
    let position = match &options.position {
        Some(position) => quote! { #position },
        None => quote! { 0 },
    };

    let mut tokens = quote! { ::platen::CompositeDescriptor::new(#position) };
    tokens.extend(flags(options));

    if let Some(identification) = &options.identification {
        tokens.extend(quote! { .identification(#identification) });
    }

    tokens
}

/// The element type `T` of a `Vec<T>` field.
fn sequence_element(ty: &Type) -> Result<&Type> {
    let Type::Path(path) = ty else {
        Err(Error::new_spanned(ty, "Repeated fields must have type `Vec<T>`."))?
    };

    let Some(segment) = path.path.segments.last() else {
        Err(Error::new(path.span(), "Repeated fields must have type `Vec<T>`."))?
    };

    if segment.ident != "Vec" {
        Err(Error::new_spanned(
            &segment.ident,
            "Repeated fields must have type `Vec<T>`.",
        ))?
    }

    let PathArguments::AngleBracketed(arguments) = &segment.arguments else {
        Err(Error::new_spanned(
            &segment.arguments,
            "Field of type `Vec<T>` must have a generic parameter.",
        ))?
    };

    let Some(GenericArgument::Type(element)) = arguments.args.first() else {
        Err(Error::new_spanned(
            &arguments.args,
            "Generic argument of a field of type `Vec<T>` must be a type.",
        ))?
    };

    Ok(element)
}
