use proc_macro2::TokenStream;
use quote::quote;

// Quoting helpers

/// Quote an `Option`, applying the transform to the inner value when
/// present.
pub fn quote_option<T, F>(opt: Option<&T>, transform: F) -> TokenStream
where
    F: FnOnce(&T) -> TokenStream,
{
    if let Some(v) = opt {
        let transformed = transform(v);
        quote!(Some(#transformed))
    } else {
        quote!(None)
    }
}

/// Quote a string slice as a `&'static [(&'static str, i64)]` table.
pub fn quote_named_values(values: &[(String, i64)]) -> TokenStream {
    let entries = values.iter().map(|(name, index)| {
        let name = name.as_str();
        quote!((#name, #index))
    });

    quote!(&[#(#entries),*])
}

/// Crate root the generated code resolves through. Generated wiring
/// always names the public facade.
pub fn facade() -> TokenStream {
    quote!(::nodebind)
}
