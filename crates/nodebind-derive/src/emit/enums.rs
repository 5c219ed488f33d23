use crate::{node::enums::EnumModel, prelude::*, validate};
use syn::DeriveInput;

/// Expand `#[derive(NodeEnum)]`: the enum⇄integer bridge, the leaf impl
/// over the surrogate, and the single-item marshaling path.
pub fn expand(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(parsed) => parsed,
        Err(err) => return err.to_compile_error(),
    };

    let mut diagnostics = Vec::new();
    let impls = EnumModel::from_input(&input, &mut diagnostics)
        .map(|model| leaf_impls(&model))
        .unwrap_or_default();
    let findings = validate::emit(&diagnostics);

    quote! {
        #impls
        #findings
    }
}

fn leaf_impls(model: &EnumModel) -> TokenStream {
    let root = facade();
    let ident = &model.ident;
    let named = quote_named_values(&model.named_values());

    let to_arms = model.variants.iter().map(|v| {
        let variant = &v.ident;
        let index = v.index;
        quote!(Self::#variant => #index)
    });

    let from_arms = model.variants.iter().map(|v| {
        let variant = &v.ident;
        let index = v.index;
        quote!(#index => ::core::option::Option::Some(Self::#variant))
    });

    let first = &model.variants[0].ident;

    quote! {
        impl #root::core::marshal::EnumLeaf for #ident {
            const NAMED_VALUES: &'static [(&'static str, i64)] = #named;

            fn to_index(self) -> i64 {
                match self {
                    #(#to_arms),*
                }
            }

            fn from_index(index: i64) -> ::core::option::Option<Self> {
                match index {
                    #(#from_arms,)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl #root::core::marshal::Leaf for #ident {
            const KIND: #root::core::scalar::ScalarKind = #root::core::scalar::ScalarKind::Int;
            const IS_ENUM: bool = true;
            const NAMED_VALUES: &'static [(&'static str, i64)] =
                <Self as #root::core::marshal::EnumLeaf>::NAMED_VALUES;

            fn from_scalar(
                scalar: &#root::core::scalar::Scalar,
            ) -> ::core::result::Result<Self, #root::core::marshal::CoerceError> {
                let index = <i64 as #root::core::marshal::Leaf>::from_scalar(scalar)?;

                <Self as #root::core::marshal::EnumLeaf>::from_index(index)
                    .ok_or(#root::core::marshal::CoerceError::EnumIndex { index })
            }

            fn to_scalar(&self) -> #root::core::scalar::Scalar {
                #root::core::scalar::Scalar::Int(
                    <Self as #root::core::marshal::EnumLeaf>::to_index(*self),
                )
            }

            fn zero() -> Self {
                Self::#first
            }
        }

        #root::impl_item_pin!(#ident);
    }
}
