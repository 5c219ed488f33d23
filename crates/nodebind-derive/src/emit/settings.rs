use crate::{
    node::settings::{FieldModel, SettingsArgs, SettingsModel},
    prelude::*,
    validate,
};
use syn::{ItemStruct, Lit};

/// Expand `#[settings(..)]`: re-emit the struct with field attributes
/// drained, plus one accessor/setter/reset/change-hook group per field,
/// each keyed by "namespace.Struct.field" with a literal identity.
pub fn expand(args: TokenStream, input: TokenStream) -> TokenStream {
    let attr_args = match darling::ast::NestedMeta::parse_meta_list(args) {
        Ok(list) => list,
        Err(err) => {
            let err = err.to_compile_error();
            return quote!(#err #input);
        }
    };
    let settings_args = match SettingsArgs::from_list(&attr_args) {
        Ok(parsed) => parsed,
        Err(err) => {
            let err = err.write_errors();
            return quote!(#err #input);
        }
    };

    let mut item: ItemStruct = match syn::parse2(input.clone()) {
        Ok(item) => item,
        Err(err) => {
            let err = err.to_compile_error();
            return quote!(#err #input);
        }
    };

    let mut diagnostics = Vec::new();
    let mut errors = Vec::new();
    let model = SettingsModel::from_item(settings_args, &mut item, &mut diagnostics, &mut errors);

    let accessors = model.as_ref().map(accessors).unwrap_or_default();
    let findings = validate::emit(&diagnostics);

    quote! {
        #item
        #accessors
        #findings
        #(#errors)*
    }
}

fn accessors(model: &SettingsModel) -> TokenStream {
    let ident = &model.ident;
    let groups: Vec<TokenStream> = model.fields.iter().map(|f| field_group(model, f)).collect();

    quote! {
        impl #ident {
            #(#groups)*
        }
    }
}

fn field_group(model: &SettingsModel, field: &FieldModel) -> TokenStream {
    let root = facade();
    let ty = &field.ty;
    let ident = &field.ident;

    let key = model.key(field);
    let key = key.as_str();
    let id = model.field_id(field);

    let constant = nodebind_utils::case::constant_name(&ident.to_string());
    let key_const = format_ident!("{constant}_KEY");
    let id_const = format_ident!("{constant}_ID");
    let default_fn = format_ident!("{ident}_default");
    let set_fn = format_ident!("set_{ident}");
    let reset_fn = format_ident!("reset_{ident}");
    let changed_fn = format_ident!("on_{ident}_changed");
    let range_fn = format_ident!("{ident}_range");

    let default_expr = default_expr(field);
    let range_expr = quote_option(field.args.range.as_ref(), |range| {
        let (min, max) = (range.min, range.max);
        quote!(#root::core::descriptor::RangeConstraint::new(#min, #max))
    });

    quote! {
        pub const #key_const: &'static str = #key;
        pub const #id_const: #root::core::dispatcher::NodeId =
            #root::core::dispatcher::NodeId(#id);

        pub fn #default_fn() -> #ty {
            #default_expr
        }

        pub fn #ident(hub: &#root::core::settings::SettingsHub) -> #ty {
            hub.get(Self::#key_const, &Self::#default_fn())
        }

        /// Stores the value verbatim; any range metadata only bounds the
        /// slider display.
        pub fn #set_fn(hub: &mut #root::core::settings::SettingsHub, value: #ty) {
            hub.set(Self::#key_const, &value);
        }

        pub fn #reset_fn(hub: &mut #root::core::settings::SettingsHub) {
            hub.reset(Self::#key_const, &Self::#default_fn());
        }

        pub fn #changed_fn(
            hub: &mut #root::core::settings::SettingsHub,
            listener: impl ::core::ops::FnMut(&#root::__reexports::serde_json::Value) + 'static,
        ) {
            hub.subscribe(Self::#key_const, listener);
        }

        pub fn #range_fn() -> ::core::option::Option<#root::core::descriptor::RangeConstraint> {
            #range_expr
        }
    }
}

fn default_expr(field: &FieldModel) -> TokenStream {
    match &field.args.default {
        Some(Lit::Str(text)) => quote!(::std::string::String::from(#text)),
        Some(lit @ (Lit::Int(_) | Lit::Float(_) | Lit::Bool(_))) => quote!(#lit),
        Some(other) => {
            let err = syn::Error::new(other.span(), "unsupported default literal");
            err.to_compile_error()
        }
        None => quote!(::core::default::Default::default()),
    }
}
