use crate::{
    node::{
        func::{FuncModel, NodeArgs, direction_tokens},
        param::ParamDirection,
    },
    prelude::*,
    validate,
};
use syn::ItemFn;

/// Expand `#[node(..)]`: re-emit the function with parameter attributes
/// drained, plus one wiring unit — the spec type, its `NodeSpec` impl,
/// and a dispatcher constructor. Validation findings ride along as
/// compile errors without suppressing whatever could be generated.
pub fn expand(args: TokenStream, input: TokenStream) -> TokenStream {
    let attr_args = match darling::ast::NestedMeta::parse_meta_list(args) {
        Ok(list) => list,
        Err(err) => {
            let err = err.to_compile_error();
            return quote!(#err #input);
        }
    };
    let node_args = match NodeArgs::from_list(&attr_args) {
        Ok(parsed) => parsed,
        Err(err) => {
            let err = err.write_errors();
            return quote!(#err #input);
        }
    };

    let mut item: ItemFn = match syn::parse2(input.clone()) {
        Ok(item) => item,
        Err(err) => {
            let err = err.to_compile_error();
            return quote!(#err #input);
        }
    };

    let mut diagnostics = Vec::new();
    let mut errors = Vec::new();
    let model = FuncModel::from_item(node_args, &mut item, &mut diagnostics, &mut errors);

    let wiring = model
        .as_ref()
        .map(|m| wiring(m, &item.vis))
        .unwrap_or_default();
    let findings = validate::emit(&diagnostics);

    quote! {
        #item
        #wiring
        #findings
        #(#errors)*
    }
}

fn wiring(model: &FuncModel, vis: &syn::Visibility) -> TokenStream {
    let root = facade();
    let spec = model.spec_ident();
    let info = info_block(model);
    let inputs = input_descriptors(model);
    let outputs = output_descriptors(model);
    let invoke = invoke_body(model);

    quote! {
        #[derive(Clone, Copy, Debug, Default)]
        #vis struct #spec;

        impl #spec {
            /// Construct the dispatcher wired to this declaration.
            #vis fn dispatcher(
                registry: &#root::core::registry::KindRegistry,
            ) -> #root::core::dispatcher::MethodDispatcher<Self> {
                #root::core::dispatcher::MethodDispatcher::new(registry)
            }
        }

        impl #root::core::dispatcher::NodeSpec for #spec {
            #info

            fn inputs(
                registry: &#root::core::registry::KindRegistry,
            ) -> ::std::vec::Vec<#root::core::descriptor::ParamDescriptor> {
                ::std::vec![#(#inputs),*]
            }

            fn outputs(
                registry: &#root::core::registry::KindRegistry,
            ) -> ::std::vec::Vec<#root::core::descriptor::ParamDescriptor> {
                ::std::vec![#(#outputs),*]
            }

            // obsolete declarations stay invocable without tripping their
            // own deprecation lint
            #[allow(deprecated)]
            fn invoke(
                cycle: &mut #root::core::dispatcher::Cycle<'_>,
            ) -> ::core::result::Result<(), #root::core::dispatcher::CycleBreak> {
                #invoke
            }
        }
    }
}

fn info_block(model: &FuncModel) -> TokenStream {
    let root = facade();
    let id = model.node_id();
    let name = model.display_name();
    let name = name.as_str();
    let nick = model.nick();
    let nick = nick.as_str();
    let description = model.args.description.clone().unwrap_or_default();
    let description = description.as_str();
    let namespace = model.args.namespace.as_str();
    let category = model.args.category.clone().unwrap_or_default();
    let category = category.as_str();
    let subcategory = model.args.subcategory.clone().unwrap_or_default();
    let subcategory = subcategory.as_str();
    let obsolete = model.obsolete;
    let parallel_safe = model.args.parallel_safe;

    quote! {
        const INFO: #root::core::dispatcher::NodeInfo = #root::core::dispatcher::NodeInfo {
            id: #root::core::dispatcher::NodeId(#id),
            name: #name,
            nick: #nick,
            description: #description,
            namespace: #namespace,
            category: #category,
            subcategory: #subcategory,
            obsolete: #obsolete,
            parallel_safe: #parallel_safe,
        };
    }
}

fn input_descriptors(model: &FuncModel) -> Vec<TokenStream> {
    model
        .inputs()
        .map(|p| p.descriptor(direction_tokens(p.direction)))
        .collect()
}

fn output_descriptors(model: &FuncModel) -> Vec<TokenStream> {
    let root = facade();
    let mut descriptors = Vec::new();

    if let Some(result) = &model.result {
        let ty = &result.ty;
        let name = model.result_name();
        let name = name.as_str();

        descriptors.push(quote! {
            #root::core::descriptor::ParamDescriptor::new::<#ty>(
                registry,
                #root::core::descriptor::Direction::Out,
                #name,
            )
        });
    }

    descriptors.extend(
        model
            .outputs()
            .map(|p| p.descriptor(direction_tokens(p.direction))),
    );

    descriptors
}

fn invoke_body(model: &FuncModel) -> TokenStream {
    let root = facade();
    let fn_ident = &model.ident;

    // input pulls and output pre-fills, declaration order
    let mut bindings = Vec::new();
    let mut input_slot = 0_usize;
    for param in &model.params {
        let ident = &param.ident;
        let ty = &param.ty;

        let binding = match param.direction {
            ParamDirection::In => {
                let slot = input_slot;
                input_slot += 1;
                quote!(let #ident: #ty = cycle.input(#slot)?;)
            }
            ParamDirection::InOut => {
                let slot = input_slot;
                input_slot += 1;
                quote!(let mut #ident: #ty = cycle.input(#slot)?;)
            }
            ParamDirection::Out => {
                quote!(let mut #ident: #ty = <#ty as #root::core::marshal::PinData>::empty();)
            }
        };
        bindings.push(binding);
    }

    // positional call
    let call_args = model.params.iter().map(|param| {
        let ident = &param.ident;
        if param.by_ref {
            quote!(&mut #ident)
        } else {
            quote!(#ident)
        }
    });
    let call = quote!(#fn_ident(#(#call_args),*));

    let invocation = match &model.result {
        None => quote!(#call;),
        Some(result) if result.fallible => quote! {
            let __result = match #call {
                ::core::result::Result::Ok(value) => value,
                ::core::result::Result::Err(err) => {
                    return ::core::result::Result::Err(
                        #root::core::dispatcher::CycleBreak::target(err),
                    );
                }
            };
        },
        Some(_) => quote!(let __result = #call;),
    };

    // pushes: return value first, then Out/InOut parameters
    let mut writes = Vec::new();
    let mut output_slot = 0_usize;
    if model.result.is_some() {
        writes.push(quote!(cycle.output(#output_slot, &__result)?;));
        output_slot += 1;
    }
    for param in model.outputs() {
        let ident = &param.ident;
        let slot = output_slot;
        output_slot += 1;
        writes.push(quote!(cycle.output(#slot, &#ident)?;));
    }

    quote! {
        #(#bindings)*
        #invocation
        #(#writes)*
        ::core::result::Result::Ok(())
    }
}
