use crate::{
    node::param::{ParamDirection, ParamModel, strip_reference},
    prelude::*,
};
use syn::{FnArg, ItemFn, ReturnType, Type};

///
/// NodeArgs
///
/// Function-level metadata carried on `#[node(..)]`. `namespace` is
/// mandatory: together with `owner` and the function name it forms the
/// identity triple.
///

#[derive(Debug, FromMeta)]
pub struct NodeArgs {
    pub namespace: String,

    #[darling(default)]
    pub owner: Option<String>,

    #[darling(default)]
    pub name: Option<String>,

    #[darling(default)]
    pub nick: Option<String>,

    #[darling(default)]
    pub description: Option<String>,

    #[darling(default)]
    pub category: Option<String>,

    #[darling(default)]
    pub subcategory: Option<String>,

    /// Display name of the return-value output slot.
    #[darling(default)]
    pub output: Option<String>,

    #[darling(default)]
    pub parallel_safe: bool,
}

///
/// ResultModel
///
/// The return-value output: its declared type, and whether the function
/// is fallible (`Result<T, E>`; an `Err` is a cycle-fatal fault).
///

#[derive(Debug)]
pub struct ResultModel {
    pub ty: Type,
    pub fallible: bool,
}

///
/// FuncModel
///
/// One exposed function, fully resolved: metadata, parameters in
/// declaration order, and the return-value output.
///

#[derive(Debug)]
pub struct FuncModel {
    pub args: NodeArgs,
    pub ident: Ident,
    pub obsolete: bool,
    pub params: Vec<ParamModel>,
    pub result: Option<ResultModel>,
}

impl FuncModel {
    /// Build the model, draining parameter attributes from `item`. A
    /// receiver makes the declaration ungeneratable; everything else is
    /// non-fatal.
    pub fn from_item(
        args: NodeArgs,
        item: &mut ItemFn,
        diagnostics: &mut Vec<Diagnostic>,
        errors: &mut Vec<TokenStream>,
    ) -> Option<Self> {
        let mut generatable = true;
        let mut params = Vec::new();

        for input in &mut item.sig.inputs {
            match input {
                FnArg::Receiver(receiver) => {
                    diagnostics.push(Diagnostic::new(
                        Code::NB0004,
                        receiver.span(),
                        format!(
                            "function '{}' must be callable without an instance",
                            item.sig.ident
                        ),
                    ));
                    generatable = false;
                }
                FnArg::Typed(arg) => {
                    if let Some(param) = ParamModel::from_arg(arg, diagnostics, errors) {
                        params.push(param);
                    } else {
                        generatable = false;
                    }
                }
            }
        }

        let result = parse_result(&item.sig.output);
        let obsolete = item.attrs.iter().any(|a| a.path().is_ident("deprecated"));

        let model = Self {
            args,
            ident: item.sig.ident.clone(),
            obsolete,
            params,
            result,
        };
        model.validate(diagnostics);

        generatable.then_some(model)
    }

    /// Output names must be unique across the return value and every
    /// Out/InOut parameter.
    fn validate(&self, diagnostics: &mut Vec<Diagnostic>) {
        let mut seen: Vec<String> = Vec::new();

        for name in self.output_names() {
            if seen.contains(&name) {
                diagnostics.push(Diagnostic::new(
                    Code::NB0007,
                    self.ident.span(),
                    format!("output '{name}' appears more than once"),
                ));
            } else {
                seen.push(name);
            }
        }
    }

    pub fn result_name(&self) -> String {
        self.args.output.clone().unwrap_or_else(|| "result".into())
    }

    fn output_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        if self.result.is_some() {
            names.push(self.result_name());
        }
        names.extend(
            self.params
                .iter()
                .filter(|p| p.direction.is_output())
                .map(ParamModel::display_name),
        );

        names
    }

    pub fn inputs(&self) -> impl Iterator<Item = &ParamModel> {
        self.params.iter().filter(|p| p.direction.is_input())
    }

    pub fn outputs(&self) -> impl Iterator<Item = &ParamModel> {
        self.params.iter().filter(|p| p.direction.is_output())
    }

    /// Identity triple → hashed once, here, at expansion time.
    pub fn node_id(&self) -> u64 {
        nodebind_utils::node_id(
            &self.args.namespace,
            self.args.owner.as_deref().unwrap_or(""),
            &self.ident.to_string(),
        )
    }

    /// Display name; an obsolete marker is appended after hashing and
    /// never feeds the identity.
    pub fn display_name(&self) -> String {
        let base = self
            .args
            .name
            .clone()
            .unwrap_or_else(|| nodebind_utils::case::display_name(&self.ident.to_string()));

        if self.obsolete {
            format!("{base} (OBSOLETE)")
        } else {
            base
        }
    }

    pub fn nick(&self) -> String {
        self.args
            .nick
            .clone()
            .unwrap_or_else(|| self.ident.to_string())
    }

    /// PascalCase wiring type: `add` → `AddNode`.
    pub fn spec_ident(&self) -> Ident {
        let pascal = nodebind_utils::case::pascal_name(&self.ident.to_string());

        format_ident!("{pascal}Node")
    }
}

fn parse_result(output: &ReturnType) -> Option<ResultModel> {
    let ReturnType::Type(_, ty) = output else {
        return None;
    };

    if let Type::Tuple(tuple) = ty.as_ref() {
        if tuple.elems.is_empty() {
            return None;
        }
    }

    if let Type::Path(path) = ty.as_ref() {
        let segment = path.path.segments.last()?;
        if segment.ident == "Result" {
            if let syn::PathArguments::AngleBracketed(generics) = &segment.arguments {
                if let Some(syn::GenericArgument::Type(ok)) = generics.args.first() {
                    let (ty, _) = strip_reference(ok);
                    return Some(ResultModel { ty, fallible: true });
                }
            }
        }
    }

    let (ty, _) = strip_reference(ty);
    Some(ResultModel {
        ty,
        fallible: false,
    })
}

// direction token helpers shared by emit

pub fn direction_tokens(direction: ParamDirection) -> TokenStream {
    let root = facade();

    match direction {
        ParamDirection::In => quote!(#root::core::descriptor::Direction::In),
        ParamDirection::InOut => quote!(#root::core::descriptor::Direction::InOut),
        ParamDirection::Out => quote!(#root::core::descriptor::Direction::Out),
    }
}

///
/// TESTS
///
