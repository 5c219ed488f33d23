use crate::prelude::*;
use syn::{Lit, PatType, Type};

///
/// ParamArgs
///
/// Per-parameter metadata carried on `#[param(..)]`.
///

#[derive(Debug, Default, FromMeta)]
pub struct ParamArgs {
    #[darling(default)]
    pub name: Option<String>,

    #[darling(default)]
    pub nick: Option<String>,

    #[darling(default, rename = "desc")]
    pub description: Option<String>,

    #[darling(default)]
    pub range: Option<RangeArgs>,

    #[darling(default)]
    pub angle: bool,

    #[darling(default)]
    pub hidden: bool,

    #[darling(default)]
    pub toggle: bool,

    #[darling(default)]
    pub out: bool,

    #[darling(default)]
    pub default: Option<Lit>,

    #[darling(default)]
    pub kind: Option<String>,
}

///
/// RangeArgs
///

#[derive(Clone, Copy, Debug, FromMeta)]
pub struct RangeArgs {
    pub min: f64,
    pub max: f64,
}

///
/// ParamDirection
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParamDirection {
    In,
    InOut,
    Out,
}

impl ParamDirection {
    pub const fn is_input(self) -> bool {
        matches!(self, Self::In | Self::InOut)
    }

    pub const fn is_output(self) -> bool {
        matches!(self, Self::Out | Self::InOut)
    }
}

///
/// ParamModel
///
/// One declared function parameter: stripped type, inferred direction,
/// and its metadata.
///

#[derive(Debug)]
pub struct ParamModel {
    pub ident: Ident,
    pub ty: Type,
    pub by_ref: bool,
    pub direction: ParamDirection,
    pub args: ParamArgs,
}

impl ParamModel {
    /// Extract the model from a typed argument, draining the `#[param]`
    /// attribute so the emitted function is plain Rust again. Attribute
    /// parse failures land in `errors` as ordinary compile errors.
    pub fn from_arg(
        arg: &mut PatType,
        diagnostics: &mut Vec<Diagnostic>,
        errors: &mut Vec<TokenStream>,
    ) -> Option<Self> {
        let mut args = ParamArgs::default();

        let mut kept = Vec::with_capacity(arg.attrs.len());
        for attr in arg.attrs.drain(..) {
            if attr.path().is_ident("param") {
                match ParamArgs::from_meta(&attr.meta) {
                    Ok(parsed) => args = parsed,
                    Err(err) => {
                        errors.push(err.with_span(&attr).write_errors());
                        return None;
                    }
                }
            } else {
                kept.push(attr);
            }
        }
        arg.attrs = kept;

        let ident = match arg.pat.as_ref() {
            syn::Pat::Ident(pat) => pat.ident.clone(),
            other => {
                diagnostics.push(Diagnostic::new(
                    Code::NB0004,
                    other.span(),
                    "exposed parameters must be plain identifiers",
                ));
                return None;
            }
        };

        let (ty, by_ref) = strip_reference(arg.ty.as_ref());
        let direction = if args.out {
            ParamDirection::Out
        } else if by_ref {
            ParamDirection::InOut
        } else {
            ParamDirection::In
        };

        let model = Self {
            ident,
            ty,
            by_ref,
            direction,
            args,
        };
        model.validate(diagnostics);

        Some(model)
    }

    /// Metadata checks that only need the declared syntax. Non-fatal:
    /// generation proceeds with the offending flag honored as written.
    fn validate(&self, diagnostics: &mut Vec<Diagnostic>) {
        let leaf = leaf_ident(&self.ty);

        if self.args.toggle && leaf.as_deref() != Some("bool") {
            diagnostics.push(Diagnostic::new(
                Code::NB0003,
                self.ident.span(),
                format!("parameter '{}' is tagged toggle but is not bool", self.ident),
            ));
        }

        if self.args.range.is_some()
            && matches!(leaf.as_deref(), Some("bool" | "String" | "str"))
        {
            diagnostics.push(Diagnostic::new(
                Code::NB0002,
                self.ident.span(),
                format!("parameter '{}' carries a range but is not numeric", self.ident),
            ));
        }

        if self.args.angle && !matches!(leaf.as_deref(), Some("f32" | "f64")) {
            diagnostics.push(Diagnostic::new(
                Code::NB0001,
                self.ident.span(),
                format!("parameter '{}' is tagged angle but is not floating", self.ident),
            ));
        }
    }

    pub fn display_name(&self) -> String {
        self.args
            .name
            .clone()
            .unwrap_or_else(|| self.ident.to_string())
    }

    pub fn nick(&self) -> String {
        self.args
            .nick
            .clone()
            .unwrap_or_else(|| nodebind_utils::case::nickname(&self.ident.to_string()))
    }

    /// Builder-chain expression constructing this slot's descriptor.
    pub fn descriptor(&self, direction: TokenStream) -> TokenStream {
        let root = facade();
        let ty = &self.ty;
        let name = self.display_name();
        let name = name.as_str();
        let nick = self.nick();
        let nick = nick.as_str();
        let description = self.args.description.clone().unwrap_or_default();
        let description = description.as_str();

        let mut expr = quote! {
            #root::core::descriptor::ParamDescriptor::new::<#ty>(registry, #direction, #name)
                .with_nick(#nick)
                .with_description(#description)
        };

        if let Some(range) = self.args.range {
            let (min, max) = (range.min, range.max);
            expr = quote!(#expr.with_range(#min, #max));
        }
        if let Some(default) = &self.args.default {
            let scalar = scalar_from_lit(default);
            expr = quote!(#expr.with_default(#scalar));
        }
        if let Some(kind) = &self.args.kind {
            let kind = param_kind_path(kind);
            expr = quote!(#expr.with_kind(#kind));
        }
        if self.args.angle {
            expr = quote!(#expr.as_angle());
        }
        if self.args.hidden {
            expr = quote!(#expr.as_hidden());
        }

        expr
    }
}

/// Strip one layer of `&`/`&mut`, reporting whether the parameter is a
/// mutable reference (the InOut marker).
pub fn strip_reference(ty: &Type) -> (Type, bool) {
    if let Type::Reference(reference) = ty {
        let by_ref = reference.mutability.is_some();
        ((*reference.elem).clone(), by_ref)
    } else {
        (ty.clone(), false)
    }
}

/// Innermost element ident of the declared type, as far as the syntax
/// shows it: `Vec<f64>` → `f64`, `[i32; 3]` → `i32`, `DataTree<Option<u32>>`
/// → `u32`. Unknown shapes return `None` and skip syntactic validation.
pub fn leaf_ident(ty: &Type) -> Option<String> {
    match ty {
        Type::Reference(reference) => leaf_ident(&reference.elem),
        Type::Array(array) => leaf_ident(&array.elem),
        Type::Path(path) => {
            let segment = path.path.segments.last()?;
            let name = segment.ident.to_string();

            if matches!(name.as_str(), "Vec" | "Option" | "DataTree") {
                if let syn::PathArguments::AngleBracketed(generics) = &segment.arguments {
                    for arg in &generics.args {
                        if let syn::GenericArgument::Type(inner) = arg {
                            return leaf_ident(inner);
                        }
                    }
                }
                None
            } else {
                Some(name)
            }
        }
        _ => None,
    }
}

/// Literal default → `Scalar` construction tokens.
pub fn scalar_from_lit(lit: &Lit) -> TokenStream {
    let root = facade();

    match lit {
        Lit::Int(int) => quote!(#root::core::scalar::Scalar::Int(#int)),
        Lit::Float(float) => quote!(#root::core::scalar::Scalar::Float(#float)),
        Lit::Bool(boolean) => quote!(#root::core::scalar::Scalar::Bool(#boolean)),
        Lit::Str(text) => {
            quote!(#root::core::scalar::Scalar::Text(::std::string::String::from(#text)))
        }
        other => {
            let message = "unsupported default literal";
            quote_spanned_error(other.span(), message)
        }
    }
}

/// Explicit identity-override string → `ParamKind` path.
pub fn param_kind_path(kind: &str) -> TokenStream {
    let root = facade();
    let variant = match kind {
        "boolean" => quote!(Boolean),
        "integer" => quote!(Integer),
        "number" => quote!(Number),
        "text" => quote!(Text),
        "enumeration" => quote!(Enumeration),
        _ => quote!(Universal),
    };

    quote!(#root::core::registry::ParamKind::#variant)
}

fn quote_spanned_error(span: proc_macro2::Span, message: &str) -> TokenStream {
    let err = syn::Error::new(span, message);
    err.to_compile_error()
}

///
/// TESTS
///
