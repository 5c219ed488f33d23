use crate::prelude::*;
use syn::{DeriveInput, Expr, ExprLit, ExprUnary, Fields, Lit, UnOp};

///
/// VariantModel
///

#[derive(Debug)]
pub struct VariantModel {
    pub ident: Ident,
    pub index: i64,
    pub display: String,
}

///
/// EnumModel
///
/// A unit-variant enumeration exposed through the integer surrogate.
/// Indices follow explicit discriminants where present, C-style
/// otherwise.
///

#[derive(Debug)]
pub struct EnumModel {
    pub ident: Ident,
    pub variants: Vec<VariantModel>,
}

impl EnumModel {
    pub fn from_input(input: &DeriveInput, diagnostics: &mut Vec<Diagnostic>) -> Option<Self> {
        let syn::Data::Enum(data) = &input.data else {
            diagnostics.push(Diagnostic::new(
                Code::NB0005,
                input.ident.span(),
                format!("'{}' is not an enumeration", input.ident),
            ));
            return None;
        };

        let mut generatable = true;
        let mut variants = Vec::with_capacity(data.variants.len());
        let mut next_index = 0_i64;

        for variant in &data.variants {
            if !matches!(variant.fields, Fields::Unit) {
                diagnostics.push(Diagnostic::new(
                    Code::NB0005,
                    variant.ident.span(),
                    format!("variant '{}' carries fields", variant.ident),
                ));
                generatable = false;
                continue;
            }

            if let Some((_, expr)) = &variant.discriminant {
                match discriminant_value(expr) {
                    Some(value) => next_index = value,
                    None => {
                        diagnostics.push(Diagnostic::new(
                            Code::NB0005,
                            variant.ident.span(),
                            format!(
                                "variant '{}' has a non-literal discriminant",
                                variant.ident
                            ),
                        ));
                        generatable = false;
                        continue;
                    }
                }
            }

            variants.push(VariantModel {
                ident: variant.ident.clone(),
                index: next_index,
                display: nodebind_utils::case::display_name(&variant.ident.to_string()),
            });
            next_index += 1;
        }

        if variants.is_empty() {
            generatable = false;
        }

        generatable.then_some(Self {
            ident: input.ident.clone(),
            variants,
        })
    }

    pub fn named_values(&self) -> Vec<(String, i64)> {
        self.variants
            .iter()
            .map(|v| (v.display.clone(), v.index))
            .collect()
    }
}

fn discriminant_value(expr: &Expr) -> Option<i64> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Int(int), ..
        }) => int.base10_parse().ok(),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr,
            ..
        }) => discriminant_value(expr).map(|v| -v),
        _ => None,
    }
}

///
/// TESTS
///
