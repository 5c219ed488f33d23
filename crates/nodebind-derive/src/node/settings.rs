use crate::{node::param::RangeArgs, prelude::*};
use syn::{Fields, ItemStruct, Lit, Type};

///
/// SettingsArgs
///

#[derive(Debug, FromMeta)]
pub struct SettingsArgs {
    pub namespace: String,
}

///
/// SettingArgs
///
/// Per-field metadata on `#[setting(..)]`. The range is display-only at
/// this layer: setters persist values verbatim.
///

#[derive(Debug, Default, FromMeta)]
pub struct SettingArgs {
    #[darling(default)]
    pub default: Option<Lit>,

    #[darling(default)]
    pub range: Option<RangeArgs>,

    #[darling(default)]
    pub name: Option<String>,

    #[darling(default, rename = "desc")]
    pub description: Option<String>,
}

///
/// FieldModel
///

#[derive(Debug)]
pub struct FieldModel {
    pub ident: Ident,
    pub ty: Type,
    pub args: SettingArgs,
}

///
/// SettingsModel
///
/// A settings struct: every named field becomes one persisted entry keyed
/// by "namespace.Struct.field".
///

#[derive(Debug)]
pub struct SettingsModel {
    pub args: SettingsArgs,
    pub ident: Ident,
    pub fields: Vec<FieldModel>,
}

impl SettingsModel {
    pub fn from_item(
        args: SettingsArgs,
        item: &mut ItemStruct,
        diagnostics: &mut Vec<Diagnostic>,
        errors: &mut Vec<TokenStream>,
    ) -> Option<Self> {
        let Fields::Named(named) = &mut item.fields else {
            diagnostics.push(Diagnostic::new(
                Code::NB0006,
                item.ident.span(),
                format!("settings struct '{}' must use named fields", item.ident),
            ));
            return None;
        };

        let mut generatable = true;
        let mut fields = Vec::with_capacity(named.named.len());

        for field in &mut named.named {
            let mut setting = SettingArgs::default();

            let mut kept = Vec::with_capacity(field.attrs.len());
            for attr in field.attrs.drain(..) {
                if attr.path().is_ident("setting") {
                    match SettingArgs::from_meta(&attr.meta) {
                        Ok(parsed) => setting = parsed,
                        Err(err) => {
                            errors.push(err.with_span(&attr).write_errors());
                            generatable = false;
                        }
                    }
                } else {
                    kept.push(attr);
                }
            }
            field.attrs = kept;

            let Some(ident) = field.ident.clone() else {
                continue;
            };

            fields.push(FieldModel {
                ident,
                ty: field.ty.clone(),
                args: setting,
            });
        }

        generatable.then_some(Self {
            args,
            ident: item.ident.clone(),
            fields,
        })
    }

    /// Storage key of one field: the plain string concatenation the host
    /// store is addressed with.
    pub fn key(&self, field: &FieldModel) -> String {
        format!("{}.{}.{}", self.args.namespace, self.ident, field.ident)
    }

    /// Identity of one field, hashed at expansion time.
    pub fn field_id(&self, field: &FieldModel) -> u64 {
        nodebind_utils::node_id(
            &self.args.namespace,
            &self.ident.to_string(),
            &field.ident.to_string(),
        )
    }
}
