use crate::{
    access::DataAccess,
    marshal::{Leaf, PinData},
    message::RuntimeMessage,
    raw::{Access, Raw},
    registry::{KindRegistry, ParamHandle, ParamKind},
    scalar::{Scalar, ScalarKind},
};
use serde::{Deserialize, Serialize};

///
/// Direction
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    In,
    Out,
    InOut,
}

impl Direction {
    #[must_use]
    pub const fn is_input(self) -> bool {
        matches!(self, Self::In | Self::InOut)
    }

    #[must_use]
    pub const fn is_output(self) -> bool {
        matches!(self, Self::Out | Self::InOut)
    }
}

///
/// RangeConstraint
///
/// Declarative clamp bounds for numeric leaves. At the settings layer the
/// same metadata is display-only and never clamps.
///

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RangeConstraint {
    pub min: f64,
    pub max: f64,
}

impl RangeConstraint {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

///
/// AngleUnit
///
/// Display unit of an angular slot. Radians is the canonical internal
/// unit; conversion applies only while the host displays degrees.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum AngleUnit {
    #[default]
    Radians,
    Degrees,
}

///
/// TypeDesc
///
/// Immutable classification of one declared parameter type, fixed at
/// descriptor construction: shape, leaf kind, surrogate, and the resolved
/// parameter identity. Never re-derived on the evaluation path.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TypeDesc {
    pub access: Access,
    pub kind: ScalarKind,
    pub is_enum: bool,
    pub param_kind: ParamKind,
}

impl TypeDesc {
    #[must_use]
    pub fn of<T: PinData>(registry: &KindRegistry) -> Self {
        let kind = <T::Leaf as Leaf>::KIND;
        let is_enum = <T::Leaf as Leaf>::IS_ENUM;

        Self {
            access: T::ACCESS,
            kind,
            is_enum,
            param_kind: registry.match_kind(kind, is_enum),
        }
    }

    /// Host-facing leaf kind; `Int` stands in for enumerations.
    #[must_use]
    pub const fn surrogate(&self) -> ScalarKind {
        if self.is_enum { ScalarKind::Int } else { self.kind }
    }
}

///
/// Fetched
///
/// Outcome of one `get_value` call. `Missing` models "upstream data not
/// yet available" and is not an error.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Fetched<T> {
    Missing(Vec<RuntimeMessage>),
    Value {
        value: T,
        messages: Vec<RuntimeMessage>,
    },
}

///
/// ParamDescriptor
///
/// One function parameter or output: type classification plus
/// per-declaration metadata. Built once when the owning component
/// registers its slots; read on every evaluation cycle.
///

#[derive(Clone, Debug)]
pub struct ParamDescriptor {
    pub type_desc: TypeDesc,
    pub direction: Direction,
    pub range: Option<RangeConstraint>,
    pub angle: bool,
    pub hidden: bool,
    pub default: Option<Scalar>,
    pub kind_override: Option<ParamKind>,
    pub optional: bool,
    pub name: &'static str,
    pub nick: &'static str,
    pub description: &'static str,
    pub named_values: &'static [(&'static str, i64)],
}

impl ParamDescriptor {
    #[must_use]
    pub fn new<T: PinData>(
        registry: &KindRegistry,
        direction: Direction,
        name: &'static str,
    ) -> Self {
        Self {
            type_desc: TypeDesc::of::<T>(registry),
            direction,
            range: None,
            angle: false,
            hidden: false,
            default: None,
            kind_override: None,
            optional: T::OPTIONAL,
            name,
            nick: "",
            description: "",
            named_values: <T::Leaf as Leaf>::NAMED_VALUES,
        }
    }

    #[must_use]
    pub const fn with_nick(mut self, nick: &'static str) -> Self {
        self.nick = nick;
        self
    }

    #[must_use]
    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    #[must_use]
    pub const fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range = Some(RangeConstraint::new(min, max));
        self
    }

    #[must_use]
    pub fn with_default(mut self, default: Scalar) -> Self {
        self.default = Some(default);
        self
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: ParamKind) -> Self {
        self.kind_override = Some(kind);
        self
    }

    #[must_use]
    pub const fn as_angle(mut self) -> Self {
        self.angle = true;
        self
    }

    #[must_use]
    pub const fn as_hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Pull and coerce one slot. Shape per the declared type, constraints
    /// per leaf, messages accumulated per clamped leaf.
    pub fn get_value<T: PinData>(
        &self,
        access: &dyn DataAccess,
        slot: usize,
        unit: AngleUnit,
    ) -> Fetched<T> {
        let Some(raw) = access.get(slot, T::ACCESS) else {
            return Fetched::Missing(Vec::new());
        };

        let mut messages = Vec::new();
        let raw = self.constrain(raw, unit, &mut messages);

        match T::from_raw(raw) {
            Ok(value) => Fetched::Value { value, messages },
            Err(err) => {
                messages.push(RuntimeMessage::error(err.to_string()));
                Fetched::Missing(messages)
            }
        }
    }

    /// Inverse of `get_value`: declared value back to the host container.
    /// An omitted optional clears the slot.
    pub fn set_value<T: PinData>(
        &self,
        access: &mut dyn DataAccess,
        slot: usize,
        value: &T,
    ) -> bool {
        match value.to_raw() {
            Some(raw) => access.set(slot, raw),
            None => access.clear(slot),
        }
    }

    /// Instantiate the host parameter for this slot: resolve the identity
    /// (or the explicit override) to a factory, then copy metadata on. A
    /// persistent default suppresses the optional marker.
    #[must_use]
    pub fn create_host_param(&self, registry: &KindRegistry) -> ParamHandle {
        let kind = self.kind_override.unwrap_or(self.type_desc.param_kind);
        let factory = registry.resolve(kind);

        let mut handle = factory(kind);
        handle.name = self.name;
        handle.nick = self.nick;

        if let Some(default) = &self.default {
            handle.default = Some(default.clone());
        } else if self.optional {
            handle.optional = true;
        }

        handle.angle = self.angle;
        handle.hidden = self.hidden;
        handle.named_values = self.named_values;

        handle
    }

    /// Apply range clamp then angle conversion to every numeric leaf.
    /// In-range values pass silently; each clamped leaf emits exactly one
    /// warning citing old and new value.
    fn constrain(
        &self,
        raw: Raw,
        unit: AngleUnit,
        messages: &mut Vec<RuntimeMessage>,
    ) -> Raw {
        let convert_angle = self.angle && unit == AngleUnit::Degrees;
        if self.range.is_none() && !convert_angle {
            return raw;
        }

        raw.map_scalars(|scalar| {
            let mut scalar = scalar;

            if let (Some(range), Some(value)) = (self.range, scalar.as_f64()) {
                if !range.contains(value) {
                    let clamped = scalar.with_f64(range.clamp(value));
                    messages.push(RuntimeMessage::warning(format!(
                        "value {scalar} outside [{}..{}], clamped to {clamped}",
                        range.min, range.max
                    )));
                    scalar = clamped;
                }
            }

            if convert_angle {
                if let Scalar::Float(degrees) = scalar {
                    scalar = Scalar::Float(degrees.to_radians());
                }
            }

            scalar
        })
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{access::MemoryAccess, tree::DataTree, tree::TreePath};
    use proptest::prelude::*;

    fn registry() -> KindRegistry {
        KindRegistry::standard()
    }

    fn int_input(name: &'static str) -> ParamDescriptor {
        ParamDescriptor::new::<i64>(&registry(), Direction::In, name)
    }

    #[test]
    fn in_range_values_pass_without_messages() {
        let desc = int_input("a").with_range(0.0, 5.0);
        let mut access = MemoryAccess::new();
        access.seed(0, Raw::Item(Scalar::Int(3)));

        let fetched: Fetched<i64> = desc.get_value(&access, 0, AngleUnit::Radians);

        assert_eq!(
            fetched,
            Fetched::Value {
                value: 3,
                messages: Vec::new(),
            }
        );
    }

    #[test]
    fn out_of_range_values_clamp_with_one_warning() {
        let desc = int_input("a").with_range(0.0, 5.0);
        let mut access = MemoryAccess::new();
        access.seed(0, Raw::Item(Scalar::Int(10)));

        let Fetched::Value { value, messages } =
            desc.get_value::<i64>(&access, 0, AngleUnit::Radians)
        else {
            panic!("expected a value");
        };

        assert_eq!(value, 5);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].text.contains("10"));
        assert!(messages[0].text.contains('5'));
    }

    #[test]
    fn clamping_is_per_leaf_across_branches() {
        // branch {0;0} = [2, 7], branch {0;1} = [-1], range [0, 5]
        let desc = ParamDescriptor::new::<DataTree<i64>>(&registry(), Direction::In, "t")
            .with_range(0.0, 5.0);

        let mut tree = DataTree::new();
        tree.insert(TreePath::from([0, 0]), vec![Scalar::Int(2), Scalar::Int(7)]);
        tree.insert(TreePath::from([0, 1]), vec![Scalar::Int(-1)]);

        let mut access = MemoryAccess::new();
        access.seed(0, Raw::Tree(tree));

        let Fetched::Value { value, messages } =
            desc.get_value::<DataTree<i64>>(&access, 0, AngleUnit::Radians)
        else {
            panic!("expected a value");
        };

        assert_eq!(
            value.branch(&TreePath::from([0, 0])),
            Some([2, 5].as_slice())
        );
        assert_eq!(value.branch(&TreePath::from([0, 1])), Some([0].as_slice()));
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn angle_conversion_applies_after_clamp_in_degrees_display() {
        let desc = ParamDescriptor::new::<f64>(&registry(), Direction::In, "angle")
            .with_range(0.0, 180.0)
            .as_angle();

        let mut access = MemoryAccess::new();
        access.seed(0, Raw::Item(Scalar::Float(270.0)));

        let Fetched::Value { value, messages } =
            desc.get_value::<f64>(&access, 0, AngleUnit::Degrees)
        else {
            panic!("expected a value");
        };

        assert!((value - 180.0_f64.to_radians()).abs() < 1e-12);
        assert_eq!(messages.len(), 1);
    }

    #[test]
    fn radian_display_converts_nothing() {
        let desc = ParamDescriptor::new::<f64>(&registry(), Direction::In, "angle").as_angle();
        let mut access = MemoryAccess::new();
        access.seed(0, Raw::Item(Scalar::Float(1.5)));

        let fetched: Fetched<f64> = desc.get_value(&access, 0, AngleUnit::Radians);

        assert_eq!(
            fetched,
            Fetched::Value {
                value: 1.5,
                messages: Vec::new(),
            }
        );
    }

    #[test]
    fn missing_slot_reports_missing() {
        let desc = int_input("a");
        let access = MemoryAccess::new();

        assert_eq!(
            desc.get_value::<i64>(&access, 0, AngleUnit::Radians),
            Fetched::Missing(Vec::new())
        );
    }

    #[test]
    fn coercion_failure_degrades_to_missing_with_error() {
        let desc = int_input("a");
        let mut access = MemoryAccess::new();
        access.seed(0, Raw::Item(Scalar::Text("nope".into())));

        let Fetched::Missing(messages) = desc.get_value::<i64>(&access, 0, AngleUnit::Radians)
        else {
            panic!("expected missing");
        };

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].severity, crate::message::Severity::Error);
    }

    #[test]
    fn set_value_round_trips_through_the_access_object() {
        let desc = ParamDescriptor::new::<Vec<i64>>(&registry(), Direction::Out, "out");
        let mut access = MemoryAccess::new();

        assert!(desc.set_value(&mut access, 0, &vec![1_i64, 2, 3]));
        assert_eq!(
            access.output(0),
            Some(&Raw::List(vec![
                Scalar::Int(1),
                Scalar::Int(2),
                Scalar::Int(3)
            ]))
        );
    }

    #[test]
    fn omitted_optional_clears_the_slot() {
        let desc = ParamDescriptor::new::<Option<i64>>(&registry(), Direction::Out, "out");
        let mut access = MemoryAccess::new();

        assert!(desc.set_value(&mut access, 0, &None::<i64>));
        assert_eq!(access.output(0), None);
    }

    #[test]
    fn host_param_default_suppresses_optional() {
        let with_default = ParamDescriptor::new::<Option<i64>>(&registry(), Direction::In, "a")
            .with_default(Scalar::Int(4));
        let handle = with_default.create_host_param(&registry());

        assert_eq!(handle.default, Some(Scalar::Int(4)));
        assert!(!handle.optional);

        let without_default =
            ParamDescriptor::new::<Option<i64>>(&registry(), Direction::In, "a");
        assert!(without_default.create_host_param(&registry()).optional);
    }

    #[test]
    fn kind_override_beats_the_resolved_identity() {
        let desc = int_input("a").with_kind(ParamKind::Number);

        assert_eq!(desc.create_host_param(&registry()).kind, ParamKind::Number);
    }

    proptest! {
        #[test]
        fn clamp_is_idempotent(value in -100.0_f64..100.0, lo in -10.0_f64..0.0, hi in 0.0_f64..10.0) {
            let range = RangeConstraint::new(lo, hi);
            let once = range.clamp(value);

            prop_assert_eq!(range.clamp(once), once);
            prop_assert!(range.contains(once));
        }
    }
}
