use crate::{
    access::DataAccess,
    descriptor::{AngleUnit, Fetched, ParamDescriptor},
    error::InvocationFault,
    marshal::PinData,
    message::RuntimeMessage,
    registry::{KindRegistry, ParamHandle},
    resource::{ResourceCache, ResourceLoader},
    sink::DiagnosticSink,
};
use std::{
    fmt,
    marker::PhantomData,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

///
/// NodeId
///
/// Stable 64-bit identity of a generated node. Computed once at codegen
/// time from (namespace, owner, member) and embedded as a literal; the
/// runtime never recomputes it.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Identity of a declaration triple. Codegen calls this at expansion
    /// time; tests use it to pin stability.
    #[must_use]
    pub const fn derive(namespace: &str, owner: &str, member: &str) -> Self {
        Self(nodebind_utils::node_id(namespace, owner, member))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

///
/// NodeInfo
///
/// Static metadata block of one generated node. `name` is the display
/// name (with any obsolete marker already appended by codegen); `id`
/// never reflects the marker.
///

#[derive(Clone, Copy, Debug)]
pub struct NodeInfo {
    pub id: NodeId,
    pub name: &'static str,
    pub nick: &'static str,
    pub description: &'static str,
    pub namespace: &'static str,
    pub category: &'static str,
    pub subcategory: &'static str,
    pub obsolete: bool,
    pub parallel_safe: bool,
}

///
/// NodeSpec
///
/// Compile-time description of one exposed function, implemented by
/// generated wiring: slot descriptors in declaration order plus the
/// positional invocation body.
///

pub trait NodeSpec {
    const INFO: NodeInfo;

    /// In/InOut slots, declaration order.
    fn inputs(registry: &KindRegistry) -> Vec<ParamDescriptor>;

    /// Out/InOut slots, declaration order.
    fn outputs(registry: &KindRegistry) -> Vec<ParamDescriptor>;

    /// Pull inputs, call the target positionally, push outputs.
    fn invoke(cycle: &mut Cycle<'_>) -> Result<(), CycleBreak>;
}

///
/// CycleBreak
///
/// Why an evaluation stopped early. `Missing` is the silent
/// upstream-not-ready skip; `Fault` is cycle-fatal.
///

#[derive(Debug)]
pub enum CycleBreak {
    Missing { slot: usize },
    Fault(InvocationFault),
}

impl CycleBreak {
    /// Wrap a target-function error for `?`-style use in generated code.
    pub fn target(err: impl fmt::Display) -> Self {
        Self::Fault(InvocationFault::target_error(err.to_string()))
    }
}

///
/// SolveOutcome
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SolveOutcome {
    Completed,
    /// A required input had no data; nothing was invoked or written.
    Skipped,
}

///
/// Cycle
///
/// Borrowed view of one evaluation: slot descriptors, the host data
/// object, and the messages accumulated so far. Lives for exactly one
/// `solve`.
///

pub struct Cycle<'a> {
    access: &'a mut dyn DataAccess,
    inputs: &'a [ParamDescriptor],
    outputs: &'a [ParamDescriptor],
    units: &'a [AngleUnit],
    messages: Vec<(&'static str, RuntimeMessage)>,
}

impl Cycle<'_> {
    /// Marshal one input slot into its declared type. Optional
    /// declarations substitute their missing value; required ones skip
    /// the cycle.
    pub fn input<T: PinData>(&mut self, slot: usize) -> Result<T, CycleBreak> {
        let Some(desc) = self.inputs.get(slot) else {
            return Err(CycleBreak::Fault(InvocationFault::internal(format!(
                "no input descriptor for slot {slot}"
            ))));
        };
        let unit = self.units.get(slot).copied().unwrap_or_default();

        match desc.get_value::<T>(&*self.access, slot, unit) {
            Fetched::Value { value, messages } => {
                self.tag(desc.name, messages);
                Ok(value)
            }
            Fetched::Missing(messages) => {
                self.tag(desc.name, messages);
                T::when_missing().ok_or(CycleBreak::Missing { slot })
            }
        }
    }

    /// Marshal one solved value back to an output slot.
    pub fn output<T: PinData>(&mut self, slot: usize, value: &T) -> Result<(), CycleBreak> {
        let Some(desc) = self.outputs.get(slot) else {
            return Err(CycleBreak::Fault(InvocationFault::internal(format!(
                "no output descriptor for slot {slot}"
            ))));
        };

        if desc.set_value(self.access, slot, value) {
            Ok(())
        } else {
            Err(CycleBreak::Fault(InvocationFault::output_rejected(
                desc.name,
            )))
        }
    }

    fn tag(&mut self, name: &'static str, messages: Vec<RuntimeMessage>) {
        self.messages
            .extend(messages.into_iter().map(|m| (name, m)));
    }
}

///
/// MethodDispatcher
///
/// Orchestrates one exposed function. Construction is the Registering
/// state and runs exactly once: slot descriptors are built and cached
/// immutably. `solve` is the Evaluating state, run once per solve
/// request by the host; the host guarantees at most one concurrent solve
/// per instance, so no locking happens here.
///

pub struct MethodDispatcher<S: NodeSpec> {
    inputs: Vec<ParamDescriptor>,
    outputs: Vec<ParamDescriptor>,
    units: Vec<AngleUnit>,
    icon: ResourceCache,
    _spec: PhantomData<S>,
}

impl<S: NodeSpec> MethodDispatcher<S> {
    #[must_use]
    pub fn new(registry: &KindRegistry) -> Self {
        let inputs = S::inputs(registry);
        let units = vec![AngleUnit::Radians; inputs.len()];

        Self {
            inputs,
            outputs: S::outputs(registry),
            units,
            icon: ResourceCache::new(),
            _spec: PhantomData,
        }
    }

    #[must_use]
    pub const fn info(&self) -> NodeInfo {
        S::INFO
    }

    #[must_use]
    pub fn inputs(&self) -> &[ParamDescriptor] {
        &self.inputs
    }

    #[must_use]
    pub fn outputs(&self) -> &[ParamDescriptor] {
        &self.outputs
    }

    /// Host hook: the display unit an angular input slot currently shows.
    pub fn set_display_unit(&mut self, slot: usize, unit: AngleUnit) {
        if let Some(entry) = self.units.get_mut(slot) {
            *entry = unit;
        }
    }

    /// Instantiate host parameters for every slot, inputs then outputs.
    #[must_use]
    pub fn create_host_params(
        &self,
        registry: &KindRegistry,
    ) -> (Vec<ParamHandle>, Vec<ParamHandle>) {
        (
            self.inputs
                .iter()
                .map(|d| d.create_host_param(registry))
                .collect(),
            self.outputs
                .iter()
                .map(|d| d.create_host_param(registry))
                .collect(),
        )
    }

    /// Lazy per-instance icon lookup; memoized permanently, never raises.
    pub fn icon(&self, loader: &dyn ResourceLoader) -> Option<Arc<[u8]>> {
        self.icon
            .get_or_load(&format!("{}.png", S::INFO.nick), loader)
    }

    /// One evaluation cycle. A required input without data skips the
    /// cycle silently; a raising target is a cycle-fatal fault, reported
    /// to the sink and returned. Slot messages collected before any stop
    /// are forwarded either way.
    pub fn solve(
        &self,
        access: &mut dyn DataAccess,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<SolveOutcome, InvocationFault> {
        let mut cycle = Cycle {
            access,
            inputs: &self.inputs,
            outputs: &self.outputs,
            units: &self.units,
            messages: Vec::new(),
        };

        let result = panic::catch_unwind(AssertUnwindSafe(|| S::invoke(&mut cycle)));

        for (slot, message) in std::mem::take(&mut cycle.messages) {
            sink.message(slot, message);
        }

        match result {
            Ok(Ok(())) => Ok(SolveOutcome::Completed),
            Ok(Err(CycleBreak::Missing { .. })) => Ok(SolveOutcome::Skipped),
            Ok(Err(CycleBreak::Fault(fault))) => {
                sink.fault(S::INFO.name, &fault);
                Err(fault)
            }
            Err(payload) => {
                let fault = InvocationFault::from_panic(payload.as_ref());
                sink.fault(S::INFO.name, &fault);
                Err(fault)
            }
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        access::MemoryAccess,
        descriptor::Direction,
        raw::Raw,
        scalar::Scalar,
        sink::MemorySink,
    };

    // Hand-rolled wiring in the exact shape codegen emits.
    fn add(a: i64, b: i64, c: &mut i64) -> i64 {
        let result = a + b;
        *c += result;

        result
    }

    struct AddSpec;

    impl NodeSpec for AddSpec {
        const INFO: NodeInfo = NodeInfo {
            id: NodeId::derive("Demo.Math", "Operators", "add"),
            name: "Add",
            nick: "add",
            description: "Adds two integers",
            namespace: "Demo.Math",
            category: "Maths",
            subcategory: "Operators",
            obsolete: false,
            parallel_safe: false,
        };

        fn inputs(registry: &KindRegistry) -> Vec<ParamDescriptor> {
            vec![
                ParamDescriptor::new::<i64>(registry, Direction::In, "a").with_range(0.0, 5.0),
                ParamDescriptor::new::<i64>(registry, Direction::In, "b"),
                ParamDescriptor::new::<i64>(registry, Direction::InOut, "c"),
            ]
        }

        fn outputs(registry: &KindRegistry) -> Vec<ParamDescriptor> {
            vec![
                ParamDescriptor::new::<i64>(registry, Direction::Out, "result"),
                ParamDescriptor::new::<i64>(registry, Direction::InOut, "c"),
            ]
        }

        fn invoke(cycle: &mut Cycle<'_>) -> Result<(), CycleBreak> {
            let a: i64 = cycle.input(0)?;
            let b: i64 = cycle.input(1)?;
            let mut c: i64 = cycle.input(2)?;

            let result = add(a, b, &mut c);

            cycle.output(0, &result)?;
            cycle.output(1, &c)?;

            Ok(())
        }
    }

    struct PanicSpec;

    impl NodeSpec for PanicSpec {
        const INFO: NodeInfo = NodeInfo {
            id: NodeId::derive("Demo.Math", "Operators", "explode"),
            name: "Explode",
            nick: "explode",
            description: "",
            namespace: "Demo.Math",
            category: "Maths",
            subcategory: "Operators",
            obsolete: false,
            parallel_safe: false,
        };

        fn inputs(_registry: &KindRegistry) -> Vec<ParamDescriptor> {
            Vec::new()
        }

        fn outputs(registry: &KindRegistry) -> Vec<ParamDescriptor> {
            vec![ParamDescriptor::new::<i64>(registry, Direction::Out, "out")]
        }

        fn invoke(_cycle: &mut Cycle<'_>) -> Result<(), CycleBreak> {
            panic!("division by zero")
        }
    }

    fn solve_add(access: &mut MemoryAccess, sink: &mut MemorySink) -> SolveOutcome {
        let registry = KindRegistry::standard();
        let dispatcher = MethodDispatcher::<AddSpec>::new(&registry);

        match dispatcher.solve(access, sink) {
            Ok(outcome) => outcome,
            Err(fault) => panic!("unexpected fault: {fault}"),
        }
    }

    #[test]
    fn clamped_add_produces_scenario_results() {
        // a=10 clamps to 5; result = 5 + 3 = 8; c = 0 + 8 = 8
        let mut access = MemoryAccess::new()
            .with_seed(0, Raw::Item(Scalar::Int(10)))
            .with_seed(1, Raw::Item(Scalar::Int(3)))
            .with_seed(2, Raw::Item(Scalar::Int(0)));
        let mut sink = MemorySink::new();

        let outcome = solve_add(&mut access, &mut sink);

        assert_eq!(outcome, SolveOutcome::Completed);
        assert_eq!(access.output(0), Some(&Raw::Item(Scalar::Int(8))));
        assert_eq!(access.output(1), Some(&Raw::Item(Scalar::Int(8))));

        let warnings: Vec<_> = sink.slot_messages("a").collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].text.contains('5'));
    }

    #[test]
    fn missing_required_input_skips_the_cycle() {
        // no data on slot 1
        let mut access = MemoryAccess::new()
            .with_seed(0, Raw::Item(Scalar::Int(1)))
            .with_seed(2, Raw::Item(Scalar::Int(0)));
        let mut sink = MemorySink::new();

        let outcome = solve_add(&mut access, &mut sink);

        assert_eq!(outcome, SolveOutcome::Skipped);
        assert_eq!(access.output(0), None);
        assert_eq!(access.output(1), None);
        assert!(sink.faults.is_empty());
    }

    #[test]
    fn target_panic_is_a_cycle_fatal_fault() {
        let registry = KindRegistry::standard();
        let dispatcher = MethodDispatcher::<PanicSpec>::new(&registry);
        let mut access = MemoryAccess::new();
        let mut sink = MemorySink::new();

        let result = dispatcher.solve(&mut access, &mut sink);

        assert!(result.is_err());
        assert_eq!(sink.faults.len(), 1);
        assert_eq!(sink.faults[0].0, "Explode");
        assert!(sink.faults[0].1.message.contains("division by zero"));
        assert_eq!(access.output(0), None);
    }

    #[test]
    fn registering_fixes_slot_order_once() {
        let registry = KindRegistry::standard();
        let dispatcher = MethodDispatcher::<AddSpec>::new(&registry);

        let input_names: Vec<_> = dispatcher.inputs().iter().map(|d| d.name).collect();
        let output_names: Vec<_> = dispatcher.outputs().iter().map(|d| d.name).collect();

        assert_eq!(input_names, vec!["a", "b", "c"]);
        assert_eq!(output_names, vec!["result", "c"]);
    }

    #[test]
    fn identity_is_stable_across_display_changes() {
        // same triple, different display name: same id
        assert_eq!(
            NodeId::derive("Demo.Math", "Operators", "add"),
            AddSpec::INFO.id
        );
        assert_ne!(
            NodeId::derive("Demo.Math", "Operators", "add"),
            NodeId::derive("Demo.Math", "Operators", "add_obsolete")
        );
    }
}
