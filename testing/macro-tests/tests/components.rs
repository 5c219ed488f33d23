//! Generated-wiring behavior: the scenarios a host would drive.

use nodebind::core::{
    access::MemoryAccess,
    descriptor::AngleUnit,
    dispatcher::{NodeId, NodeSpec, SolveOutcome},
    marshal::{EnumLeaf, Leaf},
    message::Severity,
    raw::Raw,
    registry::KindRegistry,
    scalar::Scalar,
    sink::MemorySink,
    tree::{DataTree, TreePath},
};
use nodebind_macro_tests::{
    AddLegacyNode, AddNode, Blend, BlendNameNode, ClampTreeNode, DivideNode, PartitionNode,
    RepeatNode, SineNode,
};

fn registry() -> KindRegistry {
    KindRegistry::standard()
}

#[test]
fn clamped_add_matches_the_worked_example() {
    // a=10 clamps to 5 with one warning; result = 5 + 3 = 8; c = 0 + 8 = 8
    let dispatcher = AddNode::dispatcher(&registry());
    let mut access = MemoryAccess::new()
        .with_seed(0, Raw::Item(Scalar::Int(10)))
        .with_seed(1, Raw::Item(Scalar::Int(3)))
        .with_seed(2, Raw::Item(Scalar::Int(0)));
    let mut sink = MemorySink::new();

    let outcome = dispatcher.solve(&mut access, &mut sink);

    assert_eq!(outcome.ok(), Some(SolveOutcome::Completed));
    assert_eq!(access.output(0), Some(&Raw::Item(Scalar::Int(8))));
    assert_eq!(access.output(1), Some(&Raw::Item(Scalar::Int(8))));

    let warnings: Vec<_> = sink.slot_messages("a").collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].severity, Severity::Warning);
    assert!(warnings[0].text.contains('5'));
}

#[test]
fn tree_clamp_preserves_branches_and_order() {
    // {0;0} = [2, 7] -> [2, 5]; {0;1} = [-1] -> [0]; one warning per leaf
    let dispatcher = ClampTreeNode::dispatcher(&registry());

    let mut tree = DataTree::new();
    tree.insert(TreePath::from([0, 0]), vec![Scalar::Int(2), Scalar::Int(7)]);
    tree.insert(TreePath::from([0, 1]), vec![Scalar::Int(-1)]);

    let mut access = MemoryAccess::new().with_seed(0, Raw::Tree(tree));
    let mut sink = MemorySink::new();

    let outcome = dispatcher.solve(&mut access, &mut sink);
    assert_eq!(outcome.ok(), Some(SolveOutcome::Completed));

    let Some(Raw::Tree(out)) = access.output(0) else {
        panic!("expected a tree output");
    };
    let paths: Vec<String> = out.paths().map(ToString::to_string).collect();

    assert_eq!(paths, vec!["{0;0}", "{0;1}"]);
    assert_eq!(
        out.branch(&TreePath::from([0, 0])),
        Some([Scalar::Int(2), Scalar::Int(5)].as_slice())
    );
    assert_eq!(
        out.branch(&TreePath::from([0, 1])),
        Some([Scalar::Int(0)].as_slice())
    );
    assert_eq!(sink.warning_count(), 2);
}

#[test]
fn missing_required_input_skips_silently() {
    let dispatcher = AddNode::dispatcher(&registry());
    let mut access = MemoryAccess::new().with_seed(0, Raw::Item(Scalar::Int(1)));
    let mut sink = MemorySink::new();

    let outcome = dispatcher.solve(&mut access, &mut sink);

    assert_eq!(outcome.ok(), Some(SolveOutcome::Skipped));
    assert_eq!(access.output(0), None);
    assert!(sink.faults.is_empty());
}

#[test]
fn fallible_target_error_is_cycle_fatal() {
    let dispatcher = DivideNode::dispatcher(&registry());
    let mut access = MemoryAccess::new()
        .with_seed(0, Raw::Item(Scalar::Float(1.0)))
        .with_seed(1, Raw::Item(Scalar::Float(0.0)));
    let mut sink = MemorySink::new();

    let outcome = dispatcher.solve(&mut access, &mut sink);

    assert!(outcome.is_err());
    assert_eq!(sink.faults.len(), 1);
    assert!(sink.faults[0].1.message.contains("division by zero"));
    assert_eq!(access.output(0), None);
}

#[test]
fn out_parameters_start_from_empty_defaults() {
    let dispatcher = PartitionNode::dispatcher(&registry());
    let mut access = MemoryAccess::new().with_seed(
        0,
        Raw::List(vec![
            Scalar::Int(1),
            Scalar::Int(2),
            Scalar::Int(3),
            Scalar::Int(4),
        ]),
    );
    let mut sink = MemorySink::new();

    let outcome = dispatcher.solve(&mut access, &mut sink);

    assert_eq!(outcome.ok(), Some(SolveOutcome::Completed));
    assert_eq!(
        access.output(0),
        Some(&Raw::List(vec![Scalar::Int(2), Scalar::Int(4)]))
    );
    assert_eq!(
        access.output(1),
        Some(&Raw::List(vec![Scalar::Int(1), Scalar::Int(3)]))
    );
    assert!(PartitionNode::INFO.parallel_safe);
    assert!(!AddNode::INFO.parallel_safe);
}

#[test]
fn degree_display_converts_angular_input() {
    let mut dispatcher = SineNode::dispatcher(&registry());
    dispatcher.set_display_unit(0, AngleUnit::Degrees);

    let mut access = MemoryAccess::new().with_seed(0, Raw::Item(Scalar::Float(90.0)));
    let mut sink = MemorySink::new();

    let outcome = dispatcher.solve(&mut access, &mut sink);
    assert_eq!(outcome.ok(), Some(SolveOutcome::Completed));

    let Some(Raw::Item(Scalar::Float(value))) = access.output(0) else {
        panic!("expected a float output");
    };
    assert!((value - 1.0).abs() < 1e-12);
}

#[test]
fn optional_inputs_substitute_and_defaults_reach_the_handle() {
    let dispatcher = RepeatNode::dispatcher(&registry());
    let mut access = MemoryAccess::new()
        .with_seed(0, Raw::Item(Scalar::Text("ab".into())))
        .with_seed(1, Raw::Item(Scalar::Int(3)));
    let mut sink = MemorySink::new();

    // `upper` unseeded: Option substitutes None instead of skipping
    let outcome = dispatcher.solve(&mut access, &mut sink);
    assert_eq!(outcome.ok(), Some(SolveOutcome::Completed));
    assert_eq!(
        access.output(0),
        Some(&Raw::List(vec![
            Scalar::Text("ab".into()),
            Scalar::Text("ab".into()),
            Scalar::Text("ab".into()),
        ]))
    );

    let (inputs, _) = dispatcher.create_host_params(&registry());
    assert_eq!(inputs[1].default, Some(Scalar::Int(2)));
    assert!(!inputs[1].optional);
    assert!(inputs[2].optional);
}

#[test]
fn enumerations_marshal_through_the_integer_surrogate() {
    let dispatcher = BlendNameNode::dispatcher(&registry());
    let mut access = MemoryAccess::new().with_seed(0, Raw::Item(Scalar::Int(4)));
    let mut sink = MemorySink::new();

    let outcome = dispatcher.solve(&mut access, &mut sink);

    assert_eq!(outcome.ok(), Some(SolveOutcome::Completed));
    assert_eq!(
        access.output(0),
        Some(&Raw::Item(Scalar::Text("Screen".into())))
    );

    assert_eq!(Blend::from_index(4), Some(Blend::Screen));
    assert_eq!(
        <Blend as Leaf>::NAMED_VALUES,
        [("Normal", 0), ("Multiply", 1), ("Screen", 4)].as_slice()
    );
    assert_eq!(dispatcher.inputs()[0].named_values.len(), 3);
}

#[test]
fn unknown_enum_index_degrades_to_a_skip() {
    let dispatcher = BlendNameNode::dispatcher(&registry());
    let mut access = MemoryAccess::new().with_seed(0, Raw::Item(Scalar::Int(2)));
    let mut sink = MemorySink::new();

    let outcome = dispatcher.solve(&mut access, &mut sink);

    assert_eq!(outcome.ok(), Some(SolveOutcome::Skipped));
    assert_eq!(access.output(0), None);

    let errors: Vec<_> = sink.slot_messages("mode").collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].severity, Severity::Error);
}

#[test]
fn slot_registration_follows_declaration_order() {
    let dispatcher = AddNode::dispatcher(&registry());

    let inputs: Vec<_> = dispatcher.inputs().iter().map(|d| d.name).collect();
    let outputs: Vec<_> = dispatcher.outputs().iter().map(|d| d.name).collect();

    assert_eq!(inputs, vec!["a", "b", "c"]);
    assert_eq!(outputs, vec!["result", "c"]);

    let clamp = ClampTreeNode::dispatcher(&registry());
    assert_eq!(clamp.outputs()[0].name, "clamped");
}

#[test]
fn identity_survives_deprecation() {
    assert_eq!(
        AddNode::INFO.id,
        NodeId(nodebind_utils::node_id("Demo.Math", "Operators", "add"))
    );

    // the obsolete marker changes only the display name
    assert_eq!(
        AddLegacyNode::INFO.id,
        NodeId(nodebind_utils::node_id(
            "Demo.Math",
            "Operators",
            "add_legacy"
        ))
    );
    assert!(AddLegacyNode::INFO.obsolete);
    assert!(AddLegacyNode::INFO.name.ends_with("(OBSOLETE)"));
    assert_eq!(AddNode::INFO.name, "Add");
}
