use nodebind::node;

#[node(namespace = "Ui.Test", category = "Maths", subcategory = "Basic", description = "Doubles")]
pub fn double(#[param(range(min = 0.0, max = 100.0))] value: i64, scaled: &mut i64) -> i64 {
    *scaled = value * 4;

    value * 2
}

fn main() {
    let registry = nodebind::core::registry::KindRegistry::standard();
    let dispatcher = DoubleNode::dispatcher(&registry);

    assert_eq!(dispatcher.inputs().len(), 2);
    assert_eq!(dispatcher.outputs().len(), 2);
    assert_eq!(dispatcher.info().nick, "double");
}
