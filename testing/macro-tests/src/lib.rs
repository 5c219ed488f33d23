//! Fixture declarations for the generated-wiring tests: a handful of
//! exposed functions, an enumeration, and a settings struct, written the
//! way a plugin author would write them.

use nodebind::{NodeEnum, core::tree::DataTree, node, settings};

#[node(
    namespace = "Demo.Math",
    owner = "Operators",
    category = "Maths",
    subcategory = "Operators",
    description = "Adds two integers"
)]
pub fn add(#[param(range(min = 0.0, max = 5.0))] a: i64, b: i64, c: &mut i64) -> i64 {
    let result = a + b;
    *c += result;

    result
}

#[node(
    namespace = "Demo.Math",
    owner = "Operators",
    category = "Maths",
    subcategory = "Operators",
    description = "Divides two numbers"
)]
pub fn divide(a: f64, b: f64) -> Result<f64, String> {
    if b == 0.0 {
        return Err("division by zero".to_string());
    }

    Ok(a / b)
}

#[node(
    namespace = "Demo.Math",
    owner = "Operators",
    category = "Maths",
    subcategory = "Operators"
)]
#[deprecated = "superseded by add"]
pub fn add_legacy(a: i64, b: i64) -> i64 {
    a + b
}

#[node(
    namespace = "Demo.Sets",
    category = "Sets",
    subcategory = "Tree",
    description = "Passes a tree through, clamped per leaf",
    output = "clamped"
)]
pub fn clamp_tree(#[param(range(min = 0.0, max = 5.0))] values: DataTree<i64>) -> DataTree<i64> {
    values
}

#[node(
    namespace = "Demo.Sets",
    category = "Sets",
    subcategory = "List",
    description = "Splits integers by parity",
    parallel_safe
)]
pub fn partition(
    values: Vec<i64>,
    #[param(out)] evens: &mut Vec<i64>,
    #[param(out)] odds: &mut Vec<i64>,
) {
    for value in values {
        if value % 2 == 0 {
            evens.push(value);
        } else {
            odds.push(value);
        }
    }
}

#[node(
    namespace = "Demo.Geometry",
    category = "Maths",
    subcategory = "Trig",
    description = "Sine of an angle"
)]
pub fn sine(#[param(angle)] angle: f64) -> f64 {
    angle.sin()
}

#[node(
    namespace = "Demo.Text",
    category = "Text",
    subcategory = "Format",
    description = "Repeats a string"
)]
pub fn repeat(
    text: String,
    #[param(default = 2)] count: i64,
    upper: Option<bool>,
) -> Vec<String> {
    let rendered = if upper.unwrap_or(false) {
        text.to_uppercase()
    } else {
        text
    };

    (0..count.max(0)).map(|_| rendered.clone()).collect()
}

///
/// Blend
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, NodeEnum)]
pub enum Blend {
    Normal,
    Multiply,
    Screen = 4,
}

#[node(
    namespace = "Demo.Style",
    category = "Display",
    subcategory = "Colour",
    description = "Names a blend mode"
)]
pub fn blend_name(mode: Blend) -> String {
    format!("{mode:?}")
}

///
/// Prefs
///

#[settings(namespace = "Demo")]
#[derive(Clone, Debug, Default)]
pub struct Prefs {
    #[setting(default = 5, range(min = 0.0, max = 10.0))]
    pub brush_size: i64,

    #[setting(default = "sketch")]
    pub stylus_name: String,

    pub snap: bool,
}
