use nodebind::NodeEnum;
use nodebind::core::marshal::{EnumLeaf, Leaf};

#[derive(Clone, Copy, Debug, Eq, PartialEq, NodeEnum)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

fn main() {
    assert_eq!(Corner::TopRight.to_index(), 1);
    assert_eq!(Corner::from_index(3), Some(Corner::BottomRight));
    assert_eq!(<Corner as Leaf>::NAMED_VALUES.len(), 4);
    assert!(<Corner as Leaf>::IS_ENUM);
}
