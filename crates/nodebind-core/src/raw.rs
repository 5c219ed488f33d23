use crate::{
    scalar::{Scalar, ScalarKind},
    tree::{DataTree, TreePath},
};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Access
///
/// Data shape of a slot: a single item, an ordered list, or a path-indexed
/// tree of lists. A pure function of the declared type's structural shape,
/// fixed at compile time with precedence tree > array > list > item.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Access {
    Item,
    List,
    Tree,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Item => "item",
            Self::List => "list",
            Self::Tree => "tree",
        };
        write!(f, "{label}")
    }
}

///
/// Raw
///
/// Shape-tagged container the host data-access object trades in. This is
/// the boundary representation: descriptors convert between `Raw` and the
/// declared Rust value, never past it.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Raw {
    Item(Scalar),
    List(Vec<Scalar>),
    Tree(DataTree<Scalar>),
}

impl Raw {
    #[must_use]
    pub const fn access(&self) -> Access {
        match self {
            Self::Item(_) => Access::Item,
            Self::List(_) => Access::List,
            Self::Tree(_) => Access::Tree,
        }
    }

    /// Empty-shaped default used to pre-fill output slots: zero-valued
    /// item, empty list, empty tree.
    #[must_use]
    pub fn empty(access: Access, kind: ScalarKind) -> Self {
        match access {
            Access::Item => Self::Item(Scalar::zero(kind)),
            Access::List => Self::List(Vec::new()),
            Access::Tree => Self::Tree(DataTree::new()),
        }
    }

    /// Adapt this container to the requested shape the way the host does:
    /// items promote to single-element lists and single-branch trees, lists
    /// promote to a `{0}` branch, trees flatten in branch order. Demotion
    /// of an empty container yields `None` ("no data").
    #[must_use]
    pub fn reshape(self, access: Access) -> Option<Self> {
        match (self, access) {
            (raw, access) if raw.access() == access => Some(raw),

            (Self::Item(s), Access::List) => Some(Self::List(vec![s])),
            (Self::Item(s), Access::Tree) => {
                let mut tree = DataTree::new();
                tree.insert(TreePath::from([0]), vec![s]);
                Some(Self::Tree(tree))
            }
            (Self::List(items), Access::Tree) => {
                let mut tree = DataTree::new();
                tree.insert(TreePath::from([0]), items);
                Some(Self::Tree(tree))
            }

            (Self::List(items), Access::Item) => items.into_iter().next().map(Self::Item),
            (Self::Tree(tree), Access::List) => {
                let items: Vec<Scalar> = tree
                    .into_iter()
                    .flat_map(|(_, branch)| branch)
                    .collect();
                if items.is_empty() {
                    None
                } else {
                    Some(Self::List(items))
                }
            }
            (Self::Tree(tree), Access::Item) => tree
                .into_iter()
                .flat_map(|(_, branch)| branch)
                .next()
                .map(Self::Item),

            // same-shape pairs are handled by the guard above
            (raw, _) => Some(raw),
        }
    }

    /// Map every scalar leaf in place of its container, preserving shape,
    /// branch paths, and element order.
    #[must_use]
    pub fn map_scalars(self, mut f: impl FnMut(Scalar) -> Scalar) -> Self {
        match self {
            Self::Item(s) => Self::Item(f(s)),
            Self::List(items) => Self::List(items.into_iter().map(f).collect()),
            Self::Tree(tree) => Self::Tree(tree.map(&mut f)),
        }
    }
}

///
/// TESTS
///
