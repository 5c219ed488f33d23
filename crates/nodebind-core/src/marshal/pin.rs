use crate::{
    marshal::{CoerceError, Leaf},
    raw::{Access, Raw},
    tree::DataTree,
};

///
/// PinData
///
/// A declared parameter type as a whole: shape plus leaf. The access
/// pattern is a compile-time constant with fixed precedence (tree > array
/// > list > item); each impl fixes one conversion path between the
/// declared value and the shape-tagged host container.
///

pub trait PinData: Sized {
    const ACCESS: Access;

    /// Whether the declaration allows omission (`Option<_>`).
    const OPTIONAL: bool = false;

    type Leaf: Leaf;

    fn from_raw(raw: Raw) -> Result<Self, CoerceError>;

    /// `None` means "clear the slot" (an omitted optional value).
    fn to_raw(&self) -> Option<Raw>;

    /// Fresh empty-shaped default: zero item, empty list, empty tree.
    fn empty() -> Self;

    /// Value to substitute when the host reports "no data"; `None` for
    /// required declarations (the cycle skips instead).
    fn when_missing() -> Option<Self> {
        None
    }
}

// `pub` so the exported impl macro can reach it from expansion sites.
#[doc(hidden)]
pub fn item_from_raw<T: Leaf>(raw: &Raw) -> Result<T, CoerceError> {
    match raw {
        Raw::Item(scalar) => T::from_scalar(scalar),
        other => Err(CoerceError::Shape {
            expected: Access::Item,
            found: other.access(),
        }),
    }
}

/// Implement the single-item [`PinData`] path for a leaf type. Used for
/// every builtin leaf and by generated enumeration code.
#[macro_export]
macro_rules! impl_item_pin {
    ($($ty:ty),* $(,)?) => {$(
        impl $crate::marshal::PinData for $ty {
            const ACCESS: $crate::raw::Access = $crate::raw::Access::Item;

            type Leaf = $ty;

            fn from_raw(
                raw: $crate::raw::Raw,
            ) -> ::core::result::Result<Self, $crate::marshal::CoerceError> {
                $crate::marshal::pin::item_from_raw(&raw)
            }

            fn to_raw(&self) -> ::core::option::Option<$crate::raw::Raw> {
                ::core::option::Option::Some($crate::raw::Raw::Item(
                    $crate::marshal::Leaf::to_scalar(self),
                ))
            }

            fn empty() -> Self {
                <$ty as $crate::marshal::Leaf>::zero()
            }
        }
    )*};
}

impl_item_pin!(bool, i32, i64, u32, f32, f64, String);

impl<T: Leaf> PinData for Option<T> {
    const ACCESS: Access = Access::Item;
    const OPTIONAL: bool = true;

    type Leaf = T;

    fn from_raw(raw: Raw) -> Result<Self, CoerceError> {
        item_from_raw(&raw).map(Some)
    }

    fn to_raw(&self) -> Option<Raw> {
        self.as_ref().map(|value| Raw::Item(value.to_scalar()))
    }

    fn empty() -> Self {
        None
    }

    fn when_missing() -> Option<Self> {
        Some(None)
    }
}

impl<T: Leaf> PinData for Vec<T> {
    const ACCESS: Access = Access::List;

    type Leaf = T;

    fn from_raw(raw: Raw) -> Result<Self, CoerceError> {
        match raw {
            Raw::List(items) => items.iter().map(T::from_scalar).collect(),
            other => Err(CoerceError::Shape {
                expected: Access::List,
                found: other.access(),
            }),
        }
    }

    fn to_raw(&self) -> Option<Raw> {
        Some(Raw::List(self.iter().map(Leaf::to_scalar).collect()))
    }

    fn empty() -> Self {
        Self::new()
    }
}

impl<T: Leaf, const N: usize> PinData for [T; N] {
    const ACCESS: Access = Access::List;

    type Leaf = T;

    fn from_raw(raw: Raw) -> Result<Self, CoerceError> {
        let items = match raw {
            Raw::List(items) => items,
            other => {
                return Err(CoerceError::Shape {
                    expected: Access::List,
                    found: other.access(),
                });
            }
        };

        if items.len() != N {
            return Err(CoerceError::Length {
                expected: N,
                found: items.len(),
            });
        }

        let converted: Vec<T> = items.iter().map(T::from_scalar).collect::<Result<_, _>>()?;

        converted.try_into().map_err(|overflow: Vec<T>| CoerceError::Length {
            expected: N,
            found: overflow.len(),
        })
    }

    fn to_raw(&self) -> Option<Raw> {
        Some(Raw::List(self.iter().map(Leaf::to_scalar).collect()))
    }

    fn empty() -> Self {
        std::array::from_fn(|_| T::zero())
    }
}

impl<T: Leaf> PinData for DataTree<T> {
    const ACCESS: Access = Access::Tree;

    type Leaf = T;

    fn from_raw(raw: Raw) -> Result<Self, CoerceError> {
        match raw {
            Raw::Tree(tree) => tree.try_map(|scalar| T::from_scalar(&scalar)),
            other => Err(CoerceError::Shape {
                expected: Access::Tree,
                found: other.access(),
            }),
        }
    }

    fn to_raw(&self) -> Option<Raw> {
        let mut out = DataTree::new();
        for (path, items) in self.iter() {
            out.insert(path.clone(), items.iter().map(Leaf::to_scalar).collect());
        }

        Some(Raw::Tree(out))
    }

    fn empty() -> Self {
        Self::new()
    }
}
