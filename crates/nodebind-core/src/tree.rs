use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// TreePath
///
/// Path key of a tree branch, displayed the way the host spells it:
/// `{0;1}`. Ordering is lexicographic over the indices, which matches the
/// host's branch sort order.
///

#[derive(
    Clone, Debug, Default, Deref, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
pub struct TreePath(Vec<i32>);

impl TreePath {
    #[must_use]
    pub fn new(indices: impl Into<Vec<i32>>) -> Self {
        Self(indices.into())
    }

    #[must_use]
    pub fn indices(&self) -> &[i32] {
        &self.0
    }

    /// Child path with one more index appended.
    #[must_use]
    pub fn child(&self, index: i32) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);

        Self(indices)
    }
}

impl From<&[i32]> for TreePath {
    fn from(indices: &[i32]) -> Self {
        Self(indices.to_vec())
    }
}

impl<const N: usize> From<[i32; N]> for TreePath {
    fn from(indices: [i32; N]) -> Self {
        Self(indices.to_vec())
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ";")?;
            }
            write!(f, "{index}")?;
        }
        write!(f, "}}")
    }
}

///
/// DataTree
///
/// The host's path-indexed tree of lists. Branch insertion order and
/// per-branch element order are preserved; marshaling relies on both.
///

#[derive(Clone, Debug, PartialEq, IntoIterator, Serialize, Deserialize)]
pub struct DataTree<T> {
    #[into_iterator(owned, ref)]
    branches: Vec<(TreePath, Vec<T>)>,
}

impl<T> DataTree<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            branches: Vec::new(),
        }
    }

    /// Number of branches, not leaves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.branches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.branches.iter().map(|(_, items)| items.len()).sum()
    }

    /// Replace the branch at `path`, or append it in insertion order.
    pub fn insert(&mut self, path: TreePath, items: Vec<T>) {
        if let Some(branch) = self.branches.iter_mut().find(|(p, _)| *p == path) {
            branch.1 = items;
        } else {
            self.branches.push((path, items));
        }
    }

    #[must_use]
    pub fn branch(&self, path: &TreePath) -> Option<&[T]> {
        self.branches
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, items)| items.as_slice())
    }

    pub fn paths(&self) -> impl Iterator<Item = &TreePath> {
        self.branches.iter().map(|(path, _)| path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TreePath, &Vec<T>)> {
        self.branches.iter().map(|(path, items)| (path, items))
    }

    /// Map every leaf, preserving the path set and per-branch order.
    #[must_use]
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> DataTree<U> {
        DataTree {
            branches: self
                .branches
                .into_iter()
                .map(|(path, items)| (path, items.into_iter().map(&mut f).collect()))
                .collect(),
        }
    }

    /// Fallible leaf map; the first failure wins.
    pub fn try_map<U, E>(self, mut f: impl FnMut(T) -> Result<U, E>) -> Result<DataTree<U>, E> {
        let mut branches = Vec::with_capacity(self.branches.len());

        for (path, items) in self.branches {
            let mapped: Result<Vec<U>, E> = items.into_iter().map(&mut f).collect();
            branches.push((path, mapped?));
        }

        Ok(DataTree { branches })
    }
}

impl<T> Default for DataTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(TreePath, Vec<T>)> for DataTree<T> {
    fn from_iter<I: IntoIterator<Item = (TreePath, Vec<T>)>>(iter: I) -> Self {
        let mut tree = Self::new();
        for (path, items) in iter {
            tree.insert(path, items);
        }

        tree
    }
}

///
/// TESTS
///
