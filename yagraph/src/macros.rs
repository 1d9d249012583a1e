//! Internal helpers for generating code.

/// Generate `is_*` variant testing methods for [`Node`].
///
/// [`Node`]: crate::Node
macro_rules! define_is (
    ($fn_name:ident, $variant:pat) => (
/// Check whether the node is of the given variant.
///
/// # Return
/// If the variant of `self` is `Self::$variant`, return `true`. Otherwise, return `false`.
#[must_use]
pub fn $fn_name(&self) -> bool {
    matches!(self, $variant)
}
    );
);

/// Generate `as_*` methods for [`Node`], returning references to the variant's payload.
///
/// [`Node`]: crate::Node
macro_rules! define_as_ref (
    ($fn_name:ident, $t:ty, $variant:ident) => (
/// Get a reference to the inner object of the node if it is a `$t`.
///
/// # Return
/// If the variant of `self` is `Self::$variant`, return `Some($t)` with the payload contained.
/// Otherwise, return `None`.
#[must_use]
pub fn $fn_name(&self) -> Option<$t> {
    match self {
        Self::$variant(v) => Some(v),
        _ => None
    }
}
    );
);

/// Generate the methods common to the containers wrapping a `Vec` of items ([`Sequence`],
/// [`Document`]).
///
/// [`Sequence`]: crate::Sequence
/// [`Document`]: crate::Document
macro_rules! define_item_container (
    ($container:ty, $item:ty) => (
impl $container {
    /// Return the item at the given index, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&$item> {
        self.items.get(index)
    }

    /// Return the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Return whether there are no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the items, in order.
    pub fn iter(&self) -> std::slice::Iter<'_, $item> {
        self.items.iter()
    }

    /// Return the items as a slice.
    #[must_use]
    pub fn items(&self) -> &[$item] {
        &self.items
    }
}

impl<'a> IntoIterator for &'a $container {
    type Item = &'a $item;
    type IntoIter = std::slice::Iter<'a, $item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
    );
);
