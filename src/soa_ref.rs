use crate::WithRef;

/// Operations shared by mutable row views.
///
/// Row assignment only ever writes column fields. A scalar is shared by every
/// row of its container, so copying one row into another must not overwrite
/// it.
pub trait SoaRefMut {
    /// The row type.
    type Item;

    /// The index of the row this view refers to.
    fn index(&self) -> usize;

    /// Moves the column fields of `value` into this row and drops the rest of
    /// `value`.
    fn set(&mut self, value: Self::Item);

    /// Copies the column fields of `other` into this row.
    ///
    /// `other` can be a row view of either mutability, from any container
    /// with the same row type, or a plain value.
    fn assign<R>(&mut self, other: &R)
    where
        R: WithRef<Item = Self::Item> + ?Sized,
        Self::Item: Clone,
    {
        let value = other.cloned();
        self.set(value);
    }
}
