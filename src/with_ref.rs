/// Lends out a `&Item` for the duration of a closure.
///
/// A row view is only a container reference and an index, so there is no
/// `Item` in memory that a `&Item` could point to. Row views implement this
/// trait when their container implements [`CloneRow`]: the row is cloned out
/// of the container field by field, lent to the closure and dropped
/// afterwards. Writes made through the lent value never reach the container.
///
/// Plain row values implement this trait as well, lending themselves, which
/// lets comparisons and [`SoaRefMut::assign`] accept values and views alike.
///
/// ```
/// use soa_fixed::{SoaArray, WithRef};
///
/// #[derive(SoaArray, Clone, Copy, Debug, PartialEq)]
/// struct Span {
///     start: u32,
///     stop: u32,
/// }
///
/// impl Span {
///     fn len(&self) -> u32 {
///         self.stop - self.start
///     }
/// }
///
/// let spans = SpanArray::<3>::from_fn(|i| Span { start: i as u32, stop: 10 });
/// assert_eq!(spans.row(2).with_ref(Span::len), 8);
/// assert_eq!(spans.row(1).copied(), Span { start: 1, stop: 10 });
/// ```
///
/// [`CloneRow`]: crate::CloneRow
/// [`SoaRefMut::assign`]: crate::SoaRefMut::assign
pub trait WithRef {
    /// The row type.
    type Item;

    /// Calls `f` with a reference to the row value.
    fn with_ref<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Self::Item) -> R;

    /// Clones the row value, scalars included.
    fn cloned(&self) -> Self::Item
    where
        Self::Item: Clone,
    {
        self.with_ref(Clone::clone)
    }

    /// Copies the row value, scalars included.
    fn copied(&self) -> Self::Item
    where
        Self::Item: Copy,
    {
        self.with_ref(|item| *item)
    }

    /// Takes a snapshot of the row that later writes to the container do not
    /// affect. Same as [`cloned`](WithRef::cloned).
    fn snapshot(&self) -> Self::Item
    where
        Self::Item: Clone,
    {
        self.cloned()
    }
}
