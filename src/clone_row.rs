use crate::SoaArray;

/// Builds an owned row value by cloning each of its fields out of the
/// container.
///
/// The derive macro implements this for every container whose fields are all
/// [`Clone`]. The row type itself does not need to implement [`Clone`].
/// Row views implement [`WithRef`] through this trait, so it is also what
/// backs comparisons, formatting and serialization of views.
///
/// ```
/// use soa_fixed::{CloneRow, SoaArray};
///
/// #[derive(SoaArray)]
/// struct Label {
///     text: String,
///     #[soa(scalar)]
///     font: String,
/// }
///
/// let labels = LabelArray::<2>::from_fn(|i| Label {
///     text: format!("label {i}"),
///     font: "mono".to_owned(),
/// });
/// let label = labels.clone_row(1);
/// assert_eq!(label.text, "label 1");
/// assert_eq!(label.font, "mono");
/// ```
///
/// [`WithRef`]: crate::WithRef
pub trait CloneRow: SoaArray {
    /// Clones the row at `index`, scalars included.
    ///
    /// # Panics
    ///
    /// Panics if `index >= ROWS`.
    fn clone_row(&self, index: usize) -> Self::Item;
}

/// [`Clone`] as seen from inside a container with alignment `A`.
///
/// Generated code bounds on `T: CloneField<A>` rather than `T: Clone` so that
/// the bound depends on the container's parameters and can simply fail to
/// hold for field types that are not [`Clone`].
#[doc(hidden)]
pub trait CloneField<const A: usize>: Sized {
    fn clone_field(&self) -> Self;
}

impl<T, const A: usize> CloneField<A> for T
where
    T: Clone,
{
    fn clone_field(&self) -> Self {
        self.clone()
    }
}
