use crate::{Align, Alignment};
use core::{
    fmt::{self, Debug, Formatter},
    hash::{Hash, Hasher},
    ops::{Deref, DerefMut, Index, IndexMut},
    slice,
};

/// Backing storage for one column: exactly `N` values of `T`.
///
/// Values are packed with a stride of `size_of::<T>()`. The base address is
/// aligned to `max(align_of::<T>(), A)`, and the size of the column is
/// `N * size_of::<T>()` rounded up to that alignment, so a column placed after
/// another column inside a `#[repr(C)]` container starts on an `A` boundary.
///
/// ```
/// use soa_fixed::Column;
/// use core::mem::{align_of, size_of};
///
/// assert_eq!(align_of::<Column<f64, 31, 64>>(), 64);
/// assert_eq!(size_of::<Column<f64, 31, 64>>(), 256);
/// assert_eq!(size_of::<Column<u16, 31>>(), 62);
/// ```
#[repr(C)]
pub struct Column<T, const N: usize, const A: usize = 0>
where
    Align<A>: Alignment,
{
    _align: [<Align<A> as Alignment>::Archetype; 0],
    data: [T; N],
}

impl<T, const N: usize, const A: usize> Column<T, N, A>
where
    Align<A>: Alignment,
{
    /// Number of values in the column.
    pub const LEN: usize = N;

    /// Wraps an array.
    ///
    /// Every constructor ends up here, so a column of zero values fails to
    /// compile no matter how it is built.
    pub const fn from_array(data: [T; N]) -> Self {
        const { assert!(N > 0, "a container must have at least one row") };
        Self { _align: [], data }
    }

    /// Creates a column where each value is produced by calling `f` with its
    /// row index.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        Self::from_array(core::array::from_fn(f))
    }

    /// Unwraps the column into its values.
    pub fn into_array(self) -> [T; N] {
        self.data
    }

    /// Returns the number of values, which is always `N`.
    pub const fn len(&self) -> usize {
        N
    }

    /// Returns true if `N == 0`.
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    pub const fn as_array(&self) -> &[T; N] {
        &self.data
    }

    pub const fn as_mut_array(&mut self) -> &mut [T; N] {
        &mut self.data
    }

    pub const fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub const fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Returns a pointer to the first value.
    ///
    /// The pointer is aligned to `max(align_of::<T>(), A)` and valid for
    /// reads of `N` consecutive values.
    pub const fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    /// Returns a mutable pointer to the first value.
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr()
    }

    /// Returns the value at `index`, or `None` if `index >= N`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.data.get_mut(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.data.iter_mut()
    }
}

impl<T, const N: usize, const A: usize> Deref for Column<T, N, A>
where
    Align<A>: Alignment,
{
    type Target = [T; N];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T, const N: usize, const A: usize> DerefMut for Column<T, N, A>
where
    Align<A>: Alignment,
{
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

impl<T, const N: usize, const A: usize> Index<usize> for Column<T, N, A>
where
    Align<A>: Alignment,
{
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T, const N: usize, const A: usize> IndexMut<usize> for Column<T, N, A>
where
    Align<A>: Alignment,
{
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl<'a, T, const N: usize, const A: usize> IntoIterator for &'a Column<T, N, A>
where
    Align<A>: Alignment,
{
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const N: usize, const A: usize> IntoIterator for &'a mut Column<T, N, A>
where
    Align<A>: Alignment,
{
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

// Derive would require `[T; N]: Default`, which only holds up to N = 32
impl<T, const N: usize, const A: usize> Default for Column<T, N, A>
where
    T: Default,
    Align<A>: Alignment,
{
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T, const N: usize, const A: usize> Clone for Column<T, N, A>
where
    T: Clone,
    Align<A>: Alignment,
{
    fn clone(&self) -> Self {
        Self::from_array(self.data.clone())
    }
}

impl<T, const N: usize, const A: usize> Copy for Column<T, N, A>
where
    T: Copy,
    Align<A>: Alignment,
{
}

impl<T, const N: usize, const A: usize> Debug for Column<T, N, A>
where
    T: Debug,
    Align<A>: Alignment,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

impl<T, const N: usize, const A: usize> PartialEq for Column<T, N, A>
where
    T: PartialEq,
    Align<A>: Alignment,
{
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<T, const N: usize, const A: usize> Eq for Column<T, N, A>
where
    T: Eq,
    Align<A>: Alignment,
{
}

impl<T, const N: usize, const A: usize> Hash for Column<T, N, A>
where
    T: Hash,
    Align<A>: Alignment,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.hash(state)
    }
}

impl<T, const N: usize, const A: usize> From<[T; N]> for Column<T, N, A>
where
    Align<A>: Alignment,
{
    fn from(value: [T; N]) -> Self {
        Self::from_array(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::{align_of, size_of, size_of_val};

    #[test]
    fn natural_alignment() {
        assert_eq!(align_of::<Column<u16, 10>>(), align_of::<u16>());
        assert_eq!(size_of::<Column<u16, 10>>(), 20);
        assert_eq!(align_of::<Column<f64, 10>>(), align_of::<f64>());
    }

    #[test]
    fn raised_alignment_rounds_size() {
        assert_eq!(align_of::<Column<u16, 31, 64>>(), 64);
        assert_eq!(size_of::<Column<u16, 31, 64>>(), 64);
        assert_eq!(size_of::<Column<u16, 32, 64>>(), 64);
        assert_eq!(size_of::<Column<u16, 33, 64>>(), 128);
    }

    #[test]
    fn alignment_below_natural_is_ignored() {
        assert_eq!(align_of::<Column<f64, 3, 2>>(), align_of::<f64>());
        assert_eq!(size_of::<Column<f64, 3, 2>>(), 24);
    }

    #[test]
    fn base_address_is_aligned() {
        let column = Column::<u8, 5, 256>::from_fn(|i| i as u8);
        assert_eq!(column.as_ptr() as usize % 256, 0);
        assert_eq!(column.as_slice(), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn stride_is_element_size() {
        let column = Column::<u32, 4, 64>::from_array([1, 2, 3, 4]);
        let first = &column[0] as *const u32 as usize;
        let second = &column[1] as *const u32 as usize;
        assert_eq!(second - first, size_of::<u32>());
        assert_eq!(size_of_val(column.as_array()), 4 * size_of::<u32>());
    }

    #[test]
    fn indexing() {
        let mut column = Column::<i32, 3>::default();
        column[1] = 7;
        *column.get_mut(2).unwrap() = 9;
        assert_eq!(column.get(3), None);
        assert_eq!(column.into_array(), [0, 7, 9]);
    }

    #[test]
    fn default_beyond_std_array_limit() {
        let column = Column::<u8, 100, 16>::default();
        assert!(column.iter().all(|&value| value == 0));
        assert_eq!(column.len(), 100);
    }
}
