use crate::{OutOfRange, SoaArray};
use core::{
    cmp::Ordering,
    fmt::{self, Debug, Formatter},
    hash::{Hash, Hasher},
    ops::{Add, AddAssign, Sub, SubAssign},
    ptr,
};

/// Moves `index` by `delta`, keeping it within `[0, len]`.
#[track_caller]
fn step(index: usize, delta: isize, len: usize) -> usize {
    match index.checked_add_signed(delta) {
        Some(next) if next <= len => next,
        _ => panic!("cursor moved out of bounds: {index} + {delta} is outside 0..={len}"),
    }
}

#[track_caller]
fn check_position(index: usize, len: usize) {
    assert!(
        index <= len,
        "cursor position {index} is past the end of a container with {len} rows"
    );
}

/// A random-access position within a container, like a pointer into an
/// array.
///
/// The position ranges over `[0, ROWS]`, where `ROWS` is the end position one
/// past the last row. Cursors compare first by the address of their container
/// and then by position, and subtracting two cursors of the same container
/// gives the signed distance between them.
///
/// ```
/// use soa_fixed::SoaArray;
///
/// #[derive(SoaArray, Clone, Debug, PartialEq)]
/// struct Point {
///     x: f32,
///     y: f32,
/// }
///
/// let points = PointArray::<4>::from_fn(|i| Point { x: i as f32, y: 0.0 });
/// let begin = points.begin();
/// let end = points.end();
/// assert_eq!(end - begin, 4);
/// assert_eq!(*(begin + 2).row().x(), 2.0);
/// assert!(begin < end);
/// ```
pub struct Cursor<'a, S>
where
    S: SoaArray,
{
    soa: &'a S,
    index: usize,
}

impl<'a, S> Cursor<'a, S>
where
    S: SoaArray,
{
    #[track_caller]
    pub(crate) fn new(soa: &'a S, index: usize) -> Self {
        check_position(index, S::ROWS);
        Self { soa, index }
    }

    /// The current position.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns true at the end position.
    pub fn is_end(&self) -> bool {
        self.index == S::ROWS
    }

    /// The container this cursor points into.
    pub fn container(&self) -> &'a S {
        self.soa
    }

    /// Returns the row at the current position, or `None` at the end.
    pub fn get(&self) -> Option<S::Ref<'a>> {
        self.soa.get(self.index)
    }

    /// Returns the row at the current position.
    pub fn try_row(&self) -> Result<S::Ref<'a>, OutOfRange> {
        self.soa.try_row(self.index)
    }

    /// Returns the row at the current position.
    ///
    /// # Panics
    ///
    /// Panics at the end position.
    #[track_caller]
    pub fn row(&self) -> S::Ref<'a> {
        self.soa.row(self.index)
    }

    /// Moves by `delta` rows, returning `None` if that would leave
    /// `[0, ROWS]`.
    pub fn checked_offset(self, delta: isize) -> Option<Self> {
        let index = self.index.checked_add_signed(delta)?;
        (index <= S::ROWS).then_some(Self {
            soa: self.soa,
            index,
        })
    }

    /// The signed number of rows from `origin` to `self`.
    ///
    /// # Panics
    ///
    /// Panics if the cursors belong to different containers.
    #[track_caller]
    pub fn offset_from(&self, origin: &Self) -> isize {
        assert!(
            ptr::eq(self.soa, origin.soa),
            "cursors belong to different containers"
        );
        // Positions are at most ROWS, which fits in isize for any container
        // that fits in memory.
        self.index as isize - origin.index as isize
    }

    fn key(&self) -> (usize, usize) {
        (ptr::from_ref(self.soa).addr(), self.index)
    }
}

impl<S> Clone for Cursor<'_, S>
where
    S: SoaArray,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Cursor<'_, S> where S: SoaArray {}

impl<S> Debug for Cursor<'_, S>
where
    S: SoaArray,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("container", &ptr::from_ref(self.soa))
            .field("index", &self.index)
            .finish()
    }
}

impl<S> PartialEq for Cursor<'_, S>
where
    S: SoaArray,
{
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<S> Eq for Cursor<'_, S> where S: SoaArray {}

impl<S> PartialOrd for Cursor<'_, S>
where
    S: SoaArray,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for Cursor<'_, S>
where
    S: SoaArray,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl<S> Hash for Cursor<'_, S>
where
    S: SoaArray,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state)
    }
}

impl<S> AddAssign<isize> for Cursor<'_, S>
where
    S: SoaArray,
{
    #[track_caller]
    fn add_assign(&mut self, delta: isize) {
        self.index = step(self.index, delta, S::ROWS);
    }
}

impl<S> SubAssign<isize> for Cursor<'_, S>
where
    S: SoaArray,
{
    #[track_caller]
    fn sub_assign(&mut self, delta: isize) {
        let delta = delta.checked_neg().expect("cursor offset overflow");
        self.index = step(self.index, delta, S::ROWS);
    }
}

impl<S> Add<isize> for Cursor<'_, S>
where
    S: SoaArray,
{
    type Output = Self;

    #[track_caller]
    fn add(mut self, delta: isize) -> Self::Output {
        self += delta;
        self
    }
}

impl<S> Sub<isize> for Cursor<'_, S>
where
    S: SoaArray,
{
    type Output = Self;

    #[track_caller]
    fn sub(mut self, delta: isize) -> Self::Output {
        self -= delta;
        self
    }
}

impl<S> Sub for Cursor<'_, S>
where
    S: SoaArray,
{
    type Output = isize;

    #[track_caller]
    fn sub(self, origin: Self) -> Self::Output {
        self.offset_from(&origin)
    }
}

/// A random-access position within a container that allows mutating the row
/// it points at.
///
/// Holding a `CursorMut` borrows the whole container exclusively, so no other
/// view of the container can exist at the same time.
pub struct CursorMut<'a, S>
where
    S: SoaArray,
{
    soa: &'a mut S,
    index: usize,
}

impl<'a, S> CursorMut<'a, S>
where
    S: SoaArray,
{
    #[track_caller]
    pub(crate) fn new(soa: &'a mut S, index: usize) -> Self {
        check_position(index, S::ROWS);
        Self { soa, index }
    }

    /// The current position.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns true at the end position.
    pub fn is_end(&self) -> bool {
        self.index == S::ROWS
    }

    /// Reborrows as a read-only cursor at the same position.
    pub fn as_cursor(&self) -> Cursor<'_, S> {
        Cursor {
            soa: &*self.soa,
            index: self.index,
        }
    }

    /// Returns the row at the current position, or `None` at the end.
    pub fn get(&self) -> Option<S::Ref<'_>> {
        self.soa.get(self.index)
    }

    /// Returns the mutable row at the current position, or `None` at the end.
    pub fn get_mut(&mut self) -> Option<S::RefMut<'_>> {
        self.soa.get_mut(self.index)
    }

    /// Returns the mutable row at the current position.
    pub fn try_row_mut(&mut self) -> Result<S::RefMut<'_>, OutOfRange> {
        self.soa.try_row_mut(self.index)
    }

    /// Returns the row at the current position.
    ///
    /// # Panics
    ///
    /// Panics at the end position.
    #[track_caller]
    pub fn row(&self) -> S::Ref<'_> {
        self.soa.row(self.index)
    }

    /// Returns the mutable row at the current position.
    ///
    /// # Panics
    ///
    /// Panics at the end position.
    #[track_caller]
    pub fn row_mut(&mut self) -> S::RefMut<'_> {
        self.soa.row_mut(self.index)
    }

    /// Converts into the mutable row at the current position.
    ///
    /// # Panics
    ///
    /// Panics at the end position.
    #[track_caller]
    pub fn into_row_mut(self) -> S::RefMut<'a> {
        let Self { soa, index } = self;
        soa.row_mut(index)
    }

    /// Moves by `delta` rows, returning `false` and staying put if that would
    /// leave `[0, ROWS]`.
    pub fn try_offset(&mut self, delta: isize) -> bool {
        match self.index.checked_add_signed(delta) {
            Some(index) if index <= S::ROWS => {
                self.index = index;
                true
            }
            _ => false,
        }
    }
}

impl<S> Debug for CursorMut<'_, S>
where
    S: SoaArray,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("container", &ptr::from_ref::<S>(&*self.soa))
            .field("index", &self.index)
            .finish()
    }
}

impl<S> PartialEq for CursorMut<'_, S>
where
    S: SoaArray,
{
    fn eq(&self, other: &Self) -> bool {
        self.as_cursor() == other.as_cursor()
    }
}

impl<S> Eq for CursorMut<'_, S> where S: SoaArray {}

impl<S> PartialOrd for CursorMut<'_, S>
where
    S: SoaArray,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for CursorMut<'_, S>
where
    S: SoaArray,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_cursor().cmp(&other.as_cursor())
    }
}

impl<S> AddAssign<isize> for CursorMut<'_, S>
where
    S: SoaArray,
{
    #[track_caller]
    fn add_assign(&mut self, delta: isize) {
        self.index = step(self.index, delta, S::ROWS);
    }
}

impl<S> SubAssign<isize> for CursorMut<'_, S>
where
    S: SoaArray,
{
    #[track_caller]
    fn sub_assign(&mut self, delta: isize) {
        let delta = delta.checked_neg().expect("cursor offset overflow");
        self.index = step(self.index, delta, S::ROWS);
    }
}

impl<S> Add<isize> for CursorMut<'_, S>
where
    S: SoaArray,
{
    type Output = Self;

    #[track_caller]
    fn add(mut self, delta: isize) -> Self::Output {
        self += delta;
        self
    }
}

impl<S> Sub<isize> for CursorMut<'_, S>
where
    S: SoaArray,
{
    type Output = Self;

    #[track_caller]
    fn sub(mut self, delta: isize) -> Self::Output {
        self -= delta;
        self
    }
}
