use crate::{CloneRow, Cursor, CursorMut, FieldInfo, Iter, LayoutReport, OutOfRange, SoaRefMut};
use core::{
    mem::{align_of, size_of},
    ops::ControlFlow,
};

#[diagnostic::on_unimplemented(
    label = "SoA container",
    note = "Derive SoaArray on the row type to generate a container for it"
)]
/// A fixed-size structure-of-arrays container.
///
/// When deriving [`SoaArray`] for some type `Foo`, a struct
/// `FooArray<N, A>` is created which implements this trait. It stores each
/// column field of `Foo` as a [`Column`] of `N` values aligned to `A`, and
/// each scalar field as a single value shared by all rows.
///
/// The required methods are generated by the derive macro. The provided
/// methods build row-wise access, iteration, and layout introspection on top
/// of them.
///
/// [`SoaArray`]: macro@crate::SoaArray
/// [`Column`]: crate::Column
pub trait SoaArray: Sized {
    /// The value type of one row.
    ///
    /// When using the derive macro, this is the type that was derived from.
    /// It holds every field, scalars included.
    type Item;

    /// A read-only view of one row.
    ///
    /// For each field with type `T`, this type has a getter returning `&T`.
    type Ref<'a>: Copy
    where
        Self: 'a;

    /// A mutable view of one row.
    ///
    /// For each field with type `T`, this type has getters returning `&T` and
    /// `&mut T`.
    type RefMut<'a>: SoaRefMut<Item = Self::Item>
    where
        Self: 'a;

    /// Every column as `&[T; N]` and every scalar as `&T`.
    type Slices<'a>
    where
        Self: 'a;

    /// Every column as `&mut [T; N]` and every scalar as `&mut T`.
    type SlicesMut<'a>
    where
        Self: 'a;

    /// The number of rows, `N`.
    const ROWS: usize;

    /// The requested column alignment, `A`.
    const ALIGN: usize;

    /// The name of the container type.
    const NAME: &'static str;

    /// Placement of every field in declaration order.
    const FIELDS: &'static [FieldInfo];

    /// Total size of the container in bytes, padding included.
    const EXTENT: usize = size_of::<Self>();

    /// Creates a container where each row is produced by calling `f` with its
    /// index.
    ///
    /// Scalar fields are taken from the row at index 0. The scalar fields of
    /// the other rows are dropped.
    fn from_fn<F>(f: F) -> Self
    where
        F: FnMut(usize) -> Self::Item;

    /// Returns a view of the row at `index`, or `None` if out of range.
    fn get(&self, index: usize) -> Option<Self::Ref<'_>>;

    /// Returns a mutable view of the row at `index`, or `None` if out of
    /// range.
    fn get_mut(&mut self, index: usize) -> Option<Self::RefMut<'_>>;

    /// Borrows all fields at once.
    fn slices(&self) -> Self::Slices<'_>;

    /// Mutably borrows all fields at once.
    ///
    /// Unlike going through the per-field getters, this allows holding
    /// mutable references to several columns simultaneously.
    fn slices_mut(&mut self) -> Self::SlicesMut<'_>;

    /// Returns the number of rows.
    fn len(&self) -> usize {
        Self::ROWS
    }

    /// Returns true if the container has no rows, which never happens for a
    /// constructed container.
    fn is_empty(&self) -> bool {
        Self::ROWS == 0
    }

    /// Returns a view of the row at `index`.
    fn try_row(&self, index: usize) -> Result<Self::Ref<'_>, OutOfRange> {
        self.get(index).ok_or(OutOfRange {
            index,
            len: Self::ROWS,
        })
    }

    /// Returns a mutable view of the row at `index`.
    fn try_row_mut(&mut self, index: usize) -> Result<Self::RefMut<'_>, OutOfRange> {
        self.get_mut(index).ok_or(OutOfRange {
            index,
            len: Self::ROWS,
        })
    }

    /// Returns a view of the row at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= ROWS`.
    #[track_caller]
    fn row(&self, index: usize) -> Self::Ref<'_> {
        match self.try_row(index) {
            Ok(row) => row,
            Err(e) => panic!("{e}"),
        }
    }

    /// Returns a mutable view of the row at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= ROWS`.
    #[track_caller]
    fn row_mut(&mut self, index: usize) -> Self::RefMut<'_> {
        match self.try_row_mut(index) {
            Ok(row) => row,
            Err(e) => panic!("{e}"),
        }
    }

    /// Assigns the column fields of `value` to the row at `index`.
    ///
    /// Scalar fields of `value` are dropped, the container's scalars are left
    /// untouched.
    ///
    /// # Panics
    ///
    /// Panics if `index >= ROWS`.
    #[track_caller]
    fn set_row(&mut self, index: usize, value: Self::Item) {
        self.row_mut(index).set(value);
    }

    /// Copies the column fields of row `src` into row `dst`.
    ///
    /// Scalars are shared by both rows and are not touched.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[track_caller]
    fn copy_row(&mut self, src: usize, dst: usize)
    where
        Self: CloneRow,
    {
        let value = self.clone_row(src);
        self.row_mut(dst).set(value);
    }

    /// Total size of the container in bytes, padding included.
    fn extent() -> usize {
        Self::EXTENT
    }

    /// Looks up the placement of a field by name.
    fn field(name: &str) -> Option<&'static FieldInfo> {
        Self::FIELDS.iter().find(|field| field.name == name)
    }

    /// Byte offset of a field's storage from the start of the container.
    fn offset_of(name: &str) -> Option<usize> {
        Self::field(name).map(|field| field.offset)
    }

    /// Describes the physical layout of the container type.
    fn layout() -> LayoutReport {
        LayoutReport {
            name: Self::NAME,
            rows: Self::ROWS,
            alignment: Self::ALIGN,
            extent: Self::EXTENT,
            type_align: align_of::<Self>(),
            fields: Self::FIELDS,
        }
    }

    /// Returns an iterator over views of every row.
    fn iter(&self) -> Iter<'_, Self> {
        Iter::new(self)
    }

    /// A cursor at the first row.
    fn begin(&self) -> Cursor<'_, Self> {
        Cursor::new(self, 0)
    }

    /// A cursor one past the last row.
    fn end(&self) -> Cursor<'_, Self> {
        Cursor::new(self, Self::ROWS)
    }

    /// A cursor at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > ROWS`.
    #[track_caller]
    fn cursor(&self, index: usize) -> Cursor<'_, Self> {
        Cursor::new(self, index)
    }

    /// A mutable cursor at the first row.
    fn begin_mut(&mut self) -> CursorMut<'_, Self> {
        CursorMut::new(self, 0)
    }

    /// A mutable cursor one past the last row.
    fn end_mut(&mut self) -> CursorMut<'_, Self> {
        CursorMut::new(self, Self::ROWS)
    }

    /// A mutable cursor at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > ROWS`.
    #[track_caller]
    fn cursor_mut(&mut self, index: usize) -> CursorMut<'_, Self> {
        CursorMut::new(self, index)
    }

    /// An internal iteration version of [`Iterator::try_fold`] that visits
    /// each row as `&Self::Item`.
    ///
    /// This is useful whenever you want to use traits or methods that are
    /// only implemented for the row type rather than for its views. Each row
    /// is cloned out of the container before it is visited.
    fn try_fold<F, B>(&self, init: B, mut f: F) -> B
    where
        Self: CloneRow,
        F: FnMut(B, &Self::Item) -> ControlFlow<B, B>,
    {
        let mut acc = init;
        for index in 0..Self::ROWS {
            let item = self.clone_row(index);
            match f(acc, &item) {
                ControlFlow::Continue(b) => acc = b,
                ControlFlow::Break(b) => return b,
            }
        }
        acc
    }
}
