//! Fixed-size structure-of-arrays containers with per-column alignment.
//!
//! Deriving [`SoaArray`](macro@SoaArray) on a struct `Foo` generates a container
//! `FooArray<N, A>` that stores each field of `Foo` as its own array of `N`
//! values, aligned to `A` bytes. Fields marked `#[soa(scalar)]` are stored
//! once and shared by every row instead.
//!
//! The container can be used column-wise, handing out each column as a
//! `[T; N]` for vectorized code, or row-wise through lightweight row views
//! that borrow the container. Both faces reach the same memory.
//!
//! ```
//! use soa_fixed::{SoaArray, SoaRefMut, WithRef};
//!
//! #[derive(SoaArray, Clone, Debug, PartialEq)]
//! struct Particle {
//!     x: f64,
//!     y: f64,
//!     mass: f32,
//!     #[soa(scalar)]
//!     label: &'static str,
//! }
//!
//! let mut particles = ParticleArray::<8, 32>::from_fn(|i| Particle {
//!     x: i as f64,
//!     y: 0.0,
//!     mass: 1.0,
//!     label: "dust",
//! });
//!
//! // Column-wise
//! let sum: f64 = particles.x().iter().sum();
//! assert_eq!(sum, 28.0);
//! assert_eq!(particles.x().as_ptr().addr() % 32, 0);
//!
//! // Row-wise
//! particles.row_mut(3).set(Particle { x: 10.0, y: 1.0, mass: 2.0, label: "ignored" });
//! assert_eq!(*particles.row(3).x(), 10.0);
//! assert_eq!(*particles.row(3).label(), "dust");
//!
//! let snapshot = particles.row(3).cloned();
//! assert_eq!(snapshot.mass, 2.0);
//! ```
//!
//! Each row type must be a struct with named fields, at least one of which
//! is a column. It must not implement [`Drop`], because its fields are moved
//! into separate columns. A container must have at least one row, and `A` must
//! be zero (natural alignment) or a power of two.
//!
//! Field names must not shadow the methods of the container or of the row
//! views, such as `row`, `iter`, `len` or `index`. The derive macro reports
//! such names as errors.
//!
//! # Generated types
//!
//! For `Foo`, the derive macro generates
//!
//! - `FooArray<N, A>`, the container, implementing [`SoaArray`].
//! - `FooRef` and `FooRefMut`, read-only and mutable row views. They hold the
//!   container and a row index and look fields up on access. When every field
//!   is [`Clone`], views also implement [`WithRef`] by cloning the row out of
//!   the container, see [`CloneRow`].
//! - `FooSlices` and `FooSlicesMut`, every column and scalar borrowed at once,
//!   from [`SoaArray::slices`] and [`SoaArray::slices_mut`].
//!
//! Use `#[soa_derive(Debug, PartialEq, ..)]` to add trait implementations to
//! the generated types. `include(..)` and `exclude(..)` restrict them to some
//! of `Array`, `Ref`, `RefMut`, `Slices` and `SlicesMut`.
//!
//! # Layout
//!
//! The container is `#[repr(C)]` with fields in declaration order. Every
//! column is a [`Column`], whose size is rounded up to its alignment, so the
//! placement of every field is deterministic and can be inspected through
//! [`SoaArray::FIELDS`], [`SoaArray::offset_of`] and [`SoaArray::layout`].

#![no_std]

extern crate self as soa_fixed;

#[cfg(test)]
extern crate std;

mod align;
pub use align::{Align, Alignment};

mod column;
pub use column::Column;

mod soa_array;
pub use soa_array::SoaArray;

mod with_ref;
pub use with_ref::WithRef;

mod clone_row;
#[doc(hidden)]
pub use clone_row::CloneField;
pub use clone_row::CloneRow;

mod soa_ref;
pub use soa_ref::SoaRefMut;

mod iter;
pub use iter::Iter;

mod cursor;
pub use cursor::{Cursor, CursorMut};

mod layout;
pub use layout::{FieldInfo, FieldKind, LayoutReport};

mod out_of_range;
pub use out_of_range::OutOfRange;

mod macros;

#[cfg(feature = "serde")]
mod serde;
#[cfg(feature = "serde")]
pub use serde::{SerializeRow, SerializeRows};

mod borrow_tests;

/// Derives [`SoaArray`](trait@SoaArray) for a struct with named fields.
///
/// Fields are columns by default. Mark a field `#[soa(scalar)]` to store a
/// single value shared by every row.
pub use soa_fixed_derive::SoaArray;
