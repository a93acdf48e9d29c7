/// ```
/// use soa_fixed::SoaArray;
/// #[derive(SoaArray)]
/// struct Foo {
///     a: u8,
/// }
/// let mut soa = FooArray::<2>::from_fn(|i| Foo { a: i as u8 });
/// let row = soa.row(0);
/// println!("{}", row.a());
/// let mut row_mut = soa.row_mut(1);
/// *row_mut.a_mut() = 3;
/// ```
mod simultaneous_mutable_and_immutable {
    /// ```compile_fail
    /// use soa_fixed::SoaArray;
    /// #[derive(SoaArray)]
    /// struct Foo {
    ///     a: u8,
    /// }
    /// let mut soa = FooArray::<2>::from_fn(|i| Foo { a: i as u8 });
    /// let row = soa.row(0);
    /// let mut row_mut = soa.row_mut(1);
    /// *row_mut.a_mut() = 3;
    /// println!("{}", row.a()); // Added
    /// ```
    mod fail {}
}

/// ```
/// use soa_fixed::SoaArray;
/// #[derive(SoaArray)]
/// struct Foo {
///     a: u8,
/// }
/// let mut soa = FooArray::<2>::from_fn(|i| Foo { a: i as u8 });
/// let mut first = soa.row_mut(0);
/// *first.a_mut() = 3;
/// let mut second = soa.row_mut(1);
/// *second.a_mut() = 4;
/// ```
mod multiple_mutable_views {
    /// ```compile_fail
    /// use soa_fixed::SoaArray;
    /// #[derive(SoaArray)]
    /// struct Foo {
    ///     a: u8,
    /// }
    /// let mut soa = FooArray::<2>::from_fn(|i| Foo { a: i as u8 });
    /// let mut first = soa.row_mut(0);
    /// let mut second = soa.row_mut(1);
    /// *second.a_mut() = 4;
    /// *first.a_mut() = 3; // Added
    /// ```
    mod fail {}
}

/// ```
/// use soa_fixed::SoaArray;
/// #[derive(SoaArray)]
/// struct Foo {
///     a: u8,
/// }
/// let mut soa = FooArray::<2>::from_fn(|i| Foo { a: i as u8 });
/// *soa.row_mut(0).a_mut() = 3;
/// ```
mod mutation_through_shared_view {
    /// ```compile_fail
    /// use soa_fixed::SoaArray;
    /// #[derive(SoaArray)]
    /// struct Foo {
    ///     a: u8,
    /// }
    /// let mut soa = FooArray::<2>::from_fn(|i| Foo { a: i as u8 });
    /// *soa.row(0).a_mut() = 3; // Changed
    /// ```
    mod fail {}
}

/// ```
/// use soa_fixed::SoaArray;
/// #[derive(SoaArray)]
/// struct Foo {
///     a: u8,
///     #[soa(scalar)]
///     b: u32,
/// }
/// let mut soa = FooArray::<2>::from_fn(|i| Foo { a: i as u8, b: 7 });
/// let b = soa.b();
/// println!("{b}");
/// *soa.row_mut(1).b_mut() = 8;
/// ```
mod shared_scalar_across_mutable_view {
    /// ```compile_fail
    /// use soa_fixed::SoaArray;
    /// #[derive(SoaArray)]
    /// struct Foo {
    ///     a: u8,
    ///     #[soa(scalar)]
    ///     b: u32,
    /// }
    /// let mut soa = FooArray::<2>::from_fn(|i| Foo { a: i as u8, b: 7 });
    /// let b = soa.b();
    /// *soa.row_mut(1).b_mut() = 8;
    /// println!("{b}"); // Added
    /// ```
    mod fail {}
}

/// ```
/// use soa_fixed::SoaArray;
/// #[derive(SoaArray)]
/// struct Foo {
///     a: u8,
/// }
/// let soa = FooArray::<2>::from_fn(|i| Foo { a: i as u8 });
/// let row = soa.row(1);
/// assert_eq!(*row.a(), 1);
/// ```
mod view_outlives_container {
    /// ```compile_fail
    /// use soa_fixed::SoaArray;
    /// #[derive(SoaArray)]
    /// struct Foo {
    ///     a: u8,
    /// }
    /// let row = {
    ///     let soa = FooArray::<2>::from_fn(|i| Foo { a: i as u8 });
    ///     soa.row(1)
    /// }; // Changed
    /// assert_eq!(*row.a(), 1);
    /// ```
    mod fail {}
}

/// ```
/// use soa_fixed::SoaArray;
/// #[derive(SoaArray)]
/// struct Foo {
///     a: u8,
/// }
/// let mut soa = FooArray::<3>::from_fn(|i| Foo { a: i as u8 });
/// let mut cursor = soa.begin_mut();
/// cursor += 1;
/// *cursor.row_mut().a_mut() = 5;
/// assert_eq!(*soa.begin().row().a(), 0);
/// ```
mod cursor_while_mutating {
    /// ```compile_fail
    /// use soa_fixed::SoaArray;
    /// #[derive(SoaArray)]
    /// struct Foo {
    ///     a: u8,
    /// }
    /// let mut soa = FooArray::<3>::from_fn(|i| Foo { a: i as u8 });
    /// let begin = soa.begin(); // Added
    /// let mut cursor = soa.begin_mut();
    /// cursor += 1;
    /// *cursor.row_mut().a_mut() = 5;
    /// assert_eq!(*begin.row().a(), 0);
    /// ```
    mod fail {}
}

/// ```
/// use soa_fixed::SoaArray;
/// #[derive(SoaArray)]
/// struct Foo {
///     a: u8,
/// }
/// let soa = FooArray::<1>::from_fn(|_| Foo { a: 0 });
/// ```
mod zero_rows {
    /// ```compile_fail
    /// use soa_fixed::SoaArray;
    /// #[derive(SoaArray)]
    /// struct Foo {
    ///     a: u8,
    /// }
    /// let soa = FooArray::<0>::from_fn(|_| Foo { a: 0 }); // Changed
    /// ```
    mod fail {}
}

/// ```
/// use soa_fixed::SoaArray;
/// #[derive(SoaArray)]
/// struct Foo {
///     a: u8,
/// }
/// let soa = FooArray::<4, 64>::from_fn(|_| Foo { a: 0 });
/// ```
mod non_power_of_two_alignment {
    /// ```compile_fail
    /// use soa_fixed::SoaArray;
    /// #[derive(SoaArray)]
    /// struct Foo {
    ///     a: u8,
    /// }
    /// let soa = FooArray::<4, 48>::from_fn(|_| Foo { a: 0 }); // Changed
    /// ```
    mod fail {}
}

/// ```
/// use soa_fixed::SoaArray;
/// #[derive(SoaArray)]
/// struct Foo {
///     a: u8,
///     b: u8,
/// }
/// ```
mod duplicate_field {
    /// ```compile_fail
    /// use soa_fixed::SoaArray;
    /// #[derive(SoaArray)]
    /// struct Foo {
    ///     a: u8,
    ///     a: u8, // Changed
    /// }
    /// ```
    mod fail {}
}

/// ```
/// use soa_fixed::SoaArray;
/// #[derive(SoaArray)]
/// #[soa_derive(Default, include(Array))]
/// struct Foo {
///     a: u8,
/// }
/// let soa = FooArray::<2>::default();
/// assert_eq!(soa.a(), &[0, 0]);
/// ```
mod zero_rows_by_default {
    /// ```compile_fail
    /// use soa_fixed::SoaArray;
    /// #[derive(SoaArray)]
    /// #[soa_derive(Default, include(Array))]
    /// struct Foo {
    ///     a: u8,
    /// }
    /// let soa = FooArray::<0>::default(); // Changed
    /// ```
    mod fail {}
}

/// ```
/// use soa_fixed::SoaArray;
/// #[derive(SoaArray)]
/// struct Foo {
///     a: u32,
///     b: String,
/// }
/// let soa = FooArray::<2>::from_fn(|i| Foo { a: i as u32, b: String::new() });
/// ```
mod row_type_with_drop {
    /// ```compile_fail
    /// use soa_fixed::SoaArray;
    /// #[derive(SoaArray)]
    /// struct Foo {
    ///     a: u32,
    ///     b: String,
    /// }
    /// impl Drop for Foo {
    ///     fn drop(&mut self) {}
    /// } // Added
    /// let soa = FooArray::<2>::from_fn(|i| Foo { a: i as u32, b: String::new() });
    /// ```
    mod fail {}
}

/// ```
/// use soa_fixed::SoaArray;
/// #[derive(SoaArray)]
/// struct Foo {
///     a: u8,
///     b: u8,
/// }
/// ```
mod field_shadows_container_method {
    /// ```compile_fail
    /// use soa_fixed::SoaArray;
    /// #[derive(SoaArray)]
    /// struct Foo {
    ///     a: u8,
    ///     len: u8, // Changed
    /// }
    /// ```
    mod fail {}
}

/// ```
/// use soa_fixed::SoaArray;
/// use std::cell::Cell;
/// #[derive(SoaArray)]
/// struct Foo {
///     slot: Cell<Option<Box<u64>>>,
/// }
/// let soa = FooArray::<1>::from_fn(|_| Foo { slot: Cell::new(Some(Box::new(5))) });
/// let taken = soa.row(0).slot().take();
/// assert_eq!(taken.as_deref(), Some(&5));
/// ```
mod lend_row_without_clone {
    /// ```compile_fail
    /// use soa_fixed::{SoaArray, WithRef};
    /// use std::cell::Cell;
    /// #[derive(SoaArray)]
    /// struct Foo {
    ///     slot: Cell<Option<Box<u64>>>,
    /// }
    /// let soa = FooArray::<1>::from_fn(|_| Foo { slot: Cell::new(Some(Box::new(5))) });
    /// soa.row(0).with_ref(|foo| drop(foo.slot.take())); // Changed
    /// ```
    mod fail {}
}
