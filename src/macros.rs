#[doc(hidden)]
#[macro_export]
macro_rules! __ref_derive_debug {
    ($t:ty, $r:ident) => {
        impl<'__soa, const __SOA_N: usize, const __SOA_A: usize> ::core::fmt::Debug for $r<'__soa, __SOA_N, __SOA_A>
        where
            $crate::Align<__SOA_A>: $crate::Alignment,
            $r<'__soa, __SOA_N, __SOA_A>: $crate::WithRef<Item = $t>,
        {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                $crate::WithRef::with_ref(self, |me| ::core::fmt::Debug::fmt(me, f))
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __ref_derive_partial_eq {
    ($t:ty, $r:ident) => {
        impl<'__soa, const __SOA_N: usize, const __SOA_A: usize, __SoaOther> ::core::cmp::PartialEq<__SoaOther> for $r<'__soa, __SOA_N, __SOA_A>
        where
            $crate::Align<__SOA_A>: $crate::Alignment,
            $r<'__soa, __SOA_N, __SOA_A>: $crate::WithRef<Item = $t>,
            __SoaOther: $crate::WithRef<Item = $t> + ?Sized,
        {
            fn eq(&self, other: &__SoaOther) -> bool {
                $crate::WithRef::with_ref(self, |me| {
                    $crate::WithRef::with_ref(other, |them| me == them)
                })
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __ref_derive_eq {
    ($t:ty, $r:ident) => {
        impl<'__soa, const __SOA_N: usize, const __SOA_A: usize> ::core::cmp::Eq for $r<'__soa, __SOA_N, __SOA_A> where
            $crate::Align<__SOA_A>: $crate::Alignment,
            $r<'__soa, __SOA_N, __SOA_A>: $crate::WithRef<Item = $t>,
        {
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __ref_derive_partial_ord {
    ($t:ty, $r:ident) => {
        impl<'__soa, const __SOA_N: usize, const __SOA_A: usize, __SoaOther> ::core::cmp::PartialOrd<__SoaOther> for $r<'__soa, __SOA_N, __SOA_A>
        where
            $crate::Align<__SOA_A>: $crate::Alignment,
            $r<'__soa, __SOA_N, __SOA_A>: $crate::WithRef<Item = $t>,
            __SoaOther: $crate::WithRef<Item = $t> + ?Sized,
        {
            fn partial_cmp(&self, other: &__SoaOther) -> ::core::option::Option<::core::cmp::Ordering> {
                $crate::WithRef::with_ref(self, |me| {
                    $crate::WithRef::with_ref(other, |them| {
                        ::core::cmp::PartialOrd::partial_cmp(me, them)
                    })
                })
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __ref_derive_ord {
    ($t:ty, $r:ident) => {
        impl<'__soa, const __SOA_N: usize, const __SOA_A: usize> ::core::cmp::Ord for $r<'__soa, __SOA_N, __SOA_A>
        where
            $crate::Align<__SOA_A>: $crate::Alignment,
            $r<'__soa, __SOA_N, __SOA_A>: $crate::WithRef<Item = $t>,
        {
            fn cmp(&self, other: &Self) -> ::core::cmp::Ordering {
                $crate::WithRef::with_ref(self, |me| {
                    $crate::WithRef::with_ref(other, |them| ::core::cmp::Ord::cmp(me, them))
                })
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __ref_derive_hash {
    ($t:ty, $r:ident) => {
        impl<'__soa, const __SOA_N: usize, const __SOA_A: usize> ::core::hash::Hash for $r<'__soa, __SOA_N, __SOA_A>
        where
            $crate::Align<__SOA_A>: $crate::Alignment,
            $r<'__soa, __SOA_N, __SOA_A>: $crate::WithRef<Item = $t>,
        {
            fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                $crate::WithRef::with_ref(self, |me| ::core::hash::Hash::hash(me, state))
            }
        }
    };
}

/// Implements standard traits for a generated row view by delegating to the
/// row type through [`WithRef`].
///
/// Row views only hold a container reference and an index, so the usual
/// `#[derive]` does not apply. The derive macro emits calls to this macro for
/// the traits listed in `#[soa_derive(..)]`. The implementations only exist
/// while the view implements [`WithRef`], that is while every field is
/// [`Clone`].
///
/// [`WithRef`]: crate::WithRef
#[doc(hidden)]
#[macro_export]
macro_rules! ref_derive {
    (; $t:ty, $r:ident) => {};

    (Debug $(, $rest:ident)*; $t:ty, $r:ident) => {
        $crate::__ref_derive_debug!($t, $r);
        $crate::ref_derive!($($rest),*; $t, $r);
    };

    (PartialEq $(, $rest:ident)*; $t:ty, $r:ident) => {
        $crate::__ref_derive_partial_eq!($t, $r);
        $crate::ref_derive!($($rest),*; $t, $r);
    };

    (Eq $(, $rest:ident)*; $t:ty, $r:ident) => {
        $crate::__ref_derive_eq!($t, $r);
        $crate::ref_derive!($($rest),*; $t, $r);
    };

    (PartialOrd $(, $rest:ident)*; $t:ty, $r:ident) => {
        $crate::__ref_derive_partial_ord!($t, $r);
        $crate::ref_derive!($($rest),*; $t, $r);
    };

    (Ord $(, $rest:ident)*; $t:ty, $r:ident) => {
        $crate::__ref_derive_ord!($t, $r);
        $crate::ref_derive!($($rest),*; $t, $r);
    };

    (Hash $(, $rest:ident)*; $t:ty, $r:ident) => {
        $crate::__ref_derive_hash!($t, $r);
        $crate::ref_derive!($($rest),*; $t, $r);
    };
}
