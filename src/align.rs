/// Type-level alignment marker used as the `A` parameter of a container.
///
/// `Align<A>` implements [`Alignment`] for `A == 0`, meaning the natural
/// alignment of each column's element type, and for every power of two from
/// 1 to 65536. Any other value is rejected at compile time:
///
/// ```compile_fail
/// use soa_fixed::{Align, Alignment};
/// fn archetype<const A: usize>() where Align<A>: Alignment {}
/// archetype::<48>();
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Align<const A: usize>;

/// Maps an [`Align`] marker to a zero-sized type with that alignment.
///
/// A zero-length array of [`Alignment::Archetype`] placed at the start of a
/// `#[repr(C)]` struct raises the struct's alignment without adding any bytes.
pub trait Alignment {
    /// A zero-sized type whose alignment is `A`, or 1 when `A == 0`.
    type Archetype: Copy;

    /// The requested alignment, `0` for natural alignment.
    const REQUESTED: usize;
}

macro_rules! archetypes {
    ($($name:ident = $align:literal),* $(,)?) => {
        $(
        #[doc(hidden)]
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(align($align))]
        pub struct $name;

        impl Alignment for Align<$align> {
            type Archetype = $name;
            const REQUESTED: usize = $align;
        }
        )*
    };
}

impl Alignment for Align<0> {
    type Archetype = Align1;
    const REQUESTED: usize = 0;
}

archetypes! {
    Align1 = 1,
    Align2 = 2,
    Align4 = 4,
    Align8 = 8,
    Align16 = 16,
    Align32 = 32,
    Align64 = 64,
    Align128 = 128,
    Align256 = 256,
    Align512 = 512,
    Align1024 = 1024,
    Align2048 = 2048,
    Align4096 = 4096,
    Align8192 = 8192,
    Align16384 = 16384,
    Align32768 = 32768,
    Align65536 = 65536,
}
