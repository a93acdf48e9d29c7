use core::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// A `soa_derive` include or exclude list named a generated type that does
/// not exist.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct SetByPathError {
    pub specifier: String,
}

impl Display for SetByPathError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown mask specifier `{}`, expected one of Array, Ref, RefMut, Slices, SlicesMut",
            self.specifier
        )
    }
}

impl Error for SetByPathError {}
