use core::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// A row index was not less than the number of rows.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct OutOfRange {
    pub index: usize,
    pub len: usize,
}

impl Display for OutOfRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row index {} out of range for container with {} rows",
            self.index, self.len
        )
    }
}

impl Error for OutOfRange {}
