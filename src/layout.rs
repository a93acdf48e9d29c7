use core::fmt::{self, Display, Formatter};

/// Whether a field is stored once per row or once per container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKind {
    /// One value per row, stored as a [`Column`].
    ///
    /// [`Column`]: crate::Column
    Column,
    /// One value shared by every row.
    Scalar,
}

/// Placement of one field inside a container.
///
/// For columns, `size` covers the whole backing array including the padding
/// that rounds it up to the column alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldInfo {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Byte offset of the field's storage from the start of the container.
    pub offset: usize,
    /// Bytes occupied by the field's storage.
    pub size: usize,
    /// Alignment of the field's storage.
    pub align: usize,
    /// Size of a single value of the field's type.
    pub elem_size: usize,
}

impl FieldInfo {
    /// One past the last byte of the field.
    pub const fn end(&self) -> usize {
        self.offset + self.size
    }

    /// Returns true if the byte ranges of the two fields intersect.
    pub const fn overlaps(&self, other: &FieldInfo) -> bool {
        self.size != 0 && other.size != 0 && self.offset < other.end() && other.offset < self.end()
    }
}

/// A description of a container type's physical layout.
///
/// Obtained from [`SoaArray::layout`]. The [`Display`] implementation prints
/// one line per field:
///
/// ```text
/// EntityArray<10, 64>:
///   sizeof(...): 512
///   alignof(...): 64
///   x_[10] at 0 has size 128
///   description_ at 384 has size 24
/// ```
///
/// [`SoaArray::layout`]: crate::SoaArray::layout
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayoutReport {
    pub name: &'static str,
    pub rows: usize,
    /// The requested column alignment, `0` for natural alignment.
    pub alignment: usize,
    /// Total size of the container in bytes.
    pub extent: usize,
    /// Alignment of the container type itself.
    pub type_align: usize,
    pub fields: &'static [FieldInfo],
}

impl LayoutReport {
    /// Bytes of the container not covered by any field.
    pub fn padding(&self) -> usize {
        self.extent - self.fields.iter().map(|field| field.size).sum::<usize>()
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static FieldInfo> + 'static {
        let fields = self.fields;
        fields.iter().filter(|field| field.kind == FieldKind::Column)
    }

    pub fn scalars(&self) -> impl Iterator<Item = &'static FieldInfo> + 'static {
        let fields = self.fields;
        fields.iter().filter(|field| field.kind == FieldKind::Scalar)
    }
}

impl Display for LayoutReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}<{}, {}>:", self.name, self.rows, self.alignment)?;
        writeln!(f, "  sizeof(...): {}", self.extent)?;
        write!(f, "  alignof(...): {}", self.type_align)?;
        for field in self.fields {
            match field.kind {
                FieldKind::Column => write!(
                    f,
                    "\n  {}_[{}] at {} has size {}",
                    field.name, self.rows, field.offset, field.size
                )?,
                FieldKind::Scalar => write!(
                    f,
                    "\n  {}_ at {} has size {}",
                    field.name, field.offset, field.size
                )?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[FieldInfo] = &[
        FieldInfo {
            name: "x",
            kind: FieldKind::Column,
            offset: 0,
            size: 64,
            align: 64,
            elem_size: 8,
        },
        FieldInfo {
            name: "d",
            kind: FieldKind::Scalar,
            offset: 64,
            size: 8,
            align: 8,
            elem_size: 8,
        },
    ];

    const REPORT: LayoutReport = LayoutReport {
        name: "FooArray",
        rows: 8,
        alignment: 64,
        extent: 128,
        type_align: 64,
        fields: FIELDS,
    };

    #[test]
    fn overlap() {
        assert!(!FIELDS[0].overlaps(&FIELDS[1]));
        assert!(FIELDS[0].overlaps(&FIELDS[0]));
    }

    #[test]
    fn padding() {
        assert_eq!(REPORT.padding(), 56);
        assert_eq!(REPORT.columns().count(), 1);
        assert_eq!(REPORT.scalars().next().map(|f| f.name), Some("d"));
    }

    #[test]
    fn display() {
        use std::string::ToString;

        let expected = "FooArray<8, 64>:\n  \
            sizeof(...): 128\n  \
            alignof(...): 64\n  \
            x_[8] at 0 has size 64\n  \
            d_ at 64 has size 8";
        assert_eq!(REPORT.to_string(), expected);
    }
}
