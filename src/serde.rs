use crate::{Align, Alignment, CloneRow, Column, WithRef};
use serde::ser::{Serialize, SerializeSeq, SerializeTuple, Serializer};

impl<T, const N: usize, const A: usize> Serialize for Column<T, N, A>
where
    T: Serialize,
    Align<A>: Alignment,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tuple = serializer.serialize_tuple(N)?;
        for el in self.iter() {
            tuple.serialize_element(el)?;
        }
        tuple.end()
    }
}

/// Serializes a row view as its row value, scalars included.
///
/// ```
/// use soa_fixed::{SerializeRow, SoaArray};
///
/// #[derive(SoaArray, serde::Serialize)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let points = PointArray::<2>::from_fn(|i| Point { x: i as i32, y: 7 });
/// let json = serde_json::to_string(&SerializeRow(&points.row(1))).unwrap();
/// assert_eq!(json, r#"{"x":1,"y":7}"#);
/// ```
pub struct SerializeRow<'a, R: ?Sized>(pub &'a R);

impl<R: ?Sized> Clone for SerializeRow<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: ?Sized> Copy for SerializeRow<'_, R> {}

impl<R> Serialize for SerializeRow<'_, R>
where
    R: WithRef + ?Sized,
    R::Item: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.with_ref(|item| item.serialize(serializer))
    }
}

/// Serializes a container as a sequence of its rows.
///
/// Each row is cloned out of the container while it is written.
#[derive(Debug)]
pub struct SerializeRows<'a, S>(pub &'a S);

impl<S> Clone for SerializeRows<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for SerializeRows<'_, S> {}

impl<T> Serialize for SerializeRows<'_, T>
where
    T: CloneRow,
    T::Item: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(T::ROWS))?;
        for index in 0..T::ROWS {
            seq.serialize_element(&self.0.clone_row(index))?;
        }
        seq.end()
    }
}
