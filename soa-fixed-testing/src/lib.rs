#![cfg(test)]

use rand::{Rng, SeedableRng, rngs::StdRng};
use soa_fixed::{
    CloneRow, Column, FieldKind, SerializeRow, SerializeRows, SoaArray, SoaRefMut, WithRef,
};
use std::{
    cell::{Cell, RefCell},
    collections::HashSet,
    mem::{align_of, size_of},
    ptr,
};

#[derive(SoaArray, Debug, Clone, PartialEq)]
#[soa_derive(Debug, PartialEq)]
struct Entity {
    x: f64,
    y: f64,
    colour: u16,
    name: String,
}

#[derive(SoaArray, Debug, Clone, PartialEq)]
#[soa_derive(Debug, PartialEq)]
struct Described {
    x: f64,
    y: f64,
    colour: u16,
    name: String,
    #[soa(scalar)]
    description: String,
}

fn entity(i: usize) -> Entity {
    Entity {
        x: i as f64,
        y: i as f64 * 0.5,
        colour: i as u16,
        name: format!("entity {i}"),
    }
}

fn described(i: usize) -> Described {
    Described {
        x: i as f64,
        y: -(i as f64),
        colour: 7,
        name: format!("row {i}"),
        description: format!("description {i}"),
    }
}

fn element() -> Entity {
    Entity {
        x: 0.0,
        y: 3.1416,
        colour: 42,
        name: "element".to_owned(),
    }
}

const fn round_up(value: usize, align: usize) -> usize {
    value.div_ceil(align) * align
}

/// Checks the layout of a container against the placement rules for columns
/// and scalars.
fn check_layout<S: SoaArray>() {
    let layout = S::layout();
    assert_eq!(layout.extent, size_of::<S>());
    assert_eq!(layout.type_align, align_of::<S>());
    assert_eq!(
        layout.extent,
        layout.fields.iter().map(|f| f.size).sum::<usize>() + layout.padding()
    );

    for field in layout.fields {
        assert_eq!(field.offset % field.align, 0, "{} is misaligned", field.name);
        assert!(field.end() <= layout.extent);
        match field.kind {
            FieldKind::Column => {
                assert!(field.align >= S::ALIGN);
                assert_eq!(field.size, round_up(S::ROWS * field.elem_size, field.align));
            }
            FieldKind::Scalar => assert_eq!(field.size, field.elem_size),
        }
    }

    for (i, a) in layout.fields.iter().enumerate() {
        for b in &layout.fields[i + 1..] {
            assert!(!a.overlaps(b), "{} overlaps {}", a.name, b.name);
            assert!(a.end() <= b.offset, "fields are not in declaration order");
        }
    }
}

#[test]
fn scenario_a_row_writes_reach_columns() {
    let mut entities = EntityArray::<10>::from_fn(entity);
    entities.row_mut(7).set(element());

    let row = entities.row(7);
    assert_eq!(*row.x(), 0.0);
    assert_eq!(*row.y(), 3.1416);
    assert_eq!(*row.colour(), 42);
    assert_eq!(row.name(), "element");
    assert!(ptr::eq(&entities.x()[7], row.x()));
    assert!(ptr::eq(&entities.name()[7], row.name()));
}

#[test]
fn scenario_b_copy_row() {
    let mut entities = EntityArray::<10>::from_fn(entity);
    entities.set_row(7, element());
    let before = entities.row(7).snapshot();

    entities.copy_row(7, 9);

    let row = entities.row(9);
    assert_eq!(*row.x(), before.x);
    assert_eq!(*row.y(), before.y);
    assert_eq!(*row.colour(), before.colour);
    assert_eq!(*row.name(), before.name);
    assert_eq!(row, before);
    assert_eq!(entities.row(7), before);
}

#[test]
fn scenario_b_assign_across_containers() {
    let source = EntityArray::<3, 16>::from_fn(|_| element());
    let mut entities = EntityArray::<10>::from_fn(entity);
    entities.row_mut(9).assign(&source.row(2));
    assert_eq!(entities.row(9), element());
    assert_eq!(entities.row(8), entity(8));
}

#[test]
fn scenario_c_scalar_is_shared() {
    let mut soa = DescribedArray::<10>::from_fn(described);
    assert_eq!(soa.description(), "description 0");

    soa.set_description("shared".to_owned());
    for row in soa.iter() {
        assert_eq!(row.description(), "shared");
        assert!(ptr::eq(row.description(), soa.description()));
    }

    soa.copy_row(3, 4);
    assert_eq!(soa.description(), "shared");
    assert_eq!(*soa.row(4).x(), 3.0);

    soa.set_row(5, described(8));
    assert_eq!(soa.description(), "shared");
    assert_eq!(soa.row(5).name(), "row 8");
}

#[test]
fn scenario_c_scalar_through_mutable_view() {
    let mut soa = DescribedArray::<4>::from_fn(described);
    soa.row_mut(2).description_mut().push_str(" (edited)");
    assert_eq!(soa.row(0).description(), "description 0 (edited)");
}

#[test]
fn scenario_d_alignment_padding() {
    let a = EntityArray::<31, 64>::from_fn(entity);
    let b = EntityArray::<32, 64>::from_fn(entity);

    for addr in [
        a.x().as_ptr().addr(),
        a.y().as_ptr().addr(),
        a.colour().as_ptr().addr(),
        a.name().as_ptr().addr(),
        b.x().as_ptr().addr(),
        b.y().as_ptr().addr(),
        b.colour().as_ptr().addr(),
        b.name().as_ptr().addr(),
    ] {
        assert_eq!(addr % 64, 0);
    }

    let row_size = size_of::<f64>() * 2 + size_of::<u16>() + size_of::<String>();
    assert_ne!(EntityArray::<32, 64>::extent(), EntityArray::<31, 64>::extent() + row_size);
}

#[cfg(target_pointer_width = "64")]
#[test]
fn scenario_d_exact_byte_counts() {
    type Short = EntityArray<31, 64>;
    type Long = EntityArray<32, 64>;

    for (name, offset, size) in [("x", 0, 256), ("y", 256, 256), ("colour", 512, 64), ("name", 576, 768)] {
        assert_eq!(Short::offset_of(name), Some(offset));
        assert_eq!(Long::offset_of(name), Some(offset));
        assert_eq!(Short::field(name).map(|f| f.size), Some(size));
        assert_eq!(Long::field(name).map(|f| f.size), Some(size));
    }
    assert_eq!(Short::EXTENT, 1344);
    assert_eq!(Long::EXTENT, 1344);

    assert_eq!(DescribedArray::<32, 64>::offset_of("description"), Some(1344));
    assert_eq!(DescribedArray::<32, 64>::EXTENT, 1408);
}

#[cfg(target_pointer_width = "64")]
#[test]
fn layout_report_display() {
    let expected = "DescribedArray<10, 0>:
  sizeof(...): 448
  alignof(...): 8
  x_[10] at 0 has size 80
  y_[10] at 80 has size 80
  colour_[10] at 160 has size 20
  name_[10] at 184 has size 240
  description_ at 424 has size 24";
    assert_eq!(DescribedArray::<10>::layout().to_string(), expected);
}

#[test]
fn layout_rules() {
    check_layout::<EntityArray<1>>();
    check_layout::<EntityArray<10>>();
    check_layout::<EntityArray<31, 64>>();
    check_layout::<EntityArray<32, 64>>();
    check_layout::<EntityArray<3, 4096>>();
    check_layout::<DescribedArray<10>>();
    check_layout::<DescribedArray<17, 32>>();
}

#[test]
fn same_fields_for_every_size() {
    let names = |fields: &[soa_fixed::FieldInfo]| fields.iter().map(|f| f.name).collect::<Vec<_>>();
    assert_eq!(names(EntityArray::<1>::FIELDS), ["x", "y", "colour", "name"]);
    assert_eq!(names(EntityArray::<1>::FIELDS), names(EntityArray::<100, 128>::FIELDS));
}

#[test]
fn row_column_identity() {
    let soa = DescribedArray::<16, 32>::from_fn(described);
    for i in 0..16 {
        let row = soa.row(i);
        assert!(ptr::eq(row.x(), &soa.x()[i]));
        assert!(ptr::eq(row.y(), &soa.y()[i]));
        assert!(ptr::eq(row.colour(), &soa.colour()[i]));
        assert!(ptr::eq(row.name(), &soa.name()[i]));
        assert!(ptr::eq(row.description(), soa.description()));
    }
}

#[test]
fn snapshot_independence() {
    let mut soa = DescribedArray::<4>::from_fn(described);
    let snapshot = soa.row(1).snapshot();

    {
        let mut row = soa.row_mut(1);
        *row.x_mut() = 100.0;
        row.name_mut().push_str(" changed");
        row.description_mut().clear();
    }

    assert_eq!(snapshot.x, 1.0);
    assert_eq!(snapshot.name, "row 1");
    assert_eq!(snapshot.description, "description 0");
    assert_eq!(*soa.row(1).x(), 100.0);
}

#[test]
fn iterator_distance_law() {
    const N: usize = 25;
    let soa = EntityArray::<N>::from_fn(entity);
    let mut rng = StdRng::seed_from_u64(42);

    let begin = soa.begin();
    let end = soa.end();
    assert_eq!(end - begin, N as isize);
    assert_eq!(begin - end, -(N as isize));

    for _ in 0..200 {
        let start = rng.random_range(0..=N);
        let k = rng.random_range(0..=N - start) as isize;
        let it = soa.cursor(start);
        assert_eq!((it + k) - it, k);
        assert_eq!((it + k) - k, it);

        let back = rng.random_range(0..=start) as isize;
        assert_eq!((it - back) - it, -back);
    }
}

#[test]
fn cursor_ordering_and_dereference() {
    let soa = EntityArray::<5>::from_fn(entity);
    let mut cursor = soa.begin();
    cursor += 2;
    assert_eq!(cursor.index(), 2);
    assert_eq!(*cursor.row().x(), 2.0);
    assert!(soa.begin() < cursor && cursor < soa.end());

    cursor -= 1;
    assert_eq!(cursor, soa.cursor(1));
    assert!(cursor.checked_offset(-2).is_none());
    assert!(cursor.checked_offset(4).is_some_and(|c| c.is_end()));

    let end = soa.end();
    assert!(end.is_end());
    assert!(end.get().is_none());
    assert_eq!(end.try_row().unwrap_err().index, 5);
}

#[test]
fn cursors_of_different_containers() {
    let a = EntityArray::<3>::from_fn(entity);
    let b = EntityArray::<3>::from_fn(entity);
    assert_ne!(a.begin(), b.begin());
    assert_ne!(a.begin().cmp(&b.begin()), std::cmp::Ordering::Equal);
    assert_eq!(a.begin().offset_from(&a.end()), -3);
}

#[test]
#[should_panic(expected = "cursors belong to different containers")]
fn distance_across_containers_panics() {
    let a = EntityArray::<3>::from_fn(entity);
    let b = EntityArray::<3>::from_fn(entity);
    let _ = a.end() - b.begin();
}

#[test]
#[should_panic(expected = "cursor moved out of bounds")]
fn cursor_before_begin_panics() {
    let soa = EntityArray::<3>::from_fn(entity);
    let _ = soa.begin() - 1;
}

#[test]
#[should_panic(expected = "cursor moved out of bounds")]
fn cursor_past_end_panics() {
    let soa = EntityArray::<3>::from_fn(entity);
    let _ = soa.end() + 1;
}

#[test]
fn cursor_mut_traversal() {
    let mut soa = DescribedArray::<6>::from_fn(described);
    let mut cursor = soa.begin_mut();
    while !cursor.is_end() {
        let mut row = cursor.row_mut();
        *row.colour_mut() = row.index() as u16 * 2;
        cursor += 1;
    }
    assert_eq!(soa.colour(), &[0, 2, 4, 6, 8, 10]);

    let mut cursor = soa.cursor_mut(5);
    assert!(!cursor.try_offset(2));
    assert!(cursor.try_offset(-5));
    cursor.into_row_mut().set(described(9));
    assert_eq!(*soa.row(0).x(), 9.0);
}

#[test]
fn iterator_protocol() {
    let soa = EntityArray::<6>::from_fn(entity);
    let mut iter = soa.iter();
    assert_eq!(iter.len(), 6);
    assert_eq!(iter.next().map(|row| row.index()), Some(0));
    assert_eq!(iter.next_back().map(|row| row.index()), Some(5));
    assert_eq!(iter.nth(1).map(|row| row.index()), Some(2));
    assert_eq!(iter.len(), 2);
    assert_eq!(iter.clone().count(), 2);
    assert_eq!(iter.last().map(|row| row.index()), Some(4));

    let reversed: Vec<_> = soa.iter().rev().map(|row| *row.colour()).collect();
    assert_eq!(reversed, [5, 4, 3, 2, 1, 0]);

    let mut exhausted = soa.iter();
    assert!(exhausted.nth(10).is_none());
    assert!(exhausted.next().is_none());
}

#[derive(SoaArray, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[soa_derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Key {
    major: u8,
    minor: u8,
}

#[test]
fn forwarded_view_traits() {
    let soa = KeyArray::<5>::from_rows([
        Key { major: 2, minor: 0 },
        Key { major: 1, minor: 1 },
        Key { major: 2, minor: 0 },
        Key { major: 0, minor: 9 },
        Key { major: 1, minor: 1 },
    ]);

    let unique: HashSet<_> = soa.iter().collect();
    assert_eq!(unique.len(), 3);

    let mut sorted: Vec<_> = soa.iter().collect();
    sorted.sort();
    let sorted: Vec<_> = sorted.iter().map(|row| row.copied()).collect();
    assert_eq!(sorted[0], Key { major: 0, minor: 9 });
    assert_eq!(sorted[4], Key { major: 2, minor: 0 });

    assert!(soa.row(1) < soa.row(0));
    assert_eq!(format!("{:?}", soa.row(3)), "Key { major: 0, minor: 9 }");
}

thread_local! {
    static DROPS: Cell<usize> = const { Cell::new(0) };
}

fn drops() -> usize {
    DROPS.with(Cell::get)
}

#[derive(Debug, Clone, PartialEq)]
struct Counted(u32);

impl Drop for Counted {
    fn drop(&mut self) {
        DROPS.with(|drops| drops.set(drops.get() + 1));
    }
}

#[derive(SoaArray)]
struct Tracked {
    value: Counted,
    #[soa(scalar)]
    tag: Counted,
}

#[test]
fn every_value_dropped_once() {
    let start = drops();
    let mut soa = TrackedArray::<4>::from_fn(|i| Tracked {
        value: Counted(i as u32),
        tag: Counted(100 + i as u32),
    });
    assert_eq!(drops() - start, 3);
    assert_eq!(soa.tag().0, 100);

    soa.set_row(1, Tracked {
        value: Counted(7),
        tag: Counted(8),
    });
    assert_eq!(drops() - start, 5);

    // The lent row is a clone, dropped once the closure returns
    soa.row(2).with_ref(|row| assert_eq!(row.value.0, 2));
    assert_eq!(drops() - start, 7);

    let row = soa.clone_row(3);
    assert_eq!((row.value.0, row.tag.0), (3, 100));
    drop(row);
    assert_eq!(drops() - start, 9);

    drop(soa);
    assert_eq!(drops() - start, 14);
}

#[derive(SoaArray, Clone)]
struct Holder {
    id: u32,
    slot: RefCell<Option<Box<u64>>>,
}

#[test]
fn lent_rows_do_not_alias_the_container() {
    let mut soa = HolderArray::<2>::from_fn(|i| Holder {
        id: i as u32,
        slot: RefCell::new(Some(Box::new(40 + i as u64))),
    });

    let taken = soa.row(1).with_ref(|holder| holder.slot.take());
    assert_eq!(taken.as_deref(), Some(&41));
    assert_eq!(soa.row(1).slot().borrow().as_deref(), Some(&41));

    let snapshot = soa.row(0).snapshot();
    *soa.row_mut(0).slot_mut().get_mut() = None;
    assert_eq!(snapshot.slot.borrow().as_deref(), Some(&40));
    assert_eq!(snapshot.id, 0);
    assert!(soa.row(0).slot().borrow().is_none());
}

mod generic_parameter_names {
    use soa_fixed::SoaArray;

    #[derive(Debug, PartialEq)]
    pub struct A(pub u8);

    const N: usize = 3;

    #[derive(SoaArray)]
    struct Tagged {
        tag: A,
        window: [u8; N],
        v: u32,
    }

    #[test]
    fn field_types_keep_their_meaning() {
        let soa = TaggedArray::<4, 16>::from_fn(|i| Tagged {
            tag: A(i as u8),
            window: [i as u8; N],
            v: 10 * i as u32,
        });
        assert_eq!(soa.tag()[2], A(2));
        assert_eq!(soa.window()[3], [3; N]);
        assert_eq!(*soa.row(1).v(), 10);
        assert_eq!(TaggedArray::<4, 16>::offset_of("tag"), Some(0));
        assert_eq!(TaggedArray::<4, 16>::offset_of("window"), Some(16));
    }
}

#[derive(SoaArray, Debug, Clone, PartialEq, serde::Serialize)]
#[soa_derive(serde::Serialize, include(Array))]
struct Point {
    x: i32,
    y: i32,
    #[soa(scalar)]
    frame: u8,
}

#[test]
fn serialize_rows() {
    let points = PointArray::<3>::from_fn(|i| Point {
        x: i as i32,
        y: -(i as i32),
        frame: 1,
    });
    let json = serde_json::to_string(&SerializeRows(&points)).unwrap();
    assert_eq!(
        json,
        r#"[{"x":0,"y":0,"frame":1},{"x":1,"y":-1,"frame":1},{"x":2,"y":-2,"frame":1}]"#
    );

    let row = serde_json::to_value(SerializeRow(&points.row(2))).unwrap();
    assert_eq!(row, serde_json::json!({ "x": 2, "y": -2, "frame": 1 }));
}

#[test]
fn serialize_columns() {
    let points = PointArray::<3, 16>::from_fn(|i| Point {
        x: i as i32,
        y: 10 * i as i32,
        frame: 4,
    });
    let json = serde_json::to_string(&points).unwrap();
    assert_eq!(json, r#"{"x":[0,1,2],"y":[0,10,20],"frame":4}"#);

    let column = Column::<u16, 2>::from_array([3, 4]);
    assert_eq!(serde_json::to_string(&column).unwrap(), "[3,4]");
}
