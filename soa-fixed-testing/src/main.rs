//! Prints the memory layout of a few containers built from one row type.
//!
//! Set `RUST_LOG=debug` to also list every row of the sample container.

use soa_fixed::{SoaArray, SoaRefMut, WithRef};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(SoaArray, Debug, Clone, PartialEq)]
#[soa_derive(Debug, PartialEq)]
struct Entity {
    x: f64,
    y: f64,
    colour: u16,
    name: String,
    #[soa(scalar)]
    description: String,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn dump<S: SoaArray>() {
    let layout = S::layout();
    tracing::info!(
        container = layout.name,
        rows = layout.rows,
        alignment = layout.alignment,
        extent = layout.extent,
        padding = layout.padding(),
        "layout"
    );
    for field in layout.fields {
        tracing::debug!(
            field = field.name,
            kind = ?field.kind,
            offset = field.offset,
            size = field.size,
            align = field.align,
            "field"
        );
    }
    println!("{layout}");
}

fn main() {
    init_tracing();

    dump::<EntityArray<10>>();
    dump::<EntityArray<31, 64>>();
    dump::<EntityArray<32, 64>>();

    let mut entities = EntityArray::<10>::from_fn(|i| Entity {
        x: i as f64,
        y: 0.0,
        colour: 0,
        name: format!("entity {i}"),
        description: String::new(),
    });
    entities.set_description("sample entities".to_owned());
    entities.row_mut(7).set(Entity {
        x: 0.0,
        y: 3.1416,
        colour: 42,
        name: "element".to_owned(),
        description: String::new(),
    });
    entities.copy_row(7, 9);

    for row in &entities {
        tracing::debug!(index = row.index(), row = ?row, "row");
    }
    let snapshot = entities.row(9).snapshot();
    tracing::info!(?snapshot, "copied row 7 into row 9");
}
