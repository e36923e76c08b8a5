//! tour — walks the column store and the keyed store through their public
//! operations and prints the arrays after each step.
//!
//! Set `RUST_LOG=debug` (or `trace`) to see the bulk-operation and
//! row-relocation events emitted by the library crates.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use soa_mapped::MappedSoa;
use soa_store::{SoaStore, SoaStoreBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Announces its own construction and destruction so the demo shows when the
/// store drops elements.
struct Tracked(i32);

impl Tracked {
    fn new(value: i32) -> Self {
        println!("  Tracked({value}) created");
        Self(value)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        println!("  Tracked({}) dropped", self.0);
    }
}

type Iis = SoaStore<(i32, String, i32)>;

fn print_iis(title: &str, store: &Iis) {
    println!("{title} (len {}, empty {}):", store.len(), store.is_empty());
    for (i, (a, s, b)) in store.iter().enumerate() {
        println!("  ({i}): {a}, {s:?}, {b}");
    }
    println!();
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== tour — Structure-of-Arrays store ===");
    println!();

    let mut iis: Iis = SoaStore::new();
    print_iis("Fresh store", &iis);

    iis.push((22, "Kitty".into(), 4));
    iis.push((0, "Hi".into(), 2));
    print_iis("After two pushes", &iis);

    iis.swap(0, 1)?;
    print_iis("Swapped rows 0 and 1", &iis);

    *iis.get_mut::<1>(0)? = "I am changed!".into();
    print_iis("Modified column 1 of row 0", &iis);

    iis.erase(0)?;
    print_iis("Erased row 0 (order kept)", &iis);

    iis.push((1, "Hi... for now...".into(), 5));
    iis.push((80, "I'll survive!".into(), 20));
    print_iis("Added two rows", &iis);

    iis.erase_range(0, 2)?;
    print_iis("Erased rows 0..2", &iis);

    iis.resize(0);
    print_iis("Resized to 0", &iis);

    iis.resize(5);
    *iis.get_mut::<1>(3)? = "Oh hai!".into();
    *iis.get_mut::<2>(3)? = 11;
    *iis.get_mut::<0>(3)? = 22;
    iis.push((100, "I'm new!".into(), 20));
    print_iis("Resized to 5, edited row 3, pushed one", &iis);

    println!("Columns printed individually:");
    let (ints0, strings, ints1) = (iis.array::<0>(), iis.array::<1>(), iis.array::<2>());
    for i in 0..iis.len() {
        println!("  index {i}: {}, {:?}, {}", ints0[i], strings[i], ints1[i]);
    }
    println!();

    if let Err(e) = iis.erase_range(4, 10) {
        info!(error = %e, "rejected malformed range");
    }

    println!("Store with a type that announces drops:");
    let mut tracked: SoaStore<(i32, String, Tracked)> = SoaStoreBuilder::new().capacity(4).build();
    tracked.push((4, "Hello!".into(), Tracked::new(7)));
    tracked.push((2, "World?".into(), Tracked::new(42)));
    println!("  popping the last row");
    tracked.pop();
    println!("  dropping the store");
    drop(tracked);
    println!();

    println!("=== tour — keyed store ===");
    println!();

    let mut ents: MappedSoa<&str, (i32, f32)> = MappedSoa::with_capacity(8);
    ents.add("a", (1, 0.5))?;
    ents.add("b", (2, 1.5))?;
    ents.add("c", (3, 2.5))?;
    println!("keys {:?}, ids {:?}", ents.keys(), ents.array::<0>());

    ents.remove("a");
    println!("removed \"a\" → keys {:?}, ids {:?}", ents.keys(), ents.array::<0>());
    println!("\"c\" now at index {}", ents.get_index("c")?);

    ents.set("b", (20, 9.0))?;
    ents.set("d", (4, 3.5))?;
    for (key, (id, weight)) in ents.iter() {
        println!("  {key}: id {id}, weight {weight}");
    }

    if let Err(e) = ents.add("d", (0, 0.0)) {
        info!(error = %e, "rejected duplicate key");
    }
    ents.check_invariants()?;

    Ok(())
}
