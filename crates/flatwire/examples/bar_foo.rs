//! Encodes a nested record, decodes it back and prints both traces.
//!
//! ```text
//! cargo run --example bar_foo [OUTPUT]
//! ```
//!
//! With `OUTPUT`, the encoded bytes are also written to that file.
//! Set `RUST_LOG=debug` to see the codec's own logging.

use std::fs;

use flatwire::{OneOf2, OneOf3, Trace, composite, from_bytes, to_bytes};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, Clone, PartialEq)]
struct Foo {
    name: String,
    id: u16,
    values: Vec<u8>,
}

composite!(Foo { name, id, values });

#[derive(Debug, Default, Clone, PartialEq)]
struct Bar {
    name: String,
    id: OneOf2<u8, String>,
    foo: Foo,
    values: Vec<OneOf3<Foo, u8, u16>>,
}

composite!(Bar { name, id, foo, values });

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect::<Vec<_>>().join(" ")
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let bar = Bar {
        name: "MrCool".to_string(),
        id: OneOf2::First(17),
        foo: Foo {
            name: "Single foo".to_string(),
            id: 12,
            values: vec![1, 2, 3],
        },
        values: vec![
            OneOf3::Second(2),
            OneOf3::Third(7),
            OneOf3::First(Foo {
                name: "Nested".to_string(),
                id: 500,
                values: vec![],
            }),
        ],
    };

    println!("=== Original ===");
    println!("{}", Trace(&bar));

    let bytes = to_bytes(&bar).expect("Failed to encode");
    println!("\n=== Encoded ({} bytes) ===", bytes.len());
    println!("{}", hex(&bytes));

    if let Some(path) = std::env::args().nth(1) {
        fs::write(&path, &bytes).expect("Failed to write file");
        println!("Wrote: {}", path);
    }

    let decoded: Bar = from_bytes(&bytes).expect("Failed to decode");
    println!("\n=== Decoded ===");
    println!("{}", Trace(&decoded));

    assert_eq!(bar, decoded);
    println!("\nRound-trip OK");
}
