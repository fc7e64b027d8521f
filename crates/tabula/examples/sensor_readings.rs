//! Sensor Readings Example
//!
//! Demonstrates:
//! - Writing readings into a table
//! - Reading them back, including a key that was never written
//! - Accumulating several readings under one key
//! - A "last updated" timestamp field
//!
//! Run with: cargo run --example sensor_readings [-- <path to store file>]

use anyhow::Context;
use tabula::prelude::*;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let temp_dir = tempfile::tempdir()?;
    let path = match std::env::args().nth(1) {
        Some(p) => std::path::PathBuf::from(p),
        None => temp_dir.path().join("pidata.db"),
    };

    let store = LmdbTableStore::open(&path)
        .with_context(|| format!("Failed to open store at {}", path.display()))?;

    // ========================================
    // 1. Write some readings
    // ========================================
    let readings: [(&str, &str); 2] = [
        ("PME.Engine Speed", "200.24"),
        ("SME.Engine Speed", "34480.098"),
    ];
    for (key, value) in readings {
        println!("Setting: {} <- {}", key, value);
        store.replace("data", key.as_bytes(), value.as_bytes())?;
    }
    // Tables keep every value written; clear the old timestamp first
    store.delete("config", b"config-ts")?;
    store.set_timestamp("config", b"config-ts")?;

    // ========================================
    // 2. Read them back
    // ========================================
    println!("\nReading from keys...");
    let keys = ["PME.Engine Speed", "SME.Engine Speed", "CME.Engine Load"];
    for (idx, key) in keys.iter().enumerate() {
        match store.get("data", key.as_bytes()) {
            Ok(Some(value)) => {
                println!("  {:02}) '{}': {}", idx + 1, key, String::from_utf8_lossy(&value))
            }
            Ok(None) => println!("  {:02}) '{}': *** not found!", idx + 1, key),
            Err(e) => println!("  {:02}) '{}': error {}", idx + 1, key, e),
        }
    }

    // ========================================
    // 3. History under a single key
    // ========================================
    for value in ["199.80", "200.24", "201.05"] {
        store.set("history", b"PME.Engine Speed", value.as_bytes())?;
    }
    let history = store.get_all("history", b"PME.Engine Speed");
    println!("\nPME.Engine Speed history ({} values):", history.len());
    for value in &history {
        println!("  {}", String::from_utf8_lossy(value));
    }

    println!(
        "\nConfig last updated at Unix time {}",
        store.get_timestamp("config", b"config-ts")
    );

    Ok(())
}
