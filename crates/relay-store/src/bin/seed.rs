//! # Seed Data Generator
//!
//! Populates a snapshot directory with demo inventory for development.
//!
//! ## Usage
//! ```bash
//! # Seed 60 products (default) into ./relay-data
//! cargo run -p relay-store --bin seed
//!
//! # Custom amount and directory
//! cargo run -p relay-store --bin seed -- --count 200 --dir ./demo-data
//! ```
//!
//! ## Generated Data
//! Realistic telecom hardware across categories:
//! - Routers and switches
//! - Optics (SFP/QSFP transceivers)
//! - Cabling (patch cables, fiber)
//! - Antennas and radio gear
//!
//! Each product gets an index-derived price, stock level and reorder
//! point, so a handful open below their reorder point and the alert
//! engine has something to do. Two suppliers and a few orders (one
//! already overdue) round out the data set.

use std::env;

use chrono::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use relay_core::TransactionKind;
use relay_store::{FileBlobStore, InventoryStore, NewOrder, NewProduct, NewSupplier, StoreConfig};

/// Product categories with representative names.
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Routers",
        &[
            "Edge Router 4-port",
            "Edge Router 8-port",
            "Core Router 24-port",
            "Branch Router Compact",
            "LTE Failover Router",
            "Aggregation Switch 48-port",
            "PoE Switch 16-port",
            "Managed Switch 8-port",
        ],
    ),
    (
        "Optics",
        &[
            "SFP 1G Transceiver",
            "SFP+ 10G Transceiver",
            "SFP28 25G Transceiver",
            "QSFP+ 40G Module",
            "QSFP28 100G Module",
            "BiDi SFP 1G Pair",
            "DWDM SFP+ Channel 31",
            "CWDM SFP 1550nm",
        ],
    ),
    (
        "Cabling",
        &[
            "CAT6 Patch Cable 2m",
            "CAT6 Patch Cable 5m",
            "CAT6A Patch Cable 10m",
            "LC-LC Fiber Jumper 3m",
            "LC-SC Fiber Jumper 5m",
            "MPO Trunk Cable 12f",
            "DAC Cable 10G 1m",
            "AOC Cable 25G 5m",
        ],
    ),
    (
        "Antennas",
        &[
            "Sector Antenna 120deg",
            "Omni Antenna 2.4GHz",
            "Dish Antenna 30dBi",
            "GPS Antenna Rooftop",
            "LTE Panel Antenna",
            "Yagi Antenna 900MHz",
        ],
    ),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let (dir, count) = parse_args();

    let config = StoreConfig {
        snapshot_dir: dir.clone().into(),
        ..StoreConfig::from_env()
    };
    let blobs = FileBlobStore::open(&config.snapshot_dir)?;
    let mut store = InventoryStore::open(config, Box::new(blobs))?;

    info!(dir = %dir, count, "Seeding inventory");

    // Suppliers first; orders reference them.
    let acme = store.add_supplier(NewSupplier {
        name: "Acme Telecom Supply".to_string(),
        contact_person: "Dana Reyes".to_string(),
    })?;
    let northwave = store.add_supplier(NewSupplier {
        name: "Northwave Components".to_string(),
        contact_person: "Lee Okafor".to_string(),
    })?;

    let mut generated = 0usize;
    'outer: loop {
        for (category, names) in CATEGORIES {
            for name in *names {
                if generated == count {
                    break 'outer;
                }
                let seed = generated;
                let suffix = seed / variant_space();
                let display = if suffix == 0 {
                    (*name).to_string()
                } else {
                    format!("{name} rev{suffix}")
                };

                let product = store.add_product(NewProduct {
                    name: display,
                    category: (*category).to_string(),
                    price_cents: 499 + ((seed * 137) % 150_000) as i64,
                    stock_level: ((seed * 7) % 60) as i64,
                    reorder_point: ((seed * 3) % 12) as i64,
                })?;

                // A little ledger history for every third product.
                if seed % 3 == 0 && product.stock_level >= 2 {
                    store.add_transaction(
                        &product.id,
                        TransactionKind::StockOut,
                        1 + (seed % 2) as i64,
                        "install job",
                        "seed",
                    )?;
                    store.add_transaction(
                        &product.id,
                        TransactionKind::StockIn,
                        (5 + seed % 10) as i64,
                        "restock",
                        "seed",
                    )?;
                }

                generated += 1;
            }
        }
    }

    // A pending order due next week, and one already overdue.
    let now = chrono::Utc::now();
    store.add_order(NewOrder {
        supplier_id: acme.id.clone(),
        expected_date: now + Duration::days(7),
    })?;
    store.add_order(NewOrder {
        supplier_id: northwave.id.clone(),
        expected_date: now - Duration::days(3),
    })?;

    info!(
        products = store.list_products().len(),
        transactions = store.list_transactions().len(),
        low_stock = store.get_low_stock_products().len(),
        alerts = store.list_notifications().len(),
        overdue_orders = store.get_overdue_orders().len(),
        "Seed complete"
    );

    Ok(())
}

/// Total distinct base names across all categories.
fn variant_space() -> usize {
    CATEGORIES.iter().map(|(_, names)| names.len()).sum()
}

/// Hand-rolled flag parsing: `--dir <path>` and `--count <n>`.
fn parse_args() -> (String, usize) {
    let mut dir = "./relay-data".to_string();
    let mut count = 60usize;

    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--dir" if i + 1 < args.len() => {
                dir = args[i + 1].clone();
                i += 2;
            }
            "--count" if i + 1 < args.len() => {
                count = args[i + 1].parse().unwrap_or(60);
                i += 2;
            }
            _ => i += 1,
        }
    }

    (dir, count)
}
