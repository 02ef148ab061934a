//! # Seed Data Generator
//!
//! Populates an in-memory ledger with demo accounts, products and bundles,
//! prices a few orders, and optionally writes the resulting snapshot.
//!
//! ## Usage
//! ```bash
//! # Run the demo with default config
//! cargo run -p ledger-store --bin seed
//!
//! # Use a specific config file and save the snapshot
//! cargo run -p ledger-store --bin seed -- --config ./ledger.toml --out ./ledger.json
//! ```

use std::env;
use std::path::PathBuf;

use ledger_core::{AccountTier, Money, Order, Product, ProductKind};
use ledger_store::telemetry::init_logging;
use ledger_store::{LedgerConfig, Shop, Store, StoreError};

/// Demo accounts: name, tier, opening deposit.
const ACCOUNTS: &[(&str, &str, f64)] = &[
    ("Dimas", "premium", 100.0),
    ("Pavel_007", "normal", 250.0),
    ("Olga", "premium", 15.0),
];

/// Demo catalog: name, price, kind.
const PRODUCTS: &[(&str, f64, &str)] = &[
    ("banana", 40.0, "normal"),
    ("apple", 30.0, "premium"),
    ("kiwi", 12.5, "normal"),
    ("mango", 55.0, "premium"),
    ("sapre", 0.0, "sample"),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut out_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--out" | "-o" => {
                if i + 1 < args.len() {
                    out_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Shop Ledger Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>  Config file (default: platform config dir)");
                println!("  -o, --out <PATH>     Write the final snapshot as JSON");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let config = LedgerConfig::load_or_default(config_path);
    init_logging(&config.logging.filter);

    println!("🌱 Shop Ledger Seed Data Generator");
    println!("==================================");
    println!("Default tier: {}", config.accounts.default_tier);
    println!();

    let mut store = Store::with_config(&config);
    seed(&mut store)?;
    println!("✓ Seeded {} accounts, {} products", ACCOUNTS.len(), PRODUCTS.len());

    run_orders(&mut store)?;

    if let Some(path) = out_path {
        let bytes = store.export_state()?;
        std::fs::write(&path, bytes)?;
        println!("✓ Snapshot written to {}", path.display());
    }

    println!();
    println!("✓ Seed complete!");
    Ok(())
}

fn seed(shop: &mut dyn Shop) -> Result<(), StoreError> {
    for (name, tier, deposit) in ACCOUNTS {
        shop.register_account(name)?;
        shop.set_account_tier(name, tier.parse::<AccountTier>()?)?;
        shop.deposit_balance(name, Money::from_major(*deposit))?;
    }

    for (name, price, kind) in PRODUCTS {
        let kind: ProductKind = kind.parse()?;
        shop.add_product(Product::new(*name, Money::from_major(*price), kind))?;
    }

    shop.add_bundle("fruit-pair", product("banana")?, 10.0, vec![product("apple")?])?;
    shop.add_bundle("taster", product("mango")?, 50.0, vec![product("sapre")?])?;
    Ok(())
}

fn run_orders(store: &mut Store) -> Result<(), StoreError> {
    let fruit = Order::default()
        .with_product(product("banana")?)
        .with_product(product("apple")?);

    let with_sample = fruit.clone().with_product(product("sapre")?);

    let bundled = Order::default()
        .with_bundle(bundle(store, "fruit-pair")?)
        .with_product(product("kiwi")?);

    println!();
    println!("Pricing orders...");
    let priced = [
        ("fruit", &fruit),
        ("fruit + sample", &with_sample),
        ("bundle + kiwi", &bundled),
    ];
    for (label, order) in priced {
        let quote = store.calculate_order("Dimas", order)?;
        println!(
            "  {:<16} {:>8}{}",
            label,
            quote.total.to_string(),
            if quote.from_cache { "  (cached)" } else { "" }
        );
        for diagnostic in &quote.diagnostics {
            println!("    ⚠ {}", diagnostic);
        }
    }

    println!();
    println!("Placing orders...");
    for (account, order) in [("Dimas", &fruit), ("Olga", &fruit), ("Pavel_007", &bundled)] {
        match store.place_order(account, order) {
            Ok(placement) => println!(
                "  ✓ {:<10} paid {:>8}, balance {:>8}",
                account,
                placement.total.to_string(),
                placement.balance.to_string()
            ),
            Err(StoreError::InsufficientBalance {
                required, available, ..
            }) => println!(
                "  ⚠ {:<10} needs {:>8}, has {:>8}",
                account,
                required.to_string(),
                available.to_string()
            ),
            Err(e) => return Err(e),
        }
    }

    println!();
    println!("Cached order shapes: {}", store.cached_order_count());
    Ok(())
}

fn product(name: &str) -> Result<Product, StoreError> {
    let (name, price, kind) = PRODUCTS
        .iter()
        .find(|(n, _, _)| *n == name)
        .ok_or_else(|| StoreError::not_found("product", name))?;
    Ok(Product::new(*name, Money::from_major(*price), kind.parse()?))
}

fn bundle(store: &Store, name: &str) -> Result<ledger_core::Bundle, StoreError> {
    store
        .bundle(name)
        .cloned()
        .ok_or_else(|| StoreError::not_found("bundle", name))
}
