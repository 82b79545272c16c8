//! Startup collaborators: connect with bounded retry, create tables, seed once.
//!
//! Retry lives only here. The request path never retries.

use crate::config::DatabaseSettings;
use crate::error::BootstrapError;
use crate::models::{NewCategory, NewProduct};
use crate::store::SeedStore;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Connect to PostgreSQL, retrying with a fixed delay. Exhausting the attempts
/// is fatal for the caller.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, BootstrapError> {
    let options = settings.connect_options()?;
    let attempts = settings.connect_attempts.max(1);
    let mut attempt = 1;
    loop {
        let result = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect_with(options.clone())
            .await;
        match result {
            Ok(pool) => {
                tracing::info!(attempt, "connected to catalog database");
                return Ok(pool);
            }
            Err(e) if attempt < attempts => {
                tracing::warn!(attempt, attempts, error = %e, "waiting for database");
                tokio::time::sleep(settings.connect_backoff).await;
                attempt += 1;
            }
            Err(source) => {
                return Err(BootstrapError::ConnectExhausted { attempts, source });
            }
        }
    }
}

/// Create the catalog tables if they do not exist.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), BootstrapError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id SERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            price NUMERIC(10, 2) NOT NULL DEFAULT 0 CHECK (price >= 0),
            category VARCHAR(100) NOT NULL DEFAULT '',
            brand VARCHAR(100) NOT NULL DEFAULT '',
            stock INT NOT NULL DEFAULT 0 CHECK (stock >= 0),
            image_url VARCHAR(500) NOT NULL DEFAULT '',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id SERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            slug VARCHAR(100) NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

pub const SEED_CATEGORIES: &[NewCategory<'static>] = &[
    NewCategory { name: "Electric Guitars", slug: "electric-guitars" },
    NewCategory { name: "Acoustic Guitars", slug: "acoustic-guitars" },
    NewCategory { name: "Bass Guitars", slug: "bass-guitars" },
    NewCategory { name: "Amplifiers", slug: "amplifiers" },
    NewCategory { name: "Effects Pedals", slug: "effects-pedals" },
    NewCategory { name: "Accessories", slug: "accessories" },
];

pub const SEED_PRODUCTS: &[NewProduct<'static>] = &[
    NewProduct {
        name: "Fender Stratocaster Player",
        description: "Classic American electric with three single-coil pickups.",
        price: 749.99,
        category: "Electric Guitars",
        brand: "Fender",
        stock: 15,
        image_url: "/images/fender-strat.svg",
    },
    NewProduct {
        name: "Gibson Les Paul Standard",
        description: "Iconic mahogany body with maple top and humbuckers.",
        price: 2499.00,
        category: "Electric Guitars",
        brand: "Gibson",
        stock: 8,
        image_url: "/images/gibson-les-paul.svg",
    },
    NewProduct {
        name: "Taylor 214ce Grand Auditorium",
        description: "Versatile acoustic-electric with rosewood back.",
        price: 1199.00,
        category: "Acoustic Guitars",
        brand: "Taylor",
        stock: 12,
        image_url: "/images/taylor-214ce.svg",
    },
    NewProduct {
        name: "Martin D-28 Dreadnought",
        description: "The benchmark acoustic with Sitka spruce top.",
        price: 3099.00,
        category: "Acoustic Guitars",
        brand: "Martin",
        stock: 5,
        image_url: "/images/martin-d28.svg",
    },
    NewProduct {
        name: "Fender Precision Bass",
        description: "The bass guitar that started it all.",
        price: 849.99,
        category: "Bass Guitars",
        brand: "Fender",
        stock: 10,
        image_url: "/images/fender-pbass.svg",
    },
    NewProduct {
        name: "Fender Blues Junior IV",
        description: "15-watt all-tube combo amp.",
        price: 599.99,
        category: "Amplifiers",
        brand: "Fender",
        stock: 20,
        image_url: "/images/blues-junior.svg",
    },
    NewProduct {
        name: "Boss DS-1 Distortion Pedal",
        description: "World's best-selling distortion pedal since 1978.",
        price: 59.99,
        category: "Effects Pedals",
        brand: "Boss",
        stock: 50,
        image_url: "/images/boss-ds1.svg",
    },
    NewProduct {
        name: "Ernie Ball Regular Slinky",
        description: "The most popular electric guitar strings.",
        price: 6.99,
        category: "Accessories",
        brand: "Ernie Ball",
        stock: 200,
        image_url: "/images/ernie-ball.svg",
    },
    NewProduct {
        name: "Dunlop Tortex Pick Pack",
        description: "Industry-standard picks in multiple gauges.",
        price: 4.99,
        category: "Accessories",
        brand: "Dunlop",
        stock: 300,
        image_url: "/images/dunlop-picks.svg",
    },
    NewProduct {
        name: "Ibanez RG550 Genesis",
        description: "High-performance Japanese electric with edge tremolo.",
        price: 999.99,
        category: "Electric Guitars",
        brand: "Ibanez",
        stock: 7,
        image_url: "/images/ibanez-rg550.svg",
    },
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub categories_inserted: usize,
    pub products_inserted: usize,
}

/// Insert the static seed rows into each empty table. Tables that already hold
/// rows are left alone, so running this twice changes nothing. Each table is
/// filled in one batch, so a failed seed leaves it empty for the next start.
pub async fn seed(store: &dyn SeedStore) -> Result<SeedReport, BootstrapError> {
    let mut report = SeedReport::default();

    if store.count_categories().await? == 0 {
        report.categories_inserted = store.insert_categories(SEED_CATEGORIES).await?;
        tracing::info!(count = report.categories_inserted, "categories seeded");
    }

    if store.count_products().await? == 0 {
        report.products_inserted = store.insert_products(SEED_PRODUCTS).await?;
        tracing::info!(count = report.products_inserted, "products seeded");
    }

    Ok(report)
}
