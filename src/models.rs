//! Catalog records and the per-request listing filter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub brand: String,
    pub stock: i32,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

/// Insert shape used by the seeding bootstrap; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewProduct<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub price: f64,
    pub category: &'a str,
    pub brand: &'a str,
    pub stock: i32,
    pub image_url: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCategory<'a> {
    pub name: &'a str,
    pub slug: &'a str,
}

/// Optional narrowing of a product listing. Empty values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    category: Option<String>,
    search: Option<String>,
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}

impl ProductFilter {
    pub fn new(category: Option<String>, search: Option<String>) -> Self {
        Self {
            category: non_empty(category),
            search: non_empty(search),
        }
    }

    /// From decoded query-string pairs in request order. A repeated key keeps its
    /// first value; keys other than `category` and `search` are ignored.
    pub fn from_query(pairs: &[(String, String)]) -> Self {
        let first = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };
        Self::new(first("category"), first("search"))
    }

    /// Exact, case-sensitive category label.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Case-insensitive substring over name, description and brand.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.search.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_values_are_absent() {
        let f = ProductFilter::new(Some(String::new()), Some(String::new()));
        assert!(f.is_empty());
        assert_eq!(f.category(), None);
    }

    #[test]
    fn from_query_picks_known_keys() {
        let q = pairs(&[("category", "Amplifiers"), ("sort", "price")]);
        let f = ProductFilter::from_query(&q);
        assert_eq!(f.category(), Some("Amplifiers"));
        assert_eq!(f.search(), None);
    }

    #[test]
    fn from_query_keeps_first_of_repeated_key() {
        let q = pairs(&[
            ("category", "Amplifiers"),
            ("search", "junior"),
            ("category", "Bass Guitars"),
            ("search", "precision"),
        ]);
        let f = ProductFilter::from_query(&q);
        assert_eq!(f.category(), Some("Amplifiers"));
        assert_eq!(f.search(), Some("junior"));
    }

    #[test]
    fn product_serializes_snake_case_fields() {
        let p = Product {
            id: 1,
            name: "Fender Stratocaster Player".into(),
            description: "d".into(),
            price: 749.99,
            category: "Electric Guitars".into(),
            brand: "Fender".into(),
            stock: 15,
            image_url: "/images/fender-strat.svg".into(),
            created_at: DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z")
                .unwrap()
                .with_timezone(&Utc),
        };
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["image_url"], "/images/fender-strat.svg");
        assert_eq!(v["price"], 749.99);
        assert_eq!(v["created_at"], "2024-01-02T03:04:05Z");
    }
}
