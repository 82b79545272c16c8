//! Builds parameterized SELECTs for the catalog tables.
//!
//! Identifiers and clause structure are fixed here; request values only ever
//! reach the database as bound parameters.

use super::params::BindValue;
use crate::models::ProductFilter;

/// Hard upper bound on a product listing. Not a page size; there is no cursor.
pub const PRODUCT_LIST_CAP: u32 = 50;

/// `price` is NUMERIC in the table and read back as float8.
const PRODUCT_COLUMNS: &str =
    "id, name, description, price::float8 AS price, category, brand, stock, image_url, created_at";

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: BindValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// `%term%` with LIKE metacharacters escaped, so the term matches literally.
/// Backslash is the default LIKE escape character in PostgreSQL.
pub fn contains_pattern(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 2);
    out.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

/// Product listing: optional category equality, optional substring search over
/// name/description/brand, ORDER BY id, LIMIT [`PRODUCT_LIST_CAP`].
pub fn select_products(filter: &ProductFilter) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_parts = Vec::new();

    if let Some(category) = filter.category() {
        let n = q.push_param(BindValue::Text(category.to_string()));
        where_parts.push(format!("category = ${}", n));
    }
    if let Some(term) = filter.search() {
        let n = q.push_param(BindValue::Text(contains_pattern(term)));
        where_parts.push(format!(
            "(name ILIKE ${n} OR description ILIKE ${n} OR brand ILIKE ${n})",
            n = n
        ));
    }

    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    q.sql = format!(
        "SELECT {} FROM products{} ORDER BY id LIMIT {}",
        PRODUCT_COLUMNS, where_clause, PRODUCT_LIST_CAP
    );
    q
}

pub fn select_product_by_id(id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(BindValue::Int(id));
    q.sql = format!("SELECT {} FROM products WHERE id = ${}", PRODUCT_COLUMNS, n);
    q
}

/// Unfiltered and uncapped; the categories table is small by construction.
pub fn select_categories() -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = "SELECT id, name, slug FROM categories ORDER BY id".to_string();
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(category: Option<&str>, search: Option<&str>) -> ProductFilter {
        ProductFilter::new(category.map(String::from), search.map(String::from))
    }

    #[test]
    fn unfiltered_listing_is_capped() {
        let q = select_products(&ProductFilter::default());
        assert_eq!(
            q.sql,
            format!("SELECT {} FROM products ORDER BY id LIMIT 50", PRODUCT_COLUMNS)
        );
        assert!(q.params.is_empty());
    }

    #[test]
    fn category_filter_is_bound() {
        let q = select_products(&filter(Some("Amplifiers"), None));
        assert!(q.sql.contains(" WHERE category = $1 ORDER BY id LIMIT 50"));
        assert_eq!(q.params, vec![BindValue::Text("Amplifiers".into())]);
    }

    #[test]
    fn search_uses_one_param_for_three_columns() {
        let q = select_products(&filter(None, Some("strat")));
        assert!(q
            .sql
            .contains("WHERE (name ILIKE $1 OR description ILIKE $1 OR brand ILIKE $1)"));
        assert_eq!(q.params, vec![BindValue::Text("%strat%".into())]);
    }

    #[test]
    fn both_filters_are_anded_in_order() {
        let q = select_products(&filter(Some("Accessories"), Some("pick")));
        assert!(q.sql.contains(
            "WHERE category = $1 AND (name ILIKE $2 OR description ILIKE $2 OR brand ILIKE $2)"
        ));
        assert_eq!(
            q.params,
            vec![
                BindValue::Text("Accessories".into()),
                BindValue::Text("%pick%".into())
            ]
        );
    }

    #[test]
    fn hostile_input_never_reaches_query_text() {
        let hostile = "x' OR '1'='1'; DROP TABLE products; --";
        let q = select_products(&filter(Some(hostile), Some(hostile)));
        assert!(!q.sql.contains("DROP"));
        assert!(!q.sql.contains('\''));
        assert_eq!(q.params.len(), 2);
        assert_eq!(q.params[0], BindValue::Text(hostile.into()));
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(contains_pattern("50%"), "%50\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("c:\\"), "%c:\\\\%");
        assert_eq!(contains_pattern("Strat"), "%Strat%");
    }

    #[test]
    fn by_id_binds_integer() {
        let q = select_product_by_id(42);
        assert!(q.sql.ends_with("FROM products WHERE id = $1"));
        assert_eq!(q.params, vec![BindValue::Int(42)]);
    }

    #[test]
    fn categories_has_no_limit() {
        let q = select_categories();
        assert_eq!(q.sql, "SELECT id, name, slug FROM categories ORDER BY id");
        assert!(!q.sql.contains("LIMIT"));
    }
}
