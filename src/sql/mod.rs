//! Query construction for the catalog tables.

mod builder;
mod params;

pub use builder::{
    contains_pattern, select_categories, select_product_by_id, select_products, QueryBuf,
    PRODUCT_LIST_CAP,
};
pub use params::{bind_all, BindValue};
