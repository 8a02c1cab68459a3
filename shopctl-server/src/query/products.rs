//! Catalog query composition

use super::{BuiltQuery, QueryBuilder};
use crate::models::{FilterSpec, SortKey};

/// Products joined to their category; filters are appended as `AND` clauses.
const PRODUCTS_BASE: &str = r#"
SELECT p.id, p.name, c.name AS category, p.price
FROM products p
JOIN categories c ON c.id = p.category_id
WHERE 1=1
"#;

const CATEGORY_EQ: &str = "c.name =";
const PRICE_AT_LEAST: &str = "p.price >=";
const PRICE_AT_MOST: &str = "p.price <=";

fn order_by(sort: SortKey) -> &'static str {
    match sort {
        SortKey::IdAsc => "ORDER BY p.id ASC",
        SortKey::PriceAsc => "ORDER BY p.price ASC",
        SortKey::PriceDesc => "ORDER BY p.price DESC",
    }
}

/// Build the filtered catalog query.
///
/// Clause order is fixed: category, min price, max price, ORDER BY, then
/// LIMIT/OFFSET.
pub fn compose_products_query(spec: &FilterSpec) -> BuiltQuery {
    let mut qb = QueryBuilder::new(PRODUCTS_BASE);

    if let Some(category) = &spec.category {
        qb.and_where(CATEGORY_EQ, category.as_str());
    }
    if let Some(min) = spec.min_price {
        qb.and_where(PRICE_AT_LEAST, min);
    }
    if let Some(max) = spec.max_price {
        qb.and_where(PRICE_AT_MOST, max);
    }

    qb.push_fixed(order_by(spec.sort));
    qb.limit_offset(spec.page.limit(), spec.page.offset());

    let query = qb.build();
    tracing::debug!(sql = %query.sql(), args = query.args().len(), "composed products query");
    query
}
