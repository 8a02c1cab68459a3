//! Print the composed catalog query without running it

use anyhow::Result;
use clap::Parser;

use shopctl_server::models::{FilterParams, FilterSpec};
use shopctl_server::query::compose_products_query;

/// Same parameters as `GET /products`, taken as raw strings so that
/// unusable values are dropped exactly as the server drops them.
#[derive(Parser, Debug)]
pub struct ProductsSqlArgs {
    /// Category name to match exactly
    #[arg(long)]
    pub category: Option<String>,

    /// Minimum price (inclusive)
    #[arg(long, allow_hyphen_values = true)]
    pub min_price: Option<String>,

    /// Maximum price (inclusive)
    #[arg(long, allow_hyphen_values = true)]
    pub max_price: Option<String>,

    /// price_asc, price_desc, or anything else for id order
    #[arg(long)]
    pub sort: Option<String>,

    /// Page size (1-500, default 50)
    #[arg(long, allow_hyphen_values = true)]
    pub limit: Option<String>,

    /// Rows to skip (default 0)
    #[arg(long, allow_hyphen_values = true)]
    pub offset: Option<String>,
}

impl From<ProductsSqlArgs> for FilterParams {
    fn from(args: ProductsSqlArgs) -> Self {
        Self {
            category: args.category,
            min_price: args.min_price,
            max_price: args.max_price,
            sort: args.sort,
            limit: args.limit,
            offset: args.offset,
        }
    }
}

pub fn run_products_sql(args: ProductsSqlArgs) -> Result<()> {
    let spec = FilterSpec::from(FilterParams::from(args));
    print!("{}", compose_products_query(&spec));
    Ok(())
}
