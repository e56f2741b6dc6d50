//! Read-only catalog queries, printed as JSON.

use clap::Subcommand;
use seedcat_core::Category;
use seedcat_db::{DbError, ProductFilter};

/// Sub-commands available under `products`.
#[derive(Debug, Subcommand)]
pub enum ProductsCommands {
    /// List stored products ordered by name
    List {
        /// Case-insensitive match on name, crop, or description
        #[arg(long)]
        keyword: Option<String>,
        /// Only products in this category (e.g. "Cotton", "Pigeon Pea")
        #[arg(long, value_parser = parse_category)]
        category: Option<Category>,
        /// Only featured products
        #[arg(long)]
        featured: bool,
        /// Maximum number of products to show
        #[arg(long)]
        limit: Option<i64>,
    },
    /// Show one product by slug or public id
    Show { key: String },
    /// Print the number of stored products
    Count,
}

pub(crate) fn parse_category(raw: &str) -> Result<Category, String> {
    raw.parse::<Category>().map_err(|e| e.to_string())
}

/// `--featured` narrows to featured products; without it both are listed.
pub(crate) fn build_filter(
    keyword: Option<String>,
    category: Option<Category>,
    featured: bool,
    limit: Option<i64>,
) -> ProductFilter {
    ProductFilter {
        keyword,
        category,
        featured: featured.then_some(true),
        limit,
    }
}

/// Runs a `products` sub-command against `pool`.
///
/// # Errors
///
/// Returns an error if the query fails or `show` finds no product.
pub(crate) async fn run_products(
    pool: &sqlx::PgPool,
    command: ProductsCommands,
) -> anyhow::Result<()> {
    match command {
        ProductsCommands::List {
            keyword,
            category,
            featured,
            limit,
        } => {
            let filter = build_filter(keyword, category, featured, limit);
            let products = seedcat_db::list_products(pool, &filter).await?;
            println!("{}", serde_json::to_string_pretty(&products)?);
        }
        ProductsCommands::Show { key } => {
            match seedcat_db::get_product_by_slug_or_public_id(pool, &key).await {
                Ok(product) => println!("{}", serde_json::to_string_pretty(&product)?),
                Err(DbError::NotFound) => anyhow::bail!("product '{key}' not found"),
                Err(e) => return Err(e.into()),
            }
        }
        ProductsCommands::Count => {
            println!("{}", seedcat_db::count_products(pool).await?);
        }
    }

    Ok(())
}
