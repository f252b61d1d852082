//! SQLite-backed catalog repository.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{debug, info};
use turbo_db::{Condition, Db, DbConfig, Select, Statement};

use crate::catalog::{Product, ProductVariant};
use crate::error::{Result, SearchError};
use crate::ids::{BrandId, CategoryId, ProductId, ShopId};
use crate::money::{Currency, Money};
use crate::repository::CatalogRepository;
use crate::search::{FacetCount, PageRequest, PriceStats, ProductFilter, ProductPredicate, VariantQuery};
use crate::store::rows::{ProductRow, VariantRow, PRODUCT_COLUMNS, PRODUCT_JOINS};
use crate::store::CATALOG_SCHEMA;

/// [`CatalogRepository`] over a pooled SQLite database.
///
/// Cloning shares the pool.
#[derive(Debug, Clone)]
pub struct SqliteCatalog {
    db: Db,
    currency: Currency,
}

impl SqliteCatalog {
    /// Wrap an open database. Prices are read as EUR.
    pub fn new(db: Db) -> Self {
        Self {
            db,
            currency: Currency::default(),
        }
    }

    /// Set the currency stored prices are in.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub async fn connect(config: &DbConfig) -> Result<Self> {
        Ok(Self::new(Db::connect(config).await?))
    }

    /// An empty in-memory catalog with the schema installed.
    pub async fn open_in_memory() -> Result<Self> {
        let catalog = Self::new(Db::open_in_memory().await?);
        catalog.install_schema().await?;
        Ok(catalog)
    }

    pub fn db(&self) -> &Db {
        &self.db
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Create the catalog tables and indexes if they do not exist.
    pub async fn install_schema(&self) -> Result<()> {
        self.db.execute_batch(CATALOG_SCHEMA).await?;
        info!("catalog schema installed");
        Ok(())
    }

    async fn ids(&self, stmt: Statement) -> Result<Vec<i64>> {
        let rows: Vec<(i64,)> = self.db.fetch_all(&stmt).await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    async fn names(&self, stmt: Statement) -> Result<Vec<String>> {
        let rows: Vec<(String,)> = self.db.fetch_all(&stmt).await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    async fn counts(&self, stmt: Statement) -> Result<Vec<FacetCount>> {
        let rows: Vec<(String, i64)> = self.db.fetch_all(&stmt).await?;
        Ok(rows
            .into_iter()
            .map(|(name, count)| FacetCount::new(name, count))
            .collect())
    }

    /// Load the variants of `products` in one query and attach them.
    async fn attach_variants(&self, products: &mut [Product]) -> Result<()> {
        if products.is_empty() {
            return Ok(());
        }

        let stmt = Select::from("product_variants v")
            .columns(&["v.id", "v.product_id", "v.color", "v.size"])
            .filter(Condition::in_list("v.product_id", products.iter().map(|p| p.id)))
            .order_by("v.product_id ASC")
            .order_by("v.id ASC")
            .build();
        let rows: Vec<VariantRow> = self.db.fetch_all(&stmt).await?;

        let mut by_product: HashMap<ProductId, Vec<ProductVariant>> = HashMap::new();
        for variant in rows.into_iter().map(ProductVariant::from) {
            by_product.entry(variant.product_id).or_default().push(variant);
        }
        for product in products.iter_mut() {
            product.variants = by_product.remove(&product.id).unwrap_or_default();
        }
        Ok(())
    }
}

/// Translate one predicate into a condition over `products p`.
///
/// Price bounds must be in the catalog's `currency`.
fn to_condition(predicate: &ProductPredicate, currency: Currency) -> Result<Condition> {
    Ok(match predicate {
        ProductPredicate::TextContains(text) => Condition::any(vec![
            Condition::contains_ci("p.title", text.as_str()),
            Condition::contains_ci("p.description", text.as_str()),
            Condition::contains_ci("p.search_text", text.as_str()),
        ]),
        ProductPredicate::BrandIn(ids) => Condition::in_list("p.brand_id", ids.iter().copied()),
        ProductPredicate::CategoryIn(ids) => Condition::in_list("p.category_id", ids.iter().copied()),
        ProductPredicate::ShopIn(ids) => Condition::in_list("p.shop_id", ids.iter().copied()),
        ProductPredicate::IdIn(ids) => Condition::in_list("p.id", ids.iter().copied()),
        ProductPredicate::PriceAtLeast(min) => Condition::ge("p.price_cents", cents_in(*min, currency)?),
        ProductPredicate::PriceAtMost(max) => Condition::le("p.price_cents", cents_in(*max, currency)?),
        ProductPredicate::Availability(available) => Condition::eq("p.availability", *available),
        ProductPredicate::Ean(ean) => Condition::eq("p.ean", ean.as_str()),
        ProductPredicate::Mpn(mpn) => Condition::eq("p.mpn", mpn.as_str()),
        ProductPredicate::Nothing => Condition::never(),
    })
}

fn cents_in(price: Money, currency: Currency) -> Result<i64> {
    if price.currency != currency {
        return Err(SearchError::CurrencyMismatch {
            expected: currency,
            found: price.currency,
        });
    }
    Ok(price.amount_cents)
}

fn filtered(select: Select, filter: &ProductFilter, currency: Currency) -> Result<Select> {
    filter
        .clauses()
        .iter()
        .try_fold(select, |select, clause| -> Result<Select> {
            Ok(select.filter(to_condition(clause, currency)?))
        })
}

/// Count and sort every row of `table alias` joined to its products.
fn product_counts(table: &str, alias: &str, fk: &str) -> Select {
    Select::from(format!("{} {}", table, alias))
        .column(format!("{}.name", alias))
        .column("COUNT(p.id) AS product_count")
        .join(format!("JOIN products p ON p.{} = {}.id", fk, alias))
        .group_by(format!("{}.name", alias))
        .order_by("product_count DESC")
        .order_by(format!("{}.name ASC", alias))
}

#[async_trait]
impl CatalogRepository for SqliteCatalog {
    async fn brand_ids_matching(&self, needle: &str) -> Result<Vec<BrandId>> {
        let stmt = Select::from("brands b")
            .column("b.id")
            .filter(Condition::contains_ci("b.name", needle))
            .order_by("b.id ASC")
            .build();
        Ok(self.ids(stmt).await?.into_iter().map(BrandId::new).collect())
    }

    async fn category_ids_matching(&self, needle: &str) -> Result<Vec<CategoryId>> {
        let stmt = Select::from("categories c")
            .column("c.id")
            .filter(Condition::any(vec![
                Condition::contains_ci("c.name", needle),
                Condition::contains_ci("c.path", needle),
            ]))
            .order_by("c.id ASC")
            .build();
        Ok(self.ids(stmt).await?.into_iter().map(CategoryId::new).collect())
    }

    async fn shop_ids_matching(&self, needle: &str) -> Result<Vec<ShopId>> {
        let stmt = Select::from("shops s")
            .column("s.id")
            .filter(Condition::contains_ci("s.name", needle))
            .order_by("s.id ASC")
            .build();
        Ok(self.ids(stmt).await?.into_iter().map(ShopId::new).collect())
    }

    async fn variant_product_ids(&self, query: &VariantQuery) -> Result<Vec<ProductId>> {
        let conditions = [("v.color", &query.color), ("v.size", &query.size)];
        let per_condition: Vec<Statement> = conditions
            .into_iter()
            .filter_map(|(column, needle)| {
                needle.as_deref().map(|needle| {
                    Select::from("product_variants v")
                        .distinct()
                        .column("v.product_id")
                        .filter(Condition::contains_ci(column, needle))
                        .build()
                })
            })
            .collect();

        let Some(stmt) = Statement::intersect(per_condition) else {
            return Ok(Vec::new());
        };
        let ids = self.ids(stmt).await?;
        debug!(matched = ids.len(), "variant products resolved");
        Ok(ids.into_iter().map(ProductId::new).collect())
    }

    async fn count_products(&self, filter: &ProductFilter) -> Result<u64> {
        let stmt = filtered(Select::from("products p").column("COUNT(*)"), filter, self.currency)?.build();
        let (count,): (i64,) = self.db.fetch_one(&stmt).await?;
        Ok(count.max(0) as u64)
    }

    async fn fetch_products(&self, filter: &ProductFilter, page: PageRequest) -> Result<Vec<Product>> {
        let select = PRODUCT_JOINS
            .iter()
            .fold(Select::from("products p").columns(PRODUCT_COLUMNS), |select, join| {
                select.join(*join)
            });
        let stmt = filtered(select, filter, self.currency)?
            .order_by("p.availability DESC")
            .order_by("p.price_cents IS NULL")
            .order_by("p.price_cents ASC")
            .order_by("p.id ASC")
            .limit(page.per_page() as i64)
            .offset(page.offset() as i64)
            .build();

        let rows: Vec<ProductRow> = self.db.fetch_all(&stmt).await?;
        let mut products: Vec<Product> = rows
            .into_iter()
            .map(|row| row.into_product(self.currency))
            .collect();
        self.attach_variants(&mut products).await?;
        Ok(products)
    }

    async fn title_suggestions(&self, needle: &str, limit: u32) -> Result<Vec<String>> {
        let stmt = Select::from("products p")
            .column("p.title")
            .filter(Condition::contains_ci("p.title", needle))
            .order_by("p.id ASC")
            .limit(limit as i64)
            .build();
        self.names(stmt).await
    }

    async fn brand_name_suggestions(&self, needle: &str, limit: u32) -> Result<Vec<String>> {
        let stmt = Select::from("brands b")
            .column("b.name")
            .filter(Condition::contains_ci("b.name", needle))
            .order_by("b.id ASC")
            .limit(limit as i64)
            .build();
        self.names(stmt).await
    }

    async fn brand_counts(&self, limit: u32) -> Result<Vec<FacetCount>> {
        let stmt = product_counts("brands", "b", "brand_id").limit(limit as i64).build();
        self.counts(stmt).await
    }

    async fn category_counts(&self, limit: u32) -> Result<Vec<FacetCount>> {
        let stmt = product_counts("categories", "c", "category_id")
            .limit(limit as i64)
            .build();
        self.counts(stmt).await
    }

    async fn price_stats(&self) -> Result<Option<PriceStats>> {
        let stmt = Select::from("products p")
            .columns(&["MIN(p.price_cents)", "MAX(p.price_cents)", "AVG(p.price_cents)"])
            .build();
        let row: (Option<i64>, Option<i64>, Option<f64>) = self.db.fetch_one(&stmt).await?;

        Ok(match row {
            (Some(min), Some(max), Some(avg)) => Some(PriceStats {
                min: Money::new(min, self.currency),
                avg: Money::new(avg.round() as i64, self.currency),
                max: Money::new(max, self.currency),
            }),
            _ => None,
        })
    }

    async fn categories_matching(&self, needle: &str, limit: u32) -> Result<Vec<FacetCount>> {
        let stmt = product_counts("categories", "c", "category_id")
            .filter(Condition::contains_ci("c.name", needle))
            .limit(limit as i64)
            .build();
        self.counts(stmt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::seed_catalog;

    async fn catalog() -> SqliteCatalog {
        let catalog = SqliteCatalog::open_in_memory().await.expect("Failed to open catalog");
        seed_catalog(catalog.db()).await;
        catalog
    }

    fn ids(products: &[Product]) -> Vec<i64> {
        products.iter().map(|p| p.id.get()).collect()
    }

    fn sql(predicate: ProductPredicate) -> String {
        to_condition(&predicate, Currency::EUR).unwrap().to_sql().0
    }

    #[test]
    fn test_text_predicate_spans_three_columns() {
        let (sql, params) = to_condition(&ProductPredicate::TextContains("Boot".into()), Currency::EUR)
            .unwrap()
            .to_sql();
        assert_eq!(
            sql,
            "(p.title REGEXP ? OR p.description REGEXP ? OR p.search_text REGEXP ?)"
        );
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_unsatisfiable_predicates_render_false() {
        assert_eq!(sql(ProductPredicate::Nothing), "0 = 1");
        assert_eq!(sql(ProductPredicate::BrandIn(vec![])), "0 = 1");
    }

    #[test]
    fn test_price_bound_in_other_currency_is_rejected() {
        let bound = ProductPredicate::PriceAtMost(Money::new(5000, Currency::JPY));
        let err = to_condition(&bound, Currency::EUR).unwrap_err();
        assert!(matches!(
            err,
            SearchError::CurrencyMismatch {
                expected: Currency::EUR,
                found: Currency::JPY
            }
        ));
        assert_eq!(sql(ProductPredicate::PriceAtMost(Money::new(5000, Currency::EUR))), "p.price_cents <= ?");
    }

    #[tokio::test]
    async fn test_name_matching_is_case_insensitive() {
        let catalog = catalog().await;
        assert_eq!(catalog.brand_ids_matching("ACME").await.unwrap(), vec![BrandId::new(1)]);
        assert_eq!(catalog.shop_ids_matching("outlet").await.unwrap(), vec![ShopId::new(2)]);
        assert!(catalog.brand_ids_matching("nonexistent").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_category_matches_name_or_path() {
        let catalog = catalog().await;
        assert_eq!(
            catalog.category_ids_matching("apparel").await.unwrap(),
            vec![CategoryId::new(1), CategoryId::new(2)]
        );
        assert_eq!(catalog.category_ids_matching("Hats").await.unwrap(), vec![CategoryId::new(2)]);
    }

    #[tokio::test]
    async fn test_needle_wildcards_are_literal() {
        let catalog = catalog().await;
        assert!(catalog.brand_ids_matching("%").await.unwrap().is_empty());
        assert!(catalog.brand_ids_matching("_cme").await.unwrap().is_empty());
        assert!(catalog.brand_ids_matching(".cme").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_ascii_names_match_in_any_case() {
        let catalog = catalog().await;
        catalog
            .db()
            .execute_batch(
                "INSERT INTO brands (id, name) VALUES (3, 'ÖKO Natur');
                 INSERT INTO shops (id, name) VALUES (3, 'Müller Märkte');
                 INSERT INTO products (id, title, price_cents, brand_id, shop_id) VALUES (6, 'Bio Äpfel', 350, 3, 3);
                 INSERT INTO product_variants (id, product_id, color, size) VALUES (4, 6, 'Grün', 'Groß')",
            )
            .await
            .unwrap();

        for needle in ["öko", "ÖKO", "Öko natur"] {
            assert_eq!(catalog.brand_ids_matching(needle).await.unwrap(), vec![BrandId::new(3)]);
        }
        assert_eq!(catalog.shop_ids_matching("MÜLLER").await.unwrap(), vec![ShopId::new(3)]);

        let query = VariantQuery::new(Some("GRÜN"), Some("groß")).unwrap();
        assert_eq!(catalog.variant_product_ids(&query).await.unwrap(), vec![ProductId::new(6)]);

        let filter = ProductFilter::new().and(ProductPredicate::TextContains("äpfel".into()));
        assert_eq!(catalog.count_products(&filter).await.unwrap(), 1);
        assert_eq!(catalog.title_suggestions("ÄPF", 5).await.unwrap(), vec!["Bio Äpfel"]);
        assert_eq!(catalog.brand_name_suggestions("öko", 5).await.unwrap(), vec!["ÖKO Natur"]);
    }

    #[tokio::test]
    async fn test_large_id_set_stays_within_bind_limit() {
        let catalog = catalog().await;
        let wanted: Vec<ProductId> = (1..=40_000).map(ProductId::new).collect();
        let filter = ProductFilter::new().and(ProductPredicate::IdIn(wanted));
        assert_eq!(catalog.count_products(&filter).await.unwrap(), 5);
        let products = catalog.fetch_products(&filter, PageRequest::new(1, 2)).await.unwrap();
        assert_eq!(ids(&products), vec![2, 1]);
    }

    #[tokio::test]
    async fn test_price_filter_in_foreign_currency_fails() {
        let catalog = catalog().await;
        let filter = ProductFilter::new().and(ProductPredicate::PriceAtLeast(Money::new(10, Currency::JPY)));
        assert!(matches!(
            catalog.count_products(&filter).await,
            Err(SearchError::CurrencyMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn test_variant_conditions_intersect_across_rows() {
        let catalog = catalog().await;
        // Product 1 has a red S and a blue M: red and M come from different rows.
        let query = VariantQuery::new(Some("red"), Some("m")).unwrap();
        assert_eq!(catalog.variant_product_ids(&query).await.unwrap(), vec![ProductId::new(1)]);

        let query = VariantQuery::new(Some("green"), None).unwrap();
        assert!(catalog.variant_product_ids(&query).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_orders_available_then_price_nulls_last() {
        let catalog = catalog().await;
        let products = catalog
            .fetch_products(&ProductFilter::new(), PageRequest::new(1, 10))
            .await
            .unwrap();
        assert_eq!(ids(&products), vec![2, 1, 3, 5, 4]);
    }

    #[tokio::test]
    async fn test_fetch_pages_and_resolves_relations() {
        let catalog = catalog().await;
        let products = catalog
            .fetch_products(&ProductFilter::new(), PageRequest::new(1, 2))
            .await
            .unwrap();
        assert_eq!(ids(&products), vec![2, 1]);

        let shoe = &products[1];
        assert_eq!(shoe.brand.as_ref().map(|b| b.name.as_str()), Some("Acme"));
        assert_eq!(shoe.shop.as_ref().map(|s| s.name.as_str()), Some("Main Street"));
        assert_eq!(shoe.category.as_ref().map(|c| c.path.as_str()), Some("apparel/shoes"));
        assert_eq!(shoe.variants.len(), 2);
        assert_eq!(shoe.price, Some(Money::new(4500, Currency::EUR)));
    }

    #[tokio::test]
    async fn test_count_with_filters() {
        let catalog = catalog().await;
        let filter = ProductFilter::new()
            .and(ProductPredicate::Availability(true))
            .and(ProductPredicate::PriceAtLeast(Money::new(1000, Currency::EUR)));
        assert_eq!(catalog.count_products(&filter).await.unwrap(), 2);
        assert_eq!(catalog.count_products(&ProductFilter::new()).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_text_filter_searches_description_and_search_text() {
        let catalog = catalog().await;
        let filter = ProductFilter::new().and(ProductPredicate::TextContains("WATERPROOF".into()));
        let products = catalog.fetch_products(&filter, PageRequest::default()).await.unwrap();
        assert_eq!(ids(&products), vec![1]);

        let filter = ProductFilter::new().and(ProductPredicate::TextContains("beanie".into()));
        assert_eq!(catalog.count_products(&filter).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_facet_counts() {
        let catalog = catalog().await;
        assert_eq!(
            catalog.brand_counts(20).await.unwrap(),
            vec![FacetCount::new("Acme", 3), FacetCount::new("Zephyr", 1)]
        );
        assert_eq!(catalog.category_counts(1).await.unwrap(), vec![FacetCount::new("Shoes", 3)]);
    }

    #[tokio::test]
    async fn test_price_stats() {
        let catalog = catalog().await;
        let stats = catalog.price_stats().await.unwrap().unwrap();
        assert_eq!(stats.min, Money::new(1200, Currency::EUR));
        assert_eq!(stats.max, Money::new(4500, Currency::EUR));
        assert_eq!(stats.avg, Money::new(2700, Currency::EUR));
    }

    #[tokio::test]
    async fn test_price_stats_empty_catalog() {
        let catalog = SqliteCatalog::open_in_memory().await.unwrap();
        assert_eq!(catalog.price_stats().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_suggestion_sources() {
        let catalog = catalog().await;
        assert_eq!(
            catalog.title_suggestions("a", 2).await.unwrap(),
            vec!["Trail Shoe".to_string(), "Wool Hat".to_string()]
        );
        assert_eq!(catalog.brand_name_suggestions("e", 5).await.unwrap(), vec!["Acme", "Zephyr"]);
    }

    #[tokio::test]
    async fn test_categories_matching_skips_empty_categories() {
        let catalog = catalog().await;
        catalog
            .db()
            .execute_batch("INSERT INTO categories (id, name, path) VALUES (9, 'Shoelaces', 'apparel/shoelaces')")
            .await
            .unwrap();

        let found = catalog.categories_matching("sho", 10).await.unwrap();
        assert_eq!(found, vec![FacetCount::new("Shoes", 3)]);
    }

    #[tokio::test]
    async fn test_currency_applies_to_prices() {
        let catalog = catalog().await.with_currency(Currency::GBP);
        let filter = ProductFilter::new().and(ProductPredicate::Ean("4000000000002".into()));
        let products = catalog.fetch_products(&filter, PageRequest::default()).await.unwrap();
        assert_eq!(products[0].price, Some(Money::new(1200, Currency::GBP)));
    }
}
