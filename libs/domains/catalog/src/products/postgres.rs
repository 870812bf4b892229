use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::products::{
    entity,
    models::{Product, ProductFilter},
    repository::ProductRepository,
};

/// SeaORM-backed product repository.
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn ordered(query: Select<entity::Entity>) -> Select<entity::Entity> {
    query
        .order_by_asc(entity::Column::Name)
        .order_by_asc(entity::Column::Id)
}

/// `WHERE` clause for the supplied filters; an empty filter matches everything.
pub(crate) fn filter_condition(filter: &ProductFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(category_id) = filter.category_id {
        condition = condition.add(entity::Column::CategoryId.eq(category_id));
    }
    if let Some(min_price) = filter.min_price {
        condition = condition.add(entity::Column::Price.gte(min_price));
    }
    if let Some(max_price) = filter.max_price {
        condition = condition.add(entity::Column::Price.lte(max_price));
    }
    if let Some(is_active) = filter.is_active {
        condition = condition.add(entity::Column::IsActive.eq(is_active));
    }

    condition
}

/// Ordered product query narrowed by `filter`; no `WHERE` clause when the filter is empty.
pub(crate) fn filtered_query(filter: &ProductFilter) -> Select<entity::Entity> {
    let condition = filter_condition(filter);
    let query = ordered(entity::Entity::find());

    if condition.is_empty() {
        query
    } else {
        query.filter(condition)
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, product: Product) -> CatalogResult<Product> {
        let model = entity::ActiveModel::from(product).insert(&self.db).await?;

        tracing::info!(product_id = %model.id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, offset: u64, limit: u64) -> CatalogResult<(Vec<Product>, u64)> {
        let total = entity::Entity::find().count(&self.db).await?;

        let models = ordered(entity::Entity::find())
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok((models.into_iter().map(Into::into).collect(), total))
    }

    async fn list_by_category(&self, category_id: Uuid) -> CatalogResult<Vec<Product>> {
        let models = ordered(entity::Entity::find())
            .filter(entity::Column::CategoryId.eq(category_id))
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn count_by_category(&self, category_id: Uuid) -> CatalogResult<u64> {
        let count = entity::Entity::find()
            .filter(entity::Column::CategoryId.eq(category_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn find_by_filters(&self, filter: ProductFilter) -> CatalogResult<Vec<Product>> {
        let models = filtered_query(&filter)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, product: Product) -> CatalogResult<Option<Product>> {
        match entity::ActiveModel::from(product).update(&self.db).await {
            Ok(model) => {
                tracing::info!(product_id = %model.id, "Updated product");
                Ok(Some(model.into()))
            }
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = %id, "Deleted product");
        }
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase, QueryTrait};

    fn model(name: &str, category_id: Uuid) -> entity::Model {
        let now = Utc::now().into();
        entity::Model {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: String::new(),
            price: Decimal::new(1500, 2),
            stock_quantity: 3,
            is_active: true,
            category_id,
            image_url: Some("https://bucket.s3.amazonaws.com/products/x_atlas.png".into()),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn list_by_category_maps_rows() {
        let category_id = Uuid::new_v4();
        let rows = vec![model("Atlas", category_id), model("Globe", category_id)];
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([rows.clone()])
            .into_connection();

        let repo = PgProductRepository::new(db);
        let products = repo.list_by_category(category_id).await.unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Atlas");
        assert_eq!(products[0].price, Decimal::new(1500, 2));
        assert_eq!(products[1].image_url, rows[1].image_url);
    }

    #[test]
    fn empty_filter_adds_no_predicates() {
        let sql = filtered_query(&ProductFilter::default())
            .build(DatabaseBackend::Postgres)
            .to_string();
        assert!(!sql.contains("WHERE"));
        assert!(sql.contains(r#"ORDER BY "products"."name" ASC"#));
    }

    #[test]
    fn full_filter_uses_inclusive_bounds() {
        let filter = ProductFilter {
            category_id: Some(Uuid::nil()),
            min_price: Some(Decimal::new(10, 0)),
            max_price: Some(Decimal::new(20, 0)),
            is_active: Some(true),
        };
        let sql = filtered_query(&filter)
            .build(DatabaseBackend::Postgres)
            .to_string();

        assert!(sql.contains(r#""products"."category_id" ="#));
        assert!(sql.contains(r#""products"."price" >="#));
        assert!(sql.contains(r#""products"."price" <="#));
        assert!(sql.contains(r#""products"."is_active" ="#));
        assert_eq!(sql.matches(" AND ").count(), 3);
    }
}
