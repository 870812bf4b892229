//! Repository tests against a real Postgres. Run with `--ignored` when Docker is available.

use domain_catalog::{
    Category, CategoryRepository, PgCategoryRepository, PgProductRepository, Product,
    ProductFields, ProductFilter, ProductRepository,
};
use rust_decimal::Decimal;
use test_utils::{
    assertions::{assert_some, assert_uuid_eq},
    TestDataBuilder, TestDatabase,
};

fn product(name: &str, cents: i64, category: &Category, is_active: bool) -> Product {
    Product::new(
        ProductFields {
            name: name.to_string(),
            description: None,
            price: Decimal::new(cents, 2),
            stock_quantity: 1,
            is_active,
            category_id: category.id,
        },
        None,
    )
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn category_round_trip() {
    let db = TestDatabase::new().await;
    let repo = PgCategoryRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("category_round_trip");

    let created = repo
        .create(Category::new(builder.name("category", "books"), Some("Paper".into())))
        .await
        .unwrap();

    let found = assert_some(repo.get_by_id(created.id).await.unwrap(), "stored category");
    assert_uuid_eq(found.id, created.id, "stored category id");
    assert_eq!(found.name, created.name);
    assert_eq!(found.description.as_deref(), Some("Paper"));

    let mut renamed = found.clone();
    renamed.name = builder.name("category", "novels");
    let updated = assert_some(repo.update(renamed).await.unwrap(), "renamed category");
    assert!(updated.name.ends_with("novels"));

    assert!(repo.delete(created.id).await.unwrap());
    assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    assert!(!repo.delete(created.id).await.unwrap());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn update_of_missing_category_is_none() {
    let db = TestDatabase::new().await;
    let repo = PgCategoryRepository::new(db.connection());

    let ghost = Category::new("Ghost".into(), None);
    assert!(repo.update(ghost).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn products_filter_and_page() {
    let db = TestDatabase::new().await;
    let categories = PgCategoryRepository::new(db.connection());
    let products = PgProductRepository::new(db.connection());

    let books = categories
        .create(Category::new("Books".into(), None))
        .await
        .unwrap();
    let music = categories
        .create(Category::new("Music".into(), None))
        .await
        .unwrap();

    for p in [
        product("Atlas", 1000, &books, true),
        product("Bible", 2000, &books, true),
        product("Codex", 2500, &books, true),
        product("Drums", 1500, &music, true),
        product("Epic", 1500, &books, false),
    ] {
        products.create(p).await.unwrap();
    }

    let matched = products
        .find_by_filters(ProductFilter {
            category_id: Some(books.id),
            min_price: Some(Decimal::new(10, 0)),
            max_price: Some(Decimal::new(20, 0)),
            is_active: Some(true),
        })
        .await
        .unwrap();
    let names: Vec<_> = matched.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Atlas", "Bible"]);

    let (page, total) = products.list(2, 2).await.unwrap();
    assert_eq!(total, 5);
    let names: Vec<_> = page.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Codex", "Drums"]);

    assert_eq!(products.count_by_category(books.id).await.unwrap(), 4);
    assert_eq!(products.list_by_category(music.id).await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn category_with_products_cannot_be_deleted() {
    let db = TestDatabase::new().await;
    let categories = PgCategoryRepository::new(db.connection());
    let products = PgProductRepository::new(db.connection());

    let books = categories
        .create(Category::new("Books".into(), None))
        .await
        .unwrap();
    products
        .create(product("Atlas", 1500, &books, true))
        .await
        .unwrap();

    assert!(categories.delete(books.id).await.is_err());
    assert!(categories.get_by_id(books.id).await.unwrap().is_some());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn price_keeps_two_decimal_places() {
    let db = TestDatabase::new().await;
    let categories = PgCategoryRepository::new(db.connection());
    let products = PgProductRepository::new(db.connection());

    let books = categories
        .create(Category::new("Books".into(), None))
        .await
        .unwrap();
    let created = products
        .create(product("Atlas", 1599, &books, true))
        .await
        .unwrap();

    let found = products.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(found.price, Decimal::new(1599, 2));
    assert!(found.is_active);
    assert_eq!(found.description, "");
}
