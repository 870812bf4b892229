mod common;

use axum::http::Method;
use common::*;
use domain_catalog::InMemoryStorageGateway;

fn png(file_name: &str) -> FilePart<'_> {
    FilePart {
        file_name,
        content_type: "image/png",
        bytes: vec![0x89, b'P', b'N', b'G'],
    }
}

#[tokio::test]
async fn product_is_enriched_with_category_name() {
    let (app, _) = app();
    let books = create_category(&app, "Books").await;
    let atlas = create_product(&app, product_fields("Atlas", "15.00", 3, &books)).await;
    let id = atlas["id"].as_str().unwrap();

    let (status, body) = send(&app, get(&format!("/products/{id}"))).await;

    assert_eq!(status, 200);
    let data = &body["data"];
    assert_eq!(data["name"], "Atlas");
    assert_eq!(data["price"].as_f64(), Some(15.0));
    assert_eq!(data["stockQuantity"], 3);
    assert_eq!(data["isActive"], true);
    assert_eq!(data["description"], "");
    assert_eq!(data["categoryId"], books.as_str());
    assert_eq!(data["categoryName"], "Books");
    assert!(data["imageUrl"].is_null());
}

#[tokio::test]
async fn missing_product_is_404() {
    let (app, _) = app();

    let (status, body) = send(&app, get("/products/7f0c6a52-2f2e-4c38-9a4e-2b7cf0c9e4b1")).await;

    assert_eq!(status, 404);
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
async fn unknown_category_persists_nothing() {
    let (app, storage) = app();
    let fields = product_fields("Atlas", "15.00", 3, "7f0c6a52-2f2e-4c38-9a4e-2b7cf0c9e4b1");

    let (status, body) = send(
        &app,
        multipart(Method::POST, "/products", &fields, Some(png("atlas.png"))),
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(body["error"], "Invalid category.");
    assert!(storage.uploads().await.is_empty());

    let (_, body) = send(&app, get("/products")).await;
    assert_eq!(body["data"]["totalCount"], 0);
}

#[tokio::test]
async fn image_is_uploaded_under_products_prefix() {
    let (app, storage) = app();
    let books = create_category(&app, "Books").await;

    let (status, body) = send(
        &app,
        multipart(
            Method::POST,
            "/products",
            &product_fields("Atlas", "15.00", 3, &books),
            Some(png("atlas.png")),
        ),
    )
    .await;

    assert_eq!(status, 201);
    let uploads = storage.uploads().await;
    assert_eq!(uploads.len(), 1);
    let (key, image) = &uploads[0];
    assert!(key.starts_with("products/"));
    assert!(key.ends_with("_atlas.png"));
    assert_eq!(image.content_type.as_deref(), Some("image/png"));
    assert_eq!(body["data"]["imageUrl"], format!("memory://{key}"));
}

#[tokio::test]
async fn oversized_image_is_400() {
    let (app, storage) = app();
    let books = create_category(&app, "Books").await;

    let (status, body) = send(
        &app,
        multipart(
            Method::POST,
            "/products",
            &product_fields("Atlas", "15.00", 3, &books),
            Some(FilePart {
                file_name: "big.jpg",
                content_type: "image/jpeg",
                bytes: vec![0; 5_000_001],
            }),
        ),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "File too large");
    assert!(storage.uploads().await.is_empty());
}

#[tokio::test]
async fn wrong_file_type_is_400() {
    let (app, _) = app();
    let books = create_category(&app, "Books").await;

    let (status, body) = send(
        &app,
        multipart(
            Method::POST,
            "/products",
            &product_fields("Atlas", "15.00", 3, &books),
            Some(FilePart {
                file_name: "atlas.gif",
                content_type: "image/gif",
                bytes: vec![1, 2, 3],
            }),
        ),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "Invalid file type");
}

#[tokio::test]
async fn storage_failure_is_server_error() {
    let app = app_with_storage(InMemoryStorageGateway::failing("bucket unavailable"));
    let books = create_category(&app, "Books").await;

    let (status, body) = send(
        &app,
        multipart(
            Method::POST,
            "/products",
            &product_fields("Atlas", "15.00", 3, &books),
            Some(png("atlas.png")),
        ),
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(body["error"], "bucket unavailable");
}

#[tokio::test]
async fn negative_stock_is_reported_as_server_error() {
    let (app, _) = app();
    let books = create_category(&app, "Books").await;

    let (status, body) = send(
        &app,
        multipart(
            Method::POST,
            "/products",
            &product_fields("Atlas", "15.00", -1, &books),
            None,
        ),
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(body["error"], "Stock quantity cannot be negative.");
}

async fn product_with_image(app: &axum::Router, books: &str) -> String {
    let (_, body) = send(
        app,
        multipart(
            Method::POST,
            "/products",
            &product_fields("Atlas", "15.00", 3, books),
            Some(png("old.png")),
        ),
    )
    .await;
    body["data"]["id"].as_str().unwrap().to_string()
}

fn update_fields(id: &str, books: &str, remove_image: bool) -> Vec<(&'static str, String)> {
    let mut fields = product_fields("Atlas", "12.50", 4, books);
    fields.push(("id", id.to_string()));
    fields.push(("isActive", "true".to_string()));
    fields.push(("removeImage", remove_image.to_string()));
    fields
}

#[tokio::test]
async fn remove_image_clears_url() {
    let (app, _) = app();
    let books = create_category(&app, "Books").await;
    let id = product_with_image(&app, &books).await;

    let (status, body) = send(
        &app,
        multipart(
            Method::PUT,
            &format!("/products/{id}"),
            &update_fields(&id, &books, true),
            None,
        ),
    )
    .await;

    assert_eq!(status, 200);
    assert!(body["data"]["imageUrl"].is_null());
    assert_eq!(body["data"]["price"].as_f64(), Some(12.5));
    assert_eq!(body["data"]["stockQuantity"], 4);
}

#[tokio::test]
async fn new_image_overrides_remove_flag() {
    let (app, storage) = app();
    let books = create_category(&app, "Books").await;
    let id = product_with_image(&app, &books).await;

    let (status, body) = send(
        &app,
        multipart(
            Method::PUT,
            &format!("/products/{id}"),
            &update_fields(&id, &books, true),
            Some(png("new.png")),
        ),
    )
    .await;

    assert_eq!(status, 200);
    let url = body["data"]["imageUrl"].as_str().unwrap();
    assert!(url.ends_with("_new.png"));
    assert_eq!(storage.uploads().await.len(), 2);
}

#[tokio::test]
async fn update_without_image_keeps_url() {
    let (app, _) = app();
    let books = create_category(&app, "Books").await;
    let id = product_with_image(&app, &books).await;

    let (_, body) = send(
        &app,
        multipart(
            Method::PUT,
            &format!("/products/{id}"),
            &update_fields(&id, &books, false),
            None,
        ),
    )
    .await;

    assert!(body["data"]["imageUrl"].as_str().unwrap().ends_with("_old.png"));
}

#[tokio::test]
async fn update_defaults_to_inactive() {
    let (app, _) = app();
    let books = create_category(&app, "Books").await;
    let atlas = create_product(&app, product_fields("Atlas", "15.00", 3, &books)).await;
    let id = atlas["id"].as_str().unwrap();

    let mut fields = product_fields("Atlas", "15.00", 3, &books);
    fields.push(("id", id.to_string()));
    let (status, body) = send(
        &app,
        multipart(Method::PUT, &format!("/products/{id}"), &fields, None),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["data"]["isActive"], false);
}

#[tokio::test]
async fn update_with_mismatched_id_is_400() {
    let (app, _) = app();
    let books = create_category(&app, "Books").await;
    let atlas = create_product(&app, product_fields("Atlas", "15.00", 3, &books)).await;
    let id = atlas["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        multipart(
            Method::PUT,
            &format!("/products/{id}"),
            &update_fields("7f0c6a52-2f2e-4c38-9a4e-2b7cf0c9e4b1", &books, false),
            None,
        ),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "Body ID does not match route ID.");
}

#[tokio::test]
async fn mismatched_id_wins_over_oversized_image() {
    let (app, storage) = app();
    let books = create_category(&app, "Books").await;
    let atlas = create_product(&app, product_fields("Atlas", "15.00", 3, &books)).await;
    let id = atlas["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        multipart(
            Method::PUT,
            &format!("/products/{id}"),
            &update_fields("7f0c6a52-2f2e-4c38-9a4e-2b7cf0c9e4b1", &books, false),
            Some(FilePart {
                file_name: "big.jpg",
                content_type: "image/jpeg",
                bytes: vec![0; 5_000_001],
            }),
        ),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "Body ID does not match route ID.");
    assert!(storage.uploads().await.is_empty());
}

#[tokio::test]
async fn delete_returns_product_and_removes_it() {
    let (app, _) = app();
    let books = create_category(&app, "Books").await;
    let atlas = create_product(&app, product_fields("Atlas", "15.00", 3, &books)).await;
    let id = atlas["id"].as_str().unwrap();

    let (status, body) = send(&app, delete(&format!("/products/{id}"))).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["name"], "Atlas");
    assert_eq!(body["data"]["categoryName"], "Books");

    let (status, _) = send(&app, get(&format!("/products/{id}"))).await;
    assert_eq!(status, 404);

    let (status, body) = send(&app, delete(&format!("/products/{id}"))).await;
    assert_eq!(status, 500);
    assert_eq!(body["error"], "Product not found.");
}

#[tokio::test]
async fn filters_apply_together_and_inclusively() {
    let (app, _) = app();
    let books = create_category(&app, "Books").await;
    let music = create_category(&app, "Music").await;

    create_product(&app, product_fields("Atlas", "10.00", 1, &books)).await;
    create_product(&app, product_fields("Bible", "20.00", 1, &books)).await;
    create_product(&app, product_fields("Codex", "25.00", 1, &books)).await;
    create_product(&app, product_fields("Drums", "15.00", 1, &music)).await;
    let mut hidden = product_fields("Epic", "15.00", 1, &books);
    hidden.push(("isActive", "false".to_string()));
    create_product(&app, hidden).await;

    let (status, body) = send(
        &app,
        get(&format!(
            "/products/filter?categoryId={books}&minPrice=10&maxPrice=20&isActive=true"
        )),
    )
    .await;

    assert_eq!(status, 200);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Atlas", "Bible"]);

    let (_, body) = send(&app, get("/products/filter")).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn inverted_price_range_is_400() {
    let (app, _) = app();

    let (status, body) = send(&app, get("/products/filter?minPrice=20&maxPrice=10")).await;

    assert_eq!(status, 400);
    assert_eq!(
        body["error"],
        "Minimum price cannot be greater than maximum price."
    );
}

#[tokio::test]
async fn list_is_paged_and_enriched() {
    let (app, _) = app();
    let books = create_category(&app, "Books").await;
    for name in ["Atlas", "Bible", "Codex"] {
        create_product(&app, product_fields(name, "5", 1, &books)).await;
    }

    let (status, body) = send(&app, get("/products?pageNumber=2&pageSize=2")).await;

    assert_eq!(status, 200);
    let page = &body["data"];
    assert_eq!(page["totalCount"], 3);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["hasPrevious"], true);
    assert_eq!(page["hasNext"], false);
    assert_eq!(page["data"][0]["name"], "Codex");
    assert_eq!(page["data"][0]["categoryName"], "Books");
}
