#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request},
    Router,
};
use domain_catalog::{
    categories, products, CategoryService, InMemoryCategoryRepository, InMemoryProductRepository,
    InMemoryStorageGateway, ProductService,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

const BOUNDARY: &str = "catalog-test-boundary";

/// Both routers over shared in-memory state, plus the storage double.
pub fn app_with_storage(storage: InMemoryStorageGateway) -> Router {
    let categories_repo = InMemoryCategoryRepository::new();
    let products_repo = InMemoryProductRepository::new();

    let category_service = CategoryService::new(categories_repo.clone(), products_repo.clone());
    let product_service =
        ProductService::new(products_repo, categories_repo, Arc::new(storage));

    Router::new()
        .nest("/categories", categories::handlers::router(category_service))
        .nest("/products", products::handlers::router(product_service))
}

pub fn app() -> (Router, InMemoryStorageGateway) {
    let storage = InMemoryStorageGateway::new();
    (app_with_storage(storage.clone()), storage)
}

pub async fn send(app: &Router, request: Request<Body>) -> (u16, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status().as_u16();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// A file part of a multipart form.
pub struct FilePart<'a> {
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub bytes: Vec<u8>,
}

pub fn multipart(
    method: Method,
    uri: &str,
    fields: &[(&str, String)],
    file: Option<FilePart<'_>>,
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(file) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                file.file_name, file.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(&file.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Create a category through the API and return its id.
pub async fn create_category(app: &Router, name: &str) -> String {
    let (status, body) = send(
        app,
        json(Method::POST, "/categories", serde_json::json!({ "name": name })),
    )
    .await;
    assert_eq!(status, 201, "create category failed: {body}");
    body["data"]["id"].as_str().unwrap().to_string()
}

pub fn product_fields(name: &str, price: &str, stock: i32, category_id: &str) -> Vec<(&'static str, String)> {
    vec![
        ("name", name.to_string()),
        ("price", price.to_string()),
        ("stockQuantity", stock.to_string()),
        ("categoryId", category_id.to_string()),
    ]
}

/// Create a product through the API and return its `data` object.
pub async fn create_product(app: &Router, fields: Vec<(&str, String)>) -> Value {
    let (status, body) = send(app, multipart(Method::POST, "/products", &fields, None)).await;
    assert_eq!(status, 201, "create product failed: {body}");
    body["data"].clone()
}
