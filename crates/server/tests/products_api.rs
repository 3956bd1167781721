use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::Service;

use server::routes::{self, RouterOptions, ServerState};
use service::catalog::{seed::default_products, IdStrategy, InMemoryProductStore, ProductService};

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

fn build_app_with(products: Vec<service::catalog::Product>) -> anyhow::Result<Router> {
    let store = InMemoryProductStore::with_products(products, IdStrategy::MaxPlusOne)?;
    let state = ServerState { products: ProductService::new(store) };
    let opts = RouterOptions {
        images_dir: std::env::temp_dir().to_string_lossy().into_owned(),
        images_route: "/images".into(),
        docs_path: Some("/api-docs".into()),
        server_url: None,
    };
    Ok(routes::build_router(state, cors(), &opts))
}

fn build_app() -> anyhow::Result<Router> {
    build_app_with(default_products())
}

async fn send(app: &mut Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Vec<u8>)> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&v)?))?,
        None => builder.body(Body::empty())?,
    };
    let resp = app.call(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    Ok((status, bytes.to_vec()))
}

async fn send_json(app: &mut Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let (status, bytes) = send(app, method, uri, body).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

#[tokio::test]
async fn list_returns_seed_in_order() -> anyhow::Result<()> {
    let mut app = build_app()?;
    let (status, body) = send_json(&mut app, "GET", "/api/products", None).await?;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().expect("array");
    assert_eq!(items.len(), 10);
    let ids: Vec<u64> = items.iter().map(|p| p["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    Ok(())
}

#[tokio::test]
async fn get_by_id_and_not_found() -> anyhow::Result<()> {
    let mut app = build_app()?;
    let (status, body) = send_json(&mut app, "GET", "/api/products/3", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 3);
    assert_eq!(body["image"], "/images/headphones.jpg");

    let (status, text) = send(&mut app, "GET", "/api/products/404", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(String::from_utf8(text)?, "product not found");

    let (status, _) = send(&mut app, "GET", "/api/products/abc", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn create_returns_201_and_ignores_client_id() -> anyhow::Result<()> {
    let mut app = build_app()?;
    let (status, body) = send_json(&mut app, "POST", "/api/products", Some(json!({"id": 1, "name": "X", "price": 12.5}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 11);
    assert_eq!(body["name"], "X");
    assert_eq!(body["price"], 12.5);
    assert_eq!(body["stock"], 0);
    assert_eq!(body["category"], "");

    let (_, list) = send_json(&mut app, "GET", "/api/products", None).await?;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 11);
    assert_eq!(list.last().unwrap(), &body);

    // the seed record with id 1 is untouched
    let (_, first) = send_json(&mut app, "GET", "/api/products/1", None).await?;
    assert_eq!(first["name"], "Smartphone X");
    Ok(())
}

#[tokio::test]
async fn patch_merges_supplied_fields_only() -> anyhow::Result<()> {
    let mut app = build_app()?;
    let (_, before) = send_json(&mut app, "GET", "/api/products/2", None).await?;
    let (status, after) = send_json(&mut app, "PATCH", "/api/products/2", Some(json!({"stock": 99, "id": 500}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["stock"], 99);
    assert_eq!(after["id"], 2);
    for key in ["name", "category", "description", "price", "image"] {
        assert_eq!(after[key], before[key], "{key} changed");
    }

    let (status, _) = send(&mut app, "PATCH", "/api/products/77", Some(json!({"stock": 1}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn wrongly_typed_fields_are_rejected_with_422() -> anyhow::Result<()> {
    let mut app = build_app()?;
    let (status, _) = send(&mut app, "POST", "/api/products", Some(json!({"name": "X", "price": "cheap"}))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&mut app, "PATCH", "/api/products/2", Some(json!({"stock": "many"}))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, list) = send_json(&mut app, "GET", "/api/products", None).await?;
    assert_eq!(list.as_array().unwrap().len(), 10);
    let (_, second) = send_json(&mut app, "GET", "/api/products/2", None).await?;
    assert_eq!(second["stock"], 5);
    Ok(())
}

#[tokio::test]
async fn exhausted_id_space_is_a_server_error() -> anyhow::Result<()> {
    let top = service::catalog::ProductInput { name: "top".into(), ..Default::default() }.into_product(u64::MAX);
    let mut app = build_app_with(vec![top])?;
    let (status, _) = send(&mut app, "POST", "/api/products", Some(json!({"name": "X"}))).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (_, list) = send_json(&mut app, "GET", "/api/products", None).await?;
    assert_eq!(list.as_array().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn delete_confirms_and_then_404s() -> anyhow::Result<()> {
    let mut app = build_app()?;
    let (status, body) = send_json(&mut app, "DELETE", "/api/products/5", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "product deleted"}));

    let (status, _) = send(&mut app, "GET", "/api/products/5", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&mut app, "DELETE", "/api/products/5", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = send_json(&mut app, "GET", "/api/products", None).await?;
    assert_eq!(list.as_array().unwrap().len(), 9);
    Ok(())
}

#[tokio::test]
async fn empty_catalog_lists_empty_array() -> anyhow::Result<()> {
    let mut app = build_app_with(Vec::new())?;
    let (status, body) = send_json(&mut app, "GET", "/api/products", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (_, created) = send_json(&mut app, "POST", "/api/products", Some(json!({}))).await?;
    assert_eq!(created["id"], 1);
    Ok(())
}

#[tokio::test]
async fn health_reports_product_count() -> anyhow::Result<()> {
    let mut app = build_app()?;
    let (status, body) = send_json(&mut app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["products"], 10);
    Ok(())
}

#[tokio::test]
async fn openapi_document_is_served() -> anyhow::Result<()> {
    let mut app = build_app()?;
    let (status, body) = send_json(&mut app, "GET", "/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/api/products/{id}").is_some());
    Ok(())
}
