// Integration tests for the REST client against the in-process stub API

mod common;

use http::StatusCode;
use panaderia_client::dtos::product::{CreateProductRequest, UpdateProductRequest};
use panaderia_client::dtos::recipe::AddIngredientRequest;
use panaderia_client::dtos::sale::{CreateSaleRequest, SaleItemRequest};
use panaderia_client::dtos::stock::{CreateStockRequest, UpdateStockRequest};
use panaderia_client::models::{MeasureUnit, SaleMode};
use panaderia_client::{ApiClient, AppError};

#[tokio::test]
async fn stock_crud_round() {
    let (url, _db) = common::spawn().await;
    let client = ApiClient::new(&url).unwrap();

    let created = client
        .create_stock_item(&CreateStockRequest {
            name: "Harina".into(),
            quantity: 50.0,
            unit: MeasureUnit::Kilogram,
        })
        .await
        .unwrap();
    assert_eq!(created.name, "Harina");

    let updated = client
        .update_stock_item(
            created.id,
            &UpdateStockRequest {
                quantity: Some(42.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.quantity, 42.0);
    assert_eq!(updated.unit, MeasureUnit::Kilogram);

    let fetched = client.get_stock_item(created.id).await.unwrap();
    assert_eq!(fetched, updated);

    // 204 No Content is a success
    client.delete_stock_item(created.id).await.unwrap();
    assert!(client.list_stock().await.unwrap().is_empty());
}

#[tokio::test]
async fn server_detail_is_surfaced_verbatim() {
    let (url, _db) = common::spawn().await;
    let client = ApiClient::new(&url).unwrap();

    match client.get_product(404).await {
        Err(AppError::Api { status, detail }) => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(detail, "Producto no encontrado");
        }
        other => panic!("expected API error, got {other:?}"),
    }

    let err = client.delete_stock_item(1).await.unwrap_err();
    assert_eq!(err.to_string(), "Item de stock no encontrado");
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn non_json_error_falls_back_to_status() {
    let (url, db) = common::spawn().await;
    db.lock().unwrap().stock_broken = true;
    let client = ApiClient::new(&url).unwrap();

    let err = client.list_stock().await.unwrap_err();
    assert_eq!(err.to_string(), "Error 500");
}

#[tokio::test]
async fn products_recipes_and_preparation() {
    let (url, _db) = common::spawn_seeded().await;
    let client = ApiClient::new(&url).unwrap();

    let product = client
        .create_product(&CreateProductRequest {
            name: "Croissants".into(),
            base_price: 720.0,
            stock_units: 0.0,
            stock_kg: 0.0,
            units_per_batch: 6.0,
            weight_per_batch_kg: 0.42,
        })
        .await
        .unwrap();

    let line = client
        .add_ingredient(
            product.id,
            &AddIngredientRequest {
                ingredient: "Harina".into(),
                quantity: 0.25,
                unit: MeasureUnit::Kilogram,
            },
        )
        .await
        .unwrap();
    assert_eq!(line.product_id, product.id);

    let missing = client
        .add_ingredient(
            product.id,
            &AddIngredientRequest {
                ingredient: "Chocolate".into(),
                quantity: 1.0,
                unit: MeasureUnit::Kilogram,
            },
        )
        .await
        .unwrap_err();
    assert!(missing.to_string().contains("Chocolate"));

    let prepared = client.prepare_recipe(product.id, 2.0).await.unwrap();
    assert_eq!(prepared.stock_units, 12.0);
    assert!((prepared.stock_kg - 0.84).abs() < 1e-9);

    let harina = client
        .list_stock()
        .await
        .unwrap()
        .into_iter()
        .find(|s| s.name == "Harina")
        .unwrap();
    assert!((harina.quantity - 499.5).abs() < 1e-9);

    let renamed = client
        .update_product(
            product.id,
            &UpdateProductRequest {
                name: Some("Croissants de manteca".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.base_price, 720.0);

    client.remove_ingredient(product.id, line.id).await.unwrap();
    assert!(client.get_product(product.id).await.unwrap().recipe.is_empty());

    client.delete_product(product.id).await.unwrap();
}

#[tokio::test]
async fn sale_creation_and_listing() {
    let (url, _db) = common::spawn_seeded().await;
    let client = ApiClient::new(&url).unwrap();
    let pan = client
        .list_products()
        .await
        .unwrap()
        .into_iter()
        .find(|p| p.name == "Pan Francés")
        .unwrap();

    let sale = client
        .create_sale(&CreateSaleRequest {
            items: vec![
                SaleItemRequest::new(pan.id, 3.0, SaleMode::ByUnit),
                SaleItemRequest::new(pan.id, 0.5, SaleMode::ByWeight),
            ],
        })
        .await
        .unwrap();
    assert!((sale.total - 1400.0).abs() < 1e-9);
    assert_eq!(sale.items.len(), 2);
    assert_eq!(sale.items[1].mode, SaleMode::ByWeight);
    assert_eq!(sale.items[1].weight_kg, Some(0.5));

    let listed = client.list_sales().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(client.get_sale(sale.id).await.unwrap().total, sale.total);
}

#[tokio::test]
async fn init_database_only_once() {
    let (url, _db) = common::spawn().await;
    let client = ApiClient::new(&url).unwrap();

    let first = client.init_database().await.unwrap();
    assert!(first.message.contains("inicializada"));

    let second = client.init_database().await.unwrap_err();
    assert_eq!(second.status(), Some(StatusCode::BAD_REQUEST));
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let client = ApiClient::new("http://127.0.0.1:9/api").unwrap();
    let err = client.list_products().await.unwrap_err();
    assert!(matches!(err, AppError::Network(_)));
}
