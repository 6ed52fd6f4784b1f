// In-memory stand-in for the bakery API, served by axum on a random port.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use panaderia_client::dtos::admin::MessageResponse;
use panaderia_client::dtos::product::{CreateProductRequest, UpdateProductRequest};
use panaderia_client::dtos::recipe::{AddIngredientRequest, PrepareRecipeRequest};
use panaderia_client::dtos::sale::CreateSaleRequest;
use panaderia_client::dtos::stock::{CreateStockRequest, UpdateStockRequest};
use panaderia_client::models::{
    MeasureUnit, Product, RecipeIngredient, Sale, SaleItem, SaleMode, StockItem,
};
use serde_json::json;
use tokio::net::TcpListener;

#[derive(Debug, Default)]
pub struct Db {
    pub stock: Vec<StockItem>,
    pub products: Vec<Product>,
    pub sales: Vec<Sale>,
    next_id: i64,
    /// When set, GET /stock answers 500 with a non-JSON body
    pub stock_broken: bool,
}

impl Db {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

pub type Shared = Arc<Mutex<Db>>;

// ==================== Errors ====================

pub struct StubError(StatusCode, String);

impl StubError {
    fn not_found(msg: impl Into<String>) -> Self {
        StubError(StatusCode::NOT_FOUND, msg.into())
    }

    fn bad_request(msg: impl Into<String>) -> Self {
        StubError(StatusCode::BAD_REQUEST, msg.into())
    }
}

impl IntoResponse for StubError {
    fn into_response(self) -> Response {
        (self.0, Json(json!({ "detail": self.1 }))).into_response()
    }
}

type StubResult<T> = Result<T, StubError>;

// ==================== Stock ====================

async fn list_stock(State(db): State<Shared>) -> Response {
    let db = db.lock().unwrap();
    if db.stock_broken {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    Json(db.stock.clone()).into_response()
}

async fn get_stock(State(db): State<Shared>, Path(id): Path<i64>) -> StubResult<Json<StockItem>> {
    let db = db.lock().unwrap();
    db.stock
        .iter()
        .find(|s| s.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| StubError::not_found("Item de stock no encontrado"))
}

async fn create_stock(
    State(db): State<Shared>,
    Json(req): Json<CreateStockRequest>,
) -> StubResult<(StatusCode, Json<StockItem>)> {
    let mut db = db.lock().unwrap();
    if db.stock.iter().any(|s| s.name == req.name) {
        return Err(StubError::bad_request("Ya existe un item con ese nombre"));
    }
    let item = StockItem {
        id: db.next_id(),
        name: req.name,
        quantity: req.quantity,
        unit: req.unit,
    };
    db.stock.push(item.clone());
    Ok((StatusCode::CREATED, Json(item)))
}

async fn update_stock(
    State(db): State<Shared>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateStockRequest>,
) -> StubResult<Json<StockItem>> {
    let mut db = db.lock().unwrap();
    let item = db
        .stock
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or_else(|| StubError::not_found("Item de stock no encontrado"))?;
    if let Some(name) = req.name {
        item.name = name;
    }
    if let Some(quantity) = req.quantity {
        item.quantity = quantity;
    }
    if let Some(unit) = req.unit {
        item.unit = unit;
    }
    Ok(Json(item.clone()))
}

async fn delete_stock(State(db): State<Shared>, Path(id): Path<i64>) -> StubResult<StatusCode> {
    let mut db = db.lock().unwrap();
    let before = db.stock.len();
    db.stock.retain(|s| s.id != id);
    if db.stock.len() == before {
        return Err(StubError::not_found("Item de stock no encontrado"));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ==================== Products ====================

async fn list_products(State(db): State<Shared>) -> Json<Vec<Product>> {
    Json(db.lock().unwrap().products.clone())
}

async fn get_product(State(db): State<Shared>, Path(id): Path<i64>) -> StubResult<Json<Product>> {
    let db = db.lock().unwrap();
    db.products
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| StubError::not_found("Producto no encontrado"))
}

async fn create_product(
    State(db): State<Shared>,
    Json(req): Json<CreateProductRequest>,
) -> (StatusCode, Json<Product>) {
    let mut db = db.lock().unwrap();
    let product = Product {
        id: db.next_id(),
        name: req.name,
        base_price: req.base_price,
        stock_units: req.stock_units,
        stock_kg: req.stock_kg,
        units_per_batch: req.units_per_batch,
        weight_per_batch_kg: req.weight_per_batch_kg,
        recipe: vec![],
    };
    db.products.push(product.clone());
    (StatusCode::CREATED, Json(product))
}

async fn update_product(
    State(db): State<Shared>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateProductRequest>,
) -> StubResult<Json<Product>> {
    let mut db = db.lock().unwrap();
    let p = db
        .products
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| StubError::not_found("Producto no encontrado"))?;
    if let Some(v) = req.name {
        p.name = v;
    }
    if let Some(v) = req.base_price {
        p.base_price = v;
    }
    if let Some(v) = req.stock_units {
        p.stock_units = v;
    }
    if let Some(v) = req.stock_kg {
        p.stock_kg = v;
    }
    if let Some(v) = req.units_per_batch {
        p.units_per_batch = v;
    }
    if let Some(v) = req.weight_per_batch_kg {
        p.weight_per_batch_kg = v;
    }
    Ok(Json(p.clone()))
}

async fn delete_product(State(db): State<Shared>, Path(id): Path<i64>) -> StubResult<StatusCode> {
    let mut db = db.lock().unwrap();
    let before = db.products.len();
    db.products.retain(|p| p.id != id);
    if db.products.len() == before {
        return Err(StubError::not_found("Producto no encontrado"));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ==================== Recipes ====================

async fn add_ingredient(
    State(db): State<Shared>,
    Path(id): Path<i64>,
    Json(req): Json<AddIngredientRequest>,
) -> StubResult<(StatusCode, Json<RecipeIngredient>)> {
    let mut db = db.lock().unwrap();
    if !db.products.iter().any(|p| p.id == id) {
        return Err(StubError::not_found("Producto no encontrado"));
    }
    if !db.stock.iter().any(|s| s.name == req.ingredient) {
        return Err(StubError::not_found(format!(
            "El ingrediente '{}' no existe en el stock",
            req.ingredient
        )));
    }
    let line = RecipeIngredient {
        id: db.next_id(),
        product_id: id,
        ingredient: req.ingredient,
        quantity: req.quantity,
        unit: req.unit,
    };
    let product = db.products.iter_mut().find(|p| p.id == id).unwrap();
    product.recipe.push(line.clone());
    Ok((StatusCode::CREATED, Json(line)))
}

async fn remove_ingredient(
    State(db): State<Shared>,
    Path((id, ingredient_id)): Path<(i64, i64)>,
) -> StubResult<StatusCode> {
    let mut db = db.lock().unwrap();
    let product = db
        .products
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| StubError::not_found("Ingrediente de receta no encontrado"))?;
    let before = product.recipe.len();
    product.recipe.retain(|r| r.id != ingredient_id);
    if product.recipe.len() == before {
        return Err(StubError::not_found("Ingrediente de receta no encontrado"));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn prepare(
    State(db): State<Shared>,
    Path(id): Path<i64>,
    Json(req): Json<PrepareRecipeRequest>,
) -> StubResult<Json<Product>> {
    let mut db = db.lock().unwrap();
    let Db { stock, products, .. } = &mut *db;
    let product = products
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| StubError::not_found("Producto no encontrado"))?;
    if product.recipe.is_empty() {
        return Err(StubError::bad_request("Este producto no tiene receta definida"));
    }
    for line in &product.recipe {
        let item = stock
            .iter()
            .find(|s| s.name == line.ingredient)
            .ok_or_else(|| StubError::not_found("Ingrediente no existe"))?;
        if item.quantity < line.quantity * req.batches {
            return Err(StubError::bad_request(format!("No hay suficiente {}", line.ingredient)));
        }
    }
    for line in &product.recipe {
        if let Some(item) = stock.iter_mut().find(|s| s.name == line.ingredient) {
            item.quantity -= line.quantity * req.batches;
        }
    }
    product.stock_units += product.units_per_batch * req.batches;
    product.stock_kg += product.weight_per_batch_kg * req.batches;
    Ok(Json(product.clone()))
}

// ==================== Sales ====================

async fn list_sales(State(db): State<Shared>) -> Json<Vec<Sale>> {
    let mut sales = db.lock().unwrap().sales.clone();
    sales.reverse();
    Json(sales)
}

async fn get_sale(State(db): State<Shared>, Path(id): Path<i64>) -> StubResult<Json<Sale>> {
    let db = db.lock().unwrap();
    db.sales
        .iter()
        .find(|s| s.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| StubError::not_found("Venta no encontrada"))
}

async fn create_sale(
    State(db): State<Shared>,
    Json(req): Json<CreateSaleRequest>,
) -> StubResult<(StatusCode, Json<Sale>)> {
    let mut db = db.lock().unwrap();
    if req.items.is_empty() {
        return Err(StubError::bad_request("La venta debe tener al menos un item"));
    }
    let sale_id = db.next_id();
    let mut total = 0.0;
    let mut items = Vec::new();
    let mut deductions = Vec::new();

    for item in &req.items {
        let p = db
            .products
            .iter()
            .find(|p| p.id == item.product_id)
            .ok_or_else(|| {
                StubError::not_found(format!(
                    "Producto con id {} no encontrado",
                    item.product_id
                ))
            })?;
        let kg_per_unit = p.weight_per_batch_kg / p.units_per_batch;
        let short = || StubError::bad_request(format!("No hay suficiente stock de {}", p.name));
        let (units, kg, subtotal) = match item.mode {
            SaleMode::ByUnit => {
                if p.stock_units < item.quantity {
                    return Err(short());
                }
                let price = p.base_price / p.units_per_batch * item.quantity;
                (item.quantity, item.quantity * kg_per_unit, price)
            }
            SaleMode::ByWeight => {
                let kg = item.weight_kg.unwrap_or(item.quantity);
                if p.stock_kg < kg {
                    return Err(short());
                }
                (kg / kg_per_unit, kg, p.base_price / p.weight_per_batch_kg * kg)
            }
        };
        total += subtotal;
        deductions.push((p.id, units, kg));
        items.push(SaleItem {
            id: sale_id * 100 + items.len() as i64,
            sale_id,
            product_id: p.id,
            product_name: p.name.clone(),
            product_price: p.base_price,
            quantity: item.quantity,
            mode: item.mode,
            weight_kg: item.weight_kg,
        });
    }

    for (id, units, kg) in deductions {
        if let Some(p) = db.products.iter_mut().find(|p| p.id == id) {
            p.stock_units -= units;
            p.stock_kg -= kg;
        }
    }

    let sale = Sale {
        id: sale_id,
        timestamp: chrono::Local::now().naive_local(),
        total,
        items,
    };
    db.sales.push(sale.clone());
    Ok((StatusCode::CREATED, Json(sale)))
}

// ==================== Admin ====================

async fn init_database(State(db): State<Shared>) -> StubResult<Json<MessageResponse>> {
    let mut db = db.lock().unwrap();
    if !db.stock.is_empty() {
        return Err(StubError::bad_request("La base de datos ya tiene datos"));
    }
    seed(&mut db);
    Ok(Json(MessageResponse {
        message: "Base de datos inicializada correctamente".into(),
    }))
}

/// Harina 500 kg, Agua 1000 L; Pan Francés (1600 per batch of 8 u / 1 kg)
/// with 0.5 kg Harina + 0.3 L Agua per batch; Medialunas (960 per 12 u / 0.24 kg), no recipe.
pub fn seed(db: &mut Db) {
    let harina = db.next_id();
    let agua = db.next_id();
    db.stock = vec![
        StockItem {
            id: harina,
            name: "Harina".into(),
            quantity: 500.0,
            unit: MeasureUnit::Kilogram,
        },
        StockItem {
            id: agua,
            name: "Agua".into(),
            quantity: 1000.0,
            unit: MeasureUnit::Liter,
        },
    ];

    let pan = db.next_id();
    let r1 = db.next_id();
    let r2 = db.next_id();
    let medialunas = db.next_id();
    db.products = vec![
        Product {
            id: pan,
            name: "Pan Francés".into(),
            base_price: 1600.0,
            stock_units: 50.0,
            stock_kg: 6.25,
            units_per_batch: 8.0,
            weight_per_batch_kg: 1.0,
            recipe: vec![
                RecipeIngredient {
                    id: r1,
                    product_id: pan,
                    ingredient: "Harina".into(),
                    quantity: 0.5,
                    unit: MeasureUnit::Kilogram,
                },
                RecipeIngredient {
                    id: r2,
                    product_id: pan,
                    ingredient: "Agua".into(),
                    quantity: 0.3,
                    unit: MeasureUnit::Liter,
                },
            ],
        },
        Product {
            id: medialunas,
            name: "Medialunas".into(),
            base_price: 960.0,
            stock_units: 100.0,
            stock_kg: 2.0,
            units_per_batch: 12.0,
            weight_per_batch_kg: 0.24,
            recipe: vec![],
        },
    ];
}

pub fn routes() -> Router<Shared> {
    Router::new()
        .route("/stock", get(list_stock).post(create_stock))
        .route("/stock/{id}", get(get_stock).put(update_stock).delete(delete_stock))
        .route("/productos", get(list_products).post(create_product))
        .route("/productos/{id}", get(get_product).put(update_product).delete(delete_product))
        .route("/productos/{id}/receta", post(add_ingredient))
        .route("/productos/{id}/receta/{ingredient_id}", delete(remove_ingredient))
        .route("/productos/{id}/preparar", post(prepare))
        .route("/ventas", get(list_sales).post(create_sale))
        .route("/ventas/{id}", get(get_sale))
        .route("/init-database", post(init_database))
}

/// Starts the stub and returns its `/api` base URL and a handle to its data.
pub async fn spawn() -> (String, Shared) {
    let db: Shared = Arc::default();
    let app = Router::new().nest("/api", routes()).with_state(db.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/api"), db)
}

/// Stub already holding the seed data.
pub async fn spawn_seeded() -> (String, Shared) {
    let (url, db) = spawn().await;
    seed(&mut db.lock().unwrap());
    (url, db)
}
