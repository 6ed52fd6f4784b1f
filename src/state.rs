// src/state.rs
use tracing::{error, info};

use crate::api::ApiClient;
use crate::error::{AppError, AppResult};
use crate::models::{Product, Sale, StockItem};

/// Owns the API client and the single in-memory copy of each collection.
/// Views receive it by reference; collections are re-fetched after mutations.
#[derive(Debug, Clone)]
pub struct AppState {
    pub client: ApiClient,
    stock: Vec<StockItem>,
    products: Vec<Product>,
    sales: Vec<Sale>,
}

impl AppState {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            stock: Vec::new(),
            products: Vec::new(),
            sales: Vec::new(),
        }
    }

    pub fn stock(&self) -> &[StockItem] {
        &self.stock
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    // ==================== Loading ====================

    /// On failure the previously loaded list is kept.
    pub async fn load_stock(&mut self) -> AppResult<()> {
        match self.client.list_stock().await {
            Ok(items) => {
                info!(count = items.len(), "Stock loaded");
                self.stock = items;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to load stock");
                Err(e)
            }
        }
    }

    pub async fn load_products(&mut self) -> AppResult<()> {
        match self.client.list_products().await {
            Ok(products) => {
                info!(count = products.len(), "Products loaded");
                self.products = products;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to load products");
                Err(e)
            }
        }
    }

    pub async fn load_sales(&mut self) -> AppResult<()> {
        match self.client.list_sales().await {
            Ok(sales) => {
                info!(count = sales.len(), "Sales loaded");
                self.sales = sales;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to load sales");
                Err(e)
            }
        }
    }

    pub async fn load_all(&mut self) -> AppResult<()> {
        self.load_stock().await?;
        self.load_products().await?;
        self.load_sales().await
    }

    // ==================== Refresh after a committed mutation ====================
    //
    // The server has already applied the change, so a failed reload must not
    // turn into an error for it. The loader logs the failure and keeps the
    // previous list.

    pub async fn refresh_stock(&mut self) {
        let _ = self.load_stock().await;
    }

    pub async fn refresh_products(&mut self) {
        let _ = self.load_products().await;
    }

    pub async fn refresh_sales(&mut self) {
        let _ = self.load_sales().await;
    }

    pub async fn refresh_all(&mut self) {
        self.refresh_stock().await;
        self.refresh_products().await;
        self.refresh_sales().await;
    }

    /// Best-effort resync after a failed mutation; a reload failure is only logged.
    pub async fn resync<T>(&mut self, result: AppResult<T>) -> AppResult<T> {
        if let Err(AppError::Api { .. }) = &result {
            self.refresh_all().await;
        }
        result
    }

    // ==================== Lookups ====================

    pub fn stock_item(&self, id: i64) -> AppResult<&StockItem> {
        self.stock
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::not_found(format!("Stock item {id} not found")))
    }

    pub fn stock_item_by_name(&self, name: &str) -> Option<&StockItem> {
        let name = name.trim();
        self.stock.iter().find(|s| s.name == name)
    }

    pub fn product(&self, id: i64) -> AppResult<&Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found(format!("Product {id} not found")))
    }

    /// Replaces one product with a fresh server copy, appending it if unknown.
    pub fn replace_product(&mut self, product: Product) {
        match self.products.iter_mut().find(|p| p.id == product.id) {
            Some(slot) => *slot = product,
            None => self.products.push(product),
        }
    }
}

#[cfg(test)]
impl AppState {
    /// State preloaded with fixed collections, for view tests that never hit the network.
    pub(crate) fn with_collections(
        stock: Vec<StockItem>,
        products: Vec<Product>,
        sales: Vec<Sale>,
    ) -> Self {
        let client = ApiClient::new("http://127.0.0.1:9/api").expect("client");
        Self {
            client,
            stock,
            products,
            sales,
        }
    }
}
