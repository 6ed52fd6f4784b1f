// src/api/stock.rs
use tracing::{info, instrument};

use crate::api::ApiClient;
use crate::dtos::stock::{CreateStockRequest, UpdateStockRequest};
use crate::error::AppResult;
use crate::models::StockItem;

impl ApiClient {
    // GET /stock - List all stock items
    #[instrument(skip(self))]
    pub async fn list_stock(&self) -> AppResult<Vec<StockItem>> {
        self.get("stock").await
    }

    // GET /stock/:id - Get single stock item
    #[instrument(skip(self))]
    pub async fn get_stock_item(&self, id: i64) -> AppResult<StockItem> {
        self.get(&format!("stock/{id}")).await
    }

    // POST /stock - Create new stock item
    #[instrument(skip(self, payload), fields(name = %payload.name))]
    pub async fn create_stock_item(&self, payload: &CreateStockRequest) -> AppResult<StockItem> {
        let item: StockItem = self.post("stock", payload).await?;
        info!(id = item.id, "Stock item created");
        Ok(item)
    }

    // PUT /stock/:id - Update stock item
    #[instrument(skip(self, payload))]
    pub async fn update_stock_item(
        &self,
        id: i64,
        payload: &UpdateStockRequest,
    ) -> AppResult<StockItem> {
        self.put(&format!("stock/{id}"), payload).await
    }

    // DELETE /stock/:id - Delete stock item
    #[instrument(skip(self))]
    pub async fn delete_stock_item(&self, id: i64) -> AppResult<()> {
        self.delete(&format!("stock/{id}")).await?;
        info!(id, "Stock item deleted");
        Ok(())
    }
}
