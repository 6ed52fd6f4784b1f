// src/api/sale.rs
use tracing::{info, instrument};

use crate::api::ApiClient;
use crate::dtos::sale::CreateSaleRequest;
use crate::error::AppResult;
use crate::models::Sale;

impl ApiClient {
    // GET /ventas - List sales, newest first
    #[instrument(skip(self))]
    pub async fn list_sales(&self) -> AppResult<Vec<Sale>> {
        self.get("ventas").await
    }

    // GET /ventas/:id - Get single sale
    #[instrument(skip(self))]
    pub async fn get_sale(&self, id: i64) -> AppResult<Sale> {
        self.get(&format!("ventas/{id}")).await
    }

    // POST /ventas - Record a sale and decrement product stock
    #[instrument(skip(self, payload), fields(items = payload.items.len()))]
    pub async fn create_sale(&self, payload: &CreateSaleRequest) -> AppResult<Sale> {
        let sale: Sale = self.post("ventas", payload).await?;
        info!(id = sale.id, total = sale.total, "Sale recorded");
        Ok(sale)
    }
}
