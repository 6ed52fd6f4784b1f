// src/api/product.rs
use tracing::{info, instrument};

use crate::api::ApiClient;
use crate::dtos::product::{CreateProductRequest, UpdateProductRequest};
use crate::error::AppResult;
use crate::models::Product;

impl ApiClient {
    // GET /productos - List all products with their recipes
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> AppResult<Vec<Product>> {
        self.get("productos").await
    }

    // GET /productos/:id - Get single product
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i64) -> AppResult<Product> {
        self.get(&format!("productos/{id}")).await
    }

    // POST /productos - Create new product
    #[instrument(skip(self, payload), fields(name = %payload.name))]
    pub async fn create_product(&self, payload: &CreateProductRequest) -> AppResult<Product> {
        let product: Product = self.post("productos", payload).await?;
        info!(id = product.id, "Product created");
        Ok(product)
    }

    // PUT /productos/:id - Update product
    #[instrument(skip(self, payload))]
    pub async fn update_product(
        &self,
        id: i64,
        payload: &UpdateProductRequest,
    ) -> AppResult<Product> {
        self.put(&format!("productos/{id}"), payload).await
    }

    // DELETE /productos/:id - Delete product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> AppResult<()> {
        self.delete(&format!("productos/{id}")).await?;
        info!(id, "Product deleted");
        Ok(())
    }
}
