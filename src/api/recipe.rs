// src/api/recipe.rs
use tracing::{info, instrument};

use crate::api::ApiClient;
use crate::dtos::recipe::{AddIngredientRequest, PrepareRecipeRequest};
use crate::error::AppResult;
use crate::models::{Product, RecipeIngredient};

impl ApiClient {
    // POST /productos/:id/receta - Add ingredient line to a recipe
    #[instrument(skip(self, payload), fields(ingredient = %payload.ingredient))]
    pub async fn add_ingredient(
        &self,
        product_id: i64,
        payload: &AddIngredientRequest,
    ) -> AppResult<RecipeIngredient> {
        self.post(&format!("productos/{product_id}/receta"), payload).await
    }

    // DELETE /productos/:id/receta/:ingredient_id - Remove ingredient line
    #[instrument(skip(self))]
    pub async fn remove_ingredient(&self, product_id: i64, ingredient_id: i64) -> AppResult<()> {
        self.delete(&format!("productos/{product_id}/receta/{ingredient_id}"))
            .await
    }

    // POST /productos/:id/preparar - Prepare batches; returns the restocked product
    #[instrument(skip(self))]
    pub async fn prepare_recipe(&self, product_id: i64, batches: f64) -> AppResult<Product> {
        let product: Product = self
            .post(
                &format!("productos/{product_id}/preparar"),
                &PrepareRecipeRequest { batches },
            )
            .await?;
        info!(
            product_id,
            batches,
            stock_units = product.stock_units,
            stock_kg = product.stock_kg,
            "Recipe prepared"
        );
        Ok(product)
    }
}
