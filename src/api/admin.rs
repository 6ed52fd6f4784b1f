use tracing::{info, instrument};

use crate::api::ApiClient;
use crate::dtos::admin::MessageResponse;
use crate::error::AppResult;

impl ApiClient {
    // POST /init-database - Seed an empty database with sample data
    #[instrument(skip(self))]
    pub async fn init_database(&self) -> AppResult<MessageResponse> {
        let response: MessageResponse = self.post_empty("init-database").await?;
        info!(message = %response.message, "Database seeded");
        Ok(response)
    }
}
