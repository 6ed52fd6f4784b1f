use tracing::instrument;

use crate::error::AppResult;
use crate::state::AppState;

/// Seeds an empty server database with sample stock and products, then reloads.
#[instrument(skip(state))]
pub async fn seed_database(state: &mut AppState) -> AppResult<String> {
    let seeded = state.client.init_database().await;
    let response = state.resync(seeded).await?;
    state.refresh_all().await;
    Ok(response.message)
}
