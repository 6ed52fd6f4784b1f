// src/views/stock.rs
use tracing::{info, instrument, warn};

use crate::calculator::ensure_amount;
use crate::dtos::stock::{CreateStockRequest, UpdateStockRequest};
use crate::error::{AppError, AppResult};
use crate::models::{MeasureUnit, StockItem};
use crate::state::AppState;
use crate::views::edit::EditSession;
use crate::views::{required_name, Confirmation};

/// New stock item form.
#[derive(Debug, Clone, PartialEq)]
pub struct StockDraft {
    pub name: String,
    pub quantity: f64,
    pub unit: MeasureUnit,
}

impl Default for StockDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            quantity: 0.0,
            unit: MeasureUnit::Kilogram,
        }
    }
}

/// One field change of the stock item being edited.
#[derive(Debug, Clone, PartialEq)]
pub enum StockField {
    Name(String),
    Quantity(f64),
    Unit(MeasureUnit),
}

#[derive(Debug, Default)]
pub struct StockView {
    editing: Option<EditSession<StockItem>>,
}

impl StockView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editing(&self) -> Option<&EditSession<StockItem>> {
        self.editing.as_ref()
    }

    pub fn validate_new(state: &AppState, draft: &StockDraft) -> AppResult<CreateStockRequest> {
        let name = required_name(&draft.name, "Item name")?;
        if state.stock_item_by_name(&name).is_some() {
            return Err(AppError::validation(format!(
                "A stock item named '{name}' already exists"
            )));
        }
        Ok(CreateStockRequest {
            name,
            quantity: ensure_amount(draft.quantity, "Quantity")?,
            unit: draft.unit,
        })
    }

    #[instrument(skip(self, state, draft), fields(name = %draft.name))]
    pub async fn add_item(
        &mut self,
        state: &mut AppState,
        draft: StockDraft,
    ) -> AppResult<StockItem> {
        let payload = Self::validate_new(state, &draft)?;
        let created = state.client.create_stock_item(&payload).await;
        let item = state.resync(created).await?;
        state.refresh_stock().await;
        Ok(item)
    }

    // ==================== Editing ====================

    pub fn start_edit(&mut self, state: &AppState, id: i64) -> AppResult<()> {
        let item = state.stock_item(id)?.clone();
        self.editing = Some(EditSession::start(id, item));
        Ok(())
    }

    pub fn update_field(&mut self, field: StockField) -> AppResult<()> {
        let session = self
            .editing
            .as_mut()
            .ok_or_else(|| AppError::validation("No stock item is being edited"))?;

        session.apply(|item| {
            match field {
                StockField::Name(name) => item.name = required_name(&name, "Item name")?,
                StockField::Quantity(q) => item.quantity = ensure_amount(q, "Quantity")?,
                StockField::Unit(unit) => item.unit = unit,
            }
            Ok(())
        })
    }

    /// Sends only the changed fields. The session stays open if the call fails.
    #[instrument(skip(self, state))]
    pub async fn commit_edit(&mut self, state: &mut AppState) -> AppResult<StockItem> {
        let session = self
            .editing
            .as_ref()
            .ok_or_else(|| AppError::validation("No stock item is being edited"))?;

        let payload = changed_fields(session.original(), session.draft());
        if payload.is_empty() {
            let unchanged = session.original().clone();
            self.editing = None;
            return Ok(unchanged);
        }

        if let Some(name) = &payload.name {
            let clash = state
                .stock()
                .iter()
                .any(|s| s.id != session.id() && &s.name == name);
            if clash {
                return Err(AppError::validation(format!(
                    "A stock item named '{name}' already exists"
                )));
            }
        }

        let id = session.id();
        let updated = state.client.update_stock_item(id, &payload).await;
        let item = state.resync(updated).await?;
        self.editing = None;
        info!(id, quantity = item.quantity, "Stock item updated");
        state.refresh_stock().await;
        Ok(item)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    #[instrument(skip(self, state))]
    pub async fn delete_item(
        &mut self,
        state: &mut AppState,
        id: i64,
        confirmation: Confirmation,
    ) -> AppResult<()> {
        let name = state.stock_item(id)?.name.clone();
        confirmation.require(&format!("Deleting '{name}'"))?;

        let used_by: Vec<&str> = state
            .products()
            .iter()
            .filter(|p| p.recipe.iter().any(|r| r.ingredient == name))
            .map(|p| p.name.as_str())
            .collect();
        if !used_by.is_empty() {
            warn!(%name, products = ?used_by, "Deleting a stock item still used by recipes");
        }

        let deleted = state.client.delete_stock_item(id).await;
        state.resync(deleted).await?;
        if self.editing.as_ref().map(|s| s.id()) == Some(id) {
            self.editing = None;
        }
        state.refresh_stock().await;
        Ok(())
    }
}

fn changed_fields(original: &StockItem, draft: &StockItem) -> UpdateStockRequest {
    UpdateStockRequest {
        name: (original.name != draft.name).then(|| draft.name.clone()),
        quantity: (original.quantity != draft.quantity).then_some(draft.quantity),
        unit: (original.unit != draft.unit).then_some(draft.unit),
    }
}
