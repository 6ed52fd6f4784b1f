// src/views/sale.rs
use tracing::{info, instrument};

use crate::calculator::{self, available_stock, convert_units_to_weight, convert_weight_to_units};
use crate::dtos::sale::{CreateSaleRequest, SaleItemRequest};
use crate::error::{AppError, AppResult};
use crate::models::{Product, Sale, SaleMode};
use crate::state::AppState;

/// One product line of the sale being built.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: f64,
    pub mode: SaleMode,
}

/// Sale being built at the counter.
///
/// A line is keyed by product and sale mode. Every add or modify is checked
/// against the product's stock in the line's mode (units or kg), counting
/// what the other lines of the same product already take; a rejected change
/// leaves the lines as they were.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaleCart {
    lines: Vec<CartLine>,
}

fn validate_quantity(quantity: f64, mode: SaleMode) -> AppResult<f64> {
    if !(quantity.is_finite() && quantity > 0.0) {
        return Err(AppError::validation("Quantity must be greater than 0"));
    }
    if mode == SaleMode::ByUnit && quantity.fract() != 0.0 {
        return Err(AppError::validation("Unit sales take whole quantities"));
    }
    Ok(quantity)
}

fn find_product(products: &[Product], product_id: i64) -> AppResult<&Product> {
    products
        .iter()
        .find(|p| p.id == product_id)
        .ok_or_else(|| AppError::not_found(format!("Product {product_id} not found")))
}

impl SaleCart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, product_id: i64, mode: SaleMode) -> Option<usize> {
        self.lines
            .iter()
            .position(|l| l.product_id == product_id && l.mode == mode)
    }

    /// Stock needed, in `mode` units, if the `(product, mode)` line held
    /// `quantity`; lines of the product in the other mode are converted.
    fn demand(&self, product: &Product, mode: SaleMode, quantity: f64) -> AppResult<f64> {
        let mut total = quantity;
        for line in self.lines.iter().filter(|l| l.product_id == product.id) {
            if line.mode == mode {
                continue;
            }
            total += match mode {
                SaleMode::ByUnit => convert_weight_to_units(line.quantity, product)?,
                SaleMode::ByWeight => convert_units_to_weight(line.quantity, product)?,
            };
        }
        Ok(total)
    }

    fn check_stock(&self, product: &Product, mode: SaleMode, quantity: f64) -> AppResult<()> {
        let requested = self.demand(product, mode, quantity)?;
        let available = available_stock(product, mode);
        if requested > available + 1e-9 {
            return Err(AppError::insufficient_stock(
                product.name.clone(),
                available,
                requested,
                mode.unit_label(),
            ));
        }
        Ok(())
    }

    /// Adds a line, merging with an existing line of the same product and mode.
    pub fn add_line(
        &mut self,
        products: &[Product],
        product_id: i64,
        quantity: f64,
        mode: SaleMode,
    ) -> AppResult<()> {
        let quantity = validate_quantity(quantity, mode)?;
        let product = find_product(products, product_id)?;
        // price must be derivable before the line is admitted
        calculator::subtotal(product, quantity, mode)?;

        let existing = self.position(product_id, mode);
        let merged = quantity + existing.map_or(0.0, |i| self.lines[i].quantity);
        self.check_stock(product, mode, merged)?;

        match existing {
            Some(i) => self.lines[i].quantity = merged,
            None => self.lines.push(CartLine {
                product_id,
                product_name: product.name.clone(),
                quantity,
                mode,
            }),
        }
        Ok(())
    }

    pub fn modify_quantity(
        &mut self,
        products: &[Product],
        product_id: i64,
        mode: SaleMode,
        quantity: f64,
    ) -> AppResult<()> {
        let index = self
            .position(product_id, mode)
            .ok_or_else(|| AppError::not_found("Product is not in the sale"))?;
        let quantity = validate_quantity(quantity, mode)?;
        let product = find_product(products, product_id)?;
        self.check_stock(product, mode, quantity)?;
        self.lines[index].quantity = quantity;
        Ok(())
    }

    pub fn remove_line(&mut self, product_id: i64, mode: SaleMode) -> AppResult<CartLine> {
        let index = self
            .position(product_id, mode)
            .ok_or_else(|| AppError::not_found("Product is not in the sale"))?;
        Ok(self.lines.remove(index))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn line_subtotal(&self, products: &[Product], line: &CartLine) -> AppResult<f64> {
        calculator::subtotal(find_product(products, line.product_id)?, line.quantity, line.mode)
    }

    pub fn total(&self, products: &[Product]) -> AppResult<f64> {
        self.lines
            .iter()
            .map(|line| self.line_subtotal(products, line))
            .sum()
    }

    /// Re-checks every line against `products` (e.g. freshly loaded) and builds the request.
    pub fn to_request(&self, products: &[Product]) -> AppResult<CreateSaleRequest> {
        if self.lines.is_empty() {
            return Err(AppError::validation("Add products to the sale"));
        }
        for line in &self.lines {
            let product = find_product(products, line.product_id)?;
            self.check_stock(product, line.mode, line.quantity)?;
        }
        Ok(CreateSaleRequest {
            items: self
                .lines
                .iter()
                .map(|l| SaleItemRequest::new(l.product_id, l.quantity, l.mode))
                .collect(),
        })
    }
}

#[derive(Debug, Default)]
pub struct SalesView {
    pub cart: SaleCart,
}

impl SalesView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_line(
        &mut self,
        state: &AppState,
        product_id: i64,
        quantity: f64,
        mode: SaleMode,
    ) -> AppResult<()> {
        self.cart.add_line(state.products(), product_id, quantity, mode)
    }

    pub fn modify_quantity(
        &mut self,
        state: &AppState,
        product_id: i64,
        mode: SaleMode,
        quantity: f64,
    ) -> AppResult<()> {
        self.cart.modify_quantity(state.products(), product_id, mode, quantity)
    }

    pub fn total(&self, state: &AppState) -> AppResult<f64> {
        self.cart.total(state.products())
    }

    pub fn cancel(&mut self) {
        self.cart.clear();
    }

    /// Posts the cart as one sale. The cart is kept if the server rejects it.
    #[instrument(skip(self, state), fields(lines = self.cart.lines().len()))]
    pub async fn finalize(&mut self, state: &mut AppState) -> AppResult<Sale> {
        let payload = self.cart.to_request(state.products())?;
        let local_total = self.total(state)?;

        let created = state.client.create_sale(&payload).await;
        let sale = state.resync(created).await?;
        info!(
            id = sale.id,
            total = sale.total,
            local_total = calculator::round_currency(local_total),
            "Sale finalized"
        );

        self.cart.clear();
        state.refresh_products().await;
        state.refresh_sales().await;
        Ok(sale)
    }

    pub fn history<'a>(&self, state: &'a AppState) -> &'a [Sale] {
        state.sales()
    }
}
