//! `panaderia` command line front end

use std::str::FromStr;

use clap::{Parser, Subcommand};

use crate::api::ApiClient;
use crate::calculator::{round_currency, PriceBreakdown};
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::models::{MeasureUnit, Product, Sale, SaleMode};
use crate::state::AppState;
use crate::views::admin::seed_database;
use crate::views::product::{IngredientDraft, ProductField, ProductForm, ProductView};
use crate::views::sale::SalesView;
use crate::views::stock::{StockDraft, StockField, StockView};
use crate::views::Confirmation;

#[derive(Debug, Parser)]
#[command(name = "panaderia", version, about = "Bakery stock, recipes and point of sale")]
pub struct Cli {
    /// Base URL of the bakery API (including /api)
    #[arg(long, env = "PANADERIA_API_URL", global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ingredient stock
    #[command(subcommand)]
    Stock(StockCommand),
    /// Products and prices
    #[command(subcommand)]
    Products(ProductCommand),
    /// Recipe lines of a product
    #[command(subcommand)]
    Recipe(RecipeCommand),
    /// Prepare batches of a product, consuming its ingredients
    Prepare { product_id: i64, batches: f64 },
    /// Record a sale, e.g. `--item 1:3 --item 2:0.5:kg`
    Sell {
        #[arg(long = "item", required = true)]
        items: Vec<SaleLineArg>,
    },
    /// Sales history
    #[command(subcommand)]
    Sales(SalesCommand),
    /// Seed an empty database with sample data
    InitDb,
}

#[derive(Debug, Subcommand)]
pub enum StockCommand {
    List,
    Add {
        name: String,
        quantity: f64,
        #[arg(default_value = "kg")]
        unit: MeasureUnit,
    },
    Set {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        quantity: Option<f64>,
        #[arg(long)]
        unit: Option<MeasureUnit>,
    },
    Delete {
        id: i64,
        #[arg(long)]
        yes: bool,
    },
}

/// Price and stock options shared by `products add` and `products set`.
/// They are applied after the batch yield, in the order listed here.
#[derive(Debug, clap::Args)]
pub struct ProductFieldArgs {
    /// Price of one whole batch
    #[arg(long)]
    pub price: Option<f64>,
    #[arg(long)]
    pub price_per_unit: Option<f64>,
    #[arg(long)]
    pub price_per_kg: Option<f64>,
    #[arg(long)]
    pub stock_units: Option<f64>,
    #[arg(long)]
    pub stock_kg: Option<f64>,
}

impl ProductFieldArgs {
    fn into_fields(self) -> Vec<ProductField> {
        let mut fields = Vec::new();
        fields.extend(self.price.map(ProductField::BasePrice));
        fields.extend(self.price_per_unit.map(ProductField::PricePerUnit));
        fields.extend(self.price_per_kg.map(ProductField::PricePerKg));
        fields.extend(self.stock_units.map(ProductField::StockUnits));
        fields.extend(self.stock_kg.map(ProductField::StockKg));
        fields
    }
}

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    List,
    Show {
        id: i64,
    },
    Add {
        name: String,
        #[arg(long)]
        units_per_batch: f64,
        #[arg(long)]
        kg_per_batch: f64,
        #[command(flatten)]
        fields: ProductFieldArgs,
    },
    Set {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        units_per_batch: Option<f64>,
        #[arg(long)]
        kg_per_batch: Option<f64>,
        #[command(flatten)]
        fields: ProductFieldArgs,
    },
    Delete {
        id: i64,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum RecipeCommand {
    Add {
        product_id: i64,
        ingredient: String,
        quantity: f64,
        #[arg(default_value = "kg")]
        unit: MeasureUnit,
    },
    Remove {
        product_id: i64,
        ingredient_id: i64,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum SalesCommand {
    List,
    Show { id: i64 },
}

/// `<product_id>:<quantity>[:kg]`
#[derive(Debug, Clone, PartialEq)]
pub struct SaleLineArg {
    pub product_id: i64,
    pub quantity: f64,
    pub mode: SaleMode,
}

impl FromStr for SaleLineArg {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || {
            AppError::validation(format!(
                "Invalid sale item '{s}', expected <product_id>:<quantity>[:kg]"
            ))
        };
        let mut parts = s.split(':');
        let product_id = parts.next().and_then(|p| p.trim().parse().ok()).ok_or_else(bad)?;
        let quantity = parts.next().and_then(|q| q.trim().parse().ok()).ok_or_else(bad)?;
        let mode = match parts.next().map(str::trim) {
            None | Some("u") | Some("unidad") => SaleMode::ByUnit,
            Some("kg") | Some("peso") => SaleMode::ByWeight,
            Some(_) => return Err(bad()),
        };
        if parts.next().is_some() {
            return Err(bad());
        }
        Ok(Self { product_id, quantity, mode })
    }
}

// ==================== Output ====================

fn money(value: f64) -> String {
    format!("${:.2}", round_currency(value))
}

fn print_product(product: &Product) {
    match PriceBreakdown::of(product) {
        Ok(p) => println!(
            "#{:<4} {:<24} batch {} | {}/u | {}/kg | {:.0} g/u | stock {} u, {:.3} kg",
            product.id,
            product.name,
            money(p.base_price),
            money(p.price_per_unit),
            money(p.price_per_kg),
            p.kg_per_unit * 1000.0,
            product.stock_units,
            product.stock_kg
        ),
        Err(e) => println!("#{:<4} {:<24} ({e})", product.id, product.name),
    }
}

fn print_sale(sale: &Sale) {
    println!(
        "Sale #{} {} total {}",
        sale.id,
        sale.timestamp.format("%Y-%m-%d %H:%M"),
        money(sale.total)
    );
    for item in &sale.items {
        match item.mode {
            SaleMode::ByUnit => println!("    {} x {} u", item.product_name, item.quantity),
            SaleMode::ByWeight => println!(
                "    {} x {:.3} kg",
                item.product_name,
                item.weight_kg.unwrap_or(item.quantity)
            ),
        }
    }
}

// ==================== Dispatch ====================

pub async fn run(cli: Cli) -> AppResult<()> {
    let config = AppConfig::from_env().with_api_url(cli.api_url);
    let client = ApiClient::from_config(&config)?;
    let mut state = AppState::new(client);

    match cli.command {
        Command::Stock(cmd) => run_stock(&mut state, cmd).await,
        Command::Products(cmd) => run_products(&mut state, cmd).await,
        Command::Recipe(cmd) => run_recipe(&mut state, cmd).await,
        Command::Prepare { product_id, batches } => {
            state.load_all().await?;
            let prepared = ProductView::new().prepare(&mut state, product_id, batches).await?;
            println!(
                "Prepared {batches} batch(es) of {}: +{} u, +{:.3} kg",
                prepared.product.name,
                prepared.output.units_produced,
                prepared.output.weight_produced_kg
            );
            print_product(&prepared.product);
            Ok(())
        }
        Command::Sell { items } => {
            state.load_products().await?;
            let mut view = SalesView::new();
            for item in &items {
                view.add_line(&state, item.product_id, item.quantity, item.mode)?;
            }
            for line in view.cart.lines() {
                let subtotal = view.cart.line_subtotal(state.products(), line)?;
                println!(
                    "{:<24} {:>8} {:<8} {}",
                    line.product_name,
                    line.quantity,
                    line.mode.unit_label(),
                    money(subtotal)
                );
            }
            let sale = view.finalize(&mut state).await?;
            print_sale(&sale);
            Ok(())
        }
        Command::Sales(SalesCommand::List) => {
            state.load_sales().await?;
            state.sales().iter().for_each(print_sale);
            Ok(())
        }
        Command::Sales(SalesCommand::Show { id }) => {
            print_sale(&state.client.get_sale(id).await?);
            Ok(())
        }
        Command::InitDb => {
            println!("{}", seed_database(&mut state).await?);
            Ok(())
        }
    }
}

async fn run_stock(state: &mut AppState, cmd: StockCommand) -> AppResult<()> {
    let mut view = StockView::new();
    match cmd {
        StockCommand::List => state.load_stock().await?,
        StockCommand::Add { name, quantity, unit } => {
            state.load_stock().await?;
            let item = view.add_item(state, StockDraft { name, quantity, unit }).await?;
            println!("Created stock item #{}", item.id);
        }
        StockCommand::Set { id, name, quantity, unit } => {
            state.load_stock().await?;
            view.start_edit(state, id)?;
            if let Some(name) = name {
                view.update_field(StockField::Name(name))?;
            }
            if let Some(quantity) = quantity {
                view.update_field(StockField::Quantity(quantity))?;
            }
            if let Some(unit) = unit {
                view.update_field(StockField::Unit(unit))?;
            }
            view.commit_edit(state).await?;
        }
        StockCommand::Delete { id, yes } => {
            state.load_all().await?;
            view.delete_item(state, id, Confirmation::from_flag(yes)).await?;
            println!("Deleted stock item #{id}");
        }
    }
    for item in state.stock() {
        println!("#{:<4} {:<20} {:>10.3} {}", item.id, item.name, item.quantity, item.unit);
    }
    Ok(())
}

async fn run_products(state: &mut AppState, cmd: ProductCommand) -> AppResult<()> {
    let mut view = ProductView::new();
    match cmd {
        ProductCommand::List => {
            state.load_products().await?;
            state.products().iter().for_each(print_product);
        }
        ProductCommand::Show { id } => {
            let product = state.client.get_product(id).await?;
            print_product(&product);
            for line in &product.recipe {
                println!("    [{}] {} {} {}", line.id, line.ingredient, line.quantity, line.unit);
            }
        }
        ProductCommand::Add {
            name,
            units_per_batch,
            kg_per_batch,
            fields,
        } => {
            let mut form = ProductForm::new(name, units_per_batch, kg_per_batch)?;
            for field in fields.into_fields() {
                form.apply(field)?;
            }
            let product = view.create_product(state, &form).await?;
            print_product(&product);
        }
        ProductCommand::Set {
            id,
            name,
            units_per_batch,
            kg_per_batch,
            fields,
        } => {
            state.load_products().await?;
            view.start_edit(state, id)?;
            let updates = name
                .map(ProductField::Name)
                .into_iter()
                .chain(units_per_batch.map(ProductField::UnitsPerBatch))
                .chain(kg_per_batch.map(ProductField::WeightPerBatchKg))
                .chain(fields.into_fields());
            for field in updates {
                view.update_field(field)?;
            }
            let product = view.commit_edit(state).await?;
            print_product(&product);
        }
        ProductCommand::Delete { id, yes } => {
            state.load_products().await?;
            view.delete_product(state, id, Confirmation::from_flag(yes)).await?;
            println!("Deleted product #{id}");
        }
    }
    Ok(())
}

async fn run_recipe(state: &mut AppState, cmd: RecipeCommand) -> AppResult<()> {
    let mut view = ProductView::new();
    state.load_all().await?;
    match cmd {
        RecipeCommand::Add { product_id, ingredient, quantity, unit } => {
            let line = view
                .add_ingredient(state, product_id, IngredientDraft { ingredient, quantity, unit })
                .await?;
            println!("Added [{}] {} {} {}", line.id, line.ingredient, line.quantity, line.unit);
        }
        RecipeCommand::Remove { product_id, ingredient_id, yes } => {
            view.remove_ingredient(state, product_id, ingredient_id, Confirmation::from_flag(yes))
                .await?;
            println!("Removed ingredient [{ingredient_id}]");
        }
    }
    Ok(())
}
