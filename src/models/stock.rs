use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Unit of measure used by stock items and recipe lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasureUnit {
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "L")]
    Liter,
    #[serde(rename = "unidades")]
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Mass,
    Volume,
    Count,
}

impl MeasureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasureUnit::Kilogram => "kg",
            MeasureUnit::Gram => "g",
            MeasureUnit::Liter => "L",
            MeasureUnit::Count => "unidades",
        }
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            MeasureUnit::Kilogram | MeasureUnit::Gram => Dimension::Mass,
            MeasureUnit::Liter => Dimension::Volume,
            MeasureUnit::Count => Dimension::Count,
        }
    }

    /// Factor to the dimension's base unit (kg, L, unit).
    fn base_factor(&self) -> f64 {
        match self {
            MeasureUnit::Gram => 0.001,
            _ => 1.0,
        }
    }

    /// Converts `quantity` expressed in `self` into `target`.
    /// Returns `None` when the units measure different things.
    pub fn convert(&self, quantity: f64, target: MeasureUnit) -> Option<f64> {
        if self.dimension() != target.dimension() {
            return None;
        }
        Some(quantity * self.base_factor() / target.base_factor())
    }
}

impl fmt::Display for MeasureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasureUnit {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "kg" => Ok(MeasureUnit::Kilogram),
            "g" => Ok(MeasureUnit::Gram),
            "L" | "l" => Ok(MeasureUnit::Liter),
            "unidades" | "u" => Ok(MeasureUnit::Count),
            other => Err(AppError::validation(format!(
                "Unknown unit '{other}'. Use: kg, g, L or unidades"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "cantidad")]
    pub quantity: f64,
    #[serde(rename = "unidad")]
    pub unit: MeasureUnit,
}
