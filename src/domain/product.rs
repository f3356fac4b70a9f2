//! Catalog items.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub available: bool,
    /// `None` means stock is not tracked for this item.
    pub stock: Option<i32>,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(custom = "positive_price")]
    pub price: Decimal,
    pub available: Option<bool>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    pub image_path: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    #[validate(custom = "positive_price")]
    pub price: Option<Decimal>,
    pub available: Option<bool>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    pub image_path: Option<String>,
}

fn positive_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_positive() && !price.is_zero() {
        Ok(())
    } else {
        Err(ValidationError::new("price_not_positive"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_must_be_positive() {
        let base = CreateProductRequest {
            name: "Coxinha".into(),
            price: dec!(5.00),
            available: None,
            stock: None,
            image_path: None,
        };
        assert!(base.validate().is_ok());

        let zero = CreateProductRequest { price: dec!(0), ..base };
        assert!(zero.validate().is_err());

        let negative = CreateProductRequest {
            name: "Coxinha".into(),
            price: dec!(-1.50),
            available: None,
            stock: None,
            image_path: None,
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_stock_cannot_be_negative() {
        let req = CreateProductRequest {
            name: "Suco".into(),
            price: dec!(3.50),
            available: Some(true),
            stock: Some(-2),
            image_path: None,
        };
        assert!(req.validate().is_err());
    }
}
