//! Cart rows and the total policy.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
}

/// One cart row joined with live product data.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub available: bool,
    pub image_path: Option<String>,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub total: Decimal,
}

impl CartView {
    pub fn new(items: Vec<CartLine>) -> Self {
        let total = cart_total(&items);
        Self { items, total }
    }
}

/// Sums quantity × price over the lines whose product is currently available.
/// Lines pointing at products that have since been switched off stay listed
/// but do not count towards the total.
pub fn cart_total(lines: &[CartLine]) -> Decimal {
    lines
        .iter()
        .filter(|line| line.available)
        .map(CartLine::line_total)
        .sum()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(price: Decimal, quantity: i32, available: bool) -> CartLine {
        CartLine {
            id: Uuid::now_v7(),
            product_id: Uuid::now_v7(),
            product_name: "Lanche".into(),
            unit_price: price,
            quantity,
            available,
            image_path: None,
        }
    }

    #[test]
    fn test_total_sums_available_lines() {
        let lines = vec![line(dec!(5.00), 3, true), line(dec!(3.50), 2, true)];
        assert_eq!(cart_total(&lines), dec!(22.00));
    }

    #[test]
    fn test_total_excludes_unavailable_products() {
        let lines = vec![line(dec!(5.00), 3, true), line(dec!(10.00), 4, false)];
        assert_eq!(cart_total(&lines), dec!(15.00));
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        assert_eq!(cart_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_view_keeps_unavailable_lines_listed() {
        let lines = vec![line(dec!(5.00), 1, true), line(dec!(2.00), 1, false)];
        let view = CartView::new(lines);
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.total, dec!(5.00));
    }
}
