//! Orders and the status state machine.
//!
//! `Pendente → Em Preparo → Pronto → Entregue`, with `Cancelado` reachable
//! from any non-terminal state. The first three are "active"; the last two
//! are terminal and never change again.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status")]
pub enum OrderStatus {
    #[sqlx(rename = "Pendente")]
    #[serde(rename = "Pendente")]
    Pendente,
    #[sqlx(rename = "Em Preparo")]
    #[serde(rename = "Em Preparo")]
    EmPreparo,
    #[sqlx(rename = "Pronto")]
    #[serde(rename = "Pronto")]
    Pronto,
    #[sqlx(rename = "Entregue")]
    #[serde(rename = "Entregue")]
    Entregue,
    #[sqlx(rename = "Cancelado")]
    #[serde(rename = "Cancelado")]
    Cancelado,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        Self::Pendente,
        Self::EmPreparo,
        Self::Pronto,
        Self::Entregue,
        Self::Cancelado,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pendente => "Pendente",
            Self::EmPreparo => "Em Preparo",
            Self::Pronto => "Pronto",
            Self::Entregue => "Entregue",
            Self::Cancelado => "Cancelado",
        }
    }

    /// Exact match against the fixed allow-list; anything else is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Entregue | Self::Cancelado)
    }

    pub fn is_active(self) -> bool {
        !self.is_terminal()
    }

    /// Whether an admin may move an order from `self` to `target`: forward
    /// along the preparation chain, or cancellation while non-terminal.
    pub fn can_advance_to(self, target: OrderStatus) -> bool {
        if self.is_terminal() || target == self {
            return false;
        }
        match target {
            Self::Cancelado => true,
            _ => target.chain_rank() > self.chain_rank(),
        }
    }

    fn chain_rank(self) -> u8 {
        match self {
            Self::Pendente => 0,
            Self::EmPreparo => 1,
            Self::Pronto => 2,
            Self::Entregue => 3,
            Self::Cancelado => 4,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: OrderStatus,
    /// Snapshot of the cart total at checkout; never recomputed afterwards.
    pub total: Decimal,
    pub pickup_date: NaiveDate,
    pub pickup_slot: String,
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_details: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    /// Unit price snapshotted at checkout; immutable even if the product
    /// price later changes.
    pub unit_price: Decimal,
}

/// Order line joined with the product for display. `current_price` is the
/// catalog price right now, for reference only — `unit_price` is what was
/// charged.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDetail {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub current_price: Decimal,
    pub image_path: Option<String>,
}

pub const PAYMENT_METHODS: &[&str] = &["dinheiro", "pix", "cartao"];

pub fn is_valid_payment_method(method: &str) -> bool {
    PAYMENT_METHODS.contains(&method)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub pickup_date: NaiveDate,
    pub pickup_slot: String,
    pub payment_method: String,
    /// Opaque card metadata, stored serialized when the method needs it.
    pub card_details: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_only_the_allow_list() {
        assert_eq!(OrderStatus::parse("Pendente"), Some(OrderStatus::Pendente));
        assert_eq!(OrderStatus::parse("Em Preparo"), Some(OrderStatus::EmPreparo));
        assert_eq!(OrderStatus::parse("Entregue"), Some(OrderStatus::Entregue));
        assert_eq!(OrderStatus::parse("entregue"), None);
        assert_eq!(OrderStatus::parse("Feito"), None);
        assert_eq!(OrderStatus::parse(""), None);
    }

    #[test]
    fn test_forward_chain_is_allowed() {
        use OrderStatus::*;
        assert!(Pendente.can_advance_to(EmPreparo));
        assert!(EmPreparo.can_advance_to(Pronto));
        assert!(Pronto.can_advance_to(Entregue));
        // Skipping ahead is an admin prerogative
        assert!(Pendente.can_advance_to(Entregue));
    }

    #[test]
    fn test_backward_moves_are_rejected() {
        use OrderStatus::*;
        assert!(!EmPreparo.can_advance_to(Pendente));
        assert!(!Pronto.can_advance_to(EmPreparo));
        assert!(!Entregue.can_advance_to(Pronto));
    }

    #[test]
    fn test_cancel_from_any_active_state() {
        use OrderStatus::*;
        assert!(Pendente.can_advance_to(Cancelado));
        assert!(EmPreparo.can_advance_to(Cancelado));
        assert!(Pronto.can_advance_to(Cancelado));
    }

    #[test]
    fn test_terminal_states_never_change() {
        use OrderStatus::*;
        for target in OrderStatus::ALL {
            assert!(!Entregue.can_advance_to(target), "Entregue -> {target}");
            assert!(!Cancelado.can_advance_to(target), "Cancelado -> {target}");
        }
    }

    #[test]
    fn test_self_transition_is_rejected() {
        for status in OrderStatus::ALL {
            assert!(!status.can_advance_to(status));
        }
    }

    #[test]
    fn test_active_partition() {
        use OrderStatus::*;
        assert!(Pendente.is_active());
        assert!(EmPreparo.is_active());
        assert!(Pronto.is_active());
        assert!(!Entregue.is_active());
        assert!(!Cancelado.is_active());
    }

    #[test]
    fn test_payment_method_allow_list() {
        assert!(is_valid_payment_method("pix"));
        assert!(is_valid_payment_method("dinheiro"));
        assert!(!is_valid_payment_method("cheque"));
        assert!(!is_valid_payment_method(""));
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&OrderStatus::EmPreparo).unwrap();
        assert_eq!(json, "\"Em Preparo\"");
        let back: OrderStatus = serde_json::from_str("\"Em Preparo\"").unwrap();
        assert_eq!(back, OrderStatus::EmPreparo);
    }
}
