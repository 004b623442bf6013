//! Order-confirmation request validation.

use rust_decimal::Decimal;
use serde::Deserialize;
use sky_brasil_core::Email;

use super::{ErrorList, FieldError, checked_text};

/// Raw confirmation request body.
#[derive(Debug, Deserialize)]
pub struct RawConfirmationRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "orderId", default)]
    pub order_id: String,
    /// Order total in major units (e.g. 2.50).
    #[serde(default)]
    pub total: Decimal,
    #[serde(default)]
    pub items: Vec<RawConfirmationItem>,
}

#[derive(Debug, Deserialize)]
pub struct RawConfirmationItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: i64,
    /// Unit price in major units.
    #[serde(default)]
    pub price: Decimal,
}

/// A validated confirmation request, ready for template rendering.
#[derive(Debug, Clone)]
pub struct ConfirmationRequest {
    pub name: String,
    pub email: Email,
    pub order_id: String,
    pub total: Decimal,
    pub items: Vec<ConfirmationItem>,
}

#[derive(Debug, Clone)]
pub struct ConfirmationItem {
    pub name: String,
    pub quantity: u32,
    pub price: Decimal,
}

/// Validate a raw confirmation request, collecting every failing field.
///
/// # Errors
///
/// Returns one [`FieldError`] per failing field.
pub fn validate(raw: RawConfirmationRequest) -> Result<ConfirmationRequest, Vec<FieldError>> {
    let mut errors = ErrorList::default();

    let name = checked_text("name", &raw.name, 2, 100, &mut errors);
    let email = match Email::parse(raw.email.trim()) {
        Ok(email) => Some(email),
        Err(e) => {
            errors.push("email", e.to_string());
            None
        }
    };
    let order_id = checked_text("orderId", &raw.order_id, 1, 50, &mut errors);

    if raw.total <= Decimal::ZERO {
        errors.push("total", "deve ser um valor positivo");
    }

    let mut items = Vec::with_capacity(raw.items.len());
    for (idx, item) in raw.items.iter().enumerate() {
        let field = |suffix: &str| format!("items[{idx}].{suffix}");

        let item_name = checked_text(&field("name"), &item.name, 1, 200, &mut errors);

        let quantity = u32::try_from(item.quantity).ok().filter(|&q| q > 0);
        if quantity.is_none() {
            errors.push(&field("quantity"), "deve ser um inteiro positivo");
        }
        if item.price <= Decimal::ZERO {
            errors.push(&field("price"), "deve ser um valor positivo");
        }

        if let (Some(item_name), Some(quantity)) = (item_name, quantity)
            && item.price > Decimal::ZERO
        {
            items.push(ConfirmationItem {
                name: item_name,
                quantity,
                price: item.price,
            });
        }
    }

    if let (Some(name), Some(email), Some(order_id)) = (name, email, order_id) {
        errors.into_result(ConfirmationRequest {
            name,
            email,
            order_id,
            total: raw.total,
            items,
        })
    } else {
        Err(errors.into_errors())
    }
}
