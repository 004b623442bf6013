//! Payment request validation.

use serde::Deserialize;
use sky_brasil_core::{Cep, Cpf, Email, Money, MoneyError, Phone};

use super::{ErrorList, FieldError, checked_optional_text, checked_text};

/// Raw payment request body, exactly as the client sends it.
#[derive(Debug, Deserialize)]
pub struct RawPaymentRequest {
    #[serde(default)]
    pub payment_token: String,
    pub customer: RawCustomer,
    pub billing_address: RawBillingAddress,
    #[serde(default)]
    pub items: Vec<RawLineItem>,
}

#[derive(Debug, Deserialize)]
pub struct RawCustomer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub cpf: String,
    #[serde(default)]
    pub phone_number: String,
}

#[derive(Debug, Deserialize)]
pub struct RawBillingAddress {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub neighborhood: String,
    #[serde(default)]
    pub zipcode: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub complement: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawLineItem {
    #[serde(default)]
    pub name: String,
    /// Unit value in minor currency units (centavos).
    #[serde(default)]
    pub value: i64,
    #[serde(default)]
    pub amount: i64,
}

/// A validated, canonicalized payment request.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub payment_token: String,
    pub customer: Customer,
    pub billing_address: BillingAddress,
    pub items: Vec<LineItem>,
}

#[derive(Debug, Clone)]
pub struct Customer {
    pub name: String,
    pub email: Email,
    pub cpf: Cpf,
    pub phone: Phone,
}

#[derive(Debug, Clone)]
pub struct BillingAddress {
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub zipcode: Cep,
    pub city: String,
    pub complement: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LineItem {
    pub name: String,
    /// Unit value in minor currency units.
    pub value: Money,
    pub amount: u32,
}

impl PaymentRequest {
    /// Order total: Σ value × amount, in minor units, checked arithmetic.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Overflow`] if any product or the running sum
    /// overflows.
    pub fn total(&self) -> Result<Money, MoneyError> {
        self.items.iter().try_fold(Money::ZERO, |acc, item| {
            acc.checked_add(item.value.checked_mul(item.amount)?)
        })
    }
}

/// Validate a raw payment request, collecting every failing field.
///
/// # Errors
///
/// Returns one [`FieldError`] per failing field. An empty items list is a
/// validation error; nothing downstream sees the request in that case.
#[allow(clippy::too_many_lines)]
pub fn validate(raw: RawPaymentRequest) -> Result<PaymentRequest, Vec<FieldError>> {
    let mut errors = ErrorList::default();

    let payment_token = raw.payment_token.trim().to_string();
    if payment_token.is_empty() {
        errors.push("payment_token", "é obrigatório");
    }

    let name = checked_text("customer.name", &raw.customer.name, 2, 100, &mut errors);
    let email = match Email::parse(raw.customer.email.trim()) {
        Ok(email) => Some(email),
        Err(e) => {
            errors.push("customer.email", e.to_string());
            None
        }
    };
    let cpf = match Cpf::parse(&raw.customer.cpf) {
        Ok(cpf) => Some(cpf),
        Err(e) => {
            errors.push("customer.cpf", e.to_string());
            None
        }
    };
    let phone = match Phone::parse(&raw.customer.phone_number) {
        Ok(phone) => Some(phone),
        Err(e) => {
            errors.push("customer.phone_number", e.to_string());
            None
        }
    };

    let addr = &raw.billing_address;
    let street = checked_text("billing_address.street", &addr.street, 2, 200, &mut errors);
    let number = checked_text("billing_address.number", &addr.number, 1, 20, &mut errors);
    let neighborhood = checked_text(
        "billing_address.neighborhood",
        &addr.neighborhood,
        2,
        100,
        &mut errors,
    );
    let zipcode = match Cep::parse(&addr.zipcode) {
        Ok(cep) => Some(cep),
        Err(e) => {
            errors.push("billing_address.zipcode", e.to_string());
            None
        }
    };
    let city = checked_text("billing_address.city", &addr.city, 2, 100, &mut errors);
    let complement = checked_optional_text(
        "billing_address.complement",
        addr.complement.as_deref(),
        100,
        &mut errors,
    );

    if raw.items.is_empty() {
        errors.push("items", "o pedido deve ter pelo menos um item");
    }
    let mut items = Vec::with_capacity(raw.items.len());
    for (idx, item) in raw.items.iter().enumerate() {
        let field = |suffix: &str| format!("items[{idx}].{suffix}");

        let item_name = checked_text(&field("name"), &item.name, 1, 200, &mut errors);

        if item.value <= 0 {
            errors.push(&field("value"), "deve ser um inteiro positivo em centavos");
        }
        let amount = u32::try_from(item.amount).ok().filter(|&a| a > 0);
        if amount.is_none() {
            errors.push(&field("amount"), "deve ser um inteiro positivo");
        }

        if let (Some(item_name), Some(amount)) = (item_name, amount)
            && item.value > 0
        {
            items.push(LineItem {
                name: item_name,
                value: Money::from_cents(item.value),
                amount,
            });
        }
    }

    // Every None above recorded an error, so this only assembles when
    // the whole request validated.
    if let (
        Some(name),
        Some(email),
        Some(cpf),
        Some(phone),
        Some(street),
        Some(number),
        Some(neighborhood),
        Some(zipcode),
        Some(city),
    ) = (name, email, cpf, phone, street, number, neighborhood, zipcode, city)
    {
        errors.into_result(PaymentRequest {
            payment_token,
            customer: Customer {
                name,
                email,
                cpf,
                phone,
            },
            billing_address: BillingAddress {
                street,
                number,
                neighborhood,
                zipcode,
                city,
                complement,
            },
            items,
        })
    } else {
        Err(errors.into_errors())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_raw() -> RawPaymentRequest {
        RawPaymentRequest {
            payment_token: "tok_abc123".to_string(),
            customer: RawCustomer {
                name: "Ana Souza".to_string(),
                email: "ana@example.com".to_string(),
                cpf: "529.982.247-25".to_string(),
                phone_number: "(11) 98765-4321".to_string(),
            },
            billing_address: RawBillingAddress {
                street: "Avenida Paulista".to_string(),
                number: "1000".to_string(),
                neighborhood: "Bela Vista".to_string(),
                zipcode: "01310-100".to_string(),
                city: "São Paulo".to_string(),
                complement: None,
            },
            items: vec![RawLineItem {
                name: "Plano Start".to_string(),
                value: 100,
                amount: 1,
            }],
        }
    }

    #[test]
    fn test_valid_request_normalizes_fields() {
        let request = validate(valid_raw()).unwrap();
        assert_eq!(request.customer.cpf.as_str(), "52998224725");
        assert_eq!(request.customer.phone.as_str(), "11987654321");
        assert_eq!(request.billing_address.zipcode.as_str(), "01310100");
        assert_eq!(request.items.len(), 1);
    }

    #[test]
    fn test_empty_items_rejected() {
        let mut raw = valid_raw();
        raw.items.clear();
        let errors = validate(raw).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "items"));
    }

    #[test]
    fn test_total_sums_value_times_amount() {
        let mut raw = valid_raw();
        raw.items = vec![
            RawLineItem {
                name: "Plano Start".to_string(),
                value: 100,
                amount: 2,
            },
            RawLineItem {
                name: "Plano Plus".to_string(),
                value: 50,
                amount: 1,
            },
        ];
        let request = validate(raw).unwrap();
        assert_eq!(request.total().unwrap(), Money::from_cents(250));
    }

    #[test]
    fn test_every_failing_field_reported() {
        let mut raw = valid_raw();
        raw.payment_token = String::new();
        raw.customer.cpf = "11111111111".to_string();
        raw.items = vec![RawLineItem {
            name: "Plano Start".to_string(),
            value: 0,
            amount: 0,
        }];
        let errors = validate(raw).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"payment_token"));
        assert!(fields.contains(&"customer.cpf"));
        assert!(fields.contains(&"items[0].value"));
        assert!(fields.contains(&"items[0].amount"));
    }

    #[test]
    fn test_free_text_is_sanitized() {
        let mut raw = valid_raw();
        raw.customer.name = "Ana <script>alert(1)</script> Souza".to_string();
        let request = validate(raw).unwrap();
        assert_eq!(request.customer.name, "Ana alert(1) Souza");
    }
}
