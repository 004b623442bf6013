//! Core types for SKY BRASIL.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod card;
pub mod cep;
pub mod cpf;
pub mod email;
pub mod money;
pub mod phone;

pub use card::CardBrand;
pub use cep::{Cep, CepError};
pub use cpf::{Cpf, CpfError};
pub use email::{Email, EmailError};
pub use money::{Money, MoneyError};
pub use phone::{Phone, PhoneError};
