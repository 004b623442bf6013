//! External API clients.

pub mod efipay;
pub mod resend;

pub use efipay::{EfiPayClient, EfiPayError};
pub use resend::{ResendClient, ResendError};
