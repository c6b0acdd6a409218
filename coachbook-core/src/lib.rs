#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod api;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod validation;

pub use api::CheckoutApi;
pub use cart::{CartHolder, CartItem};
pub use checkout::{
    CallbackParams, CheckoutEvent, CheckoutFlow, CheckoutState, OrderSubmitter, PaymentMode,
    PaymentVerifier, Receipt, Redirect, SubmissionOutcome, VerificationOutcome,
};
pub use config::CheckoutConfig;
pub use error::CheckoutError;
pub use validation::{CheckoutForm, FormField, ValidationErrors};
