//! Checkout flow: order submission, payment callback verification and the
//! view state machine that ties them together.
//!
//! # Flow
//!
//! 1. The view mounts and resolves its initial [`CheckoutState`] from the
//!    cart and the callback query parameters.
//! 2. From `Form`, the user submits either *pay later* (order created,
//!    cart cleared, confirmation shown) or *pay now* (order created, payment
//!    session requested, browser redirected to the gateway).
//! 3. The gateway redirects back with `reference`/`trxref`; the view mounts
//!    again, verifies the reference and shows `Success` or `Failure`.

mod callback;
mod flow;
mod machine;
mod submission;
mod verifier;

pub use callback::CallbackParams;
pub use flow::CheckoutFlow;
pub use machine::{CheckoutEvent, CheckoutState};
pub use submission::{OrderSubmitter, PaymentMode, Redirect, SubmissionOutcome};
pub use verifier::{PaymentVerifier, Receipt, VerificationOutcome};
