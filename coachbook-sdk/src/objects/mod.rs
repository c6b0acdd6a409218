pub mod admin;
pub mod order;
pub mod payment;
pub mod service;

pub use admin::{ListOrdersQuery, UpdatePaymentStatus, clamp_pagination};
pub use order::{CreateIndividualOrder, IndividualOrder, PaymentStatus};
pub use payment::{
    InitializePayment, OrderSummary, PaymentMetadata, PaymentSession, PaymentVerification,
    VerificationStatus,
};
pub use service::Service;
