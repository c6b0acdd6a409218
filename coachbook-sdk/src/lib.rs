//! Wire types and HTTP clients for the Coachbook booking API.
//!
//! [`objects`] is always available. The typed `reqwest` clients live in
//! [`client`] behind the `client` cargo feature.

#[cfg(feature = "client")]
pub mod client;
pub mod objects;
