//! Identity and entitlement adapters

pub mod http;

pub use http::HttpIdentityProvider;
