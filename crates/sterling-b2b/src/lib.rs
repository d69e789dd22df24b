//! Read-only client for the IBM Sterling B2Bi / FileGateway REST API
//!
//! # Features
//! - Trading partner listing, with optional id search and include list
//! - Trading partner lookup by id
//! - Community listing
//! - Basic authentication with an immutable [`ConnectionProfile`]

pub mod client;
pub mod config;
pub mod error;
pub mod records;
pub mod validation;

pub use client::{SterlingB2bClient, TradingPartnerQuery};
pub use config::ConnectionProfile;
pub use error::{SterlingError, SterlingResult};
pub use records::{record_ids, records, Record};
