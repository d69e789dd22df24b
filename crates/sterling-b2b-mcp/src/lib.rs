//! MCP tool server for IBM Sterling B2Bi / FileGateway
//!
//! Registers the read-only queries of [`sterling_b2b::SterlingB2bClient`] as
//! MCP tools: trading partner listing (plain and detailed), trading partner
//! lookup by id, and community listing.

pub mod logging;
pub mod server;

pub use server::{GetTradingPartnerByIdParams, SterlingB2bServer, SERVER_NAME};
