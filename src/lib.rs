//! # hubspot - HubSpot CRM API client for Rust
//!
//! Maps method calls onto authenticated HTTP requests against
//! `https://api.hubapi.com` and normalizes every outcome into either a
//! parsed JSON [`Response`] or a [`HubSpotError`].
//!
//! ## Features
//!
//! - API key (`hapikey`) or OAuth2 bearer token authentication
//! - Automatic access token renewal on HTTP 401 for timeline events
//! - Query, form and JSON parameter encoding chosen by HTTP verb
//! - gzip/deflate response decoding
//! - Uniform [`ApiError`] built from JSON, text or HTML error bodies
//! - A catalog of contact, list, company, deal, engagement, owner,
//!   workflow, timeline, settings and marketing operations
//!
//! ## Basic Usage
//!
//! ```no_run
//! use hubspot::{ClientConfig, HubSpot};
//! use serde_json::json;
//!
//! fn main() -> Result<(), hubspot::HubSpotError> {
//!     let client = HubSpot::new(ClientConfig::with_api_key("demo"))?;
//!
//!     let contact = client.contacts().get_by_email("bh@hubspot.com", json!({
//!         "property": ["firstname", "lastname"]
//!     }))?;
//!
//!     println!("{:?}", contact.get_string("properties/firstname/value"));
//!     Ok(())
//! }
//! ```
//!
//! ## OAuth
//!
//! ```no_run
//! use hubspot::{ClientConfig, HubSpot};
//! use serde_json::json;
//!
//! let config = ClientConfig::with_access_token("access-token")
//!     .refresh_token("refresh-token")
//!     .client_credentials("client-id", "client-secret")
//!     .application_id("12345");
//! let client = HubSpot::new(config)?;
//!
//! // Renews the token and retries once if the access token has expired
//! client.timelines().create_event(4242, json!({
//!     "email": "bh@hubspot.com",
//!     "extraData": {"plan": "pro"}
//! }))?;
//! # Ok::<(), hubspot::HubSpotError>(())
//! ```
//!
//! ## Raw requests
//!
//! ```no_run
//! use hubspot::{ClientConfig, HubSpot, OperationRequest};
//! use serde_json::json;
//!
//! let client = HubSpot::new(ClientConfig::with_api_key("demo"))?;
//! let request = OperationRequest::post("crm/v3/objects/contacts")
//!     .params(hubspot::request::to_params(json!({"properties": {"email": "a@b.c"}}))?)
//!     .json();
//! let created = client.execute(&request)?;
//! # Ok::<(), hubspot::HubSpotError>(())
//! ```

pub mod catalog;
pub mod client;
pub mod error;
pub mod request;
pub mod response;
pub mod rest;
pub mod time;
pub mod token;

// Re-export main types for convenience
pub use catalog::Endpoint;
pub use client::ClientConfig;
pub use error::{ApiError, HubSpotError, Result};
pub use request::{Encoding, OperationRequest, Params, Verb};
pub use response::Response;
pub use rest::HubSpot;
pub use time::Time;
pub use token::Token;

// Re-export serde_json for convenience
pub use serde_json::json;
