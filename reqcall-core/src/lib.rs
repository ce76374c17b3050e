//! Synchronous request/expect/decode helper.
//!
//! Build a [`RequestSpec`], send it through a [`Requester`] and get back
//! either a `{"status_code": .., "body": ".."}` message or an [`Error`].
//! The transport is any [`HttpClient`]; by default a reqwest blocking client
//! with a 15 second timeout is used.
//!
//! ```no_run
//! use reqcall_core::{ClientConfig, RequestSpec};
//!
//! #[derive(Default, serde::Deserialize)]
//! struct User {
//!     name: String,
//! }
//!
//! let requester = ClientConfig::new().build()?;
//! let mut user = User::default();
//! let message = requester.execute(
//!     RequestSpec::new("GET", "https://api.example.com/users/1"),
//!     200,
//!     Some(&mut user),
//!     None,
//! )?;
//! println!("{message} -> {}", user.name);
//! # Ok::<(), reqcall_core::Error>(())
//! ```

pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod executor;
pub mod request;
pub mod reqwest_client;

pub use client::{HttpClient, HttpRequest, HttpResponse};
pub use config::{ClientConfig, DEFAULT_TIMEOUT};
pub use decode::DecodeTarget;
pub use error::{BoxError, Error, Result};
pub use executor::{RequestExecutor, Requester};
pub use request::RequestSpec;
pub use reqwest_client::ReqwestClient;
