//! FAM SDK: typed client for the Freelance-and-Me payments API
//!
//! A library for calling the FAM backend (a MangoPay wrapper) with bearer
//! authentication, retries and uniform error mapping, and for verifying
//! the webhooks it sends.
//!
//! ```no_run
//! # async fn example() -> fam_sdk::Result<()> {
//! use fam_sdk::Fam;
//! use fam_sdk::client::ClientOptions;
//!
//! let fam = Fam::new(ClientOptions::new("https://api.fam.example")?.with_token("jwt"));
//! let user: serde_json::Value = fam.users().get("u_1").await?;
//! println!("{user}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod fam;
pub mod resources;
pub mod time;
pub mod transport;
pub mod webhooks;

pub use error::{Error, ErrorKind, FieldErrors, Result};
pub use fam::Fam;
