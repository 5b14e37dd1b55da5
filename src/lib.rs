//! DeepL Client - async Rust client for the DeepL translation API
//!
//! Builds form-encoded `/translate` requests, sends them with `reqwest` and
//! decodes the JSON answer into typed [`Translation`]s.
//!
//! ```no_run
//! use deepl_client::{DeepLClient, Language, TranslateOptions};
//!
//! # async fn run() -> deepl_client::Result<()> {
//! let client = DeepLClient::with_auth_key("my-auth-key")?;
//! let (text, detected) = client
//!     .translate("This is an example text.", &Language::GERMAN, &TranslateOptions::new())
//!     .await?;
//! println!("{} (from {})", text, detected);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;

// Re-export key types for convenience
pub use self::core::{
    client::DeepLClient,
    config::{ClientConfig, DEFAULT_BASE_URL, FREE_BASE_URL},
    errors::{DeepLError, Result},
    models::{Formal, Language, ParseOptionError, SplitSentence, TagHandling, Translation},
    options::{FormPayload, TranslateOptions},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
