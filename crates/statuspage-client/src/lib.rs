//! statuspage-client: HTTP client for the StatusPage.io management API
//!
//! One method per resource operation: pages, components, incidents,
//! subscribers and metrics providers. Each call is a single authenticated
//! request; there are no retries, no caching and no pagination handling.
//! Failures come back as [`ClientError`] with the HTTP status and raw body.
//!
//! # Example
//!
//! ```no_run
//! use statuspage_client::{ClientConfig, StatusPageClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::new(std::env::var("STATUSPAGE_API_KEY")?);
//! let client = StatusPageClient::new(config)?;
//!
//! // Page profile
//! let page = client.get_page_profile("kctbh9vrtdwd").await?;
//! println!("Page: {}", page.name);
//!
//! // Components and their health
//! for component in client.get_components(&page.id).await? {
//!     println!("{}: {}", component.name, component.status);
//! }
//!
//! // Open incidents
//! let open = client.get_unresolved_incidents(&page.id).await?;
//! println!("{} unresolved incidents", open.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;

pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ClientError, Result};
pub use http::StatusPageClient;
