//! # myadmin-rs
//!
//! An async client for the MyAdmin JSON-RPC API. The client authenticates
//! once with a username and password, keeps the returned session
//! credentials, and attaches them to every subsequent call.
//!
//! ## Quick Start
//!
//! ```no_run
//! use myadmin_rs::{ClientOptions, MyAdminApiClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let options = ClientOptions::new("user@example.com", "secret")
//!     .with_uri("https://myadminapitest.geotab.com/v2/MyAdminApi.ashx");
//!
//! let mut client = MyAdminApiClient::new(options)?;
//! client.authenticate().await?;
//!
//! let countries = client.call("GetCountries", None).await?;
//! println!("{countries}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Every operation returns `Result<_, ClientError>`. Local precondition
//! failures (`Validation`, `InvalidArgument`, `AuthenticationRequired`) are
//! raised before any request is sent. Errors reported by the service and
//! transport failures carry an [`ErrorRecord`] with `code`, `message` and
//! `name`.
//!
//! ## Configuration
//!
//! [`Config`] reads a `config.toml` with a `[myadmin]` table, or the
//! `GEOTAB_*` environment variables (a `.env` file is honoured).

pub mod api_client;
pub mod config;
pub mod credentials;
pub mod dto;
pub mod error;
pub mod transport;

pub use api_client::MyAdminApiClient;
pub use config::Config;
pub use credentials::{ClientOptions, Credentials, DEFAULT_SERVER_URL};
pub use error::{ClientError, ErrorRecord};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Transport, WireFormat};
