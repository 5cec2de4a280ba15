pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliArgs, CliCommand};

pub use adapters::HttpTransport;
pub use config::ClientConfig;
pub use crate::core::client::RegistrarClient;
pub use domain::model::{
    Contact, ContactRole, ContactUpdate, Domain, DomainContacts, DomainName,
};
pub use domain::ports::{ConfigProvider, Params, Transport};
pub use domain::responses::{Envelope, ResponseFormat};
pub use utils::error::{RegistrarError, Result};
