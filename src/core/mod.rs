pub mod client;
pub mod contacts;
pub mod created;
pub mod domain;
pub mod error_table;
pub mod lock;
pub mod nameservers;
pub mod renew;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::domain::model::{
    Contact, ContactRole, ContactUpdate, Domain, DomainContacts, DomainName,
};
pub use crate::domain::ports::{ConfigProvider, Params, Transport};
pub use crate::domain::responses::Envelope;
pub use crate::utils::error::Result;

use crate::core::error_table::ErrorTable;

pub(crate) fn domain_params(domain: &DomainName) -> Params {
    let mut params = Params::new();
    params.insert("SLD".to_string(), domain.sld().to_string());
    params.insert("TLD".to_string(), domain.tld().to_string());
    params
}

/// Submit the table's command and translate any reported error through it.
pub(crate) async fn submit_checked<T: Transport + ?Sized>(
    transport: &T,
    table: &ErrorTable,
    domain: &DomainName,
    params: Params,
) -> Result<Envelope> {
    tracing::debug!("{}: {}", domain, table.command);
    let envelope = transport.submit(table.command, &params).await?;
    table.check(&envelope, domain)?;
    Ok(envelope)
}
