use crate::adapters::HttpTransport;
use crate::core::{contacts, created, domain, lock, nameservers, renew};
use crate::domain::model::{ContactUpdate, Domain, DomainContacts, DomainName};
use crate::domain::ports::{ConfigProvider, Transport};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};

/// Typed entry point to the reseller API.
///
/// Every method takes a plain domain name, validates it, and runs the
/// corresponding read or mutation. Nothing is cached: each call goes to the
/// remote service, and mutations return a freshly fetched snapshot.
pub struct RegistrarClient<T: Transport> {
    transport: T,
}

impl RegistrarClient<HttpTransport> {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }
}

impl<T: Transport> RegistrarClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn get_contacts_by_domain_name(&self, name: &str) -> Result<DomainContacts> {
        let domain = DomainName::parse(name)?;
        contacts::get_contacts(&self.transport, &domain).await
    }

    pub async fn update_contacts_for_domain_name(
        &self,
        name: &str,
        update: &ContactUpdate,
    ) -> Result<DomainContacts> {
        let domain = DomainName::parse(name)?;
        tracing::info!("Updating {} contact role(s) for {}", update.len(), domain);
        contacts::update_contacts(&self.transport, &domain, update).await
    }

    pub async fn get_domain_by_name(&self, name: &str) -> Result<Domain> {
        let domain = DomainName::parse(name)?;
        domain::get_domain(&self.transport, &domain).await
    }

    pub async fn get_is_domain_locked_by_name(&self, name: &str) -> Result<bool> {
        let domain = DomainName::parse(name)?;
        lock::get_is_locked(&self.transport, &domain).await
    }

    pub async fn enable_domain_lock_by_name(&self, name: &str) -> Result<Domain> {
        self.set_lock(name, true).await
    }

    pub async fn disable_domain_lock_by_name(&self, name: &str) -> Result<Domain> {
        self.set_lock(name, false).await
    }

    async fn set_lock(&self, name: &str, locked: bool) -> Result<Domain> {
        let domain = DomainName::parse(name)?;
        tracing::info!("Setting registrar lock on {} to {}", domain, locked);
        lock::set_locked(&self.transport, &domain, locked).await
    }

    pub async fn get_is_domain_auto_renew_by_name(&self, name: &str) -> Result<bool> {
        let domain = DomainName::parse(name)?;
        renew::get_is_auto_renew(&self.transport, &domain).await
    }

    pub async fn enable_domain_auto_renew_by_name(&self, name: &str) -> Result<Domain> {
        self.set_auto_renew(name, true).await
    }

    pub async fn disable_domain_auto_renew_by_name(&self, name: &str) -> Result<Domain> {
        self.set_auto_renew(name, false).await
    }

    async fn set_auto_renew(&self, name: &str, auto_renew: bool) -> Result<Domain> {
        let domain = DomainName::parse(name)?;
        tracing::info!("Setting auto-renew on {} to {}", domain, auto_renew);
        renew::set_auto_renew(&self.transport, &domain, auto_renew).await
    }

    pub async fn get_domain_name_servers_by_name(&self, name: &str) -> Result<Vec<String>> {
        let domain = DomainName::parse(name)?;
        nameservers::get_nameservers(&self.transport, &domain).await
    }

    pub async fn get_domain_created_date_by_name(&self, name: &str) -> Result<DateTime<Utc>> {
        let domain = DomainName::parse(name)?;
        created::get_created_date(&self.transport, &domain).await
    }
}
