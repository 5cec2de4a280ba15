//! Assembles a [`Domain`] from the individual remote reads.
//!
//! The steps run one after another and the first failure ends the whole
//! read, so a partially filled `Domain` never escapes. The steps are not
//! atomic as a group: if the account changes between two of them the
//! result mixes both states. Callers that need a consistent view re-fetch.

use crate::core::contacts::get_contacts;
use crate::core::created::get_created_date;
use crate::core::error_table::GET_DOMAIN_INFO;
use crate::core::lock::get_is_locked;
use crate::core::nameservers::get_nameservers;
use crate::core::renew::get_is_auto_renew;
use crate::core::{domain_params, submit_checked};
use crate::domain::model::{Domain, DomainName};
use crate::domain::ports::Transport;
use crate::domain::responses::DomainInfoReply;
use crate::utils::error::{RegistrarError, Result};

pub async fn get_domain_info<T: Transport + ?Sized>(
    transport: &T,
    domain: &DomainName,
) -> Result<DomainInfoReply> {
    let envelope =
        submit_checked(transport, &GET_DOMAIN_INFO, domain, domain_params(domain)).await?;
    let reply: DomainInfoReply = envelope.parse()?;
    if !reply.has_info_block() {
        tracing::debug!("{}: {} returned no info block", domain, GET_DOMAIN_INFO.command);
        return Err(RegistrarError::NotFound {
            domain: domain.to_string(),
        });
    }
    Ok(reply)
}

pub async fn get_domain<T: Transport + ?Sized>(transport: &T, domain: &DomainName) -> Result<Domain> {
    let info = get_domain_info(transport, domain).await?;
    tracing::debug!("{}: info ok (id {:?})", domain, info.domain_name_id);

    let locked = get_is_locked(transport, domain).await?;
    let auto_renew = get_is_auto_renew(transport, domain).await?;
    let nameservers = get_nameservers(transport, domain).await?;
    let created_at = get_created_date(transport, domain).await?;
    let contacts = get_contacts(transport, domain).await?;

    Ok(Domain {
        name: domain.clone(),
        created_at,
        locked,
        auto_renew,
        nameservers: nameservers.into_iter().collect(),
        contacts,
    })
}
