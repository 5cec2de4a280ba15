use crate::core::domain::get_domain;
use crate::core::error_table::{GET_RENEW, SET_RENEW};
use crate::core::{domain_params, submit_checked};
use crate::domain::model::{Domain, DomainName};
use crate::domain::ports::Transport;
use crate::domain::responses::RenewReply;
use crate::utils::error::Result;

pub async fn get_is_auto_renew<T: Transport + ?Sized>(
    transport: &T,
    domain: &DomainName,
) -> Result<bool> {
    let envelope = submit_checked(transport, &GET_RENEW, domain, domain_params(domain)).await?;
    let reply: RenewReply = envelope.parse()?;
    Ok(reply.auto_renew)
}

pub async fn set_auto_renew<T: Transport + ?Sized>(
    transport: &T,
    domain: &DomainName,
    auto_renew: bool,
) -> Result<Domain> {
    let mut params = domain_params(domain);
    params.insert(
        "RenewFlag".to_string(),
        if auto_renew { "1" } else { "0" }.to_string(),
    );
    submit_checked(transport, &SET_RENEW, domain, params).await?;

    get_domain(transport, domain).await
}
