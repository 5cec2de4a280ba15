use crate::core::domain::get_domain;
use crate::core::error_table::{GET_REG_LOCK, SET_REG_LOCK};
use crate::core::{domain_params, submit_checked};
use crate::domain::model::{Domain, DomainName};
use crate::domain::ports::Transport;
use crate::domain::responses::{Envelope, RegLockReply};
use crate::utils::error::Result;

pub async fn get_is_locked<T: Transport + ?Sized>(
    transport: &T,
    domain: &DomainName,
) -> Result<bool> {
    let envelope = submit_checked(transport, &GET_REG_LOCK, domain, domain_params(domain)).await?;
    let reply: RegLockReply = envelope.parse()?;
    Ok(reply.locked)
}

/// True when the only complaint is that the lock already has the wanted value.
fn already_in_state(envelope: &Envelope, locked: bool) -> bool {
    let phrase = if locked { "already locked" } else { "already unlocked" };
    !envelope.is_success()
        && !envelope.errors.is_empty()
        && envelope
            .errors
            .iter()
            .all(|e| e.to_lowercase().contains(phrase))
}

/// Set the registrar lock and return the re-fetched domain. Asking for the
/// current state is not an error.
pub async fn set_locked<T: Transport + ?Sized>(
    transport: &T,
    domain: &DomainName,
    locked: bool,
) -> Result<Domain> {
    let mut params = domain_params(domain);
    params.insert(
        "UnlockRegistrar".to_string(),
        if locked { "0" } else { "1" }.to_string(),
    );

    tracing::debug!("{}: {} locked={}", domain, SET_REG_LOCK.command, locked);
    let envelope = transport.submit(SET_REG_LOCK.command, &params).await?;
    if already_in_state(&envelope, locked) {
        tracing::warn!(
            "{}: lock already {}, treating as success",
            domain,
            if locked { "on" } else { "off" }
        );
    } else {
        SET_REG_LOCK.check(&envelope, domain)?;
    }

    get_domain(transport, domain).await
}
