use crate::core::error_table::GET_WHOIS_CONTACT;
use crate::core::{domain_params, submit_checked};
use crate::domain::model::DomainName;
use crate::domain::ports::Transport;
use crate::domain::responses::WhoisReply;
use crate::utils::error::{RegistrarError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
];

/// Parse a registrar timestamp. Values without an offset are taken as UTC.
pub fn parse_registrar_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

pub async fn get_created_date<T: Transport + ?Sized>(
    transport: &T,
    domain: &DomainName,
) -> Result<DateTime<Utc>> {
    let envelope =
        submit_checked(transport, &GET_WHOIS_CONTACT, domain, domain_params(domain)).await?;
    let reply: WhoisReply = envelope.parse()?;
    let raw = reply.created_date.unwrap_or_default();

    parse_registrar_date(&raw).ok_or_else(|| RegistrarError::MalformedResponse {
        command: GET_WHOIS_CONTACT.command.to_string(),
        message: format!("unreadable created-date {:?}", raw),
    })
}
