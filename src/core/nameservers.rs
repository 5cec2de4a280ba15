use crate::core::error_table::GET_DNS;
use crate::core::{domain_params, submit_checked};
use crate::domain::model::DomainName;
use crate::domain::ports::Transport;
use crate::domain::responses::DnsReply;
use crate::utils::error::Result;

pub async fn get_nameservers<T: Transport + ?Sized>(
    transport: &T,
    domain: &DomainName,
) -> Result<Vec<String>> {
    let envelope = submit_checked(transport, &GET_DNS, domain, domain_params(domain)).await?;
    let reply: DnsReply = envelope.parse()?;
    Ok(reply.nameservers())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::{ok_with, with_errors, ScriptedTransport};
    use crate::utils::error::RegistrarError;

    #[tokio::test]
    async fn test_get_nameservers() {
        let transport = ScriptedTransport::new().respond(
            "GetDNS",
            ok_with(&[("DNS2", "ns2.example.net"), ("DNS1", "ns1.example.net")]),
        );
        let domain = DomainName::parse("example.com").unwrap();

        let nameservers = get_nameservers(&transport, &domain).await.unwrap();

        assert_eq!(nameservers, vec!["ns1.example.net", "ns2.example.net"]);
    }

    #[tokio::test]
    async fn test_get_nameservers_not_found() {
        let transport = ScriptedTransport::new()
            .respond("GetDNS", with_errors(&["Domain name not found"]));
        let domain = DomainName::parse("missing.com").unwrap();
        let result = get_nameservers(&transport, &domain).await;
        assert!(matches!(result, Err(RegistrarError::NotFound { .. })));
    }
}
