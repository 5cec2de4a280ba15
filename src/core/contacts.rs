use crate::core::error_table::{GET_CONTACTS, UPDATE_CONTACTS};
use crate::core::{domain_params, submit_checked};
use crate::domain::model::{
    Contact, ContactRole, ContactUpdate, DomainContacts, DomainName, PARTY_ID_FIELD,
};
use crate::domain::ports::{Params, Transport};
use crate::domain::responses::ContactsReply;
use crate::utils::error::{RegistrarError, Result};
use std::collections::{BTreeMap, BTreeSet};

/// Split the flat `<Prefix><Field>` bag into one record per role.
///
/// Every field name seen under any prefix is present in every record, with
/// an empty value where that role did not carry it.
pub fn split_role_fields(
    fields: &BTreeMap<String, String>,
) -> BTreeMap<ContactRole, BTreeMap<String, String>> {
    let mut per_role: BTreeMap<ContactRole, BTreeMap<String, String>> = ContactRole::ALL
        .into_iter()
        .map(|role| (role, BTreeMap::new()))
        .collect();
    let mut field_names = BTreeSet::new();

    for (key, value) in fields {
        for role in ContactRole::ALL {
            if let Some(name) = key.strip_prefix(role.remote_prefix()) {
                if name.is_empty() {
                    continue;
                }
                field_names.insert(name.to_string());
                if let Some(record) = per_role.get_mut(&role) {
                    record.insert(name.to_string(), value.clone());
                }
            }
        }
    }

    for record in per_role.values_mut() {
        for name in &field_names {
            record.entry(name.clone()).or_default();
        }
    }
    per_role
}

/// Build the four-role contact set from a `GetContacts` field bag.
///
/// A role whose `PartyID` equals `self_party_id` is the account's own
/// reseller record used as filler and counts as not provided. Roles not
/// provided copy the registrant.
pub fn normalize_contacts(
    domain: &DomainName,
    fields: &BTreeMap<String, String>,
    self_party_id: &str,
) -> Result<DomainContacts> {
    let mut provided: BTreeMap<ContactRole, Contact> = BTreeMap::new();

    for (role, record) in split_role_fields(fields) {
        let contact = Contact::from_fields(record);
        if contact.is_empty() {
            continue;
        }
        if !self_party_id.is_empty() && contact.party_id() == Some(self_party_id) {
            tracing::debug!("{}: {} is reseller filler, treating as unset", domain, role);
            continue;
        }
        provided.insert(role, contact);
    }

    let registrant = provided
        .get(&ContactRole::Registrant)
        .cloned()
        .ok_or_else(|| RegistrarError::MissingRegistrant {
            domain: domain.to_string(),
        })?;
    let mut take = |role: ContactRole| provided.remove(&role).unwrap_or_else(|| registrant.clone());

    Ok(DomainContacts {
        registrant: take(ContactRole::Registrant),
        admin: take(ContactRole::Admin),
        technical: take(ContactRole::Technical),
        billing: take(ContactRole::Billing),
    })
}

pub async fn get_contacts<T: Transport + ?Sized>(
    transport: &T,
    domain: &DomainName,
) -> Result<DomainContacts> {
    let envelope = submit_checked(transport, &GET_CONTACTS, domain, domain_params(domain)).await?;
    let reply: ContactsReply = envelope.parse()?;
    normalize_contacts(domain, &reply.fields, &reply.billing_party_id)
}

fn push_contact_fields(params: &mut Params, role: ContactRole, contact: &Contact) {
    for (name, value) in contact.fields() {
        if name == PARTY_ID_FIELD {
            continue;
        }
        params.insert(format!("{}{}", role.remote_prefix(), name), value.clone());
    }
}

/// Replace the given roles on the remote side, then return the fresh set.
///
/// With all four roles one combined `Contacts` call is made; otherwise one
/// call per role, tagged with `ContactType`. A failing call stops the rest
/// and earlier calls stay applied.
pub async fn update_contacts<T: Transport + ?Sized>(
    transport: &T,
    domain: &DomainName,
    update: &ContactUpdate,
) -> Result<DomainContacts> {
    if update.is_empty() {
        return Err(RegistrarError::InvalidInput {
            message: "contact update names no roles".to_string(),
        });
    }

    if update.is_complete() {
        let mut params = domain_params(domain);
        for (role, contact) in update.iter() {
            push_contact_fields(&mut params, role, contact);
        }
        tracing::debug!("{}: replacing all contacts in one call", domain);
        submit_checked(transport, &UPDATE_CONTACTS, domain, params).await?;
    } else {
        for (role, contact) in update.iter() {
            let mut params = domain_params(domain);
            params.insert("ContactType".to_string(), role.remote_marker().to_string());
            push_contact_fields(&mut params, role, contact);
            tracing::debug!("{}: replacing {}", domain, role);
            submit_checked(transport, &UPDATE_CONTACTS, domain, params).await?;
        }
    }

    get_contacts(transport, domain).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::{ok, with_errors, ScriptedTransport};

    const RESELLER_PARTY: &str = "{RESELLER-0001}";

    fn domain() -> DomainName {
        DomainName::parse("example.com").unwrap()
    }

    fn role_fields(prefix: &str, first: &str, party: &str) -> Vec<(String, String)> {
        vec![
            (format!("{}FirstName", prefix), first.to_string()),
            (format!("{}LastName", prefix), "Lovelace".to_string()),
            (format!("{}EmailAddress", prefix), format!("{}@example.com", first.to_lowercase())),
            (format!("{}PartyID", prefix), party.to_string()),
        ]
    }

    fn bag(parts: Vec<Vec<(String, String)>>) -> BTreeMap<String, String> {
        parts.into_iter().flatten().collect()
    }

    #[test]
    fn test_split_fills_missing_fields_with_empty() {
        let mut fields = bag(vec![role_fields("Registrant", "Ada", "{R}")]);
        fields.insert("AdminFax".to_string(), "+1.5550100".to_string());

        let split = split_role_fields(&fields);
        let registrant = &split[&ContactRole::Registrant];
        let admin = &split[&ContactRole::Admin];

        assert_eq!(registrant.get("Fax").map(String::as_str), Some(""));
        assert_eq!(admin.get("Fax").map(String::as_str), Some("+1.5550100"));
        assert_eq!(admin.get("FirstName").map(String::as_str), Some(""));
        assert_eq!(registrant.len(), admin.len());
    }

    #[test]
    fn test_split_keeps_prefixes_apart() {
        let fields = bag(vec![
            role_fields("Tech", "Tess", "{T}"),
            role_fields("AuxBilling", "Bill", "{B}"),
        ]);
        let split = split_role_fields(&fields);
        assert_eq!(split[&ContactRole::Technical]["FirstName"], "Tess");
        assert_eq!(split[&ContactRole::Billing]["FirstName"], "Bill");
        assert_eq!(split[&ContactRole::Registrant]["FirstName"], "");
    }

    #[test]
    fn test_only_registrant_fills_every_role() {
        let fields = bag(vec![
            role_fields("Registrant", "Ada", "{R}"),
            role_fields("Admin", "Res", RESELLER_PARTY),
            role_fields("Tech", "Res", RESELLER_PARTY),
            role_fields("AuxBilling", "Res", RESELLER_PARTY),
        ]);

        let contacts = normalize_contacts(&domain(), &fields, RESELLER_PARTY).unwrap();

        assert_eq!(contacts.registrant.first_name(), Some("Ada"));
        for (_, contact) in contacts.iter() {
            assert_eq!(contact, &contacts.registrant);
        }
    }

    #[test]
    fn test_distinct_roles_are_kept() {
        let fields = bag(vec![
            role_fields("Registrant", "Ada", "{R}"),
            role_fields("Admin", "Alan", "{A}"),
            role_fields("Tech", "Grace", "{T}"),
            role_fields("AuxBilling", "Edsger", "{B}"),
        ]);

        let contacts = normalize_contacts(&domain(), &fields, RESELLER_PARTY).unwrap();

        assert_eq!(contacts.registrant.first_name(), Some("Ada"));
        assert_eq!(contacts.admin.first_name(), Some("Alan"));
        assert_eq!(contacts.technical.first_name(), Some("Grace"));
        assert_eq!(contacts.billing.first_name(), Some("Edsger"));
        assert_eq!(contacts.admin.email(), Some("alan@example.com"));
        assert_eq!(contacts.billing.party_id(), Some("{B}"));
    }

    #[test]
    fn test_empty_self_party_never_matches() {
        let fields = bag(vec![
            role_fields("Registrant", "Ada", "{R}"),
            role_fields("Admin", "Alan", ""),
        ]);
        let contacts = normalize_contacts(&domain(), &fields, "").unwrap();
        assert_eq!(contacts.admin.first_name(), Some("Alan"));
    }

    #[test]
    fn test_missing_registrant_fails() {
        let fields = bag(vec![role_fields("Admin", "Alan", "{A}")]);
        let result = normalize_contacts(&domain(), &fields, RESELLER_PARTY);
        assert!(matches!(result, Err(RegistrarError::MissingRegistrant { .. })));
    }

    #[test]
    fn test_registrant_as_filler_fails() {
        let fields = bag(vec![role_fields("Registrant", "Res", RESELLER_PARTY)]);
        let result = normalize_contacts(&domain(), &fields, RESELLER_PARTY);
        assert!(matches!(result, Err(RegistrarError::MissingRegistrant { .. })));
    }

    fn contacts_reply() -> Vec<(String, String)> {
        let mut fields = bag(vec![
            role_fields("Registrant", "Ada", "{R}"),
            role_fields("Admin", "Res", RESELLER_PARTY),
        ]);
        fields.insert("BillingPartyID".to_string(), RESELLER_PARTY.to_string());
        fields.into_iter().collect()
    }

    #[tokio::test]
    async fn test_get_contacts_uses_billing_party_from_envelope() {
        let transport = ScriptedTransport::new().respond("GetContacts", ok(contacts_reply()));

        let contacts = get_contacts(&transport, &domain()).await.unwrap();

        assert_eq!(contacts.admin, contacts.registrant);
        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].params["SLD"], "example");
        assert_eq!(calls[0].params["TLD"], "com");
    }

    #[tokio::test]
    async fn test_get_contacts_not_found() {
        let transport = ScriptedTransport::new()
            .respond("GetContacts", with_errors(&["Domain name not found"]));
        let result = get_contacts(&transport, &domain()).await;
        assert!(matches!(result, Err(RegistrarError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_contacts_other_error_is_unknown() {
        let transport = ScriptedTransport::new()
            .respond("GetContacts", with_errors(&["Service unavailable"]));
        let result = get_contacts(&transport, &domain()).await;
        assert!(matches!(result, Err(RegistrarError::Unknown { .. })));
    }

    fn person(first: &str) -> Contact {
        Contact::default()
            .with_field("FirstName", first)
            .with_field("EmailAddress", format!("{}@example.com", first))
            .with_field(PARTY_ID_FIELD, "{ignored}")
    }

    #[tokio::test]
    async fn test_full_update_is_one_call() {
        let transport = ScriptedTransport::new()
            .respond("Contacts", ok(vec![]))
            .respond("GetContacts", ok(contacts_reply()));
        let update = ContactUpdate::new()
            .registrant(person("ada"))
            .admin(person("alan"))
            .technical(person("grace"))
            .billing(person("edsger"));

        update_contacts(&transport, &domain(), &update).await.unwrap();

        let calls = transport.calls_to("Contacts");
        assert_eq!(calls.len(), 1);
        let params = &calls[0].params;
        assert!(!params.contains_key("ContactType"));
        assert_eq!(params["RegistrantFirstName"], "ada");
        assert_eq!(params["AdminFirstName"], "alan");
        assert_eq!(params["TechFirstName"], "grace");
        assert_eq!(params["AuxBillingFirstName"], "edsger");
        assert!(!params.contains_key("RegistrantPartyID"));
        assert_eq!(transport.calls_to("GetContacts").len(), 1);
    }

    #[tokio::test]
    async fn test_partial_update_is_one_call_per_role() {
        let transport = ScriptedTransport::new()
            .respond("Contacts", ok(vec![]))
            .respond("GetContacts", ok(contacts_reply()));
        let update = ContactUpdate::new()
            .billing(person("edsger"))
            .admin(person("alan"));

        let refreshed = update_contacts(&transport, &domain(), &update).await.unwrap();

        let calls = transport.calls_to("Contacts");
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].params["ContactType"], "ADMIN");
        assert_eq!(calls[0].params["AdminFirstName"], "alan");
        assert!(!calls[0].params.contains_key("AuxBillingFirstName"));
        assert_eq!(calls[1].params["ContactType"], "AUXBILLING");
        assert_eq!(calls[1].params["AuxBillingFirstName"], "edsger");
        assert_eq!(refreshed.registrant.first_name(), Some("Ada"));
    }

    #[tokio::test]
    async fn test_failed_update_stops_remaining_calls() {
        let transport = ScriptedTransport::new()
            .respond("Contacts", with_errors(&["Domain name ID not found"]));
        let update = ContactUpdate::new()
            .registrant(person("ada"))
            .admin(person("alan"));

        let result = update_contacts(&transport, &domain(), &update).await;

        assert!(matches!(result, Err(RegistrarError::NotFound { .. })));
        assert_eq!(transport.calls_to("Contacts").len(), 1);
        assert!(transport.calls_to("GetContacts").is_empty());
    }

    #[tokio::test]
    async fn test_empty_update_is_rejected() {
        let transport = ScriptedTransport::new();
        let result = update_contacts(&transport, &domain(), &ContactUpdate::new()).await;
        assert!(matches!(result, Err(RegistrarError::InvalidInput { .. })));
        assert!(transport.calls().is_empty());
    }
}
