use crate::utils::error::{RegistrarError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A fully-qualified domain name split the way the remote API addresses it:
/// second-level label (`SLD`) plus everything after the first dot (`TLD`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DomainName {
    sld: String,
    tld: String,
}

impl DomainName {
    pub fn parse(name: &str) -> Result<Self> {
        let normalized = name.trim().trim_end_matches('.').to_ascii_lowercase();
        let invalid = |reason: &str| RegistrarError::InvalidDomainName {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        if normalized.is_empty() {
            return Err(invalid("name is empty"));
        }
        let (sld, tld) = normalized
            .split_once('.')
            .ok_or_else(|| invalid("name has no top-level domain"))?;
        if sld.is_empty() || tld.split('.').any(str::is_empty) {
            return Err(invalid("name contains an empty label"));
        }
        if normalized.chars().any(char::is_whitespace) {
            return Err(invalid("name contains whitespace"));
        }

        Ok(Self {
            sld: sld.to_string(),
            tld: tld.to_string(),
        })
    }

    pub fn sld(&self) -> &str {
        &self.sld
    }

    pub fn tld(&self) -> &str {
        &self.tld
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.sld, self.tld)
    }
}

impl TryFrom<String> for DomainName {
    type Error = RegistrarError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<DomainName> for String {
    fn from(value: DomainName) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactRole {
    Registrant,
    Admin,
    Technical,
    Billing,
}

impl ContactRole {
    pub const ALL: [ContactRole; 4] = [
        ContactRole::Registrant,
        ContactRole::Admin,
        ContactRole::Technical,
        ContactRole::Billing,
    ];

    /// Prefix the remote API puts in front of every field of this role.
    pub fn remote_prefix(self) -> &'static str {
        match self {
            Self::Registrant => "Registrant",
            Self::Admin => "Admin",
            Self::Technical => "Tech",
            Self::Billing => "AuxBilling",
        }
    }

    /// Value of `ContactType` when updating a single role.
    pub fn remote_marker(self) -> &'static str {
        match self {
            Self::Registrant => "REGISTRANT",
            Self::Admin => "ADMIN",
            Self::Technical => "TECH",
            Self::Billing => "AUXBILLING",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Registrant => "registrant_contact",
            Self::Admin => "admin_contact",
            Self::Technical => "technical_contact",
            Self::Billing => "billing_contact",
        }
    }
}

impl fmt::Display for ContactRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

pub const PARTY_ID_FIELD: &str = "PartyID";

/// A contact record keyed by the remote field name with the role prefix removed
/// (`FirstName`, `EmailAddress`, `PartyID`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Contact {
    fields: BTreeMap<String, String>,
}

impl Contact {
    pub fn from_fields(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn into_fields(self) -> BTreeMap<String, String> {
        self.fields
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.values().all(|v| v.is_empty())
    }

    pub fn party_id(&self) -> Option<&str> {
        self.get(PARTY_ID_FIELD).filter(|id| !id.is_empty())
    }

    pub fn first_name(&self) -> Option<&str> {
        self.get("FirstName")
    }

    pub fn last_name(&self) -> Option<&str> {
        self.get("LastName")
    }

    pub fn organization(&self) -> Option<&str> {
        self.get("OrganizationName")
    }

    pub fn address1(&self) -> Option<&str> {
        self.get("Address1")
    }

    pub fn address2(&self) -> Option<&str> {
        self.get("Address2")
    }

    pub fn city(&self) -> Option<&str> {
        self.get("City")
    }

    pub fn state_province(&self) -> Option<&str> {
        self.get("StateProvince")
    }

    pub fn postal_code(&self) -> Option<&str> {
        self.get("PostalCode")
    }

    pub fn country(&self) -> Option<&str> {
        self.get("Country")
    }

    pub fn phone(&self) -> Option<&str> {
        self.get("Phone")
    }

    pub fn email(&self) -> Option<&str> {
        self.get("EmailAddress")
    }
}

/// Every contact role of a domain. Always fully populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainContacts {
    #[serde(rename = "registrant_contact")]
    pub registrant: Contact,
    #[serde(rename = "admin_contact")]
    pub admin: Contact,
    #[serde(rename = "technical_contact")]
    pub technical: Contact,
    #[serde(rename = "billing_contact")]
    pub billing: Contact,
}

impl DomainContacts {
    pub fn get(&self, role: ContactRole) -> &Contact {
        match role {
            ContactRole::Registrant => &self.registrant,
            ContactRole::Admin => &self.admin,
            ContactRole::Technical => &self.technical,
            ContactRole::Billing => &self.billing,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContactRole, &Contact)> {
        ContactRole::ALL.into_iter().map(move |role| (role, self.get(role)))
    }
}

/// A partial contact assignment: any one to four roles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    contacts: BTreeMap<ContactRole, Contact>,
}

impl ContactUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(contact: Contact) -> Self {
        ContactRole::ALL
            .into_iter()
            .fold(Self::new(), |update, role| update.with(role, contact.clone()))
    }

    pub fn with(mut self, role: ContactRole, contact: Contact) -> Self {
        self.contacts.insert(role, contact);
        self
    }

    pub fn registrant(self, contact: Contact) -> Self {
        self.with(ContactRole::Registrant, contact)
    }

    pub fn admin(self, contact: Contact) -> Self {
        self.with(ContactRole::Admin, contact)
    }

    pub fn technical(self, contact: Contact) -> Self {
        self.with(ContactRole::Technical, contact)
    }

    pub fn billing(self, contact: Contact) -> Self {
        self.with(ContactRole::Billing, contact)
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.contacts.len() == ContactRole::ALL.len()
    }

    /// Supplied roles in registrant, admin, technical, billing order.
    pub fn iter(&self) -> impl Iterator<Item = (ContactRole, &Contact)> {
        self.contacts.iter().map(|(role, contact)| (*role, contact))
    }
}

/// Snapshot of one domain assembled from several remote calls.
///
/// Never updated in place: mutations hand back a freshly fetched value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub name: DomainName,
    pub created_at: DateTime<Utc>,
    pub locked: bool,
    pub auto_renew: bool,
    pub nameservers: BTreeSet<String>,
    pub contacts: DomainContacts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_name_split() {
        let name = DomainName::parse("Example.CO.uk.").unwrap();
        assert_eq!(name.sld(), "example");
        assert_eq!(name.tld(), "co.uk");
        assert_eq!(name.to_string(), "example.co.uk");
    }

    #[test]
    fn test_domain_name_rejects_malformed() {
        for bad in ["", "   ", "localhost", ".com", "example.", "example..com", "ex ample.com"] {
            assert!(
                matches!(
                    DomainName::parse(bad),
                    Err(RegistrarError::InvalidDomainName { .. })
                ),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_contact_round_trip() {
        let mut fields = BTreeMap::new();
        fields.insert("FirstName".to_string(), "Ada".to_string());
        fields.insert("EmailAddress".to_string(), "ada@example.com".to_string());
        fields.insert("Fax".to_string(), String::new());

        let contact = Contact::from_fields(fields.clone());
        assert_eq!(contact.fields(), &fields);
        assert_eq!(contact.first_name(), Some("Ada"));
        assert_eq!(contact.email(), Some("ada@example.com"));
        assert_eq!(contact.into_fields(), fields);
    }

    #[test]
    fn test_party_id_ignores_empty_value() {
        let contact = Contact::default().with_field(PARTY_ID_FIELD, "");
        assert_eq!(contact.party_id(), None);
        assert!(contact.is_empty());
    }

    #[test]
    fn test_contact_update_orders_roles() {
        let update = ContactUpdate::new()
            .billing(Contact::default().with_field("FirstName", "B"))
            .registrant(Contact::default().with_field("FirstName", "R"));

        let roles: Vec<ContactRole> = update.iter().map(|(role, _)| role).collect();
        assert_eq!(roles, vec![ContactRole::Registrant, ContactRole::Billing]);
        assert!(!update.is_complete());
        assert!(ContactUpdate::all(Contact::default()).is_complete());
    }

    #[test]
    fn test_domain_contacts_serialize_with_role_keys() {
        let contact = Contact::default().with_field("FirstName", "Ada");
        let contacts = DomainContacts {
            registrant: contact.clone(),
            admin: contact.clone(),
            technical: contact.clone(),
            billing: contact,
        };
        let json = serde_json::to_value(&contacts).unwrap();
        assert_eq!(json["registrant_contact"]["FirstName"], "Ada");
        assert_eq!(json["billing_contact"]["FirstName"], "Ada");
    }
}
