//! Normalized response envelope and one typed schema per remote command.
//!
//! The remote API answers every command with a flat bag of string fields.
//! Core logic never probes that bag directly: it asks the envelope to
//! deserialize itself into the schema of the command it just issued.

use crate::utils::error::{RegistrarError, Result};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Encoding requested from the remote API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Text,
    Json,
}

impl ResponseFormat {
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Envelope {
    pub command: String,
    pub error_count: usize,
    pub errors: Vec<String>,
    /// Free-text registry status (`RRPText`), when the remote sent one.
    pub status_text: Option<String>,
    pub fields: BTreeMap<String, String>,
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        self.error_count == 0
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Deserialize the field bag into a command schema.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        let object: serde_json::Map<String, serde_json::Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();

        serde_json::from_value(serde_json::Value::Object(object)).map_err(|e| {
            RegistrarError::MalformedResponse {
                command: self.command.clone(),
                message: e.to_string(),
            }
        })
    }
}

fn flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(de::Error::custom(format!("not a flag: {:?}", other))),
    }
}

/// `GetContacts`: per-role fields flattened under their role prefix.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactsReply {
    #[serde(rename = "BillingPartyID", default)]
    pub billing_party_id: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

/// `GetDomainInfo`
#[derive(Debug, Clone, Deserialize)]
pub struct DomainInfoReply {
    #[serde(rename = "DomainName")]
    pub domain_name: Option<String>,
    #[serde(rename = "DomainNameID")]
    pub domain_name_id: Option<String>,
}

impl DomainInfoReply {
    pub fn has_info_block(&self) -> bool {
        self.domain_name
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty())
    }
}

/// `GetRegLock`
#[derive(Debug, Clone, Deserialize)]
pub struct RegLockReply {
    #[serde(rename = "RegLock", deserialize_with = "flag")]
    pub locked: bool,
}

/// `GetRenew`
#[derive(Debug, Clone, Deserialize)]
pub struct RenewReply {
    #[serde(rename = "AutoRenew", deserialize_with = "flag")]
    pub auto_renew: bool,
}

/// `GetDNS`: nameservers arrive as `DNS1`, `DNS2`, ...
#[derive(Debug, Clone, Deserialize)]
pub struct DnsReply {
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl DnsReply {
    pub fn nameservers(&self) -> Vec<String> {
        let mut numbered: Vec<(u32, &str)> = self
            .fields
            .iter()
            .filter_map(|(key, value)| {
                let index = key.strip_prefix("DNS")?.parse::<u32>().ok()?;
                let value = value.trim();
                (!value.is_empty()).then_some((index, value))
            })
            .collect();
        numbered.sort_by_key(|(index, _)| *index);
        numbered.into_iter().map(|(_, ns)| ns.to_string()).collect()
    }
}

/// `GetWhoisContact`
#[derive(Debug, Clone, Deserialize)]
pub struct WhoisReply {
    #[serde(rename = "created-date")]
    pub created_date: Option<String>,
}
