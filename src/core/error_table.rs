//! Remote error text → error kind, per command.
//!
//! The remote API has no error codes at this layer and is not consistent
//! between commands: some are recognized by a phrase inside any error
//! message, `GetRenew`/`SetRenew` only by an exact entry in the error list,
//! and the registry-lock commands by their free-text status line. Each
//! command gets its own table so those differences stay visible.

use crate::domain::model::DomainName;
use crate::domain::responses::Envelope;
use crate::utils::error::{RegistrarError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    NotOwned,
    NotRegistered,
}

impl ErrorKind {
    fn into_error(self, domain: &DomainName) -> RegistrarError {
        let domain = domain.to_string();
        match self {
            Self::NotFound => RegistrarError::NotFound { domain },
            Self::NotOwned => RegistrarError::NotOwned { domain },
            Self::NotRegistered => RegistrarError::NotRegistered { domain },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Pattern appears inside any reported error message (case-insensitive).
    ErrorSubstring,
    /// Pattern is exactly one of the reported error messages.
    ErrorMembership,
    /// Pattern appears inside the status text, or failing that inside an
    /// error message. The status text is checked even on success.
    StatusSubstring,
}

#[derive(Debug, Clone, Copy)]
pub struct ErrorRule {
    pub pattern: &'static str,
    pub kind: ErrorKind,
}

const fn rule(pattern: &'static str, kind: ErrorKind) -> ErrorRule {
    ErrorRule { pattern, kind }
}

#[derive(Debug, Clone, Copy)]
pub struct ErrorTable {
    pub command: &'static str,
    pub mode: MatchMode,
    pub rules: &'static [ErrorRule],
}

const NOT_FOUND_PHRASES: &[ErrorRule] = &[
    rule("Domain name not found", ErrorKind::NotFound),
    rule("Domain name ID not found", ErrorKind::NotFound),
];

const REG_LOCK_RULES: &[ErrorRule] = &[
    rule("Command blocked", ErrorKind::NotOwned),
    rule("Object does not exist", ErrorKind::NotRegistered),
];

const RENEW_RULES: &[ErrorRule] = &[
    rule("Domain name ID not found", ErrorKind::NotOwned),
    rule("Domain name not registered", ErrorKind::NotRegistered),
];

pub const GET_CONTACTS: ErrorTable = ErrorTable {
    command: "GetContacts",
    mode: MatchMode::ErrorSubstring,
    rules: NOT_FOUND_PHRASES,
};

pub const UPDATE_CONTACTS: ErrorTable = ErrorTable {
    command: "Contacts",
    mode: MatchMode::ErrorSubstring,
    rules: &[rule("Domain name ID not found", ErrorKind::NotFound)],
};

pub const GET_DOMAIN_INFO: ErrorTable = ErrorTable {
    command: "GetDomainInfo",
    mode: MatchMode::ErrorSubstring,
    rules: &[
        rule("Domain name not found", ErrorKind::NotFound),
        rule("Domain name ID not found", ErrorKind::NotFound),
        rule("not in your account", ErrorKind::NotFound),
    ],
};

pub const GET_REG_LOCK: ErrorTable = ErrorTable {
    command: "GetRegLock",
    mode: MatchMode::StatusSubstring,
    rules: REG_LOCK_RULES,
};

pub const SET_REG_LOCK: ErrorTable = ErrorTable {
    command: "SetRegLock",
    mode: MatchMode::StatusSubstring,
    rules: REG_LOCK_RULES,
};

pub const GET_RENEW: ErrorTable = ErrorTable {
    command: "GetRenew",
    mode: MatchMode::ErrorMembership,
    rules: RENEW_RULES,
};

pub const SET_RENEW: ErrorTable = ErrorTable {
    command: "SetRenew",
    mode: MatchMode::ErrorMembership,
    rules: RENEW_RULES,
};

pub const GET_DNS: ErrorTable = ErrorTable {
    command: "GetDNS",
    mode: MatchMode::ErrorSubstring,
    rules: NOT_FOUND_PHRASES,
};

pub const GET_WHOIS_CONTACT: ErrorTable = ErrorTable {
    command: "GetWhoisContact",
    mode: MatchMode::ErrorSubstring,
    rules: &[rule("No results found", ErrorKind::NotFound)],
};

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl ErrorTable {
    /// The first rule matching this envelope, if any.
    pub fn classify(&self, envelope: &Envelope) -> Option<ErrorKind> {
        let errors = || envelope.errors.iter().map(String::as_str);
        let hit = |rule: &&ErrorRule| match self.mode {
            MatchMode::ErrorSubstring => {
                !envelope.is_success() && errors().any(|e| contains_ignore_case(e, rule.pattern))
            }
            MatchMode::ErrorMembership => {
                !envelope.is_success() && errors().any(|e| e == rule.pattern)
            }
            MatchMode::StatusSubstring => {
                let status_hit = envelope
                    .status_text
                    .as_deref()
                    .is_some_and(|status| contains_ignore_case(status, rule.pattern));
                status_hit
                    || (!envelope.is_success()
                        && errors().any(|e| contains_ignore_case(e, rule.pattern)))
            }
        };
        self.rules.iter().find(hit).map(|rule| rule.kind)
    }

    /// Turn a reported failure into a `RegistrarError`; `Ok` when the
    /// envelope reports success and no rule matched.
    pub fn check(&self, envelope: &Envelope, domain: &DomainName) -> Result<()> {
        if let Some(kind) = self.classify(envelope) {
            return Err(kind.into_error(domain));
        }
        if envelope.is_success() {
            return Ok(());
        }
        Err(self.unknown(envelope))
    }

    pub fn unknown(&self, envelope: &Envelope) -> RegistrarError {
        let mut errors = envelope.errors.clone();
        if errors.is_empty() {
            errors.push(
                envelope
                    .status_text
                    .clone()
                    .unwrap_or_else(|| format!("ErrCount={}", envelope.error_count)),
            );
        }
        RegistrarError::Unknown {
            command: self.command.to_string(),
            errors,
        }
    }
}
