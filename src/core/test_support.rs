use crate::domain::ports::{Params, Transport};
use crate::domain::responses::Envelope;
use crate::utils::error::{RegistrarError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub command: String,
    pub params: Params,
}

/// In-memory transport answering from per-command queues. The last queued
/// response for a command keeps being returned once the others are used up.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<HashMap<String, VecDeque<Envelope>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, command: &str, mut envelope: Envelope) -> Self {
        envelope.command = command.to_string();
        self.responses
            .lock()
            .unwrap()
            .entry(command.to_string())
            .or_default()
            .push_back(envelope);
        self
    }

    /// Drop anything queued for `command` and answer with `envelope` instead.
    pub fn replace(self, command: &str, envelope: Envelope) -> Self {
        self.responses.lock().unwrap().remove(command);
        self.respond(command, envelope)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, command: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.command == command)
            .collect()
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.command).collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn submit(&self, command: &str, params: &Params) -> Result<Envelope> {
        self.calls.lock().unwrap().push(RecordedCall {
            command: command.to_string(),
            params: params.clone(),
        });

        let mut responses = self.responses.lock().unwrap();
        let queue = responses
            .get_mut(command)
            .ok_or_else(|| RegistrarError::MalformedResponse {
                command: command.to_string(),
                message: "no scripted response".to_string(),
            })?;
        let envelope = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        envelope.ok_or_else(|| RegistrarError::MalformedResponse {
            command: command.to_string(),
            message: "no scripted response".to_string(),
        })
    }
}

pub fn ok(fields: Vec<(String, String)>) -> Envelope {
    Envelope {
        fields: fields.into_iter().collect(),
        ..Envelope::default()
    }
}

pub fn ok_with(fields: &[(&str, &str)]) -> Envelope {
    ok(fields
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect())
}

pub fn with_errors(errors: &[&str]) -> Envelope {
    Envelope {
        error_count: errors.len(),
        errors: errors.iter().map(|e| e.to_string()).collect(),
        ..Envelope::default()
    }
}

pub fn with_status(status: &str, errors: &[&str]) -> Envelope {
    Envelope {
        status_text: Some(status.to_string()),
        ..with_errors(errors)
    }
}

/// Every response `get_domain` needs for a healthy, owned domain.
pub fn healthy_domain(transport: ScriptedTransport, locked: bool) -> ScriptedTransport {
    let flag = if locked { "1" } else { "0" };
    transport
        .respond(
            "GetDomainInfo",
            ok_with(&[("DomainName", "example.com"), ("DomainNameID", "340724808")]),
        )
        .respond("GetRegLock", ok_with(&[("RegLock", flag)]))
        .respond("GetRenew", ok_with(&[("AutoRenew", "1")]))
        .respond(
            "GetDNS",
            ok_with(&[("DNS1", "ns1.example.net"), ("DNS2", "ns2.example.net")]),
        )
        .respond(
            "GetWhoisContact",
            ok_with(&[("created-date", "2010-06-02 09:14:53")]),
        )
        .respond(
            "GetContacts",
            ok_with(&[
                ("RegistrantFirstName", "Ada"),
                ("RegistrantPartyID", "{R}"),
                ("AdminFirstName", "Reseller"),
                ("AdminPartyID", "{SELF}"),
                ("BillingPartyID", "{SELF}"),
            ]),
        )
}
