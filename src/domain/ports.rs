use crate::domain::responses::{Envelope, ResponseFormat};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

pub type Params = BTreeMap<String, String>;

/// Executes one named remote command. Authentication, encoding and the HTTP
/// exchange live behind this boundary.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn submit(&self, command: &str, params: &Params) -> Result<Envelope>;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn uid(&self) -> &str;
    fn password(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn response_format(&self) -> ResponseFormat;
}
