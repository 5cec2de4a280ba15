use crate::adapters::codec;
use crate::domain::ports::{ConfigProvider, Params, Transport};
use crate::domain::responses::{Envelope, ResponseFormat};
use crate::utils::error::{RegistrarError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Submits commands to the reseller HTTP interface as query-string GETs.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    uid: String,
    password: String,
    format: ResponseFormat,
}

impl HttpTransport {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint().to_string(),
            uid: config.uid().to_string(),
            password: config.password().to_string(),
            format: config.response_format(),
        })
    }

    fn query<'a>(&'a self, command: &'a str, params: &'a Params) -> Vec<(&'a str, &'a str)> {
        let mut query = vec![
            ("command", command),
            ("uid", self.uid.as_str()),
            ("pw", self.password.as_str()),
            ("responsetype", self.format.as_param()),
        ];
        query.extend(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        query
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn submit(&self, command: &str, params: &Params) -> Result<Envelope> {
        tracing::debug!("Submitting {} to {} with {:?}", command, self.endpoint, params);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&self.query(command, params))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("{} response status: {}", command, status);
        if !status.is_success() {
            return Err(RegistrarError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let envelope = codec::decode(self.format, command, &body)?;
        if !envelope.is_success() {
            tracing::debug!("{} reported {} error(s): {:?}", command, envelope.error_count, envelope.errors);
        }
        Ok(envelope)
    }
}
