use crate::domain::ports::PortError;
use crate::domain::{Term, TermSource};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::Duration;

#[derive(Debug)]
pub enum TermsClientError {
    Transport(reqwest::Error),
    Upstream { status: StatusCode },
    Decode(reqwest::Error),
}

impl fmt::Display for TermsClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermsClientError::Transport(err) => write!(f, "terms transport error: {err}"),
            TermsClientError::Upstream { status } => write!(f, "terms upstream error {status}"),
            TermsClientError::Decode(err) => write!(f, "terms response decode error: {err}"),
        }
    }
}

impl std::error::Error for TermsClientError {}

// Thin reqwest client for the admin term catalog.
#[derive(Clone)]
pub struct TermsClient {
    http: Client,
    pub base_url: String,
}

impl TermsClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn list_terms(&self) -> Result<Vec<Term>, TermsClientError> {
        let url = format!("{}/api/terms", self.base_url);
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(TermsClientError::Transport)?;
        let status = res.status();
        if !status.is_success() {
            return Err(TermsClientError::Upstream { status });
        }

        res.json::<Vec<Term>>()
            .await
            .map_err(TermsClientError::Decode)
    }
}

#[async_trait]
impl TermSource for TermsClient {
    async fn fetch_terms(&self) -> Result<Vec<Term>, PortError> {
        Ok(self.list_terms().await?)
    }
}
