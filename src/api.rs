use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::analysis::dto::{AnalysisEnvelope, AnalysisRequest, AnalysisResult};
use crate::config::AppConfig;
use crate::error::{FlowError, Result};
use crate::profile::dto::{CreateUserRequest, UserRecord};

pub const USERS_PATH: &str = "/api/users";
pub const ANALYSIS_PATH: &str = "/api/analysis";

/// The two remote calls the flow makes. One request per call, no retries.
#[async_trait]
pub trait PhysiqueApi: Send + Sync {
    async fn create_user(&self, req: &CreateUserRequest) -> Result<UserRecord>;
    async fn analyze(&self, req: &AnalysisRequest) -> Result<AnalysisResult>;
}

#[derive(Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    config: Arc<AppConfig>,
}

impl HttpApi {
    pub fn new(config: Arc<AppConfig>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("build http client")?;
        Ok(Self { client, config })
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        debug!(%url, "POST");
        let resp = self.client.post(&url).json(body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            warn!(%url, %status, "non-success response");
            return Err(FlowError::Server {
                status: status.as_u16(),
            });
        }

        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| FlowError::Decode(e.to_string()))
    }
}

#[async_trait]
impl PhysiqueApi for HttpApi {
    async fn create_user(&self, req: &CreateUserRequest) -> Result<UserRecord> {
        self.post_json(USERS_PATH, req).await
    }

    async fn analyze(&self, req: &AnalysisRequest) -> Result<AnalysisResult> {
        let envelope: AnalysisEnvelope = self.post_json(ANALYSIS_PATH, req).await?;
        Ok(envelope.into_result())
    }
}
