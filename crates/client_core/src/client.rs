use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use shared::{
    domain::{InputSurface, SubmissionPayload},
    error::ProtocolError,
    protocol::PredictionResponse,
};
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

const PREDICT_PATH: &str = "predict";

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("invalid server url: {0}")]
    InvalidServerUrl(#[from] url::ParseError),
    #[error("request to prediction endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected prediction response: {0}")]
    Protocol(#[from] ProtocolError),
    #[error("could not read upload {path}: {source}")]
    Upload {
        path: String,
        source: std::io::Error,
    },
}

/// A submission that produced no usable response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    pub reason: String,
}

impl From<PredictError> for TransportFailure {
    fn from(value: PredictError) -> Self {
        Self {
            reason: value.to_string(),
        }
    }
}

#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(
        &self,
        payload: Option<SubmissionPayload>,
    ) -> Result<PredictionResponse, PredictError>;
}

pub struct PredictClient {
    http: Client,
    endpoint: Url,
}

impl PredictClient {
    pub fn new(server_url: &str) -> Result<Self, PredictError> {
        Ok(Self {
            http: Client::new(),
            endpoint: predict_endpoint(server_url)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl PredictionService for PredictClient {
    async fn predict(
        &self,
        payload: Option<SubmissionPayload>,
    ) -> Result<PredictionResponse, PredictError> {
        let surface = payload.as_ref().map(SubmissionPayload::surface);
        let form = build_form(payload)?;

        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        // Error bodies arrive with 4xx statuses, so the status alone decides nothing.
        let parsed = PredictionResponse::from_json_str(&body);
        match &parsed {
            Ok(PredictionResponse::Sections(result)) => info!(
                endpoint = %self.endpoint,
                %status,
                ?surface,
                sections = result.len(),
                "prediction received"
            ),
            Ok(PredictionResponse::Failed { error }) => warn!(
                endpoint = %self.endpoint,
                %status,
                ?surface,
                error = %error,
                "prediction rejected by server"
            ),
            Err(err) => warn!(
                endpoint = %self.endpoint,
                %status,
                ?surface,
                "undecodable prediction response: {err}"
            ),
        }
        Ok(parsed?)
    }
}

fn predict_endpoint(server_url: &str) -> Result<Url, PredictError> {
    let mut base = Url::parse(server_url.trim())?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(PREDICT_PATH)?)
}

fn build_form(payload: Option<SubmissionPayload>) -> Result<Form, PredictError> {
    let form = Form::new();
    let Some(payload) = payload else {
        return Ok(form);
    };
    let field = payload.surface().form_field();
    Ok(match payload {
        SubmissionPayload::AbstractText(text) => form.text(field, text),
        SubmissionPayload::PubMedLink(link) => form.text(field, link),
        SubmissionPayload::UploadedFile(file) => {
            let mut part = Part::bytes(file.contents).file_name(file.filename);
            if let Some(mime) = file.mime_type.as_deref() {
                part = part.mime_str(mime)?;
            }
            form.part(InputSurface::File.form_field(), part)
        }
    })
}
