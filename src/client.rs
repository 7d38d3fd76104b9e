//! Network client for a GNAP grant endpoint.
//!
//! Requires the `remote` feature (enabled by default). The client validates
//! and encodes a record, POSTs it, and decodes the response body. It performs
//! no retries.

use reqwest::blocking::Client as HttpClient;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::gnap::{
    AccessTokenRequest, Client, GrantRequest, GrantResponse, InteractionRequest, SubjectRequest,
};
use crate::record::OpenRecord;
use crate::types::ClientOptions;

const JSON: &str = "application/json";

/// Blocking client for one grant endpoint.
#[derive(Debug, Clone)]
pub struct GrantClient {
    http: HttpClient,
    endpoint: String,
}

impl GrantClient {
    /// Create a client for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, options: ClientOptions) -> Result<Self, ClientError> {
        let endpoint = endpoint.into();
        let http = HttpClient::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent)
            .build()
            .map_err(|source| ClientError::Http {
                url: endpoint.clone(),
                source,
            })?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Validate and send `request`, decoding the response body as `Res`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Invalid` without sending anything if the request
    /// fails validation, `ClientError::Http` on transport failures and
    /// non-success statuses, and `ClientError::Response` if the body does not
    /// decode.
    pub fn send<Req, Res>(&self, request: &Req) -> Result<Res, ClientError>
    where
        Req: OpenRecord,
        Res: OpenRecord,
    {
        request.validate()?;
        let body = request.encode();
        debug!(
            url = %self.endpoint,
            record = Req::schema().name,
            bytes = body.len(),
            "sending request"
        );

        let http_error = |source| ClientError::Http {
            url: self.endpoint.clone(),
            source,
        };
        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .body(body)
            .send()
            .map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.endpoint, %status, "request rejected");
        }
        let bytes = response
            .error_for_status()
            .and_then(|response| response.bytes())
            .map_err(http_error)?;

        crate::decoder::decode(&bytes).map_err(|source| ClientError::Response {
            url: self.endpoint.clone(),
            source,
        })
    }

    /// Start building a grant request.
    pub fn grant_request(&self) -> GrantRequestCmd<'_> {
        GrantRequestCmd {
            client: self,
            payload: GrantRequest::default(),
        }
    }
}

/// Builder for a grant request sent through a [`GrantClient`].
#[derive(Debug, Clone)]
pub struct GrantRequestCmd<'a> {
    client: &'a GrantClient,
    payload: GrantRequest,
}

impl GrantRequestCmd<'_> {
    pub fn access_token(mut self, request: AccessTokenRequest) -> Self {
        self.payload.add_access_tokens([request]);
        self
    }

    pub fn capability(mut self, capability: impl Into<String>) -> Self {
        self.payload.add_capabilities([capability]);
        self
    }

    pub fn client(mut self, client: Client) -> Self {
        self.payload.set_client(client);
        self
    }

    pub fn interact(mut self, interact: InteractionRequest) -> Self {
        self.payload.set_interact(interact);
        self
    }

    pub fn subject(mut self, subject: SubjectRequest) -> Self {
        self.payload.set_subject(subject);
        self
    }

    /// The request built so far.
    pub fn payload(&self) -> &GrantRequest {
        &self.payload
    }

    pub fn send(self) -> Result<GrantResponse, ClientError> {
        self.client.send(&self.payload)
    }
}
