use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use scout_logging::scout_debug;

use crate::decode::decode_html;
use crate::page::{Document, ElementHandle, PageController, PageSnapshot};
use crate::{ControllerError, FailureKind, HttpSettings};

/// Page controller for sites that render listings server-side.
///
/// Every `navigate` is one GET; the decoded body becomes the current
/// document. Static pages never load more content, so `scroll_gesture`
/// does nothing and discovery ends once its stall threshold is reached.
#[derive(Debug)]
pub struct HttpPageController {
    client: Option<reqwest::Client>,
    settings: HttpSettings,
    current: Option<PageSnapshot>,
}

impl HttpPageController {
    pub fn new(settings: HttpSettings) -> Result<Self, ControllerError> {
        let client = build_client(&settings)?;
        Ok(Self {
            client: Some(client),
            settings,
            current: None,
        })
    }

    fn client(&self) -> Result<&reqwest::Client, ControllerError> {
        self.client.as_ref().ok_or_else(ControllerError::released)
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ct))
    }

    async fn fetch(&self, url: &str) -> Result<PageSnapshot, ControllerError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| ControllerError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let response = self
            .client()?
            .get(parsed.clone())
            .header(USER_AGENT, self.settings.user_agent.as_str())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ControllerError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(ControllerError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        if let Some(ct) = content_type.as_deref() {
            if !self.is_content_type_allowed(ct) {
                return Err(ControllerError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    "unsupported content type",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(ControllerError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        let decoded = decode_html(&bytes, content_type.as_deref(), final_url.host_str())
            .map_err(|err| ControllerError::new(FailureKind::Decode, err.to_string()))?;
        scout_debug!(
            "Fetched {} ({} bytes, {})",
            final_url,
            bytes.len(),
            decoded.encoding_label
        );
        Ok(PageSnapshot::new(final_url.as_str(), decoded.html))
    }
}

#[async_trait::async_trait]
impl PageController for HttpPageController {
    async fn navigate(&mut self, url: &str) -> Result<(), ControllerError> {
        self.client()?;
        // A failed load leaves no stale page behind.
        self.current = None;
        let snapshot = self.fetch(url).await?;
        self.current = Some(snapshot);
        Ok(())
    }

    async fn current_document(&mut self) -> Result<PageSnapshot, ControllerError> {
        self.client()?;
        self.current
            .clone()
            .ok_or_else(|| ControllerError::new(FailureKind::NoDocument, "navigate first"))
    }

    async fn locate(
        &mut self,
        selector: &str,
        _timeout: Duration,
    ) -> Result<Option<ElementHandle>, ControllerError> {
        self.client()?;
        let Some(snapshot) = self.current.as_ref() else {
            return Ok(None);
        };
        Ok(contains_selector(snapshot, selector).then(|| ElementHandle::new(selector)))
    }

    async fn scroll_gesture(
        &mut self,
        _element: &ElementHandle,
        _offset: i32,
    ) -> Result<(), ControllerError> {
        self.client()?;
        Ok(())
    }

    async fn release(&mut self) -> Result<(), ControllerError> {
        self.client.take();
        self.current = None;
        Ok(())
    }
}

fn contains_selector(snapshot: &PageSnapshot, selector: &str) -> bool {
    matches!(snapshot.document().select_first(selector), Ok(Some(_)))
}

fn build_client(settings: &HttpSettings) -> Result<reqwest::Client, ControllerError> {
    reqwest::Client::builder()
        .connect_timeout(settings.connect_timeout())
        .timeout(settings.request_timeout())
        .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
        .build()
        .map_err(|err| ControllerError::new(FailureKind::Network, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> ControllerError {
    if err.is_timeout() {
        return ControllerError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return ControllerError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    ControllerError::new(FailureKind::Network, err.to_string())
}
