use chrono::Utc;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use log::info;
use shared::{ContactReceipt, ContactRequest, ErrorResponse, SubmitError};

/// Where the contact form sends membership requests.
#[derive(Clone, Debug, PartialEq)]
pub enum ContactTransport {
    Http { base_url: String },
    /// Waits, then accepts every request without contacting a server.
    Simulated { latency_ms: u32 },
}

impl ContactTransport {
    pub async fn send(self, request: ContactRequest) -> Result<ContactReceipt, SubmitError> {
        match self {
            ContactTransport::Http { base_url } => send_http(&base_url, &request).await,
            ContactTransport::Simulated { latency_ms } => {
                TimeoutFuture::new(latency_ms).await;
                info!("Simulated membership request for pass {}", request.fitness_pass);
                Ok(ContactReceipt {
                    reference: format!("demo-{}", Utc::now().timestamp_millis()),
                    message: "Thanks! We will contact you shortly.".to_string(),
                })
            }
        }
    }
}

async fn send_http(base_url: &str, request: &ContactRequest) -> Result<ContactReceipt, SubmitError> {
    let response = Request::post(&format!("{}/api/contact", base_url))
        .json(request)
        .map_err(|e| SubmitError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| SubmitError::Network(e.to_string()))?;

    if response.ok() {
        return response
            .json::<ContactReceipt>()
            .await
            .map_err(|e| SubmitError::Network(format!("unreadable response: {}", e)));
    }

    let status = response.status();
    let body = response.json::<ErrorResponse>().await.ok();
    Err(error_from_status(status, body))
}

/// Maps a non-2xx reply from the contact service.
pub fn error_from_status(status: u16, body: Option<ErrorResponse>) -> SubmitError {
    match (status, body) {
        (429, _) => SubmitError::RateLimited,
        (400, Some(ErrorResponse { fields: Some(fields), .. })) if !fields.is_empty() => {
            SubmitError::Invalid(fields)
        }
        (status, Some(body)) => SubmitError::Rejected {
            status,
            message: body.error,
        },
        (status, None) => SubmitError::Rejected {
            status,
            message: "Unexpected response from server".to_string(),
        },
    }
}
