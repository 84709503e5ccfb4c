use crate::transport::ContactTransport;

#[cfg(debug_assertions)]
pub fn get_backend_url() -> &'static str {
    "http://localhost:3001"  // Development URL when running the contact service locally
}

#[cfg(not(debug_assertions))]
pub fn get_backend_url() -> &'static str {
    ""  // Production URL, same origin
}

#[cfg(not(feature = "demo"))]
pub fn contact_transport() -> ContactTransport {
    ContactTransport::Http {
        base_url: get_backend_url().to_string(),
    }
}

#[cfg(feature = "demo")]
pub fn contact_transport() -> ContactTransport {
    ContactTransport::Simulated {
        latency_ms: shared::form::SIMULATED_LATENCY_MS,
    }
}
