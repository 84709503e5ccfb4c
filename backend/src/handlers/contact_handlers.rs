use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use chrono::{Duration, NaiveDate, Utc};
use shared::{calendar, validation, ContactReceipt, ContactRequest};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    error::{ApiError, StorageError},
    models::membership_models::{MembershipRequest, NewMembershipRequest},
    repositories::membership_requests::Saved,
    AppState,
};

/// First visit day still accepted. Visitors west of UTC can be a day behind
/// the UTC date, so their "today" stays valid.
pub fn earliest_visit_date() -> NaiveDate {
    Utc::now().date_naive() - Duration::days(1)
}

/// Accepts a membership request from the contact form.
///
/// One request is kept per visitor (phone digits and CIN) and visit day. A new
/// one is created with 201. Resending it unchanged returns the stored receipt
/// with 200 and costs no quota; changed details replace the stored ones and
/// also answer 200 with the same reference.
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ContactReceipt>), ApiError> {
    let errors = validation::validate_request(&request, earliest_visit_date());
    if !errors.is_empty() {
        info!("Rejected membership request with {} invalid field(s)", errors.len());
        return Err(ApiError::Validation(errors));
    }

    let now = Utc::now().timestamp() as i32;
    let new_request = NewMembershipRequest::from_request(&request, Uuid::new_v4().to_string(), now);

    let repository = state.membership_requests.clone();
    let (phone_key, visit_date, cin_number) = (
        new_request.phone_key.clone(),
        new_request.visit_date.clone(),
        new_request.cin_number.clone(),
    );
    let existing =
        run_blocking(move || repository.find_existing(&phone_key, &visit_date, &cin_number)).await?;
    if let Some(existing) = existing.filter(|existing| existing.matches(&new_request)) {
        info!(reference = %existing.reference, "Membership request already on file");
        return Ok((StatusCode::OK, Json(receipt_for(&existing))));
    }

    if !state.rate_limiter.check(&request.phone) {
        warn!("Rate limited membership requests for a phone number");
        return Err(ApiError::RateLimited);
    }

    let repository = state.membership_requests.clone();
    let saved = run_blocking(move || repository.save(new_request)).await?;
    let stored = saved.request();

    let status = match &saved {
        Saved::Created(_) => StatusCode::CREATED,
        Saved::Updated(_) | Saved::Unchanged(_) => StatusCode::OK,
    };
    info!(
        id = stored.id,
        reference = %stored.reference,
        pass = %stored.fitness_pass,
        visit_date = %stored.visit_date,
        created = status == StatusCode::CREATED,
        "Stored membership request"
    );

    Ok((status, Json(receipt_for(stored))))
}

fn receipt_for(stored: &MembershipRequest) -> ContactReceipt {
    let first_name = stored.full_name.split_whitespace().next().unwrap_or_default();
    ContactReceipt {
        reference: stored.reference.clone(),
        message: format!(
            "Thanks {}! We will call you to confirm your visit on {}.",
            first_name,
            calendar::format_for_display(&stored.visit_date)
        ),
    }
}

// Diesel calls are synchronous, keep them off the async workers
async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("storage task failed: {}", e)))?
        .map_err(ApiError::from)
}
