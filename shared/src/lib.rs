//! Membership request form logic used by both the site and the contact service.

pub mod calendar;
pub mod dto;
pub mod error;
pub mod form;
pub mod passes;
pub mod validation;

pub use dto::{ContactReceipt, ContactRequest, ErrorResponse};
pub use error::SubmitError;
pub use form::{Field, FormController, FormData, FormErrors, Step, SubmissionState};
pub use passes::{FitnessPass, PassOption, PASS_OPTIONS};
