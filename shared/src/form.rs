//! State of the two-step membership request form.
//!
//! [`FormController`] owns everything the contact section renders: field
//! values, per-field errors, the current step and where the submission is in
//! its lifecycle. It performs no I/O; the caller sends the request returned by
//! [`FormController::submit`] and reports back through
//! [`FormController::finish_submission`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::dto::{ContactReceipt, ContactRequest};
use crate::error::SubmitError;
use crate::passes::FitnessPass;
use crate::validation;

/// How long the success message stays up before the form resets.
pub const ACKNOWLEDGE_DELAY_MS: u32 = 5_000;

/// Latency of the offline demo transport.
pub const SIMULATED_LATENCY_MS: u32 = 1_500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    Phone,
    Date,
    CinNumber,
    FitnessPass,
    AdditionalInfo,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::FullName,
        Field::Phone,
        Field::Date,
        Field::CinNumber,
        Field::FitnessPass,
        Field::AdditionalInfo,
    ];

    /// Name used for the input element and on the wire.
    pub fn name(self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::Phone => "phone",
            Field::Date => "date",
            Field::CinNumber => "cinNumber",
            Field::FitnessPass => "fitnessPass",
            Field::AdditionalInfo => "additionalInfo",
        }
    }

    /// Step on which the field is entered.
    pub fn step(self) -> Step {
        match self {
            Field::FullName | Field::Phone => Step::One,
            _ => Step::Two,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| format!("unknown form field: {}", s))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    #[default]
    One,
    Two,
}

impl Step {
    pub fn number(self) -> u8 {
        match self {
            Step::One => 1,
            Step::Two => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Submitted,
}

/// User-visible validation messages keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<Field, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn set(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Removes the error for `field`, returning whether one was set.
    pub fn clear(&mut self, field: Field) -> bool {
        self.0.remove(&field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// First step that has an error on one of its fields.
    pub fn earliest_step(&self) -> Option<Step> {
        self.0.keys().map(|field| field.step()).min()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    pub full_name: String,
    pub phone: String,
    pub date: String,
    pub cin_number: String,
    pub fitness_pass: Option<FitnessPass>,
    pub additional_info: String,
}

impl FormData {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Phone => &self.phone,
            Field::Date => &self.date,
            Field::CinNumber => &self.cin_number,
            Field::FitnessPass => self.fitness_pass.map(FitnessPass::id).unwrap_or(""),
            Field::AdditionalInfo => &self.additional_info,
        }
    }

    pub fn to_request(&self) -> ContactRequest {
        let notes = self.additional_info.trim();
        ContactRequest {
            full_name: self.full_name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            date: self.date.clone(),
            cin_number: self.cin_number.trim().to_string(),
            fitness_pass: self.value(Field::FitnessPass).to_string(),
            additional_info: (!notes.is_empty()).then(|| notes.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormController {
    data: FormData,
    errors: FormErrors,
    step: Step,
    state: SubmissionState,
    selected_date: Option<NaiveDate>,
    submit_error: Option<String>,
    receipt: Option<ContactReceipt>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    /// Form-level message from the last failed submission.
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn receipt(&self) -> Option<&ContactReceipt> {
        self.receipt.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    /// Stores raw input for `field` and clears that field's error.
    ///
    /// Phone input is sanitized before it is stored. An unknown pass id leaves
    /// the pass unselected.
    pub fn update_field(&mut self, field: Field, value: &str) {
        match field {
            Field::FullName => self.data.full_name = value.to_string(),
            Field::Phone => self.data.phone = validation::sanitize_phone(value),
            Field::Date => {
                self.data.date = value.to_string();
                self.selected_date = calendar::parse_input(value);
            }
            Field::CinNumber => self.data.cin_number = value.to_string(),
            Field::FitnessPass => self.data.fitness_pass = FitnessPass::from_id(value),
            Field::AdditionalInfo => self.data.additional_info = value.to_string(),
        }
        self.errors.clear(field);
    }

    pub fn select_pass(&mut self, pass: FitnessPass) {
        self.data.fitness_pass = Some(pass);
        self.errors.clear(Field::FitnessPass);
    }

    /// Picks a visit date from the calendar. Days before `today` are refused.
    pub fn select_date(&mut self, date: NaiveDate, today: NaiveDate) -> bool {
        if date < today {
            debug!("Ignoring past visit date {}", date);
            return false;
        }
        self.data.date = calendar::format_for_input(date);
        self.selected_date = Some(date);
        self.errors.clear(Field::Date);
        true
    }

    /// Recomputes all errors for `step`, replacing the previous set.
    pub fn validate(&mut self, step: Step) -> bool {
        self.errors = validation::validate_step(step, &self.data);
        self.errors.is_empty()
    }

    pub fn next_step(&mut self) -> bool {
        if self.validate(Step::One) {
            self.step = Step::Two;
            true
        } else {
            false
        }
    }

    pub fn prev_step(&mut self) {
        self.step = Step::One;
    }

    /// Starts a submission and returns the request to send.
    ///
    /// Returns `None` when a submission is already under way, when the current
    /// step fails validation, or when the form is still on step one (which
    /// advances instead, as the enter key does there).
    pub fn submit(&mut self) -> Option<ContactRequest> {
        if self.state != SubmissionState::Idle {
            debug!("Submit ignored while {:?}", self.state);
            return None;
        }
        if self.step == Step::One {
            self.next_step();
            return None;
        }
        self.submit_error = None;
        if !self.validate(self.step) {
            debug!("Submit blocked by {} field error(s)", self.errors.len());
            return None;
        }
        self.state = SubmissionState::Submitting;
        Some(self.data.to_request())
    }

    /// Applies the outcome of the request returned by [`submit`](Self::submit).
    pub fn finish_submission(&mut self, result: Result<ContactReceipt, SubmitError>) -> bool {
        if self.state != SubmissionState::Submitting {
            warn!("Submission result arrived while {:?}, dropping it", self.state);
            return false;
        }
        match result {
            Ok(receipt) => {
                info!("Membership request accepted: {}", receipt.reference);
                self.receipt = Some(receipt);
                self.state = SubmissionState::Submitted;
            }
            Err(err) => {
                warn!("Membership request failed: {}", err);
                if let SubmitError::Invalid(errors) = &err {
                    self.errors = errors.clone();
                    if let Some(step) = errors.earliest_step() {
                        self.step = step;
                    }
                }
                self.submit_error = Some(err.to_string());
                self.state = SubmissionState::Idle;
            }
        }
        true
    }

    /// Ends the success window: clears every field and returns to step one.
    pub fn acknowledge(&mut self) -> bool {
        if self.state != SubmissionState::Submitted {
            return false;
        }
        *self = Self::default();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 3, 10).unwrap()
    }

    fn on_step_two() -> FormController {
        let mut form = FormController::new();
        form.update_field(Field::FullName, "Yassine Benali");
        form.update_field(Field::Phone, "+33123456789");
        assert!(form.next_step());
        form
    }

    fn complete() -> FormController {
        let mut form = on_step_two();
        assert!(form.select_date(NaiveDate::from_ymd_opt(2030, 3, 12).unwrap(), today()));
        form.update_field(Field::CinNumber, "BK472915");
        form.select_pass(FitnessPass::Total);
        form.update_field(Field::AdditionalInfo, "Evening visits");
        form
    }

    fn receipt() -> ContactReceipt {
        ContactReceipt {
            reference: "a1b2".into(),
            message: "Thanks".into(),
        }
    }

    #[test]
    fn empty_name_blocks_next_step() {
        for name in ["", "   ", "\t"] {
            let mut form = FormController::new();
            form.update_field(Field::FullName, name);
            form.update_field(Field::Phone, "0612345678");
            assert!(!form.next_step());
            assert_eq!(form.step(), Step::One);
            assert_eq!(form.errors().get(Field::FullName), Some("Name is required"));
            assert!(!form.errors().contains(Field::Phone));
        }
    }

    #[test]
    fn bad_phone_blocks_next_step() {
        let mut form = FormController::new();
        form.update_field(Field::FullName, "Yassine");
        form.update_field(Field::Phone, "12345");
        assert!(!form.next_step());
        assert!(form.errors().get(Field::Phone).unwrap().starts_with("Please enter a valid phone number"));
    }

    #[test]
    fn phone_is_sanitized_on_input() {
        let mut form = FormController::new();
        form.update_field(Field::Phone, "+33 (1) 23-45abc");
        assert_eq!(form.data().phone, "+33 (1) 23-45");
        form.update_field(Field::Phone, "0123456789012345678901234");
        assert_eq!(form.data().phone.len(), 20);
    }

    #[test]
    fn editing_clears_only_that_fields_error() {
        let mut form = FormController::new();
        assert!(!form.next_step());
        assert!(form.errors().contains(Field::FullName));
        assert!(form.errors().contains(Field::Phone));

        form.update_field(Field::FullName, "Y");
        assert!(!form.errors().contains(Field::FullName));
        assert_eq!(form.errors().get(Field::Phone), Some("Phone number is required"));
    }

    #[test]
    fn prev_step_keeps_step_two_values() {
        let mut form = complete();
        form.prev_step();
        assert_eq!(form.step(), Step::One);
        assert_eq!(form.data().cin_number, "BK472915");
        assert_eq!(form.data().fitness_pass, Some(FitnessPass::Total));
        assert_eq!(form.data().date, "2030-03-12");
        assert_eq!(form.data().additional_info, "Evening visits");

        assert!(form.next_step());
        assert_eq!(form.data().cin_number, "BK472915");
    }

    #[test]
    fn missing_pass_keeps_form_idle() {
        let mut form = on_step_two();
        form.update_field(Field::Date, "2030-03-12");
        form.update_field(Field::CinNumber, "BK472915");

        assert!(form.submit().is_none());
        assert_eq!(form.state(), SubmissionState::Idle);
        assert_eq!(form.errors().get(Field::FitnessPass), Some("Please select a membership type"));
        assert_eq!(form.errors().len(), 1);
    }

    #[test]
    fn successful_submission_runs_full_lifecycle() {
        let mut form = complete();
        let request = form.submit().expect("valid form submits");
        assert_eq!(form.state(), SubmissionState::Submitting);
        assert_eq!(request.full_name, "Yassine Benali");
        assert_eq!(request.fitness_pass, "total");
        assert_eq!(request.date, "2030-03-12");
        assert_eq!(request.additional_info.as_deref(), Some("Evening visits"));

        assert!(form.finish_submission(Ok(receipt())));
        assert_eq!(form.state(), SubmissionState::Submitted);
        assert_eq!(form.receipt().map(|r| r.reference.as_str()), Some("a1b2"));

        assert!(form.acknowledge());
        assert_eq!(form.state(), SubmissionState::Idle);
        assert_eq!(form.step(), Step::One);
        assert_eq!(form.data(), &FormData::default());
        assert!(form.selected_date().is_none());
        assert!(form.errors().is_empty());
        assert!(form.receipt().is_none());
    }

    #[test]
    fn submit_is_noop_while_in_flight() {
        let mut form = complete();
        assert!(form.submit().is_some());
        assert!(form.submit().is_none());
        assert_eq!(form.state(), SubmissionState::Submitting);

        assert!(form.finish_submission(Ok(receipt())));
        assert!(form.submit().is_none());
        assert_eq!(form.state(), SubmissionState::Submitted);
    }

    #[test]
    fn submit_on_step_one_advances_instead() {
        let mut form = FormController::new();
        form.update_field(Field::FullName, "Yassine");
        form.update_field(Field::Phone, "0612345678");
        assert!(form.submit().is_none());
        assert_eq!(form.step(), Step::Two);
        assert_eq!(form.state(), SubmissionState::Idle);
    }

    #[test]
    fn transport_failure_returns_to_idle_with_data() {
        let mut form = complete();
        form.submit().unwrap();
        assert!(form.finish_submission(Err(SubmitError::Network("offline".into()))));
        assert_eq!(form.state(), SubmissionState::Idle);
        assert_eq!(form.step(), Step::Two);
        assert_eq!(form.data().cin_number, "BK472915");
        assert_eq!(form.submit_error(), Some("Could not reach the server: offline"));

        assert!(form.submit().is_some());
        assert!(form.submit_error().is_none());
    }

    #[test]
    fn server_field_errors_send_user_back_to_their_step() {
        let mut form = complete();
        form.submit().unwrap();
        let mut errors = FormErrors::new();
        errors.set(Field::Phone, "Please enter a valid phone number");
        errors.set(Field::Date, "Please select a date from today onward");
        assert!(form.finish_submission(Err(SubmitError::Invalid(errors))));

        assert_eq!(form.step(), Step::One);
        assert_eq!(form.state(), SubmissionState::Idle);
        assert!(form.errors().contains(Field::Phone));
        assert!(form.errors().contains(Field::Date));
    }

    #[test]
    fn server_notes_error_is_shown_on_step_two() {
        let mut form = complete();
        form.submit().unwrap();
        let mut errors = FormErrors::new();
        errors.set(Field::AdditionalInfo, "Additional information must be at most 1000 characters");
        assert!(form.finish_submission(Err(SubmitError::Invalid(errors))));

        assert_eq!(form.step(), Step::Two);
        assert_eq!(
            form.errors().get(Field::AdditionalInfo),
            Some("Additional information must be at most 1000 characters")
        );
        assert_eq!(form.data().additional_info, "Evening visits");

        form.update_field(Field::AdditionalInfo, "Evenings");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn overlong_notes_block_submit() {
        let mut form = complete();
        form.update_field(Field::AdditionalInfo, &"n".repeat(crate::validation::MAX_NOTES_LEN + 1));
        assert!(form.submit().is_none());
        assert_eq!(form.state(), SubmissionState::Idle);
        assert!(form.errors().contains(Field::AdditionalInfo));
    }

    #[test]
    fn stray_results_and_early_acknowledge_are_ignored() {
        let mut form = complete();
        assert!(!form.finish_submission(Ok(receipt())));
        assert!(!form.acknowledge());
        assert_eq!(form.state(), SubmissionState::Idle);
        assert_eq!(form.data().cin_number, "BK472915");
    }

    #[test]
    fn past_dates_cannot_be_selected() {
        let mut form = on_step_two();
        let yesterday = NaiveDate::from_ymd_opt(2030, 3, 9).unwrap();
        assert!(!form.select_date(yesterday, today()));
        assert!(form.data().date.is_empty());
        assert!(form.select_date(today(), today()));
        assert_eq!(form.data().date, "2030-03-10");
        assert_eq!(form.selected_date(), Some(today()));
    }

    #[test]
    fn choosing_a_pass_clears_its_error() {
        let mut form = on_step_two();
        assert!(form.submit().is_none());
        assert!(form.errors().contains(Field::FitnessPass));
        assert!(form.errors().contains(Field::CinNumber));

        form.select_pass(FitnessPass::Kids);
        assert!(!form.errors().contains(Field::FitnessPass));
        assert!(form.errors().contains(Field::CinNumber));

        form.update_field(Field::FitnessPass, "platinum");
        assert_eq!(form.data().fitness_pass, None);
    }

    #[test]
    fn field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(field.name().parse::<Field>(), Ok(field));
        }
        assert!("email".parse::<Field>().is_err());
    }
}
