//! Field rules shared by the form and the contact endpoint.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::calendar;
use crate::dto::ContactRequest;
use crate::form::{Field, FormData, FormErrors, Step};
use crate::passes::FitnessPass;

pub const MAX_PHONE_LEN: usize = 20;
pub const MAX_NAME_LEN: usize = 120;
pub const MAX_CIN_LEN: usize = 32;
pub const MAX_NOTES_LEN: usize = 1000;

pub const NAME_REQUIRED: &str = "Name is required";
pub const PHONE_REQUIRED: &str = "Phone number is required";
pub const PHONE_INVALID: &str =
    "Please enter a valid phone number (international: +1234567890 or local: 0123456789)";
pub const DATE_REQUIRED: &str = "Please select a date";
pub const DATE_IN_PAST: &str = "Please select a date from today onward";
pub const CIN_REQUIRED: &str = "ID Number is required";
pub const PASS_REQUIRED: &str = "Please select a membership type";

static INTERNATIONAL_PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[0-9]{7,15}$").expect("valid international phone pattern"));
static LOCAL_PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0[0-9]{8,9}$").expect("valid local phone pattern"));

/// Keeps digits, `+`, space, hyphen and parentheses, capped at 20 chars.
pub fn sanitize_phone(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' '))
        .take(MAX_PHONE_LEN)
        .collect()
}

/// Digits and plus signs only, the shape the phone patterns are checked on.
pub fn phone_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect()
}

/// Digits only. Two spellings of the same number share this key.
pub fn phone_key(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// International `+` and 7 to 15 digits, or local `0` and 8 to 9 digits.
///
/// The local check runs after dropping the first `+`, so inputs like
/// `+0123456789` pass either way.
pub fn is_valid_phone(raw: &str) -> bool {
    let digits = phone_digits(raw);
    INTERNATIONAL_PHONE.is_match(&digits) || LOCAL_PHONE.is_match(&digits.replacen('+', "", 1))
}

pub fn check_full_name(name: &str) -> Option<&'static str> {
    name.trim().is_empty().then_some(NAME_REQUIRED)
}

pub fn check_phone(phone: &str) -> Option<&'static str> {
    if phone.trim().is_empty() {
        Some(PHONE_REQUIRED)
    } else if !is_valid_phone(phone) {
        Some(PHONE_INVALID)
    } else {
        None
    }
}

pub fn check_date(date: &str) -> Option<&'static str> {
    date.is_empty().then_some(DATE_REQUIRED)
}

pub fn check_cin_number(cin: &str) -> Option<&'static str> {
    cin.trim().is_empty().then_some(CIN_REQUIRED)
}

pub fn check_fitness_pass(pass: &str) -> Option<&'static str> {
    FitnessPass::from_id(pass).is_none().then_some(PASS_REQUIRED)
}

/// Counted on the trimmed value, which is what gets stored.
pub fn check_length(value: &str, max: usize, label: &str) -> Option<String> {
    (value.trim().chars().count() > max).then(|| format!("{} must be at most {} characters", label, max))
}

fn name_error(name: &str) -> Option<String> {
    check_full_name(name)
        .map(str::to_string)
        .or_else(|| check_length(name, MAX_NAME_LEN, "Name"))
}

fn cin_error(cin: &str) -> Option<String> {
    check_cin_number(cin)
        .map(str::to_string)
        .or_else(|| check_length(cin, MAX_CIN_LEN, "ID Number"))
}

fn notes_error(notes: &str) -> Option<String> {
    check_length(notes, MAX_NOTES_LEN, "Additional information")
}

fn collect(checks: Vec<(Field, Option<String>)>) -> FormErrors {
    let mut errors = FormErrors::new();
    for (field, message) in checks {
        if let Some(message) = message {
            errors.set(field, message);
        }
    }
    errors
}

/// Errors for the fields collected on `step`, including the length caps the
/// contact service enforces.
pub fn validate_step(step: Step, data: &FormData) -> FormErrors {
    let checks = match step {
        Step::One => vec![
            (Field::FullName, name_error(&data.full_name)),
            (Field::Phone, check_phone(&data.phone).map(str::to_string)),
        ],
        Step::Two => vec![
            (Field::Date, check_date(&data.date).map(str::to_string)),
            (Field::CinNumber, cin_error(&data.cin_number)),
            (Field::FitnessPass, data.fitness_pass.is_none().then(|| PASS_REQUIRED.to_string())),
            (Field::AdditionalInfo, notes_error(&data.additional_info)),
        ],
    };
    collect(checks)
}

/// Full check of a submitted request, both steps plus the server-side limits.
///
/// `earliest` is the first visit day still accepted.
pub fn validate_request(request: &ContactRequest, earliest: NaiveDate) -> FormErrors {
    let phone = if request.phone.chars().count() > MAX_PHONE_LEN {
        Some(PHONE_INVALID.to_string())
    } else {
        check_phone(&request.phone).map(str::to_string)
    };

    let date = match check_date(&request.date) {
        Some(message) => Some(message.to_string()),
        None => match calendar::parse_input(&request.date) {
            Some(date) if date < earliest => Some(DATE_IN_PAST.to_string()),
            Some(_) => None,
            None => Some(DATE_REQUIRED.to_string()),
        },
    };

    collect(vec![
        (Field::FullName, name_error(&request.full_name)),
        (Field::Phone, phone),
        (Field::Date, date),
        (Field::CinNumber, cin_error(&request.cin_number)),
        (Field::FitnessPass, check_fitness_pass(&request.fitness_pass).map(str::to_string)),
        (Field::AdditionalInfo, request.additional_info.as_deref().and_then(notes_error)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 3, 10).unwrap()
    }

    fn valid_request() -> ContactRequest {
        ContactRequest {
            full_name: "Imane Tazi".into(),
            phone: "0612345678".into(),
            date: "2030-03-10".into(),
            cin_number: "AB123456".into(),
            fitness_pass: "fitness".into(),
            additional_info: None,
        }
    }

    #[test]
    fn accepts_international_and_local_numbers() {
        assert!(is_valid_phone("+33123456789"));
        assert!(is_valid_phone("0612345678"));
        assert!(is_valid_phone("061234567"));
        assert!(is_valid_phone("+33 (0) 1-23-45-67"));
        assert!(is_valid_phone("+1234567"));
        assert!(is_valid_phone("+123456789012345"));
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("612345678"));
        assert!(!is_valid_phone("+123456"));
        assert!(!is_valid_phone("+1234567890123456"));
        assert!(!is_valid_phone("06123456789"));
        assert!(!is_valid_phone("++33123456789"));
    }

    #[test]
    fn ambiguous_plus_zero_numbers_pass() {
        assert!(is_valid_phone("+0123456789"));
        assert!(is_valid_phone("0+612345678"));
    }

    #[test]
    fn sanitize_drops_letters_and_caps_length() {
        assert_eq!(sanitize_phone("tel: +212 (6) 12-34"), " +212 (6) 12-34");
        assert_eq!(sanitize_phone("06\t12.34"), "061234");
        assert_eq!(sanitize_phone("٠٦١٢"), "");
        assert_eq!(sanitize_phone(&"9".repeat(30)).len(), MAX_PHONE_LEN);
    }

    #[test]
    fn phone_key_ignores_formatting() {
        assert_eq!(phone_key("+33 (1) 23-45"), "3312345");
        assert_eq!(phone_key("06 12 34 56 78"), phone_key("06-12-34-56-78"));
    }

    #[test]
    fn step_one_reports_required_and_shape_errors() {
        let data = FormData::default();
        let errors = validate_step(Step::One, &data);
        assert_eq!(errors.get(Field::FullName), Some(NAME_REQUIRED));
        assert_eq!(errors.get(Field::Phone), Some(PHONE_REQUIRED));

        let data = FormData {
            full_name: "Imane".into(),
            phone: "12345".into(),
            ..FormData::default()
        };
        let errors = validate_step(Step::One, &data);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Phone), Some(PHONE_INVALID));
    }

    #[test]
    fn step_two_ignores_step_one_fields() {
        let data = FormData {
            date: "2030-03-12".into(),
            cin_number: "  ".into(),
            fitness_pass: Some(FitnessPass::Kids),
            ..FormData::default()
        };
        let errors = validate_step(Step::Two, &data);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::CinNumber), Some(CIN_REQUIRED));
    }

    #[test]
    fn request_validation_accepts_today() {
        assert!(validate_request(&valid_request(), today()).is_empty());
    }

    #[test]
    fn request_validation_rejects_past_and_garbled_dates() {
        let mut request = valid_request();
        request.date = "2030-03-09".into();
        assert_eq!(validate_request(&request, today()).get(Field::Date), Some(DATE_IN_PAST));

        request.date = "next tuesday".into();
        assert_eq!(validate_request(&request, today()).get(Field::Date), Some(DATE_REQUIRED));
    }

    #[test]
    fn request_validation_enforces_limits_and_pass_ids() {
        let mut request = valid_request();
        request.full_name = "x".repeat(MAX_NAME_LEN + 1);
        request.cin_number = "9".repeat(MAX_CIN_LEN + 1);
        request.fitness_pass = "gold".into();
        request.additional_info = Some("n".repeat(MAX_NOTES_LEN + 1));
        request.phone = "+33 1 23 45 67 89 00 11 22".into();

        let errors = validate_request(&request, today());
        for field in [
            Field::FullName,
            Field::Phone,
            Field::CinNumber,
            Field::FitnessPass,
            Field::AdditionalInfo,
        ] {
            assert!(errors.contains(field), "expected error on {}", field);
        }
        assert!(!errors.contains(Field::Date));
    }

    #[test]
    fn step_checks_apply_the_same_length_caps() {
        let data = FormData {
            full_name: "x".repeat(MAX_NAME_LEN + 1),
            phone: "0612345678".into(),
            ..FormData::default()
        };
        let errors = validate_step(Step::One, &data);
        assert_eq!(errors.get(Field::FullName), Some("Name must be at most 120 characters"));

        let data = FormData {
            date: "2030-03-12".into(),
            cin_number: "9".repeat(MAX_CIN_LEN + 1),
            fitness_pass: Some(FitnessPass::Total),
            additional_info: "n".repeat(MAX_NOTES_LEN + 1),
            ..FormData::default()
        };
        let errors = validate_step(Step::Two, &data);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(Field::CinNumber), Some("ID Number must be at most 32 characters"));
        assert_eq!(
            errors.get(Field::AdditionalInfo),
            Some("Additional information must be at most 1000 characters")
        );
    }

    #[test]
    fn padding_does_not_count_against_caps() {
        let padded = format!("  {}  ", "n".repeat(MAX_NOTES_LEN));
        assert!(check_length(&padded, MAX_NOTES_LEN, "Notes").is_none());
    }
}
