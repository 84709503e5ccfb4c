use serde::{Deserialize, Serialize};

use crate::form::FormErrors;

/// Body of `POST /api/contact`.
///
/// Every field defaults to empty so that a partially filled payload reaches
/// validation and comes back as field errors instead of a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactRequest {
    pub full_name: String,
    pub phone: String,
    pub date: String,
    pub cin_number: String,
    pub fitness_pass: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactReceipt {
    pub reference: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<FormErrors>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Field;

    #[test]
    fn request_uses_camel_case_and_skips_empty_notes() {
        let request = ContactRequest {
            full_name: "Salma Idrissi".into(),
            phone: "+212612345678".into(),
            date: "2030-01-15".into(),
            cin_number: "AB123456".into(),
            fitness_pass: "total".into(),
            additional_info: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["fullName"], "Salma Idrissi");
        assert_eq!(json["cinNumber"], "AB123456");
        assert_eq!(json["fitnessPass"], "total");
        assert!(json.get("additionalInfo").is_none());
    }

    #[test]
    fn missing_fields_decode_as_empty() {
        let request: ContactRequest = serde_json::from_str(r#"{"fullName":"Nadia"}"#).unwrap();
        assert_eq!(request.full_name, "Nadia");
        assert!(request.phone.is_empty());
        assert!(request.additional_info.is_none());
    }

    #[test]
    fn error_response_carries_field_map() {
        let body = r#"{"error":"Invalid","fields":{"fullName":"Name is required","fitnessPass":"Please select a membership type"}}"#;
        let response: ErrorResponse = serde_json::from_str(body).unwrap();
        let fields = response.fields.unwrap();
        assert_eq!(fields.get(Field::FullName), Some("Name is required"));
        assert_eq!(fields.get(Field::FitnessPass), Some("Please select a membership type"));
        assert_eq!(fields.len(), 2);
    }
}
