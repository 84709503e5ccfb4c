use diesel::prelude::*;
use shared::{validation, ContactRequest};

use crate::schema::membership_requests;

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = membership_requests)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MembershipRequest {
    pub id: i32,
    pub reference: String, // uuid handed back to the visitor
    pub full_name: String,
    pub phone: String, // as typed, after sanitizing
    pub phone_key: String, // digits only
    pub visit_date: String, // YYYY-MM-DD
    pub cin_number: String, // compared case-insensitively
    pub fitness_pass: String, // fitness, total or kids
    pub additional_info: Option<String>,
    pub created_at: i32, // int timestamp utc epoch
    pub updated_at: i32,
}

impl MembershipRequest {
    /// Whether `new_request` carries nothing this row doesn't already say.
    pub fn matches(&self, new_request: &NewMembershipRequest) -> bool {
        self.full_name == new_request.full_name
            && self.fitness_pass == new_request.fitness_pass
            && self.additional_info == new_request.additional_info
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = membership_requests)]
pub struct NewMembershipRequest {
    pub reference: String,
    pub full_name: String,
    pub phone: String,
    pub phone_key: String,
    pub visit_date: String,
    pub cin_number: String,
    pub fitness_pass: String,
    pub additional_info: Option<String>,
    pub created_at: i32,
    pub updated_at: i32,
}

impl NewMembershipRequest {
    /// Expects a request that already passed validation.
    pub fn from_request(request: &ContactRequest, reference: String, created_at: i32) -> Self {
        let phone = request.phone.trim().to_string();
        Self {
            reference,
            full_name: request.full_name.trim().to_string(),
            phone_key: validation::phone_key(&phone),
            phone,
            visit_date: request.date.clone(),
            cin_number: request.cin_number.trim().to_string(),
            fitness_pass: request.fitness_pass.clone(),
            additional_info: request
                .additional_info
                .as_deref()
                .map(str::trim)
                .filter(|notes| !notes.is_empty())
                .map(str::to_string),
            created_at,
            updated_at: created_at,
        }
    }
}
