use diesel::prelude::*;

use crate::{
    db::DbPool,
    error::StorageError,
    models::membership_models::{MembershipRequest, NewMembershipRequest},
    schema::membership_requests,
};

/// Outcome of [`MembershipRequests::save`].
#[derive(Debug)]
pub enum Saved {
    Created(MembershipRequest),
    /// The visitor already had a request for that day; its details were replaced.
    Updated(MembershipRequest),
    /// Same request as the one on file, nothing written.
    Unchanged(MembershipRequest),
}

impl Saved {
    pub fn request(&self) -> &MembershipRequest {
        match self {
            Saved::Created(stored) | Saved::Updated(stored) | Saved::Unchanged(stored) => stored,
        }
    }
}

pub struct MembershipRequests {
    pool: DbPool,
}

impl MembershipRequests {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// The visitor's request for `visit_date`, matched on phone digits and CIN.
    pub fn find_existing(
        &self,
        phone_key: &str,
        visit_date: &str,
        cin_number: &str,
    ) -> Result<Option<MembershipRequest>, StorageError> {
        let mut conn = self.pool.get()?;
        let found = find_existing(&mut conn, phone_key, visit_date, cin_number)?;
        Ok(found)
    }

    /// Inserts the request, or folds it into the visitor's request for the same day.
    ///
    /// Runs under `BEGIN IMMEDIATE` so concurrent saves for one visitor can't both insert.
    pub fn save(&self, new_request: NewMembershipRequest) -> Result<Saved, StorageError> {
        let mut conn = self.pool.get()?;
        conn.immediate_transaction(|conn| {
            let existing = find_existing(
                conn,
                &new_request.phone_key,
                &new_request.visit_date,
                &new_request.cin_number,
            )?;

            match existing {
                Some(existing) if existing.matches(&new_request) => Ok(Saved::Unchanged(existing)),
                Some(existing) => {
                    diesel::update(membership_requests::table.find(existing.id))
                        .set((
                            membership_requests::full_name.eq(&new_request.full_name),
                            membership_requests::phone.eq(&new_request.phone),
                            membership_requests::cin_number.eq(&new_request.cin_number),
                            membership_requests::fitness_pass.eq(&new_request.fitness_pass),
                            membership_requests::additional_info.eq(&new_request.additional_info),
                            membership_requests::updated_at.eq(new_request.updated_at),
                        ))
                        .execute(conn)?;
                    membership_requests::table
                        .find(existing.id)
                        .select(MembershipRequest::as_select())
                        .first(conn)
                        .map(Saved::Updated)
                }
                None => {
                    diesel::insert_into(membership_requests::table)
                        .values(&new_request)
                        .execute(conn)?;
                    membership_requests::table
                        .filter(membership_requests::reference.eq(&new_request.reference))
                        .select(MembershipRequest::as_select())
                        .first(conn)
                        .map(Saved::Created)
                }
            }
        })
        .map_err(StorageError::from)
    }
}

fn find_existing(
    conn: &mut SqliteConnection,
    phone_key: &str,
    visit_date: &str,
    cin_number: &str,
) -> QueryResult<Option<MembershipRequest>> {
    membership_requests::table
        .filter(membership_requests::phone_key.eq(phone_key))
        .filter(membership_requests::visit_date.eq(visit_date))
        .filter(membership_requests::cin_number.eq(cin_number))
        .select(MembershipRequest::as_select())
        .first(conn)
        .optional()
}
