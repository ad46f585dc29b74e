//! Repository for the `contacts` table.

use std::collections::HashMap;

use sqlx::types::Json;
use sqlx::{PgConnection, PgExecutor, PgPool};
use crm_core::types::DbId;

use crate::models::company::Company;
use crate::models::contact::{Contact, ContactWithCompany, CreateContact, UpdateContact};
use crate::repositories::CompanyRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, avatar, background, first_name, last_name, title, university, \
    major, notes, emails, phone_numbers, is_alumni, is_contest_winner, company_id, \
    created_at, updated_at";

/// Provides CRUD operations for contacts.
pub struct ContactRepo;

impl ContactRepo {
    /// Insert a new contact, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateContact,
    ) -> Result<Contact, sqlx::Error> {
        let query = format!(
            "INSERT INTO contacts (
                avatar, background, first_name, last_name, title, university, major, notes,
                emails, phone_numbers, is_alumni, is_contest_winner, company_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(&input.avatar)
            .bind(&input.background)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.title)
            .bind(input.university)
            .bind(&input.major)
            .bind(&input.notes)
            .bind(Json(&input.emails))
            .bind(Json(&input.phone_numbers))
            .bind(input.is_alumni)
            .bind(input.is_contest_winner)
            .bind(input.company_id)
            .fetch_one(executor)
            .await
    }

    /// Find a contact by its ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contacts WHERE id = $1");
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a contact by ID with its company attached.
    ///
    /// Takes a connection so it can run inside a caller's transaction.
    pub async fn find_with_company(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<ContactWithCompany>, sqlx::Error> {
        let Some(contact) = Self::find_by_id(&mut *conn, id).await? else {
            return Ok(None);
        };
        let company = match contact.company_id {
            Some(company_id) => CompanyRepo::find_by_id(&mut *conn, company_id).await?,
            None => None,
        };
        Ok(Some(ContactWithCompany { contact, company }))
    }

    /// List all contacts, oldest first.
    pub async fn list<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<Contact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contacts ORDER BY created_at ASC, id ASC");
        sqlx::query_as::<_, Contact>(&query).fetch_all(executor).await
    }

    /// List all contacts with their companies attached.
    ///
    /// Companies are loaded in one batched query rather than per contact.
    pub async fn list_with_companies(pool: &PgPool) -> Result<Vec<ContactWithCompany>, sqlx::Error> {
        let contacts = Self::list(pool).await?;

        let mut company_ids: Vec<DbId> = contacts.iter().filter_map(|c| c.company_id).collect();
        company_ids.sort_unstable();
        company_ids.dedup();
        let companies = CompanyRepo::find_by_ids(pool, &company_ids).await?;

        Ok(attach_companies(contacts, companies))
    }

    /// Update a contact. Only non-`None` fields in `input` are applied;
    /// `company_id` re-points the contact when `Some`.
    ///
    /// `input.company` is ignored here; the caller resolves it to an ID.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        input: &UpdateContact,
        company_id: Option<DbId>,
    ) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!(
            "UPDATE contacts SET
                avatar = COALESCE($2, avatar),
                background = COALESCE($3, background),
                first_name = COALESCE($4, first_name),
                last_name = COALESCE($5, last_name),
                title = COALESCE($6, title),
                university = COALESCE($7, university),
                major = COALESCE($8, major),
                notes = COALESCE($9, notes),
                emails = COALESCE($10, emails),
                phone_numbers = COALESCE($11, phone_numbers),
                is_alumni = COALESCE($12, is_alumni),
                is_contest_winner = COALESCE($13, is_contest_winner),
                company_id = COALESCE($14, company_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .bind(&input.avatar)
            .bind(&input.background)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.title)
            .bind(input.university)
            .bind(&input.major)
            .bind(&input.notes)
            .bind(input.emails.as_ref().map(Json))
            .bind(input.phone_numbers.as_ref().map(Json))
            .bind(input.is_alumni)
            .bind(input.is_contest_winner)
            .bind(company_id)
            .fetch_optional(executor)
            .await
    }

    /// Delete a contact by ID. Returns `true` if a row was removed.
    ///
    /// The contact's company is left in place.
    pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Pair each contact with its company from a preloaded set.
fn attach_companies(contacts: Vec<Contact>, companies: Vec<Company>) -> Vec<ContactWithCompany> {
    let by_id: HashMap<DbId, Company> = companies.into_iter().map(|c| (c.id, c)).collect();
    contacts
        .into_iter()
        .map(|contact| {
            let company = contact
                .company_id
                .and_then(|id| by_id.get(&id).cloned());
            ContactWithCompany { contact, company }
        })
        .collect()
}
