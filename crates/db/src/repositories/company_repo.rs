//! Repository for the `companies` table.

use sqlx::PgExecutor;
use crm_core::types::DbId;

use crate::models::company::{Company, CompanyFields, CreateCompany};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, website, category, primary_industry, \
    secondary_industry, attracted_out_of_state, confidentiality_requested, \
    intellectual_property, department_if_faculty, point_of_contact_name, \
    point_of_contact_email, point_of_contact_phone, usm_founders, misc_resources, \
    pre_company_resources, pre_company_funding, icorps, tcf, tcf_amount, \
    funding_received, comments, created_at, updated_at";

/// Provides CRUD operations for companies.
pub struct CompanyRepo;

impl CompanyRepo {
    /// Insert a new company, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateCompany,
    ) -> Result<Company, sqlx::Error> {
        let query = format!(
            "INSERT INTO companies (
                name, description, website, category, primary_industry, secondary_industry,
                attracted_out_of_state, confidentiality_requested, intellectual_property,
                department_if_faculty, point_of_contact_name, point_of_contact_email,
                point_of_contact_phone, usm_founders, misc_resources, pre_company_resources,
                pre_company_funding, icorps, tcf, tcf_amount, funding_received, comments)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                     $16, $17, $18, $19, $20, $21, $22)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.website)
            .bind(input.category)
            .bind(input.primary_industry)
            .bind(input.secondary_industry)
            .bind(input.attracted_out_of_state)
            .bind(input.confidentiality_requested)
            .bind(&input.intellectual_property)
            .bind(&input.department_if_faculty)
            .bind(&input.point_of_contact_name)
            .bind(&input.point_of_contact_email)
            .bind(&input.point_of_contact_phone)
            .bind(&input.usm_founders)
            .bind(&input.misc_resources)
            .bind(&input.pre_company_resources)
            .bind(input.pre_company_funding)
            .bind(input.icorps)
            .bind(input.tcf)
            .bind(input.tcf_amount)
            .bind(input.funding_received)
            .bind(&input.comments)
            .fetch_one(executor)
            .await
    }

    /// Find a company by its ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Company>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM companies WHERE id = $1");
        sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Fetch every company whose ID is in `ids`, in a single query.
    pub async fn find_by_ids<'e>(
        executor: impl PgExecutor<'e>,
        ids: &[DbId],
    ) -> Result<Vec<Company>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM companies WHERE id = ANY($1)");
        sqlx::query_as::<_, Company>(&query)
            .bind(ids)
            .fetch_all(executor)
            .await
    }

    /// List companies, optionally restricted to one category, oldest first.
    pub async fn list<'e>(
        executor: impl PgExecutor<'e>,
        category: Option<DbId>,
    ) -> Result<Vec<Company>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM companies
             WHERE ($1::BIGINT IS NULL OR category = $1)
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(category)
            .fetch_all(executor)
            .await
    }

    /// Update a company. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        input: &CompanyFields,
    ) -> Result<Option<Company>, sqlx::Error> {
        let query = format!(
            "UPDATE companies SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                website = COALESCE($4, website),
                category = COALESCE($5, category),
                primary_industry = COALESCE($6, primary_industry),
                secondary_industry = COALESCE($7, secondary_industry),
                attracted_out_of_state = COALESCE($8, attracted_out_of_state),
                confidentiality_requested = COALESCE($9, confidentiality_requested),
                intellectual_property = COALESCE($10, intellectual_property),
                department_if_faculty = COALESCE($11, department_if_faculty),
                point_of_contact_name = COALESCE($12, point_of_contact_name),
                point_of_contact_email = COALESCE($13, point_of_contact_email),
                point_of_contact_phone = COALESCE($14, point_of_contact_phone),
                usm_founders = COALESCE($15, usm_founders),
                misc_resources = COALESCE($16, misc_resources),
                pre_company_resources = COALESCE($17, pre_company_resources),
                pre_company_funding = COALESCE($18, pre_company_funding),
                icorps = COALESCE($19, icorps),
                tcf = COALESCE($20, tcf),
                tcf_amount = COALESCE($21, tcf_amount),
                funding_received = COALESCE($22, funding_received),
                comments = COALESCE($23, comments)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.website)
            .bind(input.category)
            .bind(input.primary_industry)
            .bind(input.secondary_industry)
            .bind(input.attracted_out_of_state)
            .bind(input.confidentiality_requested)
            .bind(&input.intellectual_property)
            .bind(&input.department_if_faculty)
            .bind(&input.point_of_contact_name)
            .bind(&input.point_of_contact_email)
            .bind(&input.point_of_contact_phone)
            .bind(&input.usm_founders)
            .bind(&input.misc_resources)
            .bind(&input.pre_company_resources)
            .bind(input.pre_company_funding)
            .bind(input.icorps)
            .bind(input.tcf)
            .bind(input.tcf_amount)
            .bind(input.funding_received)
            .bind(&input.comments)
            .fetch_optional(executor)
            .await
    }

    /// Number of contacts referencing a company.
    pub async fn count_contacts<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contacts WHERE company_id = $1")
            .bind(id)
            .fetch_one(executor)
            .await
    }

    /// Delete a company by ID. Returns `true` if a row was removed.
    pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
