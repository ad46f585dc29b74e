//! Company entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use crm_core::contact_import::ImportedCompany;
use crm_core::error::CoreError;
use crm_core::text::is_blank;
use crm_core::types::{DbId, Timestamp};

/// A company row from the `companies` table.
///
/// `category`, `primary_industry`, and `secondary_industry` are
/// configuration entry ids.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub category: Option<DbId>,
    pub primary_industry: Option<DbId>,
    pub secondary_industry: Option<DbId>,
    pub attracted_out_of_state: bool,
    pub confidentiality_requested: bool,
    pub intellectual_property: Option<String>,
    pub department_if_faculty: Option<String>,
    pub point_of_contact_name: Option<String>,
    pub point_of_contact_email: Option<String>,
    pub point_of_contact_phone: Option<String>,
    pub usm_founders: Option<String>,
    pub misc_resources: Option<String>,
    pub pre_company_resources: Option<String>,
    pub pre_company_funding: Option<f64>,
    pub icorps: bool,
    pub tcf: bool,
    pub tcf_amount: Option<f64>,
    pub funding_received: Option<f64>,
    pub comments: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Company fields as they arrive in a request body. Every field is optional.
///
/// Used directly as the patch DTO, and converted with
/// [`CompanyFields::into_create`] when a new company is being made.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub category: Option<DbId>,
    pub primary_industry: Option<DbId>,
    pub secondary_industry: Option<DbId>,
    pub attracted_out_of_state: Option<bool>,
    pub confidentiality_requested: Option<bool>,
    pub intellectual_property: Option<String>,
    pub department_if_faculty: Option<String>,
    pub point_of_contact_name: Option<String>,
    pub point_of_contact_email: Option<String>,
    pub point_of_contact_phone: Option<String>,
    pub usm_founders: Option<String>,
    pub misc_resources: Option<String>,
    pub pre_company_resources: Option<String>,
    pub pre_company_funding: Option<f64>,
    pub icorps: Option<bool>,
    pub tcf: Option<bool>,
    pub tcf_amount: Option<f64>,
    pub funding_received: Option<f64>,
    pub comments: Option<String>,
}

impl CompanyFields {
    /// Require a name and turn the fields into an insert DTO.
    pub fn into_create(self) -> Result<CreateCompany, CoreError> {
        if is_blank(self.name.as_deref()) {
            return Err(CoreError::Validation("Company name is required".into()));
        }
        Ok(CreateCompany {
            name: self.name.unwrap_or_default().trim().to_string(),
            description: self.description,
            website: self.website,
            category: self.category,
            primary_industry: self.primary_industry,
            secondary_industry: self.secondary_industry,
            attracted_out_of_state: self.attracted_out_of_state.unwrap_or(false),
            confidentiality_requested: self.confidentiality_requested.unwrap_or(false),
            intellectual_property: self.intellectual_property,
            department_if_faculty: self.department_if_faculty,
            point_of_contact_name: self.point_of_contact_name,
            point_of_contact_email: self.point_of_contact_email,
            point_of_contact_phone: self.point_of_contact_phone,
            usm_founders: self.usm_founders,
            misc_resources: self.misc_resources,
            pre_company_resources: self.pre_company_resources,
            pre_company_funding: self.pre_company_funding,
            icorps: self.icorps.unwrap_or(false),
            tcf: self.tcf.unwrap_or(false),
            tcf_amount: self.tcf_amount,
            funding_received: self.funding_received,
            comments: self.comments,
        })
    }
}

/// DTO for inserting a company. Built from [`CompanyFields`] or an import row.
#[derive(Debug, Clone, Default)]
pub struct CreateCompany {
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub category: Option<DbId>,
    pub primary_industry: Option<DbId>,
    pub secondary_industry: Option<DbId>,
    pub attracted_out_of_state: bool,
    pub confidentiality_requested: bool,
    pub intellectual_property: Option<String>,
    pub department_if_faculty: Option<String>,
    pub point_of_contact_name: Option<String>,
    pub point_of_contact_email: Option<String>,
    pub point_of_contact_phone: Option<String>,
    pub usm_founders: Option<String>,
    pub misc_resources: Option<String>,
    pub pre_company_resources: Option<String>,
    pub pre_company_funding: Option<f64>,
    pub icorps: bool,
    pub tcf: bool,
    pub tcf_amount: Option<f64>,
    pub funding_received: Option<f64>,
    pub comments: Option<String>,
}

impl From<ImportedCompany> for CreateCompany {
    fn from(row: ImportedCompany) -> Self {
        Self {
            name: row.name,
            description: row.description,
            website: row.website,
            category: Some(row.category),
            primary_industry: Some(row.primary_industry),
            intellectual_property: row.intellectual_property,
            funding_received: row.funding_received,
            ..Default::default()
        }
    }
}

/// Query parameters for listing companies.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyListParams {
    /// Restrict to one company category (configuration id).
    pub category: Option<DbId>,
}
