//! Integration tests for the repository layer against a real database:
//! - Configuration filtering, ordering, and search
//! - Company and contact CRUD with embedded company lookup
//! - Unique and foreign key constraint behaviour

use sqlx::PgPool;
use crm_core::contact::{EmailEntry, PhoneEntry};
use crm_db::models::company::{CompanyFields, CreateCompany};
use crm_db::models::configuration::{
    ConfigurationFilter, CreateConfiguration, UpdateConfiguration,
};
use crm_db::models::contact::{CreateContact, UpdateContact};
use crm_db::models::user::CreateUser;
use crm_db::repositories::{CompanyRepo, ConfigurationRepo, ContactRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_config(pool: &PgPool, category: &str, label: &str) -> i64 {
    ConfigurationRepo::create(
        pool,
        category,
        label,
        "desc",
        &CreateConfiguration::default(),
    )
    .await
    .unwrap()
    .id
}

fn new_company(name: &str) -> CreateCompany {
    CreateCompany {
        name: name.to_string(),
        ..Default::default()
    }
}

fn new_contact(university: i64, company_id: Option<i64>) -> CreateContact {
    CreateContact {
        avatar: None,
        background: None,
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        title: "Engineer".into(),
        university,
        major: None,
        notes: None,
        emails: vec![EmailEntry {
            label: 1,
            email: "ada@example.com".into(),
        }],
        phone_numbers: vec![PhoneEntry {
            label: 1,
            country_code: "us".into(),
            phone_number: "555-0100".into(),
        }],
        is_alumni: false,
        is_contest_winner: true,
        company_id,
    }
}

// ---------------------------------------------------------------------------
// Configurations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_configuration_list_filters_hidden_and_disabled(pool: PgPool) {
    new_config(&pool, "contact_labels", "Personal").await;
    ConfigurationRepo::create(
        &pool,
        "contact_labels",
        "Secret",
        "desc",
        &CreateConfiguration {
            is_hidden: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    ConfigurationRepo::create(
        &pool,
        "contact_labels",
        "Retired",
        "desc",
        &CreateConfiguration {
            is_disabled: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let visible = ConfigurationRepo::list(&pool, &ConfigurationFilter::default())
        .await
        .unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].label, "Personal");

    let all = ConfigurationRepo::list(
        &pool,
        &ConfigurationFilter {
            include_hidden: true,
            include_disabled: true,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let labels: Vec<_> = all.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, ["Personal", "Secret", "Retired"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_configuration_search_matches_label_or_description(pool: PgPool) {
    new_config(&pool, "primary_industry", "Biotech").await;
    ConfigurationRepo::create(
        &pool,
        "primary_industry",
        "Software",
        "Includes biotech tooling",
        &CreateConfiguration::default(),
    )
    .await
    .unwrap();
    new_config(&pool, "company_category", "Startup").await;

    let filter = ConfigurationFilter {
        query: Some("BIOTECH".into()),
        ..Default::default()
    };
    let found = ConfigurationRepo::list(&pool, &filter).await.unwrap();
    assert_eq!(found.len(), 2);

    let filter = ConfigurationFilter {
        category: Some("company_category".into()),
        ..Default::default()
    };
    let found = ConfigurationRepo::list(&pool, &filter).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].label, "Startup");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_configuration_duplicate_label_rejected(pool: PgPool) {
    new_config(&pool, "contact_labels", "Work").await;
    let result = ConfigurationRepo::create(
        &pool,
        "primary_industry",
        "Work",
        "desc",
        &CreateConfiguration::default(),
    )
    .await;
    assert!(result.is_err(), "Duplicate label should fail");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_configuration_update_and_delete(pool: PgPool) {
    let id = new_config(&pool, "contact_labels", "Home").await;

    let updated = ConfigurationRepo::update(
        &pool,
        id,
        &UpdateConfiguration {
            is_hidden: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.label, "Home");
    assert!(updated.is_hidden);

    assert!(ConfigurationRepo::delete(&pool, id).await.unwrap());
    assert!(!ConfigurationRepo::delete(&pool, id).await.unwrap());
    assert!(ConfigurationRepo::update(&pool, id, &UpdateConfiguration::default())
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Companies and contacts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_contact_with_company_round_trip(pool: PgPool) {
    let university = new_config(&pool, "network_university", "USM").await;
    let company = CompanyRepo::create(&pool, &new_company("Acme")).await.unwrap();
    let contact = ContactRepo::create(&pool, &new_contact(university, Some(company.id)))
        .await
        .unwrap();

    let mut conn = pool.acquire().await.unwrap();
    let found = ContactRepo::find_with_company(&mut conn, contact.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.contact.emails.0[0].email, "ada@example.com");
    assert_eq!(found.company.unwrap().name, "Acme");

    let listed = ContactRepo::list_with_companies(&pool).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].company.as_ref().unwrap().id, company.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_contact_update_keeps_absent_lists(pool: PgPool) {
    let university = new_config(&pool, "network_university", "USM").await;
    let contact = ContactRepo::create(&pool, &new_contact(university, None))
        .await
        .unwrap();

    let update = UpdateContact {
        first_name: Some("Grace".into()),
        ..Default::default()
    };
    let updated = ContactRepo::update(&pool, contact.id, &update, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.first_name, "Grace");
    assert_eq!(updated.last_name, "Lovelace");
    assert_eq!(updated.emails.0.len(), 1);
    assert!(updated.company_id.is_none());

    let update = UpdateContact {
        emails: Some(vec![
            EmailEntry {
                label: 2,
                email: "one@example.com".into(),
            },
            EmailEntry {
                label: 2,
                email: "two@example.com".into(),
            },
        ]),
        ..Default::default()
    };
    let updated = ContactRepo::update(&pool, contact.id, &update, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.emails.0.len(), 2);
    assert_eq!(updated.phone_numbers.0.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_company_list_by_category_and_patch(pool: PgPool) {
    let startup = new_config(&pool, "company_category", "Startup").await;
    let mut input = new_company("Acme");
    input.category = Some(startup);
    CompanyRepo::create(&pool, &input).await.unwrap();
    let other = CompanyRepo::create(&pool, &new_company("Beta")).await.unwrap();

    let all = CompanyRepo::list(&pool, None).await.unwrap();
    assert_eq!(all.len(), 2);
    let filtered = CompanyRepo::list(&pool, Some(startup)).await.unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "Acme");

    let patch = CompanyFields {
        website: Some("https://beta.example".into()),
        tcf: Some(true),
        ..Default::default()
    };
    let patched = CompanyRepo::update(&pool, other.id, &patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(patched.name, "Beta");
    assert_eq!(patched.website.as_deref(), Some("https://beta.example"));
    assert!(patched.tcf);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_company_with_contacts_cannot_be_deleted(pool: PgPool) {
    let university = new_config(&pool, "network_university", "USM").await;
    let company = CompanyRepo::create(&pool, &new_company("Acme")).await.unwrap();
    let contact = ContactRepo::create(&pool, &new_contact(university, Some(company.id)))
        .await
        .unwrap();

    assert_eq!(CompanyRepo::count_contacts(&pool, company.id).await.unwrap(), 1);
    assert!(
        CompanyRepo::delete(&pool, company.id).await.is_err(),
        "FK should block deleting a referenced company"
    );

    // Deleting the contact leaves the company behind.
    assert!(ContactRepo::delete(&pool, contact.id).await.unwrap());
    assert!(CompanyRepo::find_by_id(&pool, company.id).await.unwrap().is_some());
    assert!(CompanyRepo::delete(&pool, company.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_fk_violation_contact_bad_company(pool: PgPool) {
    let result = ContactRepo::create(&pool, &new_contact(1, Some(999_999))).await;
    assert!(result.is_err(), "Contact with nonexistent company should fail");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_by_ids_empty_is_noop(pool: PgPool) {
    assert!(CompanyRepo::find_by_ids(&pool, &[]).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_lookup_by_email_or_tenant(pool: PgPool) {
    let input = CreateUser {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        password_hash: "hash".into(),
        avatar: None,
        tenant_name: "Analytical".into(),
        tenant_description: None,
        tenant_category: "Research".into(),
        tenant_logo: None,
    };
    let user = UserRepo::create(&pool, &input).await.unwrap();

    let by_email = UserRepo::find_by_email(&pool, "ada@example.com").await.unwrap();
    assert_eq!(by_email.unwrap().id, user.id);

    let clash = UserRepo::find_by_email_or_tenant(&pool, "other@example.com", "Analytical")
        .await
        .unwrap();
    assert_eq!(clash.unwrap().id, user.id);

    assert!(UserRepo::find_by_email_or_tenant(&pool, "x@example.com", "Other")
        .await
        .unwrap()
        .is_none());

    let duplicate = UserRepo::create(&pool, &input).await;
    assert!(duplicate.is_err(), "Duplicate email should fail");
}
