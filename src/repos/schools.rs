use sqlx::{Postgres, Transaction};

use crate::database::manager::DatabaseError;
use crate::database::models::{OnboardingStatus, School, SchoolAddress, SchoolOwner};

const SCHOOL_COLUMNS: &str = "id, name, phone, logo, website, support_email, onboarding_status, \
                              created_at, updated_at, deleted_at";
const ADDRESS_COLUMNS: &str = "id, school_id, street, street2, city, state, zip_code, \
                               created_at, updated_at, deleted_at";
const OWNER_COLUMNS: &str =
    "id, school_id, name, email, phone, created_at, updated_at, deleted_at";

pub struct NewSchool<'a> {
    pub name: &'a str,
    pub phone: &'a str,
    pub website: &'a str,
    pub support_email: &'a str,
}

pub struct NewSchoolAddress<'a> {
    pub street: &'a str,
    pub street2: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub zip_code: &'a str,
}

/// Insert a school in pending state. Logo is always NULL at onboarding time.
pub async fn create_tx(
    tx: &mut Transaction<'_, Postgres>,
    school: NewSchool<'_>,
) -> Result<School, DatabaseError> {
    let school = sqlx::query_as::<_, School>(&format!(
        "INSERT INTO schools (name, phone, logo, website, support_email, onboarding_status)
         VALUES ($1, $2, NULL, $3, $4, $5) RETURNING {SCHOOL_COLUMNS}"
    ))
    .bind(school.name)
    .bind(school.phone)
    .bind(school.website)
    .bind(school.support_email)
    .bind(OnboardingStatus::Pending.as_str())
    .fetch_one(&mut **tx)
    .await?;

    Ok(school)
}

pub async fn create_address_tx(
    tx: &mut Transaction<'_, Postgres>,
    school_id: i64,
    address: NewSchoolAddress<'_>,
) -> Result<SchoolAddress, DatabaseError> {
    let address = sqlx::query_as::<_, SchoolAddress>(&format!(
        "INSERT INTO school_address (school_id, street, street2, city, state, zip_code)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING {ADDRESS_COLUMNS}"
    ))
    .bind(school_id)
    .bind(address.street)
    .bind(address.street2)
    .bind(address.city)
    .bind(address.state)
    .bind(address.zip_code)
    .fetch_one(&mut **tx)
    .await?;

    Ok(address)
}

pub async fn create_owner_tx(
    tx: &mut Transaction<'_, Postgres>,
    school_id: i64,
    name: &str,
    email: &str,
    phone: &str,
) -> Result<SchoolOwner, DatabaseError> {
    let owner = sqlx::query_as::<_, SchoolOwner>(&format!(
        "INSERT INTO school_owner (school_id, name, email, phone)
         VALUES ($1, $2, $3, $4) RETURNING {OWNER_COLUMNS}"
    ))
    .bind(school_id)
    .bind(name)
    .bind(email)
    .bind(phone)
    .fetch_one(&mut **tx)
    .await?;

    Ok(owner)
}
