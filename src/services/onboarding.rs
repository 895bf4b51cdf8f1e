use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{School, SchoolRole, User};
use crate::error::ApiError;
use crate::repos;
use crate::repos::schools::{NewSchool, NewSchoolAddress};

/// Onboarding submission: the school, its address, and the business owner
/// who becomes the school's first (inactive) admin user.
#[derive(Debug, Clone, Deserialize)]
pub struct OnboardingForm {
    pub name: String,
    pub phone: String,
    pub website: String,
    pub support_email: String,
    pub address: OnboardingAddress,
    pub business_owner: OnboardingBusinessOwner,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OnboardingAddress {
    pub street: String,
    #[serde(default)]
    pub street2: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OnboardingBusinessOwner {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Serialize)]
pub struct OnboardingStatusReport {
    pub user_id: i64,
    pub is_complete: bool,
    pub steps: OnboardingSteps,
}

#[derive(Debug, Serialize)]
pub struct OnboardingSteps {
    pub profile_setup: bool,
    pub password_created: bool,
    pub school_activated: bool,
}

/// Collect every missing-field problem so the client can fix the form in
/// one round trip.
pub fn validate_form(form: &OnboardingForm) -> Vec<String> {
    let mut errors = Vec::new();

    let mut require = |value: &str, message: &str| {
        if value.trim().is_empty() {
            errors.push(message.to_string());
        }
    };

    require(&form.name, "School name is required");
    require(&form.phone, "School phone is required");
    require(&form.website, "School website is required");
    require(&form.support_email, "School support email is required");

    require(&form.address.street, "Address street is required");
    require(&form.address.city, "Address city is required");
    require(&form.address.state, "Address state is required");
    require(&form.address.zip_code, "Address zip code is required");

    require(&form.business_owner.name, "Business owner name is required");
    require(&form.business_owner.email, "Business owner email is required");
    require(&form.business_owner.phone, "Business owner phone is required");

    errors
}

/// Create the school, its address and owner record, and the admin user with
/// an inactive admin role, all in one transaction. Either everything lands
/// or nothing does.
pub async fn create_school_with_admin(
    pool: &PgPool,
    form: &OnboardingForm,
) -> Result<(School, User), ApiError> {
    let errors = validate_form(form);
    if !errors.is_empty() {
        return Err(ApiError::validation_error(
            "Invalid onboarding form data",
            errors,
        ));
    }

    if repos::users::find_by_email(pool, &form.business_owner.email)
        .await?
        .is_some()
    {
        return Err(ApiError::conflict("User with this email already exists"));
    }

    let mut tx = pool.begin().await.map_err(DatabaseError::from)?;

    let school = repos::schools::create_tx(
        &mut tx,
        NewSchool {
            name: &form.name,
            phone: &form.phone,
            website: &form.website,
            support_email: &form.support_email,
        },
    )
    .await?;

    repos::schools::create_address_tx(
        &mut tx,
        school.id,
        NewSchoolAddress {
            street: &form.address.street,
            street2: &form.address.street2,
            city: &form.address.city,
            state: &form.address.state,
            zip_code: &form.address.zip_code,
        },
    )
    .await?;

    repos::schools::create_owner_tx(
        &mut tx,
        school.id,
        &form.business_owner.name,
        &form.business_owner.email,
        &form.business_owner.phone,
    )
    .await?;

    let admin_user = repos::users::create_tx(
        &mut tx,
        &form.business_owner.name,
        &form.business_owner.email,
    )
    .await?;

    repos::user_schools::create_tx(&mut tx, admin_user.id, school.id, SchoolRole::Admin).await?;

    tx.commit().await.map_err(DatabaseError::from)?;

    Ok((school, admin_user))
}

/// Progress report for a user working through onboarding
pub async fn get_onboarding_status(
    pool: &PgPool,
    user_id: i64,
) -> Result<OnboardingStatusReport, ApiError> {
    let user = repos::users::find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let has_password = repos::user_passwords::find_active_by_user_id(pool, user_id)
        .await?
        .is_some();
    let memberships = repos::user_schools::find_by_user_id(pool, user_id).await?;
    let school_activated = memberships.iter().any(|m| m.is_active);

    let steps = OnboardingSteps {
        profile_setup: !user.name.is_empty() && !user.email.is_empty(),
        password_created: has_password,
        school_activated,
    };

    Ok(OnboardingStatusReport {
        user_id,
        is_complete: steps.profile_setup && steps.password_created && steps.school_activated,
        steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete_form() -> OnboardingForm {
        serde_json::from_value(json!({
            "name": "Hilltop Montessori",
            "phone": "555-0100",
            "website": "https://hilltop.example",
            "support_email": "help@hilltop.example",
            "address": {
                "street": "1 Hill Rd",
                "city": "Springfield",
                "state": "VT",
                "zip_code": "05301"
            },
            "business_owner": {
                "name": "Sam Rivera",
                "email": "sam@hilltop.example",
                "phone": "555-0101"
            }
        }))
        .unwrap()
    }

    #[test]
    fn complete_form_passes_validation() {
        assert!(validate_form(&complete_form()).is_empty());
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let mut form = complete_form();
        form.name.clear();
        form.address.city.clear();
        form.business_owner.email = "   ".to_string();

        let errors = validate_form(&form);
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&"School name is required".to_string()));
        assert!(errors.contains(&"Address city is required".to_string()));
        assert!(errors.contains(&"Business owner email is required".to_string()));
    }

    #[test]
    fn street2_is_optional_in_the_payload() {
        let form = complete_form();
        assert_eq!(form.address.street2, "");
        assert!(validate_form(&form).is_empty());
    }
}
