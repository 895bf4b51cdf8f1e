mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

fn onboarding_form(owner_email: &str) -> Value {
    json!({
        "name": "Hilltop Montessori",
        "phone": "555-0100",
        "website": "https://hilltop.example",
        "support_email": "help@hilltop.example",
        "address": {
            "street": "1 Hill Rd",
            "street2": "Suite 2",
            "city": "Springfield",
            "state": "VT",
            "zip_code": "05301"
        },
        "business_owner": {
            "name": "Sam Rivera",
            "email": owner_email,
            "phone": "555-0101"
        }
    })
}

#[tokio::test]
async fn incomplete_form_reports_every_missing_field() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let mut form = onboarding_form(&common::unique_email("owner"));
    form["name"] = json!("");
    form["address"]["city"] = json!("");

    let res = client
        .post(format!("{}/onboarding/submit", server.base_url))
        .json(&form)
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let details = body["details"].as_array().expect("details array");
    assert_eq!(details.len(), 2);
    assert!(details.contains(&json!("School name is required")));
    assert!(details.contains(&json!("Address city is required")));
    Ok(())
}

#[tokio::test]
async fn onboarding_creates_school_and_admin_user() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let owner_email = common::unique_email("owner");

    let res = client
        .post(format!("{}/onboarding/submit", server.base_url))
        .json(&onboarding_form(&owner_email))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], true);

    let data = &body["data"];
    assert_eq!(data["school"]["onboarding_status"], "pending");
    assert_eq!(data["admin_user"]["email"], owner_email);
    assert!(data["admin_user"]["id"].as_i64().is_some());
    // Lifecycle columns stay out of the public user shape
    assert!(data["admin_user"].get("deleted_at").is_none());

    // Same owner email again must hit the duplicate check
    let res = client
        .post(format!("{}/onboarding/submit", server.base_url))
        .json(&onboarding_form(&owner_email))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn user_registration_rejects_duplicate_email() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let email = common::unique_email("parent");

    let res = client
        .post(format!("{}/users", server.base_url))
        .json(&json!({ "name": "Pat Doe", "email": email }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .post(format!("{}/users", server.base_url))
        .json(&json!({ "name": "Pat Doe", "email": email }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn activation_rejects_bogus_token() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/users/activate-account", server.base_url))
        .json(&json!({
            "token": "definitely-not-issued",
            "password": "Val1d!Password"
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "Invalid or expired account activation token");
    Ok(())
}
