mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{assert_error, TestApp};

/// Seeds one packager and one carrier; returns (packager_id, carrier_id)
async fn staff(app: &TestApp) -> Result<(i32, i32)> {
    let packager_id = app.seed_packager("Quality", "QA").await?;
    let carrier_id = app.seed_carrier("Test Transport").await?;
    Ok((packager_id, carrier_id))
}

fn listed<'a>(body: &'a Value, id: i64) -> Option<&'a Value> {
    body["shipments"]
        .as_array()
        .and_then(|rows| rows.iter().find(|row| row["id"] == id))
}

#[tokio::test]
async fn empty_table_lists_as_not_found() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app.get("/shipments", &common::packager()).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, 404, "resource not found");
    Ok(())
}

#[tokio::test]
async fn create_renders_formatted_record() -> Result<()> {
    let app = TestApp::new();
    let (packager_id, carrier_id) = staff(&app).await?;

    let (status, body) = app
        .post(
            "/shipments",
            &common::packager(),
            json!({
                "reference": 97900,
                "carrier_id": carrier_id,
                "packages": 2,
                "weight": 40,
                "tracking": "QWE232323",
                "packaged_by": packager_id,
                "create_date": "2020-11-17"
            }),
        )
        .await?;
    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(
        body,
        json!({
            "success": true,
            "shipment": {
                "id": 1,
                "Reference": 97900,
                "Weight": 40.0,
                "Packages": 2,
                "Packaged By": packager_id,
                "Date": "Tue, 17 Nov 2020 00:00:00 GMT"
            }
        })
    );
    Ok(())
}

#[tokio::test]
async fn create_lists_missing_fields() -> Result<()> {
    let app = TestApp::new();
    let (packager_id, _) = staff(&app).await?;

    let (status, body) = app
        .post(
            "/shipments",
            &common::packager(),
            json!({"reference": 97900, "weight": 40, "tracking": "QWE232323", "packaged_by": packager_id}),
        )
        .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_error(&body, 422, "Field(s) ['carrier_id', 'packages'] cannot be empty");
    Ok(())
}

#[tokio::test]
async fn create_with_unknown_references_is_bad_request() -> Result<()> {
    let app = TestApp::new();
    staff(&app).await?;

    let (status, body) = app
        .post(
            "/shipments",
            &common::supervisor(),
            json!({"reference": 97900, "carrier_id": 300, "packages": 2, "weight": 40, "packaged_by": 555}),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, 400, "bad request");

    let (status, _) = app.get("/shipments", &common::supervisor()).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn create_with_non_positive_counts_is_bad_request() -> Result<()> {
    let app = TestApp::new();
    let (packager_id, carrier_id) = staff(&app).await?;

    for (packages, weight) in [(0, 1.0), (1, -5.0)] {
        let (status, body) = app
            .post(
                "/shipments",
                &common::supervisor(),
                json!({"reference": 1, "carrier_id": carrier_id, "packages": packages, "weight": weight, "packaged_by": packager_id}),
            )
            .await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error(&body, 400, "bad request");
    }
    Ok(())
}

#[tokio::test]
async fn update_merges_and_is_idempotent() -> Result<()> {
    let app = TestApp::new();
    let (packager_id, carrier_id) = staff(&app).await?;
    let id = app.seed_shipment(carrier_id, packager_id).await?;
    let token = common::supervisor();

    let before = app.shipment(id).await?;
    let change = json!({"packages": 7, "weight": 35, "tracking": "X"});

    let (status, first) = app.patch(&format!("/shipments/{}", id), &token, change.clone()).await?;
    assert_eq!(status, StatusCode::OK);
    let after = app.shipment(id).await?;

    assert_eq!(after.reference, before.reference);
    assert_eq!(after.carrier_id, before.carrier_id);
    assert_eq!(after.packaged_by, before.packaged_by);
    assert_eq!(after.create_date, before.create_date);
    assert_eq!(after.packages, 7);
    assert_eq!(after.weight, 35.0);
    assert_eq!(after.tracking.as_deref(), Some("X"));

    let (status, second) = app.patch(&format!("/shipments/{}", id), &token, change).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(app.shipment(id).await?, after);
    Ok(())
}

#[tokio::test]
async fn update_constraint_violation_is_unprocessable() -> Result<()> {
    let app = TestApp::new();
    let (packager_id, carrier_id) = staff(&app).await?;
    let id = app.seed_shipment(carrier_id, packager_id).await?;
    let token = common::supervisor();

    let (status, body) = app.patch(&format!("/shipments/{}", id), &token, json!({"weight": -5})).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_error(&body, 422, "unprocessable");

    let (status, _) = app
        .patch(&format!("/shipments/{}", id), &token, json!({"carrier_id": 300}))
        .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = app
        .patch(&format!("/shipments/{}", id), &token, json!({"packages": "seven"}))
        .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[tokio::test]
async fn update_unknown_id_is_not_found() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app
        .patch("/shipments/99", &common::supervisor(), json!({"tracking": "X"}))
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, 404, "resource not found");
    Ok(())
}

#[tokio::test]
async fn delete_returns_pre_delete_record() -> Result<()> {
    let app = TestApp::new();
    let (packager_id, carrier_id) = staff(&app).await?;
    let keep = app.seed_shipment(carrier_id, packager_id).await?;
    let id = app.seed_shipment(carrier_id, packager_id).await?;
    let token = common::supervisor();

    let (_, listing) = app.get("/shipments", &token).await?;
    let before = listed(&listing, id as i64).cloned();
    assert!(before.is_some());

    let (status, body) = app.delete(&format!("/shipments/{}", id), &token).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(Some(&body["deleted"]), before.as_ref());

    let (status, listing) = app.get("/shipments", &token).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(listed(&listing, id as i64).is_none());
    assert!(listed(&listing, keep as i64).is_some());

    let (status, body) = app.delete(&format!("/shipments/{}", id), &token).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, 404, "resource not found");
    Ok(())
}
