mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::{assert_error, TestApp};

#[tokio::test]
async fn empty_table_lists_as_not_found() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app.get("/carriers", &common::packager()).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, 404, "resource not found");
    Ok(())
}

#[tokio::test]
async fn create_with_empty_name_is_unprocessable() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app.post("/carriers", &common::supervisor(), json!({"name": ""})).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_error(&body, 422, "Field(s) ['name'] cannot be empty");
    Ok(())
}

#[tokio::test]
async fn create_with_blank_name_values_is_unprocessable() -> Result<()> {
    let app = TestApp::new();
    let token = common::supervisor();

    for name in [json!(false), json!(0), json!([]), json!({})] {
        let (status, body) = app.post("/carriers", &token, json!({"name": name.clone()})).await?;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "name: {}", name);
        assert_error(&body, 422, "Field(s) ['name'] cannot be empty");
    }
    Ok(())
}

#[tokio::test]
async fn create_honours_active_flag() -> Result<()> {
    let app = TestApp::new();
    let token = common::supervisor();

    let (status, body) = app.post("/carriers", &token, json!({"name": "Stephan Courier"})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": true, "carrier": {"id": 1, "Carrier": "Stephan Courier", "is_active": true}})
    );

    let (_, body) = app
        .post("/carriers", &token, json!({"name": "Retired Freight", "active": false}))
        .await?;
    assert_eq!(body["carrier"]["is_active"], false);

    let (status, body) = app.get("/carriers", &token).await?;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["carriers"]
        .as_array()
        .map(|a| a.iter().filter_map(|c| c["Carrier"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(names, vec!["Stephan Courier", "Retired Freight"]);
    Ok(())
}

#[tokio::test]
async fn update_without_name_keeps_it() -> Result<()> {
    let app = TestApp::new();
    let id = app.seed_carrier("Test Transport").await?;

    let (status, body) = app
        .patch(&format!("/carriers/{}", id), &common::supervisor(), json!({"active": false}))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["carrier"],
        json!({"id": id, "Carrier": "Test Transport", "is_active": false})
    );
    Ok(())
}

#[tokio::test]
async fn update_renames() -> Result<()> {
    let app = TestApp::new();
    let id = app.seed_carrier("Test Transport").await?;

    let (status, body) = app
        .patch(&format!("/carriers/{}", id), &common::supervisor(), json!({"name": "Fast Freight"}))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["carrier"]["Carrier"], "Fast Freight");
    assert_eq!(body["carrier"]["is_active"], true);
    Ok(())
}

#[tokio::test]
async fn update_unknown_id_is_not_found() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app.patch("/carriers/42", &common::supervisor(), json!({"name": "X"})).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, 404, "resource not found");
    Ok(())
}

#[tokio::test]
async fn update_with_non_object_body_is_unprocessable() -> Result<()> {
    let app = TestApp::new();
    let id = app.seed_carrier("Test Transport").await?;

    let (status, body) = app
        .patch(&format!("/carriers/{}", id), &common::supervisor(), json!("rename me"))
        .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_error(&body, 422, "unprocessable");
    Ok(())
}
