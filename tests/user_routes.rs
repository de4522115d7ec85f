mod fixtures;

use learning_tracker::errors::AppError;
use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;

#[actix_rt::test]
async fn create_user_returns_201() {
    let mut repos = MockRepos::default();
    repos.users
        .expect_create_user()
        .withf(|email| email == "learner@example.com")
        .returning(|email| Ok(fixtures::user(&email, None)));
    let app = TestApp::spawn(repos).await;

    let response = app.client
        .post(app.url("/api/users"))
        .json(&json!({ "email": "learner@example.com" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["email"], "learner@example.com");
    assert!(body["cvUrl"].is_null());
}

#[actix_rt::test]
async fn duplicate_user_is_409() {
    let mut repos = MockRepos::default();
    repos.users.expect_create_user().returning(|_| {
        Err(AppError::Conflict("User with this email already exists".into()))
    });
    let app = TestApp::spawn(repos).await;

    let response = app.client
        .post(app.url("/api/users"))
        .json(&json!({ "email": "learner@example.com" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn get_user_by_email() {
    let mut repos = MockRepos::default();
    repos.users
        .expect_get_user_by_email()
        .returning(|email| {
            Ok((email == "learner@example.com")
                .then(|| fixtures::user(&email, Some("/uploads/cv-1-learner.pdf".into()))))
        });
    let app = TestApp::spawn(repos).await;

    let found = app.client
        .get(app.url("/api/users/learner@example.com"))
        .send()
        .await
        .unwrap();
    assert_eq!(found.status(), StatusCode::OK);
    let body: Value = found.json().await.unwrap();
    assert_eq!(body["cvUrl"], "/uploads/cv-1-learner.pdf");

    let missing = app.client
        .get(app.url("/api/users/ghost@example.com"))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
