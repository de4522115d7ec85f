mod fixtures;

use learning_tracker::{
    entities::step::{StepOrder, StepStatus},
    errors::AppError,
};
use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;
use uuid::Uuid;

fn with_project(exists: bool) -> MockRepos {
    let mut repos = MockRepos::default();
    repos.projects.expect_project_exists().returning(move |_| Ok(exists));
    repos
}

#[actix_rt::test]
async fn steps_of_missing_project_are_404() {
    let app = TestApp::spawn(with_project(false)).await;

    let response = app.client
        .get(app.url(&format!("/api/projects/{}/steps", Uuid::new_v4())))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Project not found");
}

#[actix_rt::test]
async fn list_steps_returns_sorted_steps() {
    let project_id = Uuid::new_v4();
    let mut repos = with_project(true);
    repos.steps.expect_list_steps().returning(move |id| {
        Ok(vec![
            fixtures::step(id, StepStatus::Done, 1),
            fixtures::step(id, StepStatus::Todo, 2),
        ])
    });
    let app = TestApp::spawn(repos).await;

    let response = app.client
        .get(app.url(&format!("/api/projects/{}/steps", project_id)))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body[0]["order"], 1);
    assert_eq!(body[1]["status"], "todo");
    assert_eq!(body[0]["projectId"], project_id.to_string());
}

#[actix_rt::test]
async fn create_step_appends_and_returns_201() {
    let mut repos = with_project(true);
    repos.steps.expect_max_step_order().returning(|_| Ok(Some(2)));
    repos.steps
        .expect_create_step()
        .returning(|insert| Ok(fixtures::stored_step(insert)));
    let app = TestApp::spawn(repos).await;

    let response = app.client
        .post(app.url(&format!("/api/projects/{}/steps", Uuid::new_v4())))
        .json(&json!({ "title": "Design schema", "hours": 0.5, "status": "doing" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["order"], 3);
    assert_eq!(body["priority"], "medium");
    assert!(body["startDate"].is_string());
    assert!(body["endDate"].is_null());
}

#[actix_rt::test]
async fn create_step_below_minimum_hours_is_400() {
    let app = TestApp::spawn(with_project(true)).await;

    let response = app.client
        .post(app.url(&format!("/api/projects/{}/steps", Uuid::new_v4())))
        .json(&json!({ "title": "Too short", "hours": 0.25 }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["details"][0]["field"], "hours");
    assert_eq!(body["details"][0]["message"], "Minimum is 0.5 hours");
}

#[actix_rt::test]
async fn step_from_another_project_is_404() {
    let mut repos = MockRepos::default();
    repos.steps.expect_get_step().returning(|_, _| Ok(None));
    let app = TestApp::spawn(repos).await;

    let response = app.client
        .get(app.url(&format!("/api/projects/{}/steps/{}", Uuid::new_v4(), Uuid::new_v4())))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Step not found");
}

#[actix_rt::test]
async fn marking_step_done_stamps_end_date() {
    let project_id = Uuid::new_v4();
    let current = fixtures::step(project_id, StepStatus::Doing, 1);
    let step_id = current.id;

    let mut repos = MockRepos::default();
    repos.steps.expect_get_step().returning(move |_, _| Ok(Some(current.clone())));
    repos.steps.expect_update_step().returning(|step| Ok(Some(step)));
    let app = TestApp::spawn(repos).await;

    let response = app.client
        .put(app.url(&format!("/api/projects/{}/steps/{}", project_id, step_id)))
        .json(&json!({ "status": "done", "actualHours": 3 }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "done");
    assert_eq!(body["actualHours"], 3.0);
    assert!(body["endDate"].is_string());
}

#[actix_rt::test]
async fn delete_step_is_scoped_to_project() {
    let (project_id, step_id) = (Uuid::new_v4(), Uuid::new_v4());
    let mut repos = MockRepos::default();
    repos.steps
        .expect_delete_step()
        .withf(move |p, s| *p == project_id && *s == step_id)
        .returning(|_, _| Ok(true));
    let app = TestApp::spawn(repos).await;

    let response = app.client
        .delete(app.url(&format!("/api/projects/{}/steps/{}", project_id, step_id)))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn reorder_rewrites_positions() {
    let project_id = Uuid::new_v4();
    let (first, second) = (Uuid::new_v4(), Uuid::new_v4());

    let mut repos = with_project(true);
    repos.steps
        .expect_apply_step_orders()
        .withf(move |_, orders| {
            orders == &vec![
                StepOrder { step_id: second, order: 1 },
                StepOrder { step_id: first, order: 2 },
            ]
        })
        .returning(|project_id, orders| {
            Ok(orders
                .into_iter()
                .map(|o| {
                    let mut step = fixtures::step(project_id, StepStatus::Todo, o.order);
                    step.id = o.step_id;
                    step
                })
                .collect())
        });
    let app = TestApp::spawn(repos).await;

    let response = app.client
        .put(app.url(&format!("/api/projects/{}/steps", project_id)))
        .json(&json!({ "steps": [{ "_id": second }, { "_id": first }] }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body[0]["_id"], second.to_string());
    assert_eq!(body[0]["order"], 1);
    assert_eq!(body[1]["order"], 2);
}

#[actix_rt::test]
async fn reorder_with_unknown_step_is_404() {
    let mut repos = with_project(true);
    repos.steps
        .expect_apply_step_orders()
        .returning(|_, _| Err(AppError::NotFound("Step not found".into())));
    let app = TestApp::spawn(repos).await;

    let response = app.client
        .put(app.url(&format!("/api/projects/{}/steps", Uuid::new_v4())))
        .json(&json!({ "steps": [{ "_id": Uuid::new_v4() }] }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn progress_reports_completion() {
    let mut repos = with_project(true);
    repos.steps.expect_list_steps().returning(|id| {
        Ok(vec![
            fixtures::step(id, StepStatus::Done, 1),
            fixtures::step(id, StepStatus::Doing, 2),
            fixtures::step(id, StepStatus::Todo, 3),
            fixtures::step(id, StepStatus::Todo, 4),
        ])
    });
    let app = TestApp::spawn(repos).await;

    let response = app.client
        .get(app.url(&format!("/api/projects/{}/progress", Uuid::new_v4())))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["total"], 4);
    assert_eq!(body["done"], 1);
    assert_eq!(body["percent"], 25.0);
    assert_eq!(body["totalHours"], 8.0);
}

#[actix_rt::test]
async fn default_steps_are_created_once() {
    let mut repos = with_project(true);
    repos.steps.expect_count_steps().returning(|_| Ok(0));
    repos.steps
        .expect_create_steps()
        .returning(|inserts| Ok(inserts.into_iter().map(fixtures::stored_step).collect()));
    let app = TestApp::spawn(repos).await;

    let response = app.client
        .post(app.url(&format!("/api/projects/{}/steps/defaults", Uuid::new_v4())))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 6);
    assert_eq!(body[5]["title"], "Documentation");
    assert_eq!(body[5]["priority"], "low");
}

#[actix_rt::test]
async fn validation_details_use_request_field_names() {
    let mut repos = with_project(true);
    repos.steps.expect_create_step().never();
    let app = TestApp::spawn(repos).await;

    let response = app.client
        .post(app.url(&format!("/api/projects/{}/steps", Uuid::new_v4())))
        .json(&json!({ "title": "Profile", "hours": 1.0, "actualHours": -2 }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["details"][0]["field"], "actualHours");
    assert_eq!(body["details"][0]["message"], "Actual hours cannot be negative");
}
