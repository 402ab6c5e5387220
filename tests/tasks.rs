mod common;

use std::net::TcpListener;

use actix_web::{http::StatusCode, rt, test, App, HttpServer};
use chrono::{DateTime, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use taskkeeper::routes;
use uuid::Uuid;

use common::TOKEN_HEADER;

#[test_log::test(actix_rt::test)]
async fn test_task_crud_flow() {
    let app = common::init_app(common::memory_state()).await;
    let (user_id, token) = common::register_and_login(&app, "Ada", "ada@example.com").await;

    // Create
    let task = common::create_task(&app, &token, "Buy milk").await;
    let task_id = task["taskId"].as_str().expect("taskId missing").to_string();
    assert!(Uuid::parse_str(&task_id).is_ok());
    assert_eq!(task["description"], "Buy milk");
    assert_eq!(task["userId"], user_id.as_str());
    assert_eq!(task["validTill"], Value::Null);

    // Read
    let req = test::TestRequest::get()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header((TOKEN_HEADER, token.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Value = test::read_body_json(resp).await;
    assert_eq!(fetched, task);

    // List
    let tasks = common::list_tasks(&app, &token).await;
    assert_eq!(tasks, vec![task.clone()]);

    // Update
    let req = test::TestRequest::put()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header((TOKEN_HEADER, token.as_str()))
        .set_json(json!({ "description": "Buy oat milk", "taskId": task_id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["taskId"], task_id.as_str());
    assert_eq!(updated["description"], "Buy oat milk");
    assert_eq!(updated["createdAt"], task["createdAt"]);
    let created_at: DateTime<Utc> = serde_json::from_value(task["createdAt"].clone()).unwrap();
    let updated_at: DateTime<Utc> = serde_json::from_value(updated["updatedAt"].clone()).unwrap();
    assert!(updated_at >= created_at);

    // Delete
    let req = test::TestRequest::delete()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header((TOKEN_HEADER, token.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // Gone from every read
    let req = test::TestRequest::get()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header((TOKEN_HEADER, token.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(common::list_tasks(&app, &token).await.is_empty());

    // A deleted task cannot be edited back to life
    let req = test::TestRequest::put()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header((TOKEN_HEADER, token.as_str()))
        .set_json(json!({ "description": "Zombie" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Deleting again is a no-op
    let req = test::TestRequest::delete()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header((TOKEN_HEADER, token.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // Ids are never reused
    let next = common::create_task(&app, &token, "Buy milk").await;
    assert_ne!(next["taskId"], task["taskId"]);
}

#[actix_rt::test]
async fn test_tasks_list_in_creation_order() {
    let app = common::init_app(common::memory_state()).await;
    let (_, token) = common::register_and_login(&app, "Ada", "ada@example.com").await;

    let first = common::create_task(&app, &token, "first").await;
    let second = common::create_task(&app, &token, "second").await;
    let third = common::create_task(&app, &token, "third").await;

    let req = test::TestRequest::delete()
        .uri(&format!("/tasks/{}", second["taskId"].as_str().unwrap()))
        .insert_header((TOKEN_HEADER, token.as_str()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let descriptions: Vec<Value> = common::list_tasks(&app, &token)
        .await
        .into_iter()
        .map(|t| t["description"].clone())
        .collect();
    assert_eq!(descriptions, vec![first["description"].clone(), third["description"].clone()]);
}

#[actix_rt::test]
async fn test_server_assigns_task_ids() {
    let app = common::init_app(common::memory_state()).await;
    let (_, token) = common::register_and_login(&app, "Ada", "ada@example.com").await;

    let requested = Uuid::new_v4().to_string();
    let req = test::TestRequest::post()
        .uri("/tasks/add")
        .insert_header((TOKEN_HEADER, token.as_str()))
        .set_json(json!({ "description": "Pick my own id", "taskId": requested }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let task: Value = test::read_body_json(resp).await;
    assert_ne!(task["taskId"], requested.as_str());
}

#[actix_rt::test]
async fn test_tasks_are_isolated_between_users() {
    let app = common::init_app(common::memory_state()).await;
    let (_, token_a) = common::register_and_login(&app, "Ada", "ada@example.com").await;
    let (_, token_b) = common::register_and_login(&app, "Grace", "grace@example.com").await;

    let task = common::create_task(&app, &token_a, "Ada's secret").await;
    let task_id = task["taskId"].as_str().unwrap().to_string();

    // B never sees it listed
    assert!(common::list_tasks(&app, &token_b).await.is_empty());

    // B cannot read it
    let req = test::TestRequest::get()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header((TOKEN_HEADER, token_b.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // B cannot edit it
    let req = test::TestRequest::put()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header((TOKEN_HEADER, token_b.as_str()))
        .set_json(json!({ "description": "Grace was here" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // B cannot delete it, though the request itself succeeds
    let req = test::TestRequest::delete()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header((TOKEN_HEADER, token_b.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // A's task is untouched
    let tasks = common::list_tasks(&app, &token_a).await;
    assert_eq!(tasks, vec![task]);
}

#[actix_rt::test]
async fn test_requests_without_a_live_session_are_rejected() {
    let app = common::init_app(common::memory_state()).await;
    let task_path = format!("/tasks/{}", Uuid::new_v4());

    let requests = vec![
        (test::TestRequest::get().uri("/tasks/list"), "list"),
        (
            test::TestRequest::post()
                .uri("/tasks/add")
                .set_json(json!({ "description": "x" })),
            "create",
        ),
        (test::TestRequest::get().uri(&task_path), "get"),
        (
            test::TestRequest::put()
                .uri(&task_path)
                .set_json(json!({ "description": "x" })),
            "update",
        ),
        (test::TestRequest::delete().uri(&task_path), "delete"),
    ];

    for (req, case) in requests {
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "case: {}", case);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string(), "case: {}", case);
    }

    let unknown = Uuid::new_v4().to_string();
    for token in ["", "not-a-uuid", unknown.as_str()] {
        let req = test::TestRequest::get()
            .uri("/tasks/list")
            .insert_header((TOKEN_HEADER, token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "token: {:?}", token);
    }
}

#[actix_rt::test]
async fn test_invalid_task_input() {
    let app = common::init_app(common::memory_state()).await;
    let (_, token) = common::register_and_login(&app, "Ada", "ada@example.com").await;
    let task = common::create_task(&app, &token, "Buy milk").await;
    let task_path = format!("/tasks/{}", task["taskId"].as_str().unwrap());

    let test_cases = vec![
        (
            test::TestRequest::post()
                .uri("/tasks/add")
                .set_json(json!({ "description": "" })),
            StatusCode::UNPROCESSABLE_ENTITY,
            "empty description",
        ),
        (
            test::TestRequest::post()
                .uri("/tasks/add")
                .set_json(json!({ "title": "wrong field" })),
            StatusCode::BAD_REQUEST,
            "missing description",
        ),
        (
            test::TestRequest::get().uri("/tasks/not-a-uuid"),
            StatusCode::BAD_REQUEST,
            "malformed id",
        ),
        (
            test::TestRequest::put()
                .uri(&task_path)
                .set_json(json!({ "description": "x", "taskId": Uuid::new_v4() })),
            StatusCode::UNPROCESSABLE_ENTITY,
            "mismatched taskId",
        ),
        (
            test::TestRequest::put()
                .uri(&task_path)
                .set_json(json!({ "description": "" })),
            StatusCode::UNPROCESSABLE_ENTITY,
            "empty update",
        ),
    ];

    for (req, expected_status, case) in test_cases {
        let req = req.insert_header((TOKEN_HEADER, token.as_str())).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected_status, "case: {}", case);
    }

    // The failed edits left the task alone
    let tasks = common::list_tasks(&app, &token).await;
    assert_eq!(tasks, vec![task]);
}

#[actix_rt::test]
async fn test_missing_token_does_not_take_the_server_down() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind a port");
    let addr = listener.local_addr().unwrap();
    let state = common::memory_state();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(routes::config)
    })
    .workers(1)
    .listen(listener)
    .expect("failed to listen")
    .run();
    let handle = server.handle();
    rt::spawn(server);

    let client = reqwest::Client::new();
    let base = format!("http://{}", addr);

    for _ in 0..3 {
        let resp = client
            .get(format!("{}/tasks/list", base))
            .send()
            .await
            .expect("request failed");
        assert_eq!(resp.status().as_u16(), 401);
    }

    let resp = client
        .post(format!("{}/tasks/add", base))
        .header(TOKEN_HEADER, Uuid::new_v4().to_string())
        .json(&json!({ "description": "x" }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status().as_u16(), 401);

    let resp = client
        .get(format!("{}/status", base))
        .send()
        .await
        .expect("server stopped answering");
    assert_eq!(resp.status().as_u16(), 200);

    handle.stop(false).await;
}
