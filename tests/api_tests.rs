
use futures::future::join_all;
use portfolio_showcase::{
    constants::ADMIN_TOKEN_HEADER,
    entities::{
        admin::{AdminStats, Analytics},
        project::{NewProject, Project},
    },
    repositories::project::ProjectRepository,
};
use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;
use uuid::Uuid;

#[actix_rt::test]
async fn create_project_applies_defaults() {
    let app = TestApp::spawn().await;

    let response = app.client
        .post(app.url("/projects"))
        .json(&json!({"title": "CLI", "description": "A tool"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let project: Project = response.json().await.unwrap();
    assert_eq!(project.category, "Other");
    assert!(project.published);
    assert_eq!(project.views, 0);
}

#[actix_rt::test]
async fn create_without_description_persists_nothing() {
    let app = TestApp::spawn().await;

    let response = app.client
        .post(app.url("/projects"))
        .json(&json!({"title": "CLI"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Title and description are required");
    assert_eq!(body["details"][0]["field"], "description");

    assert!(app.store.list_projects().await.unwrap().is_empty());
}

#[actix_rt::test]
async fn malformed_json_is_a_client_error() {
    let app = TestApp::spawn().await;

    let response = app.client
        .post(app.url("/projects"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[actix_rt::test]
async fn tag_query_filters_by_membership() {
    let app = TestApp::spawn().await;
    app.create_titled("P", &["a", "b"], true).await;

    let found: Vec<Project> = app.client
        .get(app.url("/projects?tags=A"))
        .send().await.unwrap()
        .json().await.unwrap();
    assert_eq!(found.len(), 1);

    let none: Vec<Project> = app.client
        .get(app.url("/projects?tags=c"))
        .send().await.unwrap()
        .json().await.unwrap();
    assert!(none.is_empty());

    let either: Vec<Project> = app.client
        .get(app.url("/projects?tags=c,b"))
        .send().await.unwrap()
        .json().await.unwrap();
    assert_eq!(either.len(), 1);
}

#[actix_rt::test]
async fn drafts_need_the_admin_header() {
    let app = TestApp::spawn().await;
    app.create_titled("public", &[], true).await;
    app.create_titled("draft", &[], false).await;

    let anonymous: Vec<Project> = app.client
        .get(app.url("/projects"))
        .send().await.unwrap()
        .json().await.unwrap();
    assert_eq!(anonymous.len(), 1);
    assert_eq!(anonymous[0].title, "public");

    let wrong: Vec<Project> = app.client
        .get(app.url("/projects"))
        .header(ADMIN_TOKEN_HEADER, "guess")
        .send().await.unwrap()
        .json().await.unwrap();
    assert_eq!(wrong.len(), 1);

    let admin: Vec<Project> = app.client
        .get(app.url("/projects"))
        .header(ADMIN_TOKEN_HEADER, ADMIN_TOKEN)
        .send().await.unwrap()
        .json().await.unwrap();
    assert_eq!(admin.len(), 2);
}

#[actix_rt::test]
async fn admin_endpoints_reject_missing_or_wrong_token() {
    let app = TestApp::spawn().await;

    for path in ["/admin/stats", "/admin/projects", "/admin/analytics"] {
        let missing = app.client.get(app.url(path)).send().await.unwrap();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED, "{}", path);

        let wrong = app.client
            .get(app.url(path))
            .header(ADMIN_TOKEN_HEADER, "nope")
            .send()
            .await
            .unwrap();
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED, "{}", path);
        let body: Value = wrong.json().await.unwrap();
        assert_eq!(body["error"], "Unauthorized");
    }
}

#[actix_rt::test]
async fn stats_count_published_and_drafts() {
    let app = TestApp::spawn().await;
    let first = app.create_titled("a", &[], true).await;
    app.create_titled("b", &[], true).await;
    app.create_titled("c", &[], false).await;

    for _ in 0..2 {
        app.client.post(app.url(&format!("/projects/{}/view", first.id))).send().await.unwrap();
    }

    let stats: AdminStats = app.client
        .get(app.url("/admin/stats"))
        .header(ADMIN_TOKEN_HEADER, ADMIN_TOKEN)
        .send().await.unwrap()
        .json().await.unwrap();

    assert_eq!(stats, AdminStats { total: 3, published: 2, drafts: 1, total_views: 2 });
}

#[actix_rt::test]
async fn admin_projects_are_newest_first_including_drafts() {
    let app = TestApp::spawn().await;
    for (title, published) in [("one", true), ("two", false), ("three", true)] {
        app.create_titled(title, &[], published).await;
    }

    let projects: Vec<Project> = app.client
        .get(app.url("/admin/projects"))
        .header(ADMIN_TOKEN_HEADER, ADMIN_TOKEN)
        .send().await.unwrap()
        .json().await.unwrap();

    let titles: Vec<&str> = projects.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["three", "two", "one"]);
}

#[actix_rt::test]
async fn concurrent_views_are_all_counted() {
    let app = TestApp::spawn().await;
    let project = app.create_titled("popular", &[], true).await;
    let url = app.url(&format!("/projects/{}/view", project.id));

    let responses = join_all((0..25).map(|_| app.client.post(&url).send())).await;
    for response in responses {
        assert_eq!(response.unwrap().status(), StatusCode::OK);
    }

    let stored = app.store.list_projects().await.unwrap();
    assert_eq!(stored[0].views, 25);
    assert_eq!(app.store.view_events().len(), 25);

    let analytics: Analytics = app.client
        .get(app.url("/admin/analytics?days=7"))
        .header(ADMIN_TOKEN_HEADER, ADMIN_TOKEN)
        .send().await.unwrap()
        .json().await.unwrap();
    assert_eq!(analytics.most_viewed[0].views, 25);
    assert_eq!(analytics.recent_views, 25);
    assert_eq!(analytics.views_by_date.values().sum::<i64>(), 25);
}

#[actix_rt::test]
async fn view_of_unknown_project_fails_without_side_effects() {
    let app = TestApp::spawn().await;

    let response = app.client
        .post(app.url(&format!("/projects/{}/view", Uuid::new_v4())))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to track view");
    assert!(app.store.view_events().is_empty());
}

#[actix_rt::test]
async fn delete_removes_project_and_missing_ids_fail() {
    let app = TestApp::spawn().await;
    let project = app.create_titled("gone", &[], true).await;

    let response = app.client
        .delete(app.url(&format!("/projects/{}", project.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Project deleted successfully");

    for id in [project.id.to_string(), "not-a-uuid".to_string()] {
        let response = app.client.delete(app.url(&format!("/projects/{}", id))).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Failed to delete project");
    }
}

#[actix_rt::test]
async fn patch_toggles_publish_state() {
    let app = TestApp::spawn().await;
    let project = app.create_titled("toggle", &[], true).await;

    let updated: Project = app.client
        .patch(app.url(&format!("/projects/{}", project.id)))
        .json(&json!({"published": false}))
        .send().await.unwrap()
        .json().await.unwrap();

    assert!(!updated.published);
}

#[actix_rt::test]
async fn contact_with_blank_name_sends_nothing() {
    let app = TestApp::spawn().await;

    let response = app.client
        .post(app.url("/contact"))
        .json(&json!({"name": "", "email": "a@b.c", "message": "hi"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Name, email, and message are required");
    assert_eq!(app.sent_mail(), 0);
}

#[actix_rt::test]
async fn contact_form_is_delivered() {
    let app = TestApp::spawn().await;

    let response = app.client
        .post(app.url("/contact"))
        .json(&json!({"name": "Ada", "email": "ada@example.com", "message": "Hello"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Email sent successfully");

    let sent = app.mailer.sent.lock();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].name, "Ada");
}

#[actix_rt::test]
async fn contact_delivery_failure_returns_generic_error() {
    let app = TestApp::spawn_failing().await;

    let response = app.client
        .post(app.url("/contact"))
        .json(&json!({"name": "Ada", "email": "ada@example.com", "message": "Hello"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.text().await.unwrap();
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json, json!({"error": "Failed to send email"}));
    assert!(!body.contains("535"));
    assert!(!body.contains("owner@example.com"));
    assert_eq!(app.sent_mail(), 0);
}

#[actix_rt::test]
async fn github_upstream_failure_returns_generic_error() {
    let app = TestApp::spawn_failing().await;

    let response = app.client.post(app.url("/projects/sync-github")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.text().await.unwrap();
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json, json!({"error": "Failed to sync GitHub repos"}));
    assert!(!body.contains("Bad credentials"));
    assert!(!body.contains("ghp_test"));
    assert_eq!(app.github_calls(), 1);
}

#[actix_rt::test]
async fn github_sync_without_credentials_makes_no_call() {
    let app = TestApp::spawn().await;

    let response = app.client.post(app.url("/projects/sync-github")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("GITHUB_TOKEN"));
    assert_eq!(app.github_calls(), 0);
}

#[actix_rt::test]
async fn github_sync_returns_candidates_without_forks() {
    let app = TestApp::spawn_with_github(vec![
        github_repo("tool", false),
        github_repo("upstream-fork", true),
    ])
    .await;

    let candidates: Vec<NewProject> = app.client
        .post(app.url("/projects/sync-github"))
        .send().await.unwrap()
        .json().await.unwrap();

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].title.as_deref(), Some("tool"));
    assert_eq!(candidates[0].category.as_deref(), Some("GitHub"));
    assert_eq!(app.github_calls(), 1);
    assert!(app.store.list_projects().await.unwrap().is_empty(), "sync never persists");
}

#[actix_rt::test]
async fn health_reports_running_backend() {
    let app = TestApp::spawn().await;

    let response = app.client.get(app.url("/health")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "Backend is running");
    assert_eq!(body["database"], "OK");
}

#[actix_rt::test]
async fn uptime_counts_from_server_start() {
    let app = TestApp::spawn().await;
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

    let body: Value = app.client
        .get(app.url("/health"))
        .send().await.unwrap()
        .json().await.unwrap();

    let uptime = humantime::parse_duration(body["uptime"].as_str().unwrap()).unwrap();
    assert!(uptime.as_secs() >= 1, "uptime was {}", body["uptime"]);
}

#[actix_rt::test]
async fn trailing_slashes_are_ignored() {
    let app = TestApp::spawn().await;

    let response = app.client.get(app.url("/projects/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
