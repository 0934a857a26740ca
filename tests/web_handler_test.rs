//! Web handler integration tests.
//!
//! Tests cover:
//! - Landing and pricing pages render with plan content
//! - HTMX fragment vs full page responses
//! - Admin table lists every user row in order
//! - Dashboard account fragment with chart
//! - Unknown routes and upstream failures render error pages or fragments

mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use std::sync::Arc;
use tower::ServiceExt;

use common::*;

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn authed_get(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

fn app_with_users(n: usize) -> Router {
    create_app(
        Arc::new(MockPayments::default()),
        Arc::new(MockDatabase::with_users(make_users(n))),
    )
}

mod public_page_tests {
    use super::*;

    #[tokio::test]
    async fn home_renders_full_page() {
        let app = create_default_app();
        let response = app.oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_string(response).await;
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("Home | TrueFunded"));
        assert!(html.contains("100,000"), "largest plan size advertised");
        assert!(html.contains("href=\"/pricing\""));
    }

    #[tokio::test]
    async fn pricing_lists_every_plan() {
        let app = create_default_app();
        let response = app.oneshot(get("/pricing")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_string(response).await;
        for name in ["Starter", "Pro", "Elite"] {
            assert!(html.contains(name), "missing plan {name}");
        }
        assert!(html.contains("data-amount=\"99\""));
        assert!(html.contains("data-amount=\"299\""));
        assert!(html.contains("data-amount=\"499\""));
        assert!(html.contains("/api/stripe"));
    }

    #[tokio::test]
    async fn htmx_request_returns_fragment_only() {
        let app = create_default_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/pricing")
                    .header("HX-Request", "true")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_string(response).await;
        assert!(!html.contains("<!DOCTYPE html>"));
        assert!(html.contains("Starter"));
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = create_default_app();
        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "ok");
    }

    #[tokio::test]
    async fn unknown_route_renders_not_found_page() {
        let app = create_default_app();
        let response = app.oneshot(get("/nope")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let html = body_string(response).await;
        assert!(html.contains("Page not found"));
    }
}

mod admin_tests {
    use super::*;

    async fn admin_html(app: Router) -> String {
        let cookie = login_cookie(&app).await;
        let response = app.oneshot(authed_get("/admin", &cookie)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        body_string(response).await
    }

    #[tokio::test]
    async fn empty_table_renders_no_rows() {
        let html = admin_html(app_with_users(0)).await;
        assert!(html.contains("Admin Panel"));
        assert_eq!(html.matches("class=\"user-row\"").count(), 0);
        assert!(html.contains("No users"));
    }

    #[tokio::test]
    async fn single_user_renders_one_row() {
        let html = admin_html(app_with_users(1)).await;
        assert_eq!(html.matches("class=\"user-row\"").count(), 1);
        assert!(html.contains("trader0@truefunded.test"));
        assert!(!html.contains("No users"));
    }

    #[tokio::test]
    async fn many_users_render_in_order() {
        let html = admin_html(app_with_users(5)).await;
        assert_eq!(html.matches("class=\"user-row\"").count(), 5);

        let positions: Vec<usize> = (0..5)
            .map(|i| html.find(&format!("trader{i}@truefunded.test")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn row_shows_balance_and_profit() {
        let users = vec![make_user("u1", "a@x.test", 51_250.0, 1_250.0)];
        let app = create_app(
            Arc::new(MockPayments::default()),
            Arc::new(MockDatabase::with_users(users)),
        );
        let html = admin_html(app).await;
        assert!(html.contains("51,250.00"));
        assert!(html.contains("1,250.00"));
    }

    #[tokio::test]
    async fn missing_balance_renders_placeholder() {
        let mut user = make_user("u1", "a@x.test", 0.0, 0.0);
        user.balance = None;
        let app = create_app(
            Arc::new(MockPayments::default()),
            Arc::new(MockDatabase::with_users(vec![user])),
        );
        let html = admin_html(app).await;
        assert!(html.contains("<td>-</td>"));
    }

    #[tokio::test]
    async fn database_failure_renders_bad_gateway() {
        let app = create_app(
            Arc::new(MockPayments::default()),
            Arc::new(MockDatabase::failing("connection refused")),
        );
        let cookie = login_cookie(&app).await;
        let response = app.oneshot(authed_get("/admin", &cookie)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let html = body_string(response).await;
        assert!(html.contains("connection refused"));
        assert!(html.contains("<!DOCTYPE html>"));
    }

    #[tokio::test]
    async fn htmx_database_failure_renders_error_fragment() {
        let app = create_app(
            Arc::new(MockPayments::default()),
            Arc::new(MockDatabase::failing("connection refused")),
        );
        let cookie = login_cookie(&app).await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/admin")
                    .header(header::COOKIE, &cookie)
                    .header("HX-Request", "true")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let html = body_string(response).await;
        assert!(!html.contains("<!DOCTYPE html>"));
        assert!(!html.contains("</html>"));
        assert!(html.contains("Error 502"));
        assert!(html.contains("connection refused"));
    }
}

mod dashboard_tests {
    use super::*;

    #[tokio::test]
    async fn dashboard_has_account_form() {
        let app = create_default_app();
        let cookie = login_cookie(&app).await;
        let response = app
            .oneshot(authed_get("/dashboard", &cookie))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_string(response).await;
        assert!(html.contains("hx-post=\"/dashboard/account\""));
        assert!(html.contains("account-container"));
    }

    #[tokio::test]
    async fn account_fragment_shows_stub_figures_and_chart() {
        let app = create_default_app();
        let cookie = login_cookie(&app).await;
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/dashboard/account")
                    .header(header::COOKIE, &cookie)
                    .header("HX-Request", "true")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("login=5012345&password=secret"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_string(response).await;
        assert!(!html.contains("<!DOCTYPE html>"));
        assert!(html.contains("Account 5012345"));
        assert!(html.contains("100,000.00"));
        assert!(html.contains("1,250.00"));
        assert!(html.contains("<svg"));
        assert!(!html.contains("secret"));
    }
}
