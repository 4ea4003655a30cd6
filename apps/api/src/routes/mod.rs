pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::admin::handlers as admin;
use crate::affiliate::handlers as affiliate;
use crate::reports::handlers as reports;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Report API
        .route("/api/v1/reports/free", post(reports::handle_free_report))
        .route("/api/v1/reports/premium", post(reports::handle_premium_report))
        .route("/api/v1/reports/email", post(reports::handle_email_report))
        // Affiliate directory (public read path)
        .route("/api/v1/affiliate-links", get(affiliate::handle_list_links))
        .route(
            "/api/v1/affiliate-links/lookup",
            get(affiliate::handle_lookup_link),
        )
        // Admin API
        .route(
            "/api/v1/admin/affiliate-links",
            post(affiliate::handle_create_link),
        )
        .route(
            "/api/v1/admin/affiliate-links/:id",
            put(affiliate::handle_update_link).delete(affiliate::handle_delete_link),
        )
        .route(
            "/api/v1/admin/profile",
            get(admin::handle_get_profile).patch(admin::handle_update_profile),
        )
        .route(
            "/api/v1/admin/dashboard/analytics",
            get(admin::handle_analytics),
        )
        .route("/api/v1/admin/dashboard/payments", get(admin::handle_payments))
        .route("/api/v1/admin/dashboard/feedback", get(admin::handle_feedback))
        .route(
            "/api/v1/admin/dashboard/ai-activity",
            get(admin::handle_ai_activity),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::testing::{
        mint_token, sample_free_output, sample_premium_output, TestApp, TEST_JWT_SECRET,
    };

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = TestApp::new();
        let (status, json) = send(app.router(), get_request("/health", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_free_report_links_matching_courses() {
        let app = TestApp::with_reply(&sample_free_output().to_string());
        app.seed_link("introduction to python");

        let (status, json) = send(
            app.router(),
            json_request(
                Method::POST,
                "/api/v1/reports/free",
                None,
                json!({"fieldOfStudy": "Computer Science", "careerInterests": ""}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert!(!json["data"]["report"]["jobRoles"].as_array().unwrap().is_empty());
        let courses = json["data"]["courses"].as_array().unwrap();
        assert_eq!(courses[0]["title"], "Introduction to Python");
        assert!(courses[0]["link"].is_object());
        assert_eq!(courses[0]["label"], "introduction to python");
        assert_eq!(courses[1]["label"], "SQL for Data Analysis");
        assert!(courses[1]["link"].is_null());
    }

    #[tokio::test]
    async fn test_free_report_invalid_input_is_itemized() {
        let app = TestApp::with_reply(&sample_free_output().to_string());
        let (status, json) = send(
            app.router(),
            json_request(
                Method::POST,
                "/api/v1/reports/free",
                None,
                json!({"fieldOfStudy": "IT"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(json["issues"][0], "Field of study must be at least 3 characters.");
        assert_eq!(app.model.calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_requests_keep_action_result_shape() {
        let app = TestApp::new();
        let admin = app.store.add_profile("admin");
        let token = mint_token(TEST_JWT_SECRET, admin, 3600);

        let requests = vec![
            json_request(Method::POST, "/api/v1/reports/free", None, json!({})),
            json_request(
                Method::POST,
                "/api/v1/reports/free",
                None,
                json!({"careerInterests": "x"}),
            ),
            Request::builder()
                .method(Method::DELETE)
                .uri("/api/v1/admin/affiliate-links/not-a-uuid")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
            get_request("/api/v1/affiliate-links/lookup", None),
        ];

        for request in requests {
            let uri = request.uri().to_string();
            let (status, json) = send(app.router(), request).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(json["success"], false, "{uri}");
            assert_eq!(json["code"], "VALIDATION_ERROR", "{uri}");
            assert!(!json["issues"].as_array().unwrap().is_empty(), "{uri}");
        }
        assert_eq!(app.model.calls(), 0);
        assert_eq!(app.store.writes(), 0);
    }

    #[tokio::test]
    async fn test_free_report_generation_failure_has_no_data() {
        let app = TestApp::failing_model();
        let (status, json) = send(
            app.router(),
            json_request(
                Method::POST,
                "/api/v1/reports/free",
                None,
                json!({"fieldOfStudy": "Computer Science"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["success"], false);
        assert!(json.get("data").is_none());
    }

    #[tokio::test]
    async fn test_premium_report_requires_verified_payment() {
        let app = TestApp::with_reply(&sample_premium_output().to_string()).rejecting_payments();
        let body = json!({
            "input": {
                "fullName": "Priya Sharma",
                "email": "priya@example.com",
                "university": "IIT Delhi",
                "fieldOfStudy": "Electrical Engineering",
                "learningPreference": "Online courses"
            },
            "payment": {"paymentId": "pay_forged"}
        });
        let (status, json) = send(
            app.router(),
            json_request(Method::POST, "/api/v1/reports/premium", None, body),
        )
        .await;

        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
        assert_eq!(json["code"], "PAYMENT_REQUIRED");
        assert_eq!(app.model.calls(), 0);
    }

    #[tokio::test]
    async fn test_premium_report_pairs_resources_with_links() {
        let app = TestApp::with_reply(&sample_premium_output().to_string());
        app.seed_link("Machine Learning");
        let body = json!({
            "input": {
                "fullName": "Priya Sharma",
                "email": "priya@example.com",
                "university": "IIT Delhi",
                "fieldOfStudy": "Electrical Engineering",
                "learningPreference": "Online courses"
            },
            "payment": {"paymentId": "pay_test123", "orderId": "order_test123"}
        });
        let (status, json) = send(
            app.router(),
            json_request(Method::POST, "/api/v1/reports/premium", None, body),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let resources = json["data"]["resources"].as_array().unwrap();
        assert!(resources
            .iter()
            .any(|r| r["title"] == "Machine Learning" && r["link"].is_object()));
    }

    #[tokio::test]
    async fn test_email_is_recorded_not_sent() {
        let app = TestApp::new();
        let (status, json) = send(
            app.router(),
            json_request(
                Method::POST,
                "/api/v1/reports/email",
                None,
                json!({"recipient": "student@example.com", "body": "Your report"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["delivered"], false);
        assert_eq!(json["data"]["body"], "Your report");
        assert_eq!(app.notifier.recipients(), vec!["student@example.com".to_string()]);
    }

    #[tokio::test]
    async fn test_lookup_is_case_and_whitespace_insensitive() {
        let app = TestApp::new();
        app.seed_link("Introduction to Python");

        for title in [
            "Introduction%20To%20Python",
            "%20introduction%20to%20python%20",
            "introduction%20to%20python",
        ] {
            let (status, json) = send(
                app.router(),
                get_request(&format!("/api/v1/affiliate-links/lookup?title={title}"), None),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(json["data"]["title"], "Introduction to Python");
        }
    }

    #[tokio::test]
    async fn test_create_link_without_session_is_auth_error() {
        let app = TestApp::new();
        let (status, json) = send(
            app.router(),
            json_request(
                Method::POST,
                "/api/v1/admin/affiliate-links",
                None,
                json!({"title": "Introduction to Python", "affiliateUrl": "https://example.com/py"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["code"], "AUTH_ERROR");
        assert_eq!(app.store.writes(), 0);
    }

    #[tokio::test]
    async fn test_create_link_with_expired_session_is_auth_error() {
        let app = TestApp::new();
        let admin = app.store.add_profile("admin");
        let token = mint_token(TEST_JWT_SECRET, admin, -3600);
        let (status, _) = send(
            app.router(),
            json_request(
                Method::POST,
                "/api/v1/admin/affiliate-links",
                Some(&token),
                json!({"title": "Introduction to Python", "affiliateUrl": "https://example.com/py"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(app.store.link_count(), 0);
    }

    #[tokio::test]
    async fn test_create_link_as_non_admin_terminates_session() {
        let app = TestApp::new();
        let user = app.store.add_profile("user");
        let token = mint_token(TEST_JWT_SECRET, user, 3600);
        let request = json_request(
            Method::POST,
            "/api/v1/admin/affiliate-links",
            Some(&token),
            json!({"title": "Introduction to Python", "affiliateUrl": "https://example.com/py"}),
        );
        let response = app.router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(response.headers().get(header::SET_COOKIE).is_some());
        assert_eq!(app.store.writes(), 0);
        assert_eq!(app.store.link_count(), 0);
    }

    #[tokio::test]
    async fn test_admin_link_lifecycle() {
        let app = TestApp::new();
        let admin = app.store.add_profile("admin");
        let token = mint_token(TEST_JWT_SECRET, admin, 3600);

        let (status, created) = send(
            app.router(),
            json_request(
                Method::POST,
                "/api/v1/admin/affiliate-links",
                Some(&token),
                json!({"title": "Introduction to Python", "affiliateUrl": "https://example.com/py"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let (status, json) = send(
            app.router(),
            json_request(
                Method::POST,
                "/api/v1/admin/affiliate-links",
                Some(&token),
                json!({"title": "INTRODUCTION TO PYTHON", "affiliateUrl": "https://example.com/py2"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["code"], "CONFLICT");
        assert_eq!(app.store.link_count(), 1);

        let (status, updated) = send(
            app.router(),
            json_request(
                Method::PUT,
                &format!("/api/v1/admin/affiliate-links/{id}"),
                Some(&token),
                json!({
                    "title": "Introduction to Python",
                    "affiliateUrl": "https://example.com/py?ref=cp",
                    "displayText": "Python for Everybody"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["data"]["displayText"], "Python for Everybody");

        let (status, _) = send(
            app.router(),
            Request::builder()
                .method(Method::DELETE)
                .uri(format!("/api/v1/admin/affiliate-links/{id}"))
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(app.store.link_count(), 0);
    }

    #[tokio::test]
    async fn test_profile_update_ignores_role() {
        let app = TestApp::new();
        let admin = app.store.add_profile("admin");
        let token = mint_token(TEST_JWT_SECRET, admin, 3600);

        let (status, json) = send(
            app.router(),
            json_request(
                Method::PATCH,
                "/api/v1/admin/profile",
                Some(&token),
                json!({"full_name": "Ada Lovelace", "role": "owner"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["full_name"], "Ada Lovelace");
        assert_eq!(json["data"]["role"], "admin");
        assert_eq!(app.store.profile(admin).unwrap().role, "admin");
    }

    #[tokio::test]
    async fn test_dashboards_require_admin_cookie_session() {
        let app = TestApp::new();
        let admin = app.store.add_profile("admin");
        let token = mint_token(TEST_JWT_SECRET, admin, 3600);

        for panel in ["analytics", "payments", "feedback", "ai-activity"] {
            let uri = format!("/api/v1/admin/dashboard/{panel}");
            let (status, _) = send(app.router(), get_request(&uri, None)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{panel}");

            let request = Request::builder()
                .uri(&uri)
                .header(header::COOKIE, format!("access_token={token}"))
                .body(Body::empty())
                .unwrap();
            let (status, json) = send(app.router(), request).await;
            assert_eq!(status, StatusCode::OK, "{panel}");
            assert_eq!(json["success"], true);
        }
    }

    #[tokio::test]
    async fn test_unknown_profile_cannot_reach_admin() {
        let app = TestApp::new();
        let token = mint_token(TEST_JWT_SECRET, Uuid::new_v4(), 3600);
        let (status, _) = send(app.router(), get_request("/api/v1/admin/profile", Some(&token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
