pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::profile::handlers as profile;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Profile API
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile)
                .put(profile::handle_submit_profile)
                .layer(upload_limit),
        )
        .route("/api/v1/profile/inbound", post(profile::handle_inbound))
        .route(
            "/api/v1/profile/outbound",
            post(profile::handle_outbound_preview),
        )
        .route(
            "/api/v1/profile/missing-fields",
            post(profile::handle_missing_fields),
        )
        // Resume API
        .route("/api/v1/resume/layout", post(resume::handle_layout))
        .route("/api/v1/resume/export", post(resume::handle_export))
        .route(
            "/api/v1/resume/from-profile",
            post(resume::handle_from_profile),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::models::wire::WireProfile;
    use crate::profile::submission::{Submission, TextField};
    use crate::resume::default_page_config;
    use crate::upstream::{ProfileApi, ProfileApiError};

    const BODY_LIMIT: usize = 1024 * 1024;

    /// Serves a canned profile and records submissions.
    #[derive(Default)]
    struct StubProfileApi {
        profile: Value,
        submitted: Mutex<Vec<(Vec<TextField>, usize)>>,
    }

    #[async_trait]
    impl ProfileApi for StubProfileApi {
        async fn fetch_profile(&self, token: &str) -> Result<WireProfile, ProfileApiError> {
            if token != "good" {
                return Err(ProfileApiError::Status {
                    status: 401,
                    message: "bad token".into(),
                });
            }
            Ok(serde_json::from_value(self.profile.clone())?)
        }

        async fn submit_profile(
            &self,
            _token: &str,
            submission: Submission,
        ) -> Result<Value, ProfileApiError> {
            let (fields, files) = submission.into_parts();
            self.submitted.lock().unwrap().push((fields, files.len()));
            Ok(json!({ "ok": true }))
        }
    }

    fn app(api: Arc<StubProfileApi>) -> Router {
        build_router(AppState {
            config: Config {
                profile_api_url: "http://profile.invalid".into(),
                profile_api_timeout_secs: 5,
                max_upload_bytes: BODY_LIMIT,
                port: 0,
                rust_log: "debug".into(),
            },
            profile_api: api,
            page_config: default_page_config(),
        })
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(Arc::default())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_missing_fields_endpoint() {
        let body = json!({
            "skills": [],
            "phoneNumber": "12345",
            "locationData": { "lat": 1, "lng": 2, "address": "Lagos" },
            "WorkExperience": []
        });
        let response = app(Arc::default())
            .oneshot(json_request("/api/v1/profile/missing-fields", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let report = body_json(response).await;
        assert_eq!(report["missing"], json!(["skills", "Work Experience"]));
        assert_eq!(report["complete"], false);
    }

    #[tokio::test]
    async fn test_get_profile_requires_token() {
        let response = app(Arc::default())
            .oneshot(Request::get("/api/v1/profile").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_get_profile_relays_upstream_rejection() {
        let response = app(Arc::default())
            .oneshot(
                Request::get("/api/v1/profile")
                    .header(header::AUTHORIZATION, "Bearer stale")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_get_profile_transforms_inbound() {
        let api = Arc::new(StubProfileApi {
            profile: json!({
                "bio": "Hi",
                "WorkExperience": [{ "company": "Acme", "description": "Built X\nBuilt Y" }]
            }),
            ..Default::default()
        });
        let response = app(api)
            .oneshot(
                Request::get("/api/v1/profile")
                    .header(header::AUTHORIZATION, "Bearer good")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["profile"]["bio"], "Hi");
        assert_eq!(body["experience"][0]["id"], 1);
        assert_eq!(body["experience"][0]["points"][1]["point"], "Built Y");
        assert_eq!(
            body["missingFields"]["missing"],
            json!(["skills", "phone number", "location"])
        );
    }

    #[tokio::test]
    async fn test_submit_profile_multipart() {
        let api = Arc::new(StubProfileApi::default());
        let boundary = "XBOUNDARYX";
        let profile = json!({
            "draft": { "bio": "Backend engineer", "skills": ["Rust"] },
            "education": [{ "institution": "", "type": "BS" }],
            "certifications": [{ "name": "PMP" }, { "name": "CKA" }]
        });
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"profile\"\r\n\r\n{p}\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"certificateFile[1]\"; filename=\"cka.pdf\"\r\n\
             Content-Type: application/pdf\r\n\r\n%PDF-1.4\r\n--{b}--\r\n",
            b = boundary,
            p = profile
        );
        let request = Request::put("/api/v1/profile")
            .header(header::AUTHORIZATION, "Bearer good")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = app(api.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let submitted = api.submitted.lock().unwrap();
        let (fields, file_count) = &submitted[0];
        assert_eq!(*file_count, 1);
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["bio", "skills", "certificates", "certificateUploadIds"]
        );
    }

    #[tokio::test]
    async fn test_submit_profile_rejects_orphan_file() {
        let boundary = "XBOUNDARYX";
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"profile\"\r\n\r\n{{}}\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"certificateFile[3]\"; filename=\"x.pdf\"\r\n\
             Content-Type: application/pdf\r\n\r\n%PDF\r\n--{b}--\r\n",
            b = boundary
        );
        let request = Request::put("/api/v1/profile")
            .header(header::AUTHORIZATION, "Bearer good")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = app(Arc::default()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_resume_layout_endpoint() {
        let body = json!({
            "resume": { "name": "Jane Doe", "title": "Engineer", "academics": [], "languages": [] },
            "generatedOn": "01/02/2026"
        });
        let response = app(Arc::default())
            .oneshot(json_request("/api/v1/resume/layout", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let doc = body_json(response).await;
        assert_eq!(doc["pages"][0]["header"]["avatar"]["value"], "JD");
        assert_eq!(doc["pages"][0]["footer"], "Generated on 01/02/2026 · Page 1 of 1");
        assert!(doc["pages"][0]["lines"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resume_export_is_text_attachment() {
        let body = json!({ "resume": { "name": "Jane Doe", "bio": "Builds things." } });
        let response = app(Arc::default())
            .oneshot(json_request("/api/v1/resume/export", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"resume-jane-doe.txt\""
        );
        let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("ABOUT\nBuilds things."));
    }
}
