pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extract::handlers as extract;
use crate::render::handlers as render;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Extraction API
        .route("/api/v1/extract", post(extract::handle_extract))
        .route("/api/v1/extract/text", post(extract::handle_extract_text))
        // Render API
        .route("/api/v1/render", post(render::handle_render))
        .route("/api/v1/convert", post(render::handle_convert))
        .route("/api/v1/form", post(render::handle_form))
        .layer(body_limit)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::extract::docx::tests::{document_xml, make_docx, paragraphs_xml};
    use crate::extract::HeaderMatch;

    const BOUNDARY: &str = "resume-test-boundary";

    fn app() -> Router {
        build_router(AppState::new(Config::default()))
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(uri: &str, field: &str, bytes: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"resume.docx\"\r\nContent-Type: application/vnd.openxmlformats-officedocument.wordprocessingml.document\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn read_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn sample_docx() -> Vec<u8> {
        make_docx(&document_xml(&paragraphs_xml(&[
            "Full Name: Jane Doe",
            "Phone Number: 555-0100",
            "Professional Experience",
            "Engineer: 2020-2022: Built things",
            "Hello there",
        ])))
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "resume-api");
    }

    #[tokio::test]
    async fn test_extract_text() {
        let request = json_request(
            "/api/v1/extract/text",
            json!({ "lines": ["Intro line", "Full Name: Jane Doe", "Key Skills: Go, Rust"] }),
        );
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["record"]["contact"]["name"], "Jane Doe");
        assert_eq!(body["record"]["skills"], json!(["Go", " Rust"]));
        assert_eq!(body["warnings"][0]["line"], 1);
        assert_eq!(body["warnings"][0]["reason"]["kind"], "no_active_section");
    }

    #[tokio::test]
    async fn test_extract_text_honours_header_match_config() {
        let config = Config {
            header_match: HeaderMatch::StartsWith,
            ..Config::default()
        };
        let request = json_request(
            "/api/v1/extract/text",
            json!({ "lines": ["Projects", "Taught Education courses"] }),
        );
        let response = build_router(AppState::new(config))
            .oneshot(request)
            .await
            .unwrap();
        let body = read_json(response).await;
        assert_eq!(body["record"]["projects"], json!(["Taught Education courses"]));
    }

    #[tokio::test]
    async fn test_extract_docx_upload() {
        let response = app()
            .oneshot(multipart_request("/api/v1/extract", "file", &sample_docx()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["record"]["contact"]["phone"], "555-0100");
        assert_eq!(
            body["record"]["experience"],
            json!(["Engineer: 2020-2022: Built things", "Hello there"])
        );
    }

    #[tokio::test]
    async fn test_extract_requires_file_field() {
        let response = app()
            .oneshot(multipart_request("/api/v1/extract", "upload", &sample_docx()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_extract_rejects_non_docx() {
        let response = app()
            .oneshot(multipart_request("/api/v1/extract", "file", b"plain text"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = read_json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_DOCX");
    }

    #[tokio::test]
    async fn test_render_returns_pdf_attachment() {
        let request = json_request(
            "/api/v1/render?template=structured",
            json!({
                "contact": { "name": "Jane Doe" },
                "experience": ["Engineer at Acme", "Engineer: 2020: Shipped"]
            }),
        );
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"generated_resume.pdf\""
        );
        assert_eq!(headers["x-render-warnings"], "1");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_render_unknown_template_is_rejected() {
        let request = json_request("/api/v1/render?template=fancy", json!({}));
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_render_unencodable_text() {
        let request = json_request("/api/v1/render", json!({ "projects": ["ok", "🚀 launch"] }));
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = read_json(response).await;
        assert_eq!(body["error"]["code"], "RENDER_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("projects[1]"));
    }

    #[tokio::test]
    async fn test_convert_docx_to_pdf() {
        let response = app()
            .oneshot(multipart_request(
                "/api/v1/convert?template=classic",
                "file",
                &sample_docx(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-render-warnings"], "0");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_form_submission_renders() {
        let request = json_request(
            "/api/v1/form",
            json!({
                "personal": { "name": "Jane Doe", "phone": "555-0100", "email": "jane@example.com" },
                "summary": "Engineer.",
                "skills": "Go, Rust",
                "experience": [{ "title": "Engineer", "dates": "2020-2022", "description": "Built things" }],
                "education": [{ "degree": "MSc", "institution": "TU Berlin", "year": "2019" }]
            }),
        );
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-render-warnings"], "0");
    }

    #[tokio::test]
    async fn test_form_validation_lists_every_problem() {
        let request = json_request(
            "/api/v1/form",
            json!({
                "personal": { "name": " ", "phone": "555-0100", "email": "" },
                "experience": [],
                "education": [{ "degree": "MSc", "institution": "TU Berlin", "year": "2019" }]
            }),
        );
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        let message = body["error"]["message"].as_str().unwrap();
        assert!(message.contains("name"));
        assert!(message.contains("email"));
        assert!(message.contains("experience"));
    }

    #[tokio::test]
    async fn test_upload_over_limit_is_rejected() {
        let config = Config {
            max_upload_bytes: 64,
            ..Config::default()
        };
        let response = build_router(AppState::new(config))
            .oneshot(multipart_request("/api/v1/extract", "file", &sample_docx()))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }
}
