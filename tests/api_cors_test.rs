//! Integration tests for the cross origin policy

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use tower::util::ServiceExt;

    use storefront_assistant::core::config::DEFAULT_ALLOWED_ORIGIN;

    use crate::test_utils::test_app;

    fn preflight(origin: &str, method: &str) -> Request<Body> {
        Request::builder()
            .uri("/api/chat")
            .method("OPTIONS")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, method)
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap()
    }

    /// Tests the storefront origin passes preflight
    #[tokio::test]
    async fn it_allows_the_storefront_origin() {
        let app = test_app().await;

        let response = app
            .oneshot(preflight(DEFAULT_ALLOWED_ORIGIN, "POST"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            DEFAULT_ALLOWED_ORIGIN
        );

        let methods = headers
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(methods.contains("GET"));
        assert!(methods.contains("POST"));
        assert!(!methods.contains("PUT"));
        assert!(!methods.contains("DELETE"));

        let allowed_headers = headers
            .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
            .unwrap()
            .to_str()
            .unwrap();
        assert_eq!(allowed_headers, "content-type");
    }

    /// Tests any other origin gets no allow-origin header
    #[tokio::test]
    async fn it_refuses_other_origins() {
        let app = test_app().await;

        let response = app
            .oneshot(preflight("https://evil.example.com", "POST"))
            .await
            .unwrap();

        assert!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }

    /// Tests actual requests from the storefront carry the header
    #[tokio::test]
    async fn it_tags_storefront_responses() {
        let app = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/chat")
                    .method("POST")
                    .header(header::ORIGIN, DEFAULT_ALLOWED_ORIGIN)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"message": "hello"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            DEFAULT_ALLOWED_ORIGIN
        );
    }
}
