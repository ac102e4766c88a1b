// API Integration Tests
//
// Purpose: Exercise every endpoint against the bundled reference data
// Run with: cargo test --features api --test api_integration_tests

#[cfg(feature = "api")]
mod api_tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use suspension_tuner::{create_router, AppState, ReferencePaths};
    use tower::ServiceExt; // for oneshot

    // Helper: Create test app over data/
    fn create_test_app() -> axum::Router {
        let data_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/data");
        let state = AppState::load(&ReferencePaths::from_data_dir(data_dir));
        create_router(state)
    }

    // Helper: POST a JSON body
    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    // Helper: Parse JSON response
    async fn json_response(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        serde_json::from_slice(&body).expect("Failed to parse JSON")
    }

    fn trail_setup() -> Value {
        json!({
            "rider": {"weight_kg": 75, "bike_type": "full_suspension_trail_enduro"},
            "conditions": {"terrain": "jumps", "weather": "dry"},
            "fork": {"brand": "rockshox", "travel_mm": 160, "has_lsc": true},
            "shock": {"brand": "fox", "travel_mm": 65}
        })
    }

    fn hardtail_setup() -> Value {
        json!({
            "rider": {"weight_kg": 68, "bike_type": "hardtail"},
            "fork": {"brand": "fox", "travel_mm": 120}
        })
    }

    // =========================================================================
    // Section 1: Health Check
    // =========================================================================

    #[tokio::test]
    async fn test_health_check() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = json_response(response).await;
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }

    // =========================================================================
    // Section 2: Baseline Setup
    // =========================================================================

    #[tokio::test]
    async fn test_calculate_setup() {
        let response = create_test_app()
            .oneshot(post_json("/api/calculate-setup", &trail_setup()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["fork"]["psi"], 78);
        assert_eq!(body["fork"]["sag_mm"], 40);
        assert_eq!(body["fork"]["sag_pct"], 25);
        assert_eq!(body["fork"]["clicks"], json!({"rebound": 8, "lsc": 4}));
        assert!(body["fork"]["smart_tip"].as_str().unwrap().starts_with("Jumps"));
        assert_eq!(body["shock"]["clicks"], json!({"rebound": 9}));
    }

    #[tokio::test]
    async fn test_hardtail_has_no_shock_entry() {
        let response = create_test_app()
            .oneshot(post_json("/api/calculate-setup", &hardtail_setup()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_response(response).await;
        assert!(body.get("fork").is_some());
        assert!(body.get("shock").is_none());
    }

    #[tokio::test]
    async fn test_hardtail_with_shock_rejected() {
        let mut setup = hardtail_setup();
        setup["shock"] = json!({"brand": "fox", "travel_mm": 50});

        let response = create_test_app()
            .oneshot(post_json("/api/calculate-setup", &setup))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_response(response).await;
        assert!(body["error"].as_str().unwrap().contains("hardtail"));
    }

    #[tokio::test]
    async fn test_out_of_range_weight_rejected() {
        let mut setup = trail_setup();
        setup["rider"]["weight_kg"] = json!(180);

        let response = create_test_app()
            .oneshot(post_json("/api/calculate-setup", &setup))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    // =========================================================================
    // Section 3: Diagnosis
    // =========================================================================

    #[tokio::test]
    async fn test_diagnose_resolved() {
        let response = create_test_app()
            .oneshot(post_json("/api/diagnose?symptom_id=fork_dive_braking", &trail_setup()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_response(response).await;
        assert_eq!(body["status"], "resolved");
        assert_eq!(body["symptom"], "Fork dives under braking");
        assert_eq!(body["primary_fix"]["logic_check"], "has_lsc");
        assert_eq!(body["secondary_fix"]["logic_check"], "tokens_adjustable");
    }

    #[tokio::test]
    async fn test_diagnose_unknown_symptom() {
        let response = create_test_app()
            .oneshot(post_json("/api/diagnose?symptom_id=flat_tyre", &trail_setup()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_response(response).await;
        assert_eq!(body["status"], "symptom_unknown");
        assert_eq!(body["symptom_id"], "flat_tyre");
        assert!(body.get("primary_fix").is_none());
    }

    #[tokio::test]
    async fn test_diagnose_shock_on_hardtail() {
        let response = create_test_app()
            .oneshot(post_json("/api/diagnose?symptom_id=shock_bucking", &hardtail_setup()))
            .await
            .unwrap();

        let body = json_response(response).await;
        assert_eq!(body["status"], "component_missing");
        assert_eq!(body["component"], "shock");
    }

    #[tokio::test]
    async fn test_diagnose_requires_symptom_id() {
        let response = create_test_app()
            .oneshot(post_json("/api/diagnose", &trail_setup()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_response(response).await;
        assert!(body["error"].as_str().unwrap().contains("symptom_id"));
    }
}
