mod common;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, StatusCode};
use common::{HELLO, app_for, body_json, form_request, spawn_vendor};
use serde_json::Value;
use studyenglish::ai::NO_CONTENT_SENTINEL;
use tower::ServiceExt;

/// (route, form field, sample input)
const ROUTES: [(&str, &str, &str); 4] = [
    ("/cet6/vocab/explanation", "word", "abandon"),
    ("/cet6/sentence/parse", "sentence", "Had+I+known%2C+I+would+have+come."),
    ("/cet6/essay/correct", "essay", "My+hometown+are+beautiful."),
    (
        "/cet6/translation/generate",
        "chineseText",
        "%E6%88%91%E5%96%9C%E6%AC%A2%E8%8B%B1%E8%AF%AD",
    ),
];

#[tokio::test]
async fn every_route_returns_a_rewrapped_completion() {
    let vendor = spawn_vendor(StatusCode::OK, HELLO).await;
    let app = app_for(&vendor);

    for (route, field, input) in ROUTES {
        let response = app
            .clone()
            .oneshot(form_request(route, &format!("{field}={input}")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{route}");
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json",
            "{route}"
        );

        let json = body_json(response).await;
        assert_eq!(json["object"], "chat.completion", "{route}");
        assert_eq!(json["choices"].as_array().unwrap().len(), 1, "{route}");
        assert_eq!(json["choices"][0]["message"]["content"], "hello", "{route}");
        assert_eq!(json["choices"][0]["message"]["role"], "assistant", "{route}");
        assert_eq!(json["choices"][0]["finish_reason"], "stop", "{route}");
        for key in ["prompt_tokens", "completion_tokens", "total_tokens"] {
            assert!(json["usage"][key].is_u64(), "{route}: usage.{key}");
        }
    }
    assert_eq!(vendor.hits(), ROUTES.len());
}

#[tokio::test]
async fn vendor_request_has_no_temperature() {
    let vendor = spawn_vendor(StatusCode::OK, HELLO).await;
    let app = app_for(&vendor);

    let response = app
        .oneshot(form_request("/cet6/vocab/explanation", "word=abandon"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let sent = vendor.last_body();
    assert!(sent.get("temperature").is_none());
    assert_eq!(sent["max_tokens"], 2000);
    let prompt = sent["messages"][0]["content"].as_str().unwrap();
    assert!(prompt.contains("abandon"));
    assert!(prompt.contains("六级"));
}

#[tokio::test]
async fn blank_or_missing_input_is_rejected_without_vendor_call() {
    let vendor = spawn_vendor(StatusCode::OK, HELLO).await;
    let app = app_for(&vendor);

    for (route, field, _) in ROUTES {
        for body in [format!("{field}="), format!("{field}=+++"), String::new()] {
            let response = app.clone().oneshot(form_request(route, &body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{route} {body:?}");

            let json = body_json(response).await;
            assert_eq!(json["kind"], "invalid_input");
            assert!(json["error"].as_str().unwrap().contains("不能为空"));
        }
    }
    assert_eq!(vendor.hits(), 0);
}

#[tokio::test]
async fn oversized_input_is_rejected_without_vendor_call() {
    let vendor = spawn_vendor(StatusCode::OK, HELLO).await;
    let app = app_for(&vendor);
    let huge = "a".repeat(2001);

    for (route, field, _) in ROUTES {
        let response = app
            .clone()
            .oneshot(form_request(route, &format!("{field}={huge}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{route}");
    }
    assert_eq!(vendor.hits(), 0);
}

#[tokio::test]
async fn missing_choices_fall_back_to_sentinel() {
    for vendor_body in [r#"{"choices":[]}"#, r#"{"id":"x"}"#, r#"{"choices":[{"message":{}}]}"#] {
        let vendor = spawn_vendor(StatusCode::OK, vendor_body).await;
        let app = app_for(&vendor);

        for (route, field, input) in ROUTES {
            let response = app
                .clone()
                .oneshot(form_request(route, &format!("{field}={input}")))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{route}");
            let json = body_json(response).await;
            assert_eq!(
                json["choices"][0]["message"]["content"],
                NO_CONTENT_SENTINEL,
                "{route}"
            );
        }
    }
}

#[tokio::test]
async fn vendor_failure_is_well_formed_json() {
    let vendor = spawn_vendor(StatusCode::TOO_MANY_REQUESTS, "slow down \"please\"").await;
    let app = app_for(&vendor);

    let response = app
        .oneshot(form_request("/cet6/essay/correct", "essay=My+essay"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = body_json(response).await;
    assert_eq!(json["kind"], "vendor_call");
    let error = json["error"].as_str().unwrap();
    assert!(error.starts_with("作文批改失败："));
    assert!(error.contains("slow down \"please\""));
    assert_eq!(vendor.hits(), 1);
}

#[tokio::test]
async fn malformed_vendor_json_is_a_parse_error() {
    let vendor = spawn_vendor(StatusCode::OK, "<html>oops</html>").await;
    let app = app_for(&vendor);

    let response = app
        .oneshot(form_request("/cet6/sentence/parse", "sentence=Hello+world"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["kind"], "vendor_response_parse");
}

#[tokio::test]
async fn query_string_parameters_are_accepted() {
    let vendor = spawn_vendor(StatusCode::OK, HELLO).await;
    let app = app_for(&vendor);

    for (route, field, input) in ROUTES {
        let uri = format!("{route}?{field}={input}");

        // No body and no form content type at all
        let bare = Request::builder()
            .method(Method::POST)
            .uri(&uri)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(bare).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert_eq!(body_json(response).await["choices"][0]["message"]["content"], "hello");

        // Form content type with an empty body
        let response = app.clone().oneshot(form_request(&uri, "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }
    assert_eq!(vendor.hits(), ROUTES.len() * 2);
}

#[tokio::test]
async fn form_body_wins_over_query_string() {
    let vendor = spawn_vendor(StatusCode::OK, HELLO).await;
    let app = app_for(&vendor);

    let response = app
        .oneshot(form_request("/cet6/vocab/explanation?word=ignored", "word=abandon"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let prompt = vendor.last_body()["messages"][0]["content"].as_str().unwrap().to_string();
    assert!(prompt.contains("abandon"));
    assert!(!prompt.contains("ignored"));
}

#[tokio::test]
async fn non_form_body_without_query_is_rejected() {
    let vendor = spawn_vendor(StatusCode::OK, HELLO).await;
    let app = app_for(&vendor);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/cet6/vocab/explanation")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"word":"abandon"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["kind"], "invalid_input");
    assert_eq!(vendor.hits(), 0);
}
