//! End-to-end pipeline tests: detection, fan-out, merge, reassembly.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use bytes::Bytes;
use http::header::HeaderValue;
use http::{HeaderMap, Method, StatusCode};

use batchgrid::{
    BatchProcessor, BufferedResponse, OperationHandler, OperationRequest, handler_fn,
};

fn request(body: &'static [u8]) -> OperationRequest {
    let mut headers = HeaderMap::new();
    headers.insert("authorization", HeaderValue::from_static("bearer t"));
    OperationRequest::new(Method::POST, "/query".parse().unwrap(), headers, body)
}

fn processor(
    handler: impl OperationHandler + 'static,
) -> BatchProcessor {
    BatchProcessor::new(Arc::new(handler))
}

#[tokio::test]
async fn slow_first_operation_keeps_its_position() {
    let handler = handler_fn(|request: OperationRequest| async move {
        // Operation 0 completes well after operation 1.
        if request.body().as_ref() == b"{\"op\":0}" {
            tokio::time::sleep(Duration::from_millis(80)).await;
        }
        (StatusCode::OK, HeaderMap::new(), request.body().clone())
    });

    let mut sink = BufferedResponse::new();
    processor(handler)
        .process(&mut sink, request(b"[{\"op\":0},{\"op\":1}]"))
        .await
        .unwrap();

    assert_eq!(sink.body(), b"[{\"op\":0},{\"op\":1}]");
}

#[tokio::test]
async fn each_invocation_gets_metadata_and_its_fragment() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();
    let handler = handler_fn(move |request: OperationRequest| {
        let seen = seen.clone();
        async move {
            seen.fetch_add(1, Ordering::SeqCst);
            // Shared request metadata is visible to every operation.
            assert_eq!(request.headers().get("authorization").unwrap(), "bearer t");
            assert_eq!(request.uri().path(), "/query");
            (StatusCode::OK, HeaderMap::new(), request.body().clone())
        }
    });

    let mut sink = BufferedResponse::new();
    processor(handler)
        .process(&mut sink, request(b"[\"a\",\"b\",\"c\"]"))
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(sink.body(), b"[\"a\",\"b\",\"c\"]");
}

#[tokio::test]
async fn identical_header_pairs_merge_once() {
    let handler = handler_fn(|request: OperationRequest| async move {
        let mut headers = HeaderMap::new();
        headers.insert("x-trace", HeaderValue::from_static("abc"));
        (StatusCode::OK, headers, request.body().clone())
    });

    let mut sink = BufferedResponse::new();
    processor(handler)
        .process(&mut sink, request(b"[1,2]"))
        .await
        .unwrap();

    let values: Vec<_> = sink.headers().get_all("x-trace").iter().collect();
    assert_eq!(values.len(), 1);
}

#[tokio::test]
async fn distinct_cookie_values_both_survive() {
    let handler = handler_fn(|request: OperationRequest| async move {
        let mut headers = HeaderMap::new();
        let cookie = if request.body().as_ref() == b"1" {
            "session=a"
        } else {
            "session=b"
        };
        headers.insert("set-cookie", HeaderValue::from_static(cookie));
        (StatusCode::OK, headers, request.body().clone())
    });

    let mut sink = BufferedResponse::new();
    processor(handler)
        .process(&mut sink, request(b"[1,2]"))
        .await
        .unwrap();

    let values: Vec<_> = sink
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|v| v.to_str().unwrap())
        .collect();
    assert_eq!(values, vec!["session=a", "session=b"]);
}

#[tokio::test]
async fn per_operation_content_type_never_leaks() {
    let handler = handler_fn(|request: OperationRequest| async move {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("text/plain"));
        headers.insert("cache-control", HeaderValue::from_static("max-age=60"));
        (StatusCode::OK, headers, request.body().clone())
    });

    let mut sink = BufferedResponse::new();
    processor(handler)
        .process(&mut sink, request(b"[1]"))
        .await
        .unwrap();

    // The outer response carries the assembler's content type, not the
    // per-operation one, and no cached/framing headers at all.
    assert_eq!(
        sink.headers().get("content-type").unwrap(),
        "application/json"
    );
    assert!(sink.headers().get("cache-control").is_none());
}

#[tokio::test]
async fn batch_status_is_200_even_when_every_operation_failed() {
    let handler = handler_fn(|_request: OperationRequest| async move {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            HeaderMap::new(),
            Bytes::from_static(b"{\"errors\":[{\"message\":\"boom\"}]}"),
        )
    });

    let mut sink = BufferedResponse::new();
    processor(handler)
        .process(&mut sink, request(b"[1,2]"))
        .await
        .unwrap();

    assert_eq!(sink.status(), StatusCode::OK);
    assert_eq!(
        sink.body(),
        b"[{\"errors\":[{\"message\":\"boom\"}]},{\"errors\":[{\"message\":\"boom\"}]}]"
    );
}

#[tokio::test]
async fn non_batch_body_reaches_the_real_sink_directly() {
    let handler = handler_fn(|request: OperationRequest| async move {
        let mut headers = HeaderMap::new();
        // Passthrough must not strip framing headers.
        headers.insert("content-type", HeaderValue::from_static("text/plain"));
        (StatusCode::CREATED, headers, request.body().clone())
    });

    let mut sink = BufferedResponse::new();
    processor(handler)
        .process(&mut sink, request(b"{\"q\":1}"))
        .await
        .unwrap();

    assert_eq!(sink.status(), StatusCode::CREATED);
    assert_eq!(sink.headers().get("content-type").unwrap(), "text/plain");
    assert_eq!(sink.body(), b"{\"q\":1}");
}

#[tokio::test]
async fn empty_body_takes_the_single_path() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();
    let handler = handler_fn(move |request: OperationRequest| {
        let seen = seen.clone();
        async move {
            seen.fetch_add(1, Ordering::SeqCst);
            assert!(request.body().is_empty());
            (StatusCode::OK, HeaderMap::new(), Bytes::from_static(b"{}"))
        }
    });

    let mut sink = BufferedResponse::new();
    processor(handler)
        .process(&mut sink, request(b""))
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(sink.body(), b"{}");
}

#[tokio::test]
async fn buffered_response_converts_to_http_response() {
    let handler = handler_fn(|request: OperationRequest| async move {
        (StatusCode::OK, HeaderMap::new(), request.body().clone())
    });

    let mut sink = BufferedResponse::new();
    processor(handler)
        .process(&mut sink, request(b"[1]"))
        .await
        .unwrap();

    let response = sink.into_response();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );
}
