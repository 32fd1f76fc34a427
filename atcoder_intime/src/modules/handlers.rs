use crate::modules::{
    annotator::Annotator,
    models::{
        request::{ClassifyParameters, ValidatedQuery},
        response::ClassifyResponse,
    },
};
use atcoder_intime_libs::ProblemsApi;
use axum::{extract::Extension, http::StatusCode, Json};
use std::sync::Arc;
use tokio::time::Instant;

type ClassifyResult = (StatusCode, Json<ClassifyResponse>);

pub async fn classify_with_qs<A>(
    ValidatedQuery(params): ValidatedQuery<ClassifyParameters>,
    Extension(annotator): Extension<Arc<Annotator<A>>>,
) -> ClassifyResult
where
    A: ProblemsApi + Send + Sync + 'static,
{
    let start_process = Instant::now();

    let classification = match annotator.annotate(&params.user).await {
        Ok(classification) => classification,
        Err(e) => {
            tracing::error!("classification failed cause: {:?}", e);
            return (
                StatusCode::BAD_GATEWAY,
                Json(ClassifyResponse::error(format!(
                    "failed to retrieve data from AtCoder Problems: {}",
                    e
                ))),
            );
        }
    };

    let time: u32 = Instant::now().duration_since(start_process).as_millis() as u32;
    tracing::info!(
        target: "classifylog",
        "elapsed_time={} user={} cells={} rows={}",
        time,
        params.user,
        classification.cells.len(),
        classification.rows.len()
    );

    (
        StatusCode::OK,
        Json(ClassifyResponse::new(classification, time)),
    )
}

pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
mod test {
    use crate::cmd::server::create_router;
    use crate::modules::{annotator::Annotator, testing::StaticProblemsApi};
    use atcoder_intime_libs::{problems::model::FeedKind, ClassificationEngine};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    async fn get(api: StaticProblemsApi, uri: &str) -> (StatusCode, Value) {
        let app = create_router(Annotator::new(api, ClassificationEngine::default()));
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_classify() {
        let (status, body) = get(StaticProblemsApi::new(), "/api/classify?user=alice").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["user_id"], "alice");
        assert_eq!(body["result"]["rows"]["abc100"]["category"], "in_time");
        assert_eq!(
            body["result"]["cells"]["https://atcoder.jp/contests/abc100/tasks/abc100_a"]["timespan"],
            "2:05"
        );
        assert_eq!(body["stats"]["cells"], 3);
    }

    #[tokio::test]
    async fn test_invalid_user() {
        let (status, body) = get(StaticProblemsApi::new(), "/api/classify?user=..%2Fadmin").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["result"].is_null());
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_retrieval_failure() {
        let api = StaticProblemsApi::new().failing(FeedKind::Submissions);
        let (status, body) = get(api, "/api/classify?user=alice").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["result"].is_null());
    }

    #[tokio::test]
    async fn test_liveness() {
        let (status, _) = get(StaticProblemsApi::new(), "/api/liveness").await;
        assert_eq!(status, StatusCode::OK);
    }
}
