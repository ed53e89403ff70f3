use axum::{
    extract::Path,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use inverted_wordles::answers;
use inverted_wordles::client::{AnswerSource, HttpAnswerSource, WordlesClient};
use inverted_wordles::deploy::{wait_for_deploy, DeployStatus};
use inverted_wordles::error::WordleError;
use inverted_wordles::models::{CheckDeployRequest, SaveAnswersRequest};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

// Mock wordle site
#[derive(Default)]
struct MockSite {
    saved: Mutex<Vec<SaveAnswersRequest>>,
    deploy_checks: Mutex<usize>,
    /// Number of checks after which a branch reports as deployed.
    ready_after: usize,
}

async fn serve(site: Arc<MockSite>) -> String {
    let for_save = site.clone();
    let for_deploy = site.clone();

    let app = Router::new()
        .route(
            "/api/fetch_answer/{branch}",
            get(|Path(branch): Path<String>| async move {
                match branch.as_str() {
                    "stalled" => {
                        tokio::time::sleep(Duration::from_secs(30)).await;
                        Ok(Json(json!({})))
                    }
                    "ws-1" => Ok(Json(json!({
                        "8f0c": {"answers": ["cat", "dog"]},
                        "11aa": {"answers": ["cat"]},
                        "0b3e": {}
                    }))),
                    _ => Err(StatusCode::INTERNAL_SERVER_ERROR),
                }
            }),
        )
        .route(
            "/api/save_answers",
            post(move |Json(req): Json<SaveAnswersRequest>| {
                let site = for_save.clone();
                async move {
                    site.saved.lock().unwrap().push(req);
                    "Saved"
                }
            }),
        )
        .route(
            "/api/check_deploy/",
            post(move |Json(req): Json<CheckDeployRequest>| {
                let site = for_deploy.clone();
                async move {
                    let mut checks = site.deploy_checks.lock().unwrap();
                    *checks += 1;
                    let ready = *checks >= site.ready_after;
                    let status: HashMap<String, bool> =
                        req.branches.into_iter().map(|b| (b, ready)).collect();
                    Json(status)
                }
            }),
        );

    let addr = SocketAddr::from(([127, 0, 0, 1], 0)); // Random port
    let listener = TcpListener::bind(addr).await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://127.0.0.1:{}/", port)
}

fn site_client(url: impl Into<String>) -> WordlesClient {
    WordlesClient::new(url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_answers_keeps_order() {
    let url = serve(Arc::new(MockSite::default())).await;
    let client = site_client(url);

    let file = client.fetch_answers("ws-1").await.unwrap();
    assert_eq!(file.len(), 3);

    let counts = answers::aggregate(file.records());
    assert_eq!(counts[0].word, "cat");
    assert_eq!(counts[0].count, 2);
    assert_eq!(answers::total(&counts), 3);
}

#[tokio::test]
async fn test_server_error_surfaces_status() {
    let url = serve(Arc::new(MockSite::default())).await;
    let client = site_client(url);

    let err = client.fetch_answers("missing").await.unwrap_err();
    assert!(matches!(err, WordleError::Status(500)), "got {:?}", err);
}

#[tokio::test]
async fn test_stalled_site_times_out() {
    let url = serve(Arc::new(MockSite::default())).await;
    let client = WordlesClient::new(url, Duration::from_millis(200)).unwrap();

    let err = client.fetch_answers("stalled").await.unwrap_err();
    assert!(matches!(err, WordleError::Http(ref e) if e.is_timeout()), "got {:?}", err);
}

#[tokio::test]
async fn test_http_answer_source() {
    let url = serve(Arc::new(MockSite::default())).await;
    let source = HttpAnswerSource::new(site_client(url), "ws-1");

    assert!(source.describe().ends_with("/api/fetch_answer/ws-1"));
    assert!(!source.describe().contains("//api"));
    assert_eq!(source.fetch().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_save_answers_drops_blanks() {
    let site = Arc::new(MockSite::default());
    let client = site_client(serve(site.clone()).await);

    let sent = client
        .save_answers("ws-1", &["cat", "  ", "", "big dog"])
        .await
        .unwrap();

    assert_eq!(sent, 2);
    let saved = site.saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].branch, "ws-1");
    assert_eq!(saved[0].answers, vec!["cat", "big dog"]);
}

#[tokio::test]
async fn test_check_deploy() {
    let site = Arc::new(MockSite {
        ready_after: 1,
        ..MockSite::default()
    });
    let client = site_client(serve(site).await);

    let status = client
        .check_deploy(&["ws-1".to_string(), "ws-2".to_string()])
        .await
        .unwrap();
    assert_eq!(status.get("ws-1"), Some(&true));
    assert_eq!(status.get("ws-2"), Some(&true));
}

#[tokio::test]
async fn test_wait_for_deploy_becomes_ready() {
    let site = Arc::new(MockSite {
        ready_after: 3,
        ..MockSite::default()
    });
    let client = site_client(serve(site.clone()).await);

    let status = wait_for_deploy(&client, "ws-1", Duration::from_millis(10), 10).await;

    assert_eq!(status, DeployStatus::Ready);
    assert_eq!(*site.deploy_checks.lock().unwrap(), 3);
}

#[tokio::test]
async fn test_wait_for_deploy_gives_up() {
    let site = Arc::new(MockSite {
        ready_after: 100,
        ..MockSite::default()
    });
    let client = site_client(serve(site.clone()).await);

    let status = wait_for_deploy(&client, "ws-1", Duration::from_millis(5), 4).await;

    assert_eq!(status, DeployStatus::NotReady);
    assert_eq!(*site.deploy_checks.lock().unwrap(), 4);
}

#[tokio::test]
async fn test_unreachable_site_is_not_ready() {
    // Nothing listens on port 9 locally; every check fails and still counts.
    let client = site_client("http://127.0.0.1:9");
    let status = wait_for_deploy(&client, "ws-1", Duration::from_millis(5), 2).await;
    assert_eq!(status, DeployStatus::NotReady);
}

#[test]
fn test_request_bodies() {
    let save = SaveAnswersRequest {
        branch: "ws-1".into(),
        answers: vec!["cat".into()],
    };
    assert_eq!(
        serde_json::to_value(&save).unwrap(),
        json!({"branch": "ws-1", "answers": ["cat"]})
    );
    let check: Value = serde_json::to_value(CheckDeployRequest {
        branches: vec!["ws-1".into()],
    })
    .unwrap();
    assert_eq!(check, json!({"branches": ["ws-1"]}));
}
