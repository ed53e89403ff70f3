use crate::answers::AnswerFile;
use crate::error::{WordleError, WordleResult};
use crate::models::{CheckDeployRequest, CheckDeployResponse, SaveAnswersRequest};
use reqwest::{Client, Response};
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// Where the refresh loop gets its answers from.
pub trait AnswerSource {
    fn fetch(&self) -> impl Future<Output = WordleResult<AnswerFile>> + Send;

    fn describe(&self) -> String;
}

/// Keeps answers that contain something other than whitespace. Kept answers are sent
/// exactly as typed.
pub fn answers_to_submit<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut kept = Vec::with_capacity(raw.len());
    for answer in raw {
        let answer: &str = answer.as_ref();
        if !answer.trim().is_empty() {
            kept.push(answer.to_string());
        }
    }
    kept
}

fn ensure_success(resp: Response) -> WordleResult<Response> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(WordleError::Status(status.as_u16()))
    }
}

/// Thin client for the wordle site's serverless API.
#[derive(Debug, Clone)]
pub struct WordlesClient {
    http: Client,
    base_url: String,
}

impl WordlesClient {
    /// Every request gives up after `timeout`, so a site that accepts the connection and
    /// never answers surfaces as [`WordleError::Http`].
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> WordleResult<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn fetch_answers_url(&self, branch: &str) -> String {
        format!("{}/api/fetch_answer/{}", self.base_url, branch)
    }

    pub async fn fetch_answers(&self, branch: &str) -> WordleResult<AnswerFile> {
        let url = self.fetch_answers_url(branch);
        debug!("GET {}", url);
        let resp = ensure_success(self.http.get(&url).send().await?)?;
        let body = resp.text().await?;
        AnswerFile::from_json_str(&body)
    }

    /// Posts the non-blank answers. Returns how many were sent.
    pub async fn save_answers<S: AsRef<str>>(
        &self,
        branch: &str,
        answers: &[S],
    ) -> WordleResult<usize> {
        let req = SaveAnswersRequest {
            branch: branch.to_string(),
            answers: answers_to_submit(answers),
        };
        let sent = req.answers.len();
        ensure_success(
            self.http
                .post(format!("{}/api/save_answers", self.base_url))
                .json(&req)
                .send()
                .await?,
        )?;
        info!("Saved {} answers to branch '{}'", sent, branch);
        Ok(sent)
    }

    pub async fn check_deploy(&self, branches: &[String]) -> WordleResult<CheckDeployResponse> {
        let req = CheckDeployRequest {
            branches: branches.to_vec(),
        };
        let resp = ensure_success(
            self.http
                .post(format!("{}/api/check_deploy/", self.base_url))
                .json(&req)
                .send()
                .await?,
        )?;
        Ok(resp.json().await?)
    }
}

/// Polls the live site for one branch's answers.
#[derive(Debug, Clone)]
pub struct HttpAnswerSource {
    client: WordlesClient,
    branch: String,
}

impl HttpAnswerSource {
    pub fn new(client: WordlesClient, branch: impl Into<String>) -> Self {
        Self {
            client,
            branch: branch.into(),
        }
    }
}

impl AnswerSource for HttpAnswerSource {
    fn fetch(&self) -> impl Future<Output = WordleResult<AnswerFile>> + Send {
        let client = self.client.clone();
        let branch = self.branch.clone();
        async move { client.fetch_answers(&branch).await }
    }

    fn describe(&self) -> String {
        self.client.fetch_answers_url(&self.branch)
    }
}

/// Reads the answers payload from a local JSON file on every fetch.
#[derive(Debug, Clone)]
pub struct FileAnswerSource {
    path: PathBuf,
}

impl FileAnswerSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AnswerSource for FileAnswerSource {
    fn fetch(&self) -> impl Future<Output = WordleResult<AnswerFile>> + Send {
        let path = self.path.clone();
        async move {
            let content = tokio::fs::read_to_string(&path).await?;
            AnswerFile::from_json_str(&content)
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
