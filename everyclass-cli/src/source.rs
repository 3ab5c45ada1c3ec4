use std::{path::PathBuf, time::Duration};

use async_trait::async_trait;
use everyclass_core::{
    Error, Result,
    api::{self, CourseResponse, RoomResponse, SearchResponse, StudentResponse, TeacherResponse},
    available::{AvailableRoom, RoomQuery},
};
use reqwest::{Client, ClientBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

/// 课表数据来源
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// 数据来源名称
    fn name(&self) -> &str;

    async fn search(&self, keyword: &str) -> Result<SearchResponse>;

    async fn student(&self, sid: &str, semester: &str) -> Result<StudentResponse>;

    async fn teacher(&self, tid: &str, semester: &str) -> Result<TeacherResponse>;

    async fn room(&self, rid: &str, semester: &str) -> Result<RoomResponse>;

    async fn course(&self, cid: &str, semester: &str) -> Result<CourseResponse>;

    /// 某个时间段的空闲教室
    async fn available_rooms(&self, query: &RoomQuery) -> Result<Vec<AvailableRoom>>;
}

/// 上游 API 客户端构建器
pub struct ApiClientBuilder {
    client_builder: ClientBuilder,
    base_url: String,
}

impl ApiClientBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client_builder = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("everyclass-cli/", env!("CARGO_PKG_VERSION")))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT,
                    reqwest::header::HeaderValue::from_static("application/json"),
                );
                headers.insert(
                    reqwest::header::ACCEPT_ENCODING,
                    reqwest::header::HeaderValue::from_static("br;q=1.0, gzip;q=0.9, deflate;q=0.8"),
                );
                headers
            });

        Self {
            client_builder,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn timeout(mut self, timeout_secs: u64) -> Self {
        self.client_builder = self.client_builder.timeout(Duration::from_secs(timeout_secs));
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("Invalid API server '{}': {}", self.base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "Invalid API server '{}': not a base URL",
                self.base_url
            )));
        }

        let client = self
            .client_builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(ApiClient {
            client,
            base,
            name: self.base_url,
        })
    }
}

/// 通过 HTTP 访问上游 API
pub struct ApiClient {
    client: Client,
    base: Url,
    name: String,
}

impl ApiClient {
    const TIMETABLE_PARAMS: [(&'static str, &'static str); 2] =
        [("week_string", "true"), ("other_semester", "true")];

    /// 拼接 `/v1/...` 路径，每一段都会单独转义
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("v1").extend(segments);
        }
        url
    }

    /// 通用的错误处理
    fn handle_error_req(&self, endpoint: &Url, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::Timeout
        } else {
            Error::Upstream {
                endpoint: endpoint.to_string(),
                message: format!("Request failed: {}", error),
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.endpoint(segments);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .query(params)
            .send()
            .await
            .map_err(|e| self.handle_error_req(&url, e))?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => return Err(Error::NotFound(url.path().to_string())),
            status => {
                return Err(Error::Upstream {
                    endpoint: url.to_string(),
                    message: format!("HTTP {} error", status),
                });
            }
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.handle_error_req(&url, e))?;
        api::from_slice(&bytes)
    }
}

#[async_trait]
impl ScheduleSource for ApiClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, keyword: &str) -> Result<SearchResponse> {
        self.get_json(&["search", keyword], &[]).await
    }

    async fn student(&self, sid: &str, semester: &str) -> Result<StudentResponse> {
        self.get_json(&["student", sid, semester], &Self::TIMETABLE_PARAMS)
            .await
    }

    async fn teacher(&self, tid: &str, semester: &str) -> Result<TeacherResponse> {
        self.get_json(&["teacher", tid, semester], &Self::TIMETABLE_PARAMS)
            .await
    }

    async fn room(&self, rid: &str, semester: &str) -> Result<RoomResponse> {
        self.get_json(&["room", rid, semester], &Self::TIMETABLE_PARAMS)
            .await
    }

    async fn course(&self, cid: &str, semester: &str) -> Result<CourseResponse> {
        self.get_json(&["course", cid, semester], &[("week_string", "true")])
            .await
    }

    async fn available_rooms(&self, query: &RoomQuery) -> Result<Vec<AvailableRoom>> {
        let week = query.week.to_string();
        self.get_json(
            &["available_rooms"],
            &[
                ("week", week.as_str()),
                ("session", query.session.as_str()),
                ("campus", query.campus.as_str()),
                ("building", query.building.as_str()),
            ],
        )
        .await
    }
}

/// 从本地目录读取保存下来的上游响应
///
/// 目录结构与 API 路径一致：`search/{keyword}.json`、`student/{sid}/{semester}.json` 等。
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_of(&self, segments: &[&str]) -> PathBuf {
        let mut path = self.root.clone();
        if let Some((last, dirs)) = segments.split_last() {
            for segment in dirs {
                path.push(segment);
            }
            path.push(format!("{}.json", last));
        }
        path
    }

    async fn read_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let path = self.path_of(segments);
        tracing::debug!("读取 {}", path.display());

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::NotFound(path.display().to_string()));
            }
            Err(e) => {
                return Err(Error::Config(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )));
            }
        };
        api::from_slice(&bytes)
    }
}

#[async_trait]
impl ScheduleSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn search(&self, keyword: &str) -> Result<SearchResponse> {
        self.read_json(&["search", keyword]).await
    }

    async fn student(&self, sid: &str, semester: &str) -> Result<StudentResponse> {
        self.read_json(&["student", sid, semester]).await
    }

    async fn teacher(&self, tid: &str, semester: &str) -> Result<TeacherResponse> {
        self.read_json(&["teacher", tid, semester]).await
    }

    async fn room(&self, rid: &str, semester: &str) -> Result<RoomResponse> {
        self.read_json(&["room", rid, semester]).await
    }

    async fn course(&self, cid: &str, semester: &str) -> Result<CourseResponse> {
        self.read_json(&["course", cid, semester]).await
    }

    async fn available_rooms(&self, query: &RoomQuery) -> Result<Vec<AvailableRoom>> {
        let week = query.week.to_string();
        self.read_json(&[
            "available_rooms",
            &query.campus,
            &query.building,
            &week,
            &query.session,
        ])
        .await
    }
}
