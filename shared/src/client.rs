use crate::protocol::{
    ApiRequest, DeleteAccount, DeleteNote, DeleteTask, GetDashboard, GetProfile, HttpMethod,
    ListNotes, ListPlaylists, ListSchedule, ListTasks, UpdateNote, UpdateProfile, UpdateTask,
};
use crate::session::TokenStore;
use crate::{
    ApiError, ApiResult, AuthToken, DashboardData, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE, Id,
    LearningGoal, LoginRequest, MessageResponse, Note, NoteCreate, NoteUpdate, Playlist,
    PlaylistCreate, Progress, ProgressCreate, Quiz, QuizRequest, RegisterRequest, RoadmapRequest,
    Schedule, ScheduleCreate, Task, TaskCreate, TaskUpdate, User, VideoAnswer,
    VideoQuestionRequest, VideoSummary, VideoSummaryRequest,
};
use serde::de::DeserializeOwned;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    /// 按名称查找请求头（大小写不敏感）
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        serde_json::from_str(&self.body).map_err(ApiError::from)
    }
}

/// HTTP 客户端特性 (Trait)
///
/// (?Send) 是因为浏览器环境下的 fetch future 不是 Send 的。
/// 传输层只负责把请求发出去；网络失败返回 `ApiError::Network`。
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse>;
}

// =========================================================
// Goal Pad REST 客户端
// =========================================================

/// Goal Pad 后端客户端
///
/// 每个请求从注入的 `TokenStore` 读取令牌并附加 `Authorization: Bearer`。
/// 401/403 以 `ApiError::Unauthorized` 返回给调用方，不在这里做任何导航或清理。
#[derive(Clone, Debug, PartialEq)]
pub struct GoalPadApi<C, S> {
    base_url: String,
    http: C,
    tokens: S,
}

impl<C: HttpClient, S: TokenStore> GoalPadApi<C, S> {
    pub fn new(base_url: impl Into<String>, http: C, tokens: S) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http,
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &S {
        &self.tokens
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 发送任意端点请求
    pub async fn request<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let path = req.path();
        let mut http_req = HttpRequest::new(&self.url(&path), R::METHOD);

        if let Some(token) = self.tokens.load() {
            http_req = http_req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
        }
        if let Some(body) = req.body()? {
            http_req = http_req
                .with_header(HEADER_CONTENT_TYPE, "application/json")
                .with_body(body);
        }

        let method = R::METHOD.as_str();
        let resp = self.http.send(http_req).await.inspect_err(|e| {
            tracing::warn!(method, path = %path, error = %e, "request did not complete");
        })?;

        if !resp.ok() {
            let err = ApiError::from_status(resp.status, &resp.body);
            tracing::warn!(method, path = %path, status = resp.status, "request rejected");
            return Err(err);
        }

        tracing::debug!(method, path = %path, status = resp.status, "request completed");
        resp.json()
    }

    // --- Auth & Profile ---

    pub async fn login(&self, req: &LoginRequest) -> ApiResult<AuthToken> {
        self.request(req).await
    }

    pub async fn register(&self, req: &RegisterRequest) -> ApiResult<User> {
        self.request(req).await
    }

    pub async fn get_profile(&self) -> ApiResult<User> {
        self.request(&GetProfile).await
    }

    pub async fn update_profile(&self, name: impl Into<String>) -> ApiResult<User> {
        self.request(&UpdateProfile { name: name.into() }).await
    }

    pub async fn delete_account(&self) -> ApiResult<MessageResponse> {
        self.request(&DeleteAccount).await
    }

    // --- Dashboard & AI ---

    pub async fn get_dashboard(&self) -> ApiResult<DashboardData> {
        self.request(&GetDashboard).await
    }

    pub async fn generate_roadmap(&self, req: &RoadmapRequest) -> ApiResult<LearningGoal> {
        self.request(req).await
    }

    pub async fn generate_quiz(&self, req: &QuizRequest) -> ApiResult<Quiz> {
        self.request(req).await
    }

    pub async fn video_summary(&self, req: &VideoSummaryRequest) -> ApiResult<VideoSummary> {
        self.request(req).await
    }

    pub async fn answer_question(&self, req: &VideoQuestionRequest) -> ApiResult<VideoAnswer> {
        self.request(req).await
    }

    // --- Tasks ---

    pub async fn list_tasks(&self) -> ApiResult<Vec<Task>> {
        self.request(&ListTasks).await
    }

    pub async fn create_task(&self, req: &TaskCreate) -> ApiResult<Task> {
        self.request(req).await
    }

    pub async fn update_task(&self, id: Id, update: TaskUpdate) -> ApiResult<Task> {
        self.request(&UpdateTask { id, update }).await
    }

    pub async fn delete_task(&self, id: Id) -> ApiResult<MessageResponse> {
        self.request(&DeleteTask { id }).await
    }

    // --- Notes ---

    pub async fn list_notes(&self) -> ApiResult<Vec<Note>> {
        self.request(&ListNotes).await
    }

    pub async fn create_note(&self, req: &NoteCreate) -> ApiResult<Note> {
        self.request(req).await
    }

    pub async fn update_note(&self, id: Id, update: NoteUpdate) -> ApiResult<Note> {
        self.request(&UpdateNote { id, update }).await
    }

    pub async fn delete_note(&self, id: Id) -> ApiResult<MessageResponse> {
        self.request(&DeleteNote { id }).await
    }

    // --- Schedule, Playlists, Progress ---

    pub async fn list_schedule(&self) -> ApiResult<Vec<Schedule>> {
        self.request(&ListSchedule).await
    }

    pub async fn create_schedule(&self, req: &ScheduleCreate) -> ApiResult<Schedule> {
        self.request(req).await
    }

    pub async fn list_playlists(&self) -> ApiResult<Vec<Playlist>> {
        self.request(&ListPlaylists).await
    }

    pub async fn create_playlist(&self, req: &PlaylistCreate) -> ApiResult<Playlist> {
        self.request(req).await
    }

    pub async fn record_progress(&self, req: &ProgressCreate) -> ApiResult<Progress> {
        self.request(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryTokenStore, MockHttp, sample_task, sample_user};

    fn setup(token: Option<&str>) -> (MockHttp, GoalPadApi<MockHttp, MemoryTokenStore>) {
        let http = MockHttp::new();
        let tokens = MemoryTokenStore::default();
        if let Some(token) = token {
            tokens.save(token);
        }
        let api = GoalPadApi::new("http://localhost:8000/", http.clone(), tokens);
        (http, api)
    }

    #[tokio::test]
    async fn test_bearer_header_attached_when_token_present() {
        let (http, api) = setup(Some("abc"));
        http.respond(200, &serde_json::to_string(&sample_user()).unwrap());

        api.get_profile().await.unwrap();

        let sent = http.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url, "http://localhost:8000/profile");
        assert_eq!(sent[0].method, HttpMethod::Get);
        assert_eq!(sent[0].header("authorization"), Some("Bearer abc"));
        assert!(sent[0].body.is_none());
    }

    #[tokio::test]
    async fn test_no_auth_header_without_token() {
        let (http, api) = setup(None);
        http.respond(200, r#"{"access_token":"t","token_type":"bearer"}"#);

        let token = api
            .login(&LoginRequest {
                username: "ada".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();

        assert_eq!(token.access_token, "t");
        let sent = http.requests();
        assert!(sent[0].header(HEADER_AUTHORIZATION).is_none());
        assert_eq!(sent[0].header(HEADER_CONTENT_TYPE), Some("application/json"));
        assert_eq!(
            sent[0].body.as_deref(),
            Some(r#"{"username":"ada","password":"secret"}"#)
        );
    }

    #[tokio::test]
    async fn test_forbidden_and_unauthorized_are_explicit() {
        let (http, api) = setup(Some("stale"));
        http.respond(401, r#"{"detail":"Could not validate credentials"}"#);
        http.respond(403, "");

        assert_eq!(
            api.get_dashboard().await.unwrap_err(),
            ApiError::Unauthorized { status: 401 }
        );
        assert!(api.list_notes().await.unwrap_err().is_unauthorized());
        // 传输层不负责清理令牌
        assert_eq!(api.tokens().load().as_deref(), Some("stale"));
    }

    #[tokio::test]
    async fn test_update_task_sends_put_with_flag() {
        let (http, api) = setup(Some("abc"));
        http.respond(200, &serde_json::to_string(&sample_task(5, Some(2), true)).unwrap());

        let task = api
            .update_task(
                5,
                TaskUpdate {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(task.completed);
        let sent = http.requests();
        assert_eq!(sent[0].method, HttpMethod::Put);
        assert_eq!(sent[0].url, "http://localhost:8000/tasks/5");
        assert_eq!(sent[0].body.as_deref(), Some(r#"{"completed":true}"#));
    }

    #[tokio::test]
    async fn test_network_and_decode_failures() {
        let (http, api) = setup(None);
        http.fail("connection refused");
        http.respond(200, "not json");

        assert!(matches!(
            api.list_tasks().await.unwrap_err(),
            ApiError::Network(_)
        ));
        assert!(matches!(
            api.list_tasks().await.unwrap_err(),
            ApiError::Decode(_)
        ));
    }

    #[tokio::test]
    async fn test_server_error_keeps_detail() {
        let (http, api) = setup(Some("abc"));
        http.respond(404, r#"{"detail":"Note not found"}"#);

        let err = api.delete_note(9).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 404,
                message: "Note not found".into()
            }
        );
        assert_eq!(http.requests()[0].method, HttpMethod::Delete);
    }

    #[tokio::test]
    async fn test_collection_endpoints() {
        let (http, api) = setup(Some("abc"));
        http.respond(200, "[]");
        http.respond(200, &serde_json::to_string(&sample_task(3, Some(2), false)).unwrap());
        http.respond(200, "[]");
        http.respond(200, r#"{"id":4,"user_id":1,"title":"Review","date":"2025-03-01"}"#);
        http.respond(200, "[]");
        http.respond(200, r#"{"id":5,"user_id":1,"title":"Rust","url":"https://youtu.be/x"}"#);
        let progress_body = concat!(
            r#"{"date":"2025-03-01","tasks_completed":2,"#,
            r#""study_hours":2.5,"notes_created":1}"#
        );
        http.respond(200, &progress_body.replacen('{', r#"{"id":6,"user_id":1,"#, 1));

        assert!(api.list_tasks().await.unwrap().is_empty());
        let task = api
            .create_task(&TaskCreate {
                title: "Read the book".into(),
                week: Some(2),
            })
            .await
            .unwrap();
        assert_eq!(task.id, 3);
        assert!(api.list_schedule().await.unwrap().is_empty());
        let schedule = api
            .create_schedule(&ScheduleCreate {
                title: "Review".into(),
                date: "2025-03-01".into(),
            })
            .await
            .unwrap();
        assert_eq!(schedule.id, 4);
        assert!(api.list_playlists().await.unwrap().is_empty());
        let playlist = api
            .create_playlist(&PlaylistCreate {
                title: "Rust".into(),
                url: "https://youtu.be/x".into(),
            })
            .await
            .unwrap();
        assert_eq!(playlist.url, "https://youtu.be/x");
        let progress = api
            .record_progress(&ProgressCreate {
                date: "2025-03-01".into(),
                tasks_completed: 2,
                study_hours: 2.5,
                notes_created: 1,
            })
            .await
            .unwrap();
        assert_eq!(progress.tasks_completed, 2);

        let expected: [(HttpMethod, &str, Option<&str>); 7] = [
            (HttpMethod::Get, "/tasks", None),
            (
                HttpMethod::Post,
                "/tasks",
                Some(r#"{"title":"Read the book","week":2}"#),
            ),
            (HttpMethod::Get, "/schedule", None),
            (
                HttpMethod::Post,
                "/schedule",
                Some(r#"{"title":"Review","date":"2025-03-01"}"#),
            ),
            (HttpMethod::Get, "/playlists", None),
            (
                HttpMethod::Post,
                "/playlists",
                Some(r#"{"title":"Rust","url":"https://youtu.be/x"}"#),
            ),
            (
                HttpMethod::Post,
                "/progress",
                Some(progress_body),
            ),
        ];

        let sent = http.requests();
        assert_eq!(sent.len(), expected.len());
        for (req, (method, path, body)) in sent.iter().zip(expected) {
            assert_eq!(req.method, method, "{}", path);
            assert_eq!(req.url, format!("http://localhost:8000{}", path));
            assert_eq!(req.body.as_deref(), body, "{}", path);
            assert_eq!(req.header("authorization"), Some("Bearer abc"));
        }
    }
}
