//! Goal Pad 共享层
//!
//! 前端与测试共用的领域模型、接口协议和纯逻辑：
//! - `protocol`: 端点定义（路径、方法、请求/响应类型）
//! - `client`: REST 客户端（可替换的传输层 + 令牌存储）
//! - `session`: 会话上下文（恢复、登录、注册、注销）
//! - `tasks`: 任务看板与乐观切换
//! - `progress` / `quiz` / `notes`: 视图的派生计算

use serde::{Deserialize, Serialize};

pub mod client;
pub mod date;
pub mod error;
pub mod notes;
pub mod progress;
pub mod protocol;
pub mod quiz;
pub mod session;
pub mod tasks;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{GoalPadApi, HttpClient, HttpRequest, HttpResponse};
pub use error::{ApiError, ApiResult};
pub use session::{PasswordChange, Session, SessionContext, TokenStore};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 本地存储中保存访问令牌的键
pub const TOKEN_STORAGE_KEY: &str = "access_token";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";

/// 路线图固定为 24 周
pub const TOTAL_WEEKS: i32 = 24;
/// 每周最多展示的视频链接数
pub const MAX_VIDEOS_PER_WEEK: usize = 4;

pub type Id = i64;

// =========================================================
// 用户与认证 (Users & Auth)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl User {
    /// 优先显示昵称，没有则退回用户名
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.username,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RegisterRequest {
    pub fn login(&self) -> LoginRequest {
        LoginRequest {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthToken {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// =========================================================
// 学习目标与路线图 (Learning Goal & Roadmap)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningGoal {
    pub id: Id,
    pub user_id: Id,
    pub topic: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub roadmap: Option<Roadmap>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    #[serde(default)]
    pub weeks: Vec<RoadmapWeek>,
}

impl Roadmap {
    pub fn week(&self, week: i32) -> Option<&RoadmapWeek> {
        self.weeks.iter().find(|w| w.week == week)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapWeek {
    pub week: i32,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub tasks: Vec<RoadmapTask>,
    #[serde(default)]
    pub videos: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapTask {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapRequest {
    pub topic: String,
    pub details: String,
}

impl RoadmapRequest {
    /// 主题必填，附加说明可为空
    pub fn new(topic: &str, details: &str) -> ApiResult<Self> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(ApiError::validation("Please enter a topic"));
        }
        Ok(Self {
            topic: topic.to_string(),
            details: details.trim().to_string(),
        })
    }
}

// =========================================================
// 任务与日程 (Tasks & Schedule)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Id,
    pub user_id: Id,
    pub title: String,
    #[serde(default)]
    pub week: Option<i32>,
    pub completed: bool,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl Task {
    /// 仅 1..=24 周内的任务参与按周分组和完成率计算
    pub fn plan_week(&self) -> Option<i32> {
        self.week.filter(|w| (1..=TOTAL_WEEKS).contains(w))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCreate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: Id,
    pub user_id: Id,
    pub title: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleCreate {
    pub title: String,
    pub date: String,
}

// =========================================================
// 笔记、播放列表与进度 (Notes, Playlists & Progress)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Id,
    pub user_id: Id,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteCreate {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: Id,
    pub user_id: Id,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistCreate {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub id: Id,
    pub user_id: Id,
    pub date: String,
    pub tasks_completed: u32,
    pub study_hours: f64,
    pub notes_created: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressCreate {
    pub date: String,
    pub tasks_completed: u32,
    pub study_hours: f64,
    pub notes_created: u32,
}

// =========================================================
// 测验与 AI 辅助 (Quiz & AI)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Easy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizRequest {
    pub topic: String,
    pub difficulty: Difficulty,
    pub week_start: i32,
    pub week_end: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: Id,
    pub topic: String,
    pub difficulty: String,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoSummaryRequest {
    pub video_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoSummary {
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoQuestionRequest {
    pub question: String,
    pub video_context: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoAnswer {
    pub answer: String,
}

// =========================================================
// 仪表盘聚合 (Dashboard)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub user: User,
    #[serde(default)]
    pub learning_goal: Option<LearningGoal>,
    #[serde(default)]
    pub recent_tasks: Vec<Task>,
    #[serde(default)]
    pub progress_data: Vec<Progress>,
    #[serde(default)]
    pub upcoming_schedule: Vec<Schedule>,
}

impl DashboardData {
    pub fn roadmap(&self) -> Option<&Roadmap> {
        self.learning_goal.as_ref()?.roadmap.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_payload_tolerates_missing_fields() {
        let body = r#"{
            "user": {"id": 1, "username": "ada", "email": "ada@example.com", "name": null},
            "learning_goal": {
                "id": 3, "user_id": 1, "topic": "Rust", "details": null,
                "roadmap": {"weeks": [{"week": 1, "theme": "Ownership", "tasks": [{"description": "Read ch. 4"}]}]}
            },
            "recent_tasks": [{"id": 9, "user_id": 1, "title": "Read ch. 4", "week": 1, "completed": false}],
            "progress_data": [],
            "upcoming_schedule": []
        }"#;

        let data: DashboardData = serde_json::from_str(body).unwrap();
        assert_eq!(data.user.display_name(), "ada");
        let roadmap = data.roadmap().unwrap();
        assert_eq!(roadmap.week(1).unwrap().theme, "Ownership");
        assert!(roadmap.week(1).unwrap().videos.is_empty());
        assert_eq!(data.recent_tasks[0].plan_week(), Some(1));
    }

    #[test]
    fn test_roadmap_request_requires_topic() {
        assert_eq!(
            RoadmapRequest::new("  ", "anything"),
            Err(ApiError::Validation("Please enter a topic".into()))
        );
        let req = RoadmapRequest::new(" Rust ", "").unwrap();
        assert_eq!(req.topic, "Rust");
        assert!(req.details.is_empty());
    }

    #[test]
    fn test_plan_week_bounds() {
        let mut task = Task {
            id: 1,
            user_id: 1,
            title: "t".into(),
            week: Some(0),
            completed: false,
            due_date: None,
        };
        assert_eq!(task.plan_week(), None);
        task.week = Some(25);
        assert_eq!(task.plan_week(), None);
        task.week = Some(24);
        assert_eq!(task.plan_week(), Some(24));
        task.week = None;
        assert_eq!(task.plan_week(), None);
    }

    #[test]
    fn test_update_payloads_skip_absent_fields() {
        let update = TaskUpdate {
            completed: Some(true),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"completed":true}"#
        );

        let req = QuizRequest {
            topic: "Rust".into(),
            difficulty: Difficulty::Hard,
            week_start: 1,
            week_end: 12,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["difficulty"], "hard");
    }
}
