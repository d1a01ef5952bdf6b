use crate::{
    AuthToken, DashboardData, Id, LearningGoal, LoginRequest, MessageResponse, Note, NoteCreate,
    NoteUpdate, Playlist, PlaylistCreate, Progress, ProgressCreate, ProfileUpdate, Quiz,
    QuizRequest, RegisterRequest, RoadmapRequest, Schedule, ScheduleCreate, Task, TaskCreate,
    TaskUpdate, User, VideoAnswer, VideoQuestionRequest, VideoSummary, VideoSummaryRequest,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path (or prefix, for endpoints addressed by id).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// Concrete path of this request, including ids and query string.
    fn path(&self) -> String {
        Self::PATH.to_string()
    }

    /// JSON body, if the endpoint takes one.
    fn body(&self) -> serde_json::Result<Option<String>> {
        Ok(None)
    }
}

/// 请求结构体本身即为 JSON 请求体
macro_rules! json_request {
    ($req:ty => $resp:ty, $method:ident $path:literal) => {
        impl ApiRequest for $req {
            type Response = $resp;
            const PATH: &'static str = $path;
            const METHOD: HttpMethod = HttpMethod::$method;

            fn body(&self) -> serde_json::Result<Option<String>> {
                serde_json::to_string(self).map(Some)
            }
        }
    };
}

/// 无请求体的端点
macro_rules! bare_request {
    ($req:ty => $resp:ty, $method:ident $path:literal) => {
        impl ApiRequest for $req {
            type Response = $resp;
            const PATH: &'static str = $path;
            const METHOD: HttpMethod = HttpMethod::$method;
        }
    };
}

// =========================================================
// Auth & Profile
// =========================================================

json_request!(LoginRequest => AuthToken, Post "/auth/login");
json_request!(RegisterRequest => User, Post "/auth/register");

/// Fetch the profile of the token's owner
#[derive(Debug, Clone, Copy)]
pub struct GetProfile;
bare_request!(GetProfile => User, Get "/profile");

/// Rename the current user.
///
/// The backend reads `name` from the query string; it is mirrored in the body.
#[derive(Debug, Clone)]
pub struct UpdateProfile {
    pub name: String,
}

impl ApiRequest for UpdateProfile {
    type Response = User;
    const PATH: &'static str = "/profile";
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("{}?name={}", Self::PATH, urlencoding::encode(&self.name))
    }

    fn body(&self) -> serde_json::Result<Option<String>> {
        let body = ProfileUpdate {
            name: Some(self.name.clone()),
        };
        serde_json::to_string(&body).map(Some)
    }
}

/// Delete the account and all of its data
#[derive(Debug, Clone, Copy)]
pub struct DeleteAccount;
bare_request!(DeleteAccount => MessageResponse, Delete "/profile");

// =========================================================
// Dashboard & AI
// =========================================================

#[derive(Debug, Clone, Copy)]
pub struct GetDashboard;
bare_request!(GetDashboard => DashboardData, Get "/dashboard");

json_request!(RoadmapRequest => LearningGoal, Post "/ai/generate-roadmap");
json_request!(QuizRequest => Quiz, Post "/ai/generate-quiz");
json_request!(VideoSummaryRequest => VideoSummary, Post "/ai/video-summary");
json_request!(VideoQuestionRequest => VideoAnswer, Post "/ai/answer-question");

// =========================================================
// Tasks
// =========================================================

#[derive(Debug, Clone, Copy)]
pub struct ListTasks;
bare_request!(ListTasks => Vec<Task>, Get "/tasks");

json_request!(TaskCreate => Task, Post "/tasks");

#[derive(Debug, Clone)]
pub struct UpdateTask {
    pub id: Id,
    pub update: TaskUpdate,
}

impl ApiRequest for UpdateTask {
    type Response = Task;
    const PATH: &'static str = "/tasks";
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("{}/{}", Self::PATH, self.id)
    }

    fn body(&self) -> serde_json::Result<Option<String>> {
        serde_json::to_string(&self.update).map(Some)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteTask {
    pub id: Id,
}

impl ApiRequest for DeleteTask {
    type Response = MessageResponse;
    const PATH: &'static str = "/tasks";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("{}/{}", Self::PATH, self.id)
    }
}

// =========================================================
// Notes
// =========================================================

#[derive(Debug, Clone, Copy)]
pub struct ListNotes;
bare_request!(ListNotes => Vec<Note>, Get "/notes");

json_request!(NoteCreate => Note, Post "/notes");

#[derive(Debug, Clone)]
pub struct UpdateNote {
    pub id: Id,
    pub update: NoteUpdate,
}

impl ApiRequest for UpdateNote {
    type Response = Note;
    const PATH: &'static str = "/notes";
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("{}/{}", Self::PATH, self.id)
    }

    fn body(&self) -> serde_json::Result<Option<String>> {
        serde_json::to_string(&self.update).map(Some)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteNote {
    pub id: Id,
}

impl ApiRequest for DeleteNote {
    type Response = MessageResponse;
    const PATH: &'static str = "/notes";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("{}/{}", Self::PATH, self.id)
    }
}

// =========================================================
// Schedule, Playlists, Progress
// =========================================================

#[derive(Debug, Clone, Copy)]
pub struct ListSchedule;
bare_request!(ListSchedule => Vec<Schedule>, Get "/schedule");
json_request!(ScheduleCreate => Schedule, Post "/schedule");

#[derive(Debug, Clone, Copy)]
pub struct ListPlaylists;
bare_request!(ListPlaylists => Vec<Playlist>, Get "/playlists");
json_request!(PlaylistCreate => Playlist, Post "/playlists");

json_request!(ProgressCreate => Progress, Post "/progress");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_paths() {
        let req = UpdateTask {
            id: 42,
            update: TaskUpdate::default(),
        };
        assert_eq!(req.path(), "/tasks/42");
        assert_eq!(DeleteNote { id: 7 }.path(), "/notes/7");
        assert_eq!(ListTasks.path(), "/tasks");
    }

    #[test]
    fn test_profile_update_encodes_query() {
        let req = UpdateProfile {
            name: "Ada Lovelace".into(),
        };
        assert_eq!(req.path(), "/profile?name=Ada%20Lovelace");
        assert_eq!(req.body().unwrap().unwrap(), r#"{"name":"Ada Lovelace"}"#);
    }

    #[test]
    fn test_bare_requests_have_no_body() {
        assert!(GetDashboard.body().unwrap().is_none());
        assert!(DeleteAccount.body().unwrap().is_none());
        assert_eq!(<DeleteAccount as ApiRequest>::METHOD, HttpMethod::Delete);
    }
}
