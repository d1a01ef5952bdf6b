//! Shared mock components for unit tests

use crate::client::{HttpClient, HttpRequest, HttpResponse};
use crate::{ApiError, ApiResult, Id, Task, TokenStore, User};
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Default)]
struct MockState {
    /// Requests in the order they were sent
    requests: Vec<HttpRequest>,
    /// Scripted results, consumed front to back
    responses: VecDeque<ApiResult<HttpResponse>>,
}

/// Recording HTTP client with scripted responses
#[derive(Clone, Default)]
pub struct MockHttp {
    state: Rc<RefCell<MockState>>,
}

impl MockHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.state
            .borrow_mut()
            .responses
            .push_back(Ok(HttpResponse {
                status,
                body: body.to_string(),
            }));
    }

    pub fn fail(&self, message: &str) {
        self.state
            .borrow_mut()
            .responses
            .push_back(Err(ApiError::Network(message.to_string())));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.borrow().requests.clone()
    }
}

#[async_trait(?Send)]
impl HttpClient for MockHttp {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let mut state = self.state.borrow_mut();
        state.requests.push(req);
        state
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted response".into())))
    }
}

/// In-memory token store; clones share the same slot
#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    token: Rc<RefCell<Option<String>>>,
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        self.token.borrow_mut().take();
    }
}

pub fn sample_user() -> User {
    User {
        id: 1,
        username: "ada".into(),
        email: "ada@example.com".into(),
        name: Some("Ada".into()),
        created_at: Some("2025-01-15T09:30:00".into()),
    }
}

pub fn sample_task(id: Id, week: Option<i32>, completed: bool) -> Task {
    Task {
        id,
        user_id: 1,
        title: format!("task-{}", id),
        week,
        completed,
        due_date: None,
    }
}
