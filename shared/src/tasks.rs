//! 任务看板与乐观切换
//!
//! 切换完成状态时先改本地集合并标记 pending，再发送一次更新请求：
//! 成功则保持本地状态（不重新拉取），失败则恢复原值。
//! 同一任务在请求返回之前的再次切换会被拒绝，避免响应乱序导致本地与服务端不一致。

use crate::client::{GoalPadApi, HttpClient};
use crate::session::TokenStore;
use crate::{ApiError, Id, Task, TaskUpdate};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToggleError {
    #[error("task {0} is not on the board")]
    UnknownTask(Id),
    /// 该任务已有未完成的更新请求
    #[error("task {0} already has an update in flight")]
    InFlight(Id),
    /// 后端拒绝了更新，本地状态已回滚
    #[error("update for task {id} was rejected: {source}")]
    Rejected {
        id: Id,
        #[source]
        source: ApiError,
    },
}

/// 一次已开始的切换
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleTicket {
    pub id: Id,
    /// 切换前的完成状态
    pub previous: bool,
    /// 请求写入的完成状态
    pub requested: bool,
}

impl ToggleTicket {
    pub fn update(&self) -> TaskUpdate {
        TaskUpdate {
            completed: Some(self.requested),
            ..Default::default()
        }
    }
}

/// 内存中的任务集合，附带每个任务的 in-flight 标记
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskBoard {
    tasks: Vec<Task>,
    pending: HashSet<Id>,
}

impl TaskBoard {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            pending: HashSet::new(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: Id) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn is_pending(&self, id: Id) -> bool {
        self.pending.contains(&id)
    }

    /// 用新拉取的数据整体替换；仍在 pending 的任务保留本地值
    pub fn replace(&mut self, tasks: Vec<Task>) {
        let local: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| self.pending.contains(&t.id))
            .cloned()
            .collect();
        self.tasks = tasks;
        for kept in local {
            if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == kept.id) {
                *slot = kept;
            }
        }
        let ids: HashSet<Id> = self.tasks.iter().map(|t| t.id).collect();
        self.pending.retain(|id| ids.contains(id));
    }

    /// 同步翻转完成状态并标记 pending
    pub fn begin_toggle(&mut self, id: Id) -> Result<ToggleTicket, ToggleError> {
        if self.pending.contains(&id) {
            return Err(ToggleError::InFlight(id));
        }
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ToggleError::UnknownTask(id))?;

        let ticket = ToggleTicket {
            id,
            previous: task.completed,
            requested: !task.completed,
        };
        task.completed = ticket.requested;
        self.pending.insert(id);
        Ok(ticket)
    }

    /// 请求结束：失败时把该任务写回原值；无论成败都清除 pending
    pub fn settle(&mut self, ticket: &ToggleTicket, persisted: bool) {
        if !persisted {
            if let Some(task) = self.tasks.iter_mut().find(|t| t.id == ticket.id) {
                task.completed = ticket.previous;
            }
        }
        self.pending.remove(&ticket.id);
    }
}

/// 看板的存放位置（RefCell、响应式信号等）
pub trait BoardAccess {
    fn with_board<R>(&self, f: impl FnOnce(&mut TaskBoard) -> R) -> R;
}

impl BoardAccess for std::cell::RefCell<TaskBoard> {
    fn with_board<R>(&self, f: impl FnOnce(&mut TaskBoard) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

/// 乐观切换一个任务的完成状态
///
/// 看板在发送请求前已更新；请求期间不持有看板的借用。
pub async fn toggle_task<B, C, S>(
    board: &B,
    api: &GoalPadApi<C, S>,
    id: Id,
) -> Result<ToggleTicket, ToggleError>
where
    B: BoardAccess,
    C: HttpClient,
    S: TokenStore,
{
    let ticket = board.with_board(|b| b.begin_toggle(id))?;

    match api.update_task(ticket.id, ticket.update()).await {
        Ok(_) => {
            board.with_board(|b| b.settle(&ticket, true));
            Ok(ticket)
        }
        Err(source) => {
            tracing::warn!(task = id, error = %source, "toggle rejected, rolling back");
            board.with_board(|b| b.settle(&ticket, false));
            Err(ToggleError::Rejected { id, source })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::HttpMethod;
    use crate::testing::{MemoryTokenStore, MockHttp, sample_task};
    use std::cell::RefCell;

    fn setup() -> (MockHttp, GoalPadApi<MockHttp, MemoryTokenStore>, RefCell<TaskBoard>) {
        let http = MockHttp::new();
        let tokens = MemoryTokenStore::default();
        tokens.save("abc");
        let api = GoalPadApi::new("http://api.test", http.clone(), tokens);
        let board = RefCell::new(TaskBoard::new(vec![
            sample_task(1, Some(1), false),
            sample_task(2, Some(1), true),
            sample_task(3, None, false),
        ]));
        (http, api, board)
    }

    #[test]
    fn test_begin_toggle_flips_synchronously() {
        let mut board = TaskBoard::new(vec![sample_task(1, Some(1), false)]);

        let ticket = board.begin_toggle(1).unwrap();

        assert_eq!(
            ticket,
            ToggleTicket {
                id: 1,
                previous: false,
                requested: true
            }
        );
        assert!(board.get(1).unwrap().completed);
        assert!(board.is_pending(1));
    }

    #[test]
    fn test_second_toggle_while_pending_is_rejected() {
        let mut board = TaskBoard::new(vec![sample_task(1, Some(1), false)]);
        let ticket = board.begin_toggle(1).unwrap();

        assert_eq!(board.begin_toggle(1), Err(ToggleError::InFlight(1)));
        assert!(board.get(1).unwrap().completed);

        board.settle(&ticket, true);
        assert!(!board.is_pending(1));
        // 请求完成后可以再次切换
        let again = board.begin_toggle(1).unwrap();
        assert!(!again.requested);
    }

    #[test]
    fn test_unknown_task() {
        let mut board = TaskBoard::default();
        assert_eq!(board.begin_toggle(99), Err(ToggleError::UnknownTask(99)));
    }

    #[test]
    fn test_replace_keeps_pending_local_value() {
        let mut board = TaskBoard::new(vec![
            sample_task(1, Some(1), false),
            sample_task(2, Some(2), false),
        ]);
        board.begin_toggle(1).unwrap();

        board.replace(vec![sample_task(1, Some(1), false), sample_task(2, Some(2), true)]);

        assert!(board.get(1).unwrap().completed);
        assert!(board.is_pending(1));
        assert!(board.get(2).unwrap().completed);

        board.replace(vec![sample_task(2, Some(2), true)]);
        assert!(!board.is_pending(1));
    }

    #[tokio::test]
    async fn test_toggle_success_keeps_state_without_refetch() {
        let (http, api, board) = setup();
        http.respond(200, &serde_json::to_string(&sample_task(1, Some(1), true)).unwrap());

        let ticket = toggle_task(&board, &api, 1).await.unwrap();

        assert!(ticket.requested);
        let board = board.borrow();
        assert!(board.get(1).unwrap().completed);
        assert!(!board.is_pending(1));

        let sent = http.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, HttpMethod::Put);
        assert_eq!(sent[0].url, "http://api.test/tasks/1");
        assert_eq!(sent[0].body.as_deref(), Some(r#"{"completed":true}"#));
    }

    #[tokio::test]
    async fn test_toggle_failure_rolls_back_only_that_task() {
        let (http, api, board) = setup();
        http.respond(500, r#"{"detail":"db down"}"#);
        let before = board.borrow().clone();

        let err = toggle_task(&board, &api, 1).await.unwrap_err();

        assert!(matches!(err, ToggleError::Rejected { id: 1, .. }));
        assert_eq!(*board.borrow(), before);
    }

    #[tokio::test]
    async fn test_toggle_unauthorized_surfaces_source() {
        let (http, api, board) = setup();
        http.respond(401, "");

        let err = toggle_task(&board, &api, 2).await.unwrap_err();

        match err {
            ToggleError::Rejected { source, .. } => assert!(source.is_unauthorized()),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(board.borrow().get(2).unwrap().completed);
    }

    #[tokio::test]
    async fn test_toggle_in_flight_sends_nothing() {
        let (http, api, board) = setup();
        board.borrow_mut().begin_toggle(1).unwrap();

        let err = toggle_task(&board, &api, 1).await.unwrap_err();

        assert_eq!(err, ToggleError::InFlight(1));
        assert!(http.requests().is_empty());
    }
}
