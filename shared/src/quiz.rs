//! 测验流程
//!
//! 测验只保存在视图本地，不回写后端；分数在客户端计算。

use crate::progress::completion_percent;
use crate::{ApiError, ApiResult, Difficulty, Quiz, QuizQuestion, QuizRequest, TOTAL_WEEKS};
use std::collections::BTreeMap;

/// 主题为空时使用的默认主题
pub const DEFAULT_TOPIC: &str = "general";

/// 构造测验生成请求，周范围固定从第 1 周开始
pub fn quiz_request(topic: &str, difficulty: Difficulty, week_end: i32) -> ApiResult<QuizRequest> {
    if !(1..=TOTAL_WEEKS).contains(&week_end) {
        return Err(ApiError::validation(format!(
            "Weeks must be between 1 and {}",
            TOTAL_WEEKS
        )));
    }
    let topic = topic.trim();
    Ok(QuizRequest {
        topic: if topic.is_empty() {
            DEFAULT_TOPIC.to_string()
        } else {
            topic.to_string()
        },
        difficulty,
        week_start: 1,
        week_end,
    })
}

/// 进行中的测验
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSession {
    quiz: Quiz,
    current: usize,
    /// 题目下标 -> 选项下标
    answers: BTreeMap<usize, usize>,
    finished: bool,
}

impl QuizSession {
    pub fn new(quiz: Quiz) -> Self {
        Self {
            quiz,
            current: 0,
            answers: BTreeMap::new(),
            finished: false,
        }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn len(&self) -> usize {
        self.quiz.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quiz.questions.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.quiz.questions.get(self.current)
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn answer(&self, question: usize) -> Option<usize> {
        self.answers.get(&question).copied()
    }

    /// 记录选择；越界的题目或选项被忽略
    pub fn select(&mut self, question: usize, option: usize) {
        let valid = self
            .quiz
            .questions
            .get(question)
            .is_some_and(|q| option < q.options.len());
        if valid && !self.finished {
            self.answers.insert(question, option);
        }
    }

    /// 下一题；已是最后一题时结束测验
    pub fn next(&mut self) {
        if self.is_last() {
            self.finished = true;
        } else {
            self.current += 1;
        }
    }

    pub fn previous(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// 结束后回到第一题查看作答，已选答案保留
    pub fn review(&mut self) {
        self.finished = false;
        self.current = 0;
    }

    /// 当前题目在整套题中的位置百分比
    pub fn position_percent(&self) -> u32 {
        completion_percent((self.current + 1).min(self.len()), self.len())
    }

    pub fn is_correct(&self, question: usize) -> bool {
        match (self.quiz.questions.get(question), self.answer(question)) {
            (Some(q), Some(selected)) => selected == q.correct_answer,
            _ => false,
        }
    }

    /// 答对题数；未作答视为错误
    pub fn score(&self) -> usize {
        (0..self.len()).filter(|&i| self.is_correct(i)).count()
    }

    pub fn percent(&self) -> u32 {
        completion_percent(self.score(), self.len())
    }
}
