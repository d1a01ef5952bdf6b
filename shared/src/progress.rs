//! 仪表盘派生计算
//!
//! 按周分组、完成百分比、每周摘要和学习记录汇总。

use crate::{MAX_VIDEOS_PER_WEEK, Progress, Roadmap, TOTAL_WEEKS, Task};
use std::collections::BTreeMap;

/// round(100 × done / total)，total 为 0 时返回 0
pub fn completion_percent(done: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((done as f64 / total as f64) * 100.0).round() as u32
}

/// 按周分组，仅包含 1..=24 周内的任务
pub fn group_by_week(tasks: &[Task]) -> BTreeMap<i32, Vec<&Task>> {
    let mut map: BTreeMap<i32, Vec<&Task>> = BTreeMap::new();
    for task in tasks {
        if let Some(week) = task.plan_week() {
            map.entry(week).or_default().push(task);
        }
    }
    map
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Completion {
    pub done: usize,
    pub total: usize,
}

impl Completion {
    pub fn of<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        tasks.into_iter().fold(Self::default(), |acc, t| Self {
            done: acc.done + usize::from(t.completed),
            total: acc.total + 1,
        })
    }

    pub fn percent(&self) -> u32 {
        completion_percent(self.done, self.total)
    }
}

/// 全局进度：只统计有效周内的任务
pub fn overall_completion(tasks: &[Task]) -> Completion {
    Completion::of(tasks.iter().filter(|t| t.plan_week().is_some()))
}

/// 24 周网格中的一格
#[derive(Debug, Clone, PartialEq)]
pub struct WeekSummary {
    pub week: i32,
    /// 路线图主题，没有则为空字符串
    pub theme: String,
    /// 按标题排序
    pub tasks: Vec<Task>,
    /// 最多 4 个视频链接
    pub videos: Vec<String>,
    pub completion: Completion,
}

/// 构建 1..=24 周的摘要
pub fn weekly_plan(tasks: &[Task], roadmap: Option<&Roadmap>) -> Vec<WeekSummary> {
    let grouped = group_by_week(tasks);

    (1..=TOTAL_WEEKS)
        .map(|week| {
            let mut items: Vec<Task> = grouped
                .get(&week)
                .map(|ts| ts.iter().map(|t| (*t).clone()).collect())
                .unwrap_or_default();
            items.sort_by(|a, b| a.title.cmp(&b.title));

            let entry = roadmap.and_then(|r| r.week(week));
            let theme = entry.map(|w| w.theme.clone()).unwrap_or_default();
            let videos = entry
                .map(|w| w.videos.iter().take(MAX_VIDEOS_PER_WEEK).cloned().collect())
                .unwrap_or_default();

            WeekSummary {
                week,
                theme,
                completion: Completion::of(&items),
                tasks: items,
                videos,
            }
        })
        .collect()
}

// =========================================================
// 学习记录 (Progress entries)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProgressTotals {
    pub tasks_completed: u32,
    pub study_hours: f64,
    pub notes_created: u32,
}

pub fn progress_totals(entries: &[Progress]) -> ProgressTotals {
    entries.iter().fold(ProgressTotals::default(), |acc, p| ProgressTotals {
        tasks_completed: acc.tasks_completed.saturating_add(p.tasks_completed),
        study_hours: acc.study_hours + p.study_hours,
        notes_created: acc.notes_created.saturating_add(p.notes_created),
    })
}

/// 单日活跃度等级 0..=4，用于热力图着色
pub fn activity_level(entry: Option<&Progress>) -> u8 {
    let Some(p) = entry else {
        return 0;
    };
    let total = p.tasks_completed as f64 + p.study_hours + p.notes_created as f64;
    if total <= 0.0 {
        0
    } else if total <= 2.0 {
        1
    } else if total <= 5.0 {
        2
    } else if total <= 8.0 {
        3
    } else {
        4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_task;
    use crate::RoadmapWeek;

    fn progress(tasks: u32, hours: f64, notes: u32) -> Progress {
        Progress {
            id: 1,
            user_id: 1,
            date: "2025-03-01".into(),
            tasks_completed: tasks,
            study_hours: hours,
            notes_created: notes,
        }
    }

    #[test]
    fn test_completion_percent() {
        assert_eq!(completion_percent(0, 0), 0);
        assert_eq!(completion_percent(1, 3), 33);
        assert_eq!(completion_percent(2, 3), 67);
        assert_eq!(completion_percent(1, 2), 50);
        assert_eq!(completion_percent(4, 4), 100);
    }

    #[test]
    fn test_out_of_range_weeks_are_excluded() {
        let tasks = vec![
            sample_task(1, Some(1), true),
            sample_task(2, Some(1), false),
            sample_task(3, None, true),
            sample_task(4, Some(0), true),
            sample_task(5, Some(25), true),
            sample_task(6, Some(24), false),
        ];

        let grouped = group_by_week(&tasks);
        assert_eq!(grouped.keys().copied().collect::<Vec<_>>(), vec![1, 24]);
        assert_eq!(grouped[&1].len(), 2);

        let overall = overall_completion(&tasks);
        assert_eq!(overall, Completion { done: 1, total: 3 });
        assert_eq!(overall.percent(), 33);
    }

    #[test]
    fn test_weekly_plan_covers_all_weeks() {
        let mut b = sample_task(2, Some(3), true);
        b.title = "b".into();
        let mut a = sample_task(1, Some(3), false);
        a.title = "a".into();
        let roadmap = Roadmap {
            weeks: vec![RoadmapWeek {
                week: 3,
                theme: "Traits".into(),
                tasks: vec![],
                videos: (0..6).map(|i| format!("https://youtu.be/{}", i)).collect(),
            }],
        };

        let plan = weekly_plan(&[b, a], Some(&roadmap));

        assert_eq!(plan.len(), 24);
        assert_eq!(plan[0].week, 1);
        assert_eq!(plan[0].completion.percent(), 0);
        assert!(plan[0].theme.is_empty());

        let week3 = &plan[2];
        assert_eq!(week3.theme, "Traits");
        assert_eq!(week3.videos.len(), MAX_VIDEOS_PER_WEEK);
        assert_eq!(
            week3.tasks.iter().map(|t| t.title.as_str()).collect::<Vec<_>>(),
            vec!["a", "b"]
        );
        assert_eq!(week3.completion.percent(), 50);
    }

    #[test]
    fn test_progress_totals_and_levels() {
        let entries = vec![progress(2, 1.5, 1), progress(3, 2.0, 0)];
        let totals = progress_totals(&entries);
        assert_eq!(totals.tasks_completed, 5);
        assert_eq!(totals.study_hours, 3.5);
        assert_eq!(totals.notes_created, 1);

        assert_eq!(activity_level(None), 0);
        assert_eq!(activity_level(Some(&progress(0, 0.0, 0))), 0);
        assert_eq!(activity_level(Some(&progress(1, 1.0, 0))), 1);
        assert_eq!(activity_level(Some(&progress(2, 2.0, 1))), 2);
        assert_eq!(activity_level(Some(&progress(4, 3.0, 1))), 3);
        assert_eq!(activity_level(Some(&progress(5, 4.0, 1))), 4);
    }

    #[test]
    fn test_progress_totals_saturate() {
        let entries = vec![progress(u32::MAX, 1.0, u32::MAX - 1), progress(7, 1.0, 5)];
        let totals = progress_totals(&entries);
        assert_eq!(totals.tasks_completed, u32::MAX);
        assert_eq!(totals.notes_created, u32::MAX);
        assert_eq!(totals.study_hours, 2.0);
    }
}
