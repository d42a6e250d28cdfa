//! 批量运行结果

use serde::Serialize;

use crate::models::ApplicationOutcome;

/// 一次批量运行的汇总结果
///
/// 结果按入队顺序排列，与 worker 数量无关。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    outcomes: Vec<ApplicationOutcome>,
    cancelled: bool,
    unprocessed: Vec<String>,
}

impl BatchResult {
    /// 空批次（没有候选岗位）
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn outcomes(&self) -> &[ApplicationOutcome] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<ApplicationOutcome> {
        self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn applied_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_applied()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_skipped()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    /// 运行是否被提前取消
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// 取消时仍留在队列里的岗位ID
    pub fn unprocessed(&self) -> &[String] {
        &self.unprocessed
    }
}

/// 结果收集器
///
/// 只在调度任务中使用，worker 把 `(位置, 结果)` 交回后统一排序。
#[derive(Debug, Default)]
pub(crate) struct BatchCollector {
    entries: Vec<(usize, ApplicationOutcome)>,
}

impl BatchCollector {
    pub(crate) fn record(&mut self, position: usize, outcome: ApplicationOutcome) {
        self.entries.push((position, outcome));
    }

    pub(crate) fn finish(mut self, cancelled: bool, unprocessed: Vec<String>) -> BatchResult {
        self.entries.sort_by_key(|(position, _)| *position);
        BatchResult {
            outcomes: self.entries.into_iter().map(|(_, outcome)| outcome).collect(),
            cancelled,
            unprocessed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OutcomeKind;

    #[test]
    fn test_collector_sorts_by_position() {
        let mut collector = BatchCollector::default();
        collector.record(2, ApplicationOutcome::applied("V3"));
        collector.record(0, ApplicationOutcome::new("V1", OutcomeKind::SkippedTestRequired));
        collector.record(1, ApplicationOutcome::applied("V2"));

        let result = collector.finish(false, Vec::new());
        let ids: Vec<&str> = result.outcomes().iter().map(|o| o.vacancy_id.as_str()).collect();
        assert_eq!(ids, vec!["V1", "V2", "V3"]);
    }

    #[test]
    fn test_counts() {
        let mut collector = BatchCollector::default();
        collector.record(0, ApplicationOutcome::applied("V1"));
        collector.record(1, ApplicationOutcome::new("V2", OutcomeKind::SkippedDuplicate));
        collector.record(
            2,
            ApplicationOutcome::new(
                "V3",
                OutcomeKind::FailedSubmission {
                    error: "boom".to_string(),
                },
            ),
        );

        let result = collector.finish(true, vec!["V4".to_string()]);
        assert_eq!(result.len(), 3);
        assert_eq!(result.applied_count(), 1);
        assert_eq!(result.skipped_count(), 1);
        assert_eq!(result.failed_count(), 1);
        assert!(result.is_cancelled());
        assert_eq!(result.unprocessed(), ["V4".to_string()]);
    }

    #[test]
    fn test_empty_batch() {
        let result = BatchResult::empty();
        assert!(result.is_empty());
        assert!(!result.is_cancelled());
    }
}
