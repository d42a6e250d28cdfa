//! 结果写入服务 - 业务能力层
//!
//! 把每个岗位的处理结果追加到日志文件，便于事后人工跟进

use std::fs::OpenOptions;
use std::io::Write;

use tracing::debug;

use crate::error::AppResult;
use crate::models::ApplicationOutcome;
use crate::orchestrator::BatchResult;

/// 结果写入服务
pub struct OutcomeWriter {
    file_path: String,
}

impl OutcomeWriter {
    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            file_path: path.into(),
        }
    }

    /// 写入单个结果
    pub fn write(&self, resume_id: &str, outcome: &ApplicationOutcome) -> AppResult<()> {
        debug!("写入结果: 岗位 {} | {}", outcome.vacancy_id, outcome.kind.label());

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)?;

        file.write_all(format_line(resume_id, outcome).as_bytes())?;
        Ok(())
    }

    /// 写入整批结果，取消时附带未处理的岗位
    pub fn write_batch(&self, resume_id: &str, result: &BatchResult) -> AppResult<()> {
        for outcome in result.outcomes() {
            self.write(resume_id, outcome)?;
        }
        if result.is_cancelled() {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)?;
            writeln!(
                file,
                "简历 {} | 批次已取消 | 未处理岗位: {}",
                resume_id,
                result.unprocessed().join(", ")
            )?;
        }
        Ok(())
    }
}

fn format_line(resume_id: &str, outcome: &ApplicationOutcome) -> String {
    match outcome.error() {
        Some(error) => format!(
            "简历 {} | 岗位 {} | {} | {}\n",
            resume_id,
            outcome.vacancy_id,
            outcome.kind.label(),
            error
        ),
        None => format!(
            "简历 {} | 岗位 {} | {}\n",
            resume_id,
            outcome.vacancy_id,
            outcome.kind.label()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OutcomeKind;

    #[test]
    fn test_line_includes_error() {
        let outcome = ApplicationOutcome::new(
            "V7",
            OutcomeKind::FailedSubmission {
                error: "status=400".to_string(),
            },
        );
        assert_eq!(
            format_line("R1", &outcome),
            "简历 R1 | 岗位 V7 | 失败(投递提交) | status=400\n"
        );
    }

    #[test]
    fn test_write_appends() {
        let path = std::env::temp_dir().join("hh_auto_apply_outcome_writer_test.txt");
        let _ = std::fs::remove_file(&path);
        let writer = OutcomeWriter::with_path(path.to_string_lossy().to_string());

        writer.write("R1", &ApplicationOutcome::applied("V1")).unwrap();
        writer.write("R1", &ApplicationOutcome::applied("V2")).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("岗位 V2 | 已投递"));

        let _ = std::fs::remove_file(path);
    }
}
