//! Timestamped Markdown reports in the results directory.

use std::cmp::Ordering;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tokio::io::AsyncWriteExt;

use crate::error::PipelineError;

pub const EVALUATION_PREFIX: &str = "evaluation_";
pub const COMPARISON_PREFIX: &str = "comparison_";
const REPORT_EXTENSION: &str = ".md";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const COMPARISON_HEADING: &str = "# Overall LLM Comparison";

/// A report read back from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFile {
    pub name: String,
    pub content: String,
}

pub fn report_file_name(prefix: &str, at: DateTime<Local>) -> String {
    format!("{prefix}{}{REPORT_EXTENSION}", at.format(TIMESTAMP_FORMAT))
}

pub fn evaluation_markdown(model: &str, evaluation: &str) -> String {
    format!("# Evaluation for {model}\n\n{evaluation}\n")
}

pub fn comparison_markdown(comparison: &str) -> String {
    format!("{COMPARISON_HEADING}\n\n{comparison}")
}

/// Writes the evaluation of `model`, creating the results directory if needed.
pub async fn write_evaluation(dir: &Path, model: &str, evaluation: &str) -> io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    write_report_at(
        dir,
        EVALUATION_PREFIX,
        &evaluation_markdown(model, evaluation),
        Local::now(),
    )
    .await
}

pub async fn write_comparison(dir: &Path, comparison: &str) -> io::Result<PathBuf> {
    write_report_at(
        dir,
        COMPARISON_PREFIX,
        &comparison_markdown(comparison),
        Local::now(),
    )
    .await
}

/// Writes a new report named after `at`.
///
/// Names have one-second resolution. When the name is taken a `_1`, `_2`, ...
/// suffix is appended so an existing report is never overwritten.
pub async fn write_report_at(
    dir: &Path,
    prefix: &str,
    contents: &str,
    at: DateTime<Local>,
) -> io::Result<PathBuf> {
    let stamp = at.format(TIMESTAMP_FORMAT).to_string();
    let mut attempt = 0u32;
    loop {
        let name = match attempt {
            0 => format!("{prefix}{stamp}{REPORT_EXTENSION}"),
            n => format!("{prefix}{stamp}_{n}{REPORT_EXTENSION}"),
        };
        let path = dir.join(name);
        match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(mut file) => {
                file.write_all(contents.as_bytes()).await?;
                file.flush().await?;
                return Ok(path);
            }
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                log::debug!("{} already exists, trying next suffix", path.display());
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Orders report names by their `_`-separated parts, numeric parts by value,
/// so `_2` sorts before `_10` and an unsuffixed name before its suffixed ones.
pub fn compare_report_names(a: &str, b: &str) -> Ordering {
    let mut left = a.strip_suffix(REPORT_EXTENSION).unwrap_or(a).split('_');
    let mut right = b.strip_suffix(REPORT_EXTENSION).unwrap_or(b).split('_');
    loop {
        let ord = match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => match (l.parse::<u64>(), r.parse::<u64>()) {
                (Ok(l), Ok(r)) => l.cmp(&r),
                _ => l.cmp(r),
            },
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
}

/// Reads every `evaluation_*.md` file in `dir` in creation order, content trimmed.
pub async fn collect_evaluations(dir: &Path) -> Result<Vec<ReportFile>, PipelineError> {
    if !tokio::fs::metadata(dir)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
    {
        return Err(PipelineError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut reports = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if !name.starts_with(EVALUATION_PREFIX) || !name.ends_with(REPORT_EXTENSION) {
            continue;
        }
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let content = tokio::fs::read_to_string(entry.path()).await?;
        reports.push(ReportFile {
            name,
            content: content.trim().to_string(),
        });
    }
    reports.sort_by(|a, b| compare_report_names(&a.name, &b.name));
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use tempfile::tempdir;

    use super::*;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 9, 14, 5, 7).unwrap()
    }

    #[test]
    fn names_use_second_resolution_timestamp() {
        assert_eq!(
            report_file_name(EVALUATION_PREFIX, fixed_time()),
            "evaluation_20260309_140507.md"
        );
    }

    #[test]
    fn evaluation_has_model_heading() {
        assert_eq!(
            evaluation_markdown("modelA", "Solid answers."),
            "# Evaluation for modelA\n\nSolid answers.\n"
        );
        assert_eq!(
            comparison_markdown("modelA wins"),
            "# Overall LLM Comparison\n\nmodelA wins"
        );
    }

    #[tokio::test]
    async fn same_second_reports_do_not_overwrite() {
        let dir = tempdir().unwrap();
        let first = write_report_at(dir.path(), COMPARISON_PREFIX, "one", fixed_time())
            .await
            .unwrap();
        let second = write_report_at(dir.path(), COMPARISON_PREFIX, "two", fixed_time())
            .await
            .unwrap();

        assert_eq!(first.file_name().unwrap(), "comparison_20260309_140507.md");
        assert_eq!(second.file_name().unwrap(), "comparison_20260309_140507_1.md");
        assert_eq!(std::fs::read_to_string(first).unwrap(), "one");
        assert_eq!(std::fs::read_to_string(second).unwrap(), "two");
    }

    #[tokio::test]
    async fn write_evaluation_creates_directory() {
        let dir = tempdir().unwrap();
        let results = dir.path().join("results");
        let path = write_evaluation(&results, "modelA", "fine").await.unwrap();

        assert!(path.starts_with(&results));
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.starts_with("# Evaluation for modelA"));
    }

    #[tokio::test]
    async fn collects_only_evaluation_markdown() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("evaluation_2.md"), "second\n").unwrap();
        std::fs::write(dir.path().join("evaluation_1.md"), "  first  ").unwrap();
        std::fs::write(dir.path().join("comparison_1.md"), "skip").unwrap();
        std::fs::write(dir.path().join("evaluation_1.txt"), "skip").unwrap();
        std::fs::create_dir(dir.path().join("evaluation_dir.md")).unwrap();

        let reports = collect_evaluations(dir.path()).await.unwrap();
        assert_eq!(
            reports,
            vec![
                ReportFile {
                    name: "evaluation_1.md".into(),
                    content: "first".into()
                },
                ReportFile {
                    name: "evaluation_2.md".into(),
                    content: "second".into()
                },
            ]
        );
    }

    #[tokio::test]
    async fn collisions_past_nine_keep_creation_order() {
        let dir = tempdir().unwrap();
        for n in 0..12 {
            write_report_at(dir.path(), EVALUATION_PREFIX, &format!("report {n}"), fixed_time())
                .await
                .unwrap();
        }

        let reports = collect_evaluations(dir.path()).await.unwrap();
        let contents: Vec<String> = reports.into_iter().map(|r| r.content).collect();
        let expected: Vec<String> = (0..12).map(|n| format!("report {n}")).collect();
        assert_eq!(contents, expected);
    }

    #[test]
    fn later_timestamps_sort_after_suffixed_names() {
        let mut names = vec![
            "evaluation_20260309_140508.md",
            "evaluation_20260309_140507_10.md",
            "evaluation_20260309_140507.md",
            "evaluation_20260309_140507_2.md",
        ];
        names.sort_by(|a, b| compare_report_names(a, b));
        assert_eq!(
            names,
            [
                "evaluation_20260309_140507.md",
                "evaluation_20260309_140507_2.md",
                "evaluation_20260309_140507_10.md",
                "evaluation_20260309_140508.md",
            ]
        );
    }

    #[tokio::test]
    async fn missing_directory_is_reported() {
        let dir = tempdir().unwrap();
        let err = collect_evaluations(&dir.path().join("results"))
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::DirectoryNotFound(_)));
    }
}
