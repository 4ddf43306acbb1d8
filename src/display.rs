//! Batch summary output

use crate::batch::BatchReport;
use rust_i18n::t;
use std::path::Path;

/// How many failed files are listed individually
const MAX_LISTED_FAILURES: usize = 5;

/// `1234567` -> `1,234,567`
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Per-bucket lines in ascending bucket order
pub fn bucket_lines(report: &BatchReport) -> Vec<String> {
    report
        .counts()
        .map(|(bucket, count)| {
            t!("bucket_line", bucket = bucket, count = group_thousands(count)).into_owned()
        })
        .collect()
}

/// Print the end-of-run summary
pub fn display_summary(report: &BatchReport, log_path: Option<&Path>) {
    println!("\n{}", "═".repeat(60));
    println!("{:^60}", t!("summary_title"));
    println!("{}", "═".repeat(60));

    println!();
    for line in bucket_lines(report) {
        println!("    {}", line);
    }

    println!("  {}", "─".repeat(40));
    println!("    ✓ {}: {}", t!("stat_total_moved"), group_thousands(report.total_moved()));
    println!("    ✗ {}: {}", t!("stat_failed"), group_thousands(report.failed_count()));

    let failed: Vec<_> = report.failures().collect();
    if !failed.is_empty() {
        let unknown_error = t!("unknown_error");
        println!("\n  {}", t!("failed_files"));
        println!("  {}", "─".repeat(40));
        for (i, result) in failed.iter().take(MAX_LISTED_FAILURES).enumerate() {
            println!(
                "    {}. {} - {}",
                i + 1,
                result.source.file_name().unwrap_or_default().to_string_lossy(),
                result.error.as_deref().unwrap_or(unknown_error.as_ref())
            );
        }
        if failed.len() > MAX_LISTED_FAILURES {
            println!(
                "    {}",
                t!("failed_files_more", count = failed.len() - MAX_LISTED_FAILURES)
            );
        }
    }

    if report.is_dry_run() {
        println!("\n  {}", t!("dry_run_notice"));
    }

    if let Some(path) = log_path {
        println!("\n  {} {}", t!("log_saved_to"), path.display());
    }

    println!("\n{}", "═".repeat(60));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_bucket_lines_empty_report() {
        assert!(bucket_lines(&BatchReport::default()).is_empty());
    }
}
