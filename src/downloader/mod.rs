// src/downloader/mod.rs

mod archive;
mod namespace;
mod task_processor;
mod task_runner;

pub use archive::ArchiveWriter;
pub use namespace::FilenameNamespace;
pub use task_processor::{TaskProcessor, extension_for_content_type, fetch_one};
pub use task_runner::{execute_batch, fetch_and_archive, fetch_and_archive_with_progress};

use crate::{constants, models::FetchOutcome, symbols, ui};
use colored::*;
use log::info;
use std::collections::HashMap;

/// 批量下载的结果：ZIP 字节与统计报告。
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub archive: Vec<u8>,
    pub report: BatchReport,
}

impl BatchOutcome {
    pub const CONTENT_TYPE: &'static str = constants::media::ARCHIVE_CONTENT_TYPE;
}

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub total: usize,
    pub archived: usize,
    pub duplicates: usize,
    pub failed: usize,
    pub duplicate_files: Vec<String>,
    pub failed_downloads: Vec<(String, String)>,
}

impl BatchReport {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    pub fn record(&mut self, outcome: &FetchOutcome) {
        match outcome {
            FetchOutcome::Fetched(_) => self.archived += 1,
            FetchOutcome::Duplicate { filename } => {
                self.duplicates += 1;
                self.duplicate_files.push(filename.clone());
            }
            FetchOutcome::Failed { src, reason } => {
                self.failed += 1;
                self.failed_downloads.push((src.clone(), reason.clone()));
            }
        }
    }

    pub fn all_archived(&self) -> bool {
        self.archived == self.total
    }

    pub fn print_report(&self) {
        info!(
            "下载报告: Total={}, Archived={}, Duplicates={}, Failed={}",
            self.total, self.archived, self.duplicates, self.failed
        );

        if !self.duplicate_files.is_empty() || !self.failed_downloads.is_empty() {
            ui::print_sub_header("下载详情报告");
            if !self.duplicate_files.is_empty() {
                println!("\n{} 因重名被丢弃的文件 ({}个):", *symbols::INFO, self.duplicates);
                let mut names = self.duplicate_files.clone();
                names.sort();
                for name in names {
                    println!("    - {}", name.cyan());
                }
            }
            if !self.failed_downloads.is_empty() {
                println!("\n{} 下载失败的图片 ({}个):", *symbols::ERROR, self.failed);
                print_grouped_report(&self.failed_downloads, |s| s.red());
            }
        }
        ui::print_sub_header("任务总结");
        if self.total > 0 && self.all_archived() {
            println!("{} 所有 {} 张图片均已下载。", *symbols::OK, self.total);
        } else {
            let summary = format!(
                "{} | {} | {}",
                format!("成功: {}", self.archived).green(),
                format!("失败: {}", self.failed).red(),
                format!("重名: {}", self.duplicates).yellow()
            );
            println!("{}", summary);
        }
    }
}

// 模块内的私有辅助函数
fn print_grouped_report(
    items: &[(String, String)],
    color_fn: fn(ColoredString) -> ColoredString,
) {
    let mut grouped: HashMap<&String, Vec<&String>> = HashMap::new();
    for (src, reason) in items {
        grouped.entry(reason).or_default().push(src);
    }
    let mut sorted_reasons: Vec<_> = grouped.keys().copied().collect();
    sorted_reasons.sort();
    for reason in sorted_reasons {
        println!("  - {}", color_fn(format!("原因: {}", reason).into()));
        let mut srcs = grouped[reason].clone();
        srcs.sort();
        for src in srcs {
            println!("    - {}", src);
        }
    }
}
