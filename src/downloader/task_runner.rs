// src/downloader/task_runner.rs

use super::{
    BatchOutcome, BatchReport, archive::ArchiveWriter, namespace::FilenameNamespace,
    task_processor::TaskProcessor,
};
use crate::{client::RobustClient, error::*, models::*};
use futures::{StreamExt, stream};
use indicatif::ProgressBar;
use log::{debug, info};

/// 并发下载一批图片并打包为 ZIP。单个下载失败不会影响整个批次；
/// 空列表返回一个合法的空归档。
pub async fn fetch_and_archive(
    client: &RobustClient,
    requests: Vec<FetchRequest>,
    concurrency: usize,
) -> AppResult<BatchOutcome> {
    fetch_and_archive_with_progress(client, requests, concurrency, &ProgressBar::hidden()).await
}

/// 与 [`fetch_and_archive`] 相同，每完成一项请求推进一次进度条。
pub async fn fetch_and_archive_with_progress(
    client: &RobustClient,
    requests: Vec<FetchRequest>,
    concurrency: usize,
    pbar: &ProgressBar,
) -> AppResult<BatchOutcome> {
    let mut archive = ArchiveWriter::new();
    let report = execute_batch(client, requests, concurrency, pbar, |entry| archive.add(&entry)).await?;
    debug!("归档共写入 {} 个条目", archive.entries());

    Ok(BatchOutcome {
        archive: archive.finish()?,
        report,
    })
}

/// 批量下载的核心：固定大小的并发池消费请求列表，结果按完成顺序交给 `sink`。
///
/// `sink` 是唯一的写入者，只会收到成功且文件名未被占用的条目。
pub async fn execute_batch<S>(
    client: &RobustClient,
    requests: Vec<FetchRequest>,
    concurrency: usize,
    pbar: &ProgressBar,
    mut sink: S,
) -> AppResult<BatchReport>
where
    S: FnMut(ArchiveEntry) -> AppResult<()>,
{
    let max_workers = concurrency.max(1);
    let mut report = BatchReport::new(requests.len());
    info!("开始新一批下载任务，总数: {}，并发数: {}", requests.len(), max_workers);

    let namespace = FilenameNamespace::new();
    let processor = TaskProcessor::new(client, &namespace);

    let mut completions = stream::iter(requests)
        .map(|request| processor.process(request))
        .buffer_unordered(max_workers);

    while let Some(outcome) = completions.next().await {
        pbar.inc(1);
        report.record(&outcome);
        if let Some(entry) = outcome.into_entry() {
            sink(entry)?;
        }
    }

    info!(
        "批次完成: 成功 {}，重复 {}，失败 {} (已占用文件名 {} 个)",
        report.archived,
        report.duplicates,
        report.failed,
        namespace.len()
    );
    Ok(report)
}
