// src/workflows.rs

use crate::{
    AppContext, constants,
    downloader::{self, BatchOutcome},
    error::{AppError, AppResult},
    extractor,
    models::{FetchRequest, ImageRecord},
    symbols, ui, utils,
};
use anyhow::Context;
use colored::*;
use log::{debug, info, warn};
use std::{
    fs,
    path::{Path, PathBuf},
};
use url::Url;

/// 运行网页抓取模式（处理 --url）
pub(crate) async fn run_scrape(context: &AppContext, page_url: &str) -> AppResult<()> {
    let records = extractor::scrape_page(&context.http_client, page_url).await?;

    if context.args.list {
        return print_records(&records, context.args.json);
    }

    if records.is_empty() {
        ui::info("未在该网页中找到任何可下载的图片。");
        return Ok(());
    }

    let selected = select_records(context, &records)?;
    if selected.is_empty() {
        ui::info("未选择任何图片，任务结束。");
        return Ok(());
    }

    let requests = selected.into_iter().map(FetchRequest::from).collect();
    download_requests(context, requests).await
}

/// 运行批量文件模式（处理 --batch-file）
pub(crate) async fn run_batch_file(context: &AppContext, batch_file: &Path) -> AppResult<()> {
    let content = fs::read_to_string(batch_file)
        .with_context(|| format!("读取批量文件 '{}' 失败", batch_file.display()))?;
    let requests: Vec<FetchRequest> = serde_json::from_str(&content)
        .with_context(|| format!("解析批量文件 '{}' 失败", batch_file.display()))?;

    if requests.is_empty() {
        warn!("批量文件 '{}' 不含任何图片。", batch_file.display());
        ui::warn(&format!("批量文件 '{}' 为空，将生成空归档。", batch_file.display()));
    }
    download_requests(context, requests).await
}

/// 运行单图模式（处理 --image）
pub(crate) async fn run_single_image(context: &AppContext, image_url: &str) -> AppResult<()> {
    let name = match &context.args.name {
        Some(name) => name.clone(),
        None => Url::parse(image_url.trim())
            .ok()
            .and_then(|url| extractor::utils::url_basename_stem(&url))
            .unwrap_or_else(|| constants::naming::DEFAULT_ALT_NAME.to_string()),
    };

    let output_dir = prepare_output_dir(&context.args.output)?;
    let image = downloader::fetch_one(&context.http_client, image_url, &name).await?;
    let target = output_dir.join(&image.filename);
    fs::write(&target, &image.content)?;

    info!("单张图片已保存: {} ({})", target.display(), image.content_type);
    println!(
        "{} {} ({}, {} 字节)",
        *symbols::OK,
        target.display(),
        image.content_type,
        image.content.len()
    );
    Ok(())
}

fn print_records(records: &[ImageRecord], as_json: bool) -> AppResult<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }
    ui::print_header(&format!("网页图片列表 (共 {} 张)", records.len()));
    for (i, record) in records.iter().enumerate() {
        println!("{} [{}] {}", *symbols::IMAGE, i + 1, record.alt.bold());
        println!("      {}", record.src.dimmed());
    }
    Ok(())
}

fn select_records(context: &AppContext, records: &[ImageRecord]) -> AppResult<Vec<ImageRecord>> {
    let user_input = if context.args.interactive {
        let options: Vec<String> = records
            .iter()
            .map(|r| utils::truncate_text(&r.alt, constants::FILENAME_TRUNCATE_LENGTH))
            .collect();
        ui::selection_menu(
            &options,
            "网页图片列表",
            "支持格式: 1, 3, 2-4, all",
            &context.args.select,
        )
        .map_err(|_| AppError::UserInterrupt)?
    } else {
        context.args.select.clone()
    };

    let indices = utils::parse_selection_indices(&user_input, records.len());
    debug!("根据用户输入 '{}'，解析出的索引为: {:?}", user_input, indices);
    Ok(indices.into_iter().map(|i| records[i].clone()).collect())
}

fn prepare_output_dir(output: &Path) -> AppResult<PathBuf> {
    fs::create_dir_all(output)?;
    let absolute_path = dunce::canonicalize(output)?;
    info!("文件将保存到目录: \"{}\"", absolute_path.display());
    ui::info(&format!("文件将保存到目录: \"{}\"", absolute_path.display()));
    Ok(absolute_path)
}

async fn download_requests(context: &AppContext, requests: Vec<FetchRequest>) -> AppResult<()> {
    let output_dir = prepare_output_dir(&context.args.output)?;
    let workers = context.config.max_workers;

    ui::info(&format!(
        "开始下载 {} 张图片 (并发数: {})...",
        requests.len(),
        workers
    ));
    let pbar = ui::new_tasks_progress_bar(requests.len() as u64, "下载");

    let report = if context.args.separate {
        downloader::execute_batch(&context.http_client, requests, workers, &pbar, |entry| {
            let target = output_dir.join(&entry.filename);
            fs::write(&target, &entry.content)?;
            debug!("已保存: {}", target.display());
            Ok(())
        })
        .await?
    } else {
        let archive_path = output_dir.join(&context.args.archive_name);
        if context.args.interactive
            && archive_path.exists()
            && !ui::confirm(&format!("归档 '{}' 已存在，是否覆盖?", archive_path.display()), false)
        {
            pbar.finish_and_clear();
            ui::info("已取消下载。");
            return Ok(());
        }

        let BatchOutcome { archive, report } =
            downloader::fetch_and_archive_with_progress(&context.http_client, requests, workers, &pbar)
                .await?;
        fs::write(&archive_path, &archive)?;
        info!(
            "已生成 {} 归档: {} ({} 字节)",
            BatchOutcome::CONTENT_TYPE,
            archive_path.display(),
            archive.len()
        );
        ui::plain(&format!(
            "{} 归档已保存: {}",
            *symbols::OK,
            archive_path.display().to_string().green()
        ));
        report
    };

    pbar.finish_and_clear();
    report.print_report();
    Ok(())
}
