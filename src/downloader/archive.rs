// src/downloader/archive.rs

use crate::{error::AppResult, models::ArchiveEntry};
use log::debug;
use std::io::{Cursor, Write};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

/// 内存中的 ZIP 归档。条目平铺，不含目录。
pub struct ArchiveWriter {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    entries: usize,
}

impl Default for ArchiveWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveWriter {
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .unix_permissions(0o644),
            entries: 0,
        }
    }

    pub fn add(&mut self, entry: &ArchiveEntry) -> AppResult<()> {
        self.zip.start_file(entry.filename.as_str(), self.options)?;
        self.zip.write_all(&entry.content)?;
        self.entries += 1;
        debug!("写入归档条目 '{}' ({} 字节)", entry.filename, entry.content.len());
        Ok(())
    }

    pub fn entries(&self) -> usize {
        self.entries
    }

    pub fn finish(self) -> AppResult<Vec<u8>> {
        let cursor = self.zip.finish()?;
        Ok(cursor.into_inner())
    }
}
