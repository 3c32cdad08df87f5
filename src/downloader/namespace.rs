// src/downloader/namespace.rs

use log::debug;
use std::{
    collections::HashSet,
    sync::{Mutex, PoisonError},
};

/// 一次批量下载内已占用的文件名集合。只增不减，随批次结束而销毁。
#[derive(Debug, Default)]
pub struct FilenameNamespace {
    names: Mutex<HashSet<String>>,
}

impl FilenameNamespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// 原子地检查并占用文件名。名称已被占用时返回 `false`。
    pub fn claim(&self, filename: &str) -> bool {
        let mut names = self.names.lock().unwrap_or_else(PoisonError::into_inner);
        if names.contains(filename) {
            debug!("文件名 '{}' 已被占用", filename);
            return false;
        }
        names.insert(filename.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.names.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Arc, thread};

    #[test]
    fn test_first_claim_wins() {
        let ns = FilenameNamespace::new();
        assert!(ns.is_empty());
        assert!(ns.claim("cat.png"));
        assert!(!ns.claim("cat.png"));
        assert!(ns.claim("cat.jpg"));
        assert_eq!(ns.len(), 2);
    }

    #[test]
    fn test_concurrent_claims_grant_exactly_one() {
        let ns = Arc::new(FilenameNamespace::new());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let ns = ns.clone();
                thread::spawn(move || ns.claim("same.jpg"))
            })
            .collect();
        let granted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(granted, 1);
        assert_eq!(ns.len(), 1);
    }
}
