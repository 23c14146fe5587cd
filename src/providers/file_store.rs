//! 文件存储
//!
//! 对外是一个窄接口：put 返回可持久引用的 URL，sign 签发限时下载链接，
//! delete 幂等删除。本地磁盘实现仅接受 image/jpeg、image/png、
//! application/pdf 三种类型。

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::config::UploadConfig;
use crate::errors::{EduProofError, Result};
use crate::utils::file_magic::extension_for_content_type;
use crate::utils::jwt::JwtUtils;

pub const FILE_URL_PREFIX: &str = "/api/v1/files/";

#[async_trait]
pub trait FileStore: Send + Sync {
    /// 存储字节流，返回持久 URL
    async fn put(&self, bytes: Vec<u8>, content_type: &str, path_hint: &str) -> Result<String>;

    /// 为已存储的 URL 签发限时下载链接
    async fn sign(&self, url: &str, ttl_seconds: u64) -> Result<String>;

    /// 删除文件，返回是否实际删除了内容
    async fn delete(&self, url: &str) -> Result<bool>;

    /// 读取已存储文件的内容（供下载端点使用）
    async fn read(&self, stored_name: &str) -> Result<Vec<u8>>;
}

/// 本地磁盘文件存储
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(config: &UploadConfig) -> Result<Self> {
        let root = PathBuf::from(&config.dir);
        if !root.exists() {
            std::fs::create_dir_all(&root)
                .map_err(|e| EduProofError::file_operation(format!("创建上传目录失败: {e}")))?;
        }
        Ok(Self { root })
    }

    /// 从 URL 提取存储文件名，并拒绝路径穿越
    fn stored_name_from_url(url: &str) -> Result<&str> {
        let name = url
            .strip_prefix(FILE_URL_PREFIX)
            .unwrap_or(url)
            .split('?')
            .next()
            .unwrap_or_default();
        Self::check_stored_name(name)?;
        Ok(name)
    }

    fn check_stored_name(name: &str) -> Result<()> {
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(EduProofError::validation("非法的文件名"));
        }
        Ok(())
    }

    fn path_for(&self, stored_name: &str) -> PathBuf {
        self.root.join(stored_name)
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn put(&self, bytes: Vec<u8>, content_type: &str, path_hint: &str) -> Result<String> {
        let extension = extension_for_content_type(content_type).ok_or_else(|| {
            EduProofError::validation(format!("不支持的文件类型: {content_type}"))
        })?;

        // path_hint 只取文件名部分参与命名，实际唯一性由 uuid 保证
        let hint = Path::new(path_hint)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("file");
        let stored_name = format!(
            "{}-{}-{}{}",
            chrono::Utc::now().timestamp(),
            hint,
            Uuid::new_v4(),
            extension
        );

        std::fs::write(self.path_for(&stored_name), bytes)
            .map_err(|e| EduProofError::file_operation(format!("写入文件失败: {e}")))?;

        Ok(format!("{FILE_URL_PREFIX}{stored_name}"))
    }

    async fn sign(&self, url: &str, ttl_seconds: u64) -> Result<String> {
        let stored_name = Self::stored_name_from_url(url)?;
        let token = JwtUtils::generate_file_token(stored_name, ttl_seconds)
            .map_err(|e| EduProofError::file_operation(format!("签发下载链接失败: {e}")))?;
        Ok(format!("{FILE_URL_PREFIX}{stored_name}?token={token}"))
    }

    async fn delete(&self, url: &str) -> Result<bool> {
        let stored_name = Self::stored_name_from_url(url)?;
        let path = self.path_for(stored_name);
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(path)
            .map_err(|e| EduProofError::file_operation(format!("删除文件失败: {e}")))?;
        Ok(true)
    }

    async fn read(&self, stored_name: &str) -> Result<Vec<u8>> {
        Self::check_stored_name(stored_name)?;
        let path = self.path_for(stored_name);
        if !path.exists() {
            return Err(EduProofError::not_found("文件不存在"));
        }
        std::fs::read(path)
            .map_err(|e| EduProofError::file_operation(format!("读取文件失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> LocalFileStore {
        let dir = std::env::temp_dir().join(format!("eduproof-test-{}", Uuid::new_v4()));
        LocalFileStore::new(&UploadConfig {
            dir: dir.to_string_lossy().into_owned(),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_put_read_delete_roundtrip() {
        let store = store();
        let url = store
            .put(b"%PDF-1.4 test".to_vec(), "application/pdf", "homework.pdf")
            .await
            .unwrap();
        assert!(url.starts_with(FILE_URL_PREFIX));
        assert!(url.ends_with(".pdf"));

        let name = url.strip_prefix(FILE_URL_PREFIX).unwrap();
        assert_eq!(store.read(name).await.unwrap(), b"%PDF-1.4 test");

        assert!(store.delete(&url).await.unwrap());
        // 幂等：再次删除返回 false
        assert!(!store.delete(&url).await.unwrap());
    }

    #[tokio::test]
    async fn test_put_rejects_unsupported_content_type() {
        let store = store();
        let err = store
            .put(b"hello".to_vec(), "text/plain", "notes.txt")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION");
    }

    #[tokio::test]
    async fn test_read_rejects_path_traversal() {
        let store = store();
        assert!(store.read("../etc/passwd").await.is_err());
        assert!(store.read("a/b.pdf").await.is_err());
    }
}
