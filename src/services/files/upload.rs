use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use serde::Serialize;
use std::path::Path;
use ts_rs::TS;

use super::FileService;
use crate::config::AppConfig;
use crate::errors::EduProofError;
use crate::models::ApiResponse;
use crate::utils::validate_magic_bytes;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub struct FileUploadResponse {
    pub url: String,
    pub file_name: String,
    pub size: usize,
    pub content_type: String,
}

fn content_type_for_extension(extension: &str) -> Option<&'static str> {
    match extension {
        ".jpg" | ".jpeg" => Some("image/jpeg"),
        ".png" => Some("image/png"),
        ".pdf" => Some("application/pdf"),
        _ => None,
    }
}

/// 上传文件
/// POST /files
pub async fn handle_upload(
    service: &FileService,
    req: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();
    let max_size = config.upload.max_size;
    let allowed_types = &config.upload.allowed_types;
    let file_store = service.get_file_store(req);

    let mut uploaded: Option<FileUploadResponse> = None;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name != "file" {
            continue;
        }

        if uploaded.is_some() {
            return Ok(
                EduProofError::validation("一次只能上传一个文件").to_http_response(),
            );
        }

        // 先获取原始文件名并校验扩展名
        let original_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string())
            .unwrap_or_default();

        let extension = Path::new(&original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .unwrap_or_default();

        if !allowed_types.iter().any(|t| t.to_lowercase() == extension) {
            return Ok(
                EduProofError::validation("不支持的文件类型").to_http_response(),
            );
        }

        let Some(content_type) = content_type_for_extension(&extension) else {
            return Ok(
                EduProofError::validation("不支持的文件类型").to_http_response(),
            );
        };

        // 读入内容，第一个 chunk 验证魔术字节
        let mut bytes: Vec<u8> = Vec::new();
        let mut first_chunk = true;
        while let Some(chunk) = field.next().await {
            let data = chunk?;

            if first_chunk {
                first_chunk = false;
                if !validate_magic_bytes(&data, &extension) {
                    return Ok(EduProofError::validation("文件内容与扩展名不匹配")
                        .to_http_response());
                }
            }

            if bytes.len() + data.len() > max_size {
                return Ok(
                    EduProofError::validation("文件超出大小限制").to_http_response(),
                );
            }
            bytes.extend_from_slice(&data);
        }

        if bytes.is_empty() {
            return Ok(EduProofError::validation("文件内容为空").to_http_response());
        }

        let size = bytes.len();
        let url = match file_store.put(bytes, content_type, &original_name).await {
            Ok(url) => url,
            Err(e) => return Ok(e.to_http_response()),
        };

        uploaded = Some(FileUploadResponse {
            url,
            file_name: original_name,
            size,
            content_type: content_type.to_string(),
        });
    }

    match uploaded {
        Some(response) => Ok(HttpResponse::Created().json(ApiResponse::success(response, "上传成功"))),
        None => Ok(EduProofError::validation("缺少文件字段").to_http_response()),
    }
}
