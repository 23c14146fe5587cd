pub mod download;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::providers::file_store::FileStore;

pub struct FileService;

impl FileService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_file_store(&self, request: &HttpRequest) -> Arc<dyn FileStore> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn FileStore>>>()
            .expect("File store not found in app data")
            .get_ref()
            .clone()
    }

    /// 上传文件
    pub async fn upload(&self, request: &HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
        upload::handle_upload(self, request, payload).await
    }

    /// 下载文件（需要签名 token）
    pub async fn download(
        &self,
        request: &HttpRequest,
        stored_name: String,
        token: Option<String>,
    ) -> ActixResult<HttpResponse> {
        download::handle_download(self, request, stored_name, token).await
    }
}
