pub mod create;
pub mod delete;
pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::textbooks::requests::{CreateTextbookRequest, TextbookListQuery};
use crate::providers::file_store::FileStore;
use crate::storage::Storage;

pub struct TextbookService {
    storage: Option<Arc<dyn Storage>>,
}

impl TextbookService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_file_store(&self, request: &HttpRequest) -> Arc<dyn FileStore> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn FileStore>>>()
            .expect("File store not found in app data")
            .get_ref()
            .clone()
    }

    /// 创建教材
    pub async fn create_textbook(
        &self,
        request: &HttpRequest,
        uploaded_by: i64,
        req: CreateTextbookRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_textbook(self, request, uploaded_by, req).await
    }

    /// 获取教材详情（附限时下载链接）
    pub async fn get_textbook(
        &self,
        request: &HttpRequest,
        textbook_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_textbook(self, request, textbook_id).await
    }

    /// 列出教材
    pub async fn list_textbooks(
        &self,
        request: &HttpRequest,
        query: TextbookListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_textbooks(self, request, query).await
    }

    /// 删除教材
    pub async fn delete_textbook(
        &self,
        request: &HttpRequest,
        textbook_id: i64,
        uploaded_by: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_textbook(self, request, textbook_id, uploaded_by).await
    }
}
