//! 教材存储操作

use super::SeaOrmStorage;
use crate::entity::textbooks::{ActiveModel, Column, Entity as Textbooks};
use crate::errors::{EduProofError, Result};
use crate::models::{
    PaginationInfo,
    textbooks::{
        entities::Textbook,
        requests::{CreateTextbookRequest, TextbookListQuery},
        responses::TextbookListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建教材（is_indexed 由外部索引管线回写，创建时恒为 false）
    pub async fn create_textbook_impl(
        &self,
        uploaded_by: i64,
        req: CreateTextbookRequest,
    ) -> Result<Textbook> {
        let model = ActiveModel {
            title: Set(req.title),
            subject: Set(req.subject),
            class_id: Set(req.class_id),
            file_url: Set(req.file_url),
            uploaded_by: Set(uploaded_by),
            is_indexed: Set(false),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("创建教材失败: {e}")))?;

        Ok(result.into_textbook())
    }

    /// 通过 ID 获取教材
    pub async fn get_textbook_by_id_impl(&self, textbook_id: i64) -> Result<Option<Textbook>> {
        let result = Textbooks::find_by_id(textbook_id)
            .one(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询教材失败: {e}")))?;

        Ok(result.map(|m| m.into_textbook()))
    }

    /// 列出教材（分页）
    pub async fn list_textbooks_with_pagination_impl(
        &self,
        query: TextbookListQuery,
    ) -> Result<TextbookListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Textbooks::find();

        if let Some(ref subject) = query.subject {
            select = select.filter(Column::Subject.eq(subject));
        }
        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询教材总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询教材页数失败: {e}")))?;

        let textbooks = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询教材列表失败: {e}")))?;

        Ok(TextbookListResponse {
            items: textbooks.into_iter().map(|m| m.into_textbook()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 删除教材（仅上传者本人）
    pub async fn delete_textbook_impl(&self, textbook_id: i64, uploaded_by: i64) -> Result<()> {
        let textbook = Textbooks::find_by_id(textbook_id)
            .one(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询教材失败: {e}")))?
            .ok_or_else(|| EduProofError::not_found("教材不存在"))?;

        if textbook.uploaded_by != uploaded_by {
            return Err(EduProofError::forbidden("只能删除自己上传的教材"));
        }

        Textbooks::delete_by_id(textbook_id)
            .exec(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("删除教材失败: {e}")))?;

        Ok(())
    }
}
