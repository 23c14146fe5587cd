//! 作业存储操作
//!
//! 作业的所有权校验在这一层完成：update/delete 先确认作业存在，
//! 再确认操作者是布置作业的教师。删除是硬删除并在单个事务内
//! 级联删除全部提交。

use super::SeaOrmStorage;
use crate::entity::homeworks::{ActiveModel, Column, Entity as Homeworks};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{EduProofError, Result};
use crate::models::{
    PaginationInfo,
    homeworks::{
        entities::Homework,
        requests::{CreateHomeworkRequest, UpdateHomeworkRequest},
        responses::{HomeworkListResponse, HomeworkStats},
    },
    submissions::entities::SubmissionStatus,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建作业
    ///
    /// 不要求 due_at 在未来：教师可以补录已截止的作业。
    pub async fn create_homework_impl(
        &self,
        teacher_id: i64,
        req: CreateHomeworkRequest,
    ) -> Result<Homework> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            teacher_id: Set(teacher_id),
            class_id: Set(req.class_id),
            subject: Set(req.subject),
            textbook_id: Set(req.textbook_id),
            page_range: Set(req.page_range),
            title: Set(req.title),
            description: Set(req.description),
            due_at: Set(req.due_at.timestamp()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_homework())
    }

    /// 通过 ID 获取作业
    pub async fn get_homework_by_id_impl(&self, homework_id: i64) -> Result<Option<Homework>> {
        let result = Homeworks::find_by_id(homework_id)
            .one(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_homework()))
    }

    /// 获取作业的提交统计（按状态聚合）
    pub async fn get_homework_stats_impl(&self, homework_id: i64) -> Result<HomeworkStats> {
        let rows: Vec<(String, i64)> = Submissions::find()
            .select_only()
            .column(SubmissionColumn::Status)
            .column_as(SubmissionColumn::Id.count(), "count")
            .filter(SubmissionColumn::HomeworkId.eq(homework_id))
            .group_by(SubmissionColumn::Status)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("统计提交失败: {e}")))?;

        let mut stats = HomeworkStats {
            total: 0,
            pending: 0,
            reviewed: 0,
            graded: 0,
        };
        for (status, count) in rows {
            stats.total += count;
            match status.as_str() {
                SubmissionStatus::PENDING => stats.pending = count,
                SubmissionStatus::REVIEWED => stats.reviewed = count,
                SubmissionStatus::GRADED => stats.graded = count,
                _ => {}
            }
        }

        Ok(stats)
    }

    /// 更新作业（部分更新：缺省字段保持不变）
    pub async fn update_homework_impl(
        &self,
        homework_id: i64,
        teacher_id: i64,
        update: UpdateHomeworkRequest,
    ) -> Result<Homework> {
        let existing = Homeworks::find_by_id(homework_id)
            .one(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询作业失败: {e}")))?
            .ok_or_else(|| EduProofError::assignment_not_found("作业不存在"))?;

        // 所有权校验：只有布置作业的教师可以修改
        if existing.teacher_id != teacher_id {
            return Err(EduProofError::not_homework_owner("只能修改自己布置的作业"));
        }

        let mut active: ActiveModel = existing.into();
        if let Some(subject) = update.subject {
            active.subject = Set(Some(subject));
        }
        if let Some(textbook_id) = update.textbook_id {
            active.textbook_id = Set(Some(textbook_id));
        }
        if let Some(page_range) = update.page_range {
            active.page_range = Set(Some(page_range));
        }
        if let Some(title) = update.title {
            active.title = Set(title);
        }
        if let Some(description) = update.description {
            active.description = Set(Some(description));
        }
        if let Some(due_at) = update.due_at {
            active.due_at = Set(due_at.timestamp());
        }
        active.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("更新作业失败: {e}")))?;

        Ok(updated.into_homework())
    }

    /// 删除作业并级联删除其全部提交
    ///
    /// 单事务执行，要么全部删除要么全部保留。
    pub async fn delete_homework_cascade_impl(
        &self,
        homework_id: i64,
        teacher_id: i64,
    ) -> Result<()> {
        let existing = Homeworks::find_by_id(homework_id)
            .one(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询作业失败: {e}")))?
            .ok_or_else(|| EduProofError::assignment_not_found("作业不存在"))?;

        if existing.teacher_id != teacher_id {
            return Err(EduProofError::not_homework_owner("只能删除自己布置的作业"));
        }

        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    Submissions::delete_many()
                        .filter(SubmissionColumn::HomeworkId.eq(homework_id))
                        .exec(txn)
                        .await?;

                    Homeworks::delete_by_id(homework_id).exec(txn).await?;

                    Ok(())
                })
            })
            .await
            .map_err(|e| EduProofError::database_operation(format!("删除作业失败: {e}")))?;

        Ok(())
    }

    /// 列出教师布置的作业（按截止时间倒序）
    pub async fn list_homeworks_by_teacher_impl(
        &self,
        teacher_id: i64,
        class_id: Option<i64>,
        page: i64,
        size: i64,
    ) -> Result<HomeworkListResponse> {
        let page = page.max(1) as u64;
        let size = size.clamp(1, 100) as u64;

        let mut select = Homeworks::find().filter(Column::TeacherId.eq(teacher_id));

        if let Some(class_id) = class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        select = select.order_by_desc(Column::DueAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询作业总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询作业页数失败: {e}")))?;

        let homeworks = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(HomeworkListResponse {
            items: homeworks.into_iter().map(|m| m.into_homework()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 列出班级的作业（按创建时间倒序）
    pub async fn list_homeworks_by_class_impl(
        &self,
        class_id: i64,
        subject: Option<String>,
        page: i64,
        size: i64,
    ) -> Result<HomeworkListResponse> {
        let page = page.max(1) as u64;
        let size = size.clamp(1, 100) as u64;

        let mut select = Homeworks::find().filter(Column::ClassId.eq(class_id));

        if let Some(ref subject) = subject {
            select = select.filter(Column::Subject.eq(subject));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询作业总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询作业页数失败: {e}")))?;

        let homeworks = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(HomeworkListResponse {
            items: homeworks.into_iter().map(|m| m.into_homework()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 列出学生未提交且未截止的作业
    ///
    /// 对提交表做反连接：已有该学生提交的作业不出现在结果中。
    pub async fn list_pending_homeworks_for_student_impl(
        &self,
        student_id: i64,
        class_id: i64,
        page: i64,
        size: i64,
    ) -> Result<Vec<Homework>> {
        let page = page.max(1) as u64;
        let size = size.clamp(1, 100) as u64;
        let now = chrono::Utc::now().timestamp();

        // 该学生已提交过的作业 ID
        let submitted: Vec<i64> = Submissions::find()
            .select_only()
            .column(SubmissionColumn::HomeworkId)
            .filter(SubmissionColumn::StudentId.eq(student_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询提交记录失败: {e}")))?;

        let mut select = Homeworks::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::DueAt.gte(now));

        if !submitted.is_empty() {
            select = select.filter(Column::Id.is_not_in(submitted));
        }

        let homeworks = select
            .order_by_asc(Column::DueAt)
            .paginate(&self.db, size)
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询待交作业失败: {e}")))?;

        Ok(homeworks.into_iter().map(|m| m.into_homework()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::test_support::{
        seed_class, seed_homework, seed_user, submission_request,
    };
    use crate::models::users::entities::UserRole;

    #[tokio::test]
    async fn test_update_requires_ownership() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let class_id = seed_class(&storage, "Class A").await;
        let teacher = seed_user(&storage, "t1@example.com", UserRole::Teacher, None).await;
        let other_teacher = seed_user(&storage, "t2@example.com", UserRole::Teacher, None).await;
        let homework_id = seed_homework(&storage, teacher, class_id, 3600).await;

        let err = storage
            .update_homework_impl(
                homework_id,
                other_teacher,
                UpdateHomeworkRequest {
                    title: Some("Hijacked".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), "NOT_HOMEWORK_OWNER");

        // 所有者本人可以修改
        let updated = storage
            .update_homework_impl(
                homework_id,
                teacher,
                UpdateHomeworkRequest {
                    title: Some("Revised".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Revised");
    }

    #[tokio::test]
    async fn test_partial_update_leaves_absent_fields_untouched() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let class_id = seed_class(&storage, "Class A").await;
        let teacher = seed_user(&storage, "t1@example.com", UserRole::Teacher, None).await;
        let homework_id = seed_homework(&storage, teacher, class_id, 3600).await;

        let before = storage
            .get_homework_by_id_impl(homework_id)
            .await
            .unwrap()
            .unwrap();

        let updated = storage
            .update_homework_impl(
                homework_id,
                teacher,
                UpdateHomeworkRequest {
                    description: Some("Read carefully".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.description.as_deref(), Some("Read carefully"));
        assert_eq!(updated.title, before.title);
        assert_eq!(updated.subject, before.subject);
        assert_eq!(updated.due_at, before.due_at);
    }

    #[tokio::test]
    async fn test_update_missing_homework() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let err = storage
            .update_homework_impl(999, 1, UpdateHomeworkRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "ASSIGNMENT_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_cascade_delete_removes_all_submissions() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let class_id = seed_class(&storage, "Class A").await;
        let teacher = seed_user(&storage, "t@example.com", UserRole::Teacher, None).await;
        let homework_id = seed_homework(&storage, teacher, class_id, 3600).await;

        for i in 0..3 {
            let student = seed_user(
                &storage,
                &format!("s{i}@example.com"),
                UserRole::Student,
                Some(class_id),
            )
            .await;
            storage
                .create_submission_impl(student, submission_request(homework_id))
                .await
                .unwrap();
        }

        // 非所有者删除被拒绝，提交全部保留
        let stranger = seed_user(&storage, "t2@example.com", UserRole::Teacher, None).await;
        let err = storage
            .delete_homework_cascade_impl(homework_id, stranger)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "NOT_HOMEWORK_OWNER");
        assert_eq!(
            storage.get_homework_stats_impl(homework_id).await.unwrap().total,
            3
        );

        // 所有者删除后作业与提交一并消失
        storage
            .delete_homework_cascade_impl(homework_id, teacher)
            .await
            .unwrap();
        assert!(
            storage
                .get_homework_by_id_impl(homework_id)
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(
            storage.get_homework_stats_impl(homework_id).await.unwrap().total,
            0
        );
    }

    #[tokio::test]
    async fn test_stats_group_by_status() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let class_id = seed_class(&storage, "Class A").await;
        let teacher = seed_user(&storage, "t@example.com", UserRole::Teacher, None).await;
        let homework_id = seed_homework(&storage, teacher, class_id, 3600).await;

        let s1 = seed_user(&storage, "s1@example.com", UserRole::Student, Some(class_id)).await;
        let s2 = seed_user(&storage, "s2@example.com", UserRole::Student, Some(class_id)).await;
        let s3 = seed_user(&storage, "s3@example.com", UserRole::Student, Some(class_id)).await;

        let sub1 = storage
            .create_submission_impl(s1, submission_request(homework_id))
            .await
            .unwrap();
        let sub2 = storage
            .create_submission_impl(s2, submission_request(homework_id))
            .await
            .unwrap();
        storage
            .create_submission_impl(s3, submission_request(homework_id))
            .await
            .unwrap();

        storage
            .grade_submission_impl(sub1.id, teacher, 92.0, None)
            .await
            .unwrap();
        storage
            .add_submission_feedback_impl(sub2.id, teacher, "再检查一下".to_string())
            .await
            .unwrap();

        let stats = storage.get_homework_stats_impl(homework_id).await.unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.reviewed, 1);
        assert_eq!(stats.graded, 1);
    }

    #[tokio::test]
    async fn test_pending_for_student_anti_join() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let class_id = seed_class(&storage, "Class A").await;
        let teacher = seed_user(&storage, "t@example.com", UserRole::Teacher, None).await;
        let student = seed_user(&storage, "s@example.com", UserRole::Student, Some(class_id)).await;

        let open_hw = seed_homework(&storage, teacher, class_id, 3600).await;
        let submitted_hw = seed_homework(&storage, teacher, class_id, 3600).await;
        // 已截止的作业不算待交
        seed_homework(&storage, teacher, class_id, -3600).await;

        storage
            .create_submission_impl(student, submission_request(submitted_hw))
            .await
            .unwrap();

        let pending = storage
            .list_pending_homeworks_for_student_impl(student, class_id, 1, 10)
            .await
            .unwrap();

        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, open_hw);
    }
}
