//! 提交存储操作：提交生命周期状态机
//!
//! 状态沿偏序 pending < reviewed、pending < graded 前进，pending 不会被
//! 重新进入。所有前置条件按固定顺序检查，第一个失败即返回；
//! (homework_id, student_id) 的唯一性由数据库唯一索引兜底，
//! 并发提交不会绕过先查后插的竞态。

use super::SeaOrmStorage;
use crate::entity::homeworks::{Column as HomeworkColumn, Entity as Homeworks};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{EduProofError, Result};
use crate::models::{
    PaginationInfo,
    submissions::{
        entities::{Submission, SubmissionStatus},
        requests::{CreateSubmissionRequest, SubmissionListQuery},
        responses::{StudentStats, SubmissionListResponse},
    },
};
use crate::utils::validate::validate_grade;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, SqlErr,
};

/// 截止时间为包含边界：恰好等于截止时间的提交有效
fn deadline_passed(now_ts: i64, due_ts: i64) -> bool {
    now_ts > due_ts
}

impl SeaOrmStorage {
    /// 创建提交
    ///
    /// 前置条件按顺序检查，第一个失败即返回：
    /// 1. 作业存在 -> ASSIGNMENT_NOT_FOUND
    /// 2. 该学生尚未提交过 -> ALREADY_SUBMITTED
    /// 3. 未过截止时间（包含边界） -> PAST_DUE_DATE
    pub async fn create_submission_impl(
        &self,
        student_id: i64,
        req: CreateSubmissionRequest,
    ) -> Result<Submission> {
        // 1. 作业必须存在
        let homework = Homeworks::find_by_id(req.homework_id)
            .one(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询作业失败: {e}")))?
            .ok_or_else(|| EduProofError::assignment_not_found("作业不存在"))?;

        // 2. 同一学生对同一作业只能提交一次
        let existing = Submissions::find()
            .filter(Column::HomeworkId.eq(req.homework_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询提交失败: {e}")))?;
        if existing.is_some() {
            return Err(EduProofError::already_submitted("该作业已提交过"));
        }

        // 3. 截止时间检查
        let now = chrono::Utc::now();
        if deadline_passed(now.timestamp(), homework.due_at) {
            return Err(EduProofError::past_due_date("作业已过截止时间"));
        }

        let model = ActiveModel {
            homework_id: Set(req.homework_id),
            student_id: Set(student_id),
            file_url: Set(req.file_url),
            file_kind: Set(req.file_kind.to_string()),
            status: Set(SubmissionStatus::Pending.to_string()),
            submitted_at: Set(now.timestamp()),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(m) => Ok(m.into_submission()),
            Err(e) => match e.sql_err() {
                // 并发提交竞态：另一请求先行插入，唯一索引兜底
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Err(EduProofError::already_submitted("该作业已提交过"))
                }
                _ => Err(EduProofError::database_operation(format!(
                    "创建提交失败: {e}"
                ))),
            },
        }
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 查找提交并校验操作者是其作业的布置教师
    async fn find_owned_submission(
        &self,
        submission_id: i64,
        teacher_id: i64,
    ) -> Result<crate::entity::submissions::Model> {
        let submission = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询提交失败: {e}")))?
            .ok_or_else(|| EduProofError::submission_not_found("提交不存在"))?;

        let homework = Homeworks::find_by_id(submission.homework_id)
            .one(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询作业失败: {e}")))?
            .ok_or_else(|| EduProofError::assignment_not_found("作业不存在"))?;

        if homework.teacher_id != teacher_id {
            return Err(EduProofError::not_homework_owner("只能批改自己布置的作业"));
        }

        Ok(submission)
    }

    /// 评分（-> graded）
    ///
    /// 可重复调用，新的分数覆盖旧的。分数范围在任何读写之前校验，
    /// 越界分数不会产生部分写入。
    pub async fn grade_submission_impl(
        &self,
        submission_id: i64,
        teacher_id: i64,
        grade: f64,
        feedback: Option<String>,
    ) -> Result<Submission> {
        validate_grade(grade).map_err(EduProofError::validation)?;

        let submission = self.find_owned_submission(submission_id, teacher_id).await?;

        let mut active: ActiveModel = submission.into();
        active.grade = Set(Some(grade));
        if let Some(feedback) = feedback {
            active.teacher_feedback = Set(Some(feedback));
        }
        active.status = Set(SubmissionStatus::Graded.to_string());
        active.reviewed_at = Set(Some(chrono::Utc::now().timestamp()));

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("评分失败: {e}")))?;

        Ok(updated.into_submission())
    }

    /// 留言（-> reviewed）
    ///
    /// 已 graded 的提交保持 graded，只更新留言与 reviewed_at；
    /// 状态不从 graded 退回 reviewed。
    pub async fn add_submission_feedback_impl(
        &self,
        submission_id: i64,
        teacher_id: i64,
        feedback: String,
    ) -> Result<Submission> {
        if feedback.trim().is_empty() {
            return Err(EduProofError::validation("留言内容不能为空"));
        }

        let submission = self.find_owned_submission(submission_id, teacher_id).await?;
        let already_graded = submission.status == SubmissionStatus::Graded.to_string();

        let mut active: ActiveModel = submission.into();
        active.teacher_feedback = Set(Some(feedback));
        if !already_graded {
            active.status = Set(SubmissionStatus::Reviewed.to_string());
        }
        active.reviewed_at = Set(Some(chrono::Utc::now().timestamp()));

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("留言失败: {e}")))?;

        Ok(updated.into_submission())
    }

    /// 删除提交（撤回）
    ///
    /// 仅提交者本人、仅 pending 状态可删除。提交不拥有任何下级资源，
    /// 没有级联。
    pub async fn delete_submission_impl(&self, submission_id: i64, student_id: i64) -> Result<()> {
        let submission = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询提交失败: {e}")))?
            .ok_or_else(|| EduProofError::submission_not_found("提交不存在"))?;

        if submission.student_id != student_id {
            return Err(EduProofError::not_submission_owner("只能撤回自己的提交"));
        }

        if submission.status != SubmissionStatus::Pending.to_string() {
            return Err(EduProofError::cannot_delete_graded(
                "已批改或已留言的提交不能撤回",
            ));
        }

        Submissions::delete_by_id(submission_id)
            .exec(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("撤回提交失败: {e}")))?;

        Ok(())
    }

    /// 写入 AI 分析结果（原样存储，不校验内部结构）
    pub async fn set_submission_analysis_impl(
        &self,
        submission_id: i64,
        analysis: serde_json::Value,
    ) -> Result<bool> {
        let payload = serde_json::to_string(&analysis)
            .map_err(|e| EduProofError::serialization(format!("序列化分析结果失败: {e}")))?;

        let result = Submissions::update_many()
            .col_expr(Column::AiAnalysis, sea_orm::sea_query::Expr::value(payload))
            .filter(Column::Id.eq(submission_id))
            .exec(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("写入分析结果失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 列出提交（分页）
    pub async fn list_submissions_with_pagination_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Submissions::find();

        // 作业筛选
        if let Some(homework_id) = query.homework_id {
            select = select.filter(Column::HomeworkId.eq(homework_id));
        }

        // 提交者筛选
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        // 状态筛选
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        // 排序
        select = select.order_by_desc(Column::SubmittedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询提交总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询提交页数失败: {e}")))?;

        let submissions = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(SubmissionListResponse {
            items: submissions.into_iter().map(|m| m.into_submission()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 教师的待批改队列
    ///
    /// 跨作业所有权连接，status=pending，按提交时间升序（先交先批）。
    pub async fn list_pending_submissions_for_teacher_impl(
        &self,
        teacher_id: i64,
        page: i64,
        size: i64,
    ) -> Result<Vec<Submission>> {
        let page = page.max(1) as u64;
        let size = size.clamp(1, 100) as u64;

        // 该教师布置的作业 ID
        let homework_ids: Vec<i64> = Homeworks::find()
            .select_only()
            .column(HomeworkColumn::Id)
            .filter(HomeworkColumn::TeacherId.eq(teacher_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询作业失败: {e}")))?;

        if homework_ids.is_empty() {
            return Ok(vec![]);
        }

        let submissions = Submissions::find()
            .filter(Column::HomeworkId.is_in(homework_ids))
            .filter(Column::Status.eq(SubmissionStatus::Pending.to_string()))
            .order_by_asc(Column::SubmittedAt)
            .order_by_asc(Column::Id)
            .paginate(&self.db, size)
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询待批改队列失败: {e}")))?;

        Ok(submissions.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 学生提交统计
    ///
    /// average_grade 仅对有分数的提交取平均，一个分数都没有时为 None。
    pub async fn student_submission_stats_impl(&self, student_id: i64) -> Result<StudentStats> {
        let submissions = Submissions::find()
            .filter(Column::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| EduProofError::database_operation(format!("查询提交失败: {e}")))?;

        let mut stats = StudentStats {
            total: submissions.len() as i64,
            pending: 0,
            reviewed: 0,
            graded: 0,
            average_grade: None,
        };

        let mut grades: Vec<f64> = Vec::new();
        for submission in &submissions {
            match submission.status.as_str() {
                SubmissionStatus::PENDING => stats.pending += 1,
                SubmissionStatus::REVIEWED => stats.reviewed += 1,
                SubmissionStatus::GRADED => stats.graded += 1,
                _ => {}
            }
            if let Some(grade) = submission.grade {
                grades.push(grade);
            }
        }

        if !grades.is_empty() {
            stats.average_grade = Some(grades.iter().sum::<f64>() / grades.len() as f64);
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::entities::FileKind;
    use crate::storage::sea_orm_storage::test_support::{
        seed_class, seed_homework, seed_user, submission_request,
    };
    use crate::models::users::entities::UserRole;
    use std::sync::Arc;

    async fn setup() -> (SeaOrmStorage, i64, i64, i64) {
        let storage = SeaOrmStorage::new_in_memory().await;
        let class_id = seed_class(&storage, "Class A").await;
        let teacher = seed_user(&storage, "teacher@example.com", UserRole::Teacher, None).await;
        let student = seed_user(
            &storage,
            "student@example.com",
            UserRole::Student,
            Some(class_id),
        )
        .await;
        (storage, class_id, teacher, student)
    }

    #[test]
    fn test_deadline_boundary_is_inclusive() {
        // 恰好等于截止时间的提交有效
        assert!(!deadline_passed(1000, 1000));
        assert!(!deadline_passed(999, 1000));
        assert!(deadline_passed(1001, 1000));
    }

    #[tokio::test]
    async fn test_submit_creates_pending_submission() {
        let (storage, class_id, teacher, student) = setup().await;
        let homework_id = seed_homework(&storage, teacher, class_id, 3600).await;

        let submission = storage
            .create_submission_impl(student, submission_request(homework_id))
            .await
            .unwrap();

        assert_eq!(submission.status, SubmissionStatus::Pending);
        assert_eq!(submission.file_kind, FileKind::Pdf);
        assert!(submission.grade.is_none());
        assert!(submission.reviewed_at.is_none());
    }

    #[tokio::test]
    async fn test_submit_missing_assignment() {
        let (storage, _class_id, _teacher, student) = setup().await;
        let err = storage
            .create_submission_impl(student, submission_request(999))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "ASSIGNMENT_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_submit_twice_conflicts() {
        let (storage, class_id, teacher, student) = setup().await;
        let homework_id = seed_homework(&storage, teacher, class_id, 3600).await;

        storage
            .create_submission_impl(student, submission_request(homework_id))
            .await
            .unwrap();
        let err = storage
            .create_submission_impl(student, submission_request(homework_id))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "ALREADY_SUBMITTED");
    }

    #[tokio::test]
    async fn test_duplicate_check_precedes_deadline_check() {
        let (storage, class_id, teacher, student) = setup().await;
        let homework_id = seed_homework(&storage, teacher, class_id, 3600).await;

        storage
            .create_submission_impl(student, submission_request(homework_id))
            .await
            .unwrap();

        // 截止时间移到过去后重复提交：先报 ALREADY_SUBMITTED 而不是 PAST_DUE_DATE
        storage
            .update_homework_impl(
                homework_id,
                teacher,
                crate::models::homeworks::requests::UpdateHomeworkRequest {
                    due_at: Some(chrono::Utc::now() - chrono::Duration::hours(1)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let err = storage
            .create_submission_impl(student, submission_request(homework_id))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "ALREADY_SUBMITTED");
    }

    #[tokio::test]
    async fn test_submit_past_due_date() {
        let (storage, class_id, teacher, student) = setup().await;
        let homework_id = seed_homework(&storage, teacher, class_id, -3600).await;

        let err = storage
            .create_submission_impl(student, submission_request(homework_id))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "PAST_DUE_DATE");
    }

    #[tokio::test]
    async fn test_concurrent_submits_yield_single_submission() {
        let (storage, class_id, teacher, student) = setup().await;
        let homework_id = seed_homework(&storage, teacher, class_id, 3600).await;
        let storage = Arc::new(storage);

        let a = {
            let storage = storage.clone();
            tokio::spawn(async move {
                storage
                    .create_submission_impl(student, submission_request(homework_id))
                    .await
            })
        };
        let b = {
            let storage = storage.clone();
            tokio::spawn(async move {
                storage
                    .create_submission_impl(student, submission_request(homework_id))
                    .await
            })
        };

        let results = [a.await.unwrap(), b.await.unwrap()];
        let ok_count = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(ok_count, 1, "exactly one concurrent submit must win");
        for result in results {
            if let Err(err) = result {
                assert_eq!(err.code(), "ALREADY_SUBMITTED");
            }
        }

        // 最终只存在一条提交
        let listed = storage
            .list_submissions_with_pagination_impl(SubmissionListQuery {
                homework_id: Some(homework_id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(listed.pagination.total, 1);
    }

    #[tokio::test]
    async fn test_grade_out_of_range_leaves_no_partial_write() {
        let (storage, class_id, teacher, student) = setup().await;
        let homework_id = seed_homework(&storage, teacher, class_id, 3600).await;
        let submission = storage
            .create_submission_impl(student, submission_request(homework_id))
            .await
            .unwrap();

        for bad in [-1.0, 100.5, f64::NAN] {
            let err = storage
                .grade_submission_impl(submission.id, teacher, bad, None)
                .await
                .unwrap_err();
            assert_eq!(err.code(), "VALIDATION");
        }

        // 状态与分数均未变化
        let reloaded = storage
            .get_submission_by_id_impl(submission.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.status, SubmissionStatus::Pending);
        assert!(reloaded.grade.is_none());
        assert!(reloaded.reviewed_at.is_none());
    }

    #[tokio::test]
    async fn test_grade_requires_homework_ownership() {
        let (storage, class_id, teacher, student) = setup().await;
        let homework_id = seed_homework(&storage, teacher, class_id, 3600).await;
        let submission = storage
            .create_submission_impl(student, submission_request(homework_id))
            .await
            .unwrap();

        let other_teacher = seed_user(&storage, "t2@example.com", UserRole::Teacher, None).await;
        let err = storage
            .grade_submission_impl(submission.id, other_teacher, 90.0, Some("Great".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "NOT_HOMEWORK_OWNER");
    }

    #[tokio::test]
    async fn test_grade_transitions_and_regrade_overwrites() {
        let (storage, class_id, teacher, student) = setup().await;
        let homework_id = seed_homework(&storage, teacher, class_id, 3600).await;
        let submission = storage
            .create_submission_impl(student, submission_request(homework_id))
            .await
            .unwrap();

        let graded = storage
            .grade_submission_impl(submission.id, teacher, 88.0, Some("Well done".to_string()))
            .await
            .unwrap();
        assert_eq!(graded.status, SubmissionStatus::Graded);
        assert_eq!(graded.grade, Some(88.0));
        assert_eq!(graded.teacher_feedback.as_deref(), Some("Well done"));
        assert!(graded.reviewed_at.is_some());

        // 重复评分覆盖旧分数
        let regraded = storage
            .grade_submission_impl(submission.id, teacher, 95.0, None)
            .await
            .unwrap();
        assert_eq!(regraded.grade, Some(95.0));
        assert_eq!(regraded.status, SubmissionStatus::Graded);
    }

    #[tokio::test]
    async fn test_feedback_transitions_to_reviewed() {
        let (storage, class_id, teacher, student) = setup().await;
        let homework_id = seed_homework(&storage, teacher, class_id, 3600).await;
        let submission = storage
            .create_submission_impl(student, submission_request(homework_id))
            .await
            .unwrap();

        let reviewed = storage
            .add_submission_feedback_impl(submission.id, teacher, "字迹工整".to_string())
            .await
            .unwrap();
        assert_eq!(reviewed.status, SubmissionStatus::Reviewed);
        assert!(reviewed.grade.is_none());
        assert!(reviewed.reviewed_at.is_some());

        // 留言后评分：reviewed -> graded
        let graded = storage
            .grade_submission_impl(submission.id, teacher, 80.0, None)
            .await
            .unwrap();
        assert_eq!(graded.status, SubmissionStatus::Graded);
    }

    #[tokio::test]
    async fn test_feedback_does_not_regress_graded() {
        let (storage, class_id, teacher, student) = setup().await;
        let homework_id = seed_homework(&storage, teacher, class_id, 3600).await;
        let submission = storage
            .create_submission_impl(student, submission_request(homework_id))
            .await
            .unwrap();

        storage
            .grade_submission_impl(submission.id, teacher, 77.0, None)
            .await
            .unwrap();
        let after_feedback = storage
            .add_submission_feedback_impl(submission.id, teacher, "注意第3题".to_string())
            .await
            .unwrap();

        // graded 不退回 reviewed，分数保留
        assert_eq!(after_feedback.status, SubmissionStatus::Graded);
        assert_eq!(after_feedback.grade, Some(77.0));
        assert_eq!(after_feedback.teacher_feedback.as_deref(), Some("注意第3题"));
    }

    #[tokio::test]
    async fn test_empty_feedback_rejected() {
        let (storage, class_id, teacher, student) = setup().await;
        let homework_id = seed_homework(&storage, teacher, class_id, 3600).await;
        let submission = storage
            .create_submission_impl(student, submission_request(homework_id))
            .await
            .unwrap();

        let err = storage
            .add_submission_feedback_impl(submission.id, teacher, "   ".to_string())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION");
    }

    #[tokio::test]
    async fn test_delete_only_when_pending() {
        let (storage, class_id, teacher, student) = setup().await;
        let homework_id = seed_homework(&storage, teacher, class_id, 3600).await;
        let submission = storage
            .create_submission_impl(student, submission_request(homework_id))
            .await
            .unwrap();

        // 非本人删除被拒绝
        let other_student = seed_user(
            &storage,
            "s2@example.com",
            UserRole::Student,
            Some(class_id),
        )
        .await;
        let err = storage
            .delete_submission_impl(submission.id, other_student)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "NOT_SUBMISSION_OWNER");

        // 批改后的提交不能撤回
        storage
            .grade_submission_impl(submission.id, teacher, 60.0, None)
            .await
            .unwrap();
        let err = storage
            .delete_submission_impl(submission.id, student)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "CANNOT_DELETE_GRADED");

        // pending 状态可以撤回
        let homework2 = seed_homework(&storage, teacher, class_id, 3600).await;
        let submission2 = storage
            .create_submission_impl(student, submission_request(homework2))
            .await
            .unwrap();
        storage
            .delete_submission_impl(submission2.id, student)
            .await
            .unwrap();
        assert!(
            storage
                .get_submission_by_id_impl(submission2.id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_delete_reviewed_also_rejected() {
        let (storage, class_id, teacher, student) = setup().await;
        let homework_id = seed_homework(&storage, teacher, class_id, 3600).await;
        let submission = storage
            .create_submission_impl(student, submission_request(homework_id))
            .await
            .unwrap();

        storage
            .add_submission_feedback_impl(submission.id, teacher, "已查收".to_string())
            .await
            .unwrap();
        let err = storage
            .delete_submission_impl(submission.id, student)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "CANNOT_DELETE_GRADED");
    }

    #[tokio::test]
    async fn test_analysis_stored_verbatim() {
        let (storage, class_id, teacher, student) = setup().await;
        let homework_id = seed_homework(&storage, teacher, class_id, 3600).await;
        let submission = storage
            .create_submission_impl(student, submission_request(homework_id))
            .await
            .unwrap();

        let payload = serde_json::json!({
            "suggested_grade": 85.5,
            "flagged_errors": ["第2题符号错误"],
            "provider": "openai",
        });
        assert!(
            storage
                .set_submission_analysis_impl(submission.id, payload.clone())
                .await
                .unwrap()
        );

        let reloaded = storage
            .get_submission_by_id_impl(submission.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.ai_analysis, Some(payload));
        // 分析结果不影响状态机
        assert_eq!(reloaded.status, SubmissionStatus::Pending);
    }

    #[tokio::test]
    async fn test_pending_queue_is_fifo() {
        let (storage, class_id, teacher, _student) = setup().await;
        let homework_id = seed_homework(&storage, teacher, class_id, 3600).await;

        let mut expected = Vec::new();
        for i in 0..3 {
            let student = seed_user(
                &storage,
                &format!("fifo{i}@example.com"),
                UserRole::Student,
                Some(class_id),
            )
            .await;
            let submission = storage
                .create_submission_impl(student, submission_request(homework_id))
                .await
                .unwrap();
            expected.push(submission.id);
        }

        // 其中一条被批改后不再出现在队列里
        storage
            .grade_submission_impl(expected[1], teacher, 70.0, None)
            .await
            .unwrap();

        let queue = storage
            .list_pending_submissions_for_teacher_impl(teacher, 1, 10)
            .await
            .unwrap();
        let ids: Vec<i64> = queue.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![expected[0], expected[2]]);
    }

    #[tokio::test]
    async fn test_student_stats_average_over_graded_only() {
        let (storage, class_id, teacher, student) = setup().await;

        // 没有任何提交时平均分为 None
        let empty = storage.student_submission_stats_impl(student).await.unwrap();
        assert_eq!(empty.total, 0);
        assert!(empty.average_grade.is_none());

        let hw1 = seed_homework(&storage, teacher, class_id, 3600).await;
        let hw2 = seed_homework(&storage, teacher, class_id, 3600).await;
        let hw3 = seed_homework(&storage, teacher, class_id, 3600).await;

        let sub1 = storage
            .create_submission_impl(student, submission_request(hw1))
            .await
            .unwrap();
        let sub2 = storage
            .create_submission_impl(student, submission_request(hw2))
            .await
            .unwrap();
        storage
            .create_submission_impl(student, submission_request(hw3))
            .await
            .unwrap();

        storage
            .grade_submission_impl(sub1.id, teacher, 80.0, None)
            .await
            .unwrap();
        storage
            .grade_submission_impl(sub2.id, teacher, 90.0, None)
            .await
            .unwrap();

        let stats = storage.student_submission_stats_impl(student).await.unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.graded, 2);
        assert_eq!(stats.average_grade, Some(85.0));
    }
}
