use async_trait::async_trait;

use crate::{errors::CoordinatorResult, models::Case};

/// 调度案例仓储接口
///
/// 调度协调器只调用 `create_case`，其余方法服务于案例管理接口。
#[async_trait]
pub trait CaseStore: Send + Sync {
    /// 持久化新案例并返回带有分配id的记录
    async fn create_case(&self, case: &Case) -> CoordinatorResult<Case>;

    /// 根据id查询案例
    async fn get_case(&self, id: i64) -> CoordinatorResult<Option<Case>>;

    /// 按id升序列出所有案例
    async fn list_cases(&self) -> CoordinatorResult<Vec<Case>>;

    /// 整体替换已有案例，案例不存在时返回 `DispatchError::CaseNotFound`
    async fn update_case(&self, case: &Case) -> CoordinatorResult<Case>;
}
