use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatcherConfig {
    /// 单次调度流程的整体截止时间
    pub pipeline_timeout_seconds: u64,
    /// 并发查询各医院救护车的上限
    pub max_concurrent_lookups: usize,
    /// 案例保存失败时是否释放已预留的救护车
    pub release_on_case_failure: bool,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            pipeline_timeout_seconds: 20,
            max_concurrent_lookups: 8,
            release_on_case_failure: true,
        }
    }
}

impl DispatcherConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.pipeline_timeout_seconds == 0 {
            return Err(anyhow::anyhow!("调度流程超时时间必须大于0"));
        }

        if self.max_concurrent_lookups == 0 {
            return Err(anyhow::anyhow!("最大并发查询数必须大于0"));
        }

        Ok(())
    }
}
