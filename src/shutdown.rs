use tokio::sync::broadcast;
use tracing::{debug, info};

/// 优雅关闭管理器
///
/// 所有订阅者共享同一个广播通道，关闭只会触发一次。
#[derive(Clone)]
pub struct ShutdownManager {
    shutdown_tx: broadcast::Sender<()>,
}

impl ShutdownManager {
    pub fn new() -> Self {
        let (shutdown_tx, _) = broadcast::channel(4);
        Self { shutdown_tx }
    }

    /// 订阅关闭信号
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// 触发关闭
    pub fn shutdown(&self) {
        match self.shutdown_tx.send(()) {
            Ok(receivers) => info!(receivers, "关闭信号已发送"),
            Err(_) => debug!("没有关闭信号的订阅者"),
        }
    }
}

impl Default for ShutdownManager {
    fn default() -> Self {
        Self::new()
    }
}
