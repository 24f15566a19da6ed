pub mod cases;
pub mod dispatch;
pub mod health;
pub mod metrics;
