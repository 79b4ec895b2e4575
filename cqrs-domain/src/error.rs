//! 领域层统一错误定义
//!
//! 聚焦序列化、事件发布、存储（事件/命令/聚合）与状态校验等最小必要集合，
//! 便于在各实现层统一转换为 `DomainError`。
//!
use thiserror::Error;

/// 统一错误类型（基础库最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 序列化 ---
    #[error("serialization error: {source}")]
    Serde {
        #[from]
        source: serde_json::Error,
    },

    // --- 事件发布 ---
    #[error("event publisher error: {reason}")]
    EventPublisher { reason: String },

    // --- 存储/持久化 ---
    #[error("event store error: {reason}")]
    EventStore { reason: String },
    #[error("command store error: {reason}")]
    CommandStore { reason: String },
    #[error("aggregate store error: {reason}")]
    AggregateStore { reason: String },
    #[error("version conflict: aggregate={aggregate_id}, expected={expected}, actual={actual}")]
    VersionConflict {
        aggregate_id: String,
        expected: usize,
        actual: usize,
    },

    // --- 领域规则/命令与状态 ---
    #[error("invalid command: {reason}")]
    InvalidCommand { reason: String },
    #[error("invalid state: {reason}")]
    InvalidState { reason: String },
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;
