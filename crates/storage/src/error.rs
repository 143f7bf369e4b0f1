// SPDX-License-Identifier: MIT

#[derive(Debug, Clone, thiserror::Error)]
pub enum StorageError {
    #[error("task '{0}' not found")]
    TaskNotFound(String),

    #[error("context '{0}' not found")]
    ContextNotFound(String),
}
