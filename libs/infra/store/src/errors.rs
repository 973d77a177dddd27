// [libs/infra/store/src/errors.rs]
/*!
 * APARATO: STORE ERROR CATALOG (V1.0)
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("[L3_STORE_NET_FAULT]: DATABASE_UPLINK_SEVERED -> {0}")]
    ConnectionError(String),

    #[error("[L3_STORE_CONFIG_FAULT]: STRATEGIC_ENV_VOID -> {0}")]
    ConfigurationError(String),

    #[error("[L3_STORE_QUERY_FAULT]: SQL_QUERY_REJECTED -> {0}")]
    QueryError(#[from] libsql::Error),

    #[error("[L3_STORE_MAPPING_FAULT]: DATA_MAPPING_VIOLATION -> {0}")]
    MappingError(String),

    #[error("[L3_ACCOUNT_FAULT]: ACCOUNT_NOT_FOUND")]
    AccountNotFound,

    #[error("[L3_NODE_FAULT]: NODE_NOT_FOUND")]
    NodeNotFound,

    #[error("[L3_TASK_FAULT]: TASK_NOT_FOUND")]
    TaskNotFound,

    #[error("[L3_SUBTASK_FAULT]: SUBTASK_NOT_FOUND")]
    SubtaskNotFound,

    #[error("[L3_ENROLLMENT_FAULT]: TOKEN_ALREADY_CONSUMED_OR_UNKNOWN")]
    EnrollmentTokenRejected,
}
