use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Query execution error: {0}")]
    Query(#[from] sqlx::Error),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Uniform error shape handed to callers: stable code, readable message and
/// whatever detail/hint the backend attached.
#[derive(Debug, Clone)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    pub detail: Option<String>,
    pub hint: Option<String>,
}

impl DbError {
    /// The SQLSTATE code of the underlying database error, if there is one.
    pub fn pg_code(&self) -> Option<String> {
        match self {
            Self::Query(e) => e
                .as_database_error()
                .and_then(|db| db.code().map(|c| c.to_string())),
            _ => None,
        }
    }

    fn code_matches(&self, codes: &[&str]) -> bool {
        match self.pg_code() {
            Some(code) => codes.contains(&code.as_str()),
            None => false,
        }
    }

    /// Authentication / authorization failures reported by the backend.
    pub fn is_auth_error(&self) -> bool {
        // invalid_authorization_specification, invalid_password
        self.code_matches(&["28000", "28P01"])
    }

    /// Row-level-security / privilege violations.
    pub fn is_rls_violation(&self) -> bool {
        // insufficient_privilege
        self.code_matches(&["42501"])
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::Query(sqlx::Error::RowNotFound)
        )
    }

    pub fn is_unique_violation(&self) -> bool {
        self.code_matches(&["23505"])
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        self.code_matches(&["23503"])
    }

    pub fn is_check_violation(&self) -> bool {
        self.code_matches(&["23514"])
    }

    pub fn is_not_null_violation(&self) -> bool {
        self.code_matches(&["23502"])
    }

    /// Any integrity constraint violation (unique, FK, check, not-null).
    pub fn is_integrity_error(&self) -> bool {
        self.code_matches(&["23505", "23503", "23514", "23502"])
    }

    /// Normalize into the uniform shape regardless of the underlying variant.
    pub fn details(&self) -> ErrorDetails {
        match self {
            Self::Query(sqlx::Error::RowNotFound) => ErrorDetails {
                code: "not_found".to_string(),
                message: "no rows returned".to_string(),
                detail: None,
                hint: None,
            },
            Self::Query(e) => {
                if let Some(db) = e.as_database_error() {
                    let pg = db.try_downcast_ref::<sqlx::postgres::PgDatabaseError>();
                    ErrorDetails {
                        code: db
                            .code()
                            .map(|c| c.to_string())
                            .unwrap_or_else(|| "unknown".to_string()),
                        message: db.message().to_string(),
                        detail: pg.and_then(|p| p.detail().map(str::to_string)),
                        hint: pg.and_then(|p| p.hint().map(str::to_string)),
                    }
                } else {
                    ErrorDetails {
                        code: "network".to_string(),
                        message: e.to_string(),
                        detail: None,
                        hint: None,
                    }
                }
            }
            Self::Connection(msg) => ErrorDetails {
                code: "connection".to_string(),
                message: msg.clone(),
                detail: None,
                hint: Some("check DATABASE_URL and backend availability".to_string()),
            },
            Self::NotFound(msg) => ErrorDetails {
                code: "not_found".to_string(),
                message: msg.clone(),
                detail: None,
                hint: None,
            },
            Self::InvalidData(msg) => ErrorDetails {
                code: "invalid_data".to_string(),
                message: msg.clone(),
                detail: None,
                hint: None,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_rows_classify_as_not_found() {
        assert!(DbError::NotFound("champion".to_string()).is_not_found());
        assert!(DbError::Query(sqlx::Error::RowNotFound).is_not_found());
        assert!(!DbError::Connection("refused".to_string()).is_not_found());
    }

    #[test]
    fn classification_helpers_are_false_without_a_backend_code() {
        let err = DbError::Connection("refused".to_string());
        assert!(!err.is_auth_error());
        assert!(!err.is_rls_violation());
        assert!(!err.is_unique_violation());
        assert!(!err.is_integrity_error());
    }

    #[test]
    fn normalized_shape_carries_stable_codes() {
        assert_eq!(
            DbError::Connection("refused".to_string()).details().code,
            "connection"
        );
        assert_eq!(
            DbError::Query(sqlx::Error::RowNotFound).details().code,
            "not_found"
        );
        assert_eq!(
            DbError::InvalidData("bad row".to_string()).details().code,
            "invalid_data"
        );
    }
}
