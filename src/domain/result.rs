//! Result type alias for cognito-backup

use super::errors::CognitoBackupError;

/// Result type alias for cognito-backup operations
///
/// # Examples
///
/// ```
/// use cognito_backup::domain::result::Result;
/// use cognito_backup::domain::errors::CognitoBackupError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(CognitoBackupError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, CognitoBackupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
