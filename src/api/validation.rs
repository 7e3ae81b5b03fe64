use super::ApiError;

const MAX_ID_LEN: usize = 64;

pub fn validate_id<'a>(field: &str, id: &'a str) -> Result<&'a str, ApiError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(format!("{field} cannot be empty")));
    }

    if trimmed.len() > MAX_ID_LEN {
        return Err(ApiError::validation(format!(
            "{field} must be {MAX_ID_LEN} characters or less"
        )));
    }

    Ok(trimmed)
}
