use mongodb::bson::oid::ObjectId;

use crate::utils::error::AppError;

/// Parses a path id into a BSON ObjectId. Malformed ids are rejected before
/// any database call is made.
pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidRequest("Invalid ID format".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_hex_id() {
        let id = ObjectId::new();
        let parsed = parse_object_id(&id.to_hex()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_rejects_short_id() {
        assert!(parse_object_id("abc123").is_err());
    }

    #[test]
    fn test_rejects_non_hex_id() {
        assert!(parse_object_id("zzzzzzzzzzzzzzzzzzzzzzzz").is_err());
    }

    #[test]
    fn test_rejects_empty_id() {
        assert!(parse_object_id("").is_err());
    }
}
