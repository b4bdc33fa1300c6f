//! Drive v3 request/response types.

use serde::{Deserialize, Serialize};

/// Metadata part of the multipart file-create request.
#[derive(Debug, Clone, Serialize)]
pub struct FileMetadata {
    pub name: String,
}

/// Response to a file create.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedFile {
    pub id: String,
}

/// Body of a permission create.
#[derive(Debug, Clone, Serialize)]
pub struct PermissionRequest {
    pub role: String,
    #[serde(rename = "type")]
    pub grantee_type: String,
}

impl PermissionRequest {
    /// Public read access.
    pub fn anyone_reader() -> Self {
        Self {
            role: "reader".to_string(),
            grantee_type: "anyone".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_request_wire_shape() {
        let json = serde_json::to_value(PermissionRequest::anyone_reader()).unwrap();
        assert_eq!(json["role"], "reader");
        assert_eq!(json["type"], "anyone");
    }

    #[test]
    fn test_created_file_parses_id() {
        let created: CreatedFile =
            serde_json::from_str(r#"{"kind": "drive#file", "id": "f-123"}"#).unwrap();
        assert_eq!(created.id, "f-123");
    }
}
