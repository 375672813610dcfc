use serde::{Deserialize, Serialize};

/// Stored image attached to an item
///
/// Serialized as-is into the `items.images` JSONB column and API payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    /// Generated name on disk
    pub filename: String,
    /// Name the client uploaded the file under
    pub original_name: String,
    /// Public path, e.g. `/uploads/images-1700000000000-123456789.jpg`
    pub path: String,
    /// Size in bytes
    pub size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_payload() {
        let record = ImageRecord {
            filename: "images-1-123456789.png".into(),
            original_name: "front.png".into(),
            path: "/uploads/images-1-123456789.png".into(),
            size: 2048,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["originalName"], "front.png");
        assert_eq!(json["size"], 2048);
    }
}
