use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One item in the recycle bin. Names are not unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrashEntry {
    pub name: String,
    /// Where the platform believes the item came from. May be wrong or truncated.
    pub original_path: PathBuf,
    /// Opaque handle the owning resolver uses to restore the item.
    pub id: String,
    pub deleted_time: i64,
}

impl TrashEntry {
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_match_ignores_case() {
        let entry = TrashEntry {
            name: "IMG_0001.JPG".to_string(),
            original_path: PathBuf::from("/a/IMG_0001.JPG"),
            id: "1".to_string(),
            deleted_time: 0,
        };
        assert!(entry.matches_name("img_0001.jpg"));
        assert!(!entry.matches_name("img_0002.jpg"));
    }
}
