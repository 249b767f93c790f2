// ── Site ACL ──

use serde::{Deserialize, Serialize};

use super::lenient::null_as_default;

/// Site access control list, read and written as one opaque text block
/// (one `allow`/`deny` directive per line).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclResult {
    #[serde(rename = "ACL", default, deserialize_with = "null_as_default")]
    pub acl: String,
}

impl AclResult {
    pub fn new(acl: impl Into<String>) -> Self {
        Self { acl: acl.into() }
    }

    /// Non-blank directives, trimmed.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.acl.lines().map(str::trim).filter(|l| !l.is_empty())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn wire_shape() {
        let acl = AclResult::new("allow 192.0.2.0/24\ndeny all");
        assert_eq!(
            serde_json::to_value(&acl).unwrap(),
            json!({ "ACL": "allow 192.0.2.0/24\ndeny all" })
        );
    }

    #[test]
    fn entries_skip_blank_lines() {
        let acl = AclResult::new("allow 192.0.2.0/24\n\n  deny all  \n");
        assert_eq!(
            acl.entries().collect::<Vec<_>>(),
            vec!["allow 192.0.2.0/24", "deny all"]
        );
    }

    #[test]
    fn missing_acl_decodes_empty() {
        let acl: AclResult = serde_json::from_value(json!({})).unwrap();
        assert_eq!(acl.entries().count(), 0);
    }
}
