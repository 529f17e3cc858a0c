//! `--show-encryption` report.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{ReportParser, split_field};

/// Which password opened the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordRole {
    User,
    Owner,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EncryptionInfo {
    pub is_encrypted: bool,
    /// Security handler revision (`R = 6`).
    pub revision: Option<u32>,
    /// Raw permission bits (`P = -4`).
    pub permission_bits: Option<i64>,
    /// Recovered user password, shown when the owner password was supplied.
    pub user_password: Option<String>,
    pub supplied_password_role: Option<PasswordRole>,
    /// Capability lines (`print high resolution: allowed`).
    pub capabilities: BTreeMap<String, bool>,
    pub stream_method: Option<String>,
    pub string_method: Option<String>,
    pub file_method: Option<String>,
    /// Hex key printed with `--show-encryption-key`.
    pub encryption_key: Option<String>,
}

impl EncryptionInfo {
    /// Looks up a capability by its printed name. `None` when not reported.
    pub fn allows(&self, capability: &str) -> Option<bool> {
        self.capabilities.get(capability).copied()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EncryptionParser;

impl ReportParser for EncryptionParser {
    type Output = EncryptionInfo;

    fn name(&self) -> &'static str {
        "encryption"
    }

    fn parse(&self, text: &str) -> EncryptionInfo {
        let mut info = EncryptionInfo::default();

        for line in text.lines().map(str::trim) {
            if line.is_empty() || line == "File is not encrypted" {
                continue;
            }
            match line {
                "Supplied password is owner password" => {
                    info.supplied_password_role = Some(PasswordRole::Owner);
                    continue;
                }
                "Supplied password is user password" => {
                    info.supplied_password_role = Some(PasswordRole::User);
                    continue;
                }
                _ => {}
            }

            // Trimming turns "User password = " into "User password =".
            let assignment = split_field(line, " = ")
                .or_else(|| line.strip_suffix(" =").map(|key| (key.trim(), "")));
            if let Some((key, value)) = assignment {
                match key {
                    "R" => {
                        info.is_encrypted = true;
                        info.revision = value.parse().ok();
                    }
                    "P" => info.permission_bits = value.parse().ok(),
                    "User password" => info.user_password = Some(value.to_string()),
                    "Encryption key" => info.encryption_key = Some(value.to_string()),
                    _ => {}
                }
                continue;
            }

            if let Some((key, value)) = split_field(line, ":") {
                match key {
                    "stream encryption method" => info.stream_method = Some(value.to_string()),
                    "string encryption method" => info.string_method = Some(value.to_string()),
                    "file encryption method" => info.file_method = Some(value.to_string()),
                    _ => match value {
                        "allowed" => {
                            info.capabilities.insert(key.to_string(), true);
                        }
                        "not allowed" => {
                            info.capabilities.insert(key.to_string(), false);
                        }
                        _ => {}
                    },
                }
            }
        }
        info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER_REPORT: &str = "R = 6\nP = -4\nUser password = \n\
        Supplied password is owner password\n\
        extract for accessibility: allowed\n\
        extract for any purpose: allowed\n\
        print low resolution: allowed\n\
        print high resolution: not allowed\n\
        modify anything: allowed\n\
        stream encryption method: AESv3\n\
        string encryption method: AESv3\n\
        file encryption method: AESv3\n\
        Encryption key = bc4d3ad2b43dbe372b02a4291cc7ee11413d33e87eb348d3364d5420312f1645";

    #[test]
    fn test_not_encrypted() {
        let info = EncryptionParser.parse("File is not encrypted");
        assert!(!info.is_encrypted);
        assert_eq!(info, EncryptionInfo::default());
    }

    #[test]
    fn test_owner_report() {
        let info = EncryptionParser.parse(OWNER_REPORT);
        assert!(info.is_encrypted);
        assert_eq!(info.revision, Some(6));
        assert_eq!(info.permission_bits, Some(-4));
        assert_eq!(info.user_password.as_deref(), Some(""));
        assert_eq!(info.supplied_password_role, Some(PasswordRole::Owner));
        assert_eq!(info.allows("print high resolution"), Some(false));
        assert_eq!(info.allows("modify anything"), Some(true));
        assert_eq!(info.allows("modify forms"), None);
        assert_eq!(info.stream_method.as_deref(), Some("AESv3"));
        assert_eq!(info.file_method.as_deref(), Some("AESv3"));
        assert_eq!(
            info.encryption_key.as_deref(),
            Some("bc4d3ad2b43dbe372b02a4291cc7ee11413d33e87eb348d3364d5420312f1645")
        );
    }
}
