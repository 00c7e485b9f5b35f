//! Common types used throughout the CFP console
//!
//! This module contains shared type definitions, type aliases,
//! and constants used across multiple modules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// Opaque continuation token returned by the remote listing API.
///
/// Never parsed, only stored and replayed.
pub type Cursor = String;

/// Ordered cursors describing the path from page 1 to the current page.
///
/// `history[i]` was consumed to fetch page `i + 2`; the empty history is page 1.
pub type History = Vec<Cursor>;

/// Number of rows requested per list fetch, shared by all list views
pub const PAGE_SIZE: u32 = 100;

// ============================================================================
// Page Names
// ============================================================================

/// Identifies which list view owns a pagination history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageName {
    /// Own products (parent parts)
    Products,
    /// Own parts offered for linking to a received request
    LinkPartsCandidates,
    /// Requests received from downstream partners
    Responses,
    /// Requests sent to upstream partners
    CfpRequestList,
}

impl PageName {
    /// All page names, in display order
    pub const ALL: [PageName; 4] = [
        PageName::Products,
        PageName::LinkPartsCandidates,
        PageName::Responses,
        PageName::CfpRequestList,
    ];

    /// Stable kebab-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            PageName::Products => "products",
            PageName::LinkPartsCandidates => "link-parts-candidates",
            PageName::Responses => "responses",
            PageName::CfpRequestList => "cfp-request-list",
        }
    }

    /// Session key under which this page's history is stored
    pub fn history_key(&self) -> String {
        format!("pagination-history/{}", self.as_str())
    }
}

impl fmt::Display for PageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageName {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageName::ALL
            .into_iter()
            .find(|page| page.as_str() == s)
            .ok_or_else(|| crate::Error::Other(format!("Unknown page name: {s}")))
    }
}

// ============================================================================
// Log Level
// ============================================================================

/// Log level accepted in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_name_keys_are_distinct() {
        let keys: std::collections::HashSet<String> =
            PageName::ALL.iter().map(PageName::history_key).collect();
        assert_eq!(keys.len(), 4);
        assert_eq!(
            PageName::CfpRequestList.history_key(),
            "pagination-history/cfp-request-list"
        );
    }

    #[test]
    fn test_page_name_from_str() {
        for page in PageName::ALL {
            assert_eq!(page.as_str().parse::<PageName>().unwrap(), page);
        }
        assert!("orders".parse::<PageName>().is_err());
    }

    #[test]
    fn test_page_name_serde() {
        let json = serde_json::to_string(&PageName::LinkPartsCandidates).unwrap();
        assert_eq!(json, "\"link-parts-candidates\"");
    }

    #[test]
    fn test_log_level_conversion() {
        let level: tracing::Level = LogLevel::Warn.into();
        assert_eq!(level, tracing::Level::WARN);
    }
}
