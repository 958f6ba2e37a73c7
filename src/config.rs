use serde::{Deserialize, Serialize};

/// Search engine settings
///
/// Tunables shared by every search request. Admin-authored configurations
/// override `default_results_limit` per panel; the date format is the wire
/// format range widgets submit bounds in.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchSettings {
    /// chrono format string for incoming range bounds (DD.MM.YYYY)
    pub date_format: String,
    /// Result limit applied when a request does not supply one
    pub default_results_limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            date_format: "%d.%m.%Y".to_string(),
            default_results_limit: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = SearchSettings::default();
        assert_eq!(settings.date_format, "%d.%m.%Y");
        assert_eq!(settings.default_results_limit, 10);
    }
}
