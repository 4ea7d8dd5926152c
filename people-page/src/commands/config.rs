use crate::config::PageConfig;

/// Effective configuration as pretty JSON.
pub fn show_config(config: &PageConfig) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_config_is_json() {
        let json = show_config(&PageConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["output"], "table");
        assert_eq!(value["timeout_secs"], 10);
    }
}
