//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r#"# Henotace client configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.
# The API key is never read from this file: set HENOTACE_API_KEY.

[api]
# base_url = "https://api.henotace.ai"   # or HENOTACE_BASE_URL
# timeout_secs = 30                       # 1-600, or HENOTACE_TIMEOUT
# connect_timeout_secs = 10               # 1-120
# retries = 2                             # 0-10
# retry_delay_ms = 500

[logging]
# enabled = true
# level = "info"                          # trace, debug, info, warn, error

[tutor]
# language = "en"
# grade_level = "high_school"

[tutor.compression]
# max_turns = 10                          # 1-100
# max_summary_chars = 1200                # 100-20000
# checkpoint_every = 5                    # 1-100
"#
}
