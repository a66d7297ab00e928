// build.rs - TOML-driven constant generation for feeder limits
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    paste: PasteLimits,
    fields: FieldLimits,
    attachments: AttachmentLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct PasteLimits {
    max_paste_bytes: usize,
    max_paste_lines: usize,
}

#[derive(serde::Deserialize)]
struct FieldLimits {
    remark_max_chars: usize,
    max_label_length: usize,
    max_dimension_codes: usize,
    max_machine_info_fields: usize,
}

#[derive(serde::Deserialize)]
struct AttachmentLimits {
    max_attachments: usize,
    max_attachment_bytes: u64,
    max_total_attachment_bytes: u64,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=FEEDER_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=FEEDER_CONFIG_DIR");

    let profile = env::var("FEEDER_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("FEEDER_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of feeder_core directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_PASTE_BYTES: usize = 1_048_576;
    const ABSOLUTE_MAX_ATTACHMENT_BYTES: u64 = 100 * 1024 * 1024;

    if config.paste.max_paste_bytes > ABSOLUTE_MAX_PASTE_BYTES {
        panic!("LIMITS: max_paste_bytes exceeds absolute maximum");
    }

    if config.paste.max_paste_bytes < 1024 {
        panic!("LIMITS: max_paste_bytes too small (min: 1024)");
    }

    if config.paste.max_paste_lines == 0 {
        panic!("LIMITS: max_paste_lines must be positive");
    }

    if config.fields.remark_max_chars == 0 {
        panic!("LIMITS: remark_max_chars must be positive");
    }

    if config.attachments.max_attachment_bytes > ABSOLUTE_MAX_ATTACHMENT_BYTES {
        panic!("LIMITS: max_attachment_bytes exceeds absolute maximum");
    }

    if config.attachments.max_total_attachment_bytes < config.attachments.max_attachment_bytes {
        panic!("LIMITS: max_total_attachment_bytes smaller than a single attachment");
    }

    if config.logging.log_buffer_size < 100 {
        panic!("LIMITS: log_buffer_size too small (min: 100)");
    }

    if profile == "production" && config.paste.max_paste_bytes > 65_536 {
        panic!("PRODUCTION: max_paste_bytes too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod paste {{
        pub const MAX_PASTE_BYTES: usize = {};
        pub const MAX_PASTE_LINES: usize = {};
    }}

    pub mod fields {{
        pub const REMARK_MAX_CHARS: usize = {};
        pub const MAX_LABEL_LENGTH: usize = {};
        pub const MAX_DIMENSION_CODES: usize = {};
        pub const MAX_MACHINE_INFO_FIELDS: usize = {};
    }}

    pub mod attachments {{
        pub const MAX_ATTACHMENTS: usize = {};
        pub const MAX_ATTACHMENT_BYTES: u64 = {};
        pub const MAX_TOTAL_ATTACHMENT_BYTES: u64 = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
    }}
}}
"#,
        profile,
        config.paste.max_paste_bytes,
        config.paste.max_paste_lines,
        config.fields.remark_max_chars,
        config.fields.max_label_length,
        config.fields.max_dimension_codes,
        config.fields.max_machine_info_fields,
        config.attachments.max_attachments,
        config.attachments.max_attachment_bytes,
        config.attachments.max_total_attachment_bytes,
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
    );

    fs::write(output_path, constants_code).unwrap();
}
