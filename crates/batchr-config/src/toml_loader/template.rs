//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# batchr configuration
# Only override what you want to change -- missing fields use defaults.

[batch]
# max_quads = 20000          # 1-1000000, quads per draw call
# max_texture_slots = 16     # 2-16, slot 0 is the reserved white texture

[render]
# width = 1280               # 1-8192
# height = 720               # 1-8192
# clear_color = "#1e1e2e"

[logging]
# level = "info"             # trace | debug | info | warn | error
"##
}
