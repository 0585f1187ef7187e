//! Render target validation.

use batchr_common::Color;

use crate::schema::BatchrConfig;

use super::helpers::validate_range;

pub(crate) fn validate_render(errors: &mut Vec<String>, config: &BatchrConfig) {
    validate_range(errors, "render.width", config.render.width, 1, 8192);
    validate_range(errors, "render.height", config.render.height, 1, 8192);

    if Color::from_hex(&config.render.clear_color).is_none() {
        errors.push(format!(
            "render.clear_color = {:?} is not a #rrggbb or #rrggbbaa color",
            config.render.clear_color
        ));
    }
}
