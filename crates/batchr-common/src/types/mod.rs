mod color;

pub use color::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_from_hex_6() {
        let c = Color::from_hex("#ff8800").unwrap();
        assert_eq!(c, Color::from_rgba8(255, 136, 0, 255));
    }

    #[test]
    fn color_from_hex_8() {
        let c = Color::from_hex("#00000080").unwrap();
        assert_eq!(c.to_rgba8(), [0, 0, 0, 128]);
    }

    #[test]
    fn color_from_hex_without_hash() {
        let c = Color::from_hex("ffffff").unwrap();
        assert_eq!(c, Color::WHITE);
    }

    #[test]
    fn color_from_hex_rejects_bad_input() {
        assert!(Color::from_hex("#fff").is_none());
        assert!(Color::from_hex("#gg0000").is_none());
        assert!(Color::from_hex("").is_none());
    }

    #[test]
    fn color_from_hex_rejects_signs_and_spaces() {
        assert!(Color::from_hex("#+f+f+f").is_none());
        assert!(Color::from_hex("+fffffff").is_none());
    }

    #[test]
    fn color_to_rgba8_round_trip() {
        let c = Color::from_rgba8(30, 30, 46, 16);
        assert_eq!(c.to_rgba8(), [30, 30, 46, 16]);
    }

    #[test]
    fn color_components_are_normalized() {
        let c = Color::from_rgba8(255, 0, 51, 255);
        assert!((c.r - 1.0).abs() < f32::EPSILON);
        assert!(c.g.abs() < f32::EPSILON);
        assert!((c.b - 0.2).abs() < 1e-6);
    }

    #[test]
    fn color_default_is_opaque_white() {
        assert_eq!(Color::default(), Color::WHITE);
        assert_eq!(Color::WHITE.to_array(), [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn color_serialization() {
        let c = Color::rgba(0.25, 0.5, 0.75, 1.0);
        let json = serde_json::to_string(&c).unwrap();
        let deserialized: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(c, deserialized);
    }
}
