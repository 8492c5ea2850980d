//! CPU reference for the fragment-stage compositing formula.
//!
//! The GPU does the real work; this module pins down the exact arithmetic the
//! watermark fragment shader performs so it can be asserted in tests and
//! reasoned about without a GL context.

/// Source-over blend restricted to color channels.
///
/// Per channel c in {r,g,b}: `out.c = (1 - fg.a) * bg.c + fg.a * fg.c`.
/// The output alpha is the background's own alpha, unchanged: the video
/// frame's opacity passes through the composite.
pub fn source_over(bg: [u8; 4], fg: [u8; 4]) -> [u8; 4] {
    let fg_a = fg[3] as f32 / 255.0;
    let mix = |b: u8, f: u8| -> u8 {
        let c = (1.0 - fg_a) * (b as f32 / 255.0) + fg_a * (f as f32 / 255.0);
        (c * 255.0).round().clamp(0.0, 255.0) as u8
    };
    [mix(bg[0], fg[0]), mix(bg[1], fg[1]), mix(bg[2], fg[2]), bg[3]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_foreground_replaces_background_color() {
        let bg = [10, 20, 30, 255];
        let fg = [200, 100, 50, 255];
        assert_eq!(source_over(bg, fg), [200, 100, 50, 255]);
    }

    #[test]
    fn transparent_foreground_leaves_background_untouched() {
        let bg = [10, 20, 30, 200];
        let fg = [255, 255, 255, 0];
        assert_eq!(source_over(bg, fg), [10, 20, 30, 200]);
    }

    #[test]
    fn output_alpha_is_background_alpha() {
        let bg = [0, 0, 0, 77];
        let fg = [255, 255, 255, 255];
        assert_eq!(source_over(bg, fg)[3], 77);
    }

    #[test]
    fn half_alpha_mixes_both_colors() {
        // fg.a = 128/255, so out = (1 - a) * bg + a * fg per channel.
        let bg = [0, 0, 0, 255];
        let fg = [255, 255, 255, 128];
        let out = source_over(bg, fg);
        assert_eq!(out[3], 255);
        for c in &out[..3] {
            assert!((*c as i32 - 128).abs() <= 1, "channel {c} not near 128");
        }
    }
}
