/// Effect lowering: gradient, shadow, border, rotation, hover and blur.
///
/// Each function returns the statements for one effect (unindented, one per
/// entry) or nothing when the effect is disabled. The assembler decides where
/// in the element's render group they land.
use crate::generator::color::{argb_literal, encode_color};
use crate::generator::dialect::DialectProfile;
use crate::generator::document::{GradientDirection, GuiElement, HoverAnimation, ProjectSettings};
use crate::generator::geometry::{num, offset, ElementBox};
use crate::generator::templates::{comment_text, fill};

/// Opacity applied to every drop shadow, regardless of the element's own
const SHADOW_OPACITY: f64 = 0.5;

/// One flat rectangle in the dialect's fill call
pub fn fill_rect(profile: &DialectProfile, x: &str, y: &str, x2: &str, y2: &str, color: u32) -> String {
    fill(
        profile.templates.fill,
        &[("x", x), ("y", y), ("x2", x2), ("y2", y2), ("color", &argb_literal(color))],
    )
}

pub fn fill_box(profile: &DialectProfile, bx: &ElementBox, color: u32) -> String {
    fill_rect(profile, &bx.x, &bx.y, &bx.x2, &bx.y2, color)
}

/// Gradient fill, both stops blended with the element's opacity.
///
/// No dialect in scope has a horizontal gradient call, so horizontal
/// gradients are drawn vertically under an explanatory comment.
pub fn gradient(element: &GuiElement, bx: &ElementBox, profile: &DialectProfile) -> Vec<String> {
    let Some(gradient) = element.style.gradient.as_ref().filter(|g| g.enabled) else {
        return Vec::new();
    };

    let opacity = element.opacity();
    let start = argb_literal(encode_color(gradient.start_color.as_deref(), opacity));
    let end = argb_literal(encode_color(gradient.end_color.as_deref(), opacity));

    let mut lines = Vec::new();
    if gradient.direction == GradientDirection::Horizontal {
        lines.push("// Horizontal gradient approximated as vertical (no horizontal fill call available)".to_string());
    }
    lines.push(fill(
        profile.templates.gradient,
        &[
            ("x", &bx.x),
            ("y", &bx.y),
            ("x2", &bx.x2),
            ("y2", &bx.y2),
            ("start", &start),
            ("end", &end),
        ],
    ));
    lines
}

/// Drop shadow: the element box offset by the shadow vector, drawn first
pub fn shadow(element: &GuiElement, bx: &ElementBox, profile: &DialectProfile) -> Vec<String> {
    let Some(shadow) = element.style.shadow.as_ref().filter(|s| s.enabled) else {
        return Vec::new();
    };

    let color = encode_color(shadow.color.as_deref(), SHADOW_OPACITY);
    vec![fill_rect(
        profile,
        &offset(&bx.x, shadow.x_offset),
        &offset(&bx.y, shadow.y_offset),
        &offset(&bx.x2, shadow.x_offset),
        &offset(&bx.y2, shadow.y_offset),
        color,
    )]
}

/// Border as four independently positioned strips. Corners overlap.
pub fn border(element: &GuiElement, settings: &ProjectSettings, profile: &DialectProfile) -> Vec<String> {
    let thickness = element.style.border_width.unwrap_or(0.0);
    if thickness <= 0.0 {
        return Vec::new();
    }

    let color = encode_color(element.style.border_color.as_deref(), 1.0);
    let (x, y, w, h) = (element.x, element.y, element.width, element.height);
    let strips = [
        (x, y, w, thickness),
        (x, y + h - thickness, w, thickness),
        (x, y, thickness, h),
        (x + w - thickness, y, thickness, h),
    ];

    let mut lines = vec!["// Border".to_string()];
    for (sx, sy, sw, sh) in strips {
        let strip = ElementBox::resolve(sx, sy, sw, sh, settings);
        lines.push(fill_box(profile, &strip, color));
    }
    lines
}

/// Opening half of the rotation bracket: push, move the pivot to the element
/// center, rotate, move back.
pub fn rotation_open(element: &GuiElement, bx: &ElementBox, profile: &DialectProfile) -> Vec<String> {
    let degrees = element.normalized_rotation();
    if degrees == 0.0 {
        return Vec::new();
    }

    let transform = profile.transform;
    let cx = bx.center_x();
    let cy = bx.center_y();
    vec![
        transform.push.to_string(),
        fill(transform.translate, &[("dx", &cx), ("dy", &cy)]),
        fill(transform.rotate, &[("degrees", &num(degrees))]),
        fill(
            transform.translate,
            &[("dx", &format!("-({})", cx)), ("dy", &format!("-({})", cy))],
        ),
    ]
}

/// Closing half of the rotation bracket. Emitted exactly when
/// [`rotation_open`] emits.
pub fn rotation_close(element: &GuiElement, profile: &DialectProfile) -> Vec<String> {
    if element.normalized_rotation() == 0.0 {
        return Vec::new();
    }
    vec![profile.transform.pop.to_string()]
}

/// Hover animations need per-frame state the static screen does not keep,
/// so they are described in comments only.
pub fn hover_comments(element: &GuiElement) -> Vec<String> {
    let Some(hover) = element.style.hover.as_ref().filter(|h| h.enabled) else {
        return Vec::new();
    };

    let mut lines = vec![format!(
        "// Hover animation: {} ({}s)",
        hover_name(hover.animation),
        num(hover.duration)
    )];
    match hover.animation {
        HoverAnimation::None => {}
        HoverAnimation::Scale => lines.push(format!("//   scale to {}x while hovered", num(hover.scale))),
        HoverAnimation::Lift => lines.push(format!("//   lift by {}px while hovered", num(hover.lift_amount))),
        HoverAnimation::SlideRight => {
            lines.push(format!("//   slide right by {}px while hovered", num(hover.slide_amount)))
        }
        HoverAnimation::Glow => lines.push(format!(
            "//   glow {} with {}px blur while hovered",
            comment_text(hover.glow_color.as_deref().unwrap_or("#FFFFFF")),
            num(hover.glow_blur)
        )),
        HoverAnimation::BorderPulse => lines.push(format!(
            "//   pulse border {} while hovered",
            comment_text(hover.glow_color.as_deref().unwrap_or("#FFFFFF"))
        )),
    }
    if hover.brightness != 0.0 && hover.brightness != 1.0 {
        lines.push(format!("//   brightness {}x while hovered", num(hover.brightness)));
    }
    lines
}

fn hover_name(animation: HoverAnimation) -> &'static str {
    match animation {
        HoverAnimation::None => "NONE",
        HoverAnimation::Scale => "SCALE",
        HoverAnimation::Lift => "LIFT",
        HoverAnimation::SlideRight => "SLIDE_RIGHT",
        HoverAnimation::Glow => "GLOW",
        HoverAnimation::BorderPulse => "BORDER_PULSE",
    }
}

pub fn blur_comment(element: &GuiElement) -> Vec<String> {
    match element.style.backdrop_blur {
        Some(radius) if radius > 0.0 => vec![format!(
            "// Backdrop blur ({}px) needs a blur shader pass over the background",
            num(radius)
        )],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::document::{
        ElementKind, GradientConfig, HoverConfig, McVersion, ModLoader, ShadowConfig,
    };

    fn literal_settings() -> ProjectSettings {
        ProjectSettings {
            responsive: false,
            ..ProjectSettings::default()
        }
    }

    fn panel() -> GuiElement {
        GuiElement::new(ElementKind::Panel, 10.0, 20.0, 100.0, 50.0)
    }

    fn modern() -> DialectProfile {
        DialectProfile::resolve(ModLoader::Fabric, McVersion::V1_20_4)
    }

    #[test]
    fn test_disabled_effects_emit_nothing() {
        let el = panel();
        let settings = literal_settings();
        let bx = ElementBox::of(&el, &settings);
        let profile = modern();
        assert!(gradient(&el, &bx, &profile).is_empty());
        assert!(shadow(&el, &bx, &profile).is_empty());
        assert!(border(&el, &settings, &profile).is_empty());
        assert!(rotation_open(&el, &bx, &profile).is_empty());
        assert!(rotation_close(&el, &profile).is_empty());
        assert!(hover_comments(&el).is_empty());
        assert!(blur_comment(&el).is_empty());
    }

    #[test]
    fn test_gradient_blends_opacity() {
        let mut el = panel();
        el.style.opacity = Some(0.5);
        el.style.gradient = Some(GradientConfig {
            enabled: true,
            start_color: Some("#3c3c3c".to_string()),
            end_color: Some("#2b2b2b".to_string()),
            direction: GradientDirection::Vertical,
        });
        let settings = literal_settings();
        let bx = ElementBox::of(&el, &settings);
        let lines = gradient(&el, &bx, &modern());
        assert_eq!(
            lines,
            vec!["context.fillGradient(10, 20, 110, 70, 0x7F3C3C3C, 0x7F2B2B2B);".to_string()]
        );
    }

    #[test]
    fn test_horizontal_gradient_is_annotated() {
        let mut el = panel();
        el.style.gradient = Some(GradientConfig {
            enabled: true,
            direction: GradientDirection::Horizontal,
            ..GradientConfig::default()
        });
        let settings = literal_settings();
        let bx = ElementBox::of(&el, &settings);
        let lines = gradient(&el, &bx, &DialectProfile::resolve(ModLoader::Forge, McVersion::V1_12_2));
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("// Horizontal gradient"));
        assert_eq!(lines[1], "drawGradientRect(10, 20, 110, 70, 0xFFFFFFFF, 0xFFFFFFFF);");
    }

    #[test]
    fn test_shadow_offsets_box() {
        let mut el = panel();
        el.style.shadow = Some(ShadowConfig {
            enabled: true,
            color: Some("#000000".to_string()),
            x_offset: 2.0,
            y_offset: 3.0,
            blur: 4.0,
        });
        let settings = literal_settings();
        let bx = ElementBox::of(&el, &settings);
        let lines = shadow(&el, &bx, &DialectProfile::resolve(ModLoader::Fabric, McVersion::V1_18_2));
        assert_eq!(
            lines,
            vec!["fill(matrices, 10 + 2, 20 + 3, 110 + 2, 70 + 3, 0x7F000000);".to_string()]
        );
    }

    #[test]
    fn test_border_has_four_strips() {
        let mut el = panel();
        el.style.border_width = Some(2.0);
        el.style.border_color = Some("#FF0000".to_string());
        let lines = border(&el, &literal_settings(), &modern());
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "// Border");
        assert_eq!(lines[1], "context.fill(10, 20, 110, 22, 0xFFFF0000);");
        assert_eq!(lines[2], "context.fill(10, 68, 110, 70, 0xFFFF0000);");
        assert_eq!(lines[3], "context.fill(10, 20, 12, 70, 0xFFFF0000);");
        assert_eq!(lines[4], "context.fill(108, 20, 110, 70, 0xFFFF0000);");
    }

    #[test]
    fn test_rotation_bracket_pairs() {
        let mut el = panel();
        el.rotation = 45.0;
        let settings = literal_settings();
        let bx = ElementBox::of(&el, &settings);
        let profile = modern();
        let open = rotation_open(&el, &bx, &profile);
        let close = rotation_close(&el, &profile);
        assert_eq!(
            open,
            vec![
                "context.getMatrices().push();".to_string(),
                "context.getMatrices().translate(10 + 100/2, 20 + 50/2, 0);".to_string(),
                "context.getMatrices().multiply(RotationAxis.POSITIVE_Z.rotationDegrees(45f));".to_string(),
                "context.getMatrices().translate(-(10 + 100/2), -(20 + 50/2), 0);".to_string(),
            ]
        );
        assert_eq!(close, vec!["context.getMatrices().pop();".to_string()]);
    }

    #[test]
    fn test_full_turn_is_not_a_rotation() {
        let mut el = panel();
        el.rotation = 360.0;
        let bx = ElementBox::of(&el, &literal_settings());
        let profile = DialectProfile::resolve(ModLoader::Lwjgl2, McVersion::V1_8_9);
        assert!(rotation_open(&el, &bx, &profile).is_empty());
        assert!(rotation_close(&el, &profile).is_empty());
    }

    #[test]
    fn test_hover_and_blur_comments() {
        let mut el = panel();
        el.style.backdrop_blur = Some(8.0);
        el.style.hover = Some(HoverConfig {
            enabled: true,
            animation: HoverAnimation::Lift,
            duration: 0.2,
            lift_amount: 4.0,
            brightness: 1.2,
            ..HoverConfig::default()
        });
        let hover = hover_comments(&el);
        assert_eq!(hover[0], "// Hover animation: LIFT (0.2s)");
        assert_eq!(hover[1], "//   lift by 4px while hovered");
        assert_eq!(hover[2], "//   brightness 1.2x while hovered");
        assert!(hover.iter().all(|l| l.starts_with("//")));
        assert_eq!(
            blur_comment(&el),
            vec!["// Backdrop blur (8px) needs a blur shader pass over the background".to_string()]
        );
    }
}
