/// Position resolution: canvas pixels to Java int expressions
///
/// With responsive output off every coordinate is a literal. With it on, each
/// coordinate is anchored to the nearest edge (or the center) of the live
/// screen so the generated screen follows window resizes.
use crate::generator::document::{GuiElement, ProjectSettings};

/// Below this center ratio an element anchors to the near edge
const NEAR_EDGE: f64 = 0.33;
/// Above this center ratio an element anchors to the far edge
const FAR_EDGE: f64 = 0.66;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Live container dimension available inside a Screen subclass
    pub fn container_dimension(&self) -> &'static str {
        match self {
            Axis::X => "this.width",
            Axis::Y => "this.height",
        }
    }
}

/// Round half up, the way the editor rounds canvas coordinates
pub fn js_round(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// Format a number the way it is written into generated source
pub fn num(v: f64) -> String {
    if v == 0.0 || !v.is_finite() {
        return "0".to_string();
    }
    format!("{}", v)
}

/// Resolve one coordinate into a Java int expression.
///
/// Boundary ratios (exactly 0.33 or 0.66) fall into the center branch.
pub fn resolve_position(value: f64, size: f64, container: f64, axis: Axis, responsive: bool) -> String {
    if !responsive {
        return num(js_round(value));
    }

    let ratio = (value + size / 2.0) / container;
    let dim = axis.container_dimension();

    if ratio < NEAR_EDGE {
        num(js_round(value))
    } else if ratio > FAR_EDGE {
        format!("{} - {}", dim, num(js_round(container - value)))
    } else {
        let offset = value - container / 2.0;
        let sign = if offset >= 0.0 { '+' } else { '-' };
        format!("{} / 2 {} {}", dim, sign, num(js_round(offset).abs()))
    }
}

/// Resolved bounding box of one element.
///
/// `x2`/`y2` are the far-edge expressions. They are built once per element and
/// shared by every effect that needs the box.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementBox {
    pub x: String,
    pub y: String,
    pub x2: String,
    pub y2: String,
    pub width: f64,
    pub height: f64,
}

impl ElementBox {
    pub fn resolve(x: f64, y: f64, width: f64, height: f64, settings: &ProjectSettings) -> Self {
        let responsive = settings.responsive;
        let x_expr = resolve_position(x, width, settings.screen_width, Axis::X, responsive);
        let y_expr = resolve_position(y, height, settings.screen_height, Axis::Y, responsive);

        // Java draw calls take ints, so sizes are rounded like positions
        let width = js_round(width);
        let height = js_round(height);
        let (x2, y2) = if responsive {
            (
                format!("({} + {})", x_expr, num(width)),
                format!("({} + {})", y_expr, num(height)),
            )
        } else {
            (num(js_round(x + width)), num(js_round(y + height)))
        };

        ElementBox {
            x: x_expr,
            y: y_expr,
            x2,
            y2,
            width,
            height,
        }
    }

    pub fn of(element: &GuiElement, settings: &ProjectSettings) -> Self {
        Self::resolve(element.x, element.y, element.width, element.height, settings)
    }

    /// Horizontal center, used as the rotation pivot
    pub fn center_x(&self) -> String {
        format!("{} + {}/2", self.x, num(self.width))
    }

    pub fn center_y(&self) -> String {
        format!("{} + {}/2", self.y, num(self.height))
    }
}

/// Append a literal offset to an expression
pub fn offset(expr: &str, delta: f64) -> String {
    if delta < 0.0 {
        format!("{} - {}", expr, num(-delta))
    } else {
        format!("{} + {}", expr, num(delta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn responsive(value: f64) -> String {
        resolve_position(value, 0.0, 200.0, Axis::X, true)
    }

    #[test]
    fn test_near_edge_branch() {
        // ratio 0.3
        assert_eq!(responsive(60.0), "60");
    }

    #[test]
    fn test_boundaries_resolve_to_center() {
        // ratio exactly 0.33 and 0.66
        assert_eq!(responsive(66.0), "this.width / 2 - 34");
        assert_eq!(responsive(132.0), "this.width / 2 + 32");
    }

    #[test]
    fn test_far_edge_branch() {
        // ratio 0.7
        assert_eq!(responsive(140.0), "this.width - 60");
    }

    #[test]
    fn test_non_responsive_is_literal() {
        assert_eq!(resolve_position(140.4, 0.0, 200.0, Axis::X, false), "140");
        assert_eq!(resolve_position(10.5, 0.0, 200.0, Axis::Y, false), "11");
    }

    #[test]
    fn test_y_axis_uses_height() {
        assert_eq!(resolve_position(200.0, 20.0, 240.0, Axis::Y, true), "this.height - 40");
    }

    #[test]
    fn test_box_literal_far_edges() {
        let settings = ProjectSettings {
            responsive: false,
            ..ProjectSettings::default()
        };
        let b = ElementBox::resolve(10.0, 10.0, 100.0, 20.0, &settings);
        assert_eq!(b.x, "10");
        assert_eq!(b.y, "10");
        assert_eq!(b.x2, "110");
        assert_eq!(b.y2, "30");
    }

    #[test]
    fn test_box_responsive_far_edges() {
        let settings = ProjectSettings {
            screen_width: 200.0,
            screen_height: 200.0,
            responsive: true,
            ..ProjectSettings::default()
        };
        let b = ElementBox::resolve(140.0, 10.0, 20.0, 20.0, &settings);
        assert_eq!(b.x, "this.width - 60");
        assert_eq!(b.x2, "(this.width - 60 + 20)");
        assert_eq!(b.y2, "(10 + 20)");
    }

    #[test]
    fn test_offsets() {
        assert_eq!(offset("x", 4.0), "x + 4");
        assert_eq!(offset("x", -2.0), "x - 2");
        assert_eq!(num(-0.0), "0");
        assert_eq!(num(12.5), "12.5");
    }
}
