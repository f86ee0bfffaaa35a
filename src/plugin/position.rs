//! Placement of a floating element below an anchor element.

/// An element's bounding box in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingRect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

/// Style values placing a target directly below an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub top: f64,
    pub left: f64,
    pub min_width: f64,
}

/// Something that accepts CSS style properties.
pub trait StyleTarget {
    fn set_style(&mut self, property: &str, value: String);
}

/// Compute the position of a target under the anchor `rect`.
pub fn position(rect: &BoundingRect) -> Position {
    Position {
        top: rect.top + rect.height,
        left: rect.left,
        min_width: rect.width,
    }
}

/// Compute the position under `rect` and apply it to `target` in pixels.
pub fn apply_position<T: StyleTarget + ?Sized>(rect: &BoundingRect, target: &mut T) -> Position {
    let pos = position(rect);
    target.set_style("top", format!("{}px", pos.top));
    target.set_style("left", format!("{}px", pos.left));
    target.set_style("min-width", format!("{}px", pos.min_width));
    pos
}

impl StyleTarget for std::collections::BTreeMap<String, String> {
    fn set_style(&mut self, property: &str, value: String) {
        self.insert(property.to_string(), value);
    }
}
