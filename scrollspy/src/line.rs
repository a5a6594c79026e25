use crate::dom::Dom;
use crate::options::SpyOptions;

/// Computes the detection line in document coordinates:
/// `scroll_y + offset + viewport_height * ratio`.
pub(crate) fn detection_line<D: Dom>(dom: &D, options: &SpyOptions<D::Element>) -> f64 {
    dom.scroll_y() + options.offset.resolve() + dom.viewport_height() * options.enter_at.ratio()
}

/// Progress of the line through an extent. The denominator floors at 1 so a degenerate
/// zero-height extent cannot divide by zero; the result is intentionally unclamped.
pub(crate) fn progress(line: f64, top: f64, bottom: f64) -> f64 {
    (line - top) / f64::max(1.0, bottom - top)
}
