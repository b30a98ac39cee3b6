//! Header geometry and hit testing.

use crate::grid::{ColumnConfig, GridColumn};

/// Width of the grab zone at a column's right edge, in pixels.
pub const RESIZE_HANDLE_WIDTH: f64 = 6.0;

/// Pointer position in header-local pixels (before horizontal scrolling).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Horizontal travel from `other`. Header drags only move along x.
    #[must_use]
    pub fn horizontal_distance(self, other: Self) -> f64 {
        (self.x - other.x).abs()
    }
}

/// What lies under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget<C> {
    /// The header cell body of a column.
    Header(C),
    /// The resize grab zone on a column's right edge.
    ResizeHandle(C),
    None,
}

/// Resolves pointer positions to header targets.
///
/// Implementations must report [`HitTarget::ResizeHandle`] in preference to
/// [`HitTarget::Header`] where the two overlap.
pub trait HitTester<C> {
    fn hit(&self, at: Point) -> HitTarget<C>;
}

/// Horizontal extent of one rendered header cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpan<C> {
    pub column: C,
    pub start: f64,
    pub end: f64,
}

/// Header cells laid out left to right from the visible order and widths.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderLayout<C> {
    spans: Vec<ColumnSpan<C>>,
    height: f64,
}

impl<C: GridColumn> HeaderLayout<C> {
    /// Lays out the visible columns of `config`, shifted left by `scroll_x`.
    #[must_use]
    pub fn new(config: &ColumnConfig<C>, scroll_x: f64, height: f64) -> Self {
        let mut x = -scroll_x;
        let spans = config
            .visible_columns()
            .into_iter()
            .map(|column| {
                let start = x;
                x += f64::from(config.width(column));
                ColumnSpan { column, start, end: x }
            })
            .collect();
        Self { spans, height }
    }

    #[must_use]
    pub fn spans(&self) -> &[ColumnSpan<C>] {
        &self.spans
    }

    /// Total header width before scrolling.
    #[must_use]
    pub fn total_width(&self) -> f64 {
        self.spans
            .iter()
            .map(|s| s.end - s.start)
            .sum()
    }
}

impl<C: GridColumn> HitTester<C> for HeaderLayout<C> {
    fn hit(&self, at: Point) -> HitTarget<C> {
        if at.y < 0.0 || at.y >= self.height {
            return HitTarget::None;
        }
        let Some(span) = self.spans.iter().find(|s| at.x >= s.start && at.x < s.end) else {
            return HitTarget::None;
        };
        if !span.column.is_selection() && at.x >= span.end - RESIZE_HANDLE_WIDTH {
            HitTarget::ResizeHandle(span.column)
        } else {
            HitTarget::Header(span.column)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CustomerColumn;

    fn layout(scroll_x: f64) -> HeaderLayout<CustomerColumn> {
        let mut config = ColumnConfig::default();
        config.set_visibility(CustomerColumn::RowNumber, false);
        HeaderLayout::new(&config, scroll_x, 40.0)
    }

    #[test]
    fn spans_follow_visible_order() {
        let layout = layout(0.0);
        let columns: Vec<_> = layout.spans().iter().map(|s| s.column).collect();
        assert_eq!(columns[..2], [CustomerColumn::Checkbox, CustomerColumn::Code]);
        assert_eq!(layout.spans()[1].start, 50.0);
        assert_eq!(layout.total_width(), 50.0 + 120.0 + 200.0 + 150.0 + 150.0 + 100.0);
    }

    #[test]
    fn resolves_headers_and_handles() {
        let layout = layout(0.0);
        assert_eq!(layout.hit(Point::new(10.0, 5.0)), HitTarget::Header(CustomerColumn::Checkbox));
        assert_eq!(layout.hit(Point::new(47.0, 5.0)), HitTarget::Header(CustomerColumn::Checkbox));
        assert_eq!(layout.hit(Point::new(100.0, 5.0)), HitTarget::Header(CustomerColumn::Code));
        assert_eq!(layout.hit(Point::new(168.0, 5.0)), HitTarget::ResizeHandle(CustomerColumn::Code));
        assert_eq!(layout.hit(Point::new(100.0, 45.0)), HitTarget::None);
        assert_eq!(layout.hit(Point::new(5000.0, 5.0)), HitTarget::None);
    }

    #[test]
    fn scrolling_shifts_spans() {
        let layout = layout(50.0);
        assert_eq!(layout.hit(Point::new(10.0, 5.0)), HitTarget::Header(CustomerColumn::Code));
    }
}
