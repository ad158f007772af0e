use crate::common::config::GapSettings;
use crate::layout_engine::Orientation;
use crate::sys::geometry::{Point, Rect, Round, Size};

/// The part of the screen windows may be tiled into, after outer gaps.
pub fn compute_tiling_area(screen: Rect, gaps: &GapSettings) -> Rect {
    let outer = &gaps.outer;
    if outer.top == 0.0 && outer.left == 0.0 && outer.bottom == 0.0 && outer.right == 0.0 {
        screen
    } else {
        Rect {
            origin: Point {
                x: screen.origin.x + outer.left,
                y: screen.origin.y + outer.top,
            },
            size: Size {
                width: (screen.size.width - outer.left - outer.right).max(0.0),
                height: (screen.size.height - outer.top - outer.bottom).max(0.0),
            },
        }
        .round()
    }
}

/// Splits `rect` in two along `orientation`, giving `ratio` of the available
/// space (after `gap`) to the first part.
pub fn split_ratio(rect: Rect, ratio: f64, orientation: Orientation, gap: f64) -> (Rect, Rect) {
    let ratio = ratio.clamp(0.0, 1.0);
    match orientation {
        Orientation::Horizontal => {
            let available = (rect.size.width - gap).max(0.0);
            let first_w = available * ratio;
            let first = Rect::new(rect.origin, Size::new(first_w, rect.size.height));
            let second = Rect::new(
                Point::new(rect.origin.x + first_w + gap, rect.origin.y),
                Size::new(available - first_w, rect.size.height),
            );
            (first.round(), second.round())
        }
        Orientation::Vertical => {
            let available = (rect.size.height - gap).max(0.0);
            let first_h = available * ratio;
            let first = Rect::new(rect.origin, Size::new(rect.size.width, first_h));
            let second = Rect::new(
                Point::new(rect.origin.x, rect.origin.y + first_h + gap),
                Size::new(rect.size.width, available - first_h),
            );
            (first.round(), second.round())
        }
    }
}

/// Splits `rect` into `count` equal parts along `orientation`, separated by
/// `gap`.
pub fn split_even(rect: Rect, count: usize, orientation: Orientation, gap: f64) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let gaps_total = gap * (count - 1) as f64;
    match orientation {
        Orientation::Horizontal => {
            let each = ((rect.size.width - gaps_total) / count as f64).max(0.0);
            (0..count)
                .map(|i| {
                    Rect::from_xywh(
                        rect.origin.x + i as f64 * (each + gap),
                        rect.origin.y,
                        each,
                        rect.size.height,
                    )
                    .round()
                })
                .collect()
        }
        Orientation::Vertical => {
            let each = ((rect.size.height - gaps_total) / count as f64).max(0.0);
            (0..count)
                .map(|i| {
                    Rect::from_xywh(
                        rect.origin.x,
                        rect.origin.y + i as f64 * (each + gap),
                        rect.size.width,
                        each,
                    )
                    .round()
                })
                .collect()
        }
    }
}
