use easel_core::{FontDescriptor, Size};
use easel_layout::{anchor_point, compute_local_rectangle, AnchorPosition, HorizontalAlign, VerticalAlign};
use easel_render::{RecordingSurface, TextMetricsProbe};

const PARENTS: [f32; 6] = [0.0, 1.0, 7.0, 160.0, 333.0, 1000.5];
const METRICS: [f32; 4] = [0.0, 3.0, 40.0, 51.25];

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn test_rectangle_edges_touch_the_anchor_point() {
    for anchor in AnchorPosition::ALL {
        let alignment = anchor.alignment().unwrap();
        for &pw in &PARENTS {
            for &ph in &PARENTS {
                for &mw in &METRICS {
                    for &mh in &METRICS {
                        let metrics = Size::new(mw, mh).unwrap();
                        let rect = compute_local_rectangle(anchor, anchor.label(), pw, ph, metrics).unwrap();

                        let touches_x = match alignment.horizontal {
                            HorizontalAlign::Left => close(rect.x(), 0.0),
                            HorizontalAlign::Center => close(rect.x() + rect.width() / 2.0, pw / 2.0),
                            HorizontalAlign::Right => close(rect.right(), pw),
                        };
                        let touches_y = match alignment.vertical {
                            VerticalAlign::Top => close(rect.y(), 0.0),
                            VerticalAlign::Middle => close(rect.y() + rect.height() / 2.0, ph / 2.0),
                            VerticalAlign::Bottom => close(rect.bottom(), ph),
                        };
                        assert!(
                            touches_x && touches_y,
                            "{:?} parent {}x{} metrics {}x{} -> {:?}",
                            anchor, pw, ph, mw, mh, rect
                        );
                        assert_eq!(rect.size(), metrics);
                    }
                }
            }
        }
    }
}

#[test]
fn test_resolver_is_pure() {
    let metrics = Size::new(48.5, 17.0).unwrap();
    for anchor in AnchorPosition::ALL {
        let first = compute_local_rectangle(anchor, "same", 321.0, 123.0, metrics).unwrap();
        let second = compute_local_rectangle(anchor, "same", 321.0, 123.0, metrics).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_zero_metrics_sit_on_the_anchor_point() {
    for anchor in AnchorPosition::ALL {
        let rect = compute_local_rectangle(anchor, "", 160.0, 90.0, Size::ZERO).unwrap();
        let point = anchor_point(anchor, 160.0, 90.0).unwrap();
        assert_eq!(rect.origin(), point);
        assert!(rect.size().is_empty());
    }
}

#[test]
fn test_probe_height_ignores_text_length() {
    let mut surface = RecordingSurface::new(400.0, 300.0);
    let probe = TextMetricsProbe::default();
    for font in ["10px sans-serif", "20px sans-serif", "33px serif"] {
        let font: FontDescriptor = font.parse().unwrap();
        let empty = probe.measure(&mut surface, "", &font).unwrap();
        let single = probe.measure(&mut surface, "X", &font).unwrap();
        assert_eq!(empty.height(), single.height(), "{}", font);
    }
}
