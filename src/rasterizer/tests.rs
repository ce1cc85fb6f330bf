// src/rasterizer/tests.rs

use super::*;
use crate::blend::blend_plain;
use std::collections::HashSet;
use test_log::test;

const HALF_WHITE: Color = Color::rgba(0xff, 0xff, 0xff, 0x80);

fn canvas(w: i32, h: i32) -> Canvas {
    Canvas::with_size(w, h).expect("valid test canvas")
}

/// Every pixel that is no longer transparent black.
fn lit(canvas: &Canvas) -> HashSet<(i32, i32)> {
    let s = canvas.surface();
    let mut out = HashSet::new();
    for y in 0..s.height() {
        for x in 0..s.width() {
            if s.get(x, y) != Some(Color::TRANSPARENT) {
                out.insert((x, y));
            }
        }
    }
    out
}

fn line_pixels(x1: i32, y1: i32, x2: i32, y2: i32) -> HashSet<(i32, i32)> {
    let mut c = canvas(8, 8);
    c.draw_line(x1, y1, x2, y2, Color::RED);
    lit(&c)
}

#[test]
fn fill_then_point_scenario() {
    let mut c = canvas(4, 4);
    c.draw_rect_fill(Rect::new(0, 0, 4, 4), Color::RED);
    c.draw_point(2, 2, Color::BLUE);

    for y in 0..4 {
        for x in 0..4 {
            let expected = if (x, y) == (2, 2) { Color::BLUE } else { Color::RED };
            assert_eq!(c.surface().get(x, y), Some(expected), "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn transparent_color_leaves_surface_untouched() {
    let mut c = canvas(6, 6);
    c.draw_rect_fill(Rect::new(0, 0, 6, 6), Color::rgb(1, 2, 3));
    let before = c.surface().clone();

    let clear = Color::rgba(200, 10, 10, 0);
    c.draw_point(1, 1, clear);
    c.draw_line(0, 0, 5, 5, clear);
    c.draw_rect(Rect::new(0, 0, 6, 6), clear);
    c.draw_rect_fill(Rect::new(0, 0, 6, 6), clear);
    c.draw_circle(3, 3, 2, clear);
    c.draw_circle_fill(3, 3, 2, clear);

    assert_eq!(c.surface(), &before);
}

#[test]
fn point_outside_clip_is_ignored() {
    let mut c = canvas(4, 4);
    c.draw_point(-1, 0, Color::RED);
    c.draw_point(4, 0, Color::RED);
    c.draw_point(0, 4, Color::RED);
    assert!(lit(&c).is_empty());

    c.set_clip(Rect::new(1, 1, 2, 2));
    c.draw_point(0, 0, Color::RED);
    c.draw_point(1, 1, Color::RED);
    assert_eq!(lit(&c), HashSet::from([(1, 1)]));
}

#[test]
fn degenerate_line_is_one_pixel() {
    assert_eq!(line_pixels(3, 4, 3, 4), HashSet::from([(3, 4)]));
}

#[test]
fn line_includes_both_endpoints() {
    for &(x1, y1, x2, y2) in &[(0, 0, 7, 3), (1, 6, 5, 0), (7, 7, 0, 2), (2, 0, 2, 7)] {
        let px = line_pixels(x1, y1, x2, y2);
        assert!(px.contains(&(x1, y1)));
        assert!(px.contains(&(x2, y2)));
    }
}

#[test]
fn horizontal_line_length() {
    let px = line_pixels(1, 2, 6, 2);
    assert_eq!(px.len(), 6);
    assert!(px.iter().all(|&(_, y)| y == 2));
}

#[test]
fn reversed_endpoints_touch_identical_pixels() {
    for x1 in 0..6 {
        for y1 in 0..6 {
            for x2 in 0..6 {
                for y2 in 0..6 {
                    assert_eq!(
                        line_pixels(x1, y1, x2, y2),
                        line_pixels(x2, y2, x1, y1),
                        "line ({}, {}) -> ({}, {})",
                        x1,
                        y1,
                        x2,
                        y2
                    );
                }
            }
        }
    }
}

#[test]
fn line_is_one_pixel_per_major_step() {
    let px = line_pixels(0, 0, 7, 3);
    assert_eq!(px.len(), 8);
    let xs: HashSet<i32> = px.iter().map(|&(x, _)| x).collect();
    assert_eq!(xs.len(), 8);
}

#[test]
fn line_partially_off_surface_is_clipped() {
    let mut c = canvas(4, 4);
    c.draw_line(-10, 1, 10, 1, Color::RED);
    assert_eq!(lit(&c), (0..4).map(|x| (x, 1)).collect());
}

#[test]
fn rect_fill_respects_clip() {
    let mut c = canvas(8, 8);
    let clip = Rect::new(2, 3, 10, 2);
    c.set_clip(clip);
    assert_eq!(c.clip(), Rect::new(2, 3, 6, 2));

    c.draw_rect_fill(Rect::new(-100, -100, 1000, 1000), Color::GREEN);

    let visible = clip.intersect(&c.surface().bounds());
    for y in 0..8 {
        for x in 0..8 {
            let expected = if visible.contains(x, y) {
                Color::GREEN
            } else {
                Color::TRANSPARENT
            };
            assert_eq!(c.surface().get(x, y), Some(expected), "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn clip_outside_surface_blocks_all_drawing() {
    let mut c = canvas(4, 4);
    c.set_clip(Rect::new(10, 10, 5, 5));
    assert!(c.clip().is_empty());
    c.draw_rect_fill(Rect::new(0, 0, 4, 4), Color::RED);
    c.draw_line(0, 0, 3, 3, Color::RED);
    c.draw_circle_fill(2, 2, 2, Color::RED);
    assert!(lit(&c).is_empty());
}

#[test]
fn rect_fill_blends_translucent_color() {
    let mut c = canvas(2, 1);
    c.draw_rect_fill(Rect::new(0, 0, 2, 1), Color::BLACK);
    c.draw_rect_fill(Rect::new(1, 0, 1, 1), HALF_WHITE);
    assert_eq!(c.surface().get(0, 0), Some(Color::BLACK));
    assert_eq!(c.surface().get(1, 0), Some(blend_plain(Color::BLACK, HALF_WHITE)));
}

#[test]
fn empty_rect_fill_is_a_no_op() {
    let mut c = canvas(4, 4);
    c.draw_rect_fill(Rect::new(1, 1, 0, 3), Color::RED);
    c.draw_rect_fill(Rect::new(1, 1, 3, -2), Color::RED);
    assert!(lit(&c).is_empty());
}

#[test]
fn rect_outline_draws_border_only() {
    let mut c = canvas(8, 8);
    c.draw_rect(Rect::new(1, 1, 4, 3), Color::RED);
    let expected: HashSet<(i32, i32)> = [
        (1, 1), (2, 1), (3, 1), (4, 1),
        (1, 2), (4, 2),
        (1, 3), (2, 3), (3, 3), (4, 3),
    ]
    .into_iter()
    .collect();
    assert_eq!(lit(&c), expected);
}

#[test]
fn thin_rect_outline_is_a_single_line() {
    let mut c = canvas(8, 8);
    c.draw_rect(Rect::new(2, 1, 1, 4), Color::RED);
    assert_eq!(lit(&c), (1..5).map(|y| (2, y)).collect());

    let mut c = canvas(8, 8);
    c.draw_rect(Rect::new(0, 5, 3, 1), Color::RED);
    assert_eq!(lit(&c), (0..3).map(|x| (x, 5)).collect());
}

#[test]
fn rect_outline_with_empty_rect_is_a_no_op() {
    let mut c = canvas(4, 4);
    c.draw_rect(Rect::new(0, 0, 0, 4), Color::RED);
    c.draw_rect(Rect::new(0, 0, 4, -1), Color::RED);
    assert!(lit(&c).is_empty());
}

#[test]
fn translucent_rect_outline_double_blends_corners() {
    let mut c = canvas(6, 6);
    c.draw_rect_fill(Rect::new(0, 0, 6, 6), Color::BLACK);
    c.draw_rect(Rect::new(0, 0, 4, 4), HALF_WHITE);

    let once = blend_plain(Color::BLACK, HALF_WHITE);
    let twice = blend_plain(once, HALF_WHITE);
    assert_eq!(c.surface().get(1, 0), Some(once));
    assert_eq!(c.surface().get(0, 0), Some(twice));
    assert_eq!(c.surface().get(3, 3), Some(twice));
}

#[test]
fn circle_outline_small_radii() {
    let mut c = canvas(9, 9);
    c.draw_circle(4, 4, 1, Color::RED);
    assert_eq!(
        lit(&c),
        HashSet::from([(4, 5), (4, 3), (5, 4), (3, 4)])
    );

    let mut c = canvas(9, 9);
    c.draw_circle(4, 4, 2, Color::RED);
    assert_eq!(lit(&c).len(), 12);
}

#[test]
fn circle_outline_radius_zero_blends_centre_four_times() {
    let mut c = canvas(3, 3);
    c.draw_rect_fill(Rect::new(0, 0, 3, 3), Color::BLACK);
    c.draw_circle(1, 1, 0, HALF_WHITE);

    let mut expected = Color::BLACK;
    for _ in 0..4 {
        expected = blend_plain(expected, HALF_WHITE);
    }
    assert_eq!(c.surface().get(1, 1), Some(expected));
    assert_eq!(c.surface().get(0, 1), Some(Color::BLACK));
}

#[test]
fn circle_outline_is_mirror_symmetric() {
    let mut c = canvas(32, 32);
    c.draw_circle(15, 15, 9, Color::RED);
    let px = lit(&c);
    assert!(!px.is_empty());
    for &(x, y) in &px {
        assert!(px.contains(&(30 - x, y)), "missing mirror of ({}, {})", x, y);
        assert!(px.contains(&(x, 30 - y)), "missing mirror of ({}, {})", x, y);
        assert!(px.contains(&(y, x)), "missing transpose of ({}, {})", x, y);
    }
}

#[test]
fn circle_fill_non_positive_radius_is_a_no_op() {
    let mut c = canvas(8, 8);
    c.draw_circle_fill(4, 4, 0, Color::RED);
    c.draw_circle_fill(4, 4, -3, Color::RED);
    assert!(lit(&c).is_empty());
}

#[test]
fn circle_fill_centre_row_span() {
    let mut c = canvas(24, 24);
    c.draw_circle_fill(10, 10, 4, Color::RED);
    let px = lit(&c);
    assert!(!px.contains(&(6, 10)));
    for x in 7..=14 {
        assert!(px.contains(&(x, 10)), "centre row missing x={}", x);
    }
    assert!(!px.contains(&(15, 10)));
    // Nothing outside the bounding box of the circle.
    assert!(px.iter().all(|&(x, y)| (6..=14).contains(&x) && (6..=14).contains(&y)));
}

#[test]
fn circle_fill_is_clipped() {
    let mut c = canvas(8, 8);
    c.set_clip(Rect::new(0, 0, 4, 8));
    c.draw_circle_fill(4, 4, 3, Color::RED);
    let px = lit(&c);
    assert!(!px.is_empty());
    assert!(px.iter().all(|&(x, _)| x < 4));
}

#[test]
fn clear_fills_visible_area_then_resets_clip() {
    let mut c = canvas(4, 4);
    c.set_clip(Rect::new(0, 0, 2, 4));
    c.clear(Color::WHITE);

    assert_eq!(c.surface().get(1, 3), Some(Color::WHITE));
    assert_eq!(c.surface().get(2, 0), Some(Color::TRANSPARENT));
    assert_eq!(c.clip(), c.surface().bounds());

    c.clear(Color::BLUE);
    assert!(c.surface().pixels().iter().all(|p| *p == Color::BLUE));
}

#[test]
fn extreme_coordinates_draw_nothing() {
    let mut c = canvas(4, 4);
    let far = Rect::new(i32::MAX - 1, 0, 10, 10);
    c.draw_rect_fill(far, Color::RED);
    c.draw_rect(far, Color::RED);
    c.draw_rect(Rect::new(i32::MIN, i32::MIN, 3, 3), Color::RED);
    c.draw_line(i32::MIN, i32::MIN, i32::MIN + 1, i32::MAX, Color::RED);
    c.draw_line(i32::MAX, 10, i32::MAX, -10, Color::RED);
    c.draw_point(i32::MIN, i32::MAX, Color::RED);
    c.draw_circle(i32::MAX, i32::MAX, 5, Color::RED);
    c.draw_circle(i32::MIN, i32::MIN, i32::MIN, Color::RED);
    c.draw_circle_fill(i32::MIN, i32::MIN, i32::MAX, Color::RED);
    assert!(lit(&c).is_empty());
}

#[test]
fn line_from_near_the_surface_to_i32_max_is_clipped() {
    let mut c = canvas(4, 4);
    c.draw_line(-5, 0, i32::MAX, 1, Color::RED);
    // The walk starts at x = -5 and stays on row 0 across the surface.
    let expected: HashSet<_> = (0..4).map(|x| (x, 0)).collect();
    assert_eq!(lit(&c), expected);
}

#[test]
fn huge_circle_around_the_surface_stays_outside() {
    let mut c = canvas(4, 4);
    c.draw_circle(0, 0, i32::MAX, Color::RED);
    assert!(lit(&c).is_empty());

    // The fill covers the whole surface without walking every row.
    c.draw_circle_fill(0, 0, i32::MAX, Color::RED);
    assert!(c.surface().pixels().iter().all(|p| *p == Color::RED));
}

#[test]
fn circles_cut_short_by_the_clip_match_the_full_drawing() {
    let window = Rect::new(30, 12, 6, 6);
    for fill in [false, true] {
        let mut full = canvas(40, 40);
        let mut clipped = canvas(40, 40);
        clipped.set_clip(window);
        for c in [&mut full, &mut clipped] {
            if fill {
                c.draw_circle_fill(20, 20, 15, HALF_WHITE);
            } else {
                c.draw_circle(20, 20, 15, HALF_WHITE);
            }
        }
        for y in 0..40 {
            for x in 0..40 {
                let want = if window.contains(x, y) {
                    full.surface().get(x, y)
                } else {
                    Some(Color::TRANSPARENT)
                };
                assert_eq!(clipped.surface().get(x, y), want, "fill={} ({}, {})", fill, x, y);
            }
        }
    }
}

#[test]
fn long_axis_aligned_edges_are_clipped_directly() {
    let mut c = canvas(4, 4);
    c.draw_rect(Rect::new(-2_000_000_000, 1, 2_000_000_002, 2), Color::RED);
    // Top and bottom edges cross columns 0 and 1; the right edge is column 1.
    let expected: HashSet<_> = [(0, 1), (1, 1), (0, 2), (1, 2)].into_iter().collect();
    assert_eq!(lit(&c), expected);

    let mut c = canvas(4, 4);
    c.draw_line(2, i32::MIN, 2, i32::MAX, Color::RED);
    let expected: HashSet<_> = (0..4).map(|y| (2, y)).collect();
    assert_eq!(lit(&c), expected);
}
