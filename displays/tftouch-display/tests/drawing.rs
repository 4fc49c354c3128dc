//! Address windows, batches and fills against the panel model

mod common;

use common::{cmd, init, window_words};
use proptest::prelude::*;
use tftouch_display::color::{BLACK, BLUE, GREEN, RED, WHITE};
use tftouch_display::Orientation;
use tftouch_hal_sim::Sim;

#[test]
fn test_fill_rect_clamps_to_corner() {
    let sim = Sim::new();
    let mut display = init(&sim);

    display.fill_rect(310, 230, 100, 100, RED).unwrap();

    let words = sim.take_words();
    assert_eq!(&words[..10], &window_words(310, 230, 319, 239)[..]);
    assert_eq!(words[10], cmd(0x2C));
    assert_eq!(sim.pixels_written(), 100);
    sim.with_panel(|panel| {
        assert_eq!(panel.count_color(310, 230, 319, 239, RED), 100);
        assert_eq!(panel.clipped_pixels(), 0);
    });
}

#[test]
fn test_fill_rect_origin_past_edge() {
    let sim = Sim::new();
    let mut display = init(&sim);

    display.fill_rect(400, 300, 5, 5, GREEN).unwrap();

    // Pulled back onto the last column and row
    assert_eq!(sim.pixels_written(), 1);
    assert_eq!(sim.pixel(319, 239), Some(GREEN));
}

#[test]
fn test_fill_rect_zero_size_is_noop() {
    let sim = Sim::new();
    let mut display = init(&sim);

    display.fill_rect(10, 10, 0, 5, RED).unwrap();
    display.fill_rect(10, 10, 5, 0, RED).unwrap();

    assert!(sim.take_words().is_empty());
    assert_eq!(sim.pixels_written(), 0);
}

#[test]
fn test_fill_rect_inside() {
    let sim = Sim::new();
    let mut display = init(&sim);

    display.fill_rect(5, 6, 7, 8, BLUE).unwrap();

    assert_eq!(sim.pixels_written(), 56);
    sim.with_panel(|panel| {
        assert_eq!(panel.count_color(5, 6, 11, 13, BLUE), 56);
        assert_eq!(panel.count_color(0, 0, 319, 239, BLUE), 56);
    });
}

#[test]
fn test_draw_pixel_out_of_range_is_ignored() {
    let sim = Sim::new();
    let mut display = init(&sim);

    display.draw_pixel(320, 0, WHITE).unwrap();
    display.draw_pixel(0, 240, WHITE).unwrap();

    assert!(sim.take_words().is_empty());
}

#[test]
fn test_draw_pixel_respects_portrait_bounds() {
    let sim = Sim::new();
    let mut display = init(&sim);
    display.set_orientation(Orientation::Deg90).unwrap();
    sim.take_words();

    display.draw_pixel(250, 10, WHITE).unwrap();
    assert!(sim.take_words().is_empty());

    display.draw_pixel(10, 300, WHITE).unwrap();
    assert_eq!(sim.pixel(10, 300), Some(WHITE));
}

#[test]
fn test_batch_fills_window_once() {
    let sim = Sim::new();
    let mut display = init(&sim);

    let mut batch = display.batch_start(100, 50, 4, 3).unwrap();
    for i in 0..12u16 {
        batch.draw(i + 1).unwrap();
    }
    batch.stop();

    assert_eq!(sim.pixels_written(), 12);
    assert_eq!(sim.pixel(100, 50), Some(1));
    assert_eq!(sim.pixel(103, 50), Some(4));
    assert_eq!(sim.pixel(100, 51), Some(5));
    assert_eq!(sim.pixel(103, 52), Some(12));
    // Nothing spilled into the row below the window
    assert_eq!(sim.pixel(100, 53), Some(BLACK));
    assert!(sim.violations().is_empty());
}

#[test]
fn test_dropping_batch_releases_chip_select() {
    let sim = Sim::new();
    let mut display = init(&sim);

    {
        let mut batch = display.batch_start(0, 0, 2, 2).unwrap();
        batch.draw_repeated(RED, 4).unwrap();
        assert!(!sim.line(tftouch_hal_sim::Line::DisplayCs));
    }

    assert!(sim.line(tftouch_hal_sim::Line::DisplayCs));
    assert_eq!(sim.with_panel(|p| p.count_color(0, 0, 1, 1, RED)), 4);
}

#[test]
fn test_fill_screen_counts() {
    let sim = Sim::new();
    let mut display = init(&sim);

    display.fill_screen(WHITE).unwrap();
    assert_eq!(sim.pixels_written(), 320 * 240);

    display.set_orientation(Orientation::Deg90).unwrap();
    sim.reset_pixel_count();
    display.fill_screen(RED).unwrap();
    assert_eq!(sim.pixels_written(), 240 * 320);
    assert_eq!(sim.with_panel(|p| p.count_color(0, 0, 239, 319, RED)), 240 * 320);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_fill_rect_stays_on_screen(
        x in 0u16..400,
        y in 0u16..300,
        w in 1u16..400,
        h in 1u16..300,
    ) {
        let sim = Sim::new();
        let mut display = init(&sim);

        display.fill_rect(x, y, w, h, WHITE).unwrap();

        let (column, page) = sim.with_panel(|p| (p.column(), p.page()));
        prop_assert!(column.0 <= column.1 && column.1 < 320);
        prop_assert!(page.0 <= page.1 && page.1 < 240);

        let expected = u64::from(column.1 - column.0 + 1) * u64::from(page.1 - page.0 + 1);
        prop_assert_eq!(sim.pixels_written(), expected);
        prop_assert_eq!(sim.with_panel(|p| p.clipped_pixels()), 0);
    }
}
