use super::*;
use crate::capture::text::normalize_raster_text;
use image::Luma;

fn gradient(w: u32, h: u32) -> GrayImage {
    GrayImage::from_fn(w, h, |x, _| Luma([((x * 255) / (w - 1)) as u8]))
}

#[test]
fn ramp_rejects_empty_and_control_chars() {
    assert!(CharRamp::new("").is_err());
    assert!(CharRamp::new("ab\n").is_err());
    assert_eq!(CharRamp::new(" .#").unwrap().len(), 3);
}

#[test]
fn ramp_pick_covers_both_ends() {
    let ramp = CharRamp::default();
    assert_eq!(ramp.pick(0.0), ' ');
    assert_eq!(ramp.pick(1.0), '@');
    assert_eq!(ramp.pick(-3.0), ' ');
    assert_eq!(ramp.pick(7.0), '@');
    assert_eq!(ramp.pick(f64::NAN), ' ');
}

#[test]
fn single_char_ramp_always_picks_it() {
    let ramp = CharRamp::new("#").unwrap();
    assert_eq!(ramp.pick(0.3), '#');
}

#[test]
fn gradient_maps_left_to_right() {
    let img = gradient(40, 20);
    let ramp = CharRamp::new(" .#").unwrap();
    let text = AsciiRasterizer::default().rasterize(&img, 4, &ramp).unwrap();
    let rows: Vec<&str> = text.split('\n').collect();
    // cell width 10px, cell height 20px -> one row.
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].chars().count(), 4);
    assert!(rows[0].starts_with(' '));
    assert!(rows[0].ends_with('#'));
}

#[test]
fn cell_aspect_controls_row_count() {
    let img = GrayImage::new(100, 100);
    let ramp = CharRamp::default();
    let r = AsciiRasterizer {
        cell_aspect: 0.5,
        ..AsciiRasterizer::default()
    };
    let text = r.rasterize(&img, 10, &ramp).unwrap();
    assert_eq!(text.split('\n').count(), 5);
    let square = AsciiRasterizer {
        cell_aspect: 1.0,
        ..r
    };
    assert_eq!(square.rasterize(&img, 10, &ramp).unwrap().split('\n').count(), 10);
}

#[test]
fn invert_flips_the_ramp() {
    let img = GrayImage::from_pixel(4, 8, Luma([255]));
    let ramp = CharRamp::default();
    let normal = AsciiRasterizer::default().rasterize(&img, 2, &ramp).unwrap();
    let inverted = AsciiRasterizer {
        invert: true,
        ..AsciiRasterizer::default()
    }
    .rasterize(&img, 2, &ramp)
    .unwrap();
    assert!(normal.chars().all(|c| c == '@' || c == '\n'));
    assert!(inverted.chars().all(|c| c == ' ' || c == '\n'));
}

#[test]
fn more_columns_than_pixels_still_fills_every_cell() {
    let img = GrayImage::from_pixel(3, 3, Luma([255]));
    let text = AsciiRasterizer::default()
        .rasterize(&img, 9, &CharRamp::default())
        .unwrap();
    assert!(text.split('\n').all(|row| row.chars().count() == 9));
}

#[test]
fn empty_image_yields_nothing() {
    let img = GrayImage::new(0, 0);
    assert!(
        AsciiRasterizer::default()
            .rasterize(&img, 10, &CharRamp::default())
            .is_none()
    );
}

#[test]
fn markup_output_normalizes_to_plain_output() {
    let img = gradient(64, 32);
    let ramp = CharRamp::new(" <&>\"#").unwrap();
    let plain = AsciiRasterizer::default().rasterize(&img, 16, &ramp).unwrap();
    let markup = AsciiRasterizer {
        markup: true,
        ..AsciiRasterizer::default()
    }
    .rasterize(&img, 16, &ramp)
    .unwrap();
    assert!(markup.contains("<br/>"));
    assert!(markup.contains("&nbsp;"));
    assert_eq!(normalize_raster_text(&markup), plain);
}

#[test]
fn capacity_hint_never_overflows() {
    assert_eq!(capacity_hint(8, 32), 8 * 38);
    assert_eq!(capacity_hint(41_250, 110_000), 1 << 20);
    assert_eq!(capacity_hint(u32::MAX, u32::MAX), 1 << 20);
}

#[test]
fn very_wide_rasters_are_produced() {
    let img = GrayImage::from_pixel(800, 1, Luma([255]));
    let text = AsciiRasterizer::default()
        .rasterize(&img, 70_000, &CharRamp::default())
        .unwrap();
    let rows: Vec<&str> = text.split('\n').collect();
    assert_eq!(rows.len(), 43);
    assert!(rows.iter().all(|r| r.chars().count() == 70_000));
}
