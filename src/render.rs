//! Procedural drawing of the app icon
//!
//! The design is authored against a 1024px canvas and every coordinate, stroke
//! width and offset is scaled to the requested size, so the same picture can be
//! rendered at any resolution.

use image::{Rgb, RgbImage};

const BACKGROUND: Rgb<u8> = Rgb([0x21, 0x96, 0xF3]); // Material Blue 500
const CIRCLE_FILL: Rgb<u8> = Rgb([0x19, 0x76, 0xD2]);
const CIRCLE_OUTLINE: Rgb<u8> = Rgb([0x0D, 0x47, 0xA1]);
const CHECKMARK: Rgb<u8> = Rgb([0xFF, 0xFF, 0xFF]);
const PIE_FILL: Rgb<u8> = Rgb([0xFF, 0xC1, 0x07]);
const PIE_OUTLINE: Rgb<u8> = Rgb([0xFF, 0x8F, 0x00]);
const PIE_SLICE: Rgb<u8> = Rgb([0xFF, 0x57, 0x22]);

/// Canvas size the design constants below are expressed in
const DESIGN_SIZE: f32 = 1024.0;

/// Bottom rows of the background are darkened by this fraction
const GRADIENT_DEPTH: f32 = 0.3;

/// Checkmark vertices as fractions of the checkmark box
const CHECK_POINTS: [(f32, f32); 3] = [(0.2, 0.5), (0.45, 0.75), (0.8, 0.25)];
const CHECK_STROKE: f32 = 12.0;
/// The checkmark is stamped at every offset in -REACH..=REACH on both axes
const CHECK_OFFSET_REACH: f32 = 8.0;

/// Render the app icon at `size` x `size` pixels
pub fn render_app_icon(size: u32) -> RgbImage {
    let mut img = RgbImage::from_pixel(size, size, BACKGROUND);
    let s = size as f32;
    let scale = s / DESIGN_SIZE;

    // Background gradient, one horizontal line per row
    for y in 0..size {
        let shade = 1.0 - (y as f32 / s) * GRADIENT_DEPTH;
        draw_hline(&mut img, y, shaded(BACKGROUND, shade));
    }

    // Circular inset
    let margin = (size / 8) as f32;
    let radius = (s - 2.0 * margin) / 2.0;
    draw_circle(
        &mut img,
        (margin + radius, margin + radius),
        radius,
        CIRCLE_FILL,
        CIRCLE_OUTLINE,
        scaled_stroke(8.0, scale),
    );

    // Thick checkmark
    let check_margin = (size / 4) as f32;
    let check_size = s - 2.0 * check_margin;
    let points: Vec<(f32, f32)> = CHECK_POINTS
        .iter()
        .map(|(fx, fy)| (check_margin + check_size * fx, check_margin + check_size * fy))
        .collect();

    let reach = (CHECK_OFFSET_REACH * scale).round() as i32;
    let stroke = scaled_stroke(CHECK_STROKE, scale);
    for dx in -reach..=reach {
        for dy in -reach..=reach {
            let offset: Vec<(f32, f32)> = points
                .iter()
                .map(|(x, y)| (x + dx as f32, y + dy as f32))
                .collect();
            draw_polyline(&mut img, &offset, stroke, CHECKMARK);
        }
    }

    // Pie chart glyph in the top-right corner
    let pie_center = ((size - size / 4) as f32, (size / 4) as f32);
    let pie_radius = (size / 12) as f32;
    draw_circle(
        &mut img,
        pie_center,
        pie_radius,
        PIE_FILL,
        PIE_OUTLINE,
        scaled_stroke(2.0, scale),
    );
    draw_pie_slice(&mut img, pie_center, pie_radius, 0.0, 90.0, PIE_SLICE);

    img
}

fn scaled_stroke(width: f32, scale: f32) -> f32 {
    (width * scale).max(1.0)
}

fn shaded(color: Rgb<u8>, factor: f32) -> Rgb<u8> {
    let [r, g, b] = color.0;
    let apply = |c: u8| (c as f32 * factor).round().clamp(0.0, 255.0) as u8;
    Rgb([apply(r), apply(g), apply(b)])
}

fn put(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

fn draw_hline(img: &mut RgbImage, y: u32, color: Rgb<u8>) {
    for x in 0..img.width() {
        img.put_pixel(x, y, color);
    }
}

/// Clamp a float bounding box to pixel indices inside the image
fn pixel_range(lo: f32, hi: f32, limit: u32) -> std::ops::RangeInclusive<i64> {
    let lo = (lo.floor() as i64).max(0);
    let hi = (hi.ceil() as i64).min(limit as i64 - 1);
    lo..=hi
}

/// Filled circle with an inner outline band of `outline_width` pixels
fn draw_circle(
    img: &mut RgbImage,
    center: (f32, f32),
    radius: f32,
    fill: Rgb<u8>,
    outline: Rgb<u8>,
    outline_width: f32,
) {
    let (cx, cy) = center;
    for y in pixel_range(cy - radius, cy + radius, img.height()) {
        for x in pixel_range(cx - radius, cx + radius, img.width()) {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist > radius {
                continue;
            }
            let color = if dist > radius - outline_width { outline } else { fill };
            put(img, x, y, color);
        }
    }
}

/// Filled wedge between two angles in degrees, measured clockwise from 3 o'clock
fn draw_pie_slice(
    img: &mut RgbImage,
    center: (f32, f32),
    radius: f32,
    start_deg: f32,
    end_deg: f32,
    color: Rgb<u8>,
) {
    let (cx, cy) = center;
    for y in pixel_range(cy - radius, cy + radius, img.height()) {
        for x in pixel_range(cx - radius, cx + radius, img.width()) {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            // y grows downwards, so atan2 already runs clockwise
            let angle = dy.atan2(dx).to_degrees().rem_euclid(360.0);
            if angle >= start_deg && angle <= end_deg {
                put(img, x, y, color);
            }
        }
    }
}

fn draw_polyline(img: &mut RgbImage, points: &[(f32, f32)], width: f32, color: Rgb<u8>) {
    for pair in points.windows(2) {
        draw_segment(img, pair[0], pair[1], width, color);
    }
}

/// Stroke a segment with round caps: every pixel within `width / 2` of it
fn draw_segment(img: &mut RgbImage, a: (f32, f32), b: (f32, f32), width: f32, color: Rgb<u8>) {
    let half = width / 2.0;
    let (ax, ay) = a;
    let (bx, by) = b;
    let (ex, ey) = (bx - ax, by - ay);
    let len_sq = ex * ex + ey * ey;

    for y in pixel_range(ay.min(by) - half, ay.max(by) + half, img.height()) {
        for x in pixel_range(ax.min(bx) - half, ax.max(bx) + half, img.width()) {
            let (px, py) = (x as f32, y as f32);
            let t = if len_sq > 0.0 {
                (((px - ax) * ex + (py - ay) * ey) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let (qx, qy) = (ax + t * ex - px, ay + t * ey - py);
            if qx * qx + qy * qy <= half * half {
                put(img, x, y, color);
            }
        }
    }
}
