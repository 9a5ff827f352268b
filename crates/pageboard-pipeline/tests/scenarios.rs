//! Integration tests: end-to-end scenarios through the public API,
//! including a PNG encode/decode hop like the CLI performs.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use pageboard_pipeline::{
    Background, BoardSection, BoardSpec, Color, LayoutMode, LayoutSpec, NormalizeOutcome,
    NormalizeSpec, PageOrder, PipelineError, Size, compose, compose_board, decode, encode_png,
    normalize,
};

fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
}

fn unlimited(mode: LayoutMode, columns: u32, margin: u32) -> LayoutSpec {
    LayoutSpec {
        mode,
        columns,
        margin,
        max_total_pixels: 0,
        ..LayoutSpec::default()
    }
}

#[test]
fn grid_of_four_squares() {
    let images: Vec<_> = (0..4).map(|_| solid(100, 100, [255, 0, 0])).collect();
    let out = compose(&images, &unlimited(LayoutMode::Grid, 2, 10)).unwrap();

    assert_eq!(out.size, Size::new(230, 230));
    assert!((out.scale - 1.0).abs() < f64::EPSILON);

    let rgb = out.image.to_rgb8();
    assert_eq!(*rgb.get_pixel(5, 5), Rgb([255, 255, 255]));
    assert_eq!(*rgb.get_pixel(10, 10), Rgb([255, 0, 0]));
    assert_eq!(*rgb.get_pixel(115, 50), Rgb([255, 255, 255]));
    assert_eq!(*rgb.get_pixel(120, 120), Rgb([255, 0, 0]));
}

#[test]
fn vertical_stack_of_mixed_widths() {
    let images = vec![
        solid(80, 50, [255, 0, 0]),
        solid(100, 50, [0, 255, 0]),
        solid(60, 50, [0, 0, 255]),
    ];
    let out = compose(&images, &unlimited(LayoutMode::Vertical, 3, 5)).unwrap();

    assert_eq!(out.size, Size::new(110, 170));

    let rgb = out.image.to_rgb8();
    // Narrow items are centered: 80 wide starts at 5 + 10.
    assert_eq!(*rgb.get_pixel(14, 5), Rgb([255, 255, 255]));
    assert_eq!(*rgb.get_pixel(15, 5), Rgb([255, 0, 0]));
    assert_eq!(*rgb.get_pixel(5, 60), Rgb([0, 255, 0]));
    assert_eq!(*rgb.get_pixel(25, 115), Rgb([0, 0, 255]));
}

#[test]
fn budget_downscales_but_never_upscales() {
    let images = vec![solid(1000, 1000, [9, 9, 9]), solid(1000, 1000, [9, 9, 9])];

    let roomy = LayoutSpec {
        max_total_pixels: 10_000_000,
        ..unlimited(LayoutMode::Vertical, 1, 0)
    };
    let out = compose(&images, &roomy).unwrap();
    assert!((out.scale - 1.0).abs() < f64::EPSILON);
    assert_eq!(out.size, Size::new(1000, 2000));

    let tight = LayoutSpec {
        max_total_pixels: 500_000,
        ..roomy
    };
    let out = compose(&images, &tight).unwrap();
    assert!(out.scale < 1.0);
    assert!(out.size.area() <= 500_000, "got {}", out.size);
}

#[test]
fn transparent_canvas_keeps_alpha() {
    let images = vec![solid(10, 10, [1, 2, 3])];
    let spec = LayoutSpec {
        background: Background::Transparent,
        ..unlimited(LayoutMode::Vertical, 1, 4)
    };
    let out = compose(&images, &spec).unwrap();
    let rgba = out.image.to_rgba8();
    assert_eq!(rgba.get_pixel(0, 0)[3], 0);
    assert_eq!(*rgba.get_pixel(4, 4), Rgba([1, 2, 3, 255]));
}

#[test]
fn compose_rejects_bad_input() {
    assert!(matches!(
        compose(&[], &LayoutSpec::default()),
        Err(PipelineError::EmptyInput)
    ));
    assert!(matches!(
        compose(&[solid(1, 1, [0, 0, 0])], &unlimited(LayoutMode::Grid, 0, 0)),
        Err(PipelineError::InvalidConfig(_))
    ));
    let empty = DynamicImage::ImageRgb8(RgbImage::new(0, 5));
    assert!(matches!(
        compose(&[solid(1, 1, [0, 0, 0]), empty], &LayoutSpec::default()),
        Err(PipelineError::ZeroDimension { index: 1 })
    ));
}

#[test]
fn board_stacks_client_above_admin() {
    let client = BoardSection {
        images: (0..4).map(|_| solid(40, 80, [200, 0, 0])).collect(),
        columns: 4,
    };
    let admin = BoardSection {
        images: (0..2).map(|_| solid(60, 40, [0, 0, 200])).collect(),
        columns: 2,
    };
    let spec = BoardSpec {
        margin: 10,
        gap: 20,
        max_total_pixels: 0,
        ..BoardSpec::default()
    };
    let out = compose_board(&[client, admin], &spec).unwrap();

    // client: 4*40 + 5*10 = 210 x 80 + 20 = 100
    // admin:  2*60 + 3*10 = 150 x 40 + 20 = 60
    assert_eq!(out.size, Size::new(210, 180));

    let rgb = out.image.to_rgb8();
    let bg = Rgb([0xF8, 0xFA, 0xFC]);
    assert_eq!(*rgb.get_pixel(10, 10), Rgb([200, 0, 0]));
    assert_eq!(*rgb.get_pixel(100, 110), bg);
    // admin section is centered: (210 - 150) / 2 = 30, plus its margin.
    assert_eq!(*rgb.get_pixel(40, 130), Rgb([0, 0, 200]));
    assert_eq!(*rgb.get_pixel(39, 130), bg);
}

#[test]
fn board_with_one_populated_section_is_just_that_grid() {
    let client = BoardSection {
        images: vec![solid(30, 30, [1, 1, 1])],
        columns: 4,
    };
    let admin = BoardSection {
        images: Vec::new(),
        columns: 2,
    };
    let spec = BoardSpec {
        margin: 5,
        max_total_pixels: 0,
        ..BoardSpec::default()
    };
    let out = compose_board(&[client, admin], &spec).unwrap();
    // Empty grid columns still take a margin each: 30 + 0 * 3 + 5 * 5.
    assert_eq!(out.size, Size::new(55, 40));
}

#[test]
fn normalize_centered_square() {
    let mut canvas = RgbImage::from_pixel(200, 200, Rgb([255, 255, 255]));
    for y in 75..125 {
        for x in 75..125 {
            canvas.put_pixel(x, y, Rgb([0, 0, 0]));
        }
    }
    // Through the codec, as files are read from disk.
    let bytes = encode_png(&DynamicImage::ImageRgb8(canvas)).unwrap();
    let image = decode(&bytes).unwrap();

    let spec = NormalizeSpec {
        tolerance: 4,
        crop_padding: 0,
        outer_margin: 10,
        ..NormalizeSpec::default()
    };
    let outcome = normalize(&image, &spec).unwrap();
    let result = outcome.normalized().expect("content should be found");

    assert_eq!(result.content.left, 75);
    assert_eq!(result.content.top, 75);
    assert_eq!(result.content.right, 125);
    assert_eq!(result.content.bottom, 125);
    assert_eq!(result.background, Background::Solid(Color::WHITE));

    let rgb = result.image.to_rgb8();
    assert_eq!(rgb.dimensions(), (70, 70));
    assert_eq!(*rgb.get_pixel(9, 9), Rgb([255, 255, 255]));
    assert_eq!(*rgb.get_pixel(10, 10), Rgb([0, 0, 0]));
    assert_eq!(*rgb.get_pixel(59, 59), Rgb([0, 0, 0]));
    assert_eq!(*rgb.get_pixel(60, 60), Rgb([255, 255, 255]));
}

#[test]
fn normalize_uniform_image_is_skipped() {
    let image = solid(100, 100, [255, 255, 255]);
    let outcome = normalize(&image, &NormalizeSpec::default()).unwrap();
    assert!(outcome.is_skipped());
    assert!(matches!(outcome, NormalizeOutcome::NoContent));
}

#[test]
fn normalize_transparent_png() {
    let mut rgba = RgbaImage::new(40, 30);
    for y in 10..20 {
        for x in 5..15 {
            rgba.put_pixel(x, y, Rgba([10, 20, 30, 255]));
        }
    }
    let image = decode(&encode_png(&DynamicImage::ImageRgba8(rgba)).unwrap()).unwrap();
    let spec = NormalizeSpec {
        crop_padding: 0,
        outer_margin: 2,
        ..NormalizeSpec::default()
    };
    let outcome = normalize(&image, &spec).unwrap();
    let result = outcome.normalized().unwrap();

    assert_eq!(result.background, Background::Transparent);
    let out = result.image.to_rgba8();
    assert_eq!(out.dimensions(), (14, 14));
    assert_eq!(out.get_pixel(0, 0)[3], 0);
    assert_eq!(*out.get_pixel(2, 2), Rgba([10, 20, 30, 255]));
}

#[test]
fn canonical_order_drives_layout_order() {
    let order = PageOrder::new(["home", "orders", "login"]).with_prefix("client");
    let mut stems = vec!["client-login", "client-extra", "client-home", "client-orders"];
    order.sort_by_stem(&mut stems, |s| *s);
    assert_eq!(
        stems,
        vec!["client-home", "client-orders", "client-login", "client-extra"]
    );
}
