//! Card face rendering tests.
//!
//! These cover the observable guarantees of a single face:
//! - byte-identical output for identical input
//! - the bottom index is the half-turn of the top index
//! - unresolvable pips are dropped without disturbing the rest

use std::fs;
use std::path::PathBuf;

use image::{Rgba, RgbaImage};
use pipdeck::{
    CardRenderer, DeckConfig, IconSource, Pip, PipBounds, PipKind, PipPosition, Point, Rank,
    encode_png, inked_pixels,
};
use pretty_assertions::assert_eq;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

const SPADES: &str = r##"{
    "background": "#ffffff",
    "suits": [ { "name": "spades", "color": "#000000", "icon": { "glyph": "♠" } } ]
}"##;

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pipdeck-{tag}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn spades() -> DeckConfig {
    DeckConfig::from_json_str(SPADES, ".").unwrap()
}

fn rank(value: u8) -> Rank {
    Rank::new(value).unwrap()
}

fn render(config: &DeckConfig, rank: Rank, pips: Option<&[Pip]>) -> RgbaImage {
    let renderer = CardRenderer::new(config).unwrap();
    let suit = &config.suits[0];
    let icon = renderer.load_suit_icon(suit).unwrap();
    renderer.render_face(rank, suit, &icon, pips).unwrap()
}

fn face(config: &DeckConfig, rank: Rank, pips: &[Pip]) -> RgbaImage {
    render(config, rank, Some(pips))
}

/// Pixels that differ from the background, as (x, y).
fn ink(image: &RgbaImage) -> Vec<(u32, u32)> {
    image
        .enumerate_pixels()
        .filter(|(_, _, p)| **p != WHITE)
        .map(|(x, y, _)| (x, y))
        .collect()
}

fn within(points: &[(u32, u32)], x: std::ops::Range<u32>, y: std::ops::Range<u32>) -> bool {
    points.iter().all(|(px, py)| x.contains(px) && y.contains(py))
}

/// Test that the same card renders to the same PNG bytes every time.
#[test]
fn test_rendering_is_deterministic() {
    let config = spades();
    let pips = vec![Pip::at("TOP_CENTER"), Pip::at("MID_CENTER").rotated(33.0)];

    let first = {
        let renderer = CardRenderer::new(&config).unwrap();
        let suit = &config.suits[0];
        let icon = renderer.load_suit_icon(suit).unwrap();
        renderer.render_card(rank(7), suit, &icon, Some(pips.as_slice())).unwrap()
    };
    let second = {
        let renderer = CardRenderer::new(&config).unwrap();
        let suit = &config.suits[0];
        let icon = renderer.load_suit_icon(suit).unwrap();
        renderer.render_card(rank(7), suit, &icon, Some(pips.as_slice())).unwrap()
    };
    assert_eq!(first, second);
}

/// Test that with no pips the card is its own half-turn, so the bottom index mirrors the top.
#[test]
fn test_corner_indices_are_point_symmetric() {
    let config = spades();
    for value in [2, 10, 12, 14] {
        let image = face(&config, rank(value), &[]);
        let (width, height) = image.dimensions();
        for (x, y, pixel) in image.enumerate_pixels() {
            assert_eq!(
                pixel,
                image.get_pixel(width - 1 - x, height - 1 - y),
                "rank {value} differs at ({x}, {y})"
            );
        }
        assert!(inked_pixels(&image, WHITE) > 0);
    }
}

/// Test that the end-to-end spades two shows background, two indices and one pip only.
#[test]
fn test_spades_two_with_single_top_center_pip() {
    let config = spades();
    let indices_only = face(&config, rank(2), &[]);
    let with_pip = face(&config, rank(2), &[Pip::at("TOP_CENTER")]);

    // Indices: top-left cell plus the suit icon below it, and the mirrored bottom-right.
    let index_ink = ink(&indices_only);
    let (top, bottom): (Vec<_>, Vec<_>) = index_ink.iter().copied().partition(|(_, y)| *y < 192);
    assert!(!top.is_empty() && !bottom.is_empty());
    assert!(within(&top, 0..64, 0..112));
    assert!(within(&bottom, 192..256, 272..384));

    // The pip adds ink only inside the one-cell box centred on TOP_CENTER (128, 96).
    let added: Vec<(u32, u32)> = with_pip
        .enumerate_pixels()
        .filter(|(x, y, p)| *p != indices_only.get_pixel(*x, *y))
        .map(|(x, y, _)| (x, y))
        .collect();
    assert!(!added.is_empty());
    assert!(within(&added, 96..160, 64..128));
    assert!(added.iter().all(|(x, y)| *with_pip.get_pixel(*x, *y) == BLACK));
}

/// Test that the top index label is drawn upright.
#[test]
fn test_top_index_is_upright() {
    let config = spades();
    let image = face(&config, rank(14), &[]);
    // Bitmap "A" is 40x56 centred on (32, 32): apex row is 01110, left leg 1 in row 6.
    assert_eq!(*image.get_pixel(12, 4), WHITE);
    assert_eq!(*image.get_pixel(20, 4), BLACK);
    assert_eq!(*image.get_pixel(12, 59), BLACK);
}

/// Test that an empty layout and a missing layout both yield indices only.
#[test]
fn test_empty_and_missing_layouts_match() {
    let config = spades();
    let empty = face(&config, rank(9), &[]);
    let missing = render(&config, rank(9), None);
    assert_eq!(empty, missing);
    assert!(ink(&empty).iter().all(|(_, y)| *y < 112 || *y >= 272));
}

/// Test that an unknown anchor is skipped and does not shift other pips.
#[test]
fn test_unresolvable_pip_is_omitted() {
    let config = spades();
    let clean = vec![Pip::at("TOP_CENTER"), Pip::at("BOTTOM_CENTER").rotated(180.0)];
    let noisy = vec![
        Pip::at("TOP_CENTER"),
        Pip::at("NOT_A_POINT"),
        Pip::default(),
        Pip::at("BOTTOM_CENTER").rotated(180.0),
    ];
    assert_eq!(face(&config, rank(3), &clean), face(&config, rank(3), &noisy));
}

/// Test that `down` is the same as a 180 degree rotation.
#[test]
fn test_down_flag_matches_half_turn() {
    let config = spades();
    let down = Pip {
        down: true,
        rotate: 45.0,
        ..Pip::at("MID_CENTER")
    };
    let turned = Pip::at("MID_CENTER").rotated(180.0);
    assert_eq!(face(&config, rank(5), &[down]), face(&config, rank(5), &[turned]));
}

/// Test that literal pixel positions are honoured.
#[test]
fn test_literal_position_matches_named_anchor() {
    let config = spades();
    let named = Pip::at("MID_CENTER");
    let literal = Pip {
        position: Some(PipPosition::Literal(Point::new(128.0, 192.0))),
        ..Pip::default()
    };
    assert_eq!(face(&config, rank(6), &[named]), face(&config, rank(6), &[literal]));
}

/// Test that pip scale shrinks the drawn glyph around its anchor.
#[test]
fn test_pip_scale_shrinks_glyph() {
    let config = spades();
    let base = face(&config, rank(8), &[]);
    let full = face(&config, rank(8), &[Pip::at("MID_CENTER")]);
    let half = face(
        &config,
        rank(8),
        &[Pip {
            scale: Some(0.5),
            ..Pip::at("MID_CENTER")
        }],
    );
    let grown = |image: &RgbaImage| {
        image
            .enumerate_pixels()
            .filter(|(x, y, p)| *p != base.get_pixel(*x, *y))
            .map(|(x, y, _)| (x, y))
            .collect::<Vec<_>>()
    };
    let full_ink = grown(&full);
    let half_ink = grown(&half);
    assert!(half_ink.len() * 3 < full_ink.len());
    assert!(within(&half_ink, 112..144, 176..208));
}

/// Test that IMAGE pips stretch the suit-colored asset into their named bounds.
#[test]
fn test_image_pip_fills_named_bounds() {
    let dir = scratch_dir("image-pip");
    let red = Rgba([0xcc, 0, 0, 0xff]);
    RgbaImage::from_pixel(2, 2, red)
        .save(dir.join("cc0000.png"))
        .unwrap();
    let config = DeckConfig::from_json_str(
        r##"{ "suits": [ { "name": "hearts", "color": "#cc0000", "icon": { "glyph": "♥" } } ] }"##,
        &dir,
    )
    .unwrap();
    let pip = Pip {
        kind: PipKind::Image,
        bounds: Some(PipBounds::named("LEFT", "TOP", "RIGHT", "BOTTOM")),
        ..Pip::default()
    };
    let image = face(&config, rank(11), &[pip]);
    fs::remove_dir_all(&dir).unwrap();

    let renderer = CardRenderer::new(&config).unwrap();
    let grid = renderer.grid();
    assert_eq!(
        [grid.x("LEFT"), grid.y("TOP"), grid.x("RIGHT"), grid.y("BOTTOM")],
        [Some(64.0), Some(96.0), Some(192.0), Some(288.0)]
    );
    assert_eq!(*image.get_pixel(64, 96), red);
    assert_eq!(*image.get_pixel(128, 192), red);
    assert_eq!(*image.get_pixel(191, 287), red);
    assert_eq!(*image.get_pixel(192, 192), WHITE);
    assert_eq!(*image.get_pixel(128, 288), WHITE);
}

/// Test that a raster suit icon and a per-pip icon override are both drawn.
#[test]
fn test_raster_icons_and_pip_override() {
    let dir = scratch_dir("raster-icon");
    let blue = Rgba([0, 0, 0xff, 0xff]);
    let green = Rgba([0, 0x80, 0, 0xff]);
    RgbaImage::from_pixel(4, 4, blue).save(dir.join("blue.png")).unwrap();
    RgbaImage::from_pixel(4, 4, green).save(dir.join("green.png")).unwrap();
    let config = DeckConfig::from_json_str(
        r##"{ "suits": [ { "name": "orbs", "color": "#0000ff", "icon": { "image": "blue.png" } } ] }"##,
        &dir,
    )
    .unwrap();
    let pips = vec![
        Pip::at("TOP_CENTER"),
        Pip {
            icon: Some(IconSource::Image(PathBuf::from("green.png"))),
            ..Pip::at("BOTTOM_CENTER")
        },
    ];
    let image = face(&config, rank(2), &pips);
    fs::remove_dir_all(&dir).unwrap();

    // Raster icons are stretched to the full cell around the anchor.
    assert_eq!(*image.get_pixel(96, 64), blue);
    assert_eq!(*image.get_pixel(159, 127), blue);
    assert_eq!(*image.get_pixel(95, 96), WHITE);
    assert_eq!(*image.get_pixel(128, 288), green);
}

/// Test that a missing suit icon file is reported as an asset error.
#[test]
fn test_missing_icon_asset_fails() {
    let config = DeckConfig::from_json_str(
        r##"{ "suits": [ { "name": "ghosts", "color": "#000", "icon": { "image": "pipdeck-missing-icon.png" } } ] }"##,
        std::env::temp_dir(),
    )
    .unwrap();
    let renderer = CardRenderer::new(&config).unwrap();
    let err = renderer.load_suit_icon(&config.suits[0]).unwrap_err();
    assert!(matches!(err, pipdeck::CardError::Asset { .. }));
}

/// Test that encoded faces decode back to the same pixels.
#[test]
fn test_png_round_trip_preserves_pixels() {
    let config = spades();
    let image = face(&config, rank(13), &[Pip::at("MID_CENTER")]);
    let bytes = encode_png(&image).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded, image);
}
