use backdrop::prelude::*;

/// Bounding box of pixels that are clearly darker than the white background.
fn dark_bbox(surface: &Surface) -> Option<(u32, u32, u32, u32)> {
    let mut bbox: Option<(u32, u32, u32, u32)> = None;
    for (x, y, p) in surface.as_image().enumerate_pixels() {
        if p[0] < 128 && p[1] < 128 && p[2] < 128 {
            bbox = Some(match bbox {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
    }
    bbox
}

fn skip_without_fonts() -> bool {
    if !backdrop::fonts_available() {
        eprintln!("no system fonts available, skipping glyph assertions");
        return true;
    }
    false
}

#[test]
fn empty_text_paints_only_background() {
    let request = RenderRequest::new("").background_color(Color::parse("#336699").unwrap());
    let surface = backdrop::render(&request);
    assert_eq!(surface.dimensions(), (1200, 1200));
    let expected = Color::from_hex(0x336699).to_rgba();
    assert!(surface.as_image().pixels().all(|p| *p == expected));
}

#[test]
fn hi_is_centered_half_a_line_below_center() {
    if skip_without_fonts() {
        return;
    }
    let request = RenderRequest::new("Hi")
        .background_color(Color::parse("#ffffff").unwrap())
        .text_color(Color::parse("#000000").unwrap());
    let surface = backdrop::render(&request);

    let (x0, y0, x1, y1) = dark_bbox(&surface).expect("text pixels");
    let cx = (x0 + x1) as f64 / 2.0;
    let cy = (y0 + y1) as f64 / 2.0;
    assert!((cx - 600.0).abs() <= 6.0, "horizontal center {cx}");
    assert!((cy - 624.0).abs() <= 12.0, "vertical center {cy}");
    // One 40px line: the cluster stays inside its 48px line box
    assert!(y0 >= 596 && y1 <= 652, "rows {y0}..{y1}");
    assert!(x1 - x0 < 100, "cluster too wide: {x0}..{x1}");

    assert_eq!(surface.pixel(0, 0), Some(Color::WHITE));
    assert_eq!(surface.pixel(600, 500), Some(Color::WHITE));
    assert_eq!(surface.pixel(1199, 1199), Some(Color::WHITE));
}

#[test]
fn offset_translates_text() {
    if skip_without_fonts() {
        return;
    }
    let base = RenderRequest::new("Hi");
    let moved = base.clone().offset(Offset::new(-200.0, 150.0));

    let (ax0, ay0, _, _) = dark_bbox(&backdrop::render(&base)).expect("text pixels");
    let (bx0, by0, _, _) = dark_bbox(&backdrop::render(&moved)).expect("text pixels");
    assert_eq!(bx0 as i64 - ax0 as i64, -200);
    assert_eq!(by0 as i64 - ay0 as i64, 150);
}

#[test]
fn text_can_be_dragged_off_canvas() {
    let request = RenderRequest::new("Hi").offset(Offset::new(5000.0, -5000.0));
    let surface = backdrop::render(&request);
    assert!(dark_bbox(&surface).is_none());
}

#[test]
fn huge_offsets_do_not_panic() {
    for offset in [
        Offset::new(3.0e9, 0.0),
        Offset::new(-3.0e9, 0.0),
        Offset::new(0.0, 3.0e9),
        Offset::new(1.0e300, -1.0e300),
    ] {
        let surface = backdrop::render(&RenderRequest::new("Hi").offset(offset));
        assert!(dark_bbox(&surface).is_none(), "text visible at {offset:?}");
    }
}

#[test]
fn rendering_is_idempotent() {
    let request = RenderRequest::new("The same words twice over")
        .font_family("Arial")
        .text_color(Color::from_hex(0xaa3300))
        .offset(Offset::new(13.0, -77.0));
    let first = backdrop::render(&request);
    let second = backdrop::render(&request);
    assert!(first.as_raw() == second.as_raw(), "renders differ");

    let mut compositor = Compositor::new(CanvasConfig::default());
    let mut surface = Surface::new(1200, 1200);
    compositor.compose_into(&request, &mut surface);
    assert!(surface.as_raw() == first.as_raw(), "fresh compositor differs");
}

#[test]
fn long_text_wraps_to_canvas_width() {
    if skip_without_fonts() {
        return;
    }
    let style = StyleConfig::default();
    let text = "word ".repeat(400);
    let text = text.trim_end();
    let lines = backdrop::wrap_text(text, &style);

    assert!(lines.len() > 1);
    assert!(lines.len() <= 26, "{} lines", lines.len());
    assert_eq!(lines.join(" "), text);
    for line in &lines[..lines.len() - 1] {
        assert!(backdrop::measure_text(line, &style) <= 1200.0, "{line:?} too wide");
    }
}

#[test]
fn every_oversized_word_gets_a_line() {
    if skip_without_fonts() {
        return;
    }
    let style = StyleConfig::default();
    let wide = "W".repeat(60);
    let text = format!("{wide} {wide} {wide}");
    let lines = backdrop::wrap_text(&text, &style);
    // The first word already overflows, so the empty line before it is kept
    assert_eq!(lines, vec![String::new(), wide.clone(), wide.clone(), wide]);
}

#[test]
fn overlong_single_word_starts_on_the_second_line() {
    if skip_without_fonts() {
        return;
    }
    let word = "M".repeat(60);
    assert_eq!(
        backdrop::wrap_text(&word, &StyleConfig::default()),
        vec![String::new(), word.clone()]
    );

    let surface = backdrop::render(&RenderRequest::new(word));
    let (_, y0, _, y1) = dark_bbox(&surface).expect("text pixels");
    // Line 1's box spans 648..696
    assert!(y0 >= 644 && y1 <= 700, "rows {y0}..{y1}");
}

#[test]
fn multi_line_block_stacks_downward() {
    if skip_without_fonts() {
        return;
    }
    let style = StyleConfig::default();
    let wide = "M".repeat(60);
    let text = format!("{wide} {wide}");
    let lines = backdrop::wrap_text(&text, &style);
    assert_eq!(lines.len(), 3);
    assert!(lines[0].is_empty());

    let surface = backdrop::render(&RenderRequest::new(text));
    let (_, y0, _, y1) = dark_bbox(&surface).expect("text pixels");
    assert!(y0 >= 644, "first painted line starts above its box: {y0}");
    assert!(y1 > 700 && y1 <= 748, "last line rows end at {y1}");
}

#[test]
fn uploaded_image_is_stretched_under_text() {
    let bytes = {
        let img = image::RgbaImage::from_pixel(30, 10, image::Rgba([0, 0, 200, 255]));
        let mut out = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
            .unwrap();
        out
    };
    let image = BackgroundLoader::spawn(ImageSource::from(bytes)).wait().unwrap();
    let request = RenderRequest::new("")
        .background_color(Color::WHITE)
        .background_image(image);
    let surface = backdrop::render(&request);
    assert_eq!(surface.pixel(0, 0), Some(Color::rgb(0, 0, 200)));
    assert_eq!(surface.pixel(1199, 1199), Some(Color::rgb(0, 0, 200)));
}
