use crate::Result;
use backdrop::prelude::*;
use image::RgbaImage;
use std::path::Path;

/// A named render to keep under regression.
#[derive(Clone, Copy)]
pub struct Scenario {
    pub name: &'static str,
    build: fn() -> RenderRequest,
}

impl Scenario {
    pub const fn new(name: &'static str, build: fn() -> RenderRequest) -> Self {
        Self { name, build }
    }

    pub fn request(&self) -> RenderRequest {
        (self.build)()
    }
}

/// Render a scenario through the crate's thread-local compositor.
pub fn capture(scenario: &Scenario) -> RgbaImage {
    backdrop::render(&scenario.request()).into_image()
}

/// Render a scenario and store it as PNG at `output`.
pub fn capture_to(scenario: &Scenario, output: &Path) -> Result<RgbaImage> {
    let image = capture(scenario);
    image.save(output)?;
    Ok(image)
}

fn checkerboard(size: u32, cell: u32) -> BackgroundImage {
    let pixels = RgbaImage::from_fn(size, size, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            image::Rgba([230, 120, 40, 255])
        } else {
            image::Rgba([30, 60, 120, 255])
        }
    });
    BackgroundImage::new(pixels).expect("checkerboard is non-empty")
}

/// Every scenario covered by the visual suite.
pub fn scenarios() -> &'static [Scenario] {
    const ALL: &[Scenario] = &[
        Scenario::new("blank", RenderRequest::default),
        Scenario::new("hello_centered", || RenderRequest::new("Hello")),
        Scenario::new("custom_colors", || {
            RenderRequest::new("Simple background maker")
                .text_color(Color::from_hex(0xfafafa))
                .background_color(Color::from_hex(0x1e3a5f))
        }),
        Scenario::new("serif_offset", || {
            RenderRequest::new("Dragged up and left")
                .font_family(FontFamily::Serif)
                .offset(Offset::new(-220.0, -300.0))
        }),
        Scenario::new("long_wrap", || {
            RenderRequest::new(
                "The quick brown fox jumps over the lazy dog while the five boxing \
                 wizards jump quickly and a sphinx of black quartz judges my vow",
            )
        }),
        Scenario::new("image_background", || {
            RenderRequest::new("Over an image")
                .text_color(Color::WHITE)
                .background_image(checkerboard(64, 8))
        }),
    ];
    ALL
}

pub fn scenario(name: &str) -> Option<&'static Scenario> {
    scenarios().iter().find(|s| s.name == name)
}
