//! Simulate an interactive session: type, restyle, drag, then export.
//!
//! Run with: RUST_LOG=debug cargo run --example drag_session

use backdrop::prelude::*;

fn main() -> backdrop::Result<()> {
    env_logger::init();

    let mut editor = Editor::new(CanvasConfig::default());
    editor.subscribe(|_, flags| println!("rendered for {flags:?}"));

    editor.set_text("Drag this text around the canvas");
    editor.batch(|e| {
        e.set_font_family("Arial");
        e.set_text_color(Color::parse("#fafafa")?);
        e.set_background_color(Color::parse("#1e3a5f")?);
        Ok::<_, backdrop::Error>(())
    })?;

    // The canvas sits 40px from the left and 120px from the top of the page
    editor.set_canvas_bounds(CanvasBounds::new(40.0, 120.0, 1200.0, 1200.0));
    editor.handle_pointer(PointerEvent::Down { x: 640.0, y: 720.0 });
    editor.batch(|e| {
        for step in 0..=30 {
            let t = step as f64 / 30.0;
            e.handle_pointer(PointerEvent::Move {
                x: 640.0 - 180.0 * t,
                y: 720.0 - 300.0 * t,
            });
        }
    });
    editor.handle_pointer(PointerEvent::Up { x: 460.0, y: 420.0 });

    let offset = editor.request().offset;
    println!(
        "{} render(s), offset ({}, {}), lines {:?}",
        editor.render_count(),
        offset.x,
        offset.y,
        editor.lines()
    );

    let path = editor.config().export.file_name();
    std::fs::write(&path, editor.export()?)?;
    println!("wrote {path}");
    Ok(())
}
