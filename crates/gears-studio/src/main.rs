//! Demo scene: a skewed triangle plus one translated triangle shared by two roots.

use std::rc::Rc;

use anyhow::Result;
use gears_engine::app::Application;
use gears_engine::logging::{init_logging, LoggingConfig};
use gears_engine::paint::Color;
use gears_engine::scene::{NodeExt, Triangle};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let skewed = Triangle::from_origin((200.0, 200.0), (100.0, 400.0))?
        .skewed_x((-10.0f32).to_radians())?;

    // Two sequential translations: 250 then 500 along X, 750 in total.
    let shifted = Triangle::from_origin((200.0, 200.0), (100.0, 400.0))?
        .with_color(Color::from_rgba_u8(90, 170, 255, 255))
        .translated(250.0, 0.0)?
        .translated(500.0, 0.0)?
        .shared();

    // The same sub-tree again, half size and rotated about the origin.
    let echo = Rc::clone(&shifted)
        .scaled(0.5)?
        .rotated(std::f32::consts::FRAC_PI_8)?;

    let mut app = Application::new();
    app.title("gears studio")
        .clear_color(Color::from_rgba_u8(24, 24, 32, 255))
        .attach_node(skewed.shared())
        .attach_node(shifted)
        .attach_node(echo.shared())
        .resize(1024.0, 768.0);

    log::info!("{} roots attached", app.roots().len());
    app.run()
}
