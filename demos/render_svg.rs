//! Render a wallet-connect style URI to SVG and PNG files
//!
//! Usage: cargo run --example render_svg

use qreye::output::svg::{SvgOptions, to_svg};
use qreye::{OutputOptions, Renderer, RenderStyle};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let renderer = Renderer::with_style(RenderStyle::default());
    let uri = "wc:8a5e5bdc-a0e4-4702-ba63-8f1a5655744f@2?relay-protocol=irn";
    let graphic = renderer.render_graphic(uri, 500.0, 100.0)?;

    let options = OutputOptions::default();
    std::fs::write("qreye_output.svg", to_svg(&graphic, &options.svg_options()))?;
    println!("✓ QR code written to qreye_output.svg");
    println!(
        "  {} dots, {} line segments",
        graphic.dots().count(),
        graphic.line_segments().count()
    );

    // Plain shapes without card or logo plate
    std::fs::write("qreye_bare.svg", to_svg(&graphic, &SvgOptions::bare()))?;
    println!("✓ Bare shapes written to qreye_bare.svg");

    #[cfg(feature = "raster")]
    {
        let image = qreye::output::raster::to_image(&graphic, &options.raster_options())?;
        image.save("qreye_output.png")?;
        println!("✓ Raster written to qreye_output.png");
    }

    Ok(())
}
