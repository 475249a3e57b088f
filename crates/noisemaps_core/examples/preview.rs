use noisemaps_core::{generate_fractal, generate_white, GenerationParams, OutputDispatcher, OutputMode};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let seed = 1587i64;
    let params = GenerationParams {
        scale: 8.0,
        ..GenerationParams::with_seed(seed)
    };

    let white = generate_white(40, 12, seed)?;
    let fractal = generate_fractal(40, 12, &params)?;

    println!("World Seed: {}", seed);
    println!("Params: {:?}", params);

    // Previews never touch the image directory
    let dispatcher = OutputDispatcher::new(std::env::temp_dir());
    let mut stdout = std::io::stdout();

    println!("\nWhite noise:");
    dispatcher.dispatch(&white, &OutputMode::Preview, &mut stdout)?;

    println!("\nFractal noise:");
    dispatcher.dispatch(&fractal, &OutputMode::Preview, &mut stdout)?;

    if let Some((min, max)) = fractal.min_max() {
        println!("\nFractal range: {:.3} .. {:.3}", min, max);
    }
    Ok(())
}
