//! Applies the article preset to every library and prints what changed.

use sane_figs::prelude::*;

fn main() -> Result<()> {
    sane_figs::debug::init_from_env();

    let mut env = Environment::new();
    env.install(Library::Matplotlib, "3.8.2")
        .install(Library::Seaborn, "0.13.2")
        .install(Library::Plotly, "5.18.0")
        .install(Library::Altair, "5.2.0");

    let style = resolve(
        Mode::Article,
        Some("colorblind-safe".into()),
        Some("Preprint - do not cite".into()),
    )?;
    println!(
        "preset '{}': {:?} in at {} dpi, title {}pt, colorway '{}'",
        style.preset_name(),
        style.figure_size(),
        style.dpi(),
        style.font_sizes().title,
        style.colorway().name
    );

    let mut manager = StyleManager::new(env);
    let handle = manager.activate(style, Targets::Installed)?;

    for library in handle.libraries() {
        println!("\n[{library}]");
        if let Some(table) = manager.environment().snapshot(*library) {
            for (key, value) in table.iter() {
                println!("  {key} = {value:?}");
            }
        }
        let figure = manager.new_figure(*library)?;
        for overlay in figure.overlays() {
            println!(
                "  watermark at ({:.3}, {:.3}) in {:?}",
                overlay.x, overlay.y, overlay.space
            );
        }
    }

    manager.deactivate(&handle)?;
    Ok(())
}
