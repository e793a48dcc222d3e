//! Nested scoped styles: a presentation figure inside an article session.

use sane_figs::prelude::*;

fn dpi(manager: &StyleManager) -> String {
    manager
        .environment()
        .param(Library::Matplotlib, "figure.dpi")
        .and_then(|v| v.as_f64())
        .map_or_else(|| "unset".to_string(), |v| v.to_string())
}

fn main() -> Result<()> {
    let mut env = Environment::new();
    env.install(Library::Matplotlib, "3.9.0");
    let mut manager = StyleManager::new(env);
    println!("factory:       dpi {}", dpi(&manager));

    {
        let mut article = manager.scope(resolve("article", None, None)?, Targets::Installed)?;
        println!("article:       dpi {}", dpi(&article));

        article.scoped(
            resolve("presentation", None, None)?,
            Library::Matplotlib,
            |m| println!("presentation:  dpi {}", dpi(m)),
        )?;
        println!("back to article: dpi {}", dpi(&article));
    }

    println!("restored:      dpi {}", dpi(&manager));
    Ok(())
}
