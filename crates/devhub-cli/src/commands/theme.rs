use clap::Subcommand;
use devhub_core::{Store, Theme};

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between dark and light
    Toggle,
    /// Set the theme explicitly
    Set {
        /// "dark" or "light"
        theme: Theme,
    },
}

pub fn run(action: ThemeAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let current = store.load_theme()?;

    let theme = match action {
        ThemeAction::Show => current,
        ThemeAction::Toggle => current.toggled(),
        ThemeAction::Set { theme } => theme,
    };
    if theme != current {
        store.save_theme(theme)?;
    }
    println!("{theme} (toggle: {})", theme.toggle_label());
    Ok(())
}
