use std::{fmt::Write, path::Path};

use super::Profile;

const TITLE_PREFIX: &str = "{perc}{audio}{current_title}{title_sep}";

/// Render the initial `config.py` for a new profile.
///
/// `main_config` is the user's main `config.py`; it is sourced when present so
/// the profile inherits the user's settings.
pub fn render_config_py(
    profile: &Profile,
    home_page: Option<&str>,
    main_config: Option<&Path>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "config.load_autoconfig()");
    let _ = writeln!(
        out,
        "c.window.title_format = '{TITLE_PREFIX}qutebrowser ({})'",
        escape_single_quoted(profile.name())
    );
    if let Some(home_page) = home_page {
        let _ = writeln!(
            out,
            "c.url.start_pages = ['{}']",
            escape_single_quoted(home_page)
        );
    }
    if let Some(main_config) = main_config {
        let _ = writeln!(
            out,
            "config.source('{}')",
            escape_single_quoted(&main_config.to_string_lossy())
        );
    }
    out
}

fn escape_single_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
