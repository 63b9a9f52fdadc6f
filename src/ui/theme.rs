use crate::record::ThemeMode;
use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub success: Style,
    pub error: Style,
    pub warn: Style,
    pub info: Style,
    pub dim: Style,
    pub muted: Style,
    pub citation: Style,
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        if !console::Term::stdout().is_term() {
            return Self::plain();
        }
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    pub fn light() -> Self {
        Self {
            header: Style::new().blue().bold(),
            success: Style::new().green().bold(),
            error: Style::new().red().bold(),
            warn: Style::new().yellow().bold(),
            info: Style::new().magenta(),
            dim: Style::new().white().dimmed(),
            muted: Style::new().bright_black(),
            citation: Style::new().cyan(),
        }
    }

    pub fn dark() -> Self {
        Self {
            header: Style::new().bright_blue().bold(),
            success: Style::new().bright_green().bold(),
            error: Style::new().bright_red().bold(),
            warn: Style::new().bright_yellow().bold(),
            info: Style::new().bright_magenta(),
            dim: Style::new().white().dimmed(),
            muted: Style::new().bright_black(),
            citation: Style::new().bright_cyan(),
        }
    }

    pub fn plain() -> Self {
        Self {
            header: Style::new(),
            success: Style::new(),
            error: Style::new(),
            warn: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            muted: Style::new(),
            citation: Style::new(),
        }
    }
}

/// Install the theme matching the persisted preference. First call wins.
pub fn init(mode: ThemeMode) {
    let _ = THEME.set(Theme::for_mode(mode));
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(|| Theme::for_mode(ThemeMode::default()))
}
