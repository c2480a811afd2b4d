use console::Style;
use once_cell::sync::Lazy;

/// Named styles for terminal output.
pub struct Palette {
    pub heading: Style,
    pub key: Style,
    pub active: Style,
    pub blank: Style,
    pub muted: Style,
    pub count: Style,
}

pub static PALETTE: Lazy<Palette> = Lazy::new(|| Palette {
    heading: Style::new().bold(),
    key: Style::new().cyan(),
    active: Style::new().red(),
    blank: Style::new().italic().dim(),
    muted: Style::new().color256(246),
    count: Style::new().bold().green(),
});

/// Apply `style` to `text`, forcing styling on or off.
pub fn paint(style: &Style, text: &str, color: bool) -> String {
    style
        .clone()
        .force_styling(color)
        .apply_to(text)
        .to_string()
}
