use ratatui::style::Color;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,
    pub grey2: Color,

    // Palette colors
    pub red: Color,
    pub orange: Color,
    pub yellow: Color,
    pub green: Color,
    pub aqua: Color,
    pub blue: Color,

    // Semantic colors
    pub selection: Color,
    pub positive: Color,
    pub negative: Color,
    pub error: Color,
    pub info: Color,
    pub accent: Color,
}

impl Theme {
    /// Color for a sentiment score: negative, neutral or positive
    pub fn sentiment(&self, score: f64) -> Color {
        if score > 0.05 {
            self.positive
        } else if score < -0.05 {
            self.negative
        } else {
            self.grey2
        }
    }

    /// Background shade for a heatmap cell holding `count` of at most `max`
    pub fn heat(&self, count: usize, max: usize) -> Color {
        if count == 0 || max == 0 {
            return self.bg1;
        }
        let ratio = count as f64 / max as f64;
        if ratio > 0.66 {
            self.red
        } else if ratio > 0.33 {
            self.orange
        } else {
            self.yellow
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        crate::themes::gruvbox_dark()
    }
}
