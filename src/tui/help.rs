//! Help screen: modal overlay showing the keybinding reference.

/// A line in the help screen.
#[derive(Debug, Clone)]
pub struct HelpLine {
    pub text: String,
    pub is_header: bool,
}

/// Help screen state.
#[derive(Debug, Clone)]
pub struct HelpScreen {
    pub visible: bool,
    content: Vec<HelpLine>,
}

impl HelpScreen {
    pub fn new() -> Self {
        Self {
            visible: false,
            content: Self::build_content(),
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn lines(&self) -> &[HelpLine] {
        &self.content
    }

    fn build_content() -> Vec<HelpLine> {
        let header = |text: &str| HelpLine {
            text: text.to_string(),
            is_header: true,
        };
        let entry = |keys: &str, desc: &str| HelpLine {
            text: format!("  {keys:<14} {desc}"),
            is_header: false,
        };
        vec![
            header("Recommend"),
            entry("Enter / Space", "spin for a lunch menu"),
            entry("l", "like the result (3x more likely)"),
            entry("d", "dislike the result (never picked)"),
            header("Selection"),
            entry("1-5", "toggle 한식 / 중식 / 일식 / 양식 / 분식"),
            entry("n", "toggle: no spicy food"),
            entry("s", "toggle: soup dishes only"),
            header("Share"),
            entry("c", "show share text"),
            entry("m", "show map search link"),
            header("General"),
            entry("?", "toggle this help"),
            entry("Esc", "close overlay / clear notice"),
            entry("q / Ctrl+C", "quit"),
        ]
    }
}

impl Default for HelpScreen {
    fn default() -> Self {
        Self::new()
    }
}
