use serde::{Deserialize, Serialize};

pub const DEFAULT_PALETTE: [&str; 5] = ["#ff6b6b", "#4ecdc4", "#95e1d3", "#f38181", "#aa96da"];

/// Ordered highlight colors, sent with every search. The page assigns keyword
/// `i` the color `i mod len`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Palette {
    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_lists_five_colors_in_order() {
        assert_eq!(Palette::default().colors(), DEFAULT_PALETTE);
    }

    #[test]
    fn palette_reads_as_a_plain_list() {
        let palette: Palette = serde_json::from_str(r##"["#000","#fff"]"##).unwrap();
        assert_eq!(palette.colors(), ["#000", "#fff"]);
        assert!(!palette.is_empty());
    }
}
