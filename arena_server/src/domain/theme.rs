use serde::{Deserialize, Serialize};

/// A named color set; players take `colors()[index % 4]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub tertiary: &'static str,
    pub quaternary: &'static str,
    pub name: &'static str,
}

impl Palette {
    pub fn colors(&self) -> [&'static str; 4] {
        [self.primary, self.secondary, self.tertiary, self.quaternary]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorTheme {
    #[default]
    #[serde(rename = "su-yesili")]
    SuYesili,
    #[serde(rename = "mavi")]
    Mavi,
    #[serde(rename = "kirmizi")]
    Kirmizi,
    #[serde(rename = "pembe")]
    Pembe,
    #[serde(rename = "turuncu")]
    Turuncu,
    #[serde(rename = "mor")]
    Mor,
}

impl ColorTheme {
    pub const ALL: [ColorTheme; 6] = [
        Self::SuYesili,
        Self::Mavi,
        Self::Kirmizi,
        Self::Pembe,
        Self::Turuncu,
        Self::Mor,
    ];

    pub fn palette(self) -> Palette {
        match self {
            Self::SuYesili => Palette {
                primary: "#20b2aa",
                secondary: "#40e0d0",
                tertiary: "#48d1cc",
                quaternary: "#7fffd4",
                name: "Su Yeşili",
            },
            Self::Mavi => Palette {
                primary: "#4169e1",
                secondary: "#6495ed",
                tertiary: "#87ceeb",
                quaternary: "#b0e0e6",
                name: "Mavi",
            },
            Self::Kirmizi => Palette {
                primary: "#dc143c",
                secondary: "#ff6347",
                tertiary: "#ff7f50",
                quaternary: "#ffa07a",
                name: "Kırmızı",
            },
            Self::Pembe => Palette {
                primary: "#ff1493",
                secondary: "#ff69b4",
                tertiary: "#ffb6c1",
                quaternary: "#ffc0cb",
                name: "Pembe",
            },
            Self::Turuncu => Palette {
                primary: "#ff8c00",
                secondary: "#ffa500",
                tertiary: "#ffb347",
                quaternary: "#ffd700",
                name: "Turuncu",
            },
            Self::Mor => Palette {
                primary: "#9370db",
                secondary: "#ba55d3",
                tertiary: "#da70d6",
                quaternary: "#dda0dd",
                name: "Mor",
            },
        }
    }

    pub fn player_color(self, index: usize) -> &'static str {
        self.palette().colors()[index % 4]
    }
}
