use serde::Serialize;

use crate::highlight::StyleTag;

/// Semantic colour slots; the host maps them to real colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ColorRole {
    /// Default body text.
    Label,
    /// Headings, links and list markers.
    Accent,
    /// Blockquotes.
    SecondaryLabel,
    /// Inline code foreground.
    Code,
    /// Inline code background.
    CodeBackground,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FontFamily {
    System,
    Monospace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Weight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Font {
    pub family: FontFamily,
    pub size: f32,
    pub weight: Weight,
    pub italic: bool,
}

impl Font {
    pub fn system(size: f32) -> Self {
        Self {
            family: FontFamily::System,
            size,
            weight: Weight::Regular,
            italic: false,
        }
    }

    pub fn bold_system(size: f32) -> Self {
        Self {
            weight: Weight::Bold,
            ..Self::system(size)
        }
    }

    pub fn monospace(size: f32) -> Self {
        Self {
            family: FontFamily::Monospace,
            ..Self::system(size)
        }
    }

    pub fn italic(self) -> Self {
        Self {
            italic: true,
            ..self
        }
    }
}

/// Fully resolved display attributes of a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextAttributes {
    pub font: Font,
    pub foreground: ColorRole,
    pub background: Option<ColorRole>,
}

/// Attributes a rule sets; `None` leaves the current value alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AttributePatch {
    pub font: Option<Font>,
    pub foreground: Option<ColorRole>,
    pub background: Option<ColorRole>,
}

impl AttributePatch {
    /// Writes every attribute this patch carries over `attrs`.
    pub fn apply(&self, attrs: &mut TextAttributes) {
        if let Some(font) = self.font {
            attrs.font = font;
        }
        if let Some(fg) = self.foreground {
            attrs.foreground = fg;
        }
        if let Some(bg) = self.background {
            attrs.background = Some(bg);
        }
    }
}

/// Font sizes used when turning tags into attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theme {
    /// Body text size.
    pub base_size: f32,
    /// Inline code size.
    pub code_size: f32,
    /// Size a level-0 heading would get; each level subtracts `heading_step`.
    pub heading_ceiling: f32,
    pub heading_step: f32,
    /// Headings never go below this size.
    pub heading_floor: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            base_size: 14.0,
            code_size: 13.0,
            heading_ceiling: 22.0,
            heading_step: 2.0,
            heading_floor: 14.0,
        }
    }
}

impl Theme {
    /// `max(floor, ceiling - step * level)`: 20, 18, 16 then 14 from level 4 on.
    pub fn heading_size(&self, level: u8) -> f32 {
        (self.heading_ceiling - self.heading_step * f32::from(level)).max(self.heading_floor)
    }

    /// The style every character starts from before rules are layered on.
    pub fn base(&self) -> TextAttributes {
        TextAttributes {
            font: Font::system(self.base_size),
            foreground: ColorRole::Label,
            background: None,
        }
    }

    /// Attribute patch for a tag.
    pub fn patch_for(&self, tag: StyleTag) -> AttributePatch {
        match tag {
            StyleTag::Heading { level } => AttributePatch {
                font: Some(Font::bold_system(self.heading_size(level))),
                foreground: Some(ColorRole::Accent),
                background: None,
            },
            StyleTag::Bold => AttributePatch {
                font: Some(Font::bold_system(self.base_size)),
                ..AttributePatch::default()
            },
            StyleTag::Italic => AttributePatch {
                font: Some(Font::system(self.base_size).italic()),
                ..AttributePatch::default()
            },
            StyleTag::Link | StyleTag::ListMarker => AttributePatch {
                foreground: Some(ColorRole::Accent),
                ..AttributePatch::default()
            },
            StyleTag::Blockquote => AttributePatch {
                foreground: Some(ColorRole::SecondaryLabel),
                ..AttributePatch::default()
            },
            StyleTag::InlineCode => AttributePatch {
                font: Some(Font::monospace(self.code_size)),
                foreground: Some(ColorRole::Code),
                background: Some(ColorRole::CodeBackground),
            },
        }
    }
}
