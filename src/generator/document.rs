/// In-memory screen document consumed by the generator
///
/// The serde shape mirrors the JSON the editor persists (one screen per file,
/// camelCase keys). Fields the generator has no use for are accepted and ignored.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModLoader {
    Fabric,
    Forge,
    NeoForge,
    Quilt,
    #[serde(rename = "Client (LWJGL 2)")]
    Lwjgl2,
}

impl ModLoader {
    pub const ALL: [ModLoader; 5] = [
        ModLoader::Fabric,
        ModLoader::Forge,
        ModLoader::NeoForge,
        ModLoader::Quilt,
        ModLoader::Lwjgl2,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fabric" => Some(ModLoader::Fabric),
            "forge" => Some(ModLoader::Forge),
            "neoforge" => Some(ModLoader::NeoForge),
            "quilt" => Some(ModLoader::Quilt),
            "lwjgl2" | "client" | "client (lwjgl 2)" => Some(ModLoader::Lwjgl2),
            _ => None,
        }
    }
}

impl fmt::Display for ModLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModLoader::Fabric => "Fabric",
            ModLoader::Forge => "Forge",
            ModLoader::NeoForge => "NeoForge",
            ModLoader::Quilt => "Quilt",
            ModLoader::Lwjgl2 => "Client (LWJGL 2)",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum McVersion {
    #[serde(rename = "1.21")]
    V1_21,
    #[serde(rename = "1.20.4")]
    V1_20_4,
    #[serde(rename = "1.19.4")]
    V1_19_4,
    #[serde(rename = "1.18.2")]
    V1_18_2,
    #[serde(rename = "1.16.5")]
    V1_16_5,
    #[serde(rename = "1.12.2")]
    V1_12_2,
    #[serde(rename = "1.8.9")]
    V1_8_9,
}

impl McVersion {
    pub const ALL: [McVersion; 7] = [
        McVersion::V1_21,
        McVersion::V1_20_4,
        McVersion::V1_19_4,
        McVersion::V1_18_2,
        McVersion::V1_16_5,
        McVersion::V1_12_2,
        McVersion::V1_8_9,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            McVersion::V1_21 => "1.21",
            McVersion::V1_20_4 => "1.20.4",
            McVersion::V1_19_4 => "1.19.4",
            McVersion::V1_18_2 => "1.18.2",
            McVersion::V1_16_5 => "1.16.5",
            McVersion::V1_12_2 => "1.12.2",
            McVersion::V1_8_9 => "1.8.9",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        McVersion::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

impl fmt::Display for McVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectSettings {
    pub loader: ModLoader,
    pub version: McVersion,
    pub class_name: String,
    pub screen_width: f64,
    pub screen_height: f64,
    pub responsive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            loader: ModLoader::Fabric,
            version: McVersion::V1_20_4,
            class_name: "MyCustomScreen".to_string(),
            screen_width: 427.0,
            screen_height: 240.0,
            responsive: true,
            background_color: None,
        }
    }
}

/// A named canvas as persisted by the editor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Screen {
    pub id: String,
    pub name: String,
    pub elements: Vec<GuiElement>,
    pub settings: ProjectSettings,
}

/// Read-only view of a sibling screen, used to resolve OPEN_SCREEN targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenRef {
    pub id: String,
    pub class_name: String,
}

impl ScreenRef {
    pub fn new(id: &str, class_name: &str) -> Self {
        ScreenRef {
            id: id.to_string(),
            class_name: class_name.to_string(),
        }
    }
}

impl From<&Screen> for ScreenRef {
    fn from(screen: &Screen) -> Self {
        ScreenRef::new(&screen.id, &screen.settings.class_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuiElement {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub variable_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(default)]
    pub events: Events,
    #[serde(flatten)]
    pub style: Style,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl GuiElement {
    pub fn new(kind: ElementKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        GuiElement {
            id: String::new(),
            x,
            y,
            width,
            height,
            rotation: 0.0,
            variable_name: String::new(),
            tooltip: None,
            events: Events::default(),
            style: Style::default(),
            kind,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.variable_name = name.to_string();
        self
    }

    /// Opacity with the "fully opaque" default applied
    pub fn opacity(&self) -> f64 {
        self.style.opacity.unwrap_or(1.0)
    }

    /// Rotation normalized into [0, 360)
    pub fn normalized_rotation(&self) -> f64 {
        if self.rotation.is_finite() {
            self.rotation.rem_euclid(360.0)
        } else {
            0.0
        }
    }
}

/// Styling attributes every element type may carry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Style {
    pub color: Option<String>,
    pub opacity: Option<f64>,
    pub border_radius: Option<f64>,
    pub border_color: Option<String>,
    pub border_width: Option<f64>,
    pub backdrop_blur: Option<f64>,
    pub gradient: Option<GradientConfig>,
    pub shadow: Option<ShadowConfig>,
    pub hover: Option<HoverConfig>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientDirection {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GradientConfig {
    pub enabled: bool,
    pub start_color: Option<String>,
    pub end_color: Option<String>,
    pub direction: GradientDirection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShadowConfig {
    pub enabled: bool,
    pub color: Option<String>,
    pub x_offset: f64,
    pub y_offset: f64,
    pub blur: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HoverAnimation {
    #[default]
    None,
    Scale,
    Lift,
    SlideRight,
    Glow,
    BorderPulse,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HoverConfig {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub animation: HoverAnimation,
    pub duration: f64,
    pub scale: f64,
    pub lift_amount: f64,
    pub slide_amount: f64,
    pub glow_color: Option<String>,
    pub glow_blur: f64,
    pub brightness: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Events {
    #[serde(rename = "ON_CLICK", skip_serializing_if = "Option::is_none")]
    pub on_click: Option<EventAction>,
    #[serde(rename = "ON_CHANGE", skip_serializing_if = "Option::is_none")]
    pub on_change: Option<EventAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionKind {
    OpenScreen,
    ExecuteCommand,
    PlaySound,
    CustomCode,
    Unknown(String),
}

impl From<String> for ActionKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "OPEN_SCREEN" => ActionKind::OpenScreen,
            "EXECUTE_COMMAND" => ActionKind::ExecuteCommand,
            "PLAY_SOUND" => ActionKind::PlaySound,
            "CUSTOM_CODE" => ActionKind::CustomCode,
            _ => ActionKind::Unknown(s),
        }
    }
}

impl From<ActionKind> for String {
    fn from(kind: ActionKind) -> Self {
        match kind {
            ActionKind::OpenScreen => "OPEN_SCREEN".to_string(),
            ActionKind::ExecuteCommand => "EXECUTE_COMMAND".to_string(),
            ActionKind::PlaySound => "PLAY_SOUND".to_string(),
            ActionKind::CustomCode => "CUSTOM_CODE".to_string(),
            ActionKind::Unknown(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAction {
    #[serde(rename = "type", default)]
    pub kind: Option<ActionKind>,
    #[serde(default)]
    pub value: String,
}

impl EventAction {
    pub fn new(kind: ActionKind, value: &str) -> Self {
        EventAction {
            kind: Some(kind),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontFamily {
    #[default]
    Minecraft,
    Modern,
    Mono,
}

/// Per-type attributes, tagged by the document's `type` field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementKind {
    Button {
        #[serde(default)]
        label: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Label {
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        font_family: Option<FontFamily>,
        #[serde(default)]
        text_align: Option<TextAlign>,
        #[serde(default)]
        text_shadow: Option<bool>,
    },
    TextField {
        #[serde(default)]
        label: Option<String>,
    },
    Panel,
    ScrollPanel,
    Slot,
    Checkbox {
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        checked: bool,
    },
    Slider {
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
        #[serde(default)]
        value: Option<f64>,
        #[serde(default)]
        step: Option<f64>,
    },
    Dropdown {
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        options: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        #[serde(default)]
        texture_path: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Entity {
        #[serde(default)]
        entity_type: Option<String>,
        #[serde(default)]
        scale: Option<f64>,
    },
    #[serde(rename_all = "camelCase")]
    Item {
        #[serde(default)]
        item_id: Option<String>,
        #[serde(default)]
        scale: Option<f64>,
    },
    ProgressBar {
        #[serde(default)]
        progress: Option<f64>,
    },
    #[serde(other)]
    Unknown,
}

impl ElementKind {
    /// Lower-case type tag, as used in editor-generated variable names
    pub fn tag(&self) -> &'static str {
        match self {
            ElementKind::Button { .. } => "button",
            ElementKind::Label { .. } => "label",
            ElementKind::TextField { .. } => "text_field",
            ElementKind::Panel => "panel",
            ElementKind::ScrollPanel => "scroll_panel",
            ElementKind::Slot => "slot",
            ElementKind::Checkbox { .. } => "checkbox",
            ElementKind::Slider { .. } => "slider",
            ElementKind::Dropdown { .. } => "dropdown",
            ElementKind::Image { .. } => "image",
            ElementKind::Entity { .. } => "entity",
            ElementKind::Item { .. } => "item",
            ElementKind::ProgressBar { .. } => "progress_bar",
            ElementKind::Unknown => "unknown",
        }
    }

    /// Text label with the empty-string default applied
    pub fn label(&self) -> &str {
        match self {
            ElementKind::Button { label }
            | ElementKind::Label { label, .. }
            | ElementKind::TextField { label }
            | ElementKind::Checkbox { label, .. }
            | ElementKind::Slider { label, .. }
            | ElementKind::Dropdown { label, .. } => label.as_deref().unwrap_or(""),
            _ => "",
        }
    }
}
