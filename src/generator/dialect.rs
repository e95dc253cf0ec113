/// Dialect profile: every target-API fact the generator needs, resolved once
/// from (loader, version) and threaded through all lowering code.
use crate::generator::document::{ElementKind, McVersion, ModLoader};
use crate::generator::templates::{self, Templates, TransformTemplates};

const FABRIC_ENV_IMPORTS: &[&str] = &["net.fabricmc.api.EnvType", "net.fabricmc.api.Environment"];
const FORGE_DIST_IMPORTS: &[&str] = &[
    "net.minecraftforge.api.distmarker.Dist",
    "net.minecraftforge.api.distmarker.OnlyIn",
];
const NEOFORGE_DIST_IMPORTS: &[&str] = &["net.neoforged.api.distmarker.Dist", "net.neoforged.api.distmarker.OnlyIn"];
const NO_IMPORTS: &[&str] = &[];

/// Coarse code-shape grouping that selects statement templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialectFamily {
    /// Pre-1.13 modded clients, immediate-mode `drawRect` drawing
    Legacy,
    /// 1.16 - 1.19, matrix-stack based drawing
    MidModern,
    /// 1.20+, unified `DrawContext`
    Modern,
    /// Standalone LWJGL 2 client without a mod loader
    BareClient,
}

impl DialectFamily {
    /// Family lookup. Exhaustive over the loader x version cross product:
    /// the LWJGL 2 client is always bare, everything else follows the version.
    pub fn of(loader: ModLoader, version: McVersion) -> Self {
        match (loader, version) {
            (ModLoader::Lwjgl2, _) => DialectFamily::BareClient,
            (_, McVersion::V1_8_9 | McVersion::V1_12_2) => DialectFamily::Legacy,
            (_, McVersion::V1_16_5 | McVersion::V1_18_2 | McVersion::V1_19_4) => DialectFamily::MidModern,
            (_, McVersion::V1_20_4 | McVersion::V1_21) => DialectFamily::Modern,
        }
    }

    /// Families that extend `GuiScreen` and draw without a matrix context
    pub fn is_legacy_like(&self) -> bool {
        matches!(self, DialectFamily::Legacy | DialectFamily::BareClient)
    }

    pub fn templates(&self) -> &'static Templates {
        match self {
            DialectFamily::Modern => &templates::MODERN,
            DialectFamily::MidModern => &templates::MID_MODERN,
            DialectFamily::Legacy | DialectFamily::BareClient => &templates::LEGACY,
        }
    }
}

/// How buttons are constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    /// `ButtonWidget.builder(...).dimensions(...).build()`
    Builder,
    /// `new ButtonWidget(x, y, w, h, text, onPress)`
    Constructor,
    /// `new GuiButton(id, x, y, w, h, label)` added to `buttonList`
    Legacy,
}

/// How checkboxes are constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckboxStyle {
    Builder,
    Constructor,
    /// No widget class; drawn by hand in the render method
    Manual,
}

/// Name and Java type of the render method's drawing parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawContextVar {
    pub name: &'static str,
    pub java_type: &'static str,
}

#[derive(Debug, Clone)]
pub struct DialectProfile {
    pub loader: ModLoader,
    pub version: McVersion,
    pub family: DialectFamily,
    pub base_class: &'static str,
    pub annotation: Option<&'static str>,
    pub imports: Vec<&'static str>,
    pub context: Option<DrawContextVar>,
    pub init_signature: &'static str,
    pub super_init: &'static str,
    pub render_signature: String,
    pub super_render: String,
    pub background_call: Option<String>,
    pub button_style: ButtonStyle,
    pub checkbox_style: CheckboxStyle,
    /// Widget registration call with a `{widget}` slot
    pub register_widget: &'static str,
    /// Text component construction with a `{text}` slot
    pub text_literal: &'static str,
    /// Resource identifier construction with a `{path}` slot
    pub identifier: &'static str,
    /// Font renderer expression used by legacy text snippets
    pub font_renderer: &'static str,
    pub open_screen: &'static str,
    pub run_command: &'static str,
    pub transform: &'static TransformTemplates,
    pub templates: &'static Templates,
}

impl DialectProfile {
    pub fn resolve(loader: ModLoader, version: McVersion) -> Self {
        let family = DialectFamily::of(loader, version);
        let snippets = family.templates();
        let is_fabric = matches!(loader, ModLoader::Fabric | ModLoader::Quilt);

        let (annotation, annotation_imports) = match loader {
            ModLoader::Fabric | ModLoader::Quilt => (Some("@Environment(EnvType.CLIENT)"), FABRIC_ENV_IMPORTS),
            ModLoader::Forge => (Some("@OnlyIn(Dist.CLIENT)"), FORGE_DIST_IMPORTS),
            ModLoader::NeoForge => (Some("@OnlyIn(Dist.CLIENT)"), NEOFORGE_DIST_IMPORTS),
            ModLoader::Lwjgl2 => (None, NO_IMPORTS),
        };

        let mut imports: Vec<&'static str> = snippets.base_imports.to_vec();
        imports.extend_from_slice(annotation_imports);

        let text_literal = match version {
            McVersion::V1_16_5 | McVersion::V1_18_2 => templates::TEXT_LITERAL_OLD,
            _ => templates::TEXT_LITERAL,
        };

        let font_renderer = match (family, version) {
            (DialectFamily::Modern | DialectFamily::MidModern, _) => "this.textRenderer",
            (_, McVersion::V1_12_2) => "this.fontRenderer",
            _ => "this.fontRendererObj",
        };

        match family {
            DialectFamily::Modern => DialectProfile {
                loader,
                version,
                family,
                base_class: "Screen",
                annotation,
                imports,
                context: Some(DrawContextVar {
                    name: "context",
                    java_type: "DrawContext",
                }),
                init_signature: "protected void init()",
                super_init: "super.init();",
                render_signature: "public void render(DrawContext context, int mouseX, int mouseY, float delta)".to_string(),
                super_render: "super.render(context, mouseX, mouseY, delta);".to_string(),
                // super.render already paints the background on 1.20+
                background_call: None,
                button_style: ButtonStyle::Builder,
                checkbox_style: CheckboxStyle::Builder,
                register_widget: "this.addDrawableChild({widget});",
                text_literal,
                identifier: if version == McVersion::V1_21 {
                    templates::IDENTIFIER_OF
                } else {
                    templates::IDENTIFIER_NEW
                },
                font_renderer,
                open_screen: templates::OPEN_SCREEN_SET,
                run_command: templates::COMMAND_CHAT_COMMAND,
                transform: &templates::DRAW_CONTEXT_TRANSFORM,
                templates: snippets,
            },
            DialectFamily::MidModern => {
                let stack_type = if is_fabric { "MatrixStack" } else { "PoseStack" };
                imports.push(if is_fabric {
                    "net.minecraft.client.util.math.MatrixStack"
                } else {
                    "com.mojang.blaze3d.vertex.PoseStack"
                });
                imports.push(if text_literal == templates::TEXT_LITERAL_OLD {
                    "net.minecraft.text.LiteralText"
                } else {
                    "net.minecraft.text.Text"
                });

                DialectProfile {
                    loader,
                    version,
                    family,
                    base_class: "Screen",
                    annotation,
                    imports,
                    context: Some(DrawContextVar {
                        name: "matrices",
                        java_type: stack_type,
                    }),
                    init_signature: "protected void init()",
                    super_init: "super.init();",
                    render_signature: format!(
                        "public void render({} matrices, int mouseX, int mouseY, float delta)",
                        stack_type
                    ),
                    super_render: "super.render(matrices, mouseX, mouseY, delta);".to_string(),
                    background_call: Some("this.renderBackground(matrices);".to_string()),
                    button_style: if version == McVersion::V1_19_4 {
                        ButtonStyle::Builder
                    } else {
                        ButtonStyle::Constructor
                    },
                    checkbox_style: CheckboxStyle::Constructor,
                    register_widget: if version == McVersion::V1_16_5 {
                        "this.addButton({widget});"
                    } else {
                        "this.addDrawableChild({widget});"
                    },
                    text_literal,
                    identifier: templates::IDENTIFIER_NEW,
                    font_renderer,
                    open_screen: if version == McVersion::V1_16_5 {
                        templates::OPEN_SCREEN_OPEN
                    } else {
                        templates::OPEN_SCREEN_SET
                    },
                    run_command: if version == McVersion::V1_19_4 {
                        templates::COMMAND_CHAT_COMMAND
                    } else {
                        templates::COMMAND_CHAT_MESSAGE
                    },
                    transform: &templates::MATRIX_STACK_TRANSFORM,
                    templates: snippets,
                }
            }
            DialectFamily::Legacy | DialectFamily::BareClient => DialectProfile {
                loader,
                version,
                family,
                base_class: "GuiScreen",
                annotation,
                imports,
                context: None,
                init_signature: "public void initGui()",
                super_init: "super.initGui();",
                render_signature: "public void drawScreen(int mouseX, int mouseY, float partialTicks)".to_string(),
                super_render: "super.drawScreen(mouseX, mouseY, partialTicks);".to_string(),
                background_call: Some("this.drawDefaultBackground();".to_string()),
                button_style: ButtonStyle::Legacy,
                checkbox_style: CheckboxStyle::Manual,
                register_widget: "this.buttonList.add({widget});",
                text_literal: "{text}",
                identifier: templates::RESOURCE_LOCATION,
                font_renderer,
                open_screen: templates::OPEN_SCREEN_LEGACY,
                run_command: if version == McVersion::V1_8_9 {
                    templates::COMMAND_LEGACY_THE_PLAYER
                } else {
                    templates::COMMAND_LEGACY_PLAYER
                },
                // The standalone client always has raw GL11 available
                transform: if family == DialectFamily::Legacy && version == McVersion::V1_12_2 {
                    &templates::GL_STATE_MANAGER_TRANSFORM
                } else {
                    &templates::GL11_TRANSFORM
                },
                templates: snippets,
            },
        }
    }

    /// Widget class for an element type, `None` when it must be drawn by hand
    pub fn widget_class(&self, kind: &ElementKind) -> Option<&'static str> {
        if self.family.is_legacy_like() {
            return match kind {
                ElementKind::Button { .. } => Some("GuiButton"),
                ElementKind::TextField { .. } => Some("GuiTextField"),
                _ => None,
            };
        }
        match kind {
            ElementKind::Button { .. } => Some("ButtonWidget"),
            ElementKind::TextField { .. } => Some("TextFieldWidget"),
            ElementKind::Checkbox { .. } => Some("CheckboxWidget"),
            ElementKind::Slider { .. } => Some("SliderWidget"),
            _ => None,
        }
    }

    /// Class of the persistent field an element needs, if any.
    ///
    /// Modern buttons are registered inline and need no handle; legacy buttons
    /// are kept so the dispatch method can reference them.
    pub fn field_class(&self, kind: &ElementKind) -> Option<&'static str> {
        match kind {
            ElementKind::Button { .. } if !self.family.is_legacy_like() => None,
            _ => self.widget_class(kind),
        }
    }

    pub fn widget_import(&self, class: &str) -> String {
        format!("{}.{}", self.templates.widget_import_prefix, class)
    }

    /// Wrap a Java string expression into the dialect's text component
    pub fn text(&self, expr: &str) -> String {
        templates::fill(self.text_literal, &[("text", expr)])
    }

    /// Name of the drawing parameter, empty for legacy dialects
    pub fn context_var(&self) -> &'static str {
        self.context.as_ref().map(|c| c.name).unwrap_or("")
    }
}
