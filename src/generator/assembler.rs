/// Document assembler: one screen in, one Java compilation unit out.
use std::collections::BTreeSet;

use crate::generator::actions::{action_imports, lower_action, lowers_to_statement, ActionContext};
use crate::generator::color::{encode_color, rgb, rgb_literal};
use crate::generator::dialect::{ButtonStyle, CheckboxStyle, DialectProfile};
use crate::generator::document::{
    ElementKind, EventAction, FontFamily, GuiElement, ProjectSettings, ScreenRef, TextAlign,
};
use crate::generator::effects::{self, fill_box, fill_rect};
use crate::generator::geometry::{js_round, num, offset, ElementBox};
use crate::generator::templates::{comment_text, fill, string_literal};

const INDENT: &str = "    ";

/// Height of a line of vanilla font text, used for vertical centering
const FONT_HEIGHT: f64 = 8.0;

pub struct ScreenGenerator<'a> {
    settings: &'a ProjectSettings,
    screens: &'a [ScreenRef],
    profile: DialectProfile,
    package: Option<String>,
    imports: BTreeSet<String>,
    next_widget_id: u32,
    /// (button id, lowered statement) pairs for the legacy dispatch method
    legacy_clicks: Vec<(u32, String)>,
}

impl<'a> ScreenGenerator<'a> {
    pub fn new(settings: &'a ProjectSettings, screens: &'a [ScreenRef]) -> Self {
        let profile = DialectProfile::resolve(settings.loader, settings.version);
        tracing::debug!(
            loader = %settings.loader,
            version = %settings.version,
            family = ?profile.family,
            "resolved dialect profile"
        );
        ScreenGenerator {
            settings,
            screens,
            profile,
            package: None,
            imports: BTreeSet::new(),
            next_widget_id: 0,
            legacy_clicks: Vec::new(),
        }
    }

    /// Prepend a `package` declaration to the generated unit
    pub fn with_package(mut self, package: Option<&str>) -> Self {
        self.package = package.filter(|p| !p.is_empty()).map(str::to_string);
        self
    }

    /// Generate the complete compilation unit. Never fails.
    pub fn generate(&mut self, elements: &[GuiElement]) -> String {
        self.imports.clear();
        self.next_widget_id = 0;
        self.legacy_clicks.clear();

        for import in &self.profile.imports {
            self.imports.insert(import.to_string());
        }

        // Bodies first: they decide which feature imports are needed
        let fields = self.generate_fields(elements);
        let init = self.generate_init(elements);
        let render = self.generate_render(elements);
        let dispatch = self.generate_action_dispatch();

        let class_name = &self.settings.class_name;
        let mut members = Vec::new();
        if !fields.is_empty() {
            members.push(fields);
        }
        members.push(self.generate_constructor());
        members.push(init);
        members.push(render);
        if let Some(dispatch) = dispatch {
            members.push(dispatch);
        }

        let mut output = String::new();
        if let Some(package) = &self.package {
            output.push_str(&format!("package {};\n\n", package));
        }
        for import in &self.imports {
            output.push_str(&format!("import {};\n", import));
        }
        output.push('\n');
        if let Some(annotation) = self.profile.annotation {
            output.push_str(annotation);
            output.push('\n');
        }
        output.push_str(&format!(
            "public class {} extends {} {{\n",
            class_name, self.profile.base_class
        ));
        output.push_str(&members.join("\n\n"));
        output.push_str("\n}\n");
        output
    }

    fn generate_fields(&mut self, elements: &[GuiElement]) -> String {
        let mut lines = Vec::new();
        for (index, element) in elements.iter().enumerate() {
            if let Some(class) = self.profile.field_class(&element.kind) {
                lines.push(format!("{}private {} {};", INDENT, class, variable_name(element, index)));
            }
        }
        lines.join("\n")
    }

    fn generate_constructor(&self) -> String {
        let super_call = if self.profile.family.is_legacy_like() {
            "super();".to_string()
        } else {
            format!("super({});", self.profile.text(&string_literal(&self.settings.class_name)))
        };
        format!(
            "{i}public {name}() {{\n{i}{i}{call}\n{i}}}",
            i = INDENT,
            name = self.settings.class_name,
            call = super_call
        )
    }

    fn generate_init(&mut self, elements: &[GuiElement]) -> String {
        let mut body = vec![self.profile.super_init.to_string()];
        for (index, element) in elements.iter().enumerate() {
            let bx = ElementBox::of(element, self.settings);
            let name = variable_name(element, index);
            body.extend(self.init_element(element, &bx, &name));
        }
        method(&format!("@Override\n{}", self.profile.init_signature), &body)
    }

    fn generate_render(&mut self, elements: &[GuiElement]) -> String {
        let mut head = Vec::new();
        match &self.settings.background_color {
            Some(color) => head.push(fill_rect(
                &self.profile,
                "0",
                "0",
                "this.width",
                "this.height",
                encode_color(Some(color), 1.0),
            )),
            None => head.extend(self.profile.background_call.clone()),
        }
        head.push(self.profile.super_render.clone());

        let mut body = head;
        for (index, element) in elements.iter().enumerate() {
            let group = self.render_element(element, index);
            if !group.is_empty() {
                body.push(String::new());
                body.extend(group);
            }
        }
        method(&format!("@Override\n{}", self.profile.render_signature), &body)
    }

    fn generate_action_dispatch(&self) -> Option<String> {
        if self.legacy_clicks.is_empty() {
            return None;
        }
        let mut body = Vec::new();
        for (n, (id, statement)) in self.legacy_clicks.iter().enumerate() {
            let keyword = if n == 0 { "if" } else { "} else if" };
            body.push(format!("{} (button.id == {}) {{", keyword, id));
            body.extend(nested(statement));
        }
        body.push("}".to_string());
        Some(method(
            "@Override\nprotected void actionPerformed(GuiButton button) throws java.io.IOException",
            &body,
        ))
    }

    fn lower(&mut self, action: Option<&EventAction>) -> String {
        let Some(action) = action else {
            return String::new();
        };
        let ctx = ActionContext::new(&self.profile, self.screens);
        let statement = lower_action(action, &ctx);
        if !statement.is_empty() {
            for import in action_imports(action, &self.profile) {
                self.imports.insert(import.to_string());
            }
        }
        statement
    }

    fn use_widget(&mut self, class: &str) {
        let import = self.profile.widget_import(class);
        self.imports.insert(import);
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_widget_id;
        self.next_widget_id += 1;
        id
    }

    fn register(&self, widget: &str) -> Vec<String> {
        lines(&fill(self.profile.register_widget, &[("widget", widget)]))
    }

    fn init_element(&mut self, element: &GuiElement, bx: &ElementBox, name: &str) -> Vec<String> {
        tracing::trace!(element = %element.id, kind = element.kind.tag(), "lowering init");
        match &element.kind {
            ElementKind::Button { .. } => self.init_button(element, bx, name),
            ElementKind::TextField { .. } => self.init_text_field(element, bx, name),
            ElementKind::Checkbox { checked, .. } => self.init_checkbox(element, bx, name, *checked),
            ElementKind::Slider { .. } => self.init_slider(element, bx, name),
            _ => Vec::new(),
        }
    }

    fn init_button(&mut self, element: &GuiElement, bx: &ElementBox, name: &str) -> Vec<String> {
        let label = string_literal(element.kind.label());
        let (w, h) = (num(bx.width), num(bx.height));
        let action = self.lower(element.events.on_click.as_ref());

        match self.profile.button_style {
            ButtonStyle::Legacy => {
                self.use_widget("GuiButton");
                let id = self.next_id();
                if !action.is_empty() {
                    self.legacy_clicks.push((id, action));
                }
                let widget = format!(
                    "this.{} = new GuiButton({}, {}, {}, {}, {}, {})",
                    name, id, bx.x, bx.y, w, h, label
                );
                self.register(&widget)
            }
            ButtonStyle::Builder => {
                self.use_widget("ButtonWidget");
                let widget = format!(
                    "ButtonWidget.builder({}, button -> {}).dimensions({}, {}, {}, {}).build()",
                    self.profile.text(&label),
                    lambda_body(&action),
                    bx.x,
                    bx.y,
                    w,
                    h
                );
                self.register(&widget)
            }
            ButtonStyle::Constructor => {
                self.use_widget("ButtonWidget");
                let widget = format!(
                    "new ButtonWidget({}, {}, {}, {}, {}, button -> {})",
                    bx.x,
                    bx.y,
                    w,
                    h,
                    self.profile.text(&label),
                    lambda_body(&action)
                );
                self.register(&widget)
            }
        }
    }

    fn init_text_field(&mut self, element: &GuiElement, bx: &ElementBox, name: &str) -> Vec<String> {
        let label = string_literal(element.kind.label());
        let (w, h) = (num(bx.width), num(bx.height));

        if self.profile.family.is_legacy_like() {
            self.use_widget("GuiTextField");
            let id = self.next_id();
            let mut out = vec![
                format!(
                    "this.{} = new GuiTextField({}, {}, {}, {}, {}, {});",
                    name, id, self.profile.font_renderer, bx.x, bx.y, w, h
                ),
                format!("this.{}.setText({});", name, label),
            ];
            out.extend(unwired_change(element, "needs keyTyped forwarding"));
            return out;
        }

        let action = self.lower(element.events.on_change.as_ref());
        self.use_widget("TextFieldWidget");
        let mut out = vec![format!(
            "this.{} = new TextFieldWidget(this.textRenderer, {}, {}, {}, {}, {});",
            name,
            bx.x,
            bx.y,
            w,
            h,
            self.profile.text(&label)
        )];
        if !action.is_empty() {
            out.extend(lines(&format!("this.{}.setChangedListener(text -> {});", name, lambda_body(&action))));
        }
        out.extend(self.register(&format!("this.{}", name)));
        out
    }

    fn init_checkbox(&mut self, element: &GuiElement, bx: &ElementBox, name: &str, checked: bool) -> Vec<String> {
        if self.profile.checkbox_style == CheckboxStyle::Manual {
            return unwired_change(element, "has no checkbox widget");
        }
        let text = self.profile.text(&string_literal(element.kind.label()));
        let action = self.lower(element.events.on_change.as_ref());

        let mut out = match self.profile.checkbox_style {
            CheckboxStyle::Manual => Vec::new(),
            CheckboxStyle::Builder => {
                let mut builder = format!(
                    "this.{} = CheckboxWidget.builder({}, this.textRenderer).pos({}, {}).checked({})",
                    name, text, bx.x, bx.y, checked
                );
                if !action.is_empty() {
                    builder.push_str(&format!(".callback((checkbox, checked) -> {})", lambda_body(&action)));
                }
                builder.push_str(".build();");
                lines(&builder)
            }
            CheckboxStyle::Constructor => {
                let head = format!(
                    "this.{} = new CheckboxWidget({}, {}, {}, {}, {}, {})",
                    name,
                    bx.x,
                    bx.y,
                    num(bx.width),
                    num(bx.height),
                    text,
                    checked
                );
                if action.is_empty() {
                    vec![format!("{};", head)]
                } else {
                    let mut out = vec![
                        format!("{} {{", head),
                        format!("{}@Override", INDENT),
                        format!("{}public void onPress() {{", INDENT),
                        format!("{}{}super.onPress();", INDENT, INDENT),
                    ];
                    out.extend(nested(&action).into_iter().map(|l| format!("{}{}", INDENT, l)));
                    out.push(format!("{}}}", INDENT));
                    out.push("};".to_string());
                    out
                }
            }
        };
        self.use_widget("CheckboxWidget");
        out.extend(self.register(&format!("this.{}", name)));
        out
    }

    fn init_slider(&mut self, element: &GuiElement, bx: &ElementBox, name: &str) -> Vec<String> {
        if self.profile.widget_class(&element.kind).is_none() {
            return unwired_change(element, "has no slider widget");
        }
        self.use_widget("SliderWidget");

        let range = SliderRange::of(&element.kind);
        let label = element.kind.label();
        let prefix = if label.is_empty() {
            String::new()
        } else {
            format!("{}: ", label)
        };
        let initial_message = self
            .profile
            .text(&string_literal(&format!("{}{}", prefix, num(range.mapped_initial()))));
        let live_message = self
            .profile
            .text(&format!("{} + {}", string_literal(&prefix), range.java_mapped_value()));
        let action = self.lower(element.events.on_change.as_ref());

        let mut out = vec![
            format!(
                "this.{} = new SliderWidget({}, {}, {}, {}, {}, {}) {{",
                name,
                bx.x,
                bx.y,
                num(bx.width),
                num(bx.height),
                initial_message,
                num(range.initial())
            ),
            format!("{}@Override", INDENT),
            format!("{}protected void updateMessage() {{", INDENT),
            format!("{}{}this.setMessage({});", INDENT, INDENT, live_message),
            format!("{}}}", INDENT),
            String::new(),
            format!("{}@Override", INDENT),
        ];
        if action.is_empty() {
            out.push(format!("{}protected void applyValue() {{}}", INDENT));
        } else {
            out.push(format!("{}protected void applyValue() {{", INDENT));
            out.extend(nested(&action).into_iter().map(|l| format!("{}{}", INDENT, l)));
            out.push(format!("{}}}", INDENT));
        }
        out.push("};".to_string());
        out.extend(self.register(&format!("this.{}", name)));
        out
    }

    /// Render group for one element, in fixed order: rotation open, shadow,
    /// hover and blur notes, gradient or fill, type body, tooltip, border,
    /// rotation close.
    fn render_element(&mut self, element: &GuiElement, index: usize) -> Vec<String> {
        tracing::trace!(element = %element.id, kind = element.kind.tag(), "lowering render");
        let bx = ElementBox::of(element, self.settings);
        let profile = &self.profile;

        let open = effects::rotation_open(element, &bx, profile);
        let close = effects::rotation_close(element, profile);
        if !open.is_empty() {
            for import in profile.transform.imports {
                self.imports.insert(import.to_string());
            }
        }

        let mut inner = Vec::new();
        inner.extend(effects::shadow(element, &bx, &self.profile));
        inner.extend(effects::hover_comments(element));
        inner.extend(effects::blur_comment(element));
        inner.extend(self.background_fill(element, &bx));
        inner.extend(self.render_body(element, &bx, index));
        inner.extend(self.tooltip(element, &bx));
        inner.extend(effects::border(element, self.settings, &self.profile));

        if inner.is_empty() && open.is_empty() {
            return Vec::new();
        }
        let mut group = open;
        group.extend(inner);
        group.extend(close);
        group
    }

    /// Gradient when enabled, otherwise a flat fill for container types.
    /// Buttons only take the gradient; the widget paints its own face.
    fn background_fill(&self, element: &GuiElement, bx: &ElementBox) -> Vec<String> {
        match element.kind {
            ElementKind::Panel | ElementKind::Slot | ElementKind::ScrollPanel => {
                let gradient = effects::gradient(element, bx, &self.profile);
                if gradient.is_empty() {
                    vec![fill_box(&self.profile, bx, element_color(element))]
                } else {
                    gradient
                }
            }
            ElementKind::Button { .. } => effects::gradient(element, bx, &self.profile),
            _ => Vec::new(),
        }
    }

    fn render_body(&mut self, element: &GuiElement, bx: &ElementBox, index: usize) -> Vec<String> {
        let snippets = self.profile.templates;
        match &element.kind {
            ElementKind::Label {
                font_family,
                text_align,
                text_shadow,
                ..
            } => {
                let text = string_literal(element.kind.label());
                let width = fill(
                    snippets.text_width,
                    &[("text", &text), ("font", self.profile.font_renderer)],
                );
                let x = match text_align.unwrap_or_default() {
                    TextAlign::Left => bx.x.clone(),
                    TextAlign::Center => format!("{} + ({} - {}) / 2", bx.x, num(bx.width), width),
                    TextAlign::Right => format!("{} - {}", bx.x2, width),
                };
                let mut out = Vec::new();
                if let Some(family) = font_family.filter(|f| *f != FontFamily::Minecraft) {
                    out.push(format!("// Font {:?} has no vanilla renderer, drawn with the default font", family));
                }
                out.push(self.text(&text, &x, &bx.y, rgb(element.style.color.as_deref()), *text_shadow != Some(false)));
                out
            }
            ElementKind::TextField { .. } if self.profile.family.is_legacy_like() => {
                vec![format!("this.{}.drawTextBox();", variable_name(element, index))]
            }
            ElementKind::Checkbox { checked, .. } if self.profile.checkbox_style == CheckboxStyle::Manual => {
                self.manual_checkbox(element, bx, *checked)
            }
            ElementKind::Slider { .. } if self.profile.widget_class(&element.kind).is_none() => {
                self.manual_slider(element, bx)
            }
            ElementKind::ScrollPanel => {
                vec![
                    "// Scroll panel viewport".to_string(),
                    fill(
                        snippets.scissor_open,
                        &[("x", &bx.x), ("y", &bx.y), ("x2", &bx.x2), ("y2", &bx.y2)],
                    ),
                    "// Scrollable content goes here".to_string(),
                    snippets.scissor_close.to_string(),
                ]
            }
            ElementKind::Dropdown { options, .. } => {
                let text = string_literal(element.kind.label());
                let text_y = offset(&bx.y, js_round((bx.height - FONT_HEIGHT) / 2.0));
                let mut out = vec![format!("// Dropdown: {}", comment_text(element.kind.label()))];
                if !options.is_empty() {
                    out.push(format!("// Options: {}", comment_text(&options.join(", "))));
                }
                out.push(fill_box(&self.profile, bx, 0xFF00_0000));
                out.push(self.text(&text, &offset(&bx.x, 4.0), &text_y, 0xFF_FFFF, false));
                out.push(self.text(&string_literal("\u{25BC}"), &offset(&bx.x2, -10.0), &text_y, 0xFF_FFFF, false));
                out
            }
            ElementKind::Image { texture_path } => match texture_path.as_deref().filter(|p| !p.is_empty()) {
                Some(path) => {
                    for import in snippets.texture_imports {
                        self.imports.insert(import.to_string());
                    }
                    let id = fill(self.profile.identifier, &[("path", &string_literal(path))]);
                    let (w, h) = (num(bx.width), num(bx.height));
                    snippets
                        .texture
                        .iter()
                        .map(|t| fill(t, &[("id", &id), ("x", &bx.x), ("y", &bx.y), ("w", &w), ("h", &h)]))
                        .collect()
                }
                None => vec!["// Image: no texture path set".to_string()],
            },
            ElementKind::Entity { entity_type, scale } => vec![
                format!(
                    "// Entity: {} (scale {})",
                    comment_text(entity_type.as_deref().unwrap_or("unknown")),
                    num(scale.unwrap_or(1.0))
                ),
                format!(
                    "// Drawing it needs a live LivingEntity instance, centered at ({}, {})",
                    bx.center_x(),
                    bx.y2
                ),
            ],
            ElementKind::Item { item_id, .. } => {
                for import in snippets.item_imports {
                    self.imports.insert(import.to_string());
                }
                let raw = item_id.as_deref().filter(|i| !i.is_empty()).unwrap_or("stone");
                vec![
                    format!("// Item: {}", comment_text(raw)),
                    fill(snippets.item, &[("item", &item_constant(raw)), ("x", &bx.x), ("y", &bx.y)]),
                ]
            }
            ElementKind::ProgressBar { progress } => {
                let progress = progress.unwrap_or(0.0).clamp(0.0, 100.0);
                let filled = js_round(bx.width * progress / 100.0);
                vec![
                    fill_box(&self.profile, bx, 0xFF55_5555),
                    fill_rect(
                        &self.profile,
                        &bx.x,
                        &bx.y,
                        &offset(&bx.x, filled),
                        &bx.y2,
                        element_color(element),
                    ),
                ]
            }
            _ => Vec::new(),
        }
    }

    fn manual_checkbox(&self, element: &GuiElement, bx: &ElementBox, checked: bool) -> Vec<String> {
        let size = bx.height;
        let (x, y) = (&bx.x, &bx.y);
        let mut out = vec![
            format!("// Checkbox: {}", comment_text(element.kind.label())),
            fill_rect(&self.profile, x, y, &offset(x, size), &offset(y, size), 0xFF00_0000),
            fill_rect(
                &self.profile,
                &offset(x, 1.0),
                &offset(y, 1.0),
                &offset(x, size - 1.0),
                &offset(y, size - 1.0),
                0xFF8B_8B8B,
            ),
        ];
        if checked {
            out.push(fill_rect(
                &self.profile,
                &offset(x, 3.0),
                &offset(y, 3.0),
                &offset(x, size - 3.0),
                &offset(y, size - 3.0),
                element_color(element),
            ));
        }
        out.push(self.text(
            &string_literal(element.kind.label()),
            &offset(x, size + 4.0),
            &offset(y, js_round((size - FONT_HEIGHT) / 2.0)),
            rgb(element.style.color.as_deref()),
            false,
        ));
        out
    }

    fn manual_slider(&self, element: &GuiElement, bx: &ElementBox) -> Vec<String> {
        const KNOB_WIDTH: f64 = 8.0;
        let range = SliderRange::of(&element.kind);
        let label = element.kind.label();
        let knob = js_round(range.initial() * (bx.width - KNOB_WIDTH).max(0.0));
        let mid = js_round(bx.height / 2.0);
        let message = if label.is_empty() {
            num(range.mapped_initial())
        } else {
            format!("{}: {}", label, num(range.mapped_initial()))
        };

        vec![
            format!("// Slider: {}", comment_text(label)),
            fill_rect(
                &self.profile,
                &bx.x,
                &offset(&bx.y, mid - 1.0),
                &bx.x2,
                &offset(&bx.y, mid + 1.0),
                0xFFA0_A0A0,
            ),
            fill_rect(
                &self.profile,
                &offset(&bx.x, knob),
                &bx.y,
                &offset(&bx.x, knob + KNOB_WIDTH),
                &bx.y2,
                element_color(element),
            ),
            self.text(
                &string_literal(&message),
                &offset(&bx.x2, 4.0),
                &offset(&bx.y, js_round((bx.height - FONT_HEIGHT) / 2.0)),
                0xFF_FFFF,
                false,
            ),
        ]
    }

    fn tooltip(&self, element: &GuiElement, bx: &ElementBox) -> Vec<String> {
        let Some(tooltip) = element.tooltip.as_deref().filter(|t| !t.is_empty()) else {
            return Vec::new();
        };
        let text = string_literal(tooltip);
        let call = fill(
            self.profile.templates.tooltip,
            &[("text", &text), ("text_obj", &self.profile.text(&text))],
        );
        vec![
            format!(
                "if (mouseX >= {} && mouseX <= {} && mouseY >= {} && mouseY <= {}) {{",
                bx.x, bx.x2, bx.y, bx.y2
            ),
            format!("{}{}", INDENT, call),
            "}".to_string(),
        ]
    }

    fn text(&self, text: &str, x: &str, y: &str, color: u32, shadow: bool) -> String {
        let snippets = self.profile.templates;
        let template = if shadow { snippets.text_shadowed } else { snippets.text };
        fill(
            template,
            &[
                ("font", self.profile.font_renderer),
                ("text", text),
                ("x", x),
                ("y", y),
                ("color", &rgb_literal(color)),
            ],
        )
    }
}

/// Variable name with the editor's `<type>_<n>` default applied
pub fn variable_name(element: &GuiElement, index: usize) -> String {
    if element.variable_name.is_empty() {
        format!("{}_{}", element.kind.tag(), index + 1)
    } else {
        element.variable_name.clone()
    }
}

/// `minecraft:diamond_sword` -> `DIAMOND_SWORD`
pub fn item_constant(item_id: &str) -> String {
    let bare = item_id.rsplit(':').next().unwrap_or(item_id);
    bare.to_uppercase()
}

/// Note for an ON_CHANGE action the dialect cannot attach to the element
fn unwired_change(element: &GuiElement, reason: &str) -> Vec<String> {
    match element.events.on_change.as_ref() {
        Some(action) if lowers_to_statement(action) => {
            vec![format!("// ON_CHANGE {} on this client, not wired", reason)]
        }
        _ => Vec::new(),
    }
}

fn element_color(element: &GuiElement) -> u32 {
    encode_color(element.style.color.as_deref(), element.opacity())
}

/// Slider bounds with defaults applied
#[derive(Debug, Clone, Copy)]
struct SliderRange {
    min: f64,
    max: f64,
    value: f64,
}

impl SliderRange {
    fn of(kind: &ElementKind) -> Self {
        let (min, max, value) = match kind {
            ElementKind::Slider { min, max, value, .. } => (*min, *max, *value),
            _ => (None, None, None),
        };
        let min = min.unwrap_or(0.0);
        let max = max.unwrap_or(100.0);
        let value = value.unwrap_or((min + max) / 2.0);
        SliderRange { min, max, value }
    }

    /// Normalized position in [0, 1]
    fn initial(&self) -> f64 {
        if self.max <= self.min {
            return 0.0;
        }
        ((self.value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    fn mapped_initial(&self) -> f64 {
        js_round(self.min + self.initial() * (self.max - self.min).max(0.0))
    }

    /// Java expression mapping the widget's `this.value` back into the range
    fn java_mapped_value(&self) -> String {
        let span = num((self.max - self.min).max(0.0));
        if self.min == 0.0 {
            format!("(int) Math.round(this.value * {})", span)
        } else {
            format!("(int) Math.round({} + this.value * {})", num(self.min), span)
        }
    }
}

/// `{}` for an empty action, otherwise a block with the statement indented
fn lambda_body(action: &str) -> String {
    if action.is_empty() {
        return "{}".to_string();
    }
    format!("{{\n{}\n}}", nested(action).join("\n"))
}

fn nested(statement: &str) -> Vec<String> {
    statement
        .lines()
        .map(|l| if l.is_empty() { String::new() } else { format!("{}{}", INDENT, l) })
        .collect()
}

fn lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

/// Format a method at member indentation with its body one level deeper
fn method(header: &str, body: &[String]) -> String {
    let mut out = String::new();
    for line in header.lines() {
        out.push_str(INDENT);
        out.push_str(line);
        out.push('\n');
    }
    out.pop();
    out.push_str(" {\n");
    for line in body {
        if !line.is_empty() {
            out.push_str(INDENT);
            out.push_str(INDENT);
            out.push_str(line);
        }
        out.push('\n');
    }
    out.push_str(INDENT);
    out.push('}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::document::{ActionKind, McVersion, ModLoader};

    fn settings(loader: ModLoader, version: McVersion) -> ProjectSettings {
        ProjectSettings {
            loader,
            version,
            class_name: "TestScreen".to_string(),
            responsive: false,
            ..ProjectSettings::default()
        }
    }

    fn button(label: &str) -> GuiElement {
        GuiElement::new(ElementKind::Button { label: Some(label.to_string()) }, 10.0, 10.0, 100.0, 20.0)
            .with_name("button_1")
    }

    fn generate(elements: &[GuiElement], settings: &ProjectSettings) -> String {
        ScreenGenerator::new(settings, &[]).generate(elements)
    }

    #[test]
    fn test_empty_screen_is_a_valid_class() {
        let s = settings(ModLoader::Fabric, McVersion::V1_20_4);
        let out = generate(&[], &s);
        let expected = "\
import net.fabricmc.api.EnvType;
import net.fabricmc.api.Environment;
import net.minecraft.client.gui.DrawContext;
import net.minecraft.client.gui.screen.Screen;
import net.minecraft.text.Text;

@Environment(EnvType.CLIENT)
public class TestScreen extends Screen {
    public TestScreen() {
        super(Text.literal(\"TestScreen\"));
    }

    @Override
    protected void init() {
        super.init();
    }

    @Override
    public void render(DrawContext context, int mouseX, int mouseY, float delta) {
        super.render(context, mouseX, mouseY, delta);
    }
}
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_modern_button_is_registered_without_field() {
        let s = settings(ModLoader::Fabric, McVersion::V1_20_4);
        let out = generate(&[button("Go")], &s);
        assert!(out.contains(
            "this.addDrawableChild(ButtonWidget.builder(Text.literal(\"Go\"), button -> {}).dimensions(10, 10, 100, 20).build());"
        ));
        assert!(!out.contains("private ButtonWidget"));
        assert!(out.contains("import net.minecraft.client.gui.widget.ButtonWidget;"));
    }

    #[test]
    fn test_button_action_is_nested_in_lambda() {
        let s = settings(ModLoader::Fabric, McVersion::V1_21);
        let mut el = button("Spawn");
        el.events.on_click = Some(EventAction::new(ActionKind::ExecuteCommand, "/spawn"));
        let out = generate(&[el], &s);
        assert!(out.contains(
            "        this.addDrawableChild(ButtonWidget.builder(Text.literal(\"Spawn\"), button -> {\n            MinecraftClient.getInstance().player.networkHandler.sendChatCommand(\"spawn\");\n        }).dimensions(10, 10, 100, 20).build());"
        ));
        assert!(out.contains("import net.minecraft.client.MinecraftClient;"));
    }

    #[test]
    fn test_legacy_buttons_dispatch_by_id() {
        let s = settings(ModLoader::Forge, McVersion::V1_8_9);
        let mut first = button("One");
        first.events.on_click = Some(EventAction::new(ActionKind::CustomCode, "this.mc.displayGuiScreen(null);"));
        let mut second = button("Two").with_name("button_2");
        second.events.on_click = Some(EventAction::new(ActionKind::ExecuteCommand, "home"));
        let out = generate(&[first, second], &s);

        assert!(out.contains("    private GuiButton button_1;\n    private GuiButton button_2;"));
        assert!(out.contains("this.buttonList.add(this.button_1 = new GuiButton(0, 10, 10, 100, 20, \"One\"));"));
        assert!(out.contains("this.buttonList.add(this.button_2 = new GuiButton(1, 10, 10, 100, 20, \"Two\"));"));
        assert!(out.contains("protected void actionPerformed(GuiButton button) throws java.io.IOException {"));
        assert!(out.contains("        if (button.id == 0) {\n            this.mc.displayGuiScreen(null);\n        } else if (button.id == 1) {"));
        assert!(out.contains("Minecraft.getMinecraft().thePlayer.sendChatMessage(\"/home\");"));
    }

    #[test]
    fn test_no_dispatch_without_actions() {
        let s = settings(ModLoader::Forge, McVersion::V1_12_2);
        let out = generate(&[button("Idle")], &s);
        assert!(!out.contains("actionPerformed"));
    }

    #[test]
    fn test_rotation_wraps_render_group() {
        let s = settings(ModLoader::Fabric, McVersion::V1_20_4);
        let mut el = GuiElement::new(ElementKind::Panel, 0.0, 0.0, 50.0, 50.0);
        el.rotation = 45.0;
        el.style.border_width = Some(1.0);
        let out = generate(&[el], &s);

        assert_eq!(out.matches("context.getMatrices().push();").count(), 1);
        assert_eq!(out.matches("context.getMatrices().pop();").count(), 1);
        let push = out.find("getMatrices().push()").unwrap();
        let pop = out.find("getMatrices().pop()").unwrap();
        let fill = out.find("context.fill(0, 0, 50, 50").unwrap();
        let border = out.find("// Border").unwrap();
        assert!(push < fill && fill < border && border < pop);
        assert!(out.contains("import net.minecraft.util.math.RotationAxis;"));
    }

    #[test]
    fn test_slider_initial_value_and_message() {
        let s = settings(ModLoader::Fabric, McVersion::V1_20_4);
        let el = GuiElement::new(
            ElementKind::Slider {
                label: Some("Volume".to_string()),
                min: Some(0.0),
                max: Some(200.0),
                value: Some(50.0),
                step: None,
            },
            10.0,
            10.0,
            100.0,
            20.0,
        )
        .with_name("volume");
        let out = generate(&[el], &s);
        assert!(out.contains("    private SliderWidget volume;"));
        assert!(out.contains(
            "this.volume = new SliderWidget(10, 10, 100, 20, Text.literal(\"Volume: 50\"), 0.25) {"
        ));
        assert!(out.contains("this.setMessage(Text.literal(\"Volume: \" + (int) Math.round(this.value * 200)));"));
        assert!(out.contains("protected void applyValue() {}"));
        assert!(out.contains("this.addDrawableChild(this.volume);"));
    }

    #[test]
    fn test_legacy_checkbox_is_drawn_manually() {
        let s = settings(ModLoader::Forge, McVersion::V1_12_2);
        let mut el = GuiElement::new(
            ElementKind::Checkbox {
                label: Some("Sound".to_string()),
                checked: true,
            },
            10.0,
            10.0,
            20.0,
            20.0,
        );
        el.style.color = Some("#00FF00".to_string());
        let out = generate(&[el], &s);
        assert!(!out.contains("CheckboxWidget"));
        assert!(out.contains("drawRect(10, 10, 10 + 20, 10 + 20, 0xFF000000);"));
        assert!(out.contains("drawRect(10 + 3, 10 + 3, 10 + 17, 10 + 17, 0xFF00FF00);"));
        assert!(out.contains("this.fontRenderer.drawString(\"Sound\", 10 + 24, 10 + 6, 0x00FF00);"));
    }

    #[test]
    fn test_label_alignment_and_escaping() {
        let s = settings(ModLoader::Fabric, McVersion::V1_20_4);
        let el = GuiElement::new(
            ElementKind::Label {
                label: Some("Say \"hi\"".to_string()),
                font_family: None,
                text_align: Some(TextAlign::Center),
                text_shadow: Some(false),
            },
            0.0,
            0.0,
            100.0,
            10.0,
        );
        let out = generate(&[el], &s);
        assert!(out.contains(
            "context.drawText(this.textRenderer, \"Say \\\"hi\\\"\", 0 + (100 - this.textRenderer.getWidth(\"Say \\\"hi\\\"\")) / 2, 0, 0xFFFFFF, false);"
        ));
    }

    #[test]
    fn test_background_color_replaces_default_background() {
        let mut s = settings(ModLoader::Fabric, McVersion::V1_18_2);
        s.background_color = Some("#101010".to_string());
        let out = generate(&[], &s);
        assert!(out.contains("fill(matrices, 0, 0, this.width, this.height, 0xFF101010);"));
        assert!(!out.contains("this.renderBackground(matrices);"));
    }

    #[test]
    fn test_item_namespace_is_stripped() {
        assert_eq!(item_constant("minecraft:diamond_sword"), "DIAMOND_SWORD");
        assert_eq!(item_constant("apple"), "APPLE");
    }

    #[test]
    fn test_default_variable_names() {
        let s = settings(ModLoader::Fabric, McVersion::V1_20_4);
        let field = GuiElement::new(ElementKind::TextField { label: None }, 0.0, 0.0, 80.0, 20.0);
        let out = generate(&[GuiElement::new(ElementKind::Panel, 0.0, 0.0, 1.0, 1.0), field], &s);
        assert!(out.contains("    private TextFieldWidget text_field_2;"));
    }

    #[test]
    fn test_package_declaration() {
        let s = settings(ModLoader::Fabric, McVersion::V1_20_4);
        let out = ScreenGenerator::new(&s, &[]).with_package(Some("com.example.gui")).generate(&[]);
        assert!(out.starts_with("package com.example.gui;\n\nimport "));
    }

    #[test]
    fn test_unwired_change_is_noted_without_imports() {
        let s = settings(ModLoader::Forge, McVersion::V1_12_2);
        let mut checkbox = GuiElement::new(ElementKind::Checkbox { label: None, checked: false }, 0.0, 0.0, 20.0, 20.0);
        checkbox.events.on_change = Some(EventAction::new(ActionKind::ExecuteCommand, "/toggle"));
        let mut slider = GuiElement::new(
            ElementKind::Slider { label: None, min: None, max: None, value: None, step: None },
            0.0,
            30.0,
            100.0,
            20.0,
        );
        slider.events.on_change = Some(EventAction::new(ActionKind::PlaySound, "ui.button.click"));
        let mut field = GuiElement::new(ElementKind::TextField { label: None }, 0.0, 60.0, 100.0, 20.0);
        field.events.on_change = Some(EventAction::new(ActionKind::OpenScreen, "other"));

        let out = generate(&[checkbox, slider, field], &s);
        assert!(out.contains("// ON_CHANGE has no checkbox widget on this client, not wired"));
        assert!(out.contains("// ON_CHANGE has no slider widget on this client, not wired"));
        assert!(out.contains("// ON_CHANGE needs keyTyped forwarding on this client, not wired"));
        assert!(!out.contains("toggle"));
        assert!(!out.contains("UI_BUTTON_CLICK"));
        assert!(!out.contains("import net.minecraft.client.Minecraft;"));
        assert!(!out.contains("SoundEvents"));
    }

    #[test]
    fn test_empty_change_action_is_not_noted() {
        let s = settings(ModLoader::Forge, McVersion::V1_8_9);
        let mut checkbox = GuiElement::new(ElementKind::Checkbox { label: None, checked: true }, 0.0, 0.0, 20.0, 20.0);
        checkbox.events.on_change = Some(EventAction::new(ActionKind::CustomCode, ""));
        let out = generate(&[checkbox], &s);
        assert!(!out.contains("ON_CHANGE"));
    }

    #[test]
    fn test_line_breaks_cannot_escape_comments() {
        let s = settings(ModLoader::Fabric, McVersion::V1_20_4);
        let dropdown = GuiElement::new(
            ElementKind::Dropdown {
                label: Some("Mode\nthis.close();".to_string()),
                options: vec!["Option 1".to_string(), "\nOption 2".to_string()],
            },
            0.0,
            0.0,
            100.0,
            20.0,
        );
        let entity = GuiElement::new(
            ElementKind::Entity { entity_type: Some("pig\r\nSystem.exit(0);".to_string()), scale: None },
            0.0,
            40.0,
            20.0,
            40.0,
        );
        let out = generate(&[dropdown, entity], &s);

        assert!(out.contains("// Options: Option 1,  Option 2"));
        for line in out.lines().map(str::trim) {
            if line.contains("Option 2") || line.contains("System.exit") {
                assert!(line.starts_with("//"), "escaped comment: {}", line);
            }
            if line.contains("this.close();") {
                assert!(line.starts_with("//") || line.contains("\\nthis.close();"), "escaped comment: {}", line);
            }
        }
    }
}
