/// Java snippet tables, one per dialect family
///
/// Traversal code never spells out target syntax itself. It picks a snippet
/// from these tables (via the resolved `DialectProfile`) and fills the named
/// `{slots}` with [`fill`].
use regex::{Captures, Regex};
use std::sync::OnceLock;

fn slot_pattern() -> &'static Regex {
    static SLOT: OnceLock<Regex> = OnceLock::new();
    SLOT.get_or_init(|| Regex::new(r"\{([a-z][a-z0-9_]*)\}").expect("slot pattern is valid"))
}

/// Substitute `{name}` slots in a single pass.
///
/// Substituted values are not re-scanned, and slots with no matching argument
/// are left untouched, so Java braces in a template survive.
pub fn fill(template: &str, args: &[(&str, &str)]) -> String {
    slot_pattern()
        .replace_all(template, |caps: &Captures| {
            let key = &caps[1];
            match args.iter().find(|(name, _)| *name == key) {
                Some((_, value)) => value.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Quote and escape a value as a Java string literal
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

/// Make a user value safe inside a `//` comment: a line break would end the
/// comment and turn the rest of the value into code
pub fn comment_text(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

/// Drawing and import snippets for one dialect family
#[derive(Debug)]
pub struct Templates {
    pub fill: &'static str,
    pub gradient: &'static str,
    pub text: &'static str,
    pub text_shadowed: &'static str,
    pub text_width: &'static str,
    pub tooltip: &'static str,
    pub scissor_open: &'static str,
    pub scissor_close: &'static str,
    pub item: &'static str,
    pub texture: &'static [&'static str],
    pub base_imports: &'static [&'static str],
    pub widget_import_prefix: &'static str,
    pub item_imports: &'static [&'static str],
    pub texture_imports: &'static [&'static str],
    pub client_imports: &'static [&'static str],
    pub sound_imports: &'static [&'static str],
    pub play_sound: &'static str,
}

pub static MODERN: Templates = Templates {
    fill: "context.fill({x}, {y}, {x2}, {y2}, {color});",
    gradient: "context.fillGradient({x}, {y}, {x2}, {y2}, {start}, {end});",
    text: "context.drawText(this.textRenderer, {text}, {x}, {y}, {color}, false);",
    text_shadowed: "context.drawText(this.textRenderer, {text}, {x}, {y}, {color}, true);",
    text_width: "this.textRenderer.getWidth({text})",
    tooltip: "context.drawTooltip(this.textRenderer, {text_obj}, mouseX, mouseY);",
    scissor_open: "context.enableScissor({x}, {y}, {x2}, {y2});",
    scissor_close: "context.disableScissor();",
    item: "context.drawItem(new ItemStack(Items.{item}), {x}, {y});",
    texture: &["context.drawTexture({id}, {x}, {y}, 0, 0, {w}, {h}, {w}, {h});"],
    base_imports: &[
        "net.minecraft.client.gui.DrawContext",
        "net.minecraft.client.gui.screen.Screen",
        "net.minecraft.text.Text",
    ],
    widget_import_prefix: "net.minecraft.client.gui.widget",
    item_imports: &["net.minecraft.item.ItemStack", "net.minecraft.item.Items"],
    texture_imports: &["net.minecraft.util.Identifier"],
    client_imports: &["net.minecraft.client.MinecraftClient"],
    sound_imports: &[
        "net.minecraft.client.MinecraftClient",
        "net.minecraft.client.sound.PositionedSoundInstance",
        "net.minecraft.sound.SoundEvents",
    ],
    play_sound: "MinecraftClient.getInstance().getSoundManager().play(PositionedSoundInstance.master(SoundEvents.{sound}, 1.0f));",
};

pub static MID_MODERN: Templates = Templates {
    fill: "fill(matrices, {x}, {y}, {x2}, {y2}, {color});",
    gradient: "fillGradient(matrices, {x}, {y}, {x2}, {y2}, {start}, {end});",
    text: "this.textRenderer.draw(matrices, {text}, {x}, {y}, {color});",
    text_shadowed: "this.textRenderer.drawWithShadow(matrices, {text}, {x}, {y}, {color});",
    text_width: "this.textRenderer.getWidth({text})",
    tooltip: "this.renderTooltip(matrices, {text_obj}, mouseX, mouseY);",
    scissor_open: "// GL11.glEnable(GL11.GL_SCISSOR_TEST);",
    scissor_close: "// GL11.glDisable(GL11.GL_SCISSOR_TEST);",
    item: "this.itemRenderer.renderInGuiWithOverrides(new ItemStack(Items.{item}), {x}, {y});",
    texture: &[
        "RenderSystem.setShaderTexture(0, {id});",
        "drawTexture(matrices, {x}, {y}, 0, 0, {w}, {h}, {w}, {h});",
    ],
    base_imports: &["net.minecraft.client.gui.screen.Screen"],
    widget_import_prefix: "net.minecraft.client.gui.widget",
    item_imports: &["net.minecraft.item.ItemStack", "net.minecraft.item.Items"],
    texture_imports: &[
        "com.mojang.blaze3d.systems.RenderSystem",
        "net.minecraft.util.Identifier",
    ],
    client_imports: &["net.minecraft.client.MinecraftClient"],
    sound_imports: &[
        "net.minecraft.client.MinecraftClient",
        "net.minecraft.client.sound.PositionedSoundInstance",
        "net.minecraft.sound.SoundEvents",
    ],
    play_sound: "MinecraftClient.getInstance().getSoundManager().play(PositionedSoundInstance.master(SoundEvents.{sound}, 1.0f));",
};

pub static LEGACY: Templates = Templates {
    fill: "drawRect({x}, {y}, {x2}, {y2}, {color});",
    gradient: "drawGradientRect({x}, {y}, {x2}, {y2}, {start}, {end});",
    text: "{font}.drawString({text}, {x}, {y}, {color});",
    text_shadowed: "{font}.drawStringWithShadow({text}, {x}, {y}, {color});",
    text_width: "{font}.getStringWidth({text})",
    tooltip: "this.drawHoveringText(java.util.Collections.singletonList({text}), mouseX, mouseY);",
    scissor_open: "// GL11.glEnable(GL11.GL_SCISSOR_TEST);",
    scissor_close: "// GL11.glDisable(GL11.GL_SCISSOR_TEST);",
    item: "this.itemRender.renderItemAndEffectIntoGUI(new ItemStack(Items.{item}), {x}, {y});",
    texture: &[
        "this.mc.getTextureManager().bindTexture({id});",
        "drawModalRectWithCustomSizedTexture({x}, {y}, 0, 0, {w}, {h}, {w}, {h});",
    ],
    base_imports: &["net.minecraft.client.gui.GuiScreen"],
    widget_import_prefix: "net.minecraft.client.gui",
    item_imports: &["net.minecraft.init.Items", "net.minecraft.item.ItemStack"],
    texture_imports: &["net.minecraft.util.ResourceLocation"],
    client_imports: &["net.minecraft.client.Minecraft"],
    sound_imports: &[
        "net.minecraft.client.Minecraft",
        "net.minecraft.client.audio.PositionedSoundRecord",
        "net.minecraft.init.SoundEvents",
    ],
    play_sound: "Minecraft.getMinecraft().getSoundHandler().playSound(PositionedSoundRecord.getMasterRecord(SoundEvents.{sound}, 1.0F));",
};

/// Push / translate / rotate / pop snippets for one transform API
#[derive(Debug)]
pub struct TransformTemplates {
    pub push: &'static str,
    pub translate: &'static str,
    pub rotate: &'static str,
    pub pop: &'static str,
    pub imports: &'static [&'static str],
}

pub static DRAW_CONTEXT_TRANSFORM: TransformTemplates = TransformTemplates {
    push: "context.getMatrices().push();",
    translate: "context.getMatrices().translate({dx}, {dy}, 0);",
    rotate: "context.getMatrices().multiply(RotationAxis.POSITIVE_Z.rotationDegrees({degrees}f));",
    pop: "context.getMatrices().pop();",
    imports: &["net.minecraft.util.math.RotationAxis"],
};

pub static MATRIX_STACK_TRANSFORM: TransformTemplates = TransformTemplates {
    push: "matrices.push();",
    translate: "matrices.translate({dx}, {dy}, 0);",
    rotate: "matrices.multiply(Vec3f.POSITIVE_Z.getDegreesQuaternion({degrees}f));",
    pop: "matrices.pop();",
    imports: &["net.minecraft.util.math.Vec3f"],
};

pub static GL11_TRANSFORM: TransformTemplates = TransformTemplates {
    push: "GL11.glPushMatrix();",
    translate: "GL11.glTranslatef({dx}, {dy}, 0);",
    rotate: "GL11.glRotatef({degrees}f, 0, 0, 1);",
    pop: "GL11.glPopMatrix();",
    imports: &["org.lwjgl.opengl.GL11"],
};

pub static GL_STATE_MANAGER_TRANSFORM: TransformTemplates = TransformTemplates {
    push: "GlStateManager.pushMatrix();",
    translate: "GlStateManager.translate({dx}, {dy}, 0);",
    rotate: "GlStateManager.rotate({degrees}f, 0, 0, 1);",
    pop: "GlStateManager.popMatrix();",
    imports: &["net.minecraft.client.renderer.GlStateManager"],
};

// Version-specific client calls, picked by the profile resolver.

pub const OPEN_SCREEN_SET: &str = "MinecraftClient.getInstance().setScreen(new {screen}());";
pub const OPEN_SCREEN_OPEN: &str = "MinecraftClient.getInstance().openScreen(new {screen}());";
pub const OPEN_SCREEN_LEGACY: &str = "Minecraft.getMinecraft().displayGuiScreen(new {screen}());";

pub const COMMAND_CHAT_COMMAND: &str =
    "MinecraftClient.getInstance().player.networkHandler.sendChatCommand({command});";
pub const COMMAND_CHAT_MESSAGE: &str = "MinecraftClient.getInstance().player.sendChatMessage({slash_command});";
pub const COMMAND_LEGACY_THE_PLAYER: &str = "Minecraft.getMinecraft().thePlayer.sendChatMessage({slash_command});";
pub const COMMAND_LEGACY_PLAYER: &str = "Minecraft.getMinecraft().player.sendChatMessage({slash_command});";

pub const TEXT_LITERAL: &str = "Text.literal({text})";
pub const TEXT_LITERAL_OLD: &str = "new LiteralText({text})";

pub const IDENTIFIER_OF: &str = "Identifier.of({path})";
pub const IDENTIFIER_NEW: &str = "new Identifier({path})";
pub const RESOURCE_LOCATION: &str = "new ResourceLocation({path})";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_named_slots() {
        let out = fill(MODERN.fill, &[("x", "1"), ("y", "2"), ("x2", "3"), ("y2", "4"), ("color", "0xFF000000")]);
        assert_eq!(out, "context.fill(1, 2, 3, 4, 0xFF000000);");
    }

    #[test]
    fn test_fill_is_single_pass() {
        // A substituted value that looks like a slot must not be expanded again.
        let out = fill("a({x}, {y})", &[("x", "{y}"), ("y", "2")]);
        assert_eq!(out, "a({y}, 2)");
    }

    #[test]
    fn test_string_literal_escapes() {
        assert_eq!(string_literal("Go"), "\"Go\"");
        assert_eq!(string_literal("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(string_literal("a\\b\nc"), "\"a\\\\b\\nc\"");
    }

    #[test]
    fn test_comment_text_stays_on_one_line() {
        assert_eq!(comment_text("plain"), "plain");
        assert_eq!(comment_text("a\nb\r\nc"), "a b  c");
    }

    #[test]
    fn test_unknown_slots_and_java_braces_survive() {
        let out = fill("button -> { {body} } {other}", &[("body", "run();")]);
        assert_eq!(out, "button -> { run(); } {other}");
    }
}
