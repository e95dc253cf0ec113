/// Event action lowering
///
/// Turns a declarative `{type, value}` action into one Java statement for the
/// resolved dialect. Lowering never fails: unknown or missing action kinds
/// produce an empty statement.
use regex::Regex;
use std::sync::OnceLock;

use crate::generator::dialect::DialectProfile;
use crate::generator::document::{ActionKind, EventAction, ScreenRef};
use crate::generator::templates::{fill, string_literal};

/// Dialect plus the read-only sibling screens used for OPEN_SCREEN targets
#[derive(Debug, Clone, Copy)]
pub struct ActionContext<'a> {
    pub profile: &'a DialectProfile,
    pub screens: &'a [ScreenRef],
}

impl<'a> ActionContext<'a> {
    pub fn new(profile: &'a DialectProfile, screens: &'a [ScreenRef]) -> Self {
        ActionContext { profile, screens }
    }

    /// Class name for a screen id, or the raw value when the screen is gone
    fn screen_class<'v>(&'v self, value: &'v str) -> &'v str {
        match self.screens.iter().find(|s| s.id == value) {
            Some(screen) if !screen.class_name.is_empty() => &screen.class_name,
            Some(_) => value,
            None => {
                tracing::warn!(target = value, "OPEN_SCREEN target not found, emitting raw reference");
                value
            }
        }
    }
}

pub fn lower_action(action: &EventAction, ctx: &ActionContext) -> String {
    let profile = ctx.profile;
    match &action.kind {
        Some(ActionKind::OpenScreen) => {
            let class = ctx.screen_class(&action.value);
            fill(profile.open_screen, &[("screen", class)])
        }
        Some(ActionKind::ExecuteCommand) => {
            let command = strip_command_slash(&action.value);
            fill(
                profile.run_command,
                &[
                    ("command", &string_literal(command)),
                    ("slash_command", &string_literal(&format!("/{}", command))),
                ],
            )
        }
        Some(ActionKind::PlaySound) => fill(
            profile.templates.play_sound,
            &[("sound", &sound_constant(&action.value))],
        ),
        Some(ActionKind::CustomCode) => action.value.clone(),
        Some(ActionKind::Unknown(kind)) => {
            tracing::debug!(kind = kind.as_str(), "skipping unknown action kind");
            String::new()
        }
        None => String::new(),
    }
}

/// Whether [`lower_action`] produces a statement for this action
pub fn lowers_to_statement(action: &EventAction) -> bool {
    match &action.kind {
        Some(ActionKind::OpenScreen | ActionKind::ExecuteCommand | ActionKind::PlaySound) => true,
        Some(ActionKind::CustomCode) => !action.value.is_empty(),
        Some(ActionKind::Unknown(_)) | None => false,
    }
}

/// Imports a lowered action depends on
pub fn action_imports(action: &EventAction, profile: &DialectProfile) -> &'static [&'static str] {
    match action.kind {
        Some(ActionKind::OpenScreen) | Some(ActionKind::ExecuteCommand) => profile.templates.client_imports,
        Some(ActionKind::PlaySound) => profile.templates.sound_imports,
        _ => &[],
    }
}

/// Drop one leading `/`, the chat prefix users tend to type
pub fn strip_command_slash(command: &str) -> &str {
    command.strip_prefix('/').unwrap_or(command)
}

/// `ui.button.click` -> `UI_BUTTON_CLICK`
pub fn sound_constant(sound: &str) -> String {
    static NON_IDENT: OnceLock<Regex> = OnceLock::new();
    let re = NON_IDENT.get_or_init(|| Regex::new(r"[^A-Za-z0-9]+").expect("sound pattern is valid"));
    re.replace_all(&sound.to_uppercase(), "_").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::document::{McVersion, ModLoader};

    fn modern() -> DialectProfile {
        DialectProfile::resolve(ModLoader::Fabric, McVersion::V1_20_4)
    }

    #[test]
    fn test_open_screen_resolves_class_name() {
        let profile = modern();
        let screens = vec![ScreenRef::new("2", "SettingsScreen")];
        let ctx = ActionContext::new(&profile, &screens);
        let out = lower_action(&EventAction::new(ActionKind::OpenScreen, "2"), &ctx);
        assert_eq!(out, "MinecraftClient.getInstance().setScreen(new SettingsScreen());");
    }

    #[test]
    fn test_open_screen_missing_target_degrades() {
        let profile = modern();
        let screens = vec![ScreenRef::new("2", "SettingsScreen")];
        let ctx = ActionContext::new(&profile, &screens);
        let out = lower_action(&EventAction::new(ActionKind::OpenScreen, "missing-id"), &ctx);
        assert!(out.contains("missing-id"));
        assert_eq!(out, "MinecraftClient.getInstance().setScreen(new missing-id());");
    }

    #[test]
    fn test_command_slash_is_stripped() {
        let profile = modern();
        let ctx = ActionContext::new(&profile, &[]);
        let with_slash = lower_action(&EventAction::new(ActionKind::ExecuteCommand, "/say hi"), &ctx);
        let without = lower_action(&EventAction::new(ActionKind::ExecuteCommand, "say hi"), &ctx);
        assert_eq!(with_slash, without);
        assert_eq!(
            with_slash,
            "MinecraftClient.getInstance().player.networkHandler.sendChatCommand(\"say hi\");"
        );
    }

    #[test]
    fn test_legacy_command_keeps_chat_prefix() {
        let profile = DialectProfile::resolve(ModLoader::Forge, McVersion::V1_8_9);
        let ctx = ActionContext::new(&profile, &[]);
        let out = lower_action(&EventAction::new(ActionKind::ExecuteCommand, "/spawn"), &ctx);
        assert_eq!(out, "Minecraft.getMinecraft().thePlayer.sendChatMessage(\"/spawn\");");
    }

    #[test]
    fn test_play_sound_normalizes_name() {
        let profile = modern();
        let ctx = ActionContext::new(&profile, &[]);
        let out = lower_action(&EventAction::new(ActionKind::PlaySound, "ui.button.click"), &ctx);
        assert!(out.contains("SoundEvents.UI_BUTTON_CLICK"));
        assert_eq!(sound_constant("entity--player.levelup"), "ENTITY_PLAYER_LEVELUP");
    }

    #[test]
    fn test_custom_code_is_verbatim() {
        let profile = modern();
        let ctx = ActionContext::new(&profile, &[]);
        let code = "this.close(); System.out.println(\"bye\");";
        assert_eq!(lower_action(&EventAction::new(ActionKind::CustomCode, code), &ctx), code);
    }

    #[test]
    fn test_unknown_and_missing_kinds_are_empty() {
        let profile = modern();
        let ctx = ActionContext::new(&profile, &[]);
        let unknown = EventAction::new(ActionKind::Unknown("TELEPORT".to_string()), "x");
        assert_eq!(lower_action(&unknown, &ctx), "");
        let missing = EventAction {
            kind: None,
            value: "x".to_string(),
        };
        assert_eq!(lower_action(&missing, &ctx), "");
        assert!(action_imports(&missing, &profile).is_empty());
    }
}
