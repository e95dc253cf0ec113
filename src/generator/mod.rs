/// Screen document to Java source generator
pub mod actions;
pub mod assembler;
pub mod color;
pub mod dialect;
pub mod document;
pub mod effects;
pub mod error;
pub mod geometry;
pub mod templates;

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

pub use assembler::{variable_name, ScreenGenerator};
pub use dialect::{DialectFamily, DialectProfile};
pub use document::{GuiElement, McVersion, ModLoader, ProjectSettings, Screen, ScreenRef};
pub use error::{GenerateError, Result};

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "void", "volatile", "while",
];

/// Whether `name` can be used as a Java field or class name
pub fn is_java_identifier(name: &str) -> bool {
    static IDENT: OnceLock<Regex> = OnceLock::new();
    let re = IDENT.get_or_init(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern is valid"));
    re.is_match(name) && !JAVA_KEYWORDS.contains(&name)
}

/// Check the names the generated class would declare.
///
/// Every element that needs a persistent field must have a legal, unique name
/// under the resolved dialect, and the class name must be legal.
pub fn validate(elements: &[GuiElement], settings: &ProjectSettings) -> Result<()> {
    if !is_java_identifier(&settings.class_name) {
        return Err(GenerateError::InvalidClassName(settings.class_name.clone()));
    }

    let profile = DialectProfile::resolve(settings.loader, settings.version);
    let mut seen: HashMap<String, String> = HashMap::new();

    for (index, element) in elements.iter().enumerate() {
        if profile.field_class(&element.kind).is_none() {
            continue;
        }
        let name = variable_name(element, index);
        let label = element_label(element, index);

        if !is_java_identifier(&name) {
            return Err(GenerateError::InvalidIdentifier { name, element: label });
        }
        if let Some(first) = seen.get(&name) {
            tracing::warn!(name = %name, first = %first, second = %label, "duplicate field name");
            return Err(GenerateError::DuplicateIdentifier {
                name,
                first: first.clone(),
                second: label,
            });
        }
        seen.insert(name, label);
    }
    Ok(())
}

/// Validate, then generate
pub fn generate(elements: &[GuiElement], settings: &ProjectSettings, screens: &[ScreenRef]) -> Result<String> {
    generate_in_package(elements, settings, screens, None)
}

pub fn generate_in_package(
    elements: &[GuiElement],
    settings: &ProjectSettings,
    screens: &[ScreenRef],
    package: Option<&str>,
) -> Result<String> {
    validate(elements, settings)?;
    Ok(ScreenGenerator::new(settings, screens).with_package(package).generate(elements))
}

/// Generate without validation. Total: every input produces a class.
pub fn generate_unchecked(elements: &[GuiElement], settings: &ProjectSettings, screens: &[ScreenRef]) -> String {
    ScreenGenerator::new(settings, screens).generate(elements)
}

/// Element id, or its position when the editor left the id empty
fn element_label(element: &GuiElement, index: usize) -> String {
    if element.id.is_empty() {
        format!("#{}", index)
    } else {
        element.id.clone()
    }
}
