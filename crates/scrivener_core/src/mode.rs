//! Writing modes and their system instructions.

use serde::{Deserialize, Serialize};

/// The writing style a generation is produced in.
///
/// Each mode maps to one fixed system instruction. The identifiers are the
/// kebab-case strings accepted on the wire.
///
/// # Examples
///
/// ```
/// use scrivener_core::WritingMode;
///
/// assert_eq!(WritingMode::from_identifier("blog-post"), WritingMode::BlogPost);
/// assert_eq!(WritingMode::from_identifier("limerick"), WritingMode::Email);
/// assert_eq!(WritingMode::BlogPost.to_string(), "blog-post");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum WritingMode {
    /// Professional email
    #[default]
    Email,
    /// Blog post
    BlogPost,
    /// Social media caption
    SocialMedia,
    /// Code comments
    CodeComments,
    /// Product description
    ProductDescription,
}

impl WritingMode {
    /// Resolve an arbitrary identifier to a mode.
    ///
    /// Total over all strings: anything unrecognized, including the empty
    /// string, is [`WritingMode::Email`].
    pub fn from_identifier(identifier: &str) -> Self {
        match identifier {
            "email" => WritingMode::Email,
            "blog-post" => WritingMode::BlogPost,
            "social-media" => WritingMode::SocialMedia,
            "code-comments" => WritingMode::CodeComments,
            "product-description" => WritingMode::ProductDescription,
            _ => WritingMode::default(),
        }
    }

    /// The system instruction sent to the model for this mode.
    pub fn system_instruction(&self) -> &'static str {
        match self {
            WritingMode::Email => {
                "Write a professional email based on the following requirements:"
            }
            WritingMode::BlogPost => "Write an engaging blog post based on the following topic:",
            WritingMode::SocialMedia => "Create a compelling social media caption based on:",
            WritingMode::CodeComments => "Generate clear and helpful code comments for:",
            WritingMode::ProductDescription => "Write a persuasive product description for:",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            WritingMode::Email => "Email",
            WritingMode::BlogPost => "Blog Post",
            WritingMode::SocialMedia => "Social Media Caption",
            WritingMode::CodeComments => "Code Comments",
            WritingMode::ProductDescription => "Product Description",
        }
    }

    /// The wire identifier (`"blog-post"`, ...).
    pub fn identifier(&self) -> &'static str {
        self.into()
    }
}

/// Map a mode identifier straight to its system instruction.
///
/// ```
/// use scrivener_core::resolve_system_prompt;
///
/// assert_eq!(
///     resolve_system_prompt(""),
///     "Write a professional email based on the following requirements:"
/// );
/// ```
pub fn resolve_system_prompt(identifier: &str) -> &'static str {
    WritingMode::from_identifier(identifier).system_instruction()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_known_modes_resolve_to_fixed_instructions() {
        let expected = [
            (
                "email",
                "Write a professional email based on the following requirements:",
            ),
            (
                "blog-post",
                "Write an engaging blog post based on the following topic:",
            ),
            (
                "social-media",
                "Create a compelling social media caption based on:",
            ),
            (
                "code-comments",
                "Generate clear and helpful code comments for:",
            ),
            (
                "product-description",
                "Write a persuasive product description for:",
            ),
        ];

        for (id, instruction) in expected {
            assert_eq!(resolve_system_prompt(id), instruction, "mode {}", id);
        }
    }

    #[test]
    fn test_unknown_modes_fall_back_to_email() {
        let email = WritingMode::Email.system_instruction();
        for id in ["", "EMAIL", "blog_post", "haiku", " email", "product-description "] {
            assert_eq!(resolve_system_prompt(id), email, "mode {:?}", id);
        }
    }

    #[test]
    fn test_identifier_round_trips_for_every_mode() {
        for mode in WritingMode::iter() {
            assert_eq!(WritingMode::from_identifier(mode.identifier()), mode);
            assert_eq!(mode.to_string(), mode.identifier());
        }
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&WritingMode::ProductDescription).unwrap();
        assert_eq!(json, "\"product-description\"");
    }
}
