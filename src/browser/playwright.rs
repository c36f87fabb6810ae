use std::fmt;

use serde::{Deserialize, Serialize};

/// Selector hints used by browser_server.js to locate elements in the DOM.
///
/// Resolution order on the Node side: `css`, then `text`, then
/// `role` + `name`. `nth` picks one element out of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SelectorHint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>, // ARIA role, e.g. "textbox", "button"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>, // accessible name (aria-label, placeholder or visible text)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>, // visible text, e.g. "Registration Form"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css: Option<String>, // raw CSS selector
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nth: Option<u32>,
}

impl SelectorHint {
    pub fn role(role: &str, name: &str) -> Self {
        SelectorHint {
            role: Some(role.to_string()),
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn textbox(name: &str) -> Self {
        Self::role("textbox", name)
    }

    pub fn button(name: &str) -> Self {
        Self::role("button", name)
    }

    pub fn text(text: &str) -> Self {
        SelectorHint {
            text: Some(text.to_string()),
            ..Default::default()
        }
    }

    pub fn css(selector: &str) -> Self {
        SelectorHint {
            css: Some(selector.to_string()),
            ..Default::default()
        }
    }

    pub fn nth(mut self, index: u32) -> Self {
        self.nth = Some(index);
        self
    }
}

impl fmt::Display for SelectorHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(css) = &self.css {
            write!(f, "css={}", css)?;
        } else if let Some(text) = &self.text {
            write!(f, "text={}", text)?;
        } else {
            write!(
                f,
                "role={}[name=\"{}\"]",
                self.role.as_deref().unwrap_or("*"),
                self.name.as_deref().unwrap_or("")
            )?;
        }
        if let Some(n) = self.nth {
            write!(f, " >> nth={}", n)?;
        }
        Ok(())
    }
}
