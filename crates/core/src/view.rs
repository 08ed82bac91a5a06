//! Rendered output shared by the storefront and admin widgets.
//!
//! Every event handler answers with an [`Update`]: the HTML fragments to
//! swap into bound elements plus, optionally, a transient [`Notice`].

use std::time::Duration;

#[cfg(feature = "render")]
use askama::Template;
use serde::{Deserialize, Serialize};

/// Rendered HTML destined for one bound element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// Element id (or class selector) the HTML replaces.
    pub target: String,
    pub html: String,
}

impl Fragment {
    #[must_use]
    pub fn new(target: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            html: html.into(),
        }
    }
}

/// Notice severity, used as the notification CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    #[default]
    Success,
    Error,
}

impl NoticeKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    /// How long a notice stays on screen before it is dismissed.
    pub const DISPLAY_DURATION: Duration = Duration::from_secs(3);

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.kind, NoticeKind::Error)
    }

    /// Render into the notification element `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    #[cfg(feature = "render")]
    pub fn render(&self, target: &str) -> Result<Fragment, askama::Error> {
        let html = NotificationTemplate {
            kind: self.kind.as_str(),
            message: &self.message,
            dismiss_ms: Self::DISPLAY_DURATION.as_millis(),
        }
        .render()?;
        Ok(Fragment::new(target, html.trim()))
    }
}

/// Transient notification markup.
#[cfg(feature = "render")]
#[derive(Template)]
#[template(path = "partials/notification.html")]
struct NotificationTemplate<'a> {
    kind: &'a str,
    message: &'a str,
    dismiss_ms: u128,
}

/// Result of handling one event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    pub fragments: Vec<Fragment>,
    pub notice: Option<Notice>,
}

impl Update {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An update that only shows a notice.
    #[must_use]
    pub fn notice(notice: Notice) -> Self {
        Self {
            fragments: Vec::new(),
            notice: Some(notice),
        }
    }

    #[must_use]
    pub fn with_fragment(mut self, fragment: Fragment) -> Self {
        self.fragments.push(fragment);
        self
    }

    #[must_use]
    pub fn with_fragments(mut self, fragments: impl IntoIterator<Item = Fragment>) -> Self {
        self.fragments.extend(fragments);
        self
    }

    #[must_use]
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }

    /// Combine two updates; the later notice wins.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.fragments.extend(other.fragments);
        if other.notice.is_some() {
            self.notice = other.notice;
        }
        self
    }

    /// Latest fragment rendered for `target`, if any.
    #[must_use]
    pub fn fragment(&self, target: &str) -> Option<&Fragment> {
        self.fragments.iter().rev().find(|f| f.target == target)
    }
}
