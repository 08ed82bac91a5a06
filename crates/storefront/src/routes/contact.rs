//! Contact details rendered on page load.

use askama::Template;
use tienda_core::Update;

use super::{fragment, text_fragment};
use crate::bindings;
use crate::config::ContactConfig;
use crate::error::Result;

/// Facebook link in the footer.
#[derive(Template)]
#[template(path = "partials/facebook_link.html")]
pub struct FacebookLinkTemplate<'a> {
    pub url: &'a str,
}

/// Header phone, footer phone and Facebook link.
///
/// # Errors
///
/// Returns an error if a template fails to render.
pub fn render(contact: &ContactConfig) -> Result<Update> {
    Ok(Update::new().with_fragments([
        text_fragment(bindings::PHONE_NUMBER, &contact.phone)?,
        text_fragment(bindings::FOOTER_PHONE, &contact.phone)?,
        fragment(
            bindings::FACEBOOK_LINK,
            &FacebookLinkTemplate {
                url: &contact.facebook_url,
            },
        )?,
    ]))
}
