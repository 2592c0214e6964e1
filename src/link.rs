//! Shareable link codec.
//!
//! The link is the only persisted state: `origin/?from=..&to=..[&msg=..]`.
//! Encoding follows `encodeURIComponent` closely enough for the round trip
//! (spaces become `%20`, never `+`); decoding is forgiving and never fails.

use std::borrow::Cow;

pub const DEFAULT_FROM: &str = "You";
pub const DEFAULT_TO: &str = "Your Valentine";

const KEY_FROM: &str = "from";
const KEY_TO: &str = "to";
const KEY_MSG: &str = "msg";

/// Names and message carried by a link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invitation {
    pub from: String,
    pub to: String,
    pub message: String,
}

impl Invitation {
    /// Trim the raw fields and apply the name defaults.
    pub fn from_fields(from: &str, to: &str, message: &str) -> Self {
        Self {
            from: or_default(from.trim(), DEFAULT_FROM),
            to: or_default(to.trim(), DEFAULT_TO),
            message: message.trim().to_string(),
        }
    }
}

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

/// Build the absolute share link for the given page origin.
pub fn encode(origin: &str, from: &str, to: &str, message: &str) -> String {
    let inv = Invitation::from_fields(from, to, message);
    let mut link = format!(
        "{}/?{KEY_FROM}={}&{KEY_TO}={}",
        origin.trim_end_matches('/'),
        urlencoding::encode(&inv.from),
        urlencoding::encode(&inv.to),
    );
    if !inv.message.is_empty() {
        link.push_str(&format!("&{KEY_MSG}={}", urlencoding::encode(&inv.message)));
    }
    link
}

/// Read an invitation out of a query string (with or without the leading `?`).
///
/// Returns `None` when neither `from` nor `to` carries a value; an empty
/// `from=` counts as absent, matching what the card treats as "no link".
pub fn decode(query: &str) -> Option<Invitation> {
    let from = param(query, KEY_FROM).filter(|v| !v.is_empty());
    let to = param(query, KEY_TO).filter(|v| !v.is_empty());
    if from.is_none() && to.is_none() {
        return None;
    }
    Some(Invitation {
        from: from.unwrap_or_else(|| DEFAULT_FROM.to_string()),
        to: to.unwrap_or_else(|| DEFAULT_TO.to_string()),
        message: param(query, KEY_MSG).unwrap_or_default(),
    })
}

/// Decode an invitation out of a full URL; anything after `#` is ignored.
pub fn decode_url(url: &str) -> Option<Invitation> {
    let without_fragment = url.split('#').next().unwrap_or_default();
    let (_, query) = without_fragment.split_once('?')?;
    decode(query)
}

/// First value for `key`, form-decoded.
fn param(query: &str, key: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (form_decode(k) == key).then(|| form_decode(v).into_owned())
        })
}

fn form_decode(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['+', '%']) {
        return Cow::Borrowed(raw);
    }
    let spaced = raw.replace('+', " ");
    let bytes = urlencoding::decode_binary(spaced.as_bytes());
    Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
}
