//! Token grammar for portal paths.
//!
//! ```text
//! / <layoutSegment>* / [<urlStateToken>/] [<panelToken>.<contentId>/] <action|render>[.uP]
//! ```
//!
//! Pure string-level rules shared by the decoder and the encoder, so that
//! whatever one produces the other recognizes.

use crate::url::state::UrlState;

/// Final segment of a state-mutating request.
pub const ACTION_MARKER: &str = "action";
/// Final segment of a read-only request.
pub const RENDER_MARKER: &str = "render";
/// Canonical extension carried by the marker segment.
pub const MARKER_SUFFIX: &str = ".uP";

/// Prefix of portal-level control parameters.
pub const PORTAL_PARAM_PREFIX: &str = "pltc_";
/// Prefix of panel-level application parameters.
pub const PORTLET_PARAM_PREFIX: &str = "pltp_";
/// Control parameter naming the targeted panel token.
pub const TARGET_PARAM: &str = "target";
/// Control parameter carrying a non-view portlet mode.
pub const MODE_PARAM: &str = "mode";

const SEGMENT_SEPARATOR: char = '/';
const PANEL_SEPARATOR: char = '.';

/// Path token for a url state.
pub fn state_token(state: UrlState) -> &'static str {
    match state {
        UrlState::Normal => "normal",
        UrlState::Maximized => "max",
        UrlState::Exclusive => "exclusive",
    }
}

/// Recognize a url-state segment (case-insensitive).
pub fn parse_state(segment: &str) -> Option<UrlState> {
    [UrlState::Normal, UrlState::Maximized, UrlState::Exclusive]
        .into_iter()
        .find(|state| segment.eq_ignore_ascii_case(state_token(*state)))
}

/// Recognize the trailing marker. Returns `Some(true)` for an action,
/// `Some(false)` for a render.
pub fn parse_marker(segment: &str) -> Option<bool> {
    let bare = segment.strip_suffix(MARKER_SUFFIX).unwrap_or(segment);
    match bare {
        ACTION_MARKER => Some(true),
        RENDER_MARKER => Some(false),
        _ => None,
    }
}

/// Canonical marker segment, including the `.uP` extension.
pub fn marker_segment(is_action: bool) -> String {
    let marker = if is_action { ACTION_MARKER } else { RENDER_MARKER };
    format!("{marker}{MARKER_SUFFIX}")
}

/// A `<panelToken>.<contentId>` segment split into its halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSegment<'a> {
    pub token: &'a str,
    pub content_id: &'a str,
}

impl<'a> PanelSegment<'a> {
    /// Split a segment with exactly one `.` and non-empty halves.
    pub fn parse(segment: &'a str) -> Option<Self> {
        let (token, content_id) = segment.split_once(PANEL_SEPARATOR)?;
        if token.is_empty() || content_id.is_empty() || content_id.contains(PANEL_SEPARATOR) {
            return None;
        }
        Some(Self { token, content_id })
    }

    pub fn format(token: &str, content_id: &str) -> String {
        format!("{token}{PANEL_SEPARATOR}{content_id}")
    }
}

/// Split a path into its non-empty segments.
pub fn split_segments(path: &str) -> Vec<&str> {
    path.split(SEGMENT_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Join a context prefix and path segments without doubling the separator.
/// Everything outside the unreserved set is percent-escaped per segment, so
/// `.` survives; the prefix is taken as is.
pub fn join_path(context_prefix: &str, segments: &[String]) -> String {
    let mut path = String::from(context_prefix);
    if !path.ends_with(SEGMENT_SEPARATOR) {
        path.push(SEGMENT_SEPARATOR);
    }
    let escaped: Vec<_> = segments
        .iter()
        .map(|segment| urlencoding::encode(segment))
        .collect();
    path.push_str(&escaped.join("/"));
    path
}

/// Undo the escaping applied by [`join_path`]. `None` when the escaped bytes
/// are not UTF-8.
pub fn unescape_segment(segment: &str) -> Option<String> {
    urlencoding::decode(segment).ok().map(|decoded| decoded.into_owned())
}

/// Multi-valued parameters that keep insertion order, both across keys and
/// within the values of one key.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ParameterMap {
    entries: Vec<(String, Vec<String>)>,
}

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one value, keeping the key's original position if already present.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
    }

    /// Iterate every `(key, value)` pair, repeating keys with several values.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|(k, values)| {
            values.iter().map(move |value| (k.as_str(), value.as_str()))
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ParameterMap::new();
        for (key, value) in iter {
            map.append(key, value);
        }
        map
    }
}
