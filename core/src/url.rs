//! URL path segments and sanitization.

use serde_json::Value;

/// One path segment of a built URL.
///
/// `Many` is spread in order as additional segments, which is how
/// multi-value relationship lookups address several records at once.
/// Rendering is best-effort string coercion; the builder does not validate
/// segment contents.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Key(String),
    Id(i64),
    Many(Vec<Segment>),
}

impl Segment {
    pub fn key(value: impl Into<String>) -> Self {
        Segment::Key(value.into())
    }

    pub fn id(value: i64) -> Self {
        Segment::Id(value)
    }

    pub fn many(values: impl IntoIterator<Item = Segment>) -> Self {
        Segment::Many(values.into_iter().collect())
    }

    fn render_into(self, out: &mut Vec<String>) {
        match self {
            Segment::Key(key) => out.push(key),
            Segment::Id(id) => out.push(id.to_string()),
            Segment::Many(values) => {
                for value in values {
                    value.render_into(out);
                }
            }
        }
    }
}

impl From<&str> for Segment {
    fn from(value: &str) -> Self {
        Segment::Key(value.to_string())
    }
}

impl From<String> for Segment {
    fn from(value: String) -> Self {
        Segment::Key(value)
    }
}

impl From<i64> for Segment {
    fn from(value: i64) -> Self {
        Segment::Id(value)
    }
}

impl From<&Value> for Segment {
    fn from(value: &Value) -> Self {
        match value {
            Value::Array(items) => Segment::Many(items.iter().map(Segment::from).collect()),
            Value::String(s) => Segment::Key(s.clone()),
            Value::Number(n) if n.is_i64() => Segment::Id(n.as_i64().unwrap_or_default()),
            // Best-effort coercion for everything else.
            other => Segment::Key(other.to_string()),
        }
    }
}

/// Flatten segments into rendered path pieces, spreading `Many` in order.
pub fn render_segments(segments: impl IntoIterator<Item = Segment>) -> Vec<String> {
    let mut out = Vec::new();
    for segment in segments {
        segment.render_into(&mut out);
    }
    out
}

/// Clean up a joined URL.
///
/// Collapses runs of `/` into one unless the run follows a protocol colon
/// (`http://` survives), strips one trailing `?`, and strips one trailing
/// `/` unless `trailing_slash` asks to keep it.
pub fn sanitize_url(url: &str, trailing_slash: bool) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        if c == '/' && out.ends_with('/') {
            let mut tail = out.chars().rev().skip(1);
            if tail.next() != Some(':') {
                continue;
            }
        }
        out.push(c);
    }

    if let Some(stripped) = out.strip_suffix('?') {
        out.truncate(stripped.len());
    }

    if !trailing_slash {
        if let Some(stripped) = out.strip_suffix('/') {
            out.truncate(stripped.len());
        }
    }

    out
}
