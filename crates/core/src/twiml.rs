//! TwiML documents that bridge a call's media to a websocket.

use std::fmt;

/// Seconds the call leg is held open after the stream has been connected.
pub const STREAM_PAUSE_SECONDS: u32 = 3600;

/// A `<Connect><Stream/></Connect>` instruction followed by a `<Pause/>`.
///
/// While the pause runs, the provider keeps the call alive and all speech
/// flows through the bridged stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamTwiml<'a> {
    stream_url: &'a str,
    pause_length: u32,
}

impl<'a> StreamTwiml<'a> {
    pub fn new(stream_url: &'a str) -> Self {
        Self {
            stream_url,
            pause_length: STREAM_PAUSE_SECONDS,
        }
    }

    pub fn pause_length(&self) -> u32 {
        self.pause_length
    }
}

impl fmt::Display for StreamTwiml<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"<?xml version="1.0" encoding="UTF-8"?>
<Response>
  <Connect>
    <Stream url="{}"></Stream>
  </Connect>
  <Pause length="{}"/>
</Response>"#,
            escape_attribute(self.stream_url),
            self.pause_length
        )
    }
}

/// Escapes the characters that cannot appear inside a double-quoted attribute.
fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "wss://call.aivoco.on.cloud.vispark.in/ws/key123/agent-9";

    #[test]
    fn test_stream_url_attribute_is_verbatim() {
        let doc = StreamTwiml::new(URL).to_string();
        assert!(doc.contains(&format!(r#"<Stream url="{}"></Stream>"#, URL)));
    }

    #[test]
    fn test_pause_follows_connect() {
        let doc = StreamTwiml::new(URL).to_string();
        let connect_end = doc.find("</Connect>").expect("connect element");
        let pause = doc.find(r#"<Pause length="3600"/>"#).expect("pause element");
        assert!(pause > connect_end);
        assert_eq!(StreamTwiml::new(URL).pause_length(), 3600);
    }

    #[test]
    fn test_full_document() {
        let doc = StreamTwiml::new("wss://h/ws/a/b").to_string();
        assert_eq!(
            doc,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <Response>\n  \
             <Connect>\n    \
             <Stream url=\"wss://h/ws/a/b\"></Stream>\n  \
             </Connect>\n  \
             <Pause length=\"3600\"/>\n\
             </Response>"
        );
    }

    #[test]
    fn test_attribute_special_characters_are_escaped() {
        let doc = StreamTwiml::new(r#"wss://h/ws/a&b/"c""#).to_string();
        assert!(doc.contains(r#"url="wss://h/ws/a&amp;b/&quot;c&quot;""#));
    }
}
