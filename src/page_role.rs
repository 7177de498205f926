use url::Url;

/// Which agent a context runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageRole {
    /// The dictation application itself.
    Source,
    /// Any other web page; it may host the destination form.
    Destination,
    /// Browser-internal and non-web pages.
    Ignored,
}

impl PageRole {
    pub fn classify(url: &str, source_origin: &str) -> PageRole {
        let Ok(url) = Url::parse(url) else {
            return PageRole::Ignored;
        };
        if !matches!(url.scheme(), "http" | "https") {
            return PageRole::Ignored;
        }
        match Url::parse(source_origin) {
            Ok(source) if source.origin() == url.origin() => PageRole::Source,
            _ => PageRole::Destination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://scribe.example.org";

    #[test]
    fn classifies_by_origin_and_scheme() {
        assert_eq!(
            PageRole::classify("https://scribe.example.org/session/42", ORIGIN),
            PageRole::Source
        );
        assert_eq!(
            PageRole::classify("https://emr.example.org/intake", ORIGIN),
            PageRole::Destination
        );
        // same host, different scheme is a different origin
        assert_eq!(
            PageRole::classify("http://scribe.example.org/", ORIGIN),
            PageRole::Destination
        );
        assert_eq!(PageRole::classify("chrome://newtab", ORIGIN), PageRole::Ignored);
        assert_eq!(PageRole::classify("garbage", ORIGIN), PageRole::Ignored);
    }

    #[test]
    fn unparsable_origin_makes_everything_a_destination() {
        assert_eq!(
            PageRole::classify("https://scribe.example.org/", "not an origin"),
            PageRole::Destination
        );
    }
}
