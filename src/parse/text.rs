use regex::Regex;
use std::sync::OnceLock;

fn script_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<script.*?</script>").expect("regex should be valid"))
}

fn style_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<style.*?</style>").expect("regex should be valid"))
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("regex should be valid"))
}

fn nbsp_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)&nbsp;").expect("regex should be valid"))
}

fn amp_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)&amp;").expect("regex should be valid"))
}

/// Reduces an HTML document to its visible text, one entry per line.
///
/// Every tag becomes a line break, so table cells and list entries end up on
/// separate lines. Only `&nbsp;` and `&amp;` are decoded. Lines of two
/// characters or less are dropped along with blank ones.
pub fn extract_text_lines(html: &str) -> Vec<String> {
    let text = script_re().replace_all(html, " ");
    let text = style_re().replace_all(&text, " ");
    let text = tag_re().replace_all(&text, "\n");
    let text = nbsp_re().replace_all(&text, " ");
    let text = amp_re().replace_all(&text, "&");
    let text = text.replace('\r', "\n").replace('\t', " ");

    text.split('\n')
        .map(str::trim)
        .filter(|line| line.chars().count() > 2)
        .map(str::to_string)
        .collect()
}
