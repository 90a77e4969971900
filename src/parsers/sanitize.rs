use regex::Regex;
use std::sync::LazyLock;

static SORT_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"data-sort-value="\d+"\s*"#).expect("valid regex"));

static TABLE_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<table(?:\s[^>]*)?>").expect("valid regex"));

/// Whitespace between a closing tag and the next opening tag of the same kind
static BOUNDARY_GAP_RES: LazyLock<[(Regex, &'static str); 3]> = LazyLock::new(|| {
    [
        (
            Regex::new(r"</tr>\s+<tr([\s>])").expect("valid regex"),
            "</tr><tr$1",
        ),
        (
            Regex::new(r"</td>\s+<td([\s>])").expect("valid regex"),
            "</td><td$1",
        ),
        (
            Regex::new(r"</th>\s+<th([\s>])").expect("valid regex"),
            "</th><th$1",
        ),
    ]
});

const EMPTY_TABLE: &str = "<table></table>";

/// Strip presentation-only markup before conversion.
///
/// Removes `data-sort-value` hints, drops attributes from `<table>` tags,
/// removes whitespace between adjacent rows or cells and deletes empty
/// `<table></table>` pairs.
pub fn sanitize(html: &str) -> String {
    let html = strip_sort_values(html);
    normalize_tables(&html)
}

/// Remove `data-sort-value="<digits>"` attributes and the whitespace after them
pub fn strip_sort_values(html: &str) -> String {
    SORT_VALUE_RE.replace_all(html, "").into_owned()
}

/// Normalize table markup so the converter does not emit blank lines inside tables
pub fn normalize_tables(html: &str) -> String {
    let mut result = TABLE_OPEN_RE.replace_all(html, "<table>").into_owned();

    for (re, replacement) in BOUNDARY_GAP_RES.iter() {
        result = re.replace_all(&result, *replacement).into_owned();
    }

    result.replace(EMPTY_TABLE, "")
}
