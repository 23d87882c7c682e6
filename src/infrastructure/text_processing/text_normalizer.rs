use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static HYPHEN_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<prefix>\w)-[ \t]*\r?\n[ \t]*(?P<suffix>\w)").unwrap());

const KOREAN_SENTENCE_ENDINGS: [char; 3] = ['다', '요', '죠'];

/// Cleans raw extracted text. The steps run in a fixed order and the whole
/// transformation is idempotent.
pub fn normalize_text(raw: &str) -> String {
    let composed: String = raw.nfkc().collect();
    let unified = unify_punctuation(&composed);
    let repaired = repair_hyphenated_breaks(&unified);
    let collapsed = collapse_whitespace(&repaired);
    // Removing characters can leave composable sequences adjacent.
    merge_broken_lines(&collapsed).nfkc().collect()
}

fn unify_punctuation(text: &str) -> String {
    text.chars()
        .filter_map(|ch| match ch {
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{00AB}' | '\u{00BB}'
            | '\u{301D}' | '\u{301E}' => Some('"'),
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2039}' | '\u{203A}' => {
                Some('\'')
            }
            '\u{2010}'..='\u{2015}' | '\u{2212}' | '\u{2500}' => Some('-'),
            '\u{00A0}' => Some(' '),
            '\u{200B}' | '\u{FEFF}' => None,
            other => Some(other),
        })
        .collect()
}

/// Removes `-` plus the line break when a word is split across two lines.
fn repair_hyphenated_breaks(text: &str) -> String {
    let mut repaired = text.to_string();
    // A match consumes the first letter of the next word, so chained breaks
    // such as `a-\nb-\nc` need another pass.
    while HYPHEN_BREAK.is_match(&repaired) {
        repaired = HYPHEN_BREAK
            .replace_all(&repaired, "$prefix$suffix")
            .into_owned();
    }
    repaired
}

fn collapse_whitespace(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines: Vec<String> = Vec::new();
    let mut prev_blank = true;

    for line in unified.split('\n') {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            if !prev_blank {
                lines.push(String::new());
            }
            prev_blank = true;
        } else {
            lines.push(collapsed);
            prev_blank = false;
        }
    }

    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }

    lines.join("\n")
}

fn ends_sentence(line: &str) -> bool {
    line.chars()
        .last()
        .is_some_and(|c| matches!(c, '.' | '!' | '?' | '…') || KOREAN_SENTENCE_ENDINGS.contains(&c))
}

/// Joins a line onto the previous one unless the previous line closes a
/// sentence. Blank lines separate paragraphs and are kept.
fn merge_broken_lines(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut continues = false;

    for line in text.split('\n') {
        if line.is_empty() {
            out.push(String::new());
            continues = false;
            continue;
        }

        match out.last_mut() {
            Some(previous) if continues => {
                previous.push(' ');
                previous.push_str(line);
            }
            _ => out.push(line.to_string()),
        }
        continues = !ends_sentence(line);
    }

    out.join("\n")
}
