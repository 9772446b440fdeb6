//! Line-oriented `.aff` parser.

use regex::Regex;

use crate::affix::rules::{AffixEntry, AffixKind, AffixRule, Strip};
use crate::affix::{AffixData, FlagMode};

/// Split on LF, tolerating CRLF.
pub(crate) fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line))
}

pub(crate) fn parse_into(data: &mut AffixData, text: &str) {
    let lines: Vec<&str> = split_lines(text).collect();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        i += 1;

        let trimmed = line.trim_start();
        // Only a leading '#' marks a comment; COMPOUNDRULE patterns may
        // legitimately contain '#' further in.
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let Some(directive) = tokens.next() else {
            continue;
        };

        match directive {
            "PFX" | "SFX" => {
                let kind = if directive == "PFX" {
                    AffixKind::Prefix
                } else {
                    AffixKind::Suffix
                };
                let code = tokens.next().unwrap_or("").to_string();
                let combineable = tokens.next() == Some("Y");
                let count: usize = tokens.next().and_then(|t| t.parse().ok()).unwrap_or(0);

                let mut entries = Vec::with_capacity(count);
                for _ in 0..count {
                    let Some(&entry_line) = lines.get(i) else {
                        break;
                    };
                    i += 1;
                    entries.push(parse_entry(entry_line, kind, data.flag_mode));
                }
                data.rules
                    .insert(code, AffixRule::new(kind, combineable, entries));
            }
            "COMPOUNDRULE" => {
                let count: usize = tokens.next().and_then(|t| t.parse().ok()).unwrap_or(0);
                for _ in 0..count {
                    let Some(&rule_line) = lines.get(i) else {
                        break;
                    };
                    i += 1;
                    if let Some(source) = rule_line.split_whitespace().nth(1) {
                        data.compound_sources.push(source.to_string());
                    }
                }
            }
            "REP" => {
                // The "REP N" header has two tokens and falls through;
                // each well-formed "REP from to" line contributes a pair.
                let parts: Vec<&str> = line.split_whitespace().collect();
                if parts.len() == 3 {
                    data.replacements
                        .push((parts[1].to_string(), parts[2].to_string()));
                }
            }
            _ => {
                if let Some(value) = tokens.next() {
                    if directive == "FLAG" {
                        data.flag_mode = FlagMode::from_value(value);
                    }
                    data.directives
                        .insert(directive.to_string(), value.to_string());
                }
            }
        }
    }
}

fn parse_entry(line: &str, kind: AffixKind, flag_mode: FlagMode) -> AffixEntry {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let remove = tokens.get(2).copied().unwrap_or("");
    let add_field = tokens.get(3).copied().unwrap_or("");
    let condition = tokens.get(4).copied().unwrap_or("");

    let (add_raw, continuation) = match add_field.split_once('/') {
        Some((add, classes)) => (add, flag_mode.parse(classes)),
        None => (add_field, Vec::new()),
    };
    let add = if add_raw == "0" {
        String::new()
    } else {
        add_raw.to_string()
    };

    let matcher = if condition.is_empty() || condition == "." {
        None
    } else {
        let anchored = match kind {
            AffixKind::Suffix => format!("{condition}$"),
            AffixKind::Prefix => format!("^{condition}"),
        };
        // A condition the regex engine rejects degrades to match-anything.
        Regex::new(&anchored).ok()
    };

    let strip = if remove.is_empty() || remove == "0" {
        Strip::None
    } else {
        match kind {
            AffixKind::Prefix => Strip::Literal(remove.to_string()),
            AffixKind::Suffix => Regex::new(&format!("{remove}$"))
                .map(Strip::Pattern)
                .unwrap_or(Strip::None),
        }
    };

    AffixEntry {
        matcher,
        strip,
        add,
        continuation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affix::AffixData;

    const SAMPLE: &str = "\
# comment line
SET UTF-8
KEEPCASE k
COMPOUNDMIN 4

PFX A Y 1
PFX A 0 re .

SFX S Y 2
SFX S 0 s [^sxy]
SFX S y ies y

SFX L N 1
SFX L 0 ly/B .

SFX B Y 1
SFX B 0 ness .

REP 2
REP f ph
REP shun tion

COMPOUNDRULE 1
COMPOUNDRULE xy*z
";

    #[test]
    fn directives_are_recorded_openly() {
        let data = AffixData::parse(SAMPLE);
        assert_eq!(data.directive("SET"), Some("UTF-8"));
        assert_eq!(data.directive("KEEPCASE"), Some("k"));
        assert_eq!(data.directive("COMPOUNDMIN"), Some("4"));
        assert_eq!(data.directive("NEEDAFFIX"), None);
        // Block headers do not leak into the directive map.
        assert_eq!(data.directive("PFX"), None);
        assert_eq!(data.directive("REP"), None);
    }

    #[test]
    fn affix_blocks_consume_their_entry_lines() {
        let data = AffixData::parse(SAMPLE);

        let prefix = data.rule("A").unwrap();
        assert_eq!(prefix.kind(), AffixKind::Prefix);
        assert!(prefix.combineable());
        assert_eq!(prefix.entries().len(), 1);

        let suffix = data.rule("S").unwrap();
        assert_eq!(suffix.kind(), AffixKind::Suffix);
        assert_eq!(suffix.entries().len(), 2);

        let adverb = data.rule("L").unwrap();
        assert!(!adverb.combineable());
        assert_eq!(adverb.entries()[0].add(), "ly");
        assert_eq!(adverb.entries()[0].continuation(), ["B"]);
    }

    #[test]
    fn replacement_table_keeps_file_order() {
        let data = AffixData::parse(SAMPLE);
        assert_eq!(
            data.replacements(),
            [
                ("f".to_string(), "ph".to_string()),
                ("shun".to_string(), "tion".to_string())
            ]
        );
    }

    #[test]
    fn compound_sources_take_second_token() {
        let data = AffixData::parse(SAMPLE);
        assert_eq!(data.compound_sources(), ["xy*z"]);
    }

    #[test]
    fn rules_apply_through_parsed_entries() {
        let data = AffixData::parse(SAMPLE);
        let suffix = data.rule("S").unwrap();
        assert_eq!(suffix.apply("cat", data.rules()), ["cats"]);
        assert_eq!(suffix.apply("pony", data.rules()), ["ponies"]);
        // Condition [^sxy] rejects a word ending in 's'.
        assert!(suffix.apply("pass", data.rules()).is_empty());

        let adverb = data.rule("L").unwrap();
        assert_eq!(
            adverb.apply("kind", data.rules()),
            ["kindly", "kindlyness"]
        );
    }

    #[test]
    fn malformed_lines_are_tolerated() {
        let data = AffixData::parse("PFX\nSFX X\nKEEPCASE\nREP 1\nREP onlyone\n");
        // Headers with missing fields still register an (empty) rule.
        assert!(data.rule("").is_some());
        assert!(data.rule("X").is_some());
        // A directive with no value is dropped, not stored as empty.
        assert_eq!(data.directive("KEEPCASE"), None);
        assert!(data.replacements().is_empty());
    }

    #[test]
    fn flag_directive_switches_continuation_parsing() {
        let text = "\
FLAG long
SFX Aa Y 1
SFX Aa 0 ing/BbCc .
";
        let data = AffixData::parse(text);
        let rule = data.rule("Aa").unwrap();
        assert_eq!(rule.entries()[0].continuation(), ["Bb", "Cc"]);
    }

    #[test]
    fn crlf_input_parses_identically() {
        let unix = AffixData::parse("KEEPCASE k\nCOMPOUNDMIN 3\n");
        let dos = AffixData::parse("KEEPCASE k\r\nCOMPOUNDMIN 3\r\n");
        assert_eq!(unix.directive("KEEPCASE"), dos.directive("KEEPCASE"));
        assert_eq!(unix.directive("COMPOUNDMIN"), dos.directive("COMPOUNDMIN"));
    }
}
