//! Report block rendering and splicing into a text sink.

use serde::{Deserialize, Serialize};

use super::ledger::AppliedUpgrade;
use crate::rarity::Rarity;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStyle {
    #[default]
    Plain,
    /// Header wrapped in a `<color=#RRGGBB>` tag
    RichText,
}

impl ReportStyle {
    pub fn header(&self, rarity: Rarity) -> String {
        match self {
            ReportStyle::Plain => format!("{rarity} Weapon"),
            ReportStyle::RichText => {
                format!("<color={}>{rarity} Weapon</color>", rarity.color_hex())
            }
        }
    }
}

/// Header line followed by one line per entry, in ledger order
pub fn render_block(rarity: Rarity, entries: &[AppliedUpgrade], style: ReportStyle) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(style.header(rarity));
    lines.extend(entries.iter().map(|e| e.note.clone()));
    lines.join("\n")
}

/// Single informational line used when nothing could be rolled
pub fn render_empty(rarity: Rarity, style: ReportStyle) -> String {
    format!("{} - no applicable upgrades", style.header(rarity))
}

/// Drop the last occurrence of `previous` from `text`, then append `block`.
///
/// The removed block takes one adjacent newline with it (the one before it when
/// there is one), which is the separator this function added when it appended it.
/// Anything else in `text`, trailing newlines included, is left as written.
pub fn splice(text: &str, previous: Option<&str>, block: &str) -> String {
    let mut kept = text.to_string();
    if let Some(previous) = previous.filter(|p| !p.is_empty()) {
        if let Some(at) = kept.rfind(previous) {
            let mut start = at;
            let mut end = at + previous.len();
            if kept[..start].ends_with('\n') {
                start -= 1;
            } else if kept[end..].starts_with('\n') {
                end += 1;
            }
            kept.replace_range(start..end, "");
        }
    }

    if block.is_empty() {
        kept
    } else if kept.is_empty() {
        block.to_string()
    } else {
        format!("{kept}\n{block}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splice_into_empty() {
        assert_eq!(splice("", None, "Rare Weapon\n+3 Damage"), "Rare Weapon\n+3 Damage");
    }

    #[test]
    fn test_splice_replaces_previous_block() {
        let first = "Common Weapon\n+1 Damage";
        let text = format!("Rusty Knife\n{first}");
        let second = "Rare Weapon\n+4 Damage";
        assert_eq!(splice(&text, Some(first), second), "Rusty Knife\nRare Weapon\n+4 Damage");
    }

    #[test]
    fn test_splice_removes_last_occurrence_only() {
        let block = "Common Weapon";
        let text = "Common Weapon\nflavor\nCommon Weapon";
        assert_eq!(
            splice(text, Some(block), "Uncommon Weapon"),
            "Common Weapon\nflavor\nUncommon Weapon"
        );
    }

    #[test]
    fn test_splice_block_in_the_middle() {
        assert_eq!(splice("a\nOLD\nb", Some("OLD"), "NEW"), "a\nb\nNEW");
        assert_eq!(splice("OLD\nb", Some("OLD"), "NEW"), "b\nNEW");
    }

    #[test]
    fn test_splice_keeps_trailing_newlines() {
        let appended = splice("Rusty Knife\n", None, "Rare Weapon");
        assert_eq!(appended, "Rusty Knife\n\nRare Weapon");
        let cleared = splice(&appended, Some("Rare Weapon"), "");
        assert_eq!(cleared, "Rusty Knife\n");
        assert_eq!(splice("notes\n\n", Some("gone"), ""), "notes\n\n");
    }

    #[test]
    fn test_splice_missing_previous_appends() {
        assert_eq!(splice("edited", Some("gone"), "new"), "edited\nnew");
    }

    #[test]
    fn test_rich_header_carries_color() {
        let header = ReportStyle::RichText.header(Rarity::Legendary);
        assert!(header.starts_with(&format!("<color={}>", Rarity::Legendary.color_hex())));
        assert!(header.ends_with("</color>"));
        assert_eq!(ReportStyle::Plain.header(Rarity::Common), "Common Weapon");
    }
}
