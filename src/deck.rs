//! Whole-deck batch: every suit, every rank, strictly in order.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::{debug, info};

use crate::config::DeckConfig;
use crate::error::{CardError, Result};
use crate::manifest::{ManifestEntry, digest_bytes};
use crate::rank::{Rank, card_file_name};
use crate::render::CardRenderer;

/// Restricts a run to one suit and/or one rank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckFilter {
    pub suit: Option<String>,
    pub rank: Option<Rank>,
}

impl DeckFilter {
    fn accepts_suit(&self, name: &str) -> bool {
        self.suit.as_deref().is_none_or(|wanted| wanted == name)
    }

    fn accepts_rank(&self, rank: Rank) -> bool {
        self.rank.is_none_or(|wanted| wanted == rank)
    }
}

/// One encoded card face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCard {
    pub suit: String,
    pub rank: Rank,
    pub file_name: String,
    pub png: Vec<u8>,
}

impl RenderedCard {
    pub fn manifest_entry(&self) -> ManifestEntry {
        ManifestEntry {
            suit: self.suit.clone(),
            rank: self.rank,
            file: self.file_name.clone(),
            sha256: digest_bytes(&self.png),
        }
    }
}

/// Render every selected card in suit order, then ascending rank, handing each to `visit`.
///
/// The first error from rendering or from `visit` stops the run. Returns the
/// number of cards visited.
pub fn for_each_card<F>(config: &DeckConfig, filter: &DeckFilter, mut visit: F) -> Result<usize>
where
    F: FnMut(RenderedCard) -> Result<()>,
{
    let renderer = CardRenderer::new(config)?;
    let mut count = 0;
    for suit in config.suits.iter().filter(|suit| filter.accepts_suit(&suit.name)) {
        let icon = renderer.load_suit_icon(suit)?;
        for rank in Rank::all().filter(|rank| filter.accepts_rank(*rank)) {
            let png = renderer.render_card(rank, suit, &icon, config.layout_for(rank))?;
            let file_name = card_file_name(&suit.name, rank);
            debug!("rendered {file_name} ({} bytes)", png.len());
            visit(RenderedCard {
                suit: suit.name.clone(),
                rank,
                file_name,
                png,
            })?;
            count += 1;
        }
    }
    Ok(count)
}

/// Render the deck into `out_dir`, creating it if needed.
///
/// Files written before a failure are left in place.
pub fn render_deck(
    config: &DeckConfig,
    out_dir: &Path,
    filter: &DeckFilter,
) -> Result<Vec<ManifestEntry>> {
    fs::create_dir_all(out_dir).map_err(|source| CardError::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;
    let mut entries = Vec::new();
    let count = for_each_card(config, filter, |card| {
        let path = out_dir.join(&card.file_name);
        fs::write(&path, &card.png).map_err(|source| CardError::Write { path, source })?;
        entries.push(card.manifest_entry());
        Ok(())
    })?;
    info!("wrote {count} card(s) to {}", out_dir.display());
    Ok(entries)
}

/// Outcome of re-rendering a deck and comparing it with files on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    /// Freshly rendered entries, in render order.
    pub rendered: Vec<ManifestEntry>,
    /// Files whose bytes differ from a fresh render.
    pub mismatched: Vec<String>,
    /// Files a fresh render would produce that are not on disk.
    pub missing: Vec<String>,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.mismatched.is_empty() && self.missing.is_empty()
    }
}

/// Re-render in memory and compare against the PNGs already in `out_dir`.
pub fn verify_output(config: &DeckConfig, out_dir: &Path) -> Result<VerifyReport> {
    let mut report = VerifyReport::default();
    for_each_card(config, &DeckFilter::default(), |card| {
        let path = out_dir.join(&card.file_name);
        match fs::read(&path) {
            Ok(bytes) if bytes == card.png => {}
            Ok(_) => report.mismatched.push(card.file_name.clone()),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                report.missing.push(card.file_name.clone())
            }
            Err(source) => return Err(CardError::Read { path, source }),
        }
        report.rendered.push(card.manifest_entry());
        Ok(())
    })?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DECK: &str = r##"{
        "card": { "cell": 8 },
        "suits": [
            { "name": "spades", "color": "#000000", "icon": { "glyph": "♠" } },
            { "name": "hearts", "color": "#cc0000", "icon": { "glyph": "♥" } }
        ],
        "ranks": [ { "rank": 2, "pips": [ { "position": "MID_CENTER" } ] } ]
    }"##;

    fn config() -> DeckConfig {
        DeckConfig::from_json_str(DECK, ".").unwrap()
    }

    #[test]
    fn visits_suits_then_ascending_ranks() {
        let mut order = Vec::new();
        let count = for_each_card(&config(), &DeckFilter::default(), |card| {
            order.push(card.file_name);
            Ok(())
        })
        .unwrap();
        assert_eq!(count, 26);
        assert_eq!(order.first().map(String::as_str), Some("spades_02.png"));
        assert_eq!(order[12], "spades_14.png");
        assert_eq!(order[13], "hearts_02.png");
        assert_eq!(order.last().map(String::as_str), Some("hearts_14.png"));
    }

    #[test]
    fn filter_narrows_to_single_card() {
        let filter = DeckFilter {
            suit: Some("hearts".to_string()),
            rank: Some(Rank::new(12).unwrap()),
        };
        let mut names = Vec::new();
        for_each_card(&config(), &filter, |card| {
            names.push(card.file_name);
            Ok(())
        })
        .unwrap();
        assert_eq!(names, vec!["hearts_12.png".to_string()]);
    }

    #[test]
    fn visitor_error_stops_the_run() {
        let mut seen = 0;
        let result = for_each_card(&config(), &DeckFilter::default(), |card| {
            seen += 1;
            if card.rank.value() == 4 {
                return Err(CardError::InvalidRank(4));
            }
            Ok(())
        });
        assert!(matches!(result, Err(CardError::InvalidRank(4))));
        assert_eq!(seen, 3);
    }

    #[test]
    fn manifest_entry_digests_png_bytes() {
        let card = RenderedCard {
            suit: "spades".to_string(),
            rank: Rank::new(2).unwrap(),
            file_name: "spades_02.png".to_string(),
            png: b"abc".to_vec(),
        };
        let entry = card.manifest_entry();
        assert_eq!(entry.file, "spades_02.png");
        assert_eq!(entry.sha256, digest_bytes(b"abc"));
    }
}
