//! Experience timeline content and expand/collapse state.

use crate::config::TimelineConfig;
use crate::content::bullets::normalize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One work-experience record.
///
/// Bullets are normalized on construction and on deserialization, so a
/// loaded entry never carries raw bullet text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawExperienceEntry")]
pub struct ExperienceEntry {
    pub role: String,
    pub company: String,
    pub period: String,
    bullets: Vec<String>,
}

#[derive(Deserialize)]
struct RawExperienceEntry {
    role: String,
    company: String,
    period: String,
    #[serde(default)]
    bullets: Vec<String>,
}

impl From<RawExperienceEntry> for ExperienceEntry {
    fn from(raw: RawExperienceEntry) -> Self {
        Self::new(raw.role, raw.company, raw.period, raw.bullets)
    }
}

impl ExperienceEntry {
    pub fn new<I, S>(
        role: impl Into<String>,
        company: impl Into<String>,
        period: impl Into<String>,
        bullets: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            role: role.into(),
            company: company.into(),
            period: period.into(),
            bullets: normalize(bullets),
        }
    }

    pub fn bullets(&self) -> &[String] {
        &self.bullets
    }
}

/// Experience list with per-entry expand/collapse state.
///
/// Collapsed entries show at most `max_bullets` bullets (never fewer than
/// one).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceTimeline {
    entries: Vec<ExperienceEntry>,
    max_bullets: usize,
    expanded: BTreeSet<usize>,
}

impl ExperienceTimeline {
    /// `max_bullets` of 0 is raised to 1.
    pub fn new(entries: Vec<ExperienceEntry>, max_bullets: usize) -> Self {
        Self {
            entries,
            max_bullets: max_bullets.max(1),
            expanded: BTreeSet::new(),
        }
    }

    /// Timeline capped by the configured `max_bullets`.
    pub fn from_config(entries: Vec<ExperienceEntry>, config: &TimelineConfig) -> Self {
        Self::new(entries, config.max_bullets)
    }

    pub fn max_bullets(&self) -> usize {
        self.max_bullets
    }

    pub fn entries(&self) -> &[ExperienceEntry] {
        &self.entries
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }

    /// Flips one entry; returns the new expanded state.
    ///
    /// Unknown indices are ignored and report `false`.
    pub fn toggle(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        if !self.expanded.remove(&index) {
            self.expanded.insert(index);
            return true;
        }
        false
    }

    /// Bullets currently on screen for one entry (empty for unknown index).
    pub fn visible_bullets(&self, index: usize) -> &[String] {
        let Some(entry) = self.entries.get(index) else {
            return &[];
        };
        if self.is_expanded(index) {
            return entry.bullets();
        }
        let shown = entry.bullets().len().min(self.max_bullets);
        &entry.bullets()[..shown]
    }

    /// Bullets hidden behind the "show more" toggle.
    pub fn hidden_count(&self, index: usize) -> usize {
        self.entries
            .get(index)
            .map(|entry| entry.bullets().len() - self.visible_bullets(index).len())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::{ExperienceEntry, ExperienceTimeline};
    use crate::config::{NavConfig, TimelineConfig};

    fn entry(bullet_count: usize) -> ExperienceEntry {
        ExperienceEntry::new(
            "Data Engineer",
            "Acme",
            "2014 - 2016",
            (0..bullet_count).map(|index| format!("Bullet {index}")),
        )
    }

    #[test]
    fn construction_normalizes_bullets() {
        let entry = ExperienceEntry::new(
            "Role",
            "Co",
            "now",
            ["Built  pipelines.Built pipelines.", "Built pipelines.", " Cut cost "],
        );
        assert_eq!(entry.bullets(), ["Built pipelines.", "Cut cost"]);
    }

    #[test]
    fn deserialization_normalizes_bullets() {
        let entry: ExperienceEntry = serde_json::from_str(
            r#"{"role":"R","company":"C","period":"P","bullets":["x  y","x y","zz"]}"#,
        )
        .expect("entry should parse");
        assert_eq!(entry.bullets(), ["x y", "z"]);
    }

    #[test]
    fn collapsed_entry_caps_visible_bullets() {
        let mut timeline = ExperienceTimeline::new(vec![entry(12), entry(3)], 8);
        assert_eq!(timeline.visible_bullets(0).len(), 8);
        assert_eq!(timeline.hidden_count(0), 4);
        assert_eq!(timeline.visible_bullets(1).len(), 3);
        assert_eq!(timeline.hidden_count(1), 0);

        assert!(timeline.toggle(0));
        assert!(timeline.is_expanded(0));
        assert_eq!(timeline.visible_bullets(0).len(), 12);
        assert_eq!(timeline.hidden_count(0), 0);

        assert!(!timeline.toggle(0));
        assert_eq!(timeline.visible_bullets(0).len(), 8);
    }

    #[test]
    fn loaded_config_caps_visible_bullets() {
        let config = NavConfig::from_json_str(r#"{"timeline": {"max_bullets": 3}}"#)
            .expect("timeline override should parse");
        let timeline = ExperienceTimeline::from_config(vec![entry(5)], &config.timeline);
        assert_eq!(timeline.max_bullets(), 3);
        assert_eq!(timeline.visible_bullets(0).len(), 3);
        assert_eq!(timeline.hidden_count(0), 2);
    }

    #[test]
    fn zero_cap_still_shows_one_bullet() {
        let timeline = ExperienceTimeline::from_config(
            vec![entry(2)],
            &TimelineConfig {
                max_bullets: 0,
                ..TimelineConfig::default()
            },
        );
        assert_eq!(timeline.visible_bullets(0), ["Bullet 0"]);
    }

    #[test]
    fn unknown_index_is_ignored() {
        let mut timeline = ExperienceTimeline::new(vec![entry(2)], 8);
        assert!(!timeline.toggle(5));
        assert!(!timeline.is_expanded(5));
        assert!(timeline.visible_bullets(5).is_empty());
        assert_eq!(timeline.hidden_count(5), 0);
    }
}
