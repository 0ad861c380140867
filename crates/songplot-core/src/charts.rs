// File: crates/songplot-core/src/charts.rs
// Summary: Declared chart specs and the narrowing projection from a song to a plotted datum.

use chrono::NaiveDate;

use crate::axis::{Domain, TickFormat};
use crate::record::{Feature, Song};

/// First and last day of the fixed calendar x domain.
pub const X_START: (i32, u32, u32) = (1957, 1, 1);
pub const X_END: (i32, u32, u32) = (1970, 12, 31);

pub fn calendar_domain() -> (NaiveDate, NaiveDate) {
    let d = |(y, m, day): (i32, u32, u32)| NaiveDate::from_ymd_opt(y, m, day).unwrap_or_default();
    (d(X_START), d(X_END))
}

/// One chart per plotted attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChartId {
    Duration,
    Billboard,
    Feature(Feature),
    Takes,
    Chords,
    LennonShare,
}

impl ChartId {
    /// File-name friendly identifier.
    pub fn slug(&self) -> &'static str {
        match self {
            ChartId::Duration => "duration",
            ChartId::Billboard => "billboard",
            ChartId::Feature(Feature::Acousticness) => "acousticness",
            ChartId::Feature(Feature::Danceability) => "danceability",
            ChartId::Feature(Feature::Energy) => "energy",
            ChartId::Feature(Feature::Liveness) => "liveness",
            ChartId::Feature(Feature::Speechiness) => "speechiness",
            ChartId::Feature(Feature::Valence) => "valence",
            ChartId::Takes => "takes",
            ChartId::Chords => "chords",
            ChartId::LennonShare => "lennon-share",
        }
    }
}

/// A song that passed a chart's eligibility check, reduced to what the chart plots.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Datum<'a> {
    pub key: &'a str,
    pub year: i32,
    pub value: f64,
}

impl Datum<'_> {
    /// January 1st of the release year.
    pub fn date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, 1, 1).unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartSpec {
    pub id: ChartId,
    pub title: &'static str,
    pub y_domain: Domain,
    pub tick_format: TickFormat,
}

impl ChartSpec {
    pub const fn new(id: ChartId, title: &'static str, y_domain: Domain, tick_format: TickFormat) -> Self {
        Self { id, title, y_domain, tick_format }
    }

    /// Eligibility and extraction in one step: `None` when the song lacks the
    /// groups this chart reads, otherwise the plotted values.
    pub fn project<'a>(&self, song: &'a Song) -> Option<Datum<'a>> {
        let timing = song.yendor.as_ref()?;
        let value = match self.id {
            ChartId::Duration => timing.duration,
            ChartId::Billboard => {
                if !timing.is_ranked() {
                    return None;
                }
                timing.billboard as f64
            }
            ChartId::Feature(f) => song.chadwambles.as_ref()?.get(f),
            ChartId::Takes => song.session()?.takes? as f64,
            ChartId::Chords => song.isophonics.as_ref()?.distinct_chords()? as f64,
            ChartId::LennonShare => song.session()?.composer_share_john?,
        };
        Some(Datum { key: &song.title, year: timing.year, value })
    }

    pub fn eligible<'a>(&self, songs: impl IntoIterator<Item = &'a Song>) -> Vec<Datum<'a>> {
        songs.into_iter().filter_map(|s| self.project(s)).collect()
    }
}

/// The charts, in the order they are laid out and refreshed.
pub fn declared() -> Vec<ChartSpec> {
    let unit = Domain::Fixed { min: 0.0, max: 1.0 };
    let feature = |f: Feature, title: &'static str| ChartSpec::new(ChartId::Feature(f), title, unit, TickFormat::Percent);
    vec![
        ChartSpec::new(ChartId::Duration, "Duration (Minutes)", Domain::Fixed { min: 0.0, max: 600.0 }, TickFormat::MinutesSeconds),
        ChartSpec::new(ChartId::Billboard, "Top 50 Billboard", Domain::Fixed { min: 0.0, max: 60.0 }, TickFormat::Integer),
        feature(Feature::Acousticness, "Acousticness"),
        feature(Feature::Danceability, "Danceability"),
        feature(Feature::Energy, "Energy"),
        feature(Feature::Liveness, "Liveness"),
        feature(Feature::Speechiness, "Speechiness"),
        feature(Feature::Valence, "Valence"),
        ChartSpec::new(ChartId::Takes, "Recording Takes", Domain::Fitted, TickFormat::Integer),
        ChartSpec::new(ChartId::Chords, "Distinct Chords", Domain::Fitted, TickFormat::Integer),
        ChartSpec::new(ChartId::LennonShare, "Lennon Composer Share", unit, TickFormat::Percent),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{AudioFeatures, Timing};

    fn timed(title: &str, year: i32, billboard: i32) -> Song {
        Song {
            title: title.into(),
            yendor: Some(Timing { year, duration: 150.0, billboard, songwriter: None }),
            ..Song::default()
        }
    }

    #[test]
    fn songs_without_timing_are_never_plotted() {
        let mut s = Song { title: "Untimed".into(), ..Song::default() };
        s.chadwambles = Some(AudioFeatures::default());
        for spec in declared() {
            assert!(spec.project(&s).is_none(), "{:?}", spec.id);
        }
    }

    #[test]
    fn unranked_songs_skip_billboard_only() {
        let s = timed("B-side", 1964, -1);
        let specs = declared();
        assert!(specs[0].project(&s).is_some());
        assert!(specs[1].project(&s).is_none());
        let ranked = timed("Hit", 1964, 3);
        assert_eq!(specs[1].project(&ranked).map(|d| d.value), Some(3.0));
    }

    #[test]
    fn feature_charts_need_audio_features() {
        let mut s = timed("Song", 1966, -1);
        let energy = ChartSpec::new(ChartId::Feature(Feature::Energy), "Energy", Domain::Fitted, TickFormat::Plain);
        assert!(energy.project(&s).is_none());
        s.chadwambles = Some(AudioFeatures { energy: 0.7, ..AudioFeatures::default() });
        let d = energy.project(&s).unwrap();
        assert_eq!((d.key, d.year, d.value), ("Song", 1966, 0.7));
        assert_eq!(d.date(), NaiveDate::from_ymd_opt(1966, 1, 1).unwrap());
    }

    #[test]
    fn declared_ids_are_unique() {
        let specs = declared();
        let mut ids: Vec<ChartId> = specs.iter().map(|s| s.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), specs.len());
    }
}
