// File: crates/songplot-core/src/record.rs
// Summary: Song record and its optional attribute groups, as stored in the dataset JSON.
// Notes:
// - Every group is optional; absence is a normal state and is handled by
//   narrowing (see `charts::ChartSpec::project`), never by the extractors.
// - Unknown fields in the JSON are ignored.

use serde::Deserialize;

/// Billboard rank sentinel for songs that never charted.
pub const UNRANKED: i32 = -1;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Song {
    pub title: String,
    #[serde(default)]
    pub yendor: Option<Timing>,
    #[serde(default)]
    pub chadwambles: Option<AudioFeatures>,
    #[serde(default)]
    pub isophonics: Option<Isophonics>,
    #[serde(default)]
    pub pannell: Option<Pannell>,
}

/// Release timing and chart position.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Timing {
    pub year: i32,
    /// Seconds.
    pub duration: f64,
    #[serde(rename = "top.50.billboard", default = "unranked")]
    pub billboard: i32,
    #[serde(default)]
    pub songwriter: Option<String>,
}

fn unranked() -> i32 { UNRANKED }

impl Timing {
    pub fn is_ranked(&self) -> bool {
        self.billboard != UNRANKED
    }
}

/// Spotify-style audio features, each in `[0, 1]`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct AudioFeatures {
    pub acousticness: f64,
    pub danceability: f64,
    pub energy: f64,
    pub liveness: f64,
    pub speechiness: f64,
    pub valence: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feature {
    Acousticness,
    Danceability,
    Energy,
    Liveness,
    Speechiness,
    Valence,
}

impl AudioFeatures {
    pub fn get(&self, f: Feature) -> f64 {
        match f {
            Feature::Acousticness => self.acousticness,
            Feature::Danceability => self.danceability,
            Feature::Energy => self.energy,
            Feature::Liveness => self.liveness,
            Feature::Speechiness => self.speechiness,
            Feature::Valence => self.valence,
        }
    }
}

/// Chord, key and segment annotations.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Isophonics {
    #[serde(default)]
    pub chordlab: Option<Vec<ChordSpan>>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ChordSpan {
    pub chord: String,
}

impl Isophonics {
    /// Number of distinct chord symbols, ignoring the `N` (no chord) marker.
    pub fn distinct_chords(&self) -> Option<usize> {
        let spans = self.chordlab.as_ref()?;
        let mut seen: Vec<&str> = spans
            .iter()
            .map(|c| c.chord.as_str())
            .filter(|c| *c != "N")
            .collect();
        seen.sort_unstable();
        seen.dedup();
        Some(seen.len())
    }
}

/// Recording-session and authorship notes.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Pannell {
    #[serde(default)]
    pub album: Option<Session>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Session {
    #[serde(rename = "Takes", default)]
    pub takes: Option<i32>,
    #[serde(rename = "Original_songs", default)]
    pub original_songs: Option<u8>,
    #[serde(rename = "Composer_share_John", default)]
    pub composer_share_john: Option<f64>,
    #[serde(rename = "Composer_share_Paul", default)]
    pub composer_share_paul: Option<f64>,
}

impl Song {
    pub fn session(&self) -> Option<&Session> {
        self.pannell.as_ref()?.album.as_ref()
    }

    /// Written by the band itself rather than a cover.
    pub fn is_original(&self) -> bool {
        self.session().and_then(|s| s.original_songs) == Some(1)
    }
}
