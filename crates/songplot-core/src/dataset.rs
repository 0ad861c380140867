// File: crates/songplot-core/src/dataset.rs
// Summary: Loads the song dataset (JSON array) once at startup; merges audio features from CSV.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use log::{debug, info, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::record::{AudioFeatures, Song};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing song JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("reading audio feature CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Immutable, ordered collection of songs. Loaded once, never mutated by rendering.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    songs: Vec<Song>,
}

impl Dataset {
    pub fn new(songs: Vec<Song>) -> Self {
        let mut seen = HashSet::with_capacity(songs.len());
        for s in &songs {
            if !seen.insert(s.title.as_str()) {
                warn!("duplicate song title {:?}; points are keyed by title", s.title);
            }
        }
        Self { songs }
    }

    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let songs: Vec<Song> = serde_json::from_str(json)?;
        Ok(Self::new(songs))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let ds = Self::from_json_str(&text)?;
        info!("loaded {} songs from {}", ds.len(), path.display());
        Ok(ds)
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Attach audio features from a CSV with header
    /// `id,year,album,song,danceability,energy,speechiness,acousticness,liveness,valence,duration_ms`,
    /// matching rows to songs by title. Rows naming an unknown song are skipped with a warning.
    /// Returns the number of songs updated.
    pub fn merge_audio_features<R: std::io::Read>(&mut self, reader: R) -> Result<usize, DatasetError> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let index: HashMap<String, usize> = self
            .songs
            .iter()
            .enumerate()
            .map(|(i, s)| (s.title.clone(), i))
            .collect();

        let mut merged = 0;
        for row in rdr.deserialize::<FeatureRow>() {
            let row = row?;
            match index.get(&row.song) {
                Some(&i) => {
                    self.songs[i].chadwambles = Some(row.features());
                    merged += 1;
                }
                None => warn!("can't find song {:?} for audio features", row.song),
            }
        }
        debug!("merged audio features into {} songs", merged);
        Ok(merged)
    }

    pub fn merge_audio_features_file(&mut self, path: impl AsRef<Path>) -> Result<usize, DatasetError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        self.merge_audio_features(file)
    }
}

#[derive(Debug, Deserialize)]
struct FeatureRow {
    song: String,
    danceability: f64,
    energy: f64,
    speechiness: f64,
    acousticness: f64,
    liveness: f64,
    valence: f64,
}

impl FeatureRow {
    fn features(&self) -> AudioFeatures {
        AudioFeatures {
            acousticness: self.acousticness,
            danceability: self.danceability,
            energy: self.energy,
            liveness: self.liveness,
            speechiness: self.speechiness,
            valence: self.valence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_features_by_title() {
        let mut ds = Dataset::from_json_str(r#"[{"title":"Yesterday"},{"title":"Help!"}]"#).unwrap();
        let csv = "id,year,album,song,danceability,energy,speechiness,acousticness,liveness,valence,duration_ms\n\
                   1,1965,Help!,Yesterday,0.33,0.18,0.03,0.88,0.09,0.31,125666\n\
                   2,1965,Help!,Unknown Song,0.5,0.5,0.5,0.5,0.5,0.5,100000\n";
        let n = ds.merge_audio_features(csv.as_bytes()).unwrap();
        assert_eq!(n, 1);
        let y = ds.songs()[0].chadwambles.as_ref().unwrap();
        assert_eq!(y.acousticness, 0.88);
        assert!(ds.songs()[1].chadwambles.is_none());
    }

    #[test]
    fn bad_json_is_an_error() {
        let err = Dataset::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, DatasetError::Json(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Dataset::load("definitely/not/here.json").unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }
}
