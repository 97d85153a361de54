//! The per-file playback settings record.
//!
//! One [`MediaSettings`] value holds everything the shell remembers about a
//! single media file between sessions: where playback stopped, which tracks
//! were selected, and how the video surface was adjusted. The stores in
//! ps-settings persist it without inspecting individual fields; the record
//! alone decides what it serializes.

use serde::Serialize;

use crate::store::{ReadGroup, WriteGroup};

/// Track id meaning "let the engine pick".
pub const TRACK_DEFAULT: i64 = -1;

/// Aspect-ratio override for the video surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectRatio {
    #[default]
    Auto,
    FourThirds,
    SixteenNine,
    SixteenTen,
    TwoPointThirtyFive,
}

impl AspectRatio {
    /// Stable string form used in the settings store.
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Auto => "auto",
            AspectRatio::FourThirds => "4:3",
            AspectRatio::SixteenNine => "16:9",
            AspectRatio::SixteenTen => "16:10",
            AspectRatio::TwoPointThirtyFive => "2.35:1",
        }
    }

    /// Parse the stored string form; unknown strings mean `Auto`.
    pub fn parse(s: &str) -> Self {
        match s {
            "4:3" => AspectRatio::FourThirds,
            "16:9" => AspectRatio::SixteenNine,
            "16:10" => AspectRatio::SixteenTen,
            "2.35:1" => AspectRatio::TwoPointThirtyFive,
            _ => AspectRatio::Auto,
        }
    }
}

/// One media file's saved playback state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaSettings {
    /// Resume position in seconds.
    pub current_sec: f64,
    /// Volume, 0-100.
    pub volume: i64,
    pub mute: bool,
    /// Playback speed multiplier.
    pub speed: f64,
    pub aspect: AspectRatio,
    /// Video zoom factor.
    pub zoom: f64,
    /// Selected audio track id; [`TRACK_DEFAULT`] lets the engine pick.
    pub audio_track: i64,
    /// Selected subtitle track id; [`TRACK_DEFAULT`] lets the engine pick.
    pub sub_track: i64,
    /// Audio/video desync correction in milliseconds.
    pub audio_delay_ms: i64,
    /// Subtitle timing correction in milliseconds.
    pub sub_delay_ms: i64,
    // Video equalizer, each -100..=100.
    pub brightness: i64,
    pub contrast: i64,
    pub gamma: i64,
    pub hue: i64,
    pub saturation: i64,
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            current_sec: 0.0,
            volume: 50,
            mute: false,
            speed: 1.0,
            aspect: AspectRatio::Auto,
            zoom: 1.0,
            audio_track: TRACK_DEFAULT,
            sub_track: TRACK_DEFAULT,
            audio_delay_ms: 0,
            sub_delay_ms: 0,
            brightness: 0,
            contrast: 0,
            gamma: 0,
            hue: 0,
            saturation: 0,
        }
    }
}

impl MediaSettings {
    /// Return every field to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Overlay persisted values from a store group. Keys the group is
    /// missing keep their current (default) values; callers reset first.
    pub fn load(&mut self, group: &impl ReadGroup) {
        let d = Self::default();
        self.current_sec = group.get_f64("current_sec", d.current_sec);
        self.volume = group.get_i64("volume", d.volume);
        self.mute = group.get_bool("mute", d.mute);
        self.speed = group.get_f64("speed", d.speed);
        self.aspect = AspectRatio::parse(&group.get_str("aspect", d.aspect.as_str()));
        self.zoom = group.get_f64("zoom", d.zoom);
        self.audio_track = group.get_i64("audio_track", d.audio_track);
        self.sub_track = group.get_i64("sub_track", d.sub_track);
        self.audio_delay_ms = group.get_i64("audio_delay", d.audio_delay_ms);
        self.sub_delay_ms = group.get_i64("sub_delay", d.sub_delay_ms);
        self.brightness = group.get_i64("brightness", d.brightness);
        self.contrast = group.get_i64("contrast", d.contrast);
        self.gamma = group.get_i64("gamma", d.gamma);
        self.hue = group.get_i64("hue", d.hue);
        self.saturation = group.get_i64("saturation", d.saturation);
    }

    /// Write every field into a store group.
    pub fn save(&self, group: &mut impl WriteGroup) {
        group.set_f64("current_sec", self.current_sec);
        group.set_i64("volume", self.volume);
        group.set_bool("mute", self.mute);
        group.set_f64("speed", self.speed);
        group.set_str("aspect", self.aspect.as_str());
        group.set_f64("zoom", self.zoom);
        group.set_i64("audio_track", self.audio_track);
        group.set_i64("sub_track", self.sub_track);
        group.set_i64("audio_delay", self.audio_delay_ms);
        group.set_i64("sub_delay", self.sub_delay_ms);
        group.set_i64("brightness", self.brightness);
        group.set_i64("contrast", self.contrast);
        group.set_i64("gamma", self.gamma);
        group.set_i64("hue", self.hue);
        group.set_i64("saturation", self.saturation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// In-memory group for exercising load/save without a file.
    #[derive(Default)]
    struct MapGroup {
        values: HashMap<String, String>,
    }

    impl ReadGroup for MapGroup {
        fn get_bool(&self, key: &str, default: bool) -> bool {
            self.values
                .get(key)
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        }
        fn get_i64(&self, key: &str, default: i64) -> i64 {
            self.values
                .get(key)
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        }
        fn get_f64(&self, key: &str, default: f64) -> f64 {
            self.values
                .get(key)
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        }
        fn get_str(&self, key: &str, default: &str) -> String {
            self.values
                .get(key)
                .cloned()
                .unwrap_or_else(|| default.to_string())
        }
    }

    impl WriteGroup for MapGroup {
        fn set_bool(&mut self, key: &str, value: bool) {
            self.values.insert(key.to_string(), value.to_string());
        }
        fn set_i64(&mut self, key: &str, value: i64) {
            self.values.insert(key.to_string(), value.to_string());
        }
        fn set_f64(&mut self, key: &str, value: f64) {
            self.values.insert(key.to_string(), value.to_string());
        }
        fn set_str(&mut self, key: &str, value: &str) {
            self.values.insert(key.to_string(), value.to_string());
        }
    }

    #[test]
    fn defaults() {
        let mset = MediaSettings::default();
        assert_eq!(mset.current_sec, 0.0);
        assert_eq!(mset.volume, 50);
        assert!(!mset.mute);
        assert_eq!(mset.speed, 1.0);
        assert_eq!(mset.aspect, AspectRatio::Auto);
        assert_eq!(mset.audio_track, TRACK_DEFAULT);
        assert_eq!(mset.sub_track, TRACK_DEFAULT);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut mset = MediaSettings::default();
        mset.current_sec = 93.5;
        mset.volume = 80;
        mset.reset();
        assert_eq!(mset, MediaSettings::default());
    }

    #[test]
    fn save_load_round_trip() {
        let mut mset = MediaSettings::default();
        mset.current_sec = 1832.25;
        mset.volume = 65;
        mset.mute = true;
        mset.speed = 1.5;
        mset.aspect = AspectRatio::SixteenNine;
        mset.zoom = 1.2;
        mset.audio_track = 2;
        mset.sub_track = 1;
        mset.audio_delay_ms = -150;
        mset.sub_delay_ms = 300;
        mset.brightness = 10;
        mset.hue = -5;

        let mut group = MapGroup::default();
        mset.save(&mut group);

        let mut loaded = MediaSettings::default();
        loaded.load(&group);
        assert_eq!(loaded, mset);
    }

    #[test]
    fn load_from_empty_group_keeps_defaults() {
        let group = MapGroup::default();
        let mut mset = MediaSettings::default();
        mset.load(&group);
        assert_eq!(mset, MediaSettings::default());
    }

    #[test]
    fn aspect_string_forms() {
        for aspect in [
            AspectRatio::Auto,
            AspectRatio::FourThirds,
            AspectRatio::SixteenNine,
            AspectRatio::SixteenTen,
            AspectRatio::TwoPointThirtyFive,
        ] {
            assert_eq!(AspectRatio::parse(aspect.as_str()), aspect);
        }
        assert_eq!(AspectRatio::parse("nonsense"), AspectRatio::Auto);
    }
}
