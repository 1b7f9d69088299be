//! Audio module - turns sound cues into playback.
//!
//! With the `audio` feature every `SoundCueEvent` plays
//! `audio/<cue>.ogg` through kira. Without it cues are only logged, which is
//! all a headless run needs.

use bevy::prelude::*;

use crate::core::{GameplaySet, SoundCueEvent};

/// Audio plugin - consumes `SoundCueEvent`s.
pub struct SoundCuePlugin;

impl Plugin for SoundCuePlugin {
    fn build(&self, app: &mut App) {
        #[cfg(feature = "audio")]
        {
            if !app.is_plugin_added::<bevy::asset::AssetPlugin>() {
                app.add_plugins(bevy::asset::AssetPlugin::default());
            }
            if !app.is_plugin_added::<bevy_kira_audio::AudioPlugin>() {
                app.add_plugins(bevy_kira_audio::AudioPlugin);
            }
            app.add_systems(Update, play_sound_cues.in_set(GameplaySet::Present));
        }

        #[cfg(not(feature = "audio"))]
        app.add_systems(Update, log_sound_cues.in_set(GameplaySet::Present));
    }
}

/// Path of the clip for `cue`, relative to the asset root.
pub fn cue_path(cue: &str) -> String {
    format!("audio/{cue}.ogg")
}

#[cfg(feature = "audio")]
fn play_sound_cues(
    mut cues: EventReader<SoundCueEvent>,
    asset_server: Res<AssetServer>,
    audio: Res<bevy_kira_audio::Audio>,
) {
    use bevy_kira_audio::AudioControl;

    for event in cues.read() {
        audio.play(asset_server.load(cue_path(event.cue)));
    }
}

#[cfg(not(feature = "audio"))]
fn log_sound_cues(mut cues: EventReader<SoundCueEvent>) {
    for event in cues.read() {
        debug!("sound cue {} from {:?}", cue_path(event.cue), event.emitter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cues_map_to_ogg_clips() {
        assert_eq!(cue_path("wizard_q"), "audio/wizard_q.ogg");
    }
}
