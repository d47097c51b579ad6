//! Abstract model of an entity's animation assets: named clips made of
//! ordered frames, plus the minimal playback state the sync layer needs.

/// One frame of an animation clip.
///
/// Frames are plain data. The sync layer only ever touches the first frame of
/// each clip, which it instruments at construction so that starting the clip
/// fires an event carrying the clip's name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    pub trigger_event: bool,
    pub event_info: Option<String>,
}

/// A named animation sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clip {
    name: String,
    frames: Vec<Frame>,
}

impl Clip {
    pub fn new(name: impl Into<String>, frame_count: usize) -> Self {
        Self {
            name: name.into(),
            frames: vec![Frame::default(); frame_count],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub(crate) fn frames_mut(&mut self) -> &mut [Frame] {
        &mut self.frames
    }
}

/// The entity's full clip library, in library (insertion) order, plus which
/// clip is currently playing.
///
/// Rendering belongs to the engine; this model only records enough playback
/// state for a replica's visual state to be inspectable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Animator {
    clips: Vec<Clip>,
    playing: Option<usize>,
}

impl Animator {
    pub fn new(clips: Vec<Clip>) -> Self {
        Self {
            clips,
            playing: None,
        }
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub(crate) fn clips_mut(&mut self) -> &mut [Clip] {
        &mut self.clips
    }

    pub fn clip(&self, name: &str) -> Option<&Clip> {
        self.clips.iter().find(|clip| clip.name == name)
    }

    /// Start playing `name` from its first frame. Returns false if the clip is
    /// not in the library.
    pub fn play(&mut self, name: &str) -> bool {
        let Some(index) = self.clips.iter().position(|clip| clip.name == name) else {
            return false;
        };
        self.playing = Some(index);
        true
    }

    pub fn stop(&mut self) {
        self.playing = None;
    }

    pub fn playing_clip(&self) -> Option<&str> {
        self.playing.map(|index| self.clips[index].name.as_str())
    }
}
