//! Stories mode: a cyclic slider over the bundled story records.

use heo_core::story::StoryRecord;
use log::debug;

/// Current position in a fixed list of stories.
///
/// Navigation wraps in both directions. On an empty list every operation is
/// a no-op and [`StorySlider::current`] is `None`.
#[derive(Debug, Clone, Default)]
pub struct StorySlider {
    stories: Vec<StoryRecord>,
    index: usize,
}

impl StorySlider {
    pub fn new(stories: Vec<StoryRecord>) -> Self {
        Self { stories, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&StoryRecord> {
        self.stories.get(self.index)
    }

    pub fn next(&mut self) {
        if self.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.len();
        debug!("story slider -> {}", self.index);
    }

    pub fn previous(&mut self) {
        if self.is_empty() {
            return;
        }
        self.index = if self.index == 0 {
            self.len() - 1
        } else {
            self.index - 1
        };
        debug!("story slider -> {}", self.index);
    }

    /// Jump to `index`, wrapped into range.
    pub fn go_to(&mut self, index: usize) {
        if self.is_empty() {
            return;
        }
        self.index = index % self.len();
    }
}
