use serde::{Deserialize, Serialize};

/// A visual trail that can be switched on and off.
pub trait TrailEffect {
    fn set_emitting(&mut self, emitting: bool);
}

/// Trail state as seen by the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trail {
    pub emitting: bool,
    /// Number of times emission has been switched on.
    pub bursts: u32,
}

impl TrailEffect for Trail {
    fn set_emitting(&mut self, emitting: bool) {
        if emitting && !self.emitting {
            self.bursts += 1;
        }
        self.emitting = emitting;
    }
}
