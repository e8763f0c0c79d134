//! Simulated switched output.

/// A relay that is either on or off.
#[derive(Debug, Default)]
pub struct VirtualSwitch {
    output: bool,
}

impl VirtualSwitch {
    #[must_use]
    pub fn output(&self) -> bool {
        self.output
    }

    /// Drive the relay, returning its previous state.
    pub fn set(&mut self, on: bool) -> bool {
        std::mem::replace(&mut self.output, on)
    }
}
