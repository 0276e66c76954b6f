/// Sequential ID generator for nodes and connections
/// Generates IDs like "node-1", "node-2", "conn-1"
/// Can resume past the highest ID of a loaded workflow
use tracing::warn;

#[derive(Debug, Clone)]
pub struct IdGenerator {
    /// Prefix before the dash
    prefix: &'static str,
    /// Counter for next ID
    counter: u64,
}

impl IdGenerator {
    pub fn new(prefix: &'static str) -> Self {
        Self { prefix, counter: 1 }
    }

    pub fn nodes() -> Self {
        Self::new("node")
    }

    pub fn connections() -> Self {
        Self::new("conn")
    }

    /// Generate the next ID
    pub fn next(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.counter);
        self.counter = self.counter.saturating_add(1);
        id
    }

    /// Advance the counter so no future ID collides with the given ones.
    /// IDs that don't follow the `prefix-N` pattern, or sit at the top of the
    /// counter range, are ignored.
    pub fn resume_after<'a>(&mut self, existing: impl IntoIterator<Item = &'a str>) {
        let next = existing
            .into_iter()
            .filter_map(|id| {
                let value = self.decode(id)?;
                let next = value.checked_add(1);
                if next.is_none() {
                    warn!(id, "ID is at the end of the counter range, not resuming past it");
                }
                next
            })
            .max();

        if let Some(next) = next {
            self.counter = self.counter.max(next);
        }
    }

    /// Reset to the first ID
    pub fn reset(&mut self) {
        self.counter = 1;
    }

    /// Decode an ID back to its counter value
    fn decode(&self, id: &str) -> Option<u64> {
        id.strip_prefix(self.prefix)?
            .strip_prefix('-')?
            .parse()
            .ok()
    }
}
