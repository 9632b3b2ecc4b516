use std::collections::HashMap;

/// Accumulators keyed by a string, kept in the order their keys first appeared.
///
/// Ranking code relies on this order: a stable sort over the groups leaves
/// tied groups in first-seen order.
#[derive(Debug)]
pub struct Groups<A> {
    positions: HashMap<String, usize>,
    entries: Vec<(String, A)>
}

impl<A: Default> Groups<A> {
    pub fn new() -> Self {
        Self {
            positions: HashMap::new(),
            entries: Vec::new()
        }
    }

    /// The accumulator for `key`, created with `A::default()` on first use.
    pub fn entry(&mut self, key: &str) -> &mut A {
        let position = match self.positions.get(key) {
            Some(position) => *position,
            None => {
                self.entries.push((key.to_string(), A::default()));
                self.positions.insert(key.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };

        &mut self.entries[position].1
    }

    pub fn into_entries(self) -> Vec<(String, A)> {
        self.entries
    }
}
