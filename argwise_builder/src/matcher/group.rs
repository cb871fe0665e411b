use std::collections::HashMap;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Identifies a mutually exclusive group within a single parser.
pub(crate) type GroupId = usize;

/// Tracks which member (if any) of each mutually exclusive group has matched during one parse.
#[derive(Debug, Default)]
pub(super) struct GroupRegistry {
    matched: HashMap<GroupId, usize>,
}

impl GroupRegistry {
    /// Record that the argument at `index` (a member of `group`) received a value.
    ///
    /// Fails with the index of the previously matched member when it is a different argument.
    pub(super) fn record(&mut self, group: GroupId, index: usize) -> Result<(), usize> {
        match self.matched.get(&group) {
            Some(&matched) if matched != index => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Group #{group} conflict: #{index} after #{matched}.");
                }
                Err(matched)
            }
            Some(_) => Ok(()),
            None => {
                self.matched.insert(group, index);
                Ok(())
            }
        }
    }
}
