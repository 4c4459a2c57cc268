use crate::cli::{args::ParsedArgs, context::AppContext, CommandResult};

pub type CommandHandler = fn(&mut AppContext, &ParsedArgs) -> CommandResult;

/// One top-level command with the text `help` shows for it.
pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

/// Commands in registration order. A later entry with the same name replaces
/// the earlier one in place.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: CommandEntry) {
        match self.entries.iter_mut().find(|known| known.name == entry.name) {
            Some(slot) => *slot = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn list(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut AppContext, _: &ParsedArgs) -> CommandResult {
        Ok(())
    }

    #[test]
    fn keeps_registration_order_and_replaces_duplicates() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("list", "first", "list", noop));
        registry.register(CommandEntry::new("add", "add", "add", noop));
        registry.register(CommandEntry::new("list", "second", "list", noop));

        assert_eq!(registry.names().collect::<Vec<_>>(), ["list", "add"]);
        assert_eq!(registry.get("list").map(|entry| entry.description), Some("second"));
        assert!(registry.get("missing").is_none());
    }
}
