pub mod record;
pub mod stats;
pub mod system;
pub mod transfer;

use crate::cli::registry::CommandRegistry;

/// Registers every command; the order is the order shown by `help`.
pub fn register_all(registry: &mut CommandRegistry) {
    for entry in record::definitions()
        .into_iter()
        .chain(stats::definitions())
        .chain(transfer::definitions())
        .chain(system::definitions())
    {
        registry.register(entry);
    }
}
