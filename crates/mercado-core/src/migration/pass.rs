use crate::document::Collection;

/// All migration passes, in the order run-all executes them.
///
/// Adding a pass means adding a variant here, to `all()`, and to the
/// exhaustive matches below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MigrationPass {
    /// Copy `clientes` into `users`, syncing the phone fields
    ClientesToUsers,
    /// Backfill `userId` on orders
    PedidosToUserId,
    /// Backfill `userId` on addresses
    EnderecosToUserId,
}

impl MigrationPass {
    pub const fn all() -> &'static [MigrationPass] {
        &[
            MigrationPass::ClientesToUsers,
            MigrationPass::PedidosToUserId,
            MigrationPass::EnderecosToUserId,
        ]
    }

    /// Collection the pass reads from.
    pub const fn source(&self) -> Collection {
        match self {
            MigrationPass::ClientesToUsers => Collection::Clientes,
            MigrationPass::PedidosToUserId => Collection::Pedidos,
            MigrationPass::EnderecosToUserId => Collection::Enderecos,
        }
    }

    /// Collection the pass writes to.
    pub const fn target(&self) -> Collection {
        match self {
            MigrationPass::ClientesToUsers => Collection::Users,
            MigrationPass::PedidosToUserId => Collection::Pedidos,
            MigrationPass::EnderecosToUserId => Collection::Enderecos,
        }
    }

    /// Singular label of the records the pass handles, used in messages.
    pub const fn record_label(&self) -> &'static str {
        match self {
            MigrationPass::ClientesToUsers => "customer",
            MigrationPass::PedidosToUserId => "order",
            MigrationPass::EnderecosToUserId => "address",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            MigrationPass::ClientesToUsers => "clientes -> users",
            MigrationPass::PedidosToUserId => "pedidos -> userId",
            MigrationPass::EnderecosToUserId => "enderecos -> userId",
        }
    }

    /// Completion message for a successful pass.
    pub fn completion_message(&self, records_updated: usize) -> String {
        match self {
            MigrationPass::ClientesToUsers => format!(
                "Migration finished: {} customers migrated to users",
                records_updated
            ),
            MigrationPass::PedidosToUserId => format!(
                "Migration finished: {} orders updated with userId",
                records_updated
            ),
            MigrationPass::EnderecosToUserId => format!(
                "Migration finished: {} addresses updated with userId",
                records_updated
            ),
        }
    }
}

impl std::fmt::Display for MigrationPass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_all_order_is_fixed() {
        assert_eq!(
            MigrationPass::all(),
            &[
                MigrationPass::ClientesToUsers,
                MigrationPass::PedidosToUserId,
                MigrationPass::EnderecosToUserId,
            ]
        );
    }

    #[test]
    fn test_customer_pass_targets_users() {
        let pass = MigrationPass::ClientesToUsers;
        assert_eq!(pass.source(), Collection::Clientes);
        assert_eq!(pass.target(), Collection::Users);
    }

    #[test]
    fn test_owner_passes_update_in_place() {
        for pass in [MigrationPass::PedidosToUserId, MigrationPass::EnderecosToUserId] {
            assert_eq!(pass.source(), pass.target());
        }
    }
}
