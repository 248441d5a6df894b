use super::*;

/// Administrator of a supply chain contract and the registry of suppliers it
/// has verified.
#[derive(Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct Authority<S: HasStateApi> {
    /// Deployer of the contract. Manages the supplier registry and collects mint fees.
    admin: AccountAddress,
    /// Verified addresses that are allowed to mint products.
    suppliers: StateSet<Address, S>,
}

impl<S: HasStateApi> Authority<S> {
    pub fn new(state_builder: &mut StateBuilder<S>, admin: AccountAddress) -> Self {
        Self {
            admin,
            suppliers: state_builder.new_set(),
        }
    }

    pub fn admin(&self) -> AccountAddress {
        self.admin
    }

    pub fn has_admin_rights(&self, address: &Address) -> bool {
        *address == Address::Account(self.admin)
    }

    pub fn is_supplier(&self, address: &Address) -> bool {
        self.suppliers.contains(address)
    }

    /// Apply a registry update on behalf of `sender`.
    ///
    /// Returns whether the registry changed. Adding a present supplier or
    /// removing a missing one succeeds without a change.
    pub fn handle_update(
        &mut self,
        sender: &Address,
        update: &SupplierUpdate,
    ) -> ContractResult<bool> {
        ensure!(self.has_admin_rights(sender), ContractError::Unauthorized);

        let changed = match update.kind {
            SupplierUpdateKind::Remove => self.suppliers.remove(&update.address),
            SupplierUpdateKind::Add => self.suppliers.insert(update.address),
        };

        Ok(changed)
    }

    pub fn handle_view(&self, view: SupplierViewParams) -> Vec<Address> {
        self.suppliers
            .iter()
            .skip(view.skip as usize)
            .take(view.show as usize)
            .map(|a| *a)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, SchemaType, Serialize)]
pub enum SupplierUpdateKind {
    Remove,
    Add,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, SchemaType, Serialize)]
pub struct SupplierUpdate {
    pub kind: SupplierUpdateKind,
    pub address: Address,
}

#[derive(Debug, SchemaType, Serialize)]
pub struct SupplierViewParams {
    pub skip: u32,
    pub show: u32,
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_std::test_infrastructure::*;

    const ADMIN_ACCOUNT: AccountAddress = AccountAddress([1; 32]);
    const SUPPLIER_ACCOUNT: AccountAddress = AccountAddress([2; 32]);
    const SUPPLIER_CONTRACT: ContractAddress = ContractAddress {
        index: 2,
        subindex: 2,
    };

    const USER_1: AccountAddress = AccountAddress([16; 32]);
    const CONTRACT_1: ContractAddress = ContractAddress {
        index: 16,
        subindex: 16,
    };

    fn default_authority() -> Authority<TestStateApi> {
        let mut state_builder = TestStateBuilder::new();

        let mut authority = Authority::new(&mut state_builder, ADMIN_ACCOUNT);
        authority
            .suppliers
            .insert(Address::Account(SUPPLIER_ACCOUNT));
        authority
            .suppliers
            .insert(Address::Contract(SUPPLIER_CONTRACT));

        authority
    }

    fn add(address: Address) -> SupplierUpdate {
        SupplierUpdate {
            kind: SupplierUpdateKind::Add,
            address,
        }
    }

    fn remove(address: Address) -> SupplierUpdate {
        SupplierUpdate {
            kind: SupplierUpdateKind::Remove,
            address,
        }
    }

    #[concordium_test]
    fn test_admin_rights() {
        let authority = default_authority();

        claim!(authority.has_admin_rights(&Address::Account(ADMIN_ACCOUNT)));
        claim!(!authority.has_admin_rights(&Address::Account(SUPPLIER_ACCOUNT)));
        // A contract sharing the admin bytes is still a different identity
        claim!(!authority.has_admin_rights(&Address::Contract(ContractAddress {
            index: 1,
            subindex: 1,
        })));
        claim_eq!(authority.admin(), ADMIN_ACCOUNT);
    }

    #[concordium_test]
    fn test_update_suppliers_add_new_supplier() {
        let mut authority = default_authority();

        let result =
            authority.handle_update(&Address::Account(ADMIN_ACCOUNT), &add(Address::Account(USER_1)));
        claim_eq!(result, Ok(true));
        claim!(authority.is_supplier(&Address::Account(USER_1)));

        let result = authority.handle_update(
            &Address::Account(ADMIN_ACCOUNT),
            &add(Address::Contract(CONTRACT_1)),
        );
        claim_eq!(result, Ok(true));
        claim!(authority.is_supplier(&Address::Contract(CONTRACT_1)));
    }

    #[concordium_test]
    fn test_update_suppliers_unauthorized() {
        let mut authority = default_authority();

        // Suppliers cannot grow the registry themselves
        let result = authority.handle_update(
            &Address::Account(SUPPLIER_ACCOUNT),
            &add(Address::Account(USER_1)),
        );
        claim_eq!(result, Err(ContractError::Unauthorized));
        claim!(!authority.is_supplier(&Address::Account(USER_1)));

        let result = authority.handle_update(
            &Address::Contract(SUPPLIER_CONTRACT),
            &remove(Address::Account(SUPPLIER_ACCOUNT)),
        );
        claim_eq!(result, Err(ContractError::Unauthorized));
        claim!(authority.is_supplier(&Address::Account(SUPPLIER_ACCOUNT)));

        let result =
            authority.handle_update(&Address::Account(USER_1), &add(Address::Account(USER_1)));
        claim_eq!(result, Err(ContractError::Unauthorized));
        claim!(!authority.is_supplier(&Address::Account(USER_1)));
    }

    #[concordium_test]
    fn test_update_suppliers_add_existing_supplier() {
        let mut authority = default_authority();

        let result = authority.handle_update(
            &Address::Account(ADMIN_ACCOUNT),
            &add(Address::Account(SUPPLIER_ACCOUNT)),
        );
        // No change or error expected
        claim_eq!(result, Ok(false));
        claim!(authority.is_supplier(&Address::Account(SUPPLIER_ACCOUNT)));
    }

    #[concordium_test]
    fn test_update_suppliers_remove() {
        let mut authority = default_authority();

        let result = authority.handle_update(
            &Address::Account(ADMIN_ACCOUNT),
            &remove(Address::Contract(SUPPLIER_CONTRACT)),
        );
        claim_eq!(result, Ok(true));
        claim!(!authority.is_supplier(&Address::Contract(SUPPLIER_CONTRACT)));
        claim!(authority.is_supplier(&Address::Account(SUPPLIER_ACCOUNT)));

        let result = authority.handle_update(
            &Address::Account(ADMIN_ACCOUNT),
            &remove(Address::Account(USER_1)),
        );
        // No change or error expected
        claim_eq!(result, Ok(false));
    }

    #[concordium_test]
    fn test_view_suppliers() {
        let mut authority = default_authority();

        let mut supplier_set = (16u8..=255u8)
            .map(|n| {
                if n % 2 == 0 {
                    Address::Contract(ContractAddress {
                        index: n as u64,
                        subindex: 0,
                    })
                } else {
                    Address::Account(AccountAddress([n; 32]))
                }
            })
            .chain([
                Address::Account(SUPPLIER_ACCOUNT),
                Address::Contract(SUPPLIER_CONTRACT),
            ])
            .collect::<HashSet<_>>();

        for supplier in supplier_set.iter() {
            authority.suppliers.insert(*supplier);
        }

        let mut num_seen = 0;
        let increment = 30;
        loop {
            let returned_addresses = authority.handle_view(SupplierViewParams {
                skip: num_seen,
                show: increment,
            });

            for addr in returned_addresses.iter() {
                // Every listed supplier must be in the set exactly once
                claim!(supplier_set.remove(addr));
            }

            if returned_addresses.len() != increment as usize {
                break;
            }
            num_seen += increment;
        }

        claim!(supplier_set.is_empty());
    }
}
