use super::*;

// Functions for creating, updating and querying the contract state.
impl<S: HasStateApi> State<S> {
    /// Creates a state with no products and no suppliers.
    pub fn new(
        state_builder: &mut StateBuilder<S>,
        admin: AccountAddress,
        mint_fee: Amount,
    ) -> Self {
        State {
            authority: Authority::new(state_builder, admin),
            mint_fee,
            next_token_id: FIRST_TOKEN_ID,
            products: state_builder.new_map(),
            operators: state_builder.new_map(),
        }
    }

    /// Record a new product owned by its supplier and return its token ID.
    ///
    /// Supplier rights and the mint payment are checked by the caller; this
    /// only allocates the ID and stores the record.
    pub fn mint_product(
        &mut self,
        supplier: Address,
        params: MintProductParams,
    ) -> ContractResult<ContractTokenId> {
        let token_id = TokenIdU64(self.next_token_id);
        self.next_token_id = self
            .next_token_id
            .checked_add(1)
            .ok_or(CustomContractError::TokenIdsExhausted)?;

        self.products.insert(
            token_id,
            Product {
                token_id,
                name: params.name,
                origin: params.origin,
                batch_number: params.batch_number,
                quantity_kg: params.quantity_kg,
                metadata_uri: params.metadata_uri,
                current_status: String::from(INITIAL_STATUS),
                supplier,
                owner: supplier,
            },
        );

        Ok(token_id)
    }

    /// Get a copy of the product record.
    pub fn product(&self, token_id: &ContractTokenId) -> ContractResult<Product> {
        self.products
            .get(token_id)
            .map(|product| (*product).clone())
            .ok_or(ContractError::InvalidTokenId)
    }

    /// Get the current owner of a product.
    pub fn owner_of(&self, token_id: &ContractTokenId) -> ContractResult<Address> {
        self.products
            .get(token_id)
            .map(|product| product.owner)
            .ok_or(ContractError::InvalidTokenId)
    }

    /// Get the current balance of a given token ID for a given address.
    /// Results in an error if the token ID does not exist in the state.
    /// Since this contract only contains NFTs, the balance will always be
    /// either 1 or 0.
    pub fn balance(
        &self,
        token_id: &ContractTokenId,
        address: &Address,
    ) -> ContractResult<ContractTokenAmount> {
        let owner = self.owner_of(token_id)?;
        Ok(if owner == *address { 1u8.into() } else { 0u8.into() })
    }

    /// Replace the status of a product.
    /// Results in an error if the
    /// - token ID does not exist in the state
    /// - sender is not the current owner of the token
    pub fn update_status(
        &mut self,
        sender: &Address,
        params: UpdateStatusParams,
    ) -> ContractResult<StatusUpdateEvent> {
        let mut product = self
            .products
            .get_mut(&params.token_id)
            .ok_or(ContractError::InvalidTokenId)?;

        ensure_eq!(product.owner, *sender, ContractError::Unauthorized);

        product.current_status = params.status.clone();

        Ok(StatusUpdateEvent {
            token_id: params.token_id,
            updated_by: *sender,
            status: params.status,
        })
    }

    /// Update the state with a transfer of some token.
    /// Results in an error if the token ID does not exist in the state or if
    /// the from address does not own the token.
    pub fn transfer(
        &mut self,
        transfer: &Transfer<ContractTokenId, ContractTokenAmount>,
    ) -> ContractResult<()> {
        let mut product = self
            .products
            .get_mut(&transfer.token_id)
            .ok_or(ContractError::InvalidTokenId)?;

        // A zero transfer does not modify the state.
        if transfer.amount == 0u8.into() {
            return Ok(());
        }

        // Only one unit of each token exists and `from` has to hold it.
        ensure!(
            transfer.amount == 1u8.into() && product.owner == transfer.from,
            ContractError::InsufficientFunds
        );

        product.owner = transfer.to.address();
        Ok(())
    }

    /// Check if `address` is an operator for `owner`.
    pub fn is_operator(&self, owner: &Address, address: &Address) -> bool {
        self.operators
            .get(owner)
            .map(|operators| operators.contains(address))
            .unwrap_or(false)
    }

    /// Add a new operator for the given address.
    ///
    /// Succeeds even if the `operator` is already an operator for the `owner`.
    pub fn add_operator(
        &mut self,
        owner: &Address,
        operator: &Address,
        state_builder: &mut StateBuilder<S>,
    ) {
        self.operators
            .entry(*owner)
            .or_insert_with(|| state_builder.new_set())
            .deref_mut()
            .insert(*operator);
    }

    /// Update the state removing an operator for a given address.
    /// Succeeds even if the `operator` is _not_ an operator for the `address`.
    pub fn remove_operator(&mut self, owner: &Address, operator: &Address) {
        if let Some(mut operators) = self.operators.get_mut(owner) {
            operators.remove(operator);
        }
    }

    pub fn view(&self) -> ViewState {
        ViewState {
            name: String::from(COLLECTION_NAME),
            symbol: String::from(COLLECTION_SYMBOL),
            admin: self.authority.admin(),
            mint_fee: self.mint_fee,
            next_token_id: TokenIdU64(self.next_token_id),
        }
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use test_infrastructure::*;

    const ADMIN: AccountAddress = AccountAddress([1u8; 32]);
    const SUPPLIER: Address = Address::Account(AccountAddress([2u8; 32]));
    const DISTRIBUTOR_ACCOUNT: AccountAddress = AccountAddress([3u8; 32]);
    const DISTRIBUTOR: Address = Address::Account(DISTRIBUTOR_ACCOUNT);

    fn coffee() -> MintProductParams {
        MintProductParams {
            name: String::from("Kopi Arabica"),
            origin: String::from("Toraja, Sulawesi Selatan"),
            batch_number: String::from("1"),
            quantity_kg: 100,
            metadata_uri: String::from("ipfs://bafybeicw5okhl2hng2oqwnqsrrtd62unewcr3gjdry2msofdnyfcnng3vq/0.json"),
        }
    }

    fn transfer_of(
        token_id: ContractTokenId,
        from: Address,
        to: AccountAddress,
        amount: u8,
    ) -> Transfer<ContractTokenId, ContractTokenAmount> {
        Transfer {
            token_id,
            amount: ContractTokenAmount::from(amount),
            from,
            to: Receiver::from_account(to),
            data: AdditionalData::empty(),
        }
    }

    #[concordium_test]
    fn test_token_ids_are_sequential() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::new(&mut state_builder, ADMIN, Amount::zero());

        for expected in 1..=5u64 {
            let token_id = state
                .mint_product(SUPPLIER, coffee())
                .expect_report("Failed to mint product");
            claim_eq!(token_id, TokenIdU64(expected));
        }
        claim_eq!(state.next_token_id, 6);
    }

    #[concordium_test]
    fn test_minted_product_defaults() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::new(&mut state_builder, ADMIN, Amount::zero());

        let token_id = state
            .mint_product(SUPPLIER, coffee())
            .expect_report("Failed to mint product");
        let product = state.product(&token_id).expect_report("Product should exist");

        claim_eq!(product.current_status, INITIAL_STATUS);
        claim_eq!(product.supplier, SUPPLIER);
        claim_eq!(product.owner, SUPPLIER);
        claim_eq!(state.balance(&token_id, &SUPPLIER), Ok(1u8.into()));
        claim_eq!(state.balance(&token_id, &DISTRIBUTOR), Ok(0u8.into()));
    }

    #[concordium_test]
    fn test_unknown_token() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::new(&mut state_builder, ADMIN, Amount::zero());

        claim_eq!(state.product(&TokenIdU64(1)), Err(ContractError::InvalidTokenId));
        claim_eq!(state.owner_of(&TokenIdU64(0)), Err(ContractError::InvalidTokenId));
        claim_eq!(
            state.update_status(
                &SUPPLIER,
                UpdateStatusParams {
                    token_id: TokenIdU64(1),
                    status: String::from("Shipped"),
                }
            ),
            Err(ContractError::InvalidTokenId)
        );
        claim_eq!(
            state.transfer(&transfer_of(TokenIdU64(1), SUPPLIER, DISTRIBUTOR_ACCOUNT, 1)),
            Err(ContractError::InvalidTokenId)
        );
    }

    #[concordium_test]
    fn test_transfer_rules() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::new(&mut state_builder, ADMIN, Amount::zero());
        let token_id = state
            .mint_product(SUPPLIER, coffee())
            .expect_report("Failed to mint product");

        // Stale `from`
        claim_eq!(
            state.transfer(&transfer_of(token_id, DISTRIBUTOR, DISTRIBUTOR_ACCOUNT, 1)),
            Err(ContractError::InsufficientFunds)
        );
        // More than the single unit
        claim_eq!(
            state.transfer(&transfer_of(token_id, SUPPLIER, DISTRIBUTOR_ACCOUNT, 2)),
            Err(ContractError::InsufficientFunds)
        );
        // Zero amount is a no-op
        claim_eq!(
            state.transfer(&transfer_of(token_id, SUPPLIER, DISTRIBUTOR_ACCOUNT, 0)),
            Ok(())
        );
        claim_eq!(state.owner_of(&token_id), Ok(SUPPLIER));

        claim_eq!(
            state.transfer(&transfer_of(token_id, SUPPLIER, DISTRIBUTOR_ACCOUNT, 1)),
            Ok(())
        );
        claim_eq!(state.owner_of(&token_id), Ok(DISTRIBUTOR));
    }

    #[concordium_test]
    fn test_provenance_is_immutable() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::new(&mut state_builder, ADMIN, Amount::zero());
        let token_id = state
            .mint_product(SUPPLIER, coffee())
            .expect_report("Failed to mint product");

        state
            .update_status(
                &SUPPLIER,
                UpdateStatusParams {
                    token_id,
                    status: String::from("Shipped to distributor"),
                },
            )
            .expect_report("Owner should update the status");
        state
            .transfer(&transfer_of(token_id, SUPPLIER, DISTRIBUTOR_ACCOUNT, 1))
            .expect_report("Owner should transfer the token");
        state
            .update_status(
                &DISTRIBUTOR,
                UpdateStatusParams {
                    token_id,
                    status: String::from("Stored at distributor warehouse"),
                },
            )
            .expect_report("New owner should update the status");

        let product = state.product(&token_id).expect_report("Product should exist");
        let params = coffee();
        claim_eq!(product.name, params.name);
        claim_eq!(product.origin, params.origin);
        claim_eq!(product.batch_number, params.batch_number);
        claim_eq!(product.quantity_kg, params.quantity_kg);
        claim_eq!(product.metadata_uri, params.metadata_uri);
        claim_eq!(product.supplier, SUPPLIER);
        claim_eq!(product.owner, DISTRIBUTOR);
        claim_eq!(product.current_status, "Stored at distributor warehouse");
    }

    #[concordium_test]
    fn test_operators() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::new(&mut state_builder, ADMIN, Amount::zero());

        claim!(!state.is_operator(&SUPPLIER, &DISTRIBUTOR));
        state.add_operator(&SUPPLIER, &DISTRIBUTOR, &mut state_builder);
        state.add_operator(&SUPPLIER, &DISTRIBUTOR, &mut state_builder);
        claim!(state.is_operator(&SUPPLIER, &DISTRIBUTOR));
        // Operator relation is one-way
        claim!(!state.is_operator(&DISTRIBUTOR, &SUPPLIER));

        state.remove_operator(&SUPPLIER, &DISTRIBUTOR);
        claim!(!state.is_operator(&SUPPLIER, &DISTRIBUTOR));
        state.remove_operator(&DISTRIBUTOR, &SUPPLIER);
    }
}
