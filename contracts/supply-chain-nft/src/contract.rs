use super::*;

/// Initialize contract instance with no products and no suppliers.
/// The account creating the instance becomes the administrator.
#[init(contract = "SupplyChainNFT", parameter = "InitParams")]
fn init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    // Parse the parameter.
    let params: InitParams = ctx.parameter_cursor().get()?;

    // Construct the initial contract state.
    let state = State::new(state_builder, ctx.init_origin(), params.mint_fee);
    Ok(state)
}

/// Apply a supplier registry update and log it if anything changed.
fn update_suppliers<S: HasStateApi>(
    state: &mut State<S>,
    sender: Address,
    update: SupplierUpdate,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    if state.authority.handle_update(&sender, &update)? {
        logger.log(&CustomEvent::SupplierUpdate(update))?;
    }
    Ok(())
}

/// Verify a supplier, allowing it to mint products.
/// Logs a `SupplierUpdate` event unless the address was already verified.
///
/// It rejects if:
/// - Fails to parse parameter.
/// - The sender is not the administrator.
/// - Fails to log event.
#[receive(
    contract = "SupplyChainNFT",
    name = "addSupplier",
    parameter = "Address",
    mutable,
    enable_logger
)]
fn add_supplier<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let address: Address = ctx.parameter_cursor().get()?;
    let update = SupplierUpdate {
        kind: SupplierUpdateKind::Add,
        address,
    };
    update_suppliers(host.state_mut(), ctx.sender(), update, logger)
}

/// Withdraw the verification of a supplier. Products it already minted are
/// not affected.
/// Logs a `SupplierUpdate` event unless the address was not verified.
///
/// It rejects if:
/// - Fails to parse parameter.
/// - The sender is not the administrator.
/// - Fails to log event.
#[receive(
    contract = "SupplyChainNFT",
    name = "removeSupplier",
    parameter = "Address",
    mutable,
    enable_logger
)]
fn remove_supplier<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let address: Address = ctx.parameter_cursor().get()?;
    let update = SupplierUpdate {
        kind: SupplierUpdateKind::Remove,
        address,
    };
    update_suppliers(host.state_mut(), ctx.sender(), update, logger)
}

/// Mint a token for a new product batch owned by the sending supplier.
/// The attached amount must be exactly the mint fee; it is forwarded to the
/// administrator. Logs a `Mint` and a `TokenMetadata` event, the latter
/// pointing to the product's metadata URI.
///
/// It rejects if:
/// - Fails to parse parameter.
/// - The sender is not a verified supplier.
/// - The attached amount differs from the mint fee.
/// - Fails to forward the fee.
/// - Fails to log Mint event
/// - Fails to log TokenMetadata event
#[receive(
    contract = "SupplyChainNFT",
    name = "mintProduct",
    parameter = "MintProductParams",
    return_value = "ContractTokenId",
    mutable,
    enable_logger,
    payable
)]
fn mint_product<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
) -> ContractResult<ContractTokenId> {
    // Parse the parameter.
    let params: MintProductParams = ctx.parameter_cursor().get()?;
    let sender = ctx.sender();
    let state = host.state_mut();

    ensure!(
        state.authority.is_supplier(&sender),
        ContractError::Unauthorized
    );
    ensure_eq!(
        amount,
        state.mint_fee,
        CustomContractError::InvalidPayment.into()
    );

    let admin = state.authority.admin();

    // Transfer the fee to the administrator
    if amount != Amount::zero() {
        host.invoke_transfer(&admin, amount)
            .map_err(CustomContractError::from)?;
    }

    let metadata_url = MetadataUrl {
        url: params.metadata_uri.clone(),
        hash: None,
    };
    let token_id = host.state_mut().mint_product(sender, params)?;

    // Event for minted NFT.
    logger.log(&Cis2Event::Mint(MintEvent {
        token_id,
        amount: ContractTokenAmount::from(1u8),
        owner: sender,
    }))?;

    // Metadata URL for the NFT.
    logger.log(
        &Cis2Event::<ContractTokenId, ContractTokenAmount>::TokenMetadata(TokenMetadataEvent {
            token_id,
            metadata_url,
        }),
    )?;

    Ok(token_id)
}

/// Rewrite the status line of a product.
/// Logs a `StatusUpdate` event.
///
/// It rejects if:
/// - Fails to parse parameter.
/// - The token does not exist.
/// - The sender is not the current owner of the token. Operators are not
///   allowed to update the status.
/// - Fails to log event.
#[receive(
    contract = "SupplyChainNFT",
    name = "updateStatus",
    parameter = "UpdateStatusParams",
    mutable,
    enable_logger
)]
fn update_status<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    // Parse the parameter.
    let params: UpdateStatusParams = ctx.parameter_cursor().get()?;

    let event = host.state_mut().update_status(&ctx.sender(), params)?;

    logger.log(&CustomEvent::StatusUpdate(event))?;

    Ok(())
}

/// Execute a list of token transfers, in the order of the list.
///
/// Logs a `Transfer` event for each transfer in the list.
/// Produces an action which sends a message to each contract which are the
/// receiver of a transfer.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Any of the transfers fail to be executed, which could be if:
///     - The sender is not the owner of the token, or an operator for this
///       specific `from` address.
///     - The `token_id` does not exist.
///     - The token is not owned by the `from`.
/// - Fails to log event.
/// - Any of the messages sent to contracts receiving a transfer choose to
///   reject.
#[receive(
    contract = "SupplyChainNFT",
    name = "transfer",
    parameter = "TransferParameter",
    mutable,
    enable_logger
)]
fn transfer<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    // Parse the parameter.
    let TransferParams(transfers): TransferParameter = ctx.parameter_cursor().get()?;
    // Get the sender who invoked this contract function.
    let sender = ctx.sender();

    for transfer in transfers {
        let state = host.state_mut();
        // Authenticate the sender for this transfer
        ensure!(
            transfer.from == sender || state.is_operator(&transfer.from, &sender),
            ContractError::Unauthorized
        );

        let to_address = transfer.to.address();
        // Update the contract state
        state.transfer(&transfer)?;

        // Log transfer event
        logger.log(&Cis2Event::Transfer(TransferEvent {
            token_id: transfer.token_id,
            amount: transfer.amount,
            from: transfer.from,
            to: to_address,
        }))?;

        // If the receiver is a contract, we add sending it a message to the list of
        // actions.
        if let Receiver::Contract(address, entrypoint_name) = transfer.to {
            let parameter = OnReceivingCis2Params {
                token_id: transfer.token_id,
                amount: transfer.amount,
                from: transfer.from,
                data: transfer.data,
            };

            host.invoke_contract(
                &address,
                &parameter,
                entrypoint_name.as_entrypoint_name(),
                Amount::zero(),
            )
            .map_err(CustomContractError::from)?;
        }
    }
    Ok(())
}

/// Enable or disable addresses as operators of the sender address.
/// Logs an `UpdateOperator` event.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Fails to log event.
#[receive(
    contract = "SupplyChainNFT",
    name = "updateOperator",
    parameter = "UpdateOperatorParams",
    mutable,
    enable_logger
)]
fn update_operator<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    // Parse the parameter.
    let UpdateOperatorParams(params) = ctx.parameter_cursor().get()?;
    let sender = ctx.sender();

    let (state, state_builder) = host.state_and_builder();
    for param in params {
        // Update the operator in the state.
        match param.update {
            OperatorUpdate::Add => state.add_operator(&sender, &param.operator, state_builder),
            OperatorUpdate::Remove => state.remove_operator(&sender, &param.operator),
        }

        // Log the appropriate event
        logger.log(
            &Cis2Event::<ContractTokenId, ContractTokenAmount>::UpdateOperator(
                UpdateOperatorEvent {
                    owner: sender,
                    operator: param.operator,
                    update: param.update,
                },
            ),
        )?;
    }

    Ok(())
}

/// Takes a list of queries. Each query is an owner address and some address to
/// check as an operator of the owner address.
///
/// It rejects if:
/// - It fails to parse the parameter.
#[receive(
    contract = "SupplyChainNFT",
    name = "operatorOf",
    parameter = "OperatorOfQueryParams",
    return_value = "OperatorOfQueryResponse"
)]
fn operator_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<OperatorOfQueryResponse> {
    // Parse the parameter.
    let params: OperatorOfQueryParams = ctx.parameter_cursor().get()?;
    // Build the response.
    let mut response = Vec::with_capacity(params.queries.len());
    let state = host.state();
    for query in params.queries {
        // Query the state for address being an operator of owner.
        let is_operator = state.is_operator(&query.owner, &query.address);
        response.push(is_operator);
    }

    Ok(OperatorOfQueryResponse::from(response))
}

/// Get the balance of given token IDs and addresses.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Any of the queried `token_id` does not exist.
#[receive(
    contract = "SupplyChainNFT",
    name = "balanceOf",
    parameter = "ContractBalanceOfQueryParams",
    return_value = "ContractBalanceOfQueryResponse"
)]
fn balance_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<ContractBalanceOfQueryResponse> {
    // Parse the parameter.
    let params: ContractBalanceOfQueryParams = ctx.parameter_cursor().get()?;
    // Build the response.
    let mut response = Vec::with_capacity(params.queries.len());
    let state = host.state();
    for query in params.queries {
        // Query the state for balance.
        let amount = state.balance(&query.token_id, &query.address)?;
        response.push(amount);
    }

    Ok(ContractBalanceOfQueryResponse::from(response))
}

/// Get the metadata URLs of the given token IDs, which are the metadata URIs
/// the products were minted with.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Any of the queried `token_id` does not exist.
#[receive(
    contract = "SupplyChainNFT",
    name = "tokenMetadata",
    parameter = "ContractTokenMetadataQueryParams",
    return_value = "TokenMetadataQueryResponse"
)]
fn token_metadata<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<TokenMetadataQueryResponse> {
    // Parse the parameter.
    let params: ContractTokenMetadataQueryParams = ctx.parameter_cursor().get()?;
    // Build the response.
    let mut response = Vec::with_capacity(params.queries.len());
    let state = host.state();
    for token_id in params.queries {
        let product = state.product(&token_id)?;
        response.push(MetadataUrl {
            url: product.metadata_uri,
            hash: None,
        });
    }

    Ok(TokenMetadataQueryResponse::from(response))
}

/// Get the supported standards or addresses for a implementation given list of
/// standard identifiers.
///
/// It rejects if:
/// - It fails to parse the parameter.
#[receive(
    contract = "SupplyChainNFT",
    name = "supports",
    parameter = "SupportsQueryParams",
    return_value = "SupportsQueryResponse"
)]
fn supports<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    _host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<SupportsQueryResponse> {
    // Parse the parameter.
    let params: SupportsQueryParams = ctx.parameter_cursor().get()?;

    // Build the response.
    let mut response = Vec::with_capacity(params.queries.len());
    for std_id in params.queries {
        if SUPPORTS_STANDARDS.contains(&std_id.as_standard_identifier()) {
            response.push(SupportResult::Support);
        } else {
            response.push(SupportResult::NoSupport);
        }
    }

    Ok(SupportsQueryResponse::from(response))
}

/// View the full record of a product.
#[receive(
    contract = "SupplyChainNFT",
    name = "getProduct",
    parameter = "ContractTokenId",
    return_value = "Product"
)]
fn get_product<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Product> {
    let token_id: ContractTokenId = ctx.parameter_cursor().get()?;
    host.state().product(&token_id)
}

/// View the current owner of a product.
#[receive(
    contract = "SupplyChainNFT",
    name = "ownerOf",
    parameter = "ContractTokenId",
    return_value = "Address"
)]
fn owner_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Address> {
    let token_id: ContractTokenId = ctx.parameter_cursor().get()?;
    host.state().owner_of(&token_id)
}

/// Check whether an address is a verified supplier.
#[receive(
    contract = "SupplyChainNFT",
    name = "isSupplier",
    parameter = "Address",
    return_value = "bool"
)]
fn is_supplier<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<bool> {
    let address: Address = ctx.parameter_cursor().get()?;
    Ok(host.state().authority.is_supplier(&address))
}

/// List verified suppliers, skipping `skip` and returning at most `show`.
#[receive(
    contract = "SupplyChainNFT",
    name = "viewSuppliers",
    parameter = "SupplierViewParams",
    return_value = "Vec<Address>"
)]
fn view_suppliers<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<Address>> {
    let params: SupplierViewParams = ctx.parameter_cursor().get()?;
    Ok(host.state().authority.handle_view(params))
}

/// View the collection name, symbol, administrator, mint fee and next token ID.
#[receive(contract = "SupplyChainNFT", name = "view", return_value = "ViewState")]
fn view<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<ViewState> {
    Ok(host.state().view())
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use test_infrastructure::*;

    const ADMIN: AccountAddress = AccountAddress([1u8; 32]);
    const ADMIN_ADDRESS: Address = Address::Account(ADMIN);
    const SUPPLIER_ACCOUNT: AccountAddress = AccountAddress([2u8; 32]);
    const SUPPLIER: Address = Address::Account(SUPPLIER_ACCOUNT);
    const DISTRIBUTOR_ACCOUNT: AccountAddress = AccountAddress([3u8; 32]);
    const DISTRIBUTOR: Address = Address::Account(DISTRIBUTOR_ACCOUNT);
    const STRANGER_ACCOUNT: AccountAddress = AccountAddress([4u8; 32]);
    const STRANGER: Address = Address::Account(STRANGER_ACCOUNT);
    const WAREHOUSE: ContractAddress = ContractAddress {
        index: 7,
        subindex: 0,
    };

    const MINT_FEE: Amount = Amount { micro_ccd: 1_000 };

    const METADATA_URI: &str =
        "ipfs://bafybeicw5okhl2hng2oqwnqsrrtd62unewcr3gjdry2msofdnyfcnng3vq/0.json";

    type Host = TestHost<State<TestStateApi>>;

    fn coffee() -> MintProductParams {
        MintProductParams {
            name: String::from("Kopi Arabica"),
            origin: String::from("Toraja, Sulawesi Selatan"),
            batch_number: String::from("1"),
            quantity_kg: 100,
            metadata_uri: String::from(METADATA_URI),
        }
    }

    /// Test helper creating an instance owned by `ADMIN` with `SUPPLIER`
    /// already verified.
    fn default_host() -> Host {
        let mut ctx = TestInitContext::empty();
        let bytes = to_bytes(&InitParams { mint_fee: MINT_FEE });
        ctx.set_init_origin(ADMIN).set_parameter(&bytes);
        let mut state_builder = TestStateBuilder::new();

        let state =
            init(&ctx, &mut state_builder).expect_report("Failed during init_SupplyChainNFT");

        let mut host = TestHost::new(state, state_builder);

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&SUPPLIER);
        ctx.set_sender(ADMIN_ADDRESS).set_parameter(&bytes);
        let mut logger = TestLogger::init();
        let result = add_supplier(&ctx, &mut host, &mut logger);
        claim_eq!(result, Ok(()));

        host
    }

    fn mint_as(
        host: &mut Host,
        sender: AccountAddress,
        amount: Amount,
        logger: &mut TestLogger,
    ) -> ContractResult<ContractTokenId> {
        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&coffee());
        ctx.set_sender(Address::Account(sender))
            .set_invoker(sender)
            .set_parameter(&bytes);
        // The attached amount is part of the balance during the call
        host.set_self_balance(amount);
        mint_product(&ctx, host, amount, logger)
    }

    fn update_status_as(
        host: &mut Host,
        sender: Address,
        token_id: ContractTokenId,
        status: &str,
        logger: &mut TestLogger,
    ) -> ContractResult<()> {
        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&UpdateStatusParams {
            token_id,
            status: String::from(status),
        });
        ctx.set_sender(sender).set_parameter(&bytes);
        update_status(&ctx, host, logger)
    }

    fn transfer_as(
        host: &mut Host,
        sender: Address,
        from: Address,
        to: Receiver,
        token_id: ContractTokenId,
        logger: &mut TestLogger,
    ) -> ContractResult<()> {
        let mut ctx = TestReceiveContext::empty();
        let parameter = TransferParams::from(vec![Transfer {
            token_id,
            amount: ContractTokenAmount::from(1u8),
            from,
            to,
            data: AdditionalData::empty(),
        }]);
        let bytes = to_bytes(&parameter);
        ctx.set_sender(sender).set_parameter(&bytes);
        transfer(&ctx, host, logger)
    }

    fn product_of(host: &Host, token_id: ContractTokenId) -> ContractResult<Product> {
        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&token_id);
        ctx.set_parameter(&bytes);
        get_product(&ctx, host)
    }

    /// Test initialization sets the deployer as administrator.
    #[concordium_test]
    fn test_init() {
        let host = default_host();

        let ctx = TestReceiveContext::empty();
        let result = view(&ctx, &host).expect_report("Failed to call view");

        claim_eq!(
            result,
            ViewState {
                name: String::from("SupplyChainNFT"),
                symbol: String::from("SCNFT"),
                admin: ADMIN,
                mint_fee: MINT_FEE,
                next_token_id: TokenIdU64(1),
            }
        );
        claim_eq!(host.state().products.iter().count(), 0);
    }

    #[concordium_test]
    fn test_add_supplier() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&DISTRIBUTOR);
        ctx.set_sender(ADMIN_ADDRESS).set_parameter(&bytes);

        let result = add_supplier(&ctx, &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim!(host.state().authority.is_supplier(&DISTRIBUTOR));
        claim_eq!(
            logger.logs,
            vec![to_bytes(&CustomEvent::SupplierUpdate(SupplierUpdate {
                kind: SupplierUpdateKind::Add,
                address: DISTRIBUTOR,
            }))]
        );

        // Adding again changes nothing and logs nothing
        let result = add_supplier(&ctx, &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(logger.logs.len(), 1);

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&Address::Contract(WAREHOUSE));
        ctx.set_parameter(&bytes);
        let result = is_supplier(&ctx, &host);
        claim_eq!(result, Ok(false));
    }

    #[concordium_test]
    fn test_add_supplier_not_admin() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        for sender in [SUPPLIER, STRANGER, Address::Contract(WAREHOUSE)] {
            let mut ctx = TestReceiveContext::empty();
            let bytes = to_bytes(&STRANGER);
            ctx.set_sender(sender).set_parameter(&bytes);

            let result = add_supplier(&ctx, &mut host, &mut logger);
            claim_eq!(result, Err(ContractError::Unauthorized));
        }

        claim!(!host.state().authority.is_supplier(&STRANGER));
        claim!(logger.logs.is_empty());
    }

    #[concordium_test]
    fn test_remove_supplier() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        let token_id = mint_as(&mut host, SUPPLIER_ACCOUNT, MINT_FEE, &mut logger)
            .expect_report("Failed to mint product");

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&SUPPLIER);
        ctx.set_sender(SUPPLIER).set_parameter(&bytes);
        // Suppliers cannot remove themselves
        let result = remove_supplier(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(ContractError::Unauthorized));

        ctx.set_sender(ADMIN_ADDRESS);
        let result = remove_supplier(&ctx, &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim!(!host.state().authority.is_supplier(&SUPPLIER));

        let result = mint_as(&mut host, SUPPLIER_ACCOUNT, MINT_FEE, &mut logger);
        claim_eq!(result, Err(ContractError::Unauthorized));

        // Already minted products keep their supplier and owner
        let product = product_of(&host, token_id).expect_report("Product should exist");
        claim_eq!(product.supplier, SUPPLIER);
        claim_eq!(product.owner, SUPPLIER);
    }

    /// Test minting, ensuring the record is created with its defaults, the fee
    /// reaches the administrator and the appropriate events are logged.
    #[concordium_test]
    fn test_mint_product() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        let result = mint_as(&mut host, SUPPLIER_ACCOUNT, MINT_FEE, &mut logger);
        claim_eq!(result, Ok(TokenIdU64(1)));

        let product = product_of(&host, TokenIdU64(1)).expect_report("Product should exist");
        claim_eq!(
            product,
            Product {
                token_id: TokenIdU64(1),
                name: String::from("Kopi Arabica"),
                origin: String::from("Toraja, Sulawesi Selatan"),
                batch_number: String::from("1"),
                quantity_kg: 100,
                metadata_uri: String::from(METADATA_URI),
                current_status: String::from("Created by supplier"),
                supplier: SUPPLIER,
                owner: SUPPLIER,
            }
        );
        claim_eq!(host.state().next_token_id, 2);

        // The whole fee goes to the administrator
        claim!(host.transfer_occurred(&ADMIN, MINT_FEE));

        // Check the logs
        claim!(
            logger.logs.contains(&to_bytes(&Cis2Event::Mint(MintEvent {
                owner: SUPPLIER,
                token_id: TokenIdU64(1),
                amount: ContractTokenAmount::from(1u8),
            }))),
            "Expected an event for minting token 1"
        );
        claim!(
            logger.logs.contains(&to_bytes(
                &Cis2Event::<ContractTokenId, ContractTokenAmount>::TokenMetadata(
                    TokenMetadataEvent {
                        token_id: TokenIdU64(1),
                        metadata_url: MetadataUrl {
                            url: String::from(METADATA_URI),
                            hash: None,
                        },
                    }
                )
            )),
            "Expected a metadata event for token 1"
        );
    }

    #[concordium_test]
    fn test_mint_sequential_ids() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        for expected in 1..=3u64 {
            let result = mint_as(&mut host, SUPPLIER_ACCOUNT, MINT_FEE, &mut logger);
            claim_eq!(result, Ok(TokenIdU64(expected)));
        }
    }

    #[concordium_test]
    fn test_mint_not_supplier() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        for sender in [STRANGER_ACCOUNT, DISTRIBUTOR_ACCOUNT, ADMIN] {
            let result = mint_as(&mut host, sender, MINT_FEE, &mut logger);
            claim_eq!(result, Err(ContractError::Unauthorized));
        }

        claim_eq!(host.state().products.iter().count(), 0);
        claim_eq!(host.state().next_token_id, 1);
        claim!(!host.transfer_occurred(&ADMIN, MINT_FEE));
        claim!(logger.logs.is_empty());
    }

    #[concordium_test]
    fn test_mint_invalid_payment() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        for amount in [
            Amount::zero(),
            Amount { micro_ccd: 999 },
            Amount { micro_ccd: 1_001 },
        ] {
            let result = mint_as(&mut host, SUPPLIER_ACCOUNT, amount, &mut logger);
            claim_eq!(
                result,
                Err(ContractError::Custom(CustomContractError::InvalidPayment))
            );
            claim!(!host.transfer_occurred(&ADMIN, amount));
        }

        claim_eq!(product_of(&host, TokenIdU64(1)), Err(ContractError::InvalidTokenId));
        claim_eq!(host.state().next_token_id, 1);
        claim!(logger.logs.is_empty());
    }

    #[concordium_test]
    fn test_update_status_not_owner() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        let token_id = mint_as(&mut host, SUPPLIER_ACCOUNT, MINT_FEE, &mut logger)
            .expect_report("Failed to mint product");

        for sender in [STRANGER, ADMIN_ADDRESS, DISTRIBUTOR] {
            let result = update_status_as(&mut host, sender, token_id, "Lost", &mut logger);
            claim_eq!(result, Err(ContractError::Unauthorized));
        }

        let product = product_of(&host, token_id).expect_report("Product should exist");
        claim_eq!(product.current_status, "Created by supplier");
    }

    #[concordium_test]
    fn test_update_status_unknown_token() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        let result = update_status_as(&mut host, SUPPLIER, TokenIdU64(1), "Shipped", &mut logger);
        claim_eq!(result, Err(ContractError::InvalidTokenId));
        claim!(logger.logs.is_empty());
    }

    /// Supplier ships to a distributor, who then stores the batch.
    #[concordium_test]
    fn test_supply_chain_flow() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        let token_id = mint_as(&mut host, SUPPLIER_ACCOUNT, MINT_FEE, &mut logger)
            .expect_report("Failed to mint product");
        claim_eq!(token_id, TokenIdU64(1));

        let result = update_status_as(
            &mut host,
            SUPPLIER,
            token_id,
            "Shipped to distributor",
            &mut logger,
        );
        claim_eq!(result, Ok(()));
        claim!(logger
            .logs
            .contains(&to_bytes(&CustomEvent::StatusUpdate(StatusUpdateEvent {
                token_id,
                updated_by: SUPPLIER,
                status: String::from("Shipped to distributor"),
            }))));

        let result = transfer_as(
            &mut host,
            SUPPLIER,
            SUPPLIER,
            Receiver::from_account(DISTRIBUTOR_ACCOUNT),
            token_id,
            &mut logger,
        );
        claim_eq!(result, Ok(()));
        claim!(logger.logs.contains(&to_bytes(&Cis2Event::Transfer(TransferEvent {
            token_id,
            amount: ContractTokenAmount::from(1u8),
            from: SUPPLIER,
            to: DISTRIBUTOR,
        }))));

        let product = product_of(&host, token_id).expect_report("Product should exist");
        claim_eq!(product.current_status, "Shipped to distributor");
        claim_eq!(product.owner, DISTRIBUTOR);
        claim_eq!(product.supplier, SUPPLIER);

        // Only the new owner may write the status now
        let result = update_status_as(&mut host, SUPPLIER, token_id, "Recalled", &mut logger);
        claim_eq!(result, Err(ContractError::Unauthorized));
        let result = update_status_as(
            &mut host,
            DISTRIBUTOR,
            token_id,
            "Stored at distributor warehouse",
            &mut logger,
        );
        claim_eq!(result, Ok(()));

        let product = product_of(&host, token_id).expect_report("Product should exist");
        claim_eq!(product.name, "Kopi Arabica");
        claim_eq!(product.origin, "Toraja, Sulawesi Selatan");
        claim_eq!(product.batch_number, "1");
        claim_eq!(product.quantity_kg, 100);
        claim_eq!(product.metadata_uri, METADATA_URI);
        claim_eq!(product.current_status, "Stored at distributor warehouse");
        claim_eq!(product.supplier, SUPPLIER);
        claim_eq!(product.owner, DISTRIBUTOR);
    }

    /// Test transfer token fails, when sender is neither the owner or an
    /// operator of the owner.
    #[concordium_test]
    fn test_transfer_not_authorized() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        let token_id = mint_as(&mut host, SUPPLIER_ACCOUNT, MINT_FEE, &mut logger)
            .expect_report("Failed to mint product");

        let result = transfer_as(
            &mut host,
            STRANGER,
            SUPPLIER,
            Receiver::from_account(STRANGER_ACCOUNT),
            token_id,
            &mut logger,
        );
        claim_eq!(result, Err(ContractError::Unauthorized));
        claim_eq!(host.state().owner_of(&token_id), Ok(SUPPLIER));
    }

    #[concordium_test]
    fn test_transfer_unknown_token() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        let result = transfer_as(
            &mut host,
            SUPPLIER,
            SUPPLIER,
            Receiver::from_account(DISTRIBUTOR_ACCOUNT),
            TokenIdU64(1),
            &mut logger,
        );
        claim_eq!(result, Err(ContractError::InvalidTokenId));
    }

    /// Test transfer fails when `from` no longer owns the token.
    #[concordium_test]
    fn test_transfer_stale_owner() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        let token_id = mint_as(&mut host, SUPPLIER_ACCOUNT, MINT_FEE, &mut logger)
            .expect_report("Failed to mint product");

        transfer_as(
            &mut host,
            SUPPLIER,
            SUPPLIER,
            Receiver::from_account(DISTRIBUTOR_ACCOUNT),
            token_id,
            &mut logger,
        )
        .expect_report("Owner should transfer the token");

        let result = transfer_as(
            &mut host,
            SUPPLIER,
            SUPPLIER,
            Receiver::from_account(STRANGER_ACCOUNT),
            token_id,
            &mut logger,
        );
        claim_eq!(result, Err(ContractError::InsufficientFunds));
        claim_eq!(host.state().owner_of(&token_id), Ok(DISTRIBUTOR));
    }

    /// Test transfer succeeds when sender is not the owner, but is an operator
    /// of the owner. The operator still cannot write the status.
    #[concordium_test]
    fn test_operator_transfer() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        let token_id = mint_as(&mut host, SUPPLIER_ACCOUNT, MINT_FEE, &mut logger)
            .expect_report("Failed to mint product");

        let mut ctx = TestReceiveContext::empty();
        let parameter = UpdateOperatorParams(vec![UpdateOperator {
            update: OperatorUpdate::Add,
            operator: DISTRIBUTOR,
        }]);
        let bytes = to_bytes(&parameter);
        ctx.set_sender(SUPPLIER).set_parameter(&bytes);
        let result = update_operator(&ctx, &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim!(logger.logs.contains(&to_bytes(
            &Cis2Event::<ContractTokenId, ContractTokenAmount>::UpdateOperator(
                UpdateOperatorEvent {
                    owner: SUPPLIER,
                    operator: DISTRIBUTOR,
                    update: OperatorUpdate::Add,
                }
            )
        )));

        let result = update_status_as(&mut host, DISTRIBUTOR, token_id, "In transit", &mut logger);
        claim_eq!(result, Err(ContractError::Unauthorized));

        let result = transfer_as(
            &mut host,
            DISTRIBUTOR,
            SUPPLIER,
            Receiver::from_account(STRANGER_ACCOUNT),
            token_id,
            &mut logger,
        );
        claim_eq!(result, Ok(()));
        claim_eq!(host.state().owner_of(&token_id), Ok(STRANGER));

        // Operator rights are tied to the previous owner
        let result = transfer_as(
            &mut host,
            DISTRIBUTOR,
            STRANGER,
            Receiver::from_account(DISTRIBUTOR_ACCOUNT),
            token_id,
            &mut logger,
        );
        claim_eq!(result, Err(ContractError::Unauthorized));
    }

    /// Test transfer to a contract notifies the receiving contract.
    #[concordium_test]
    fn test_transfer_to_contract() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        let token_id = mint_as(&mut host, SUPPLIER_ACCOUNT, MINT_FEE, &mut logger)
            .expect_report("Failed to mint product");

        host.setup_mock_entrypoint(
            WAREHOUSE,
            OwnedEntrypointName::new_unchecked(String::from("onReceivingCIS2")),
            MockFn::new_v1(|param, _, _, _| {
                OnReceivingCis2Params::<ContractTokenId, ContractTokenAmount>::deserial(
                    &mut Cursor::new(param.as_ref()),
                )
                .map_err(|_| CallContractError::Trap)?;
                Ok((false, ()))
            }),
        );

        let result = transfer_as(
            &mut host,
            SUPPLIER,
            SUPPLIER,
            Receiver::from_contract(
                WAREHOUSE,
                OwnedEntrypointName::new_unchecked(String::from("onReceivingCIS2")),
            ),
            token_id,
            &mut logger,
        );
        claim_eq!(result, Ok(()));
        claim_eq!(
            host.state().owner_of(&token_id),
            Ok(Address::Contract(WAREHOUSE))
        );
    }

    #[concordium_test]
    fn test_queries() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        let token_id = mint_as(&mut host, SUPPLIER_ACCOUNT, MINT_FEE, &mut logger)
            .expect_report("Failed to mint product");

        // balanceOf
        let mut ctx = TestReceiveContext::empty();
        let params = ContractBalanceOfQueryParams {
            queries: vec![
                BalanceOfQuery {
                    token_id,
                    address: SUPPLIER,
                },
                BalanceOfQuery {
                    token_id,
                    address: DISTRIBUTOR,
                },
            ],
        };
        let bytes = to_bytes(&params);
        ctx.set_parameter(&bytes);
        let result = balance_of(&ctx, &host).expect_report("Failed to call balanceOf");
        claim_eq!(
            result.0,
            vec![
                ContractTokenAmount::from(1u8),
                ContractTokenAmount::from(0u8)
            ]
        );

        // ownerOf
        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&token_id);
        ctx.set_parameter(&bytes);
        claim_eq!(owner_of(&ctx, &host), Ok(SUPPLIER));

        // tokenMetadata
        let mut ctx = TestReceiveContext::empty();
        let params = ContractTokenMetadataQueryParams {
            queries: vec![token_id],
        };
        let bytes = to_bytes(&params);
        ctx.set_parameter(&bytes);
        let result = token_metadata(&ctx, &host).expect_report("Failed to call tokenMetadata");
        claim_eq!(result.0.len(), 1);
        claim_eq!(result.0[0].url, METADATA_URI);

        let params = ContractTokenMetadataQueryParams {
            queries: vec![TokenIdU64(2)],
        };
        let bytes = to_bytes(&params);
        ctx.set_parameter(&bytes);
        claim!(token_metadata(&ctx, &host).is_err());

        // operatorOf
        let mut ctx = TestReceiveContext::empty();
        let params = OperatorOfQueryParams {
            queries: vec![OperatorOfQuery {
                owner: SUPPLIER,
                address: DISTRIBUTOR,
            }],
        };
        let bytes = to_bytes(&params);
        ctx.set_parameter(&bytes);
        let result = operator_of(&ctx, &host).expect_report("Failed to call operatorOf");
        claim_eq!(result.0, vec![false]);

        // viewSuppliers
        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&SupplierViewParams { skip: 0, show: 10 });
        ctx.set_parameter(&bytes);
        claim_eq!(view_suppliers(&ctx, &host), Ok(vec![SUPPLIER]));

        // view
        let ctx = TestReceiveContext::empty();
        let result = view(&ctx, &host).expect_report("Failed to call view");
        claim_eq!(result.next_token_id, TokenIdU64(2));
    }

    #[concordium_test]
    fn test_supports() {
        let host = default_host();

        let mut ctx = TestReceiveContext::empty();
        let params = SupportsQueryParams {
            queries: vec![
                StandardIdentifierOwned::new_unchecked(String::from("CIS-0")),
                StandardIdentifierOwned::new_unchecked(String::from("CIS-2")),
                StandardIdentifierOwned::new_unchecked(String::from("CIS-1")),
            ],
        };
        let bytes = to_bytes(&params);
        ctx.set_parameter(&bytes);

        let result = supports(&ctx, &host).expect_report("Failed to call supports");
        claim_eq!(
            to_bytes(&result),
            to_bytes(&SupportsQueryResponse::from(vec![
                SupportResult::Support,
                SupportResult::Support,
                SupportResult::NoSupport,
            ]))
        );
    }

    /// Test minting leaves no record when the fee cannot be forwarded.
    #[concordium_test]
    fn test_mint_fee_transfer_failure() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&coffee());
        ctx.set_sender(SUPPLIER)
            .set_invoker(SUPPLIER_ACCOUNT)
            .set_parameter(&bytes);
        // Contract balance does not cover the fee
        host.set_self_balance(Amount::zero());

        let result = mint_product(&ctx, &mut host, MINT_FEE, &mut logger);
        claim_eq!(
            result,
            Err(ContractError::Custom(CustomContractError::InvokeTransferError))
        );
        claim_eq!(product_of(&host, TokenIdU64(1)), Err(ContractError::InvalidTokenId));
        claim_eq!(host.state().next_token_id, 1);
        claim!(logger.logs.is_empty());
    }
}
