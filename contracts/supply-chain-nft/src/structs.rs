use super::*;

/// Instance configuration, fixed at initialization.
#[derive(Serialize, SchemaType)]
pub struct InitParams {
    /// Exact amount a supplier has to attach to `mintProduct`.
    pub mint_fee: Amount,
}

/// Provenance data supplied when minting a product batch.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct MintProductParams {
    /// Product name
    pub name: String,
    /// Place of production
    pub origin: String,
    /// Supplier's batch identifier
    pub batch_number: String,
    /// Batch weight in kilograms
    pub quantity_kg: u64,
    /// Off-chain metadata, e.g. an IPFS URI
    pub metadata_uri: String,
}

#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct UpdateStatusParams {
    pub token_id: ContractTokenId,
    /// Replaces the current status verbatim.
    pub status: String,
}

/// A product batch record. Only `current_status` and `owner` change after
/// minting.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct Product {
    pub token_id: ContractTokenId,
    pub name: String,
    pub origin: String,
    pub batch_number: String,
    pub quantity_kg: u64,
    pub metadata_uri: String,
    pub current_status: String,
    /// Address that minted the product
    pub supplier: Address,
    /// Current holder of the token
    pub owner: Address,
}

/// The contract state.
#[derive(Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Contract administrator and the verified suppliers.
    pub authority: Authority<S>,
    /// Exact amount required to mint a product.
    pub mint_fee: Amount,
    /// ID of the next product to be minted. IDs are never reused.
    pub next_token_id: u64,
    /// All minted products.
    pub products: StateMap<ContractTokenId, Product, S>,
    /// Operators for each address.
    pub operators: StateMap<Address, StateSet<Address, S>, S>,
}

/// Summary of the contract instance.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct ViewState {
    pub name: String,
    pub symbol: String,
    pub admin: AccountAddress,
    pub mint_fee: Amount,
    pub next_token_id: ContractTokenId,
}
