use super::*;

/// Collection name reported by the `view` function.
pub const COLLECTION_NAME: &str = "SupplyChainNFT";

/// Collection symbol reported by the `view` function.
pub const COLLECTION_SYMBOL: &str = "SCNFT";

/// Status every product starts with.
pub const INITIAL_STATUS: &str = "Created by supplier";

/// The first token ID handed out by a fresh instance.
pub const FIRST_TOKEN_ID: u64 = 1;

/// Standards supported by this contract. Returned by `supports`.
pub const SUPPORTS_STANDARDS: [StandardIdentifier<'static>; 2] =
    [CIS0_STANDARD_IDENTIFIER, CIS2_STANDARD_IDENTIFIER];
