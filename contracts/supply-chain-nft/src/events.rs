use super::*;

/// An untagged event of a product status being rewritten.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct StatusUpdateEvent {
    /// The ID of the token whose status changed.
    pub token_id: ContractTokenId,
    /// The owner who wrote the status.
    pub updated_by: Address,
    /// Status after the update.
    pub status: String,
}

/// Tagged Custom event to be serialized for the event log.
#[derive(Debug, PartialEq, Eq)]
pub enum CustomEvent {
    /// Updating status of a product
    StatusUpdate(StatusUpdateEvent),
    /// Adding or removing a verified supplier
    SupplierUpdate(SupplierUpdate),
}

impl Serial for CustomEvent {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            CustomEvent::StatusUpdate(event) => {
                out.write_u8(STATUS_UPDATE_TAG)?;
                event.serial(out)
            }
            CustomEvent::SupplierUpdate(event) => {
                out.write_u8(SUPPLIER_UPDATE_TAG)?;
                event.serial(out)
            }
        }
    }
}

impl Deserial for CustomEvent {
    fn deserial<R: Read>(source: &mut R) -> ParseResult<Self> {
        let tag = source.read_u8()?;
        match tag {
            STATUS_UPDATE_TAG => StatusUpdateEvent::deserial(source).map(CustomEvent::StatusUpdate),
            SUPPLIER_UPDATE_TAG => {
                SupplierUpdate::deserial(source).map(CustomEvent::SupplierUpdate)
            }
            _ => Err(ParseError::default()),
        }
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    #[concordium_test]
    fn status_update_event_is_tagged() {
        let event = CustomEvent::StatusUpdate(StatusUpdateEvent {
            token_id: TokenIdU64(1),
            updated_by: Address::Account(AccountAddress([2; 32])),
            status: String::from("Shipped to distributor"),
        });

        let bytes = to_bytes(&event);
        claim_eq!(bytes[0], STATUS_UPDATE_TAG);
        claim_eq!(from_bytes::<CustomEvent>(&bytes), Ok(event));
    }

    #[concordium_test]
    fn supplier_update_event_is_tagged() {
        let event = CustomEvent::SupplierUpdate(SupplierUpdate {
            kind: SupplierUpdateKind::Remove,
            address: Address::Contract(ContractAddress {
                index: 3,
                subindex: 0,
            }),
        });

        let bytes = to_bytes(&event);
        claim_eq!(bytes[0], SUPPLIER_UPDATE_TAG);
        claim_eq!(from_bytes::<CustomEvent>(&bytes), Ok(event));
    }

    #[concordium_test]
    fn unknown_tag_is_rejected() {
        claim!(from_bytes::<CustomEvent>(&[0u8]).is_err());
    }
}
