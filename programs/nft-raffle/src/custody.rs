//! Prize custody.
//!
//! Standard NFTs are moved into a token account owned by the raffle escrow and
//! moved out again on claim. Programmable NFTs cannot be moved freely, so they
//! stay in the creator's account under a locked-transfer delegation to the
//! escrow; the claim unlocks them and transfers straight to the winner.

use anchor_lang::prelude::*;
use anchor_spl::metadata::{Metadata, MetadataAccount};
use mpl_token_metadata::{
    instructions::{
        DelegateLockedTransferV1CpiBuilder, LockV1CpiBuilder, TransferV1CpiBuilder,
        UnlockV1CpiBuilder,
    },
    types::{Collection, TokenStandard},
};

use crate::error::RaffleError;
use crate::state::{GlobalConfig, PrizeKind};

/// Reads the Token Metadata record of a prize. Anything not owned by the
/// Token Metadata program, or not parsing as metadata, is `BadMetadata`.
pub fn load_metadata(info: &AccountInfo) -> Result<MetadataAccount> {
    require_keys_eq!(*info.owner, Metadata::id(), RaffleError::BadMetadata);
    let data = info.try_borrow_data()?;
    MetadataAccount::try_deserialize(&mut &data[..])
        .map_err(|_| error!(RaffleError::BadMetadata))
}

/// Checks a prize's metadata against the custody mode and the collection
/// whitelist.
pub fn check_prize(
    config: &GlobalConfig,
    kind: PrizeKind,
    mint: &Pubkey,
    metadata_mint: &Pubkey,
    collection: Option<&Collection>,
    token_standard: Option<TokenStandard>,
) -> Result<()> {
    require_keys_eq!(*metadata_mint, *mint, RaffleError::BadMetadata);

    let standard_ok = match kind {
        PrizeKind::Standard => matches!(
            token_standard,
            None | Some(TokenStandard::NonFungible) | Some(TokenStandard::NonFungibleEdition)
        ),
        PrizeKind::Programmable => {
            token_standard == Some(TokenStandard::ProgrammableNonFungible)
        }
    };
    require!(standard_ok, RaffleError::InvalidTokenStandard);

    let collection = collection
        .filter(|c| c.verified)
        .ok_or(RaffleError::InvalidCollection)?;
    require!(
        config.is_whitelisted(&collection.key),
        RaffleError::InvalidCollection
    );

    Ok(())
}

/// Accounts shared by every Token Metadata call on a programmable prize.
/// `token` is the creator's holding account; the prize never leaves it until
/// the claim.
pub struct ProgrammablePrize<'a, 'info> {
    pub metadata_program: &'a AccountInfo<'info>,
    pub mint: &'a AccountInfo<'info>,
    pub metadata: &'a AccountInfo<'info>,
    pub edition: &'a AccountInfo<'info>,
    pub token: &'a AccountInfo<'info>,
    pub token_owner: &'a AccountInfo<'info>,
    pub token_record: &'a AccountInfo<'info>,
    pub escrow: &'a AccountInfo<'info>,
    pub system_program: &'a AccountInfo<'info>,
    pub sysvar_instructions: &'a AccountInfo<'info>,
    pub spl_token_program: &'a AccountInfo<'info>,
    pub authorization_rules_program: Option<&'a AccountInfo<'info>>,
    pub authorization_rules: Option<&'a AccountInfo<'info>>,
}

impl<'a, 'info> ProgrammablePrize<'a, 'info> {
    /// Makes the escrow the locked-transfer delegate, then locks the token.
    /// `token_owner` must sign the transaction.
    pub fn lock(&self, payer: &'a AccountInfo<'info>, escrow_seeds: &[&[&[u8]]]) -> Result<()> {
        DelegateLockedTransferV1CpiBuilder::new(self.metadata_program)
            .delegate(self.escrow)
            .metadata(self.metadata)
            .master_edition(Some(self.edition))
            .token_record(Some(self.token_record))
            .mint(self.mint)
            .token(self.token)
            .authority(self.token_owner)
            .payer(payer)
            .system_program(self.system_program)
            .sysvar_instructions(self.sysvar_instructions)
            .spl_token_program(Some(self.spl_token_program))
            .authorization_rules_program(self.authorization_rules_program)
            .authorization_rules(self.authorization_rules)
            .amount(1)
            .locked_address(self.escrow.key())
            .invoke()?;

        LockV1CpiBuilder::new(self.metadata_program)
            .authority(self.escrow)
            .token_owner(Some(self.token_owner))
            .token(self.token)
            .mint(self.mint)
            .metadata(self.metadata)
            .edition(Some(self.edition))
            .token_record(Some(self.token_record))
            .payer(payer)
            .system_program(self.system_program)
            .sysvar_instructions(self.sysvar_instructions)
            .spl_token_program(Some(self.spl_token_program))
            .authorization_rules_program(self.authorization_rules_program)
            .authorization_rules(self.authorization_rules)
            .invoke_signed(escrow_seeds)?;

        Ok(())
    }

    /// Unlocks the token and transfers it from the creator to `destination`,
    /// both signed by the escrow.
    pub fn release(
        &self,
        payer: &'a AccountInfo<'info>,
        destination: &'a AccountInfo<'info>,
        destination_owner: &'a AccountInfo<'info>,
        destination_token_record: &'a AccountInfo<'info>,
        ata_program: &'a AccountInfo<'info>,
        escrow_seeds: &[&[&[u8]]],
    ) -> Result<()> {
        UnlockV1CpiBuilder::new(self.metadata_program)
            .authority(self.escrow)
            .token_owner(Some(self.token_owner))
            .token(self.token)
            .mint(self.mint)
            .metadata(self.metadata)
            .edition(Some(self.edition))
            .token_record(Some(self.token_record))
            .payer(payer)
            .system_program(self.system_program)
            .sysvar_instructions(self.sysvar_instructions)
            .spl_token_program(Some(self.spl_token_program))
            .authorization_rules_program(self.authorization_rules_program)
            .authorization_rules(self.authorization_rules)
            .invoke_signed(escrow_seeds)?;

        TransferV1CpiBuilder::new(self.metadata_program)
            .token(self.token)
            .token_owner(self.token_owner)
            .destination_token(destination)
            .destination_owner(destination_owner)
            .mint(self.mint)
            .metadata(self.metadata)
            .edition(Some(self.edition))
            .token_record(Some(self.token_record))
            .destination_token_record(Some(destination_token_record))
            .authority(self.escrow)
            .payer(payer)
            .system_program(self.system_program)
            .sysvar_instructions(self.sysvar_instructions)
            .spl_token_program(self.spl_token_program)
            .spl_ata_program(ata_program)
            .authorization_rules_program(self.authorization_rules_program)
            .authorization_rules(self.authorization_rules)
            .amount(1)
            .invoke_signed(escrow_seeds)?;

        Ok(())
    }
}
